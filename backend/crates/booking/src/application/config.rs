//! Application Configuration
//!
//! Configuration for the booking application layer.

use chrono::Duration;

/// Booking application configuration
#[derive(Clone)]
pub struct BookingConfig {
    /// HS256 signing secret for access tokens
    pub token_secret: Vec<u8>,
    /// Access token lifetime
    pub access_token_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            token_secret: Vec::new(),
            access_token_ttl: Duration::hours(24),
            password_pepper: None,
        }
    }
}

impl std::fmt::Debug for BookingConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingConfig")
            .field("token_secret", &"[REDACTED]")
            .field("access_token_ttl", &self.access_token_ttl)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl BookingConfig {
    /// Create config with a random token secret
    ///
    /// Tokens do not survive a restart.
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = vec![0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            token_secret: secret,
            ..Default::default()
        }
    }

    /// Create config for development (random secret, short-lived tokens)
    pub fn development() -> Self {
        Self {
            access_token_ttl: Duration::hours(1),
            ..Self::with_random_secret()
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
