//! Response Envelope
//!
//! Every endpoint answers with the same three-field JSON object:
//!
//! ```json
//! {"status": "Failed", "message": "Stations cannot be empty.", "data": null}
//! ```
//!
//! No other fields are ever added, so clients can decode any response
//! with a single shape.

use serde::{Deserialize, Serialize};

/// Outcome marker carried in the `status` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnvelopeStatus {
    Success,
    Failed,
}

/// `{status, message, data}` wrapper used for all responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: EnvelopeStatus,
    pub message: String,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// 成功レスポンス
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: EnvelopeStatus::Success,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == EnvelopeStatus::Success
    }
}

impl Envelope<()> {
    /// 失敗レスポンス (`data` は常に `null`)
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: EnvelopeStatus::Failed,
            message: message.into(),
            data: None,
        }
    }
}
