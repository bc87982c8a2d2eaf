//! Coupon Entity

use chrono::{DateTime, Utc};
use kernel::id::CouponId;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Coupon {
    pub coupon_id: CouponId,
    pub coupon_code: String,
    pub discount_percent: i32,
    /// Upper bound of the discount, in the wallet's currency unit
    pub max_discount: i64,
    pub min_booking_amount: i64,
    pub valid_until: DateTime<Utc>,
}

impl Coupon {
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.valid_until > now
    }
}
