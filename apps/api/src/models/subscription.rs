use serde::{Deserialize, Serialize};

use crate::models::user::SubscriptionTier;

/// Answer of `GET /subscriptions/status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionStatus {
    pub status: SubscriptionTier,
    pub plan_type: SubscriptionTier,
}
