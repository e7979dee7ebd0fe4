use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    Free,
    Premium,
    /// Any plan name this build does not know about.
    #[serde(other)]
    Unknown,
}

impl SubscriptionTier {
    pub fn as_str(self) -> &'static str {
        match self {
            SubscriptionTier::Free => "free",
            SubscriptionTier::Premium => "premium",
            SubscriptionTier::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub subscription_status: SubscriptionTier,
    pub usage_count: u32,
    pub created_at: String,
    pub updated_at: String,
}

/// Payload returned by login and register: the account plus its token pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unrecognized_plan_deserializes_as_unknown() {
        let tier: SubscriptionTier = serde_json::from_value(json!("enterprise")).unwrap();
        assert_eq!(tier, SubscriptionTier::Unknown);
        assert_eq!(tier.as_str(), "unknown");

        let premium: SubscriptionTier = serde_json::from_value(json!("premium")).unwrap();
        assert_eq!(premium, SubscriptionTier::Premium);
    }

    #[test]
    fn test_user_with_unrecognized_plan_still_decodes() {
        let user: User = serde_json::from_value(json!({
            "id": "user-2",
            "email": "b@x.com",
            "name": "Bo",
            "subscription_status": "enterprise",
            "usage_count": 0,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(user.subscription_status, SubscriptionTier::Unknown);
    }
}
