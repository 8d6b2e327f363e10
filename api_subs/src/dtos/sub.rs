use chrono::{DateTime, Utc};
use entitlements::{Plan, PlanDetails, ResourceKind, Subscription, SubscriptionStatus};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub struct PlansResponse {
    pub plans: Vec<PlanDetails>,
}

/// Subscription as shown to the front-end. Billing provider ids stay server side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionResponse {
    pub id: Uuid,
    pub plan: Plan,
    pub status: SubscriptionStatus,
    pub current_period_end: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Subscription> for SubscriptionResponse {
    fn from(sub: Subscription) -> Self {
        SubscriptionResponse {
            id: sub.id,
            plan: sub.plan,
            status: sub.status,
            current_period_end: sub.current_period_end,
            created_at: sub.created_at,
            updated_at: sub.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CurrentSubscriptionResponse {
    pub subscription: SubscriptionResponse,
    pub plan: PlanDetails,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CapacityResponse {
    pub resource: ResourceKind,
    pub used: u64,
    pub allowed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn billing_ids_are_not_serialized() {
        let mut sub = Subscription::new_default(Uuid::new_v4());
        sub.stripe_customer_id = Some("cus_123".to_string());
        sub.stripe_subscription_id = Some("sub_456".to_string());

        let json = serde_json::to_value(SubscriptionResponse::from(sub)).unwrap();
        assert!(json.get("stripe_customer_id").is_none());
        assert!(json.get("stripe_subscription_id").is_none());
        assert_eq!(json["plan"], "free");
        assert_eq!(json["status"], "active");
    }
}
