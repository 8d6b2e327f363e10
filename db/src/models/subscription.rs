use chrono::{DateTime, Utc};
use entitlements::{PlanError, Subscription};
use serde::Serialize;
use uuid::Uuid;

/// Row of the `subscriptions` table as stored.
///
/// `plan` and `status` stay text here; converting to a `Subscription`
/// rejects values the evaluator does not know.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct SubscriptionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan: String,
    pub status: String,
    pub current_period_end: Option<DateTime<Utc>>,
    pub stripe_customer_id: Option<String>,
    pub stripe_subscription_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<SubscriptionRow> for Subscription {
    type Error = PlanError;

    fn try_from(row: SubscriptionRow) -> Result<Self, Self::Error> {
        Ok(Subscription {
            id: row.id,
            user_id: row.user_id,
            plan: row.plan.parse()?,
            status: row.status.parse()?,
            current_period_end: row.current_period_end,
            stripe_customer_id: row.stripe_customer_id,
            stripe_subscription_id: row.stripe_subscription_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use entitlements::{Plan, SubscriptionStatus};

    use super::*;

    fn row(plan: &str, status: &str) -> SubscriptionRow {
        let now = Utc::now();
        SubscriptionRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            plan: plan.to_string(),
            status: status.to_string(),
            current_period_end: None,
            stripe_customer_id: Some("cus_123".to_string()),
            stripe_subscription_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn known_row_converts() {
        let sub = Subscription::try_from(row("advanced", "past_due")).unwrap();
        assert_eq!(sub.plan, Plan::Advanced);
        assert_eq!(sub.status, SubscriptionStatus::PastDue);
        assert_eq!(sub.stripe_customer_id.as_deref(), Some("cus_123"));
    }

    #[test]
    fn unknown_plan_row_is_rejected() {
        assert_eq!(
            Subscription::try_from(row("premium", "active")),
            Err(PlanError::UnknownPlan("premium".to_string()))
        );
    }

    #[test]
    fn unknown_status_row_is_rejected() {
        assert_eq!(
            Subscription::try_from(row("free", "paused")),
            Err(PlanError::UnknownStatus("paused".to_string()))
        );
    }
}
