use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::PlanError, plan::Plan};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Canceled,
    PastDue,
    Trial,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Canceled => "canceled",
            SubscriptionStatus::PastDue => "past_due",
            SubscriptionStatus::Trial => "trial",
        }
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubscriptionStatus {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(SubscriptionStatus::Active),
            "canceled" => Ok(SubscriptionStatus::Canceled),
            "past_due" => Ok(SubscriptionStatus::PastDue),
            "trial" => Ok(SubscriptionStatus::Trial),
            other => Err(PlanError::UnknownStatus(other.to_string())),
        }
    }
}

/// A user's current plan assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan: Plan,
    pub status: SubscriptionStatus,
    pub current_period_end: Option<DateTime<Utc>>,
    pub stripe_customer_id: Option<String>,
    pub stripe_subscription_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Subscription {
    /// Subscription a freshly provisioned account starts with.
    pub fn new_default(user_id: Uuid) -> Self {
        let now = Utc::now();
        Subscription {
            id: Uuid::new_v4(),
            user_id,
            plan: Plan::Free,
            status: SubscriptionStatus::Active,
            current_period_end: None,
            stripe_customer_id: None,
            stripe_subscription_id: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Resource counts for one user, recomputed on every request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub leads: u64,
    pub pipelines: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_subscription_is_active_free() {
        let user_id = Uuid::new_v4();
        let sub = Subscription::new_default(user_id);
        assert_eq!(sub.user_id, user_id);
        assert_eq!(sub.plan, Plan::Free);
        assert_eq!(sub.status, SubscriptionStatus::Active);
        assert!(sub.current_period_end.is_none());
    }

    #[test]
    fn status_uses_snake_case_identifiers() {
        assert_eq!(
            "past_due".parse::<SubscriptionStatus>(),
            Ok(SubscriptionStatus::PastDue)
        );
        assert_eq!(
            serde_json::to_string(&SubscriptionStatus::PastDue).unwrap(),
            "\"past_due\""
        );
        assert_eq!(
            "expired".parse::<SubscriptionStatus>(),
            Err(PlanError::UnknownStatus("expired".to_string()))
        );
    }
}
