//! Plan entitlements for the CRM.
//!
//! Given a user's subscription and current resource counts this crate answers
//! what the plan's limits are, whether a resource still has room, and whether
//! an upgrade prompt should be shown. Everything here is pure; subscriptions
//! and counts are fetched by the caller.

pub mod catalog;
pub mod error;
pub mod evaluator;
pub mod plan;
pub mod subscription;

pub use catalog::PlanCatalog;
pub use error::PlanError;
pub use evaluator::{
    DEFAULT_NEAR_LIMIT_THRESHOLD, EntitlementEvaluator, ResourceUsage, UsageReport, is_near_limit,
};
pub use plan::{Limit, Plan, PlanDetails, PlanLimits, ResourceKind};
pub use subscription::{Subscription, SubscriptionStatus, Usage};
