use std::sync::Arc;

use serde::Serialize;

use crate::{
    catalog::PlanCatalog,
    plan::{Limit, Plan, PlanLimits, ResourceKind},
    subscription::{Subscription, Usage},
};

/// Usage percentage at which a resource counts as near its limit.
pub const DEFAULT_NEAR_LIMIT_THRESHOLD: u32 = 80;

/// Whether `current_count` is at or above `threshold_percent` of `limit`.
///
/// Unlimited caps are never near. The comparison is done in integers
/// (`count * 100 >= threshold * limit`), so a zero cap is always near.
pub fn is_near_limit(current_count: u64, limit: Limit, threshold_percent: u32) -> bool {
    match limit {
        Limit::Unlimited => false,
        Limit::Limited(max) => {
            u128::from(current_count) * 100 >= u128::from(threshold_percent) * u128::from(max)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResourceUsage {
    pub used: u64,
    pub limit: Limit,
    pub near_limit: bool,
    pub has_capacity: bool,
}

/// Everything a limit banner needs for one subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageReport {
    pub plan: Plan,
    pub leads: ResourceUsage,
    pub pipelines: ResourceUsage,
    pub should_prompt_upgrade: bool,
}

/// Answers limit questions for a subscription. Holds no mutable state.
#[derive(Debug, Clone)]
pub struct EntitlementEvaluator {
    catalog: Arc<PlanCatalog>,
    near_limit_threshold: u32,
}

impl EntitlementEvaluator {
    /// `near_limit_threshold` is a percentage; callers validate its range.
    pub fn new(catalog: Arc<PlanCatalog>, near_limit_threshold: u32) -> Self {
        EntitlementEvaluator {
            catalog,
            near_limit_threshold,
        }
    }

    pub fn with_catalog(catalog: Arc<PlanCatalog>) -> Self {
        Self::new(catalog, DEFAULT_NEAR_LIMIT_THRESHOLD)
    }

    pub fn catalog(&self) -> &PlanCatalog {
        &self.catalog
    }

    pub fn near_limit_threshold(&self) -> u32 {
        self.near_limit_threshold
    }

    pub fn limits_for(&self, plan: Plan) -> PlanLimits {
        self.catalog.limits_for(plan)
    }

    /// Whether one more `kind` may be created on top of `current_count`.
    ///
    /// Fails closed: without a subscription there is no capacity.
    pub fn has_capacity(
        &self,
        subscription: Option<&Subscription>,
        kind: ResourceKind,
        current_count: u64,
    ) -> bool {
        let Some(subscription) = subscription else {
            log::debug!("No subscription found, denying {} capacity", kind);
            return false;
        };

        self.limits_for(subscription.plan)
            .get(kind)
            .allows(current_count)
    }

    pub fn is_near_limit(&self, current_count: u64, limit: Limit) -> bool {
        is_near_limit(current_count, limit, self.near_limit_threshold)
    }

    /// Free plans always prompt; paid plans prompt once leads or pipelines
    /// get near their limit.
    pub fn should_prompt_upgrade(
        &self,
        subscription: &Subscription,
        leads_count: u64,
        pipelines_count: u64,
    ) -> bool {
        if subscription.plan == Plan::Free {
            return true;
        }

        let limits = self.limits_for(subscription.plan);
        self.is_near_limit(leads_count, limits.leads)
            || self.is_near_limit(pipelines_count, limits.pipelines)
    }

    pub fn usage_report(&self, subscription: &Subscription, usage: Usage) -> UsageReport {
        let limits = self.limits_for(subscription.plan);
        let resource = |kind: ResourceKind, used: u64| ResourceUsage {
            used,
            limit: limits.get(kind),
            near_limit: self.is_near_limit(used, limits.get(kind)),
            has_capacity: self.has_capacity(Some(subscription), kind, used),
        };

        UsageReport {
            plan: subscription.plan,
            leads: resource(ResourceKind::Leads, usage.leads),
            pipelines: resource(ResourceKind::Pipelines, usage.pipelines),
            should_prompt_upgrade: self.should_prompt_upgrade(
                subscription,
                usage.leads,
                usage.pipelines,
            ),
        }
    }
}
