use crate::plan::{Limit, Plan, PlanDetails, PlanLimits};

/// Read-only plan table.
///
/// Built once at startup and shared behind an `Arc`. Each plan has its own
/// field so lookups are an exhaustive `match` and can never miss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanCatalog {
    free: PlanDetails,
    starter: PlanDetails,
    advanced: PlanDetails,
    pro: PlanDetails,
}

impl PlanCatalog {
    /// The compiled-in plan table.
    ///
    /// | Plan     | Leads     | Pipelines | Users     | Price  |
    /// |----------|-----------|-----------|-----------|--------|
    /// | Free     | 50        | 1         | 1         | $0     |
    /// | Starter  | 250       | 3         | 3         | $29    |
    /// | Advanced | 1000      | 10        | 10        | $79    |
    /// | Pro      | Unlimited | Unlimited | Unlimited | $199   |
    pub fn standard() -> Self {
        PlanCatalog {
            free: PlanDetails {
                plan: Plan::Free,
                name: "Free".to_string(),
                limits: PlanLimits {
                    leads: Limit::Limited(50),
                    pipelines: Limit::Limited(1),
                    users: Limit::Limited(1),
                },
                price: 0,
                features: features(&[
                    "Up to 50 leads",
                    "1 sales pipeline",
                    "Single user",
                    "Basic lead management",
                ]),
            },
            starter: PlanDetails {
                plan: Plan::Starter,
                name: "Starter".to_string(),
                limits: PlanLimits {
                    leads: Limit::Limited(250),
                    pipelines: Limit::Limited(3),
                    users: Limit::Limited(3),
                },
                price: 2900,
                features: features(&[
                    "Up to 250 leads",
                    "3 sales pipelines",
                    "Up to 3 users",
                    "CSV import and export",
                    "Email support",
                ]),
            },
            advanced: PlanDetails {
                plan: Plan::Advanced,
                name: "Advanced".to_string(),
                limits: PlanLimits {
                    leads: Limit::Limited(1000),
                    pipelines: Limit::Limited(10),
                    users: Limit::Limited(10),
                },
                price: 7900,
                features: features(&[
                    "Up to 1000 leads",
                    "10 sales pipelines",
                    "Up to 10 users",
                    "Excel and PDF reports",
                    "Calendar integration",
                    "Priority email support",
                ]),
            },
            pro: PlanDetails {
                plan: Plan::Pro,
                name: "Pro".to_string(),
                limits: PlanLimits {
                    leads: Limit::Unlimited,
                    pipelines: Limit::Unlimited,
                    users: Limit::Unlimited,
                },
                price: 19900,
                features: features(&[
                    "Unlimited leads",
                    "Unlimited sales pipelines",
                    "Unlimited users",
                    "Advanced reporting",
                    "Dedicated account manager",
                ]),
            },
        }
    }

    pub fn details(&self, plan: Plan) -> &PlanDetails {
        match plan {
            Plan::Free => &self.free,
            Plan::Starter => &self.starter,
            Plan::Advanced => &self.advanced,
            Plan::Pro => &self.pro,
        }
    }

    pub fn limits_for(&self, plan: Plan) -> PlanLimits {
        self.details(plan).limits
    }

    /// All plans, cheapest first.
    pub fn plans(&self) -> impl Iterator<Item = &PlanDetails> {
        Plan::ALL.into_iter().map(move |plan| self.details(plan))
    }
}

impl Default for PlanCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn features(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn details_are_keyed_by_their_own_plan() {
        let catalog = PlanCatalog::standard();
        for plan in Plan::ALL {
            assert_eq!(catalog.details(plan).plan, plan);
        }
    }

    #[test]
    fn plans_are_listed_cheapest_first() {
        let catalog = PlanCatalog::standard();
        let prices: Vec<i64> = catalog.plans().map(|details| details.price).collect();
        assert_eq!(prices, vec![0, 2900, 7900, 19900]);
    }

    #[test]
    fn every_plan_lists_features() {
        let catalog = PlanCatalog::standard();
        assert!(catalog.plans().all(|details| !details.features.is_empty()));
    }
}
