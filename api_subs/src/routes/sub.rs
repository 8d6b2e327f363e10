use std::sync::Arc;

use actix_web::{HttpResponse, get, post, web};
use common::{error::Res, http::Success, jwt::JwtClaims};
use entitlements::{EntitlementEvaluator, ResourceKind};
use sqlx::PgPool;

use crate::{
    dtos::sub::{PlansResponse, SubscriptionResponse},
    services,
};

/// Lists every plan with its limits, price and features, cheapest first.
///
/// # Output
/// - Success: JSON object with a `plans` array. Unlimited limits are `null`.
///
/// # Frontend Example
/// ```javascript
/// const response = await fetch('/api/sub/plans');
/// const { plans } = await response.json();
/// // plans[0] = {
/// //   plan: "free",
/// //   name: "Free",
/// //   limits: { leads: 50, pipelines: 1, users: 1 },
/// //   price: 0,
/// //   features: ["Up to 50 leads", ...]
/// // }
/// // plans[3].limits = { leads: null, pipelines: null, users: null }
/// ```
#[get("/plans")]
pub async fn get_plans(evaluator: web::Data<Arc<EntitlementEvaluator>>) -> Res<HttpResponse> {
    let plans = evaluator.catalog().plans().cloned().collect();
    Success::ok(PlansResponse { plans })
}

/// Creates the default free subscription for the authenticated user.
///
/// Safe to call more than once: an existing subscription is returned as is.
///
/// # Output
/// - Success: 201 with the user's subscription
#[post("/provision")]
pub async fn post_provision(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<HttpResponse> {
    let subscription = services::sub::provision_subscription(&pool, claims.user_id()).await?;
    Success::created(SubscriptionResponse::from(subscription))
}

/// Retrieves the authenticated user's subscription together with its plan.
///
/// # Output
/// - Success: `{ subscription, plan }`
/// - Error: 404 if the user has no subscription, 500 if the stored plan is unknown
#[get("/current")]
pub async fn get_current(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
    evaluator: web::Data<Arc<EntitlementEvaluator>>,
) -> Res<HttpResponse> {
    let current = services::sub::get_current(&pool, &evaluator, claims.user_id()).await?;
    Success::ok(current)
}

/// Current lead and pipeline usage against the plan, for limit banners.
///
/// # Frontend Example
/// ```javascript
/// const response = await fetch('/api/dashboard/sub/usage', {
///   headers: { 'Authorization': `Bearer ${session.access_token}` }
/// });
/// const usage = await response.json();
/// // {
/// //   plan: "starter",
/// //   leads: { used: 200, limit: 250, near_limit: true, has_capacity: true },
/// //   pipelines: { used: 1, limit: 3, near_limit: false, has_capacity: true },
/// //   should_prompt_upgrade: true
/// // }
/// if (usage.should_prompt_upgrade) showUpgradeBanner(usage);
/// ```
#[get("/usage")]
pub async fn get_usage(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
    evaluator: web::Data<Arc<EntitlementEvaluator>>,
) -> Res<HttpResponse> {
    let report = services::sub::get_usage_report(&pool, &evaluator, claims.user_id()).await?;
    Success::ok(report)
}

/// Whether the user may create another lead or pipeline.
///
/// `resource` is `leads` or `pipelines`. Users without a subscription get
/// `allowed: false`.
#[get("/capacity/{resource}")]
pub async fn get_capacity(
    claims: web::ReqData<JwtClaims>,
    resource: web::Path<String>,
    pool: web::Data<Arc<PgPool>>,
    evaluator: web::Data<Arc<EntitlementEvaluator>>,
) -> Res<HttpResponse> {
    let kind: ResourceKind = resource.parse()?;
    let capacity =
        services::sub::check_capacity(&pool, &evaluator, claims.user_id(), kind).await?;
    Success::ok(capacity)
}
