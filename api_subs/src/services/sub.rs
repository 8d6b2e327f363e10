use common::error::{AppError, Res};
use entitlements::{EntitlementEvaluator, ResourceKind, Subscription, Usage, UsageReport};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dtos::sub::{CapacityResponse, CurrentSubscriptionResponse};

/// Loads the user's subscription, if any.
///
/// A stored plan or status the evaluator does not know is a configuration
/// error and is never replaced by a default.
pub async fn load_subscription(pool: &PgPool, user_id: Uuid) -> Res<Option<Subscription>> {
    let Some(row) = db::subscription::get_subscription_by_user_id(pool, user_id).await? else {
        return Ok(None);
    };

    let subscription_id = row.id;
    Subscription::try_from(row).map(Some).map_err(|e| {
        log::error!(
            "Subscription {} of user {} is unusable: {}",
            subscription_id,
            user_id,
            e
        );
        AppError::from(e)
    })
}

/// Loads the user's subscription or fails with 404.
pub async fn require_subscription(pool: &PgPool, user_id: Uuid) -> Res<Subscription> {
    load_subscription(pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No subscription for user {}", user_id)))
}

/// Gives a newly provisioned account its default free subscription.
/// Calling it again returns the subscription the user already has.
pub async fn provision_subscription(pool: &PgPool, user_id: Uuid) -> Res<Subscription> {
    let row = db::subscription::insert_default_subscription(pool, user_id).await?;
    let subscription = Subscription::try_from(row)?;
    log::info!(
        "User {} is on the {} plan ({})",
        user_id,
        subscription.plan,
        subscription.status
    );
    Ok(subscription)
}

pub async fn get_current(
    pool: &PgPool,
    evaluator: &EntitlementEvaluator,
    user_id: Uuid,
) -> Res<CurrentSubscriptionResponse> {
    let subscription = require_subscription(pool, user_id).await?;
    let plan = evaluator.catalog().details(subscription.plan).clone();
    Ok(CurrentSubscriptionResponse {
        subscription: subscription.into(),
        plan,
    })
}

/// Counts the user's leads and pipelines.
pub async fn get_usage(pool: &PgPool, user_id: Uuid) -> Res<Usage> {
    let (leads, pipelines) = futures::try_join!(
        db::usage::count_leads(pool, user_id),
        db::usage::count_pipelines(pool, user_id)
    )?;
    Ok(Usage { leads, pipelines })
}

pub async fn get_usage_report(
    pool: &PgPool,
    evaluator: &EntitlementEvaluator,
    user_id: Uuid,
) -> Res<UsageReport> {
    let subscription = require_subscription(pool, user_id).await?;
    let usage = get_usage(pool, user_id).await?;
    let report = evaluator.usage_report(&subscription, usage);

    if report.should_prompt_upgrade {
        log::debug!(
            "Upgrade prompt for user {} on {}: leads {}/{}, pipelines {}/{}",
            user_id,
            report.plan,
            report.leads.used,
            report.leads.limit,
            report.pipelines.used,
            report.pipelines.limit
        );
    }

    Ok(report)
}

/// Whether the user may create one more `kind`.
///
/// Without a subscription the answer is `false` rather than an error.
pub async fn check_capacity(
    pool: &PgPool,
    evaluator: &EntitlementEvaluator,
    user_id: Uuid,
    kind: ResourceKind,
) -> Res<CapacityResponse> {
    let used = match kind {
        ResourceKind::Leads => db::usage::count_leads(pool, user_id).await?,
        ResourceKind::Pipelines => db::usage::count_pipelines(pool, user_id).await?,
        ResourceKind::Users => {
            return Err(AppError::BadRequest(
                "User seats are not counted by this service".to_string(),
            ));
        }
    };

    let subscription = load_subscription(pool, user_id).await?;
    let allowed = evaluator.has_capacity(subscription.as_ref(), kind, used);

    Ok(CapacityResponse {
        resource: kind,
        used,
        allowed,
    })
}
