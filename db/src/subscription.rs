use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::subscription::SubscriptionRow;

pub async fn get_subscription_by_user_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<Option<SubscriptionRow>> {
    sqlx::query_as::<_, SubscriptionRow>("SELECT * FROM subscriptions WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

/// Creates the default free/active subscription for a user.
/// An existing subscription is returned unchanged.
pub async fn insert_default_subscription<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<SubscriptionRow> {
    // the no-op update makes RETURNING yield the existing row on conflict
    sqlx::query_as::<_, SubscriptionRow>(
        r#"
        INSERT INTO subscriptions (user_id, plan, status)
        VALUES ($1, 'free', 'active')
        ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
        RETURNING *
        "#,
    )
    .bind(user_id)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}
