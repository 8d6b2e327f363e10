use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

pub async fn count_leads<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<u64> {
    count(executor, "SELECT COUNT(*) FROM leads WHERE user_id = $1", user_id).await
}

pub async fn count_pipelines<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<u64> {
    count(executor, "SELECT COUNT(*) FROM pipelines WHERE user_id = $1", user_id).await
}

async fn count<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    query: &'static str,
    user_id: Uuid,
) -> Res<u64> {
    let count: i64 = sqlx::query_scalar(query)
        .bind(user_id)
        .fetch_one(executor)
        .await
        .map_err(AppError::from)?;

    u64::try_from(count).map_err(|_| AppError::Internal(format!("Negative row count: {}", count)))
}
