use crate::models::DbExaminer;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn get_examiner_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbExaminer>> {
    tracing::debug!("Getting examiner by id: {}", id);

    let examiner = sqlx::query_as::<_, DbExaminer>(
        r#"
        SELECT id, display_name, created_at
        FROM examiners
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(examiner)
}
