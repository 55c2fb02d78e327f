use crate::models::DbDutyReleaseRequest;
use chrono::{DateTime, NaiveDate, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

#[allow(clippy::too_many_arguments)]
pub async fn create_release_request(
    pool: &Pool<Postgres>,
    examiner_id: Uuid,
    examiner_name: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
    reason: &str,
    replacement_id: Option<Uuid>,
    replacement_name: Option<&str>,
) -> Result<DbDutyReleaseRequest> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating duty release request: id={}, examiner_id={}, range={}..{}",
        id,
        examiner_id,
        start_date,
        end_date
    );

    let request = sqlx::query_as::<_, DbDutyReleaseRequest>(
        r#"
        INSERT INTO duty_release_requests
            (id, examiner_id, examiner_name, start_date, end_date, reason,
             replacement_id, replacement_name, status, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'pending', $9, $9)
        RETURNING id, examiner_id, examiner_name, start_date, end_date, reason,
                  replacement_id, replacement_name, status, approved_by, approval_time,
                  created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(examiner_id)
    .bind(examiner_name)
    .bind(start_date)
    .bind(end_date)
    .bind(reason)
    .bind(replacement_id)
    .bind(replacement_name)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(request)
}

/// Lists requests matching the optional filters, newest first, with a
/// total count taken over the same filters (pagination happens in SQL).
pub async fn list_release_requests(
    pool: &Pool<Postgres>,
    examiner_id: Option<Uuid>,
    status: Option<&str>,
    page: u32,
    limit: u32,
) -> Result<(Vec<DbDutyReleaseRequest>, u64)> {
    let offset = i64::from(page.max(1) - 1) * i64::from(limit);

    let items = sqlx::query_as::<_, DbDutyReleaseRequest>(
        r#"
        SELECT id, examiner_id, examiner_name, start_date, end_date, reason,
               replacement_id, replacement_name, status, approved_by, approval_time,
               created_at, updated_at
        FROM duty_release_requests
        WHERE ($1::uuid IS NULL OR examiner_id = $1)
          AND ($2::text IS NULL OR status = $2)
        ORDER BY created_at DESC
        LIMIT $3 OFFSET $4
        "#,
    )
    .bind(examiner_id)
    .bind(status)
    .bind(i64::from(limit))
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let total: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM duty_release_requests
        WHERE ($1::uuid IS NULL OR examiner_id = $1)
          AND ($2::text IS NULL OR status = $2)
        "#,
    )
    .bind(examiner_id)
    .bind(status)
    .fetch_one(pool)
    .await?;

    Ok((items, total as u64))
}

pub async fn get_release_request_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbDutyReleaseRequest>> {
    let request = sqlx::query_as::<_, DbDutyReleaseRequest>(
        r#"
        SELECT id, examiner_id, examiner_name, start_date, end_date, reason,
               replacement_id, replacement_name, status, approved_by, approval_time,
               created_at, updated_at
        FROM duty_release_requests
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(request)
}

pub async fn update_release_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    status: &str,
    approved_by: Option<Uuid>,
    approval_time: Option<DateTime<Utc>>,
) -> Result<Option<DbDutyReleaseRequest>> {
    let request = sqlx::query_as::<_, DbDutyReleaseRequest>(
        r#"
        UPDATE duty_release_requests
        SET status = $2, approved_by = $3, approval_time = $4, updated_at = NOW()
        WHERE id = $1
        RETURNING id, examiner_id, examiner_name, start_date, end_date, reason,
                  replacement_id, replacement_name, status, approved_by, approval_time,
                  created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(status)
    .bind(approved_by)
    .bind(approval_time)
    .fetch_optional(pool)
    .await?;

    Ok(request)
}

/// Deletes a request only while it is still pending. Returns false when
/// the row is missing or already decided.
pub async fn delete_pending_release_request(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let deleted = sqlx::query(
        r#"
        DELETE FROM duty_release_requests
        WHERE id = $1 AND status = 'pending'
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(deleted.rows_affected() > 0)
}
