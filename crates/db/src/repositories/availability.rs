use crate::models::{DbAvailabilityRecord, DbTimeSlot};
use chrono::Utc;
use eyre::Result;
use examsync_core::models::availability::TimeSlot;
use sqlx::types::Json;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn get_record_by_examiner_id(
    pool: &Pool<Postgres>,
    examiner_id: Uuid,
) -> Result<Option<DbAvailabilityRecord>> {
    let record = sqlx::query_as::<_, DbAvailabilityRecord>(
        r#"
        SELECT id, examiner_id, examiner_name, modified_by, revision, created_at, updated_at
        FROM availability_records
        WHERE examiner_id = $1
        "#,
    )
    .bind(examiner_id)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

pub async fn create_record(
    pool: &Pool<Postgres>,
    examiner_id: Uuid,
    examiner_name: &str,
    actor_id: Uuid,
) -> Result<DbAvailabilityRecord> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating availability record: id={}, examiner_id={}",
        id,
        examiner_id
    );

    let record = sqlx::query_as::<_, DbAvailabilityRecord>(
        r#"
        INSERT INTO availability_records
            (id, examiner_id, examiner_name, modified_by, revision, created_at, updated_at)
        VALUES ($1, $2, $3, $4, 0, $5, $5)
        RETURNING id, examiner_id, examiner_name, modified_by, revision, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(examiner_id)
    .bind(examiner_name)
    .bind(actor_id)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(record)
}

/// Appends a validated slot batch to a record inside one transaction.
///
/// The record's revision is bumped with a compare against
/// `expected_revision`; if another writer got there first, nothing is
/// inserted and `Ok(false)` is returned.
pub async fn append_slots(
    pool: &Pool<Postgres>,
    record_id: Uuid,
    expected_revision: i64,
    slots: &[TimeSlot],
    actor_id: Uuid,
) -> Result<bool> {
    let mut tx = pool.begin().await?;

    let bumped = sqlx::query(
        r#"
        UPDATE availability_records
        SET revision = revision + 1, modified_by = $2, updated_at = NOW()
        WHERE id = $1 AND revision = $3
        "#,
    )
    .bind(record_id)
    .bind(actor_id)
    .bind(expected_revision)
    .execute(&mut *tx)
    .await?;

    if bumped.rows_affected() == 0 {
        tracing::debug!("Revision check failed for record {}", record_id);
        return Ok(false);
    }

    for slot in slots {
        sqlx::query(
            r#"
            INSERT INTO availability_slots
                (id, record_id, slot_date, start_time, end_time, status, notes, release_override, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW())
            "#,
        )
        .bind(slot.id)
        .bind(record_id)
        .bind(slot.date)
        .bind(&slot.start_time)
        .bind(&slot.end_time)
        .bind(slot.status.as_str())
        .bind(&slot.notes)
        .bind(slot.release_override.clone().map(Json))
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(true)
}

pub async fn get_slots_by_record_id(
    pool: &Pool<Postgres>,
    record_id: Uuid,
) -> Result<Vec<DbTimeSlot>> {
    let slots = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        SELECT id, record_id, slot_date, start_time, end_time, status, notes, release_override, created_at
        FROM availability_slots
        WHERE record_id = $1
        ORDER BY created_at ASC
        "#,
    )
    .bind(record_id)
    .fetch_all(pool)
    .await?;

    Ok(slots)
}

/// Resolves a slot by id together with its owning record.
pub async fn find_slot_with_record(
    pool: &Pool<Postgres>,
    slot_id: Uuid,
) -> Result<Option<(DbTimeSlot, DbAvailabilityRecord)>> {
    let slot = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        SELECT id, record_id, slot_date, start_time, end_time, status, notes, release_override, created_at
        FROM availability_slots
        WHERE id = $1
        "#,
    )
    .bind(slot_id)
    .fetch_optional(pool)
    .await?;

    let Some(slot) = slot else {
        return Ok(None);
    };

    let record = sqlx::query_as::<_, DbAvailabilityRecord>(
        r#"
        SELECT id, examiner_id, examiner_name, modified_by, revision, created_at, updated_at
        FROM availability_records
        WHERE id = $1
        "#,
    )
    .bind(slot.record_id)
    .fetch_one(pool)
    .await?;

    Ok(Some((slot, record)))
}

/// Writes the merged field values for one slot, guarded by the owning
/// record's revision. `Ok(None)` means a concurrent writer won the race.
#[allow(clippy::too_many_arguments)]
pub async fn update_slot(
    pool: &Pool<Postgres>,
    slot_id: Uuid,
    record_id: Uuid,
    expected_revision: i64,
    start_time: &str,
    end_time: &str,
    status: &str,
    notes: Option<&str>,
    actor_id: Uuid,
) -> Result<Option<DbTimeSlot>> {
    let mut tx = pool.begin().await?;

    let bumped = sqlx::query(
        r#"
        UPDATE availability_records
        SET revision = revision + 1, modified_by = $2, updated_at = NOW()
        WHERE id = $1 AND revision = $3
        "#,
    )
    .bind(record_id)
    .bind(actor_id)
    .bind(expected_revision)
    .execute(&mut *tx)
    .await?;

    if bumped.rows_affected() == 0 {
        return Ok(None);
    }

    let slot = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        UPDATE availability_slots
        SET start_time = $2, end_time = $3, status = $4, notes = $5
        WHERE id = $1
        RETURNING id, record_id, slot_date, start_time, end_time, status, notes, release_override, created_at
        "#,
    )
    .bind(slot_id)
    .bind(start_time)
    .bind(end_time)
    .bind(status)
    .bind(notes)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(slot) = slot else {
        return Ok(None);
    };

    tx.commit().await?;
    Ok(Some(slot))
}

/// Removes a slot from its record, guarded by the record's revision.
pub async fn delete_slot(
    pool: &Pool<Postgres>,
    slot_id: Uuid,
    record_id: Uuid,
    expected_revision: i64,
    actor_id: Uuid,
) -> Result<bool> {
    let mut tx = pool.begin().await?;

    let bumped = sqlx::query(
        r#"
        UPDATE availability_records
        SET revision = revision + 1, modified_by = $2, updated_at = NOW()
        WHERE id = $1 AND revision = $3
        "#,
    )
    .bind(record_id)
    .bind(actor_id)
    .bind(expected_revision)
    .execute(&mut *tx)
    .await?;

    if bumped.rows_affected() == 0 {
        return Ok(false);
    }

    let deleted = sqlx::query(
        r#"
        DELETE FROM availability_slots
        WHERE id = $1
        "#,
    )
    .bind(slot_id)
    .execute(&mut *tx)
    .await?;

    if deleted.rows_affected() == 0 {
        return Ok(false);
    }

    tx.commit().await?;
    Ok(true)
}

pub async fn list_records(
    pool: &Pool<Postgres>,
    examiner_id: Option<Uuid>,
) -> Result<Vec<DbAvailabilityRecord>> {
    let records = sqlx::query_as::<_, DbAvailabilityRecord>(
        r#"
        SELECT id, examiner_id, examiner_name, modified_by, revision, created_at, updated_at
        FROM availability_records
        WHERE ($1::uuid IS NULL OR examiner_id = $1)
        ORDER BY examiner_name ASC
        "#,
    )
    .bind(examiner_id)
    .fetch_all(pool)
    .await?;

    Ok(records)
}
