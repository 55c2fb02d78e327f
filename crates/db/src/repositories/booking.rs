use crate::models::DbBooking;
use chrono::NaiveDate;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Bookings are owned by the booking subsystem; this repository only reads
/// them to answer conflict queries.
pub async fn get_bookings_for_date(
    pool: &Pool<Postgres>,
    examiner_id: Uuid,
    date: NaiveDate,
) -> Result<Vec<DbBooking>> {
    let bookings = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, examiner_id, booking_date, start_time, duration_minutes, title, created_at
        FROM bookings
        WHERE examiner_id = $1 AND booking_date = $2
        ORDER BY start_time ASC
        "#,
    )
    .bind(examiner_id)
    .bind(date)
    .fetch_all(pool)
    .await?;

    Ok(bookings)
}
