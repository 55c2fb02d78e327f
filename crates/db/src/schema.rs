use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create examiners table (identity lookup; rows are managed by the
    // user-profile system, this engine only reads them)
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS examiners (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            display_name VARCHAR(255) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create availability_records table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS availability_records (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            examiner_id UUID NOT NULL UNIQUE REFERENCES examiners(id),
            examiner_name VARCHAR(255) NOT NULL,
            modified_by UUID NULL,
            revision BIGINT NOT NULL DEFAULT 0,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create availability_slots table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS availability_slots (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            record_id UUID NOT NULL REFERENCES availability_records(id),
            slot_date DATE NOT NULL,
            start_time VARCHAR(5) NOT NULL,
            end_time VARCHAR(5) NOT NULL,
            status VARCHAR(16) NOT NULL DEFAULT 'available',
            notes TEXT NULL,
            release_override JSONB NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_time_range CHECK (end_time > start_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create duty_release_requests table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS duty_release_requests (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            examiner_id UUID NOT NULL REFERENCES examiners(id),
            examiner_name VARCHAR(255) NOT NULL,
            start_date DATE NOT NULL,
            end_date DATE NOT NULL,
            reason TEXT NOT NULL,
            replacement_id UUID NULL REFERENCES examiners(id),
            replacement_name VARCHAR(255) NULL,
            status VARCHAR(16) NOT NULL DEFAULT 'pending',
            approved_by UUID NULL,
            approval_time TIMESTAMP WITH TIME ZONE NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_date_range CHECK (end_date >= start_date)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create bookings table (owned by the booking subsystem; this engine
    // only reads it for conflict checks)
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bookings (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            examiner_id UUID NOT NULL REFERENCES examiners(id),
            booking_date DATE NOT NULL,
            start_time VARCHAR(5) NOT NULL,
            duration_minutes INTEGER NOT NULL,
            title VARCHAR(255) NOT NULL DEFAULT '',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_availability_slots_record_id ON availability_slots(record_id);
        CREATE INDEX IF NOT EXISTS idx_availability_slots_slot_date ON availability_slots(slot_date);
        CREATE INDEX IF NOT EXISTS idx_duty_release_requests_examiner_id ON duty_release_requests(examiner_id);
        CREATE INDEX IF NOT EXISTS idx_duty_release_requests_status ON duty_release_requests(status);
        CREATE INDEX IF NOT EXISTS idx_bookings_examiner_date ON bookings(examiner_id, booking_date);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
