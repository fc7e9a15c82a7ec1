use sqlx::PgPool;
use tracing::info;

/// Creates the booking-side schema. The status CHECK mirrors the domain
/// enum so a bad write is rejected by the store itself.
pub async fn booking_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
CREATE TABLE IF NOT EXISTS bookings (
  booking_id UUID PRIMARY KEY,
  pickuploc_lat DOUBLE PRECISION NOT NULL,
  pickuploc_lng DOUBLE PRECISION NOT NULL,
  dropoff_lat DOUBLE PRECISION NOT NULL,
  dropoff_lng DOUBLE PRECISION NOT NULL,
  price INTEGER NOT NULL,
  ride_status TEXT NOT NULL CHECK (ride_status IN ('Requested','Accepted')),
  driver_id TEXT NULL,
  created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);"#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_bookings_created_at ON bookings (created_at DESC);")
        .execute(pool)
        .await?;

    info!("booking schema ready");
    Ok(())
}

/// Creates the driver-side schema: the roster and the jobs projection.
pub async fn driver_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
CREATE TABLE IF NOT EXISTS drivers (
  driver_id TEXT PRIMARY KEY,
  name TEXT NOT NULL,
  is_available BOOLEAN NOT NULL
);"#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
CREATE TABLE IF NOT EXISTS jobs (
  booking_id UUID PRIMARY KEY,
  pickuploc_lat DOUBLE PRECISION NOT NULL,
  pickuploc_lng DOUBLE PRECISION NOT NULL,
  dropoff_lat DOUBLE PRECISION NOT NULL,
  dropoff_lng DOUBLE PRECISION NOT NULL,
  price INTEGER NOT NULL,
  status TEXT NOT NULL CHECK (status IN ('Open','Taken')) DEFAULT 'Open',
  accepted_driver_id TEXT NULL,
  created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);"#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_jobs_status ON jobs (status);")
        .execute(pool)
        .await?;

    info!("driver schema ready");
    Ok(())
}

/// Upserts the demo roster so accepts work out of the box.
pub async fn seed_drivers(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
INSERT INTO drivers (driver_id, name, is_available)
VALUES ('d-1', 'Asha', TRUE), ('d-2', 'Ravi', TRUE)
ON CONFLICT (driver_id) DO UPDATE
SET name = EXCLUDED.name, is_available = EXCLUDED.is_available;"#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
