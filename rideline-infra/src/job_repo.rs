use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rideline_domain::booking::Location;
use rideline_domain::job::Job;
use rideline_domain::repository::{BoxError, JobRepository, NewJob};
use sqlx::PgPool;
use uuid::Uuid;

pub struct PgJobRepository {
    pool: PgPool,
}

impl PgJobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct JobRow {
    booking_id: Uuid,
    pickuploc_lat: f64,
    pickuploc_lng: f64,
    dropoff_lat: f64,
    dropoff_lng: f64,
    price: i32,
    status: String,
    accepted_driver_id: Option<String>,
    created_at: DateTime<Utc>,
}

impl JobRow {
    fn into_job(self) -> Result<Job, BoxError> {
        Ok(Job {
            booking_id: self.booking_id,
            pickup: Location { lat: self.pickuploc_lat, lng: self.pickuploc_lng },
            dropoff: Location { lat: self.dropoff_lat, lng: self.dropoff_lng },
            price: self.price,
            status: self.status.parse()?,
            accepted_driver_id: self.accepted_driver_id,
            created_at: self.created_at,
        })
    }
}

#[async_trait]
impl JobRepository for PgJobRepository {
    async fn insert_open_job(&self, job: NewJob) -> Result<(), BoxError> {
        // Idempotent materialization: a redelivered booking.created hits
        // the conflict arm and changes nothing.
        sqlx::query(
            r#"
INSERT INTO jobs
  (booking_id, pickuploc_lat, pickuploc_lng, dropoff_lat, dropoff_lng, price, status)
VALUES
  ($1, $2, $3, $4, $5, $6, 'Open')
ON CONFLICT (booking_id) DO NOTHING;
"#,
        )
        .bind(job.booking_id)
        .bind(job.pickup.lat)
        .bind(job.pickup.lng)
        .bind(job.dropoff.lat)
        .bind(job.dropoff.lng)
        .bind(job.price)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_open(&self) -> Result<Vec<Job>, BoxError> {
        let rows = sqlx::query_as::<_, JobRow>(
            r#"
SELECT booking_id, pickuploc_lat, pickuploc_lng, dropoff_lat, dropoff_lng,
       price, status, accepted_driver_id, created_at
FROM jobs
WHERE status = 'Open'
ORDER BY created_at DESC;
"#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(JobRow::into_job).collect()
    }

    async fn try_accept(&self, booking_id: Uuid, driver_id: &str) -> Result<bool, BoxError> {
        // Single compare-and-swap: row-level atomicity of the conditional
        // update is the only synchronization between concurrent callers.
        let result = sqlx::query(
            r#"
UPDATE jobs
SET status = 'Taken', accepted_driver_id = $1
WHERE booking_id = $2 AND status = 'Open';
"#,
        )
        .bind(driver_id)
        .bind(booking_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
