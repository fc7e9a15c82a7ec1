use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rideline_domain::booking::{Booking, Location};
use rideline_domain::repository::{BookingRepository, BoxError, CreateBookingParams};
use sqlx::PgPool;
use uuid::Uuid;

pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    booking_id: Uuid,
    pickuploc_lat: f64,
    pickuploc_lng: f64,
    dropoff_lat: f64,
    dropoff_lng: f64,
    price: i32,
    ride_status: String,
    driver_id: Option<String>,
    created_at: DateTime<Utc>,
}

impl BookingRow {
    fn into_booking(self) -> Result<Booking, BoxError> {
        Ok(Booking {
            booking_id: self.booking_id,
            pickup: Location { lat: self.pickuploc_lat, lng: self.pickuploc_lng },
            dropoff: Location { lat: self.dropoff_lat, lng: self.dropoff_lng },
            price: self.price,
            ride_status: self.ride_status.parse()?,
            driver_id: self.driver_id,
            created_at: self.created_at,
        })
    }
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn create(&self, params: CreateBookingParams) -> Result<Booking, BoxError> {
        let row = sqlx::query_as::<_, BookingRow>(
            r#"
INSERT INTO bookings
  (booking_id, pickuploc_lat, pickuploc_lng, dropoff_lat, dropoff_lng, price, ride_status, driver_id)
VALUES
  ($1, $2, $3, $4, $5, $6, $7, $8)
RETURNING booking_id, pickuploc_lat, pickuploc_lng, dropoff_lat, dropoff_lng,
          price, ride_status, driver_id, created_at;
"#,
        )
        .bind(params.booking_id)
        .bind(params.pickup.lat)
        .bind(params.pickup.lng)
        .bind(params.dropoff.lat)
        .bind(params.dropoff.lng)
        .bind(params.price)
        .bind(params.ride_status.as_str())
        .bind(params.driver_id)
        .fetch_one(&self.pool)
        .await?;

        row.into_booking()
    }

    async fn list_all(&self) -> Result<Vec<Booking>, BoxError> {
        let rows = sqlx::query_as::<_, BookingRow>(
            r#"
SELECT booking_id, pickuploc_lat, pickuploc_lng, dropoff_lat, dropoff_lng,
       price, ride_status, driver_id, created_at
FROM bookings
ORDER BY created_at DESC;
"#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(BookingRow::into_booking).collect()
    }

    async fn mark_accepted(&self, booking_id: Uuid, driver_id: &str) -> Result<bool, BoxError> {
        // Conditional update: a booking that is already Accepted (or not
        // yet visible) is left untouched and reported as zero rows.
        let result = sqlx::query(
            r#"
UPDATE bookings
SET ride_status = 'Accepted', driver_id = $1
WHERE booking_id = $2 AND ride_status = 'Requested';
"#,
        )
        .bind(driver_id)
        .bind(booking_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
