use async_trait::async_trait;
use rideline_domain::driver::Driver;
use rideline_domain::repository::{BoxError, DriverRepository};
use sqlx::PgPool;

pub struct PgDriverRepository {
    pool: PgPool,
}

impl PgDriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct DriverRow {
    driver_id: String,
    name: String,
    is_available: bool,
}

impl From<DriverRow> for Driver {
    fn from(row: DriverRow) -> Self {
        Driver {
            driver_id: row.driver_id,
            name: row.name,
            is_available: row.is_available,
        }
    }
}

#[async_trait]
impl DriverRepository for PgDriverRepository {
    async fn list_all(&self) -> Result<Vec<Driver>, BoxError> {
        let rows = sqlx::query_as::<_, DriverRow>(
            "SELECT driver_id, name, is_available FROM drivers ORDER BY driver_id;",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Driver::from).collect())
    }

    async fn get(&self, driver_id: &str) -> Result<Option<Driver>, BoxError> {
        let row = sqlx::query_as::<_, DriverRow>(
            "SELECT driver_id, name, is_available FROM drivers WHERE driver_id = $1;",
        )
        .bind(driver_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Driver::from))
    }
}
