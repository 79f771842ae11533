use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::drivers::repo_types::{Driver, NewDriver};

#[async_trait]
pub trait DriverStore: Send + Sync {
    async fn list(&self) -> anyhow::Result<Vec<Driver>>;
    async fn create(&self, driver: NewDriver) -> anyhow::Result<Driver>;
}

#[derive(Clone)]
pub struct PgDriverStore {
    db: PgPool,
}

impl PgDriverStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DriverStore for PgDriverStore {
    async fn list(&self) -> anyhow::Result<Vec<Driver>> {
        let rows = sqlx::query_as::<_, Driver>(
            r#"
            SELECT driver_id, driver_name, vehicle, location
            FROM drivers
            ORDER BY driver_id
            "#,
        )
        .fetch_all(&self.db)
        .await
        .context("list drivers")?;
        Ok(rows)
    }

    async fn create(&self, driver: NewDriver) -> anyhow::Result<Driver> {
        let row = sqlx::query_as::<_, Driver>(
            r#"
            INSERT INTO drivers (driver_name, vehicle, location)
            VALUES ($1, $2, $3)
            RETURNING driver_id, driver_name, vehicle, location
            "#,
        )
        .bind(&driver.driver_name)
        .bind(&driver.vehicle)
        .bind(&driver.location)
        .fetch_one(&self.db)
        .await
        .context("insert driver")?;
        Ok(row)
    }
}
