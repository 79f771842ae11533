use std::sync::Arc;

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::auth::{
    policy::Policy,
    repo::{PgUserStore, UserStore},
};
use crate::config::AppConfig;
use crate::drivers::repo::{DriverStore, PgDriverStore};
use crate::orders::repo::{OrderStore, PgOrderStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub policy: Arc<Policy>,
    pub users: Arc<dyn UserStore>,
    pub drivers: Arc<dyn DriverStore>,
    pub orders: Arc<dyn OrderStore>,
}

impl AppState {
    /// Connect to Postgres and wire the stores. Returns the pool too so the
    /// caller can run migrations on it.
    pub async fn init(config: AppConfig) -> anyhow::Result<(Self, PgPool)> {
        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        let state = Self::from_parts(
            Arc::new(config),
            Arc::new(PgUserStore::new(db.clone())),
            Arc::new(PgDriverStore::new(db.clone())),
            Arc::new(PgOrderStore::new(db.clone())),
        );
        Ok((state, db))
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        users: Arc<dyn UserStore>,
        drivers: Arc<dyn DriverStore>,
        orders: Arc<dyn OrderStore>,
    ) -> Self {
        Self {
            config,
            policy: Arc::new(Policy::standard()),
            users,
            drivers,
            orders,
        }
    }

    /// State backed by in-memory stores and a fixed test configuration.
    #[cfg(test)]
    pub fn fake() -> Self {
        crate::testing::TestApp::new().state
    }
}
