mod app;
mod auth;
mod config;
mod drivers;
mod error;
mod orders;
mod state;
#[cfg(test)]
mod testing;

use crate::config::AppConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "ldms=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = AppConfig::from_env()?;
    if config.allow_plaintext_passwords {
        tracing::warn!("plaintext stored passwords are accepted (AUTH_ALLOW_PLAINTEXT_PASSWORDS)");
    }

    let (app_state, db) = AppState::init(config).await?;

    sqlx::migrate!("./migrations").run(&db).await?;
    auth::services::seed_admin(&app_state).await?;

    let config = app_state.config.clone();
    let app = app::build_app(app_state);
    app::serve(app, &config).await
}
