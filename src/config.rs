use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

/// Credentials for the admin account created at startup when missing.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedAdmin {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt: JwtConfig,
    /// Accept stored credentials that are not Argon2 hashes.
    pub allow_plaintext_passwords: bool,
    pub seed_admin: Option<SeedAdmin>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = std::env::var("APP_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(8080);
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "ldms".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "ldms-clients".into()),
            ttl_minutes: parse_ttl_minutes(std::env::var("JWT_TTL_MINUTES").ok().as_deref()),
        };
        let allow_plaintext_passwords = std::env::var("AUTH_ALLOW_PLAINTEXT_PASSWORDS")
            .map(|v| parse_flag(&v))
            .unwrap_or(true);
        let seed_admin = match (
            std::env::var("SEED_ADMIN_EMAIL"),
            std::env::var("SEED_ADMIN_PASSWORD"),
        ) {
            (Ok(email), Ok(password)) => Some(SeedAdmin { email, password }),
            _ => None,
        };
        Ok(Self {
            database_url,
            host,
            port,
            jwt,
            allow_plaintext_passwords,
            seed_admin,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Token lifetime in minutes, clamped to at most 30 days.
const MAX_TTL_MINUTES: i64 = 30 * 24 * 60;

fn parse_ttl_minutes(v: Option<&str>) -> i64 {
    v.and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or(60)
        .clamp(1, MAX_TTL_MINUTES)
}

fn parse_flag(v: &str) -> bool {
    matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
