use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::auth::{
    claims::Role,
    repo_types::{NewUser, User, UserRow},
};

/// Returned by `UserStore::create` when the email is already registered.
#[derive(Debug, thiserror::Error)]
#[error("email already registered")]
pub struct EmailTaken;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn create(&self, user: NewUser) -> anyhow::Result<User>;
    async fn count_by_role(&self, role: Role) -> anyhow::Result<i64>;
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    /// Find a user by email, ignoring case.
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password, role, created_at
            FROM users
            WHERE lower(email) = lower($1)
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .context("find user by email")?;
        row.map(User::try_from).transpose()
    }

    /// Create a new user. A unique violation on the email maps to `EmailTaken`.
    async fn create(&self, user: NewUser) -> anyhow::Result<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (email, password, role)
            VALUES ($1, $2, $3)
            RETURNING id, email, password, role, created_at
            "#,
        )
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.role.as_str())
        .fetch_one(&self.db)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => anyhow::Error::new(EmailTaken),
            e => anyhow::Error::new(e).context("insert user"),
        })?;
        User::try_from(row)
    }

    async fn count_by_role(&self, role: Role) -> anyhow::Result<i64> {
        let (count,) = sqlx::query_as::<_, (i64,)>(r#"SELECT COUNT(*) FROM users WHERE role = $1"#)
            .bind(role.as_str())
            .fetch_one(&self.db)
            .await
            .context("count users by role")?;
        Ok(count)
    }
}
