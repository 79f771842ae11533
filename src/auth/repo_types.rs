use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

use crate::auth::claims::Role;

/// Raw `users` row; `role` is kept as text in the database.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub password: String,
    pub role: String,
    pub created_at: OffsetDateTime,
}

/// User record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String, // Argon2 PHC string, or a legacy plaintext value
    pub role: Role,
    pub created_at: OffsetDateTime,
}

impl TryFrom<UserRow> for User {
    type Error = anyhow::Error;

    fn try_from(r: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            role: r.role.parse()?,
            id: r.id,
            email: r.email,
            password: r.password,
            created_at: r.created_at,
        })
    }
}

/// Fields needed to insert a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub role: Role,
}
