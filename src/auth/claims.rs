use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Coarse permission category attached to a user and embedded in tokens.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Warehouse,
    Driver,
}

impl Role {
    pub const ALL: &'static [Role] = &[Role::Admin, Role::Warehouse, Role::Driver];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Warehouse => "WAREHOUSE",
            Role::Driver => "DRIVER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Role::Admin),
            "WAREHOUSE" => Ok(Role::Warehouse),
            "DRIVER" => Ok(Role::Driver),
            other => anyhow::bail!("unknown role {other:?}"),
        }
    }
}

/// JWT payload used for authentication.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub sub: String,    // user email
    pub role: Role,
    pub iat: usize,     // issued at (unix timestamp)
    pub exp: usize,     // expires at (unix timestamp)
    pub iss: String,
    pub aud: String,
}
