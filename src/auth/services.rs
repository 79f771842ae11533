use axum::extract::FromRef;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};

use crate::{
    auth::{
        claims::Role,
        dto::LoginResponse,
        jwt::JwtKeys,
        password::{hash_password, verify_password},
        repo::EmailTaken,
        repo_types::{NewUser, User},
    },
    error::AppError,
    state::AppState,
};

const MIN_PASSWORD_LEN: usize = 8;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check credentials and mint a bearer token.
pub async fn login(state: &AppState, email: &str, password: &str) -> Result<LoginResponse, AppError> {
    let email = normalize_email(email);

    let Some(user) = state.users.find_by_email(&email).await? else {
        warn!(email = %email, "login unknown email");
        return Err(AppError::Unauthorized("User not found".into()));
    };

    if !verify_password(password, &user.password, state.config.allow_plaintext_passwords) {
        warn!(email = %email, user_id = user.id, "login invalid password");
        return Err(AppError::Unauthorized("Invalid password".into()));
    }

    let token = JwtKeys::from_ref(state).sign(&user.email, user.role)?;
    info!(user_id = user.id, email = %user.email, role = %user.role, "user logged in");
    Ok(LoginResponse::bearer(token))
}

/// Create a user with an Argon2-hashed password.
pub async fn register(
    state: &AppState,
    email: &str,
    password: &str,
    role: Role,
) -> Result<User, AppError> {
    let email = normalize_email(email);

    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(AppError::BadRequest("Invalid email".into()));
    }
    if password.len() < MIN_PASSWORD_LEN {
        warn!("password too short");
        return Err(AppError::BadRequest("Password too short".into()));
    }

    // Ensure email is not taken
    if state.users.find_by_email(&email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(AppError::Conflict("Email already registered".into()));
    }

    let user = state
        .users
        .create(NewUser {
            email: email.clone(),
            password: hash_password(password)?,
            role,
        })
        .await
        .map_err(|e| {
            if e.is::<EmailTaken>() {
                warn!(email = %email, "email registered concurrently");
                AppError::Conflict("Email already registered".into())
            } else {
                AppError::Storage(e)
            }
        })?;

    info!(user_id = user.id, email = %user.email, role = %user.role, "user registered");
    Ok(user)
}

/// Create the configured admin account if its email is free.
pub async fn seed_admin(state: &AppState) -> anyhow::Result<()> {
    if let Some(seed) = state.config.seed_admin.clone() {
        let email = normalize_email(&seed.email);
        if state.users.find_by_email(&email).await?.is_none() {
            let user = state
                .users
                .create(NewUser {
                    email,
                    password: hash_password(&seed.password)?,
                    role: Role::Admin,
                })
                .await?;
            info!(user_id = user.id, email = %user.email, "seed admin created");
        }
    }

    let admins = state.users.count_by_role(Role::Admin).await?;
    if admins == 0 {
        warn!("no ADMIN users exist; set SEED_ADMIN_EMAIL and SEED_ADMIN_PASSWORD to create one");
    }
    Ok(())
}
