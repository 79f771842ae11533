use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, instrument};

use crate::{
    auth::{
        dto::{LoginRequest, LoginResponse, PublicUser, RegisterRequest},
        extractors::AuthUser,
        services,
    },
    error::AppError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/auth/me", get(get_me))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    services::login(&state, &payload.email, &payload.password)
        .await
        .map(Json)
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<PublicUser>), AppError> {
    let user = services::register(&state, &payload.email, &payload.password, payload.role).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[instrument(skip(state, claims))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<PublicUser>, AppError> {
    let user = state.users.find_by_email(&claims.sub).await?.ok_or_else(|| {
        error!(email = %claims.sub, "token subject has no user");
        AppError::Unauthorized("User not found".into())
    })?;
    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::auth::claims::Role;
    use crate::testing::TestApp;

    #[tokio::test]
    async fn login_success_returns_token_and_type() {
        let app = TestApp::new();
        app.add_user("admin@test.com", "password123", Role::Admin).await;

        let (status, body) = app
            .request(
                Method::POST,
                "/api/auth/login",
                None,
                Some(json!({"email": "admin@test.com", "password": "password123"})),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        let body: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert!(!body["token"].as_str().unwrap().is_empty());
        assert_eq!(body["tokenType"], "Bearer");
    }

    #[tokio::test]
    async fn login_unknown_user() {
        let app = TestApp::new();
        let (status, body) = app
            .request(
                Method::POST,
                "/api/auth/login",
                None,
                Some(json!({"email": "nonexistent@test.com", "password": "password123"})),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, "User not found");
    }

    #[tokio::test]
    async fn login_invalid_password() {
        let app = TestApp::new();
        app.add_user("admin@test.com", "password123", Role::Admin).await;
        let (status, body) = app
            .request(
                Method::POST,
                "/api/auth/login",
                None,
                Some(json!({"email": "admin@test.com", "password": "wrongpassword"})),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, "Invalid password");
    }

    #[tokio::test]
    async fn every_role_can_log_in() {
        let app = TestApp::new();
        for (email, role) in [
            ("admin@test.com", Role::Admin),
            ("warehouse@test.com", Role::Warehouse),
            ("driver@test.com", Role::Driver),
        ] {
            app.add_user(email, "password", role).await;
            let (status, _) = app
                .request(
                    Method::POST,
                    "/api/auth/login",
                    None,
                    Some(json!({"email": email, "password": "password"})),
                )
                .await;
            assert_eq!(status, StatusCode::OK, "{email}");
        }
    }

    #[tokio::test]
    async fn register_requires_admin() {
        let app = TestApp::new();
        let body = json!({"email": "new@ldms.com", "password": "password123", "role": "DRIVER"});

        let warehouse = app.token_for("w@ldms.com", Role::Warehouse);
        let (status, _) = app
            .request(Method::POST, "/api/auth/register", Some(warehouse.as_str()), Some(body.clone()))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let admin = app.token_for("a@ldms.com", Role::Admin);
        let (status, created) = app
            .request(Method::POST, "/api/auth/register", Some(admin.as_str()), Some(body.clone()))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        let created: serde_json::Value = serde_json::from_str(&created).unwrap();
        assert_eq!(created["email"], "new@ldms.com");
        assert_eq!(created["role"], "DRIVER");
        assert!(created.get("password").is_none());

        let (status, _) = app
            .request(Method::POST, "/api/auth/register", Some(admin.as_str()), Some(body))
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn me_returns_current_user() {
        let app = TestApp::new();
        app.add_user("driver@test.com", "password", Role::Driver).await;
        let token = app.token_for("driver@test.com", Role::Driver);

        let (status, body) = app.request(Method::GET, "/api/auth/me", Some(token.as_str()), None).await;
        assert_eq!(status, StatusCode::OK);
        let body: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["email"], "driver@test.com");
        assert_eq!(body["role"], "DRIVER");

        let (status, _) = app.request(Method::GET, "/api/auth/me", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
