/**
 * Login Handler
 *
 * POST /api/auth/login
 *
 * The `login` field may hold either the login name or the email address.
 * Unknown users and wrong passwords both return 401.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::backend::store::{StoreError, UserStore};
use crate::shared::forum::unix_now;

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - If user is not found or password is incorrect
/// * `500 Internal Server Error` - If database query or token generation fails
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    tracing::info!("Login request for: {}", request.login);

    let user = if request.login.contains('@') {
        state.store.get_user_by_email(&request.login).await
    } else {
        state.store.get_user_by_login(&request.login).await
    };

    let mut user = match user {
        Ok(user) => user,
        Err(StoreError::NotFound) => {
            tracing::warn!("User not found: {}", request.login);
            return Err(BackendError::unauthorized("invalid credentials"));
        }
        Err(e) => return Err(e.into()),
    };

    let valid = state
        .passwords
        .verify(&request.password, &user.password_hash)
        .map_err(|e| {
            tracing::error!("Password verification error: {:?}", e);
            BackendError::internal("Server error")
        })?;

    if !valid {
        tracing::warn!("Invalid password for user: {}", request.login);
        return Err(BackendError::unauthorized("invalid credentials"));
    }

    let now = unix_now();
    state.store.touch_last_login(user.id, now).await?;
    user.last_login = now;

    let token = state.sessions.create_token(user.id, &user.login).map_err(|e| {
        tracing::error!("Failed to create token: {:?}", e);
        BackendError::internal("Server error")
    })?;

    tracing::info!("User logged in successfully: {} ({})", user.login, user.id);

    Ok(Json(AuthResponse { token, user }))
}
