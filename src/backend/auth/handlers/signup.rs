/**
 * Signup Handler
 *
 * POST /api/auth/signup
 *
 * 1. Validate login, email and password
 * 2. Hash password using bcrypt
 * 3. Create user (duplicate login or email -> 409)
 * 4. Return a session token and the user
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::{AuthResponse, SignupRequest};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::backend::store::UserStore;
use crate::shared::forum::User;

pub const MIN_PASSWORD_LEN: usize = 8;

/// Validate login format
///
/// Logins must be:
/// - 3-30 characters long
/// - Contain only alphanumeric characters and underscores
/// - Start with a letter
pub fn is_valid_login(login: &str) -> bool {
    if login.len() < 3 || login.len() > 30 {
        return false;
    }

    let mut chars = login.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Sign up handler
///
/// # Errors
///
/// * `400 Bad Request` - If login, email or password is invalid
/// * `409 Conflict` - If the login or email is taken
/// * `500 Internal Server Error` - If hashing or token generation fails
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    tracing::info!("Signup request for login: {}, email: {}", request.login, request.email);

    if !is_valid_login(&request.login) {
        tracing::warn!("Invalid login format: {}", request.login);
        return Err(BackendError::bad_request(
            "Login must be 3-30 chars, start with a letter, and contain only letters, numbers, and underscores",
        ));
    }

    if !request.email.contains('@') {
        tracing::warn!("Invalid email format: {}", request.email);
        return Err(BackendError::bad_request("Invalid email format"));
    }

    if request.password.len() < MIN_PASSWORD_LEN {
        tracing::warn!("Password too short");
        return Err(BackendError::bad_request("Password must be at least 8 characters"));
    }

    let password_hash = state.passwords.hash(&request.password).map_err(|e| {
        tracing::error!("Failed to hash password: {:?}", e);
        BackendError::internal("Server error")
    })?;

    let mut user = User::new(request.login.as_str(), request.email.as_str(), password_hash);
    state.store.create_user(&mut user).await.map_err(|e| {
        tracing::warn!("Failed to create user {}: {}", request.login, e);
        e
    })?;

    let token = state.sessions.create_token(user.id, &user.login).map_err(|e| {
        tracing::error!("Failed to create token: {:?}", e);
        BackendError::internal("Server error")
    })?;

    tracing::info!("User created successfully: {} ({})", user.login, user.id);

    Ok(Json(AuthResponse { token, user }))
}
