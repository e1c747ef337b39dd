/**
 * Authentication Handler Types
 */

use serde::{Deserialize, Serialize};

use crate::shared::forum::User;

/// Sign up request
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SignupRequest {
    /// 3-30 chars, starts with a letter, alphanumeric + underscore
    pub login: String,
    pub email: String,
    /// At least 8 characters, hashed before storage
    pub password: String,
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LoginRequest {
    /// Login name or email address
    pub login: String,
    pub password: String,
}

/// Returned by signup and login
///
/// `user` is the full record minus the password hash, so the client learns
/// its own email, role and silenced state.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}
