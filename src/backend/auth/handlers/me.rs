/**
 * Get Current User Handler
 *
 * GET /api/auth/me, requires a session.
 */

use axum::response::Json;

use crate::backend::middleware::SessionUser;
use crate::shared::forum::User;

/// Return the session user, password hash omitted
pub async fn get_me(SessionUser(user): SessionUser) -> Json<User> {
    Json(user)
}
