/**
 * API Routes
 *
 * ## Authentication
 * - `POST /api/auth/signup` - User registration
 * - `POST /api/auth/login` - User login
 * - `GET /api/auth/me` - Get current user info
 *
 * ## Forum
 * Discussions, posts, likes, tags, users, notifications, direct messages,
 * reports, site settings and the admin dashboard. See `backend::forum` for
 * each handler's rules.
 */

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::backend::auth::{get_me, login, signup};
use crate::backend::forum::{
    admin, chats, discussions, likes, meta, notifications, posts, reports, tags, users,
};
use crate::backend::server::state::AppState;

/// Add the authentication routes
pub fn configure_auth_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(get_me))
}

/// Add the forum routes
///
/// # Arguments
///
/// * `router` - The router to add routes to
///
/// # Returns
///
/// Router with forum routes configured
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    configure_auth_routes(router)
        // Discussions
        .route(
            "/api/discussions",
            get(discussions::get_discussion_list).post(discussions::create_discussion),
        )
        .route(
            "/api/discussions/{id}",
            get(discussions::get_discussion)
                .put(discussions::update_discussion)
                .delete(discussions::delete_discussion),
        )
        .route("/api/discussions/{id}/posts", get(posts::get_post_list))
        // Posts
        .route("/api/posts", post(posts::create_post))
        .route(
            "/api/posts/{id}",
            get(posts::get_post).put(posts::update_post).delete(posts::delete_post),
        )
        .route(
            "/api/posts/{id}/likes",
            get(likes::get_like_list).post(likes::create_like).delete(likes::delete_like),
        )
        // Tags
        .route("/api/tags", get(tags::get_tag_list).post(tags::create_tag))
        .route("/api/tags/{tag}", put(tags::update_tag).delete(tags::delete_tag))
        .route("/api/tags/{tag}/discussions", get(tags::get_tag_discussions))
        // Users
        .route(
            "/api/users/{id}",
            get(users::get_user).put(users::update_user).delete(users::delete_user),
        )
        .route("/api/users/{id}/posts", get(posts::get_user_posts))
        .route("/api/users/{id}/discussions", get(discussions::get_user_discussions))
        .route("/api/users/{id}/likes", get(likes::get_user_likes))
        // Notifications
        .route("/api/notifications", get(notifications::get_notification_list))
        .route("/api/notifications/count", get(notifications::get_notification_count))
        .route("/api/notifications/read", put(notifications::mark_kind_read))
        .route("/api/notifications/{id}/read", put(notifications::mark_notification_read))
        // Direct messages
        .route("/api/chats", get(chats::get_chat_user_list).post(chats::create_chat_message))
        .route("/api/chats/{uid}", get(chats::get_chat_msg_list))
        .route("/api/chats/{uid}/read", put(chats::mark_chat_read))
        // Site settings
        .route("/api/meta", get(meta::get_meta_data))
        .route("/api/meta/{key}", get(meta::get_meta_value))
        // Reports
        .route("/api/reports", post(reports::create_report))
        .route(
            "/api/reports/{id}",
            get(reports::get_report).put(reports::update_report),
        )
        // Admin
        .route("/api/admin/stats", get(admin::get_stats))
        .route("/api/admin/daily/{entity}", get(admin::get_daily))
        .route("/api/admin/search/{entity}", get(admin::search))
        .route("/api/admin/meta", put(meta::put_meta_data))
}
