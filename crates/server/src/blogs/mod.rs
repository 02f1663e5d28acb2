//! Blog listing endpoints
//!
//! Reads are public. Creating, updating and deleting require a session, and
//! updates and deletes are limited to the blog's owner.

pub mod handlers;
pub mod stats;

use crate::core::auth::middleware::mw_require_auth;
use crate::core::AppState;
use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

pub use stats::BlogStats;

pub fn router(state: AppState) -> Router<AppState> {
    let require_auth = middleware::from_fn_with_state(state, mw_require_auth);

    Router::new()
        .route(
            "/blogs",
            get(handlers::list_blogs)
                .merge(post(handlers::create_blog).route_layer(require_auth.clone())),
        )
        .route("/blogs/stats", get(handlers::blog_stats))
        .route(
            "/blogs/{id}",
            get(handlers::get_blog).merge(
                put(handlers::update_blog)
                    .delete(handlers::delete_blog)
                    .route_layer(require_auth),
            ),
        )
}
