//! Core Router
//!
//! Handles user registration and session routes.

use crate::core::auth::handlers as auth_handlers;
use crate::core::auth::middleware::mw_require_auth;
use crate::core::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            get(auth_handlers::list_users).post(auth_handlers::create_user),
        )
        .route("/login", post(auth_handlers::login))
        .route(
            "/logout",
            post(auth_handlers::logout)
                .route_layer(middleware::from_fn_with_state(state, mw_require_auth)),
        )
}
