use crate::core::auth::middleware::bearer_token;
use crate::core::config::AppState;
use crate::core::ctx::Ctx;
use crate::core::error::{Error, Result};
use crate::core::extract::ApiJson;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub name: String,
}

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    info!("POST /api/login - {}", req.username);

    match state.auth.login(&req.username, &req.password).await {
        Ok((user, session)) => Ok(Json(LoginResponse {
            token: session.token,
            username: user.username,
            name: user.name,
        })),
        Err(e) => {
            warn!("Login failed for {}: {}", req.username, e);
            Err(Error::from(e))
        }
    }
}

/// POST /api/logout
pub async fn logout(
    State(state): State<AppState>,
    ctx: Ctx,
    headers: HeaderMap,
) -> Result<StatusCode> {
    info!("POST /api/logout - {}", ctx.username());

    let token = bearer_token(&headers)?;
    state.auth.logout(token).await?;

    Ok(StatusCode::NO_CONTENT)
}
