use crate::core::auth::UserInfo;
use crate::core::config::AppState;
use crate::core::error::Result;
use crate::core::extract::ApiJson;
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    #[serde(default)]
    pub name: String,
    pub password: String,
}

/// A user together with the ids of the blogs they own
#[derive(Debug, Serialize, Deserialize)]
pub struct UserView {
    #[serde(flatten)]
    pub user: UserInfo,
    pub blogs: Vec<String>,
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserInfo>)> {
    info!("POST /api/users - {}", req.username);

    let user = state
        .auth
        .signup(req.username.clone(), req.name, req.password)
        .await
        .inspect_err(|e| warn!("Signup failed for {}: {}", req.username, e))?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /api/users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserView>>> {
    info!("GET /api/users");

    let users = state.auth.list_users().await?;
    let mut owned = state.store.blog_ids_by_owner().await;

    let views = users
        .into_iter()
        .map(|user| UserView {
            blogs: owned.remove(&user.id).unwrap_or_default(),
            user,
        })
        .collect();

    Ok(Json(views))
}
