use crate::blogs::stats::BlogStats;
use crate::core::config::AppState;
use crate::core::ctx::Ctx;
use crate::core::error::{Error, Result};
use crate::core::extract::ApiJson;
use crate::core::models::{Blog, BlogUpdate, BlogView, NewBlog};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
pub struct CreateBlogRequest {
    pub title: Option<String>,
    pub url: Option<String>,
    pub likes: Option<u64>,
}

fn required(field: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Error::Validation(format!("{} is required", field))),
    }
}

/// Populate the owner; a missing owner shows as `null`, a failed lookup is an error
async fn view_with_owner(state: &AppState, blog: Blog) -> Result<BlogView> {
    let owner = match blog.user.as_deref() {
        Some(user_id) => state.auth.find_user(user_id).await?,
        None => None,
    };
    Ok(BlogView::new(blog, owner.as_ref()))
}

/// GET /api/blogs
pub async fn list_blogs(State(state): State<AppState>) -> Result<Json<Vec<BlogView>>> {
    info!("GET /api/blogs");

    let users = state.auth.users_by_id().await?;
    let blogs = state
        .store
        .list()
        .await
        .into_iter()
        .map(|blog| {
            let owner = blog.user.as_ref().and_then(|id| users.get(id));
            BlogView::new(blog, owner)
        })
        .collect();

    Ok(Json(blogs))
}

/// GET /api/blogs/{id}
pub async fn get_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BlogView>> {
    info!("GET /api/blogs/{}", id);

    let blog = state
        .store
        .get(&id)
        .await
        .ok_or(Error::BlogNotFound { id })?;

    Ok(Json(view_with_owner(&state, blog).await?))
}

/// GET /api/blogs/stats
pub async fn blog_stats(State(state): State<AppState>) -> Json<BlogStats> {
    info!("GET /api/blogs/stats");

    let records = state.store.records().await;
    Json(BlogStats::from_records(&records))
}

/// POST /api/blogs
pub async fn create_blog(
    State(state): State<AppState>,
    ctx: Ctx,
    ApiJson(req): ApiJson<CreateBlogRequest>,
) -> Result<(StatusCode, Json<BlogView>)> {
    info!("POST /api/blogs - {}", ctx.username());

    let title = required("title", req.title)?;
    let url = required("url", req.url)?;

    let author = if ctx.name().trim().is_empty() {
        ctx.username()
    } else {
        ctx.name()
    };

    let blog = state
        .store
        .insert(NewBlog {
            title,
            author: author.to_string(),
            url,
            likes: req.likes.unwrap_or(0),
            user: Some(ctx.user_id().to_string()),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(view_with_owner(&state, blog).await?)))
}

/// PUT /api/blogs/{id}
pub async fn update_blog(
    State(state): State<AppState>,
    ctx: Ctx,
    Path(id): Path<String>,
    ApiJson(update): ApiJson<BlogUpdate>,
) -> Result<Json<BlogView>> {
    info!("PUT /api/blogs/{} - {}", id, ctx.username());

    let blog = state
        .store
        .get(&id)
        .await
        .ok_or_else(|| Error::BlogNotFound { id: id.clone() })?;

    if !blog.is_owned_by(ctx.user_id()) {
        warn!("User {} tried to update blog {}", ctx.username(), id);
        return Err(Error::NotOwner);
    }

    if let Some(title) = &update.title {
        if title.trim().is_empty() {
            return Err(Error::Validation("title is required".to_string()));
        }
    }
    if let Some(url) = &update.url {
        if url.trim().is_empty() {
            return Err(Error::Validation("url is required".to_string()));
        }
    }

    let updated = state.store.update(&id, update).await?;
    let updated = updated.ok_or(Error::BlogNotFound { id })?;

    Ok(Json(view_with_owner(&state, updated).await?))
}

/// DELETE /api/blogs/{id}
pub async fn delete_blog(
    State(state): State<AppState>,
    ctx: Ctx,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    info!("DELETE /api/blogs/{} - {}", id, ctx.username());

    let blog = state
        .store
        .get(&id)
        .await
        .ok_or_else(|| Error::BlogNotFound { id: id.clone() })?;

    if !blog.is_owned_by(ctx.user_id()) {
        warn!("User {} tried to delete blog {}", ctx.username(), id);
        return Err(Error::NotOwner);
    }

    if !state.store.delete(&id).await? {
        return Err(Error::BlogNotFound { id });
    }

    Ok(StatusCode::NO_CONTENT)
}
