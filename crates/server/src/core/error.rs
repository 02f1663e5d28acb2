use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    // Auth Errors
    #[error("invalid username or password")]
    LoginFail,
    #[error("token missing")]
    AuthFailNoToken,
    #[error("token wrong format")]
    AuthFailTokenWrongFormat,
    #[error("token invalid or expired")]
    AuthFailInvalidToken,
    #[error("auth context missing")]
    AuthFailCtxNotInRequestExt,
    #[error("Unauthorised user")]
    NotOwner,

    // Model Errors
    #[error("blog {id} not found")]
    BlogNotFound { id: String },
    #[error("expected username to be unique")]
    UsernameTaken,

    // Generic
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::LoginFail
            | Error::AuthFailNoToken
            | Error::AuthFailTokenWrongFormat
            | Error::AuthFailInvalidToken
            | Error::NotOwner => StatusCode::UNAUTHORIZED,
            Error::AuthFailCtxNotInRequestExt | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Error::BlogNotFound { .. } => StatusCode::NOT_FOUND,
            Error::UsernameTaken | Error::Validation(_) => StatusCode::BAD_REQUEST,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Request failed: {}", self);
        }

        let body = Json(json!({ "error": self.to_string() }));

        (status, body).into_response()
    }
}

// Managers and stores work in anyhow; a wrapped `Error` keeps its variant,
// anything else becomes a 500
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<Error>() {
            Ok(err) => err,
            Err(err) => Error::Internal(format!("{:#}", err)),
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::Validation(rejection.body_text())
    }
}
