use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::models::record::Collection;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("template error: {0}")]
    Render(#[from] minijinja::Error),
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        error!("received internal error for user request: {self}");
        let error = json!({ "error": "Something went wrong" });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("collection file {path:?} is not a valid record array: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("record serialization failed: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("document store request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unable to sign service account assertion: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
    #[error("invalid document store credentials: {0}")]
    Credentials(String),
    #[error("unexpected document value: {0}")]
    Decode(String),
    #[error("no record id left after the largest one in {0}")]
    IdsExhausted(Collection),
}

/// Rejection of the admin guard. Login failures are not errors, see
/// [`crate::auth::admin::LoginResponse`].
#[derive(Clone, Debug)]
pub enum SessionError {
    Unauthorized,
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized"),
        };
        (status, Json(json!({ "error": error }))).into_response()
    }
}
