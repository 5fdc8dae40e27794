use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Failures reported to the client as problem-details JSON.
#[derive(Debug, thiserror::Error)]
pub enum MockError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("an API key or bearer token is required")]
    Unauthorized,

    #[error("{0}")]
    BadRequest(String),

    /// No handler is mounted for the path. `content` echoes the request.
    #[error("no route for {method} {path}")]
    NoRoute {
        method: String,
        path: String,
        query: Option<String>,
    },
}

impl MockError {
    fn status(&self) -> StatusCode {
        match self {
            MockError::NotFound(_) | MockError::NoRoute { .. } => StatusCode::NOT_FOUND,
            MockError::Unauthorized => StatusCode::UNAUTHORIZED,
            MockError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<MultipartError> for MockError {
    fn from(err: MultipartError) -> Self {
        MockError::BadRequest(err.body_text())
    }
}

impl IntoResponse for MockError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut body = json!({
            "type": "about:blank",
            "title": status.canonical_reason().unwrap_or_default(),
            "status": status.as_u16(),
            "detail": self.to_string(),
        });
        if let MockError::NoRoute { method, path, query } = &self {
            body["content"] = json!({ "method": method, "path": path, "query": query });
        }
        (status, Json(body)).into_response()
    }
}
