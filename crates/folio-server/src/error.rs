use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use folio_core::error::FolioError;

// ---------------------------------------------------------------------------
// Sentinels carried through the anyhow chain
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct NotFoundError(String);

impl std::fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for NotFoundError {}

#[derive(Debug)]
struct BadRequestError(String);

impl std::fmt::Display for BadRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for BadRequestError {}

// ---------------------------------------------------------------------------
// AppError — JSON error responses for the API
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self(BadRequestError(msg.into()).into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self(NotFoundError(msg.into()).into())
    }

    pub fn status(&self) -> StatusCode {
        if self.0.downcast_ref::<NotFoundError>().is_some() {
            return StatusCode::NOT_FOUND;
        }
        if self.0.downcast_ref::<BadRequestError>().is_some() {
            return StatusCode::BAD_REQUEST;
        }
        match self.0.downcast_ref::<FolioError>() {
            Some(FolioError::CaseStudyNotFound(_)) => StatusCode::NOT_FOUND,
            Some(FolioError::InvalidSlug(_)) | Some(FolioError::InvalidPageSize(_)) => {
                StatusCode::BAD_REQUEST
            }
            Some(FolioError::Source(_)) => StatusCode::BAD_GATEWAY,
            Some(FolioError::NotInitialized)
            | Some(FolioError::DuplicateSlug { .. })
            | Some(FolioError::Parse { .. })
            | Some(FolioError::Io(_))
            | Some(FolioError::Yaml(_))
            | None => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
