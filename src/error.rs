use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Property not found")]
    NotFound,

    #[error("No featured properties")]
    EmptySet,

    #[error("Duplicate slug in catalog: {0}")]
    DuplicateSlug(String),

    #[error("Invalid bathroom count for {0}")]
    InvalidBathrooms(String),

    #[error("Image {image_id} of {slug} belongs to property {owner}")]
    ImageOwnerMismatch { slug: String, image_id: i64, owner: i64 },
}

/// Sink failure. The detail is for logs only and never reaches a response.
#[derive(Error, Debug)]
#[error("Storage error: {0}")]
pub struct StorageError(pub String);

pub const STORAGE_FAILURE_MESSAGE: &str = "Could not save your submission";

#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error("{0}")]
    Validation(&'static str),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Catalog(CatalogError::NotFound | CatalogError::EmptySet) => {
                StatusCode::NOT_FOUND
            }
            AppError::Catalog(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Submission(SubmissionError::Validation(_)) => StatusCode::BAD_REQUEST,
            AppError::Submission(SubmissionError::Storage(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match &self {
            AppError::Submission(SubmissionError::Storage(_)) => STORAGE_FAILURE_MESSAGE.to_string(),
            _ => self.to_string(),
        };

        let body = Json(serde_json::json!({ "error": message }));
        (status, body).into_response()
    }
}
