use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

/// Everything that can go wrong while serving a scrape request
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Both category and place parameters are required")]
    MissingParameters,

    #[error("Invalid category")]
    InvalidCategory,

    #[error("Invalid place")]
    InvalidPlace,

    #[error("Invalid query string: {0}")]
    InvalidQuery(String),

    #[error("No conferences found for the specified criteria")]
    TableNotFound,

    #[error("Row {index} is missing its {part}")]
    MalformedRow { index: usize, part: &'static str },

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("CSV export failed: {0}")]
    Export(String),

    #[error("{0}")]
    Internal(String),
}

impl ScrapeError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ScrapeError::MissingParameters
            | ScrapeError::InvalidCategory
            | ScrapeError::InvalidPlace
            | ScrapeError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            ScrapeError::TableNotFound => StatusCode::NOT_FOUND,
            ScrapeError::MalformedRow { .. }
            | ScrapeError::Browser(_)
            | ScrapeError::Export(_)
            | ScrapeError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<csv::Error> for ScrapeError {
    fn from(e: csv::Error) -> Self {
        ScrapeError::Export(e.to_string())
    }
}

impl From<std::io::Error> for ScrapeError {
    fn from(e: std::io::Error) -> Self {
        ScrapeError::Export(e.to_string())
    }
}

impl From<tokio::task::JoinError> for ScrapeError {
    fn from(e: tokio::task::JoinError) -> Self {
        ScrapeError::Internal(format!("Scrape task failed: {}", e))
    }
}

impl IntoResponse for ScrapeError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Scrape failed: {}", self);
        } else {
            tracing::warn!("Rejected scrape request: {}", self);
        }

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
