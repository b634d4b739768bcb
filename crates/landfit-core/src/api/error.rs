use thiserror::Error;

use crate::models::TableError;

#[derive(Error, Debug)]
pub enum AcquisitionError {
    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Source page not found: {0}")]
    NotFound(String),

    #[error("Rate limited by the source")]
    RateLimited,

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("No table found in the source page")]
    NoTable,

    #[error("Source table is missing the {0} column")]
    MissingColumn(String),

    #[error("Row {row} has too few cells")]
    MalformedRow { row: usize },

    #[error("Row {row} has a non-numeric area: {value:?}")]
    InvalidArea { row: usize, value: String },

    #[error("Source table has no rows")]
    Empty,

    #[error("Source table failed validation: {0}")]
    Table(#[from] TableError),

    #[error("Failed to parse page: {0}")]
    Parse(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl AcquisitionError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let mut end = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
        }
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let truncated = Self::truncate_body(body);
        match status.as_u16() {
            401 | 403 => AcquisitionError::AccessDenied(truncated),
            404 => AcquisitionError::NotFound(truncated),
            429 => AcquisitionError::RateLimited,
            500..=599 => AcquisitionError::ServerError(truncated),
            _ => AcquisitionError::InvalidResponse(format!("Status {}: {}", status, truncated)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_from_status() {
        assert!(matches!(
            AcquisitionError::from_status(StatusCode::FORBIDDEN, "no"),
            AcquisitionError::AccessDenied(_)
        ));
        assert!(matches!(
            AcquisitionError::from_status(StatusCode::NOT_FOUND, ""),
            AcquisitionError::NotFound(_)
        ));
        assert!(matches!(
            AcquisitionError::from_status(StatusCode::TOO_MANY_REQUESTS, ""),
            AcquisitionError::RateLimited
        ));
        assert!(matches!(
            AcquisitionError::from_status(StatusCode::BAD_GATEWAY, "upstream"),
            AcquisitionError::ServerError(_)
        ));
        match AcquisitionError::from_status(StatusCode::IM_A_TEAPOT, "short") {
            AcquisitionError::InvalidResponse(msg) => assert!(msg.contains("418")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_truncate_body() {
        let long = "é".repeat(400);
        let truncated = AcquisitionError::truncate_body(&long);
        assert!(truncated.contains("truncated, 800 total bytes"));
        assert_eq!(AcquisitionError::truncate_body("short"), "short");
    }
}
