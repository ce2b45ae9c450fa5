#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unexpected status {status} for {path}")]
    Status { status: u16, path: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl DashboardError {
    /// A 404 on a search endpoint means "zero results", not a failure.
    /// Views use this to pick the empty state over the error state.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DashboardError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
