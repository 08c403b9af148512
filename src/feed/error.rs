//! Feed and transform error kinds

/// Failures while turning a raw payload into display records.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransformError {
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),
    #[error("Row {row}: field '{field}' is not numeric (got {value})")]
    InvalidNumericField {
        field: &'static str,
        row: usize,
        value: String,
    },
    #[error("Row {row}: cannot parse close-approach date '{value}'")]
    DateParseError { row: usize, value: String },
}

/// Failures of one feed fetch-and-transform cycle.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FeedError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error(transparent)]
    Transform(#[from] TransformError),
}

impl FeedError {
    /// Stable error code for API consumers.
    pub fn code(&self) -> &'static str {
        match self {
            FeedError::Network(_) => "NETWORK_ERROR",
            FeedError::MalformedResponse(_) => "MALFORMED_RESPONSE",
            FeedError::Transform(TransformError::SchemaMismatch(_)) => "SCHEMA_MISMATCH",
            FeedError::Transform(TransformError::InvalidNumericField { .. }) => {
                "INVALID_NUMERIC_FIELD"
            }
            FeedError::Transform(TransformError::DateParseError { .. }) => "DATE_PARSE_ERROR",
        }
    }
}

impl From<reqwest::Error> for FeedError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FeedError::MalformedResponse(e.to_string())
        } else {
            FeedError::Network(e.to_string())
        }
    }
}
