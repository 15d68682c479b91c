//! Error types for cube parsing and pipeline configuration.

/// Failure while turning `.cube` text into a [`Lut3D`](crate::Lut3D).
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// No size line was found, or the declared size is not a usable edge length.
    #[error("invalid cube size: {}", describe_size(.found))]
    InvalidSize { found: Option<f64> },
    /// Fewer RGB entries than `size³` were available to fill the table.
    #[error("truncated cube data: expected {expected} entries, found {found}")]
    TruncatedData { expected: usize, found: usize },
    /// A line could not be interpreted. Only raised in strict mode.
    #[error("malformed line {line}: {content:?}")]
    MalformedLine { line: usize, content: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure while loading or validating [`PipelineParams`](crate::PipelineParams).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid params JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: f32 },
}

fn describe_size(found: &Option<f64>) -> String {
    match found {
        Some(v) => v.to_string(),
        None => "no size line".to_string(),
    }
}
