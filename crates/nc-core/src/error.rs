use thiserror::Error;

/// Failures that prevent any part of a graph file from being salvaged.
///
/// Problems below the top level (a bad node, a dangling edge) are never
/// errors: the offending entry is skipped and reported in a `LoadReport`.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("graph file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("graph file must be a JSON object, found {0}")]
    NotAnObject(&'static str),
}
