use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to load catalog from {path}: {reason}")]
    CatalogLoad { path: PathBuf, reason: String },

    #[error("invalid {field} '{value}'. Expected one of: {expected}")]
    InvalidChoice {
        field: &'static str,
        value: String,
        expected: String,
    },

    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("function #{index} does not exist (the record has {len})")]
    SlotOutOfRange { index: usize, len: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
