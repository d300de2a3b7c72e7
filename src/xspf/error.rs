//! Errors raised while building or serializing XSPF documents

use thiserror::Error;

#[derive(Debug, Error)]
pub enum XspfError {
    #[error("unknown {entity} field '{name}'")]
    UnknownField { entity: &'static str, name: String },

    #[error("invalid value '{value}' for field '{field}': {reason}")]
    InvalidValue {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("invalid playlist document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write xml: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("failed to write xml: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, XspfError>;
