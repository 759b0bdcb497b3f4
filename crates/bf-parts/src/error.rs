//! Error types for part blueprints.

use thiserror::Error;

/// Errors raised while turning part settings into transitions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PartError {
    #[error("Unknown part type '{kind}'")]
    UnknownKind { kind: String },

    #[error("Invalid setting '{setting}' for {kind}: {reason}")]
    InvalidSetting {
        kind: &'static str,
        setting: &'static str,
        reason: String,
    },
}

pub type PartResult<T> = Result<T, PartError>;
