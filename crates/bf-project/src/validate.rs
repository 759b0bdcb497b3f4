//! Layout validation.

use std::collections::HashSet;

use bf_core::Rotation;

use crate::schema::{Layout, PartDef};

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },

    #[error("Part #{index} has an empty id")]
    EmptyId { index: usize },

    #[error("Duplicate ID: {id}")]
    DuplicateId { id: String },

    #[error("Part '{id}' has an empty type")]
    EmptyKind { id: String },

    #[error("Invalid value: {field} = {value} on part '{id}' ({reason})")]
    InvalidValue {
        id: String,
        field: &'static str,
        value: String,
        reason: &'static str,
    },
}

pub fn validate_layout(layout: &Layout) -> Result<(), ValidationError> {
    if layout.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: layout.version,
        });
    }

    let mut ids = HashSet::new();
    for (index, part) in layout.parts.iter().enumerate() {
        if part.id.is_empty() {
            return Err(ValidationError::EmptyId { index });
        }
        if !ids.insert(part.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: part.id.clone(),
            });
        }
        validate_part(part)?;
    }
    Ok(())
}

fn validate_part(part: &PartDef) -> Result<(), ValidationError> {
    let invalid = |field, value: String, reason| ValidationError::InvalidValue {
        id: part.id.clone(),
        field,
        value,
        reason,
    };

    if part.kind.is_empty() {
        return Err(ValidationError::EmptyKind {
            id: part.id.clone(),
        });
    }
    if Rotation::from_degrees(part.rotate).is_err() {
        return Err(invalid(
            "rotate",
            part.rotate.to_string(),
            "must be a multiple of 90",
        ));
    }
    if let Some(p) = part.settings.pressure {
        if !p.is_finite() || p < 0.0 {
            return Err(invalid("pressure", p.to_string(), "must be finite and >= 0"));
        }
    }
    if let Some(d) = part.settings.duty {
        if !(0.0..=100.0).contains(&d) {
            return Err(invalid("duty", d.to_string(), "must be within 0..=100"));
        }
    }
    Ok(())
}
