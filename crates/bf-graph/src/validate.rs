//! Network validation logic.

use std::collections::HashSet;

use bf_core::{PartId, ensure_finite, ensure_non_negative};

use crate::error::{GraphError, GraphResult};
use crate::part::FlowPart;

/// Validate part identities: non-empty and unique.
pub(crate) fn validate_ids(parts: &[FlowPart]) -> GraphResult<()> {
    let mut seen: HashSet<&PartId> = HashSet::new();
    for (index, part) in parts.iter().enumerate() {
        if part.id.is_empty() {
            return Err(GraphError::EmptyPartId { index });
        }
        if !seen.insert(&part.id) {
            return Err(GraphError::DuplicatePart {
                id: part.id.clone(),
            });
        }
    }
    Ok(())
}

/// Validate route numerics: frictions finite and non-negative, pressures finite.
pub(crate) fn validate_routes(parts: &[FlowPart]) -> GraphResult<()> {
    for part in parts {
        for (entry, routes) in &part.transitions {
            for route in routes {
                if let Some(friction) = route.friction {
                    if ensure_non_negative(friction, "friction").is_err() {
                        return Err(GraphError::InvalidFriction {
                            part: part.id.clone(),
                            entry: *entry,
                            value: friction,
                        });
                    }
                }
                if let Some(pressure) = route.pressure {
                    if ensure_finite(pressure, "pressure").is_err() {
                        return Err(GraphError::NonFinitePressure {
                            part: part.id.clone(),
                            entry: *entry,
                            value: pressure,
                        });
                    }
                }
            }
        }
    }
    Ok(())
}
