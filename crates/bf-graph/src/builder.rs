//! Incremental network builder.

use std::collections::HashMap;

use crate::error::GraphResult;
use crate::index::CoordIndex;
use crate::network::Network;
use crate::part::{FlowPart, StatePart};
use crate::translate::as_flow_part;
use crate::validate;

/// Builder for constructing a network incrementally.
///
/// Parts keep the order in which they are added; that order decides which
/// neighbour wins when several parts share a connection point. Call
/// `build()` to validate and freeze the parts into an immutable `Network`.
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    parts: Vec<FlowPart>,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a part given in local coordinates; it is translated immediately.
    pub fn add_part(&mut self, part: StatePart) -> usize {
        self.add_flow_part(as_flow_part(part))
    }

    /// Add a part that is already in shared coordinates.
    pub fn add_flow_part(&mut self, part: FlowPart) -> usize {
        self.parts.push(part);
        self.parts.len() - 1
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Validate and build the network.
    pub fn build(self) -> GraphResult<Network> {
        validate::validate_ids(&self.parts)?;
        validate::validate_routes(&self.parts)?;

        let index = CoordIndex::from_parts(&self.parts);
        let by_id: HashMap<_, _> = self
            .parts
            .iter()
            .enumerate()
            .map(|(idx, p)| (p.id.clone(), idx))
            .collect();

        tracing::debug!(
            parts = self.parts.len(),
            points = index.len(),
            "network built"
        );

        Ok(Network {
            parts: self.parts,
            index,
            by_id,
        })
    }
}

impl FromIterator<StatePart> for NetworkBuilder {
    fn from_iter<I: IntoIterator<Item = StatePart>>(iter: I) -> Self {
        let mut builder = NetworkBuilder::new();
        for part in iter {
            builder.add_part(part);
        }
        builder
    }
}
