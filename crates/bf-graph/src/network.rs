//! The validated, immutable network handed to the solver.

use std::collections::HashMap;

use bf_core::{Coord, PartId};

use crate::error::{GraphError, GraphResult};
use crate::index::CoordIndex;
use crate::part::FlowPart;
use crate::route::Route;

/// A liquid source route, addressed by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceRef {
    /// Index into [`Network::parts`].
    pub part: usize,
    /// Entry coordinate the source route leaves from.
    pub entry: Coord,
    /// Position of the route in that entry's route list.
    pub route: usize,
}

/// Parts in shared coordinates plus lookup structures.
///
/// Built by [`crate::NetworkBuilder`]; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Network {
    pub(crate) parts: Vec<FlowPart>,
    pub(crate) index: CoordIndex,
    pub(crate) by_id: HashMap<PartId, usize>,
}

impl Network {
    pub fn parts(&self) -> &[FlowPart] {
        &self.parts
    }

    pub fn part(&self, idx: usize) -> Option<&FlowPart> {
        self.parts.get(idx)
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn index(&self) -> &CoordIndex {
        &self.index
    }

    /// Position of the part with the given id.
    pub fn position(&self, id: &PartId) -> GraphResult<usize> {
        self.by_id
            .get(id)
            .copied()
            .ok_or_else(|| GraphError::PartNotFound { id: id.clone() })
    }

    /// Parts with at least one route leaving `coord`, in network order.
    pub fn parts_at(&self, coord: Coord) -> &[usize] {
        self.index.parts_at(coord)
    }

    /// Routes leaving `coord` on part `idx` (empty if none).
    pub fn routes(&self, idx: usize, coord: Coord) -> &[Route] {
        self.parts
            .get(idx)
            .and_then(|p| p.transitions.get(&coord))
            .map_or(&[], Vec::as_slice)
    }

    /// Resolve a source reference to its route.
    pub fn source_route(&self, source: SourceRef) -> Option<&Route> {
        self.routes(source.part, source.entry).get(source.route)
    }

    /// Every liquid source route: parts in network order, entries ascending,
    /// routes in declaration order.
    pub fn sources(&self) -> impl Iterator<Item = SourceRef> + '_ {
        self.parts.iter().enumerate().flat_map(|(part, p)| {
            p.transitions.iter().flat_map(move |(entry, routes)| {
                routes
                    .iter()
                    .enumerate()
                    .filter(|(_, r)| r.is_liquid_source())
                    .map(move |(route, _)| SourceRef {
                        part,
                        entry: *entry,
                        route,
                    })
            })
        })
    }
}
