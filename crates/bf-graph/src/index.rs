//! Coordinate index over a network.
//!
//! Maps every entry coordinate to the parts that declare transitions there,
//! in network order. Adjacency lookups in the path builder resolve through
//! this index instead of scanning every part.

use std::collections::BTreeMap;

use bf_core::Coord;

use crate::part::FlowPart;

#[derive(Debug, Clone, Default)]
pub struct CoordIndex {
    /// Coordinate -> part indices (ascending, so "first match" is stable).
    by_coord: BTreeMap<Coord, Vec<usize>>,
}

impl CoordIndex {
    /// Build the index from parts in network order.
    pub fn from_parts(parts: &[FlowPart]) -> Self {
        let mut by_coord: BTreeMap<Coord, Vec<usize>> = BTreeMap::new();
        for (idx, part) in parts.iter().enumerate() {
            for (entry, routes) in &part.transitions {
                if !routes.is_empty() {
                    by_coord.entry(*entry).or_default().push(idx);
                }
            }
        }
        Self { by_coord }
    }

    /// Parts with at least one route leaving `coord`.
    pub fn parts_at(&self, coord: Coord) -> &[usize] {
        self.by_coord.get(&coord).map_or(&[], Vec::as_slice)
    }

    /// Number of distinct connection points.
    pub fn len(&self) -> usize {
        self.by_coord.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_coord.is_empty()
    }

    /// Coordinates where more than one part meets.
    pub fn junctions(&self) -> impl Iterator<Item = (Coord, &[usize])> + '_ {
        self.by_coord
            .iter()
            .filter(|(_, parts)| parts.len() > 1)
            .map(|(c, parts)| (*c, parts.as_slice()))
    }
}
