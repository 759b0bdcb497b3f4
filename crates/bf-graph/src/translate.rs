//! Coordinate/transition translation between part-local and shared space.
//!
//! Forward: mirror (if flipped), translate by the anchor, rotate about the
//! shape. Reverse ([`normalize_keys`]): undo the translation and the mirror
//! but keep the rotation, which is what a renderer drawing the part in its
//! rotated frame expects.

use std::collections::BTreeMap;

use bf_core::{Coord, Rotation};

use crate::part::{FlowPart, Placement, StatePart};
use crate::route::Transitions;

/// Map one local coordinate into shared layout space.
pub fn to_shared(placement: &Placement, local: Coord) -> Coord {
    let anchor = placement.anchor();
    local
        .flip_shape_edge(placement.flipped, Rotation::Deg0, placement.size, Coord::ORIGIN)
        .translate(anchor)
        .rotate_shape_edge(placement.rotation, Rotation::Deg0, placement.size, anchor)
}

/// Map one shared coordinate back to the part's anchor-relative frame.
pub fn to_local(placement: &Placement, shared: Coord) -> Coord {
    shared.translate(-placement.anchor()).flip_shape_edge(
        placement.flipped,
        placement.rotation,
        placement.size,
        Coord::ORIGIN,
    )
}

/// Re-express a local transitions map in shared coordinates.
///
/// Entry keys and every route target are mapped; all other route fields are
/// kept as declared.
pub fn translate_transitions(placement: &Placement, local: &Transitions) -> Transitions {
    local
        .iter()
        .map(|(entry, routes)| {
            let routes = routes
                .iter()
                .map(|route| route.map_target(|t| to_shared(placement, t)))
                .collect();
            (to_shared(placement, *entry), routes)
        })
        .collect()
}

pub fn as_flow_part(part: StatePart) -> FlowPart {
    let transitions = translate_transitions(&part.placement, &part.transitions);
    FlowPart {
        id: part.id,
        kind: part.kind,
        placement: part.placement,
        transitions,
    }
}

pub fn as_flow_parts(parts: impl IntoIterator<Item = StatePart>) -> Vec<FlowPart> {
    parts.into_iter().map(as_flow_part).collect()
}

/// Re-key a per-coordinate map from shared into part-relative coordinates.
pub fn normalize_keys<V>(placement: &Placement, map: BTreeMap<Coord, V>) -> BTreeMap<Coord, V> {
    map.into_iter()
        .map(|(coord, v)| (to_local(placement, coord), v))
        .collect()
}
