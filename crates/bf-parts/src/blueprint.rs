//! The blueprint trait implemented by every part type.

use bf_core::{Coord, ShapeSize};
use bf_graph::{Route, Transitions};

use crate::error::PartResult;
use crate::settings::PartSettings;

/// Connection points of a unit square, relative to its anchor.
pub mod edge {
    use bf_core::Coord;

    pub const UP: Coord = Coord::from_millis(500, 0, 0);
    pub const RIGHT: Coord = Coord::from_millis(1000, 500, 0);
    pub const DOWN: Coord = Coord::from_millis(500, 1000, 0);
    pub const LEFT: Coord = Coord::from_millis(0, 500, 0);
    pub const CENTER: Coord = Coord::from_millis(500, 500, 0);
}

/// A part type: footprint and local connectivity as a function of settings.
///
/// Transitions are expressed in the part's own frame (anchor at the origin,
/// no rotation or mirroring); placing the part is the translator's job.
pub trait Blueprint: Send + Sync {
    /// Type name as used in layout files.
    fn kind(&self) -> &'static str;

    /// Footprint in grid squares.
    fn size(&self, _settings: &PartSettings) -> PartResult<ShapeSize> {
        Ok(ShapeSize::UNIT)
    }

    /// Local connectivity for the given settings.
    fn transitions(&self, settings: &PartSettings) -> PartResult<Transitions>;
}

/// Add plain routes `a -> b` and `b -> a`.
pub(crate) fn connect(transitions: &mut Transitions, a: Coord, b: Coord) {
    transitions.entry(a).or_default().push(Route::new(b));
    transitions.entry(b).or_default().push(Route::new(a));
}

/// Route every edge through the center, with `friction` on each half.
pub(crate) fn junction(edges: &[Coord], friction: f64) -> Transitions {
    let mut transitions = Transitions::new();
    for &e in edges {
        transitions.insert(
            e,
            vec![Route::new(edge::CENTER).with_friction(friction).as_internal()],
        );
    }
    transitions.insert(
        edge::CENTER,
        edges
            .iter()
            .map(|&e| Route::new(e).with_friction(friction))
            .collect(),
    );
    transitions
}
