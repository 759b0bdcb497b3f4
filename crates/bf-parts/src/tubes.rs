//! Passive tubes.

use bf_graph::Transitions;

use crate::blueprint::{Blueprint, connect, edge, junction};
use crate::error::PartResult;
use crate::settings::PartSettings;

/// Friction of each half of a junction (edge to center, center to edge).
pub const JUNCTION_FRICTION: f64 = 0.5;

/// Left to right.
#[derive(Debug, Default, Clone, Copy)]
pub struct StraightTube;

impl Blueprint for StraightTube {
    fn kind(&self) -> &'static str {
        "StraightTube"
    }

    fn transitions(&self, _settings: &PartSettings) -> PartResult<Transitions> {
        let mut t = Transitions::new();
        connect(&mut t, edge::LEFT, edge::RIGHT);
        Ok(t)
    }
}

/// Quarter bend from the top edge to the right edge.
#[derive(Debug, Default, Clone, Copy)]
pub struct ElbowTube;

impl Blueprint for ElbowTube {
    fn kind(&self) -> &'static str {
        "ElbowTube"
    }

    fn transitions(&self, _settings: &PartSettings) -> PartResult<Transitions> {
        let mut t = Transitions::new();
        connect(&mut t, edge::UP, edge::RIGHT);
        Ok(t)
    }
}

/// Left, top and right joined in the center.
#[derive(Debug, Default, Clone, Copy)]
pub struct TeeTube;

impl Blueprint for TeeTube {
    fn kind(&self) -> &'static str {
        "TeeTube"
    }

    fn transitions(&self, _settings: &PartSettings) -> PartResult<Transitions> {
        Ok(junction(
            &[edge::LEFT, edge::UP, edge::RIGHT],
            JUNCTION_FRICTION,
        ))
    }
}

/// All four edges joined in the center.
#[derive(Debug, Default, Clone, Copy)]
pub struct CrossTube;

impl Blueprint for CrossTube {
    fn kind(&self) -> &'static str {
        "CrossTube"
    }

    fn transitions(&self, _settings: &PartSettings) -> PartResult<Transitions> {
        Ok(junction(
            &[edge::LEFT, edge::UP, edge::RIGHT, edge::DOWN],
            JUNCTION_FRICTION,
        ))
    }
}

/// Two tubes crossing without touching.
#[derive(Debug, Default, Clone, Copy)]
pub struct BridgeTube;

impl Blueprint for BridgeTube {
    fn kind(&self) -> &'static str {
        "BridgeTube"
    }

    fn transitions(&self, _settings: &PartSettings) -> PartResult<Transitions> {
        let mut t = Transitions::new();
        connect(&mut t, edge::LEFT, edge::RIGHT);
        connect(&mut t, edge::UP, edge::DOWN);
        Ok(t)
    }
}
