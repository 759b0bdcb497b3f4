//! Routes: the directed edges leaving a connection point.

use std::collections::BTreeMap;

use bf_core::{Coord, Real};
use serde::{Deserialize, Serialize};

/// Friction of a route that does not declare one.
pub const DEFAULT_FRICTION: Real = 1.0;

/// Entry coordinate -> routes reachable from it, in declaration order.
pub type Transitions = BTreeMap<Coord, Vec<Route>>;

/// One directed edge out of a connection point.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Route {
    /// Where the edge ends.
    pub target: Coord,

    /// Resistance of the edge; [`DEFAULT_FRICTION`] when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friction: Option<Real>,

    /// Driving pressure added along this edge (pumps, pressurised inlets).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<Real>,

    /// Liquids injected when this route is a source.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub liquids: Vec<String>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub source: bool,

    /// Flow leaves the network at `target` (drain, vessel inlet).
    #[serde(default, skip_serializing_if = "is_false")]
    pub sink: bool,

    /// The edge stays inside the same part.
    #[serde(default, skip_serializing_if = "is_false")]
    pub internal: bool,
}

fn is_false(v: &bool) -> bool {
    !*v
}

impl Route {
    pub fn new(target: Coord) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    pub fn with_friction(mut self, friction: Real) -> Self {
        self.friction = Some(friction);
        self
    }

    pub fn with_pressure(mut self, pressure: Real) -> Self {
        self.pressure = Some(pressure);
        self
    }

    pub fn with_liquids<I, S>(mut self, liquids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.liquids = liquids.into_iter().map(Into::into).collect();
        self
    }

    pub fn as_source(mut self) -> Self {
        self.source = true;
        self
    }

    pub fn as_sink(mut self) -> Self {
        self.sink = true;
        self
    }

    pub fn as_internal(mut self) -> Self {
        self.internal = true;
        self
    }

    pub fn friction_or_default(&self) -> Real {
        self.friction.unwrap_or(DEFAULT_FRICTION)
    }

    pub fn pressure_or_zero(&self) -> Real {
        self.pressure.unwrap_or(0.0)
    }

    /// A route injects liquid only if it is flagged as source and names at
    /// least one liquid.
    pub fn is_liquid_source(&self) -> bool {
        self.source && !self.liquids.is_empty()
    }

    /// Same route with its target mapped through `f`.
    pub fn map_target(&self, f: impl FnOnce(Coord) -> Coord) -> Self {
        Self {
            target: f(self.target),
            ..self.clone()
        }
    }
}
