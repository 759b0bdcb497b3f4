//! Lookup from part type name to blueprint.

use std::collections::BTreeMap;

use bf_core::{PartId, Rotation};
use bf_graph::{Placement, StatePart};

use crate::blueprint::Blueprint;
use crate::error::{PartError, PartResult};
use crate::io::SystemIo;
use crate::kettle::Kettle;
use crate::pump::Pump;
use crate::settings::PartSettings;
use crate::tubes::{BridgeTube, CrossTube, ElbowTube, StraightTube, TeeTube};
use crate::valve::{CheckValve, Valve};

/// Grid position and orientation of a part; the size comes from its type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pose {
    pub x: i32,
    pub y: i32,
    pub rotation: Rotation,
    pub flipped: bool,
}

impl Pose {
    pub fn new(x: i32, y: i32, rotation: Rotation, flipped: bool) -> Self {
        Self {
            x,
            y,
            rotation,
            flipped,
        }
    }
}

/// Registered part types, keyed by type name.
#[derive(Default)]
pub struct Registry {
    blueprints: BTreeMap<&'static str, Box<dyn Blueprint>>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in part type.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(SystemIo);
        registry.register(StraightTube);
        registry.register(ElbowTube);
        registry.register(TeeTube);
        registry.register(CrossTube);
        registry.register(BridgeTube);
        registry.register(Pump);
        registry.register(Valve);
        registry.register(CheckValve);
        registry.register(Kettle);
        registry
    }

    /// Add or replace a part type.
    pub fn register(&mut self, blueprint: impl Blueprint + 'static) {
        self.blueprints.insert(blueprint.kind(), Box::new(blueprint));
    }

    pub fn get(&self, kind: &str) -> PartResult<&dyn Blueprint> {
        self.blueprints
            .get(kind)
            .map(|b| b.as_ref())
            .ok_or_else(|| PartError::UnknownKind {
                kind: kind.to_owned(),
            })
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.blueprints.contains_key(kind)
    }

    /// Registered type names, sorted.
    pub fn kinds(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.blueprints.keys().copied()
    }

    /// Resolve a placed part into engine input.
    pub fn instantiate(
        &self,
        id: PartId,
        kind: &str,
        pose: Pose,
        settings: &PartSettings,
    ) -> PartResult<StatePart> {
        let blueprint = self.get(kind)?;
        let size = blueprint.size(settings)?;
        let transitions = blueprint.transitions(settings)?;
        Ok(StatePart {
            id,
            kind: blueprint.kind().to_owned(),
            placement: Placement::new(pose.x, pose.y, pose.rotation, pose.flipped, size),
            transitions,
        })
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.blueprints.keys()).finish()
    }
}
