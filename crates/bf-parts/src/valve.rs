//! Valves.

use bf_graph::{Route, Transitions};

use crate::blueprint::{Blueprint, connect, edge};
use crate::error::PartResult;
use crate::settings::PartSettings;

/// Two-way valve; a closed valve has no transitions at all.
#[derive(Debug, Default, Clone, Copy)]
pub struct Valve;

impl Blueprint for Valve {
    fn kind(&self) -> &'static str {
        "Valve"
    }

    fn transitions(&self, settings: &PartSettings) -> PartResult<Transitions> {
        let mut t = Transitions::new();
        if !settings.closed {
            connect(&mut t, edge::LEFT, edge::RIGHT);
        }
        Ok(t)
    }
}

/// Lets liquid pass from left to right only.
#[derive(Debug, Default, Clone, Copy)]
pub struct CheckValve;

impl Blueprint for CheckValve {
    fn kind(&self) -> &'static str {
        "CheckValve"
    }

    fn transitions(&self, _settings: &PartSettings) -> PartResult<Transitions> {
        let mut t = Transitions::new();
        t.insert(edge::LEFT, vec![Route::new(edge::RIGHT)]);
        Ok(t)
    }
}
