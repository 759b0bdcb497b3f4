//! Kettles: sized vessels with a connection on every outer edge.
//!
//! Each perimeter edge midpoint `E` gets an interior point `I` a quarter
//! square inwards. `I -> E` is a frictionless source of the kettle contents,
//! `E -> I` a frictionless sink. Liquid pumped out of one edge and back into
//! another therefore leaves and re-enters the vessel.

use bf_core::{Coord, ShapeSize};
use bf_graph::{Route, Transitions};

use crate::blueprint::Blueprint;
use crate::error::{PartError, PartResult};
use crate::settings::PartSettings;

pub const DEFAULT_WIDTH: u32 = 4;
pub const DEFAULT_HEIGHT: u32 = 6;
pub const MAX_SIDE: u32 = 20;

const INSET: i64 = 250;

#[derive(Debug, Default, Clone, Copy)]
pub struct Kettle;

impl Kettle {
    fn side(&self, value: Option<u32>, default: u32, setting: &'static str) -> PartResult<u32> {
        let side = value.unwrap_or(default);
        if side == 0 || side > MAX_SIDE {
            return Err(PartError::InvalidSetting {
                kind: self.kind(),
                setting,
                reason: format!("{side} is outside 1..={MAX_SIDE}"),
            });
        }
        Ok(side)
    }

    /// `(edge, interior)` pairs, clockwise from the top-left.
    pub fn openings(size: ShapeSize) -> Vec<(Coord, Coord)> {
        let w = i64::from(size.width) * 1000;
        let h = i64::from(size.height) * 1000;
        let mut openings = Vec::new();
        for col in 0..i64::from(size.width) {
            let x = col * 1000 + 500;
            openings.push((Coord::from_millis(x, 0, 0), Coord::from_millis(x, INSET, 0)));
        }
        for row in 0..i64::from(size.height) {
            let y = row * 1000 + 500;
            openings.push((Coord::from_millis(w, y, 0), Coord::from_millis(w - INSET, y, 0)));
        }
        for col in (0..i64::from(size.width)).rev() {
            let x = col * 1000 + 500;
            openings.push((Coord::from_millis(x, h, 0), Coord::from_millis(x, h - INSET, 0)));
        }
        for row in (0..i64::from(size.height)).rev() {
            let y = row * 1000 + 500;
            openings.push((Coord::from_millis(0, y, 0), Coord::from_millis(INSET, y, 0)));
        }
        openings
    }
}

impl Blueprint for Kettle {
    fn kind(&self) -> &'static str {
        "Kettle"
    }

    fn size(&self, settings: &PartSettings) -> PartResult<ShapeSize> {
        Ok(ShapeSize::new(
            self.side(settings.width, DEFAULT_WIDTH, "width")?,
            self.side(settings.height, DEFAULT_HEIGHT, "height")?,
        ))
    }

    fn transitions(&self, settings: &PartSettings) -> PartResult<Transitions> {
        let size = self.size(settings)?;
        let pressure = settings.checked_pressure(self.kind())?.unwrap_or(0.0);

        let mut t = Transitions::new();
        for (edge, inner) in Self::openings(size) {
            t.insert(
                inner,
                vec![
                    Route::new(edge)
                        .with_friction(0.0)
                        .with_pressure(pressure)
                        .with_liquids(settings.liquids.iter().cloned())
                        .as_source(),
                ],
            );
            t.insert(edge, vec![Route::new(inner).with_friction(0.0).as_sink()]);
        }
        Ok(t)
    }
}
