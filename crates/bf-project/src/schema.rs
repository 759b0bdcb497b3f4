//! Layout file schema.

use bf_parts::PartSettings;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Layout {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub parts: Vec<PartDef>,
}

/// One placed part.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PartDef {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub x: i32,
    pub y: i32,
    /// Clockwise rotation in degrees.
    #[serde(default)]
    pub rotate: i64,
    #[serde(default, skip_serializing_if = "is_false")]
    pub flipped: bool,
    #[serde(default)]
    pub settings: PartSettings,
}

fn is_false(v: &bool) -> bool {
    !*v
}

impl PartDef {
    pub fn new(id: impl Into<String>, kind: impl Into<String>, x: i32, y: i32) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            x,
            y,
            rotate: 0,
            flipped: false,
            settings: PartSettings::default(),
        }
    }

    pub fn rotated(mut self, degrees: i64) -> Self {
        self.rotate = degrees;
        self
    }

    pub fn with_settings(mut self, settings: PartSettings) -> Self {
        self.settings = settings;
        self
    }
}
