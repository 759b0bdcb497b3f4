//! Layout loading, saving, validation and introspection.

use std::path::Path;

use bf_parts::Registry;
use bf_project::Layout;

use crate::error::{AppError, AppResult};

/// One row of a part listing.
#[derive(Debug, Clone, PartialEq)]
pub struct PartSummary {
    pub id: String,
    pub kind: String,
    pub x: i32,
    pub y: i32,
    pub rotate: i64,
    pub flipped: bool,
    /// Part pushes liquid into the network.
    pub is_source: bool,
}

/// Load a layout (YAML, or JSON by extension), migrating old versions.
pub fn load_layout(path: &Path) -> AppResult<Layout> {
    if !path.exists() {
        return Err(AppError::LayoutFileRead {
            path: path.to_path_buf(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        });
    }
    let layout = bf_project::load(path)?;
    tracing::debug!(path = %path.display(), parts = layout.parts.len(), "layout loaded");
    Ok(layout)
}

pub fn save_layout(path: &Path, layout: &Layout) -> AppResult<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => bf_project::save_json(path, layout)?,
        _ => bf_project::save_yaml(path, layout)?,
    }
    Ok(())
}

/// File-level validation plus a check that every part type is known.
pub fn validate_layout(layout: &Layout, registry: &Registry) -> AppResult<()> {
    bf_project::validate_layout(layout).map_err(|e| AppError::Validation(e.to_string()))?;
    if let Some(part) = layout.parts.iter().find(|p| !registry.contains(&p.kind)) {
        return Err(AppError::Validation(format!(
            "part '{}' has unknown type '{}'",
            part.id, part.kind
        )));
    }
    Ok(())
}

pub fn list_parts(layout: &Layout) -> Vec<PartSummary> {
    layout
        .parts
        .iter()
        .map(|part| PartSummary {
            id: part.id.clone(),
            kind: part.kind.clone(),
            x: part.x,
            y: part.y,
            rotate: part.rotate,
            flipped: part.flipped,
            is_source: part.settings.enabled && !part.settings.liquids.is_empty(),
        })
        .collect()
}
