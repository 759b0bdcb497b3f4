//! bf-project: layout file format, migration and validation.

pub mod migrate;
pub mod schema;
pub mod validate;

pub use migrate::{LATEST_VERSION, migrate_to_latest};
pub use schema::*;
pub use validate::{ValidationError, validate_layout};

use std::path::Path;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Migration error: {what}")]
    Migration { what: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse, migrate and validate a YAML layout.
pub fn from_yaml_str(content: &str) -> ProjectResult<Layout> {
    let layout: Layout = serde_yaml::from_str(content)?;
    finish_load(layout)
}

/// Parse, migrate and validate a JSON layout.
pub fn from_json_str(content: &str) -> ProjectResult<Layout> {
    let layout: Layout = serde_json::from_str(content)?;
    finish_load(layout)
}

fn finish_load(layout: Layout) -> ProjectResult<Layout> {
    let layout = migrate_to_latest(layout)?;
    validate_layout(&layout)?;
    Ok(layout)
}

pub fn load_yaml(path: &Path) -> ProjectResult<Layout> {
    from_yaml_str(&std::fs::read_to_string(path)?)
}

pub fn save_yaml(path: &Path, layout: &Layout) -> ProjectResult<()> {
    validate_layout(layout)?;
    let content = serde_yaml::to_string(layout)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> ProjectResult<Layout> {
    from_json_str(&std::fs::read_to_string(path)?)
}

pub fn save_json(path: &Path, layout: &Layout) -> ProjectResult<()> {
    validate_layout(layout)?;
    let content = serde_json::to_string_pretty(layout)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load by extension: `.json` is JSON, anything else YAML.
pub fn load(path: &Path) -> ProjectResult<Layout> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => load_json(path),
        _ => load_yaml(path),
    }
}
