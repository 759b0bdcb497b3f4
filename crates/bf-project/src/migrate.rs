//! Layout migrations.

use crate::ProjectError;
use crate::schema::Layout;

pub const LATEST_VERSION: u32 = 1;

/// Part types that were folded into another type.
const RENAMED_KINDS: &[(&str, &str)] = &[
    ("SmallKettle", "Kettle"),
    ("LargeKettle", "Kettle"),
    ("PwmPump", "Pump"),
];

pub fn migrate_to_latest(mut layout: Layout) -> Result<Layout, ProjectError> {
    while layout.version < LATEST_VERSION {
        layout = migrate_one_version(layout)?;
    }
    Ok(layout)
}

fn migrate_one_version(layout: Layout) -> Result<Layout, ProjectError> {
    match layout.version {
        0 => migrate_v0_to_v1(layout),
        v => Err(ProjectError::Migration {
            what: format!("No migration path from version {v}"),
        }),
    }
}

fn migrate_v0_to_v1(mut layout: Layout) -> Result<Layout, ProjectError> {
    for part in &mut layout.parts {
        if let Some((_, kind)) = RENAMED_KINDS.iter().find(|(old, _)| *old == part.kind) {
            part.kind = (*kind).to_owned();
        }
    }
    layout.version = 1;
    Ok(layout)
}
