use std::path::Path;

use anyhow::{Context, Result};

use skyline_core::Snapshot;

/// Serialize a snapshot document.
pub fn format_snapshot(snapshot: &Snapshot, compact: bool) -> String {
    if compact {
        serde_json::to_string(snapshot).expect("Snapshot should be serializable")
    } else {
        serde_json::to_string_pretty(snapshot).expect("Snapshot should be serializable")
    }
}

/// Write the snapshot to `path`: the whole document is serialized first,
/// then written in one call. An unwritable destination is fatal.
pub fn write_snapshot(snapshot: &Snapshot, path: &Path) -> Result<()> {
    let json = format_snapshot(snapshot, false);
    std::fs::write(path, json)
        .with_context(|| format!("failed to write snapshot to {}", path.display()))?;
    Ok(())
}
