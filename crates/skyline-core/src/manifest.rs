use std::path::Path;

use serde::Deserialize;

use crate::config::Config;
use crate::types::ProjectInfo;

/// The subset of `package.json` the snapshot header cares about.
#[derive(Debug, Default, Deserialize)]
struct PackageManifest {
    name: Option<String>,
    description: Option<String>,
}

/// Resolve snapshot project metadata.
///
/// Precedence: config override, then `package.json` at the root, then the
/// root directory name. A missing or malformed manifest is silently ignored.
pub fn project_info(project_root: &Path, config: &Config) -> ProjectInfo {
    let manifest = read_manifest(project_root);
    let defaults = ProjectInfo::default();

    let name = config
        .project
        .name
        .clone()
        .or(manifest.name)
        .or_else(|| {
            project_root
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
        })
        .unwrap_or(defaults.name);

    let description = config
        .project
        .description
        .clone()
        .or(manifest.description)
        .unwrap_or(defaults.description);

    ProjectInfo {
        name,
        description,
        language: config.project.language.clone(),
    }
}

fn read_manifest(project_root: &Path) -> PackageManifest {
    let path = project_root.join("package.json");
    std::fs::read_to_string(&path)
        .ok()
        .and_then(|content| serde_json::from_str(&content).ok())
        .unwrap_or_default()
}
