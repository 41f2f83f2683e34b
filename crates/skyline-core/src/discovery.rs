use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Find source files under `root` matching the analyzer's extensions.
///
/// `exclude` entries are substring-matched against root-relative paths and
/// checked before descending, so excluded directories are never walked.
/// `include` entries are prefix-matched; an empty list accepts everything.
/// Unreadable directories contribute no entries and are never fatal.
pub fn discover_files(
    root: &Path,
    extensions: &[&str],
    include: &[String],
    exclude: &[String],
) -> Vec<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| {
            let rel = rel_path(root, e.path());
            !exclude
                .iter()
                .any(|pat| !pat.is_empty() && rel.contains(pat.as_str()))
        })
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .is_some_and(|ext| extensions.iter().any(|want| ext == *want))
        })
        .filter(|e| {
            if include.is_empty() {
                return true;
            }
            let rel = rel_path(root, e.path());
            include.iter().any(|pat| rel.starts_with(pat.as_str()))
        })
        .map(|e| e.into_path())
        .collect()
}

/// Root-relative path with forward slashes.
pub fn rel_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
