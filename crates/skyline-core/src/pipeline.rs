use std::path::Path;

use anyhow::{Context, Result};

use crate::aggregate;
use crate::analyzer::SourceAnalyzer;
use crate::config::Config;
use crate::discovery;
use crate::gitinfo;
use crate::manifest;
use crate::metrics;
use crate::snapshot;
use crate::types::{new_record_id, ClassRecord, MethodRecord, Snapshot};

/// The full analysis pipeline: discovery, per-file extraction and metrics,
/// aggregation, snapshot assembly. Files are analyzed sequentially; the
/// aggregator is the only cross-file state.
pub struct AnalysisPipeline {
    analyzer: Box<dyn SourceAnalyzer>,
    config: Config,
}

impl AnalysisPipeline {
    pub fn new(analyzer: Box<dyn SourceAnalyzer>, config: Config) -> Self {
        Self { analyzer, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run a full analysis of the project rooted at `project_root`.
    ///
    /// Per-file failures (unreadable, unparseable) warn and skip; the run
    /// continues with the remaining files. A missing root is fatal.
    pub fn analyze(&self, project_root: &Path) -> Result<Snapshot> {
        anyhow::ensure!(
            project_root.is_dir(),
            "project path '{}' does not exist or is not a directory",
            project_root.display()
        );

        let files = discovery::discover_files(
            project_root,
            self.analyzer.file_extensions(),
            &self.config.scan.include,
            &self.config.scan.exclude,
        );

        let mut records = Vec::with_capacity(files.len());
        for file_path in &files {
            match self.analyze_file(project_root, file_path) {
                Ok(record) => records.push(record),
                Err(e) => {
                    eprintln!("Warning: skipping {}: {e:#}", file_path.display());
                }
            }
        }

        let aggregation = aggregate::aggregate(records);
        let project = manifest::project_info(project_root, &self.config);
        Ok(snapshot::assemble(project, aggregation))
    }

    /// Analyze one file into a class record.
    fn analyze_file(&self, project_root: &Path, file_path: &Path) -> Result<ClassRecord> {
        let content = std::fs::read_to_string(file_path)
            .with_context(|| format!("failed to read {}", file_path.display()))?;

        let rel_path = discovery::rel_path(project_root, file_path);
        let package = package_path(&rel_path);

        let parsed = self.analyzer.parse_file(file_path, &content)?;
        let outline = self.analyzer.extract_outline(&parsed);
        let dependencies = self.analyzer.extract_imports(&parsed);

        // Name tiers: class declaration, exported identifier, file stem
        let name = outline.name.unwrap_or_else(|| {
            file_path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| rel_path.clone())
        });

        let methods: Vec<MethodRecord> = outline.methods.into_iter().map(MethodRecord::new).collect();
        let metrics = metrics::compute(&content, file_path, methods.len());
        let git = gitinfo::collect(project_root, &rel_path);

        Ok(ClassRecord {
            id: new_record_id(),
            name,
            package,
            file_path: rel_path,
            extends: outline.extends.into_iter().collect(),
            implements: outline.implements,
            methods,
            dependencies,
            is_react_like: outline.is_react_like,
            is_external: false,
            metrics,
            git,
        })
    }
}

/// Containing directory of a root-relative path, forward-slashed; `"root"`
/// when the file sits directly under the project root.
fn package_path(rel_path: &str) -> String {
    match rel_path.rsplit_once('/') {
        Some((dir, _)) if !dir.is_empty() => dir.to_string(),
        _ => "root".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_path() {
        assert_eq!(package_path("src/util/helpers.ts"), "src/util");
        assert_eq!(package_path("src/index.ts"), "src");
        assert_eq!(package_path("index.ts"), "root");
    }
}
