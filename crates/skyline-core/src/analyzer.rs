use std::path::{Path, PathBuf};

use anyhow::Result;
use tree_sitter::Tree;

/// A parsed source file with its tree-sitter AST and original content.
pub struct ParsedFile {
    pub path: PathBuf,
    pub tree: Tree,
    pub content: String,
}

/// Structural facts extracted from one file.
///
/// `name` is `None` when neither the syntax tree nor the fallback patterns
/// found an identifier; the pipeline then falls back to the file stem.
#[derive(Debug, Clone, Default)]
pub struct FileOutline {
    pub name: Option<String>,
    pub extends: Option<String>,
    pub implements: Vec<String>,
    pub methods: Vec<String>,
    pub is_react_like: bool,
}

/// Trait that each language extractor must implement.
pub trait SourceAnalyzer: Send + Sync {
    /// Language name (e.g., "typescript")
    fn language(&self) -> &'static str;

    /// File extensions this analyzer handles (e.g., &["ts", "tsx"])
    fn file_extensions(&self) -> &[&str];

    /// Parse a source file. Must tolerate malformed input and produce a
    /// best-effort partial tree rather than failing.
    fn parse_file(&self, path: &Path, content: &str) -> Result<ParsedFile>;

    /// Extract the structural outline: first class-like declaration when one
    /// exists, pattern-matched facts otherwise.
    fn extract_outline(&self, parsed: &ParsedFile) -> FileOutline;

    /// Extract locally-resolved import targets as bare dependency names,
    /// deduplicated in first-seen order.
    fn extract_imports(&self, parsed: &ParsedFile) -> Vec<String>;
}
