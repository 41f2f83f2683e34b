use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;

use skyline_core::FileOutline;

/// Compiled patterns for the regex extraction path. Used whenever the syntax
/// tree yields no class-like declaration, and always for import edges.
pub struct FallbackPatterns {
    export_name: Regex,
    class_extends: Regex,
    class_implements: Regex,
    method_like: Regex,
    import: Regex,
    react_import: Regex,
}

const EXPORT_NAME_SRC: &str =
    r"export\s+(?:default\s+)?(?:abstract\s+)?(?:async\s+)?(?:function|const|class)\s+([A-Za-z_$][A-Za-z0-9_$]*)";

const CLASS_EXTENDS_SRC: &str =
    r"class\s+([A-Za-z_$][A-Za-z0-9_$]*)\s+extends\s+([A-Za-z_$][A-Za-z0-9_$.]*)";

const CLASS_IMPLEMENTS_SRC: &str = r"class\s+[A-Za-z_$][A-Za-z0-9_$]*(?:\s+extends\s+[A-Za-z_$][A-Za-z0-9_$.]*)?\s+implements\s+([^{]+)\{";

// Function declarations, shorthand methods, and arrow assignments
const METHOD_LIKE_SRC: &str = r"(?m)(?:function\s+([A-Za-z_$][A-Za-z0-9_$]*)\s*\(|^\s*(?:public\s+|private\s+|protected\s+|static\s+|async\s+)*([A-Za-z_$][A-Za-z0-9_$]*)\s*\([^)]*\)\s*(?::[^{;]*)?\{|(?:const|let|var)\s+([A-Za-z_$][A-Za-z0-9_$]*)\s*=\s*(?:async\s*)?\([^)]*\)\s*=>)";

const IMPORT_SRC: &str = r#"(?m)^\s*import\s+(?:[^'";]+from\s+)?['"]([^'"]+)['"]"#;

const REACT_IMPORT_SRC: &str = r#"from\s+['"]react(?:-dom|-native)?(?:/[^'"]*)?['"]"#;

/// Control-flow words the shorthand-method pattern can otherwise pick up.
const NON_METHOD_KEYWORDS: &[&str] = &[
    "if", "else", "for", "while", "switch", "catch", "return", "do", "new", "typeof", "constructor",
];

impl FallbackPatterns {
    pub fn new() -> Result<Self> {
        Ok(Self {
            export_name: Regex::new(EXPORT_NAME_SRC)
                .context("failed to compile export name pattern")?,
            class_extends: Regex::new(CLASS_EXTENDS_SRC)
                .context("failed to compile class extends pattern")?,
            class_implements: Regex::new(CLASS_IMPLEMENTS_SRC)
                .context("failed to compile class implements pattern")?,
            method_like: Regex::new(METHOD_LIKE_SRC)
                .context("failed to compile method pattern")?,
            import: Regex::new(IMPORT_SRC).context("failed to compile import pattern")?,
            react_import: Regex::new(REACT_IMPORT_SRC)
                .context("failed to compile react import pattern")?,
        })
    }

    /// Pattern-based structural extraction for files with no parsed class
    /// declaration. Never fails on malformed input.
    pub fn extract_outline(&self, content: &str) -> FileOutline {
        let name = self
            .export_name
            .captures(content)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string());

        let extends = self
            .class_extends
            .captures(content)
            .and_then(|c| c.get(2))
            .map(|m| m.as_str().to_string());

        let implements = self
            .class_implements
            .captures(content)
            .and_then(|c| c.get(1))
            .map(|m| {
                m.as_str()
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let mut methods = Vec::new();
        for (index, captures) in self.method_like.captures_iter(content).enumerate() {
            let name = captures
                .iter()
                .skip(1)
                .flatten()
                .next()
                .map(|m| m.as_str().to_string())
                .unwrap_or_else(|| format!("method_{index}"));
            if NON_METHOD_KEYWORDS.contains(&name.as_str()) {
                continue;
            }
            methods.push(name);
        }

        FileOutline {
            name,
            extends,
            implements,
            methods,
            is_react_like: false,
        }
    }

    /// Locally-resolved import targets: specifiers beginning with `.` or `/`,
    /// reduced to their base name, deduplicated in first-seen order.
    pub fn extract_imports(&self, content: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut deps = Vec::new();
        for captures in self.import.captures_iter(content) {
            let Some(specifier) = captures.get(1).map(|m| m.as_str()) else {
                continue;
            };
            if !specifier.starts_with('.') && !specifier.starts_with('/') {
                continue;
            }
            let Some(base) = Path::new(specifier).file_stem() else {
                continue;
            };
            let base = base.to_string_lossy().to_string();
            if seen.insert(base.clone()) {
                deps.push(base);
            }
        }
        deps
    }

    /// Heuristic: the file exports a function/const/class and textually
    /// references a react import. Not a semantic check.
    pub fn is_react_like(&self, content: &str) -> bool {
        self.export_name.is_match(content) && self.react_import.is_match(content)
    }
}
