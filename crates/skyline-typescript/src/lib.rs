use std::path::Path;

use anyhow::{Context, Result};
use tree_sitter::{Language, Node, Parser, Query, QueryCursor, StreamingIterator};

use skyline_core::analyzer::{FileOutline, ParsedFile, SourceAnalyzer};

mod fallback;

pub use fallback::FallbackPatterns;

/// Matches the first class-like declaration in the file.
const CLASS_QUERY_SRC: &str = r#"
(class_declaration
  name: (type_identifier) @name) @class
(abstract_class_declaration
  name: (type_identifier) @name) @class
"#;

/// TypeScript/TSX structural extractor.
///
/// Primary path walks the tree-sitter syntax tree for the first class
/// declaration; when none exists, extraction falls back to pattern matching.
/// Import edges always come from the pattern path.
pub struct TypeScriptAnalyzer {
    ts_language: Language,
    tsx_language: Language,
    ts_class_query: Query,
    tsx_class_query: Query,
    patterns: FallbackPatterns,
}

impl TypeScriptAnalyzer {
    pub fn new() -> Result<Self> {
        let ts_language: Language = tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into();
        let tsx_language: Language = tree_sitter_typescript::LANGUAGE_TSX.into();

        let ts_class_query =
            Query::new(&ts_language, CLASS_QUERY_SRC).context("failed to compile class query")?;
        let tsx_class_query =
            Query::new(&tsx_language, CLASS_QUERY_SRC).context("failed to compile class query")?;

        Ok(Self {
            ts_language,
            tsx_language,
            ts_class_query,
            tsx_class_query,
            patterns: FallbackPatterns::new()?,
        })
    }

    fn language_for_file(&self, path: &Path) -> &Language {
        match path.extension().and_then(|e| e.to_str()) {
            Some("tsx") | Some("jsx") => &self.tsx_language,
            _ => &self.ts_language,
        }
    }

    fn query_for_file(&self, path: &Path) -> &Query {
        match path.extension().and_then(|e| e.to_str()) {
            Some("tsx") | Some("jsx") => &self.tsx_class_query,
            _ => &self.ts_class_query,
        }
    }

    /// Find the first class declaration node, if any.
    fn first_class_node<'t>(&self, parsed: &'t ParsedFile) -> Option<Node<'t>> {
        let query = self.query_for_file(&parsed.path);
        let class_idx = query
            .capture_names()
            .iter()
            .position(|n| *n == "class")
            .unwrap_or(0);

        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(
            query,
            parsed.tree.root_node(),
            parsed.content.as_bytes(),
        );

        while let Some(m) = matches.next() {
            for capture in m.captures {
                if capture.index as usize == class_idx {
                    return Some(capture.node);
                }
            }
        }
        None
    }
}

impl SourceAnalyzer for TypeScriptAnalyzer {
    fn language(&self) -> &'static str {
        "typescript"
    }

    fn file_extensions(&self) -> &[&str] {
        &["ts", "tsx", "js", "jsx"]
    }

    fn parse_file(&self, path: &Path, content: &str) -> Result<ParsedFile> {
        let language = self.language_for_file(path);
        let mut parser = Parser::new();
        parser
            .set_language(language)
            .context("failed to set TypeScript language")?;
        // tree-sitter is error-tolerant: malformed input yields a partial tree
        let tree = parser
            .parse(content, None)
            .context("failed to parse TypeScript file")?;
        Ok(ParsedFile {
            path: path.to_path_buf(),
            tree,
            content: content.to_string(),
        })
    }

    fn extract_outline(&self, parsed: &ParsedFile) -> FileOutline {
        let mut outline = match self.first_class_node(parsed) {
            Some(class_node) => outline_from_class(class_node, &parsed.content),
            None => self.patterns.extract_outline(&parsed.content),
        };
        outline.is_react_like = self.patterns.is_react_like(&parsed.content);
        outline
    }

    fn extract_imports(&self, parsed: &ParsedFile) -> Vec<String> {
        self.patterns.extract_imports(&parsed.content)
    }
}

/// Build an outline from a class declaration node: name, single extended
/// type, implemented types in source order, and method names.
fn outline_from_class(class_node: Node, source: &str) -> FileOutline {
    let name = class_node
        .child_by_field_name("name")
        .map(|n| node_text(n, source));

    let mut extends = None;
    let mut implements = Vec::new();

    let mut cursor = class_node.walk();
    for child in class_node.children(&mut cursor) {
        if child.kind() != "class_heritage" {
            continue;
        }
        let mut heritage_cursor = child.walk();
        for clause in child.children(&mut heritage_cursor) {
            match clause.kind() {
                "extends_clause" => {
                    if extends.is_none() {
                        let mut clause_cursor = clause.walk();
                        extends = clause
                            .named_children(&mut clause_cursor)
                            .next()
                            .map(|n| type_name_text(n, source));
                    }
                }
                "implements_clause" => {
                    let mut clause_cursor = clause.walk();
                    for ty in clause.named_children(&mut clause_cursor) {
                        implements.push(type_name_text(ty, source));
                    }
                }
                _ => {}
            }
        }
    }

    let mut methods = Vec::new();
    if let Some(body) = class_node.child_by_field_name("body") {
        let mut body_cursor = body.walk();
        for member in body.children(&mut body_cursor) {
            if member.kind() != "method_definition" {
                continue;
            }
            if let Some(name_node) = member.child_by_field_name("name") {
                let method_name = node_text(name_node, source);
                if method_name != "constructor" {
                    methods.push(method_name);
                }
            }
        }
    }

    FileOutline {
        name,
        extends,
        implements,
        methods,
        is_react_like: false,
    }
}

/// Text of a type reference, with generic arguments stripped.
fn type_name_text(node: Node, source: &str) -> String {
    if node.kind() == "generic_type" {
        if let Some(name) = node.child_by_field_name("name") {
            return node_text(name, source);
        }
    }
    node_text(node, source)
}

/// Extract text from a tree-sitter node.
fn node_text(node: Node, source: &str) -> String {
    source[node.byte_range()].to_string()
}
