use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::types::CodeMetrics;

/// Branching keywords counted as whole-word tokens for the complexity
/// heuristic. Matches inside string and comment literals count too; the
/// metric is deliberately parser-free.
fn keyword_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(?:if|else|for|while|switch|case|catch)\b")
            .expect("keyword pattern is a valid regex")
    })
}

/// Count line-separator-delimited segments.
///
/// Policy: a trailing newline does not add an empty final segment, so
/// `"a\nb\n"` and `"a\nb"` both count 2.
pub fn lines_of_code(text: &str) -> usize {
    text.lines().count()
}

/// Heuristic cyclomatic complexity: occurrences of the branching keyword set
/// anywhere in the raw text.
pub fn keyword_complexity(text: &str) -> usize {
    keyword_regex().find_iter(text).count()
}

/// True iff a sibling file exists with the source extension replaced by
/// `.test.<ext>` (e.g. `util.ts` -> `util.test.ts`).
pub fn test_file_exists(path: &Path) -> bool {
    let (Some(stem), Some(ext)) = (path.file_stem(), path.extension()) else {
        return false;
    };
    let candidate = path.with_file_name(format!(
        "{}.test.{}",
        stem.to_string_lossy(),
        ext.to_string_lossy()
    ));
    candidate.exists()
}

/// Compute the full metrics block for one file.
pub fn compute(text: &str, path: &Path, method_count: usize) -> CodeMetrics {
    CodeMetrics::new(
        lines_of_code(text),
        keyword_complexity(text),
        method_count,
        test_file_exists(path),
    )
}
