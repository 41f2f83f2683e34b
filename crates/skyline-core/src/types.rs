use serde::{Deserialize, Serialize};
use std::fmt;

use uuid::Uuid;

/// Generate a record id. Unique within a run; not stable across runs.
pub fn new_record_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Complexity-derived severity band. `External` is reserved for stub records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThreatLevel {
    Low,
    Moderate,
    High,
    Critical,
    External,
}

impl ThreatLevel {
    /// Band thresholds: >15 critical, >10 high, >5 moderate, else low.
    pub fn from_complexity(complexity: usize) -> Self {
        if complexity > 15 {
            ThreatLevel::Critical
        } else if complexity > 10 {
            ThreatLevel::High
        } else if complexity > 5 {
            ThreatLevel::Moderate
        } else {
            ThreatLevel::Low
        }
    }

    /// Color the visualizer renders for this band.
    pub fn color(&self) -> &'static str {
        match self {
            ThreatLevel::Critical => "red",
            ThreatLevel::High => "orange",
            ThreatLevel::Moderate => "yellow",
            ThreatLevel::Low => "green",
            ThreatLevel::External => "gray",
        }
    }
}

impl fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThreatLevel::Low => write!(f, "LOW"),
            ThreatLevel::Moderate => write!(f, "MODERATE"),
            ThreatLevel::High => write!(f, "HIGH"),
            ThreatLevel::Critical => write!(f, "CRITICAL"),
            ThreatLevel::External => write!(f, "EXTERNAL"),
        }
    }
}

/// Size/complexity metrics for one file.
///
/// `cognitive_complexity` mirrors `complexity` and `nesting_depth` is always
/// zero; both are schema placeholders the visualizer already consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeMetrics {
    pub lines: usize,
    pub complexity: usize,
    pub cognitive_complexity: usize,
    pub nesting_depth: usize,
    pub method_count: usize,
    pub threat_level: ThreatLevel,
    pub label: ThreatLevel,
    pub threat_color: String,
    pub test_exists: bool,
}

impl CodeMetrics {
    pub fn new(lines: usize, complexity: usize, method_count: usize, test_exists: bool) -> Self {
        let threat = ThreatLevel::from_complexity(complexity);
        Self {
            lines,
            complexity,
            cognitive_complexity: complexity,
            nesting_depth: 0,
            method_count,
            threat_level: threat,
            label: threat,
            threat_color: threat.color().to_string(),
            test_exists,
        }
    }

    /// Fixed nominal metrics for external stubs: lines=75 gives stub nodes a
    /// modest building height instead of zero.
    pub fn external() -> Self {
        Self {
            lines: 75,
            complexity: 0,
            cognitive_complexity: 0,
            nesting_depth: 0,
            method_count: 0,
            threat_level: ThreatLevel::External,
            label: ThreatLevel::External,
            threat_color: ThreatLevel::External.color().to_string(),
            test_exists: false,
        }
    }
}

/// Most recent commit touching a file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastCommit {
    pub hash: String,
    pub author: String,
    pub email: String,
    pub date: String,
    pub message: String,
    pub days_ago: i64,
}

/// Per-file git history metrics. Defaults to untracked when history is
/// unavailable for any reason.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitMetrics {
    pub commit_count: usize,
    pub last_commit: Option<LastCommit>,
    pub is_git_tracked: bool,
}

/// A method entry. Visibility is always reported as public: no accessor
/// modifier introspection is performed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodRecord {
    pub name: String,
    pub visibility: String,
    pub kind: String,
}

impl MethodRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: "public".to_string(),
            kind: "method".to_string(),
        }
    }
}

/// Per-file structural and metric summary: the atomic unit of the snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRecord {
    pub id: String,
    pub name: String,
    pub package: String,
    pub file_path: String,
    pub extends: Vec<String>,
    pub implements: Vec<String>,
    pub methods: Vec<MethodRecord>,
    pub dependencies: Vec<String>,
    pub is_react_like: bool,
    pub is_external: bool,
    pub metrics: CodeMetrics,
    pub git: GitMetrics,
}

impl ClassRecord {
    /// Synthesized placeholder for a base/interface referenced but not
    /// defined within the analyzed tree.
    pub fn external_stub(name: impl Into<String>) -> Self {
        Self {
            id: new_record_id(),
            name: name.into(),
            package: "external".to_string(),
            file_path: String::new(),
            extends: Vec::new(),
            implements: Vec::new(),
            methods: Vec::new(),
            dependencies: Vec::new(),
            is_react_like: false,
            is_external: true,
            metrics: CodeMetrics::external(),
            git: GitMetrics::default(),
        }
    }
}

/// Grouping of class records by containing directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageRecord {
    pub id: String,
    pub name: String,
    pub path: String,
    pub classes: Vec<String>,
}

impl PackageRecord {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let name = path
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or("root")
            .to_string();
        Self {
            id: new_record_id(),
            name,
            path,
            classes: Vec::new(),
        }
    }
}

/// Project metadata carried in the snapshot header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub name: String,
    pub description: String,
    pub language: String,
}

impl Default for ProjectInfo {
    fn default() -> Self {
        Self {
            name: "Unknown Project".to_string(),
            description: "Analyzed project".to_string(),
            language: "typescript".to_string(),
        }
    }
}

/// The complete output document for one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: String,
    pub generated: String,
    pub project: ProjectInfo,
    pub packages: Vec<PackageRecord>,
    pub classes: Vec<ClassRecord>,
}
