use chrono::Utc;

use crate::aggregate::Aggregation;
use crate::types::{ProjectInfo, Snapshot};

/// Schema version the external visualizer pins against. Field names and
/// shapes under this version are a compatibility contract.
pub const SNAPSHOT_VERSION: &str = "6.0";

/// Merge project metadata with the aggregated graph into the final document.
/// Pure but for the timestamp (and the ids generated upstream).
pub fn assemble(project: ProjectInfo, aggregation: Aggregation) -> Snapshot {
    Snapshot {
        version: SNAPSHOT_VERSION.to_string(),
        generated: Utc::now().to_rfc3339(),
        project,
        packages: aggregation.packages,
        classes: aggregation.classes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use chrono::DateTime;

    #[test]
    fn test_assemble_stamps_version_and_timestamp() {
        let snapshot = assemble(ProjectInfo::default(), aggregate(Vec::new()));
        assert_eq!(snapshot.version, "6.0");
        assert!(
            DateTime::parse_from_rfc3339(&snapshot.generated).is_ok(),
            "generated should be RFC3339: {}",
            snapshot.generated
        );
        assert!(snapshot.packages.is_empty());
        assert!(snapshot.classes.is_empty());
    }

    #[test]
    fn test_assemble_carries_project_info() {
        let project = ProjectInfo {
            name: "shop".to_string(),
            description: "storefront".to_string(),
            language: "typescript".to_string(),
        };
        let snapshot = assemble(project, aggregate(Vec::new()));
        assert_eq!(snapshot.project.name, "shop");
        assert_eq!(snapshot.project.language, "typescript");
    }
}
