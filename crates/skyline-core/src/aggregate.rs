use std::collections::{HashMap, HashSet};

use crate::types::{new_record_id, ClassRecord, PackageRecord};

/// The aggregated project graph: packages in first-encounter order and the
/// class sequence with external stubs appended after all real records.
pub struct Aggregation {
    pub packages: Vec<PackageRecord>,
    pub classes: Vec<ClassRecord>,
}

/// Fold per-file records into packages and synthesize stubs for referenced
/// but undefined base classes/interfaces.
pub fn aggregate(records: Vec<ClassRecord>) -> Aggregation {
    let mut packages: Vec<PackageRecord> = Vec::new();
    let mut package_index: HashMap<String, usize> = HashMap::new();

    for record in &records {
        let idx = *package_index
            .entry(record.package.clone())
            .or_insert_with(|| {
                packages.push(PackageRecord::new(record.package.clone()));
                packages.len() - 1
            });
        packages[idx].classes.push(record.id.clone());
    }

    let external_names = collect_external_names(&records);

    let mut classes = records;
    if !external_names.is_empty() {
        let mut external_package = PackageRecord {
            id: new_record_id(),
            name: "External Libraries".to_string(),
            path: "external".to_string(),
            classes: Vec::new(),
        };
        for name in external_names {
            let stub = ClassRecord::external_stub(name);
            external_package.classes.push(stub.id.clone());
            classes.push(stub);
        }
        packages.push(external_package);
    }

    Aggregation { packages, classes }
}

/// Names appearing in any `extends`/`implements` that match no record's
/// `name`, in first-seen order.
fn collect_external_names(records: &[ClassRecord]) -> Vec<String> {
    let defined: HashSet<&str> = records.iter().map(|r| r.name.as_str()).collect();

    let mut seen: HashSet<&str> = HashSet::new();
    let mut names = Vec::new();
    for record in records {
        for name in record.extends.iter().chain(record.implements.iter()) {
            if !defined.contains(name.as_str()) && seen.insert(name.as_str()) {
                names.push(name.clone());
            }
        }
    }
    names
}
