use std::process::Command;

fn fixture_path() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    format!("{manifest_dir}/tests/fixtures/sample-ts-project")
}

fn skyline_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_skyline"))
}

fn analyze_fixture() -> serde_json::Value {
    let output = skyline_cmd()
        .args(["analyze", &fixture_path(), "--stdout", "--compact"])
        .output()
        .expect("failed to run skyline analyze");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        output.status.success(),
        "skyline analyze failed: stdout={stdout}, stderr={stderr}"
    );
    serde_json::from_str(stdout.trim()).expect("output should be valid JSON")
}

fn class_by_name<'a>(doc: &'a serde_json::Value, name: &str) -> &'a serde_json::Value {
    doc["classes"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["name"] == name)
        .unwrap_or_else(|| panic!("class '{name}' missing from snapshot"))
}

#[test]
fn test_snapshot_header() {
    let doc = analyze_fixture();
    assert_eq!(doc["version"], "6.0");
    assert!(doc.get("generated").is_some());
    assert_eq!(doc["project"]["name"], "sample-shop");
    assert_eq!(doc["project"]["language"], "typescript");
}

#[test]
fn test_class_extraction_and_external_stub() {
    let doc = analyze_fixture();

    let cart = class_by_name(&doc, "Cart");
    assert_eq!(cart["extends"], serde_json::json!(["BaseModel"]));
    assert_eq!(cart["implements"], serde_json::json!(["Serializable"]));
    assert_eq!(cart["package"], "src/models");
    assert_eq!(cart["isExternal"], false);
    assert_eq!(cart["dependencies"], serde_json::json!(["util"]));
    let methods: Vec<&str> = cart["methods"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert_eq!(methods, vec!["addItem", "total"]);
    assert_eq!(cart["methods"][0]["visibility"], "public");

    let stub = class_by_name(&doc, "BaseModel");
    assert_eq!(stub["isExternal"], true);
    assert_eq!(stub["package"], "external");
    assert_eq!(stub["metrics"]["lines"], 75);
    assert_eq!(stub["metrics"]["threatLevel"], "EXTERNAL");

    let packages = doc["packages"].as_array().unwrap();
    let external = packages
        .iter()
        .find(|p| p["path"] == "external")
        .expect("external package should exist");
    assert_eq!(external["name"], "External Libraries");
}

#[test]
fn test_stubs_follow_real_classes() {
    let doc = analyze_fixture();
    let classes = doc["classes"].as_array().unwrap();
    let first_external = classes.iter().position(|c| c["isExternal"] == true);
    let last_real = classes.iter().rposition(|c| c["isExternal"] == false);
    if let (Some(first), Some(last)) = (first_external, last_real) {
        assert!(first > last, "stubs must be appended after real classes");
    }
}

#[test]
fn test_excluded_and_unreadable_files_are_skipped() {
    let doc = analyze_fixture();
    let classes = doc["classes"].as_array().unwrap();

    // node_modules is pruned by the default excludes
    assert!(classes.iter().all(|c| {
        !c["filePath"]
            .as_str()
            .unwrap_or_default()
            .contains("node_modules")
    }));
    // README.md has no source extension
    assert!(classes.iter().all(|c| c["name"] != "README"));
    // mangled.ts is not valid UTF-8 and is skipped with a warning
    assert!(classes.iter().all(|c| c["filePath"] != "src/mangled.ts"));
}

#[test]
fn test_react_component_detection() {
    let doc = analyze_fixture();
    let card = class_by_name(&doc, "ProductCard");
    assert_eq!(card["isReactLike"], true);
    assert_eq!(card["package"], "src/components");

    let util = class_by_name(&doc, "formatPrice");
    assert_eq!(util["isReactLike"], false);
}

#[test]
fn test_sibling_test_detection() {
    let doc = analyze_fixture();
    let util = class_by_name(&doc, "formatPrice");
    assert_eq!(util["metrics"]["testExists"], true);

    let cart = class_by_name(&doc, "Cart");
    assert_eq!(cart["metrics"]["testExists"], false);
}

#[test]
fn test_package_classes_are_consistent() {
    let doc = analyze_fixture();
    let classes = doc["classes"].as_array().unwrap();
    for package in doc["packages"].as_array().unwrap() {
        for class_id in package["classes"].as_array().unwrap() {
            let class = classes
                .iter()
                .find(|c| &c["id"] == class_id)
                .expect("package references a missing class id");
            assert_eq!(class["package"], package["path"]);
        }
    }
}

#[test]
fn test_include_filter_narrows_analysis() {
    let output = skyline_cmd()
        .args([
            "analyze",
            &fixture_path(),
            "--stdout",
            "--compact",
            "--include",
            "src/models",
        ])
        .output()
        .expect("failed to run skyline analyze");
    assert!(output.status.success());

    let doc: serde_json::Value =
        serde_json::from_str(String::from_utf8_lossy(&output.stdout).trim()).unwrap();
    let real: Vec<&str> = doc["classes"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|c| c["isExternal"] == false)
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(real, vec!["Cart"]);
}

#[test]
fn test_writes_snapshot_file() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("snapshot.json");

    let output = skyline_cmd()
        .args(["analyze", &fixture_path(), "--output"])
        .arg(&out)
        .output()
        .expect("failed to run skyline analyze");
    assert!(output.status.success());

    let content = std::fs::read_to_string(&out).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(doc["version"], "6.0");
}

#[test]
fn test_analyze_nonexistent_path() {
    let output = skyline_cmd()
        .args(["analyze", "/nonexistent/path/that/does/not/exist"])
        .output()
        .expect("failed to run skyline");

    assert_eq!(output.status.code(), Some(2), "should exit 2 for error");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("does not exist"),
        "should show helpful error message: {stderr}"
    );
}

#[test]
fn test_init_creates_config() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let output = skyline_cmd()
        .args(["init"])
        .current_dir(dir.path())
        .output()
        .expect("failed to run skyline init");
    assert!(output.status.success(), "init should succeed");

    let config_path = dir.path().join(".skyline.toml");
    assert!(config_path.exists(), ".skyline.toml should be created");

    let content = std::fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("[scan]"), "should contain [scan] section");
    assert!(
        content.contains("node_modules"),
        "should carry default excludes"
    );
}

#[test]
fn test_init_refuses_overwrite() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    std::fs::write(dir.path().join(".skyline.toml"), "existing").unwrap();

    let output = skyline_cmd()
        .args(["init"])
        .current_dir(dir.path())
        .output()
        .expect("failed to run skyline init");
    assert!(!output.status.success(), "init should fail when file exists");
}
