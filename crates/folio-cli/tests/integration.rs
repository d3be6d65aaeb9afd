#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn folio(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("folio").unwrap();
    cmd.current_dir(dir.path())
        .env("FOLIO_ROOT", dir.path())
        .env_remove("RUST_LOG");
    cmd
}

fn init_site(dir: &TempDir) {
    folio(dir).args(["init", "--name", "Jane Doe"]).assert().success();
}

fn write_record(dir: &TempDir, slug: &str, priority: u32, tech: &str, industry: &str) {
    let yaml = format!(
        "slug: {slug}\ntitle: Project {slug}\npriority: {priority}\n\
         tech_stack: [{tech}]\nindustry: [{industry}]\n"
    );
    let path = dir.path().join("content/case-studies").join(format!("{slug}.yaml"));
    std::fs::write(path, yaml).unwrap();
}

/// Init plus seven more records, enough to need several pages.
fn seeded_site() -> TempDir {
    let dir = TempDir::new().unwrap();
    init_site(&dir);
    for i in 0..7 {
        let tech = if i % 2 == 0 { "React" } else { "Vue" };
        write_record(&dir, &format!("project-{i}"), 10 + i, tech, "Fintech");
    }
    dir
}

// ---------------------------------------------------------------------------
// folio init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_config_and_sample() {
    let dir = TempDir::new().unwrap();
    folio(&dir)
        .args(["init", "--name", "Jane Doe"])
        .assert()
        .success()
        .stdout(predicate::str::contains("created: folio.yaml"));

    assert!(dir.path().join("folio.yaml").exists());
    assert!(dir
        .path()
        .join("content/case-studies/sample-project.yaml")
        .exists());
}

#[test]
fn init_is_idempotent() {
    let dir = TempDir::new().unwrap();
    init_site(&dir);
    folio(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("exists:  folio.yaml"));

    let config = std::fs::read_to_string(dir.path().join("folio.yaml")).unwrap();
    assert!(config.contains("Jane Doe"));
}

// ---------------------------------------------------------------------------
// folio list / show / filters
// ---------------------------------------------------------------------------

#[test]
fn list_pages_through_the_whole_catalog() {
    let dir = seeded_site();
    let output = folio(&dir).args(["list", "--json"]).output().unwrap();
    assert!(output.status.success());

    let records: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let records = records.as_array().unwrap();
    // Sample plus seven seeded records, across two pages of six.
    assert_eq!(records.len(), 8);
    assert_eq!(records[0]["slug"], "sample-project");
    assert_eq!(records[7]["slug"], "project-6");
}

#[test]
fn list_filters_by_tech() {
    let dir = seeded_site();
    folio(&dir)
        .args(["list", "--tech", "Vue"])
        .assert()
        .success()
        .stdout(predicate::str::contains("project-1"))
        .stdout(predicate::str::contains("project-5"))
        .stdout(predicate::str::contains("project-0").not());
}

#[test]
fn list_filters_combine_facets() {
    let dir = seeded_site();
    folio(&dir)
        .args(["list", "--tech", "React,Vue", "--industry", "Software"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sample-project").not())
        .stdout(predicate::str::contains("No case studies match"));
}

#[test]
fn show_prints_a_record() {
    let dir = seeded_site();
    folio(&dir)
        .args(["show", "sample-project"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sample project"))
        .stdout(predicate::str::contains("technology: Rust"));
}

#[test]
fn show_unknown_slug_fails() {
    let dir = seeded_site();
    folio(&dir)
        .args(["show", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn filters_lists_distinct_values() {
    let dir = seeded_site();
    let output = folio(&dir).args(["filters", "--json"]).output().unwrap();
    assert!(output.status.success());
    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["tech_stack"], serde_json::json!(["React", "Rust", "Vue"]));
    assert_eq!(body["industry"], serde_json::json!(["Fintech", "Software"]));
}

#[test]
fn commands_fail_without_a_site() {
    let dir = TempDir::new().unwrap();
    folio(&dir)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("folio init"));
}

// ---------------------------------------------------------------------------
// folio config validate
// ---------------------------------------------------------------------------

#[test]
fn config_validate_passes_after_init() {
    let dir = TempDir::new().unwrap();
    init_site(&dir);
    folio(&dir)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config is valid"));
}

#[test]
fn config_validate_fails_on_errors() {
    let dir = TempDir::new().unwrap();
    init_site(&dir);
    let path = dir.path().join("folio.yaml");
    let config = std::fs::read_to_string(&path).unwrap();
    std::fs::write(&path, config.replace("page_size: 6", "page_size: 0")).unwrap();

    folio(&dir)
        .args(["config", "validate"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("[error] listing.page_size"));
}
