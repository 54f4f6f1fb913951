use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const CITIES: &str = r#"{
    "metadata": "Romanian cities",
    "records": [
        {"id": "buc", "latitude": 44.43, "longitude": 26.10, "title": "Bucharest", "images": ["./buc.jpg"]},
        {"id": "clj", "latitude": 46.77, "longitude": 23.59, "title": "Cluj-Napoca"},
        {"id": "tm", "latitude": 45.75, "longitude": 21.23, "title": "Timisoara"},
        {"latitude": 44.17, "longitude": 28.63, "title": "Constanta", "description": ["Port", "Black Sea"]}
    ]
}"#;

const GRID: &str = r#"[
    {"latitude": 0.0, "longitude": 0.0, "title": "Center"},
    {"latitude": 0.5, "longitude": 0.5, "title": "Near"},
    {"latitude": 5.0, "longitude": 5.0, "title": "Far"}
]"#;

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn poimap(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("poimap").unwrap();
    cmd.current_dir(dir.path()).env_remove("RUST_LOG").env_remove("POIMAP_CONFIG");
    cmd
}

fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn distance_prints_edit_distance() {
    let dir = TempDir::new().unwrap();
    let value = json_stdout(poimap(&dir).args(["--format", "json", "distance", "kitten", "sitting"]));

    assert_eq!(value["distance"], 3);
    assert_eq!(value["fuzzy_match"], false);
}

#[test]
fn cluster_radius_uses_breakpoints() {
    let dir = TempDir::new().unwrap();

    poimap(&dir)
        .args(["cluster-radius", "15000"])
        .assert()
        .success()
        .stdout("100\n");

    poimap(&dir)
        .args(["cluster-radius", "10"])
        .assert()
        .success()
        .stdout("40\n");
}

#[test]
fn search_finds_misspelled_city() {
    let dir = TempDir::new().unwrap();
    let dataset = write(dir.path(), "cities.json", CITIES);

    let value = json_stdout(poimap(&dir).arg("--format").arg("json").arg("search").arg(&dataset).arg("buchrest"));

    assert_eq!(value["total"], 4);
    assert_eq!(value["matched"], 1);
    assert_eq!(value["records"][0]["title"], "Bucharest");
}

#[test]
fn search_exact_disables_fuzzy_fallback() {
    let dir = TempDir::new().unwrap();
    let dataset = write(dir.path(), "cities.json", CITIES);

    let value = json_stdout(
        poimap(&dir)
            .args(["--format", "json", "search", "--exact"])
            .arg(&dataset)
            .arg("buchrest"),
    );

    assert_eq!(value["matched"], 0);
}

#[test]
fn search_text_output_lists_titles() {
    let dir = TempDir::new().unwrap();
    let dataset = write(dir.path(), "cities.json", CITIES);

    poimap(&dir)
        .arg("search")
        .arg(&dataset)
        .arg("black sea")
        .assert()
        .success()
        .stdout(predicate::str::contains("Constanta"))
        .stdout(predicate::str::contains("id_3"))
        .stdout(predicate::str::contains("Timisoara").not());
}

#[test]
fn viewport_accepts_negative_edges() {
    let dir = TempDir::new().unwrap();
    let dataset = write(dir.path(), "grid.json", GRID);

    let value = json_stdout(
        poimap(&dir)
            .args(["--format", "json", "viewport"])
            .arg(&dataset)
            .args(["--south", "-1", "--west", "-1", "--north", "1", "--east", "1", "--zoom", "10"]),
    );

    assert_eq!(value["visible"], 2);
    assert_eq!(value["capacity"], 1000);
    assert_eq!(value["records"][0]["title"], "Center");
    assert_eq!(value["records"][1]["title"], "Near");
}

#[test]
fn viewport_rejects_inverted_bounds() {
    let dir = TempDir::new().unwrap();
    let dataset = write(dir.path(), "grid.json", GRID);

    poimap(&dir)
        .arg("viewport")
        .arg(&dataset)
        .args(["--south", "1", "--west", "-1", "--north", "-1", "--east", "1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("E6001"));
}

#[test]
fn view_without_bounds_shows_everything() {
    let dir = TempDir::new().unwrap();
    let dataset = write(dir.path(), "cities.json", CITIES);

    let value = json_stdout(poimap(&dir).args(["--format", "json", "view"]).arg(&dataset));

    assert_eq!(value["mode"], "all");
    assert_eq!(value["total"], 4);
    assert_eq!(value["records"].as_array().unwrap().len(), 4);
    assert!(value["bounds"]["south"].as_f64().unwrap() < 44.17);
}

#[test]
fn view_uses_config_file_policy() {
    let dir = TempDir::new().unwrap();
    let dataset = write(dir.path(), "grid.json", GRID);
    let config = write(
        dir.path(),
        "poimap.toml",
        "[viewer]\nis_aggressive_optimization_enabled = true\n\n[viewport]\nbase_capacity = 1\nzoom_factor = 1.0\n",
    );

    let value = json_stdout(
        poimap(&dir)
            .arg("--config")
            .arg(&config)
            .args(["--format", "json", "view", "--bounds", "-1,-1,1,1", "--zoom", "12"])
            .arg(&dataset),
    );

    assert_eq!(value["mode"], "reduced");
    assert_eq!(value["records"].as_array().unwrap().len(), 1);
    assert_eq!(value["records"][0]["title"], "Center");
    assert_eq!(value["matched"], 3);
}

#[test]
fn base_url_resolves_relative_images() {
    let dir = TempDir::new().unwrap();
    let dataset = write(dir.path(), "cities.json", CITIES);

    let value = json_stdout(
        poimap(&dir)
            .args(["--format", "json", "search"])
            .arg(&dataset)
            .arg("bucharest")
            .args(["--base-url", "https://maps.example.org/ro/cities.json"]),
    );

    assert_eq!(value["records"][0]["images"][0], "https://maps.example.org/ro/buc.jpg");
}

#[test]
fn base_url_must_pass_source_policy() {
    let dir = TempDir::new().unwrap();
    let dataset = write(dir.path(), "cities.json", CITIES);

    poimap(&dir)
        .arg("search")
        .arg(&dataset)
        .arg("cluj")
        .args(["--base-url", "ftp://maps.example.org/cities.json"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("E5001"));
}

#[test]
fn missing_dataset_fails() {
    let dir = TempDir::new().unwrap();

    poimap(&dir)
        .args(["search", "absent.json", "cluj"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E2001"));
}

#[test]
fn invalid_dataset_fails() {
    let dir = TempDir::new().unwrap();
    let dataset = write(dir.path(), "bad.json", r#"{"items": []}"#);

    poimap(&dir)
        .arg("search")
        .arg(&dataset)
        .arg("cluj")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("E4001"));
}

#[test]
fn invalid_dataset_overrides_fail() {
    let dir = TempDir::new().unwrap();
    let dataset = write(
        dir.path(),
        "padded.json",
        r#"{"records": [{"latitude": 45.0, "longitude": 27.0, "title": "Braila"}], "config": {"boundsPadding": -2}}"#,
    );

    poimap(&dir)
        .arg("view")
        .arg(&dataset)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("E3003"));
}

#[test]
fn missing_config_file_fails() {
    let dir = TempDir::new().unwrap();

    poimap(&dir)
        .args(["--config", "missing.toml", "config"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("E3001"));
}

#[test]
fn config_picks_up_local_file() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), ".poimap.toml", "[cache]\nfilter_cache_capacity = 7\n");

    let value = json_stdout(poimap(&dir).args(["--format", "json", "config"]));

    assert_eq!(value["cache"]["filter_cache_capacity"], 7);
    assert_eq!(value["viewer"]["type_of_icon"], "default");
}

#[test]
fn config_text_output_is_toml() {
    let dir = TempDir::new().unwrap();

    poimap(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("[viewer]"))
        .stdout(predicate::str::contains("bounds_padding = 0.6"));
}
