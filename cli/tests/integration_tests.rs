use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

const BIN: &str = env!("CARGO_BIN_EXE_gcode-catalog");

fn fixture_page() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("parser")
        .join("tests")
        .join("fixtures")
        .join("klipper-g-codes.html")
}

fn run(args: &[&str]) -> Output {
    Command::new(BIN)
        .args(args)
        .output()
        .expect("failed to run gcode-catalog")
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

fn stdout_json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

#[test]
fn sources_lists_klipper() {
    let output = run(&["sources"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("klipper\tKlipper\thttps://www.klipper3d.org/G-Codes.html"));
}

#[test]
fn parse_file_emits_catalog_json() {
    let page = fixture_page();
    let catalog = stdout_json(&run(&["parse-file", "--input", path_str(&page)]));

    let object = catalog.as_object().unwrap();
    assert_eq!(object.len(), 10);
    assert_eq!(catalog["G28"][0]["title"], "Move to origin");
    assert_eq!(
        catalog["SET_FAN_SPEED"][0]["url"],
        "https://www.klipper3d.org/G-Codes.html#set_fan_speed"
    );
    assert_eq!(catalog["M104"][0]["parameters"][1]["label"], "[S<temperature>]");
}

#[test]
fn parse_file_table_format() {
    let page = fixture_page();
    let output = run(&["parse-file", "--input", path_str(&page), "--format", "table"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Commands: 10  Records: 10"));
    assert!(stdout.contains("TURN_OFF_HEATERS"));
}

#[test]
fn parse_stdin_reads_page() {
    let mut child = Command::new(BIN)
        .args(["parse-stdin", "--source", "klipper"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn gcode-catalog");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"<h2 id=\"misc\">Misc</h2><ul><li><code>M400</code></li></ul>")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    let catalog = stdout_json(&output);
    assert_eq!(
        catalog["M400"][0]["url"],
        "https://www.klipper3d.org/G-Codes.html#misc"
    );
}

#[test]
fn parse_file_unknown_source_fails() {
    let page = fixture_page();
    let output = run(&["parse-file", "--source", "marlin", "--input", path_str(&page)]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error:"), "stderr: {stderr}");
    assert!(stderr.contains("marlin"), "stderr: {stderr}");
}

#[test]
fn parse_file_missing_input_fails() {
    let output = run(&["parse-file", "--input", "/nonexistent/g-codes.html"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read"));
}

// ---------------------------------------------------------------------------
// Snapshot store
// ---------------------------------------------------------------------------

#[test]
fn import_then_build_uses_latest_snapshot() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("docs");
    let page = fixture_page();

    let import = run(&[
        "import",
        "--input",
        path_str(&page),
        "--snapshot-root",
        path_str(&root),
    ]);
    assert!(import.status.success(), "{}", String::from_utf8_lossy(&import.stderr));

    let out = tmp.path().join("out").join("catalog.json");
    let build = run(&[
        "build",
        "--snapshot-root",
        path_str(&root),
        "--output",
        path_str(&out),
    ]);
    assert!(build.status.success(), "{}", String::from_utf8_lossy(&build.stderr));

    let catalog: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(catalog.as_object().unwrap().len(), 10);
}

#[test]
fn build_reads_yaml_config() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("snapshots");
    let snapshot = root.join("20240115T103000Z");
    fs::create_dir_all(&snapshot).unwrap();
    fs::write(
        snapshot.join("g-codes.html"),
        "<ul><li><code>G4 P&lt;ms&gt;</code></li><li><code>G4 [S]</code></li></ul>",
    )
    .unwrap();

    let config = tmp.path().join("catalog.yml");
    fs::write(
        &config,
        format!(
            "version: \"1.0\"\nsources: [klipper]\nsnapshot_root: {}\nduplicates: accumulate\n",
            root.display()
        ),
    )
    .unwrap();

    let catalog = stdout_json(&run(&["build", "--config", path_str(&config)]));
    assert_eq!(catalog["G4"].as_array().unwrap().len(), 2);
}

#[test]
fn build_without_snapshots_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let output = run(&["build", "--snapshot-root", path_str(&tmp.path().join("empty"))]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("klipper"));
}

// ---------------------------------------------------------------------------
// Bundle and validate
// ---------------------------------------------------------------------------

#[test]
fn bundle_writes_hashed_package_that_validates() {
    let tmp = tempfile::tempdir().unwrap();
    let extra = tmp.path().join("extra.html");
    fs::write(
        &extra,
        "<h2 id=\"probe\">Probe</h2><ul><li><code>PROBE [SAMPLES=&lt;count&gt;]</code>: Probe once.</li></ul>",
    )
    .unwrap();
    let package_path = tmp.path().join("package.json");
    let page = fixture_page();

    let output = run(&[
        "bundle",
        "--output",
        path_str(&package_path),
        "--name",
        "klipper-gcodes",
        path_str(&page),
        path_str(&extra),
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let package: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&package_path).unwrap()).unwrap();
    assert_eq!(package["name"], "klipper-gcodes");
    assert_eq!(package["sources"][0]["id"], "klipper");
    assert_eq!(package["catalog"].as_object().unwrap().len(), 11);
    assert_eq!(package["bundle_hash"].as_str().unwrap().len(), 64);

    let validate = run(&["validate", path_str(&package_path)]);
    assert!(validate.status.success(), "{}", String::from_utf8_lossy(&validate.stderr));
    assert!(String::from_utf8_lossy(&validate.stdout).contains("11 command(s)"));
}

#[test]
fn validate_rejects_tampered_package() {
    let tmp = tempfile::tempdir().unwrap();
    let package_path = tmp.path().join("package.json");
    let page = fixture_page();

    let bundle = run(&["bundle", "--output", path_str(&package_path), path_str(&page)]);
    assert!(bundle.status.success());

    let mut package: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&package_path).unwrap()).unwrap();
    package["catalog"]["G28"][0]["title"] = serde_json::json!("Home all axes");
    fs::write(&package_path, serde_json::to_string_pretty(&package).unwrap()).unwrap();

    let output = run(&["validate", path_str(&package_path)]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("validation error"));
}

#[test]
fn validate_reports_record_errors_in_catalog() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("catalog.json");
    let catalog = serde_json::json!({
        "G28": [{
            "title": "Home",
            "brief": "",
            "codes": ["G29"],
            "related": [],
            "parameters": [],
            "source": "Klipper",
            "url": "https://www.klipper3d.org/G-Codes.html#homing"
        }]
    });
    fs::write(&path, serde_json::to_string_pretty(&catalog).unwrap()).unwrap();

    let output = run(&["validate", path_str(&path)]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("G28"));
}
