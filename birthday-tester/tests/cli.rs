use std::process::Command;

fn tester() -> Command {
    Command::new(env!("CARGO_BIN_EXE_birthday-tester"))
}

#[test]
fn cli_list_scenarios_writes_output() {
    let dir = tempfile::tempdir().expect("temp dir");
    let output_path = dir.path().join("list.txt");
    let status = tester()
        .args(["--list-scenarios", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Available scenarios"));
    assert!(content.contains("transition-ordering"));
}

#[test]
fn cli_logic_run_writes_json_report() {
    let dir = tempfile::tempdir().expect("temp dir");
    let output_path = dir.path().join("report.json");
    let output = tester()
        .args([
            "--report",
            "json",
            "--scenarios",
            "full-playthrough,math-challenge",
            "--iterations",
            "2",
            "--seeds",
            "1,99",
            "--output",
        ])
        .arg(&output_path)
        .output()
        .expect("run cli");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Birthday Adventure Automated Tester"));

    let content = std::fs::read_to_string(output_path).expect("read report");
    let report: serde_json::Value = serde_json::from_str(&content).expect("json report");
    let scenarios = report["scenarios"].as_array().expect("scenario list");
    assert_eq!(scenarios.len(), 4);
    assert!(scenarios.iter().all(|s| s["passed"] == true));
}

#[test]
fn cli_strict_asset_audit_fails_on_missing_media() {
    let media = tempfile::tempdir().expect("temp dir");
    std::fs::create_dir_all(media.path().join("characters")).expect("mkdir");
    std::fs::write(media.path().join("characters/yuval_flash.mp4"), b"clip").expect("write");

    let lenient = tester()
        .args(["--mode", "assets", "--asset-root"])
        .arg(media.path())
        .output()
        .expect("run cli");
    assert!(lenient.status.success());
    let stdout = String::from_utf8_lossy(&lenient.stdout);
    assert!(stdout.contains("Asset Audit"));

    let strict = tester()
        .args(["--mode", "assets", "--strict-assets", "--asset-root"])
        .arg(media.path())
        .status()
        .expect("run cli");
    assert_eq!(strict.code(), Some(1));
}

#[test]
fn cli_rejects_a_missing_asset_root() {
    let dir = tempfile::tempdir().expect("temp dir");
    let status = tester()
        .args(["--mode", "assets", "--asset-root"])
        .arg(dir.path().join("absent"))
        .status()
        .expect("run cli");
    assert!(!status.success());
}
