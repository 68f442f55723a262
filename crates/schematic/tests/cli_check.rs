#![cfg(feature = "cli")]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

fn unique_temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "schematic-cli-{tag}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir
}

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("file should be writable");
    path
}

fn schematic(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_schematic"))
        .args(["--log-level", "error", "--format", "json"])
        .args(args)
        .output()
        .expect("schematic should run")
}

fn json_lines(output: &Output) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|line| serde_json::from_str(line).expect("stdout line should be JSON"))
        .collect()
}

#[test]
fn check_accepts_matching_payloads() {
    let dir = unique_temp_dir("accept");
    let shape = write(&dir, "shape.json", r#"{"id": 0, "name": "", "inner": {"x": 0}}"#);
    let payload = write(&dir, "ok.json", r#"{"inner": {"x": 3}, "name": "n", "id": 1}"#);

    let output = schematic(&[
        "check",
        "--shape",
        shape.to_str().unwrap(),
        payload.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(0));
    let rows = json_lines(&output);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["valid"], true);
    assert!(rows[0]["reason"].is_null());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn check_rejects_and_exits_60() {
    let dir = unique_temp_dir("reject");
    let shape = write(&dir, "shape.json", r#"{"A": 0, "B": ""}"#);
    let ok = write(&dir, "ok.json", r#"{"A": 1, "B": "x"}"#);
    let missing = write(&dir, "missing.json", r#"{"A": 1}"#);
    let extra = write(&dir, "extra.json", r#"{"A": 1, "B": "x", "C": true}"#);

    let output = schematic(&[
        "check",
        "--shape",
        shape.to_str().unwrap(),
        ok.to_str().unwrap(),
        missing.to_str().unwrap(),
        extra.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(60));
    let rows = json_lines(&output);
    let verdicts: Vec<bool> = rows
        .iter()
        .map(|row| row["valid"].as_bool().unwrap())
        .collect();
    assert_eq!(verdicts, vec![true, false, false]);
    assert!(rows[1]["reason"].as_str().unwrap().contains("missing key at /B"));
    assert!(rows[2]["reason"].as_str().unwrap().contains("unknown key at /C"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn check_reads_payload_from_stdin() {
    let dir = unique_temp_dir("stdin");
    let shape = write(&dir, "shape.json", r#"{"flag": false}"#);

    let mut child = Command::new(env!("CARGO_BIN_EXE_schematic"))
        .args(["--log-level", "error", "--format", "json", "check", "--shape"])
        .arg(&shape)
        .arg("-")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("schematic should start");
    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(br#"{"flag": "yes"}"#)
        .expect("stdin should be writable");
    let output = child.wait_with_output().expect("schematic should finish");

    assert_eq!(output.status.code(), Some(60));
    let rows = json_lines(&output);
    assert_eq!(rows[0]["source"], "-");
    assert!(rows[0]["reason"]
        .as_str()
        .unwrap()
        .contains("expected boolean, found string"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn invalid_shape_exits_60() {
    let dir = unique_temp_dir("bad-shape");
    let shape = write(&dir, "shape.json", "[1, 2]");
    let payload = write(&dir, "p.json", "{}");

    let output = schematic(&[
        "check",
        "--shape",
        shape.to_str().unwrap(),
        payload.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(60));
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid shape"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_shape_exits_64() {
    let output = schematic(&["check", "--shape", "/nonexistent/shape.json", "-"]);
    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn export_prints_strict_json_schema() {
    let dir = unique_temp_dir("export");
    let shape = write(&dir, "shape.json", r#"{"id": 0, "inner": {"x": ""}}"#);

    let output = schematic(&["export", "--shape", shape.to_str().unwrap()]);

    assert!(output.status.success());
    let document: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("export should print JSON");
    assert_eq!(document["additionalProperties"], false);
    assert_eq!(document["required"], serde_json::json!(["id", "inner"]));
    assert_eq!(document["properties"]["inner"]["properties"]["x"]["type"], "string");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn version_prints_package_version() {
    let output = schematic(&["version"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        format!("schematic {}", env!("CARGO_PKG_VERSION"))
    );
}
