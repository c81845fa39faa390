#![cfg(feature = "cli")]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn unique_temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "matnet-cli-{tag}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir
}

/// Binary frame with an `I` i16 [2, 2] array and a `gain` f32 scalar.
fn sample_frame() -> Vec<u8> {
    let header = b"BINARY_DATA\x1eI\x1fgain";
    let mut frame = Vec::new();
    frame.extend_from_slice(&0u32.to_le_bytes());
    frame.extend_from_slice(&(header.len() as i32).to_le_bytes());
    frame.extend_from_slice(header);

    frame.extend_from_slice(&2i32.to_le_bytes());
    frame.extend_from_slice(&2i32.to_le_bytes());
    frame.extend_from_slice(&2i32.to_le_bytes());
    frame.extend_from_slice(&2i32.to_le_bytes());
    for v in [1i16, 2, 3, 4] {
        frame.extend_from_slice(&v.to_le_bytes());
    }

    frame.extend_from_slice(&6i32.to_le_bytes());
    frame.extend_from_slice(&0i32.to_le_bytes());
    frame.extend_from_slice(&[0x00, 0x00, 0x80, 0x3F]);
    frame
}

fn write(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("capture file should be writable");
    path
}

fn matnet(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_matnet"))
        .args(["--log-level", "error"])
        .args(args)
        .output()
        .expect("matnet should run")
}

fn stdout_json_lines(output: &Output) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|line| serde_json::from_str(line).expect("stdout line should be json"))
        .collect()
}

#[test]
fn decodes_binary_frame_as_json() {
    let dir = unique_temp_dir("binary");
    let path = write(&dir, "frame.bin", &sample_frame());

    let output = matnet(&["--format", "json", "decode", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(0));

    let lines = stdout_json_lines(&output);
    assert_eq!(lines.len(), 1);
    let msg = &lines[0];
    assert_eq!(msg["ID"], "BINARY_DATA");
    assert_eq!(msg["known_id"], true);
    assert_eq!(msg["Payload"]["I"], serde_json::json!([[1, 2], [3, 4]]));
    assert_eq!(msg["Payload"]["gain"], serde_json::json!(1.0));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn decodes_json_text_frame() {
    let dir = unique_temp_dir("text");
    let path = write(
        &dir,
        "status.json",
        br#"{"ID":"GET_STATUS","Payload":{"status":"OK"}}"#,
    );

    let output = matnet(&["--format", "json", "decode", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(0));

    let lines = stdout_json_lines(&output);
    assert_eq!(lines[0]["ID"], "GET_STATUS");
    assert_eq!(lines[0]["Payload"], serde_json::json!({"status": "OK"}));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn truncated_frame_is_data_invalid() {
    let dir = unique_temp_dir("truncated");
    let mut frame = sample_frame();
    frame.pop();
    let path = write(&dir, "short.bin", &frame);

    let output = matnet(&["--format", "json", "decode", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(60));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("frame length mismatch"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn keep_going_decodes_remaining_frames() {
    let dir = unique_temp_dir("keep-going");
    let bad = write(&dir, "bad.json", b"{\"ID\":");
    let good = write(&dir, "good.bin", &sample_frame());

    let output = matnet(&[
        "--format",
        "json",
        "decode",
        "--keep-going",
        bad.to_str().unwrap(),
        good.to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(60));

    let lines = stdout_json_lines(&output);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["ID"], "BINARY_DATA");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn inspect_reports_field_layout() {
    let dir = unique_temp_dir("inspect");
    let frame = sample_frame();
    let path = write(&dir, "frame.bin", &frame);

    let output = matnet(&["--format", "json", "inspect", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(0));

    let lines = stdout_json_lines(&output);
    let summary = &lines[0];
    assert_eq!(summary["frame_bytes"], frame.len());
    assert_eq!(summary["fields"][0]["name"], "I");
    assert_eq!(summary["fields"][0]["element_type"], "i16");
    assert_eq!(summary["fields"][0]["shape"], serde_json::json!([2, 2]));
    assert_eq!(summary["fields"][0]["bytes"], 8);
    assert_eq!(summary["fields"][1]["kind"], "scalar");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn field_limit_flag_rejects_large_fields() {
    let dir = unique_temp_dir("limit");
    let path = write(&dir, "frame.bin", &sample_frame());

    let output = matnet(&[
        "decode",
        "--max-field-bytes",
        "4",
        path.to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(60));
    assert!(String::from_utf8_lossy(&output.stderr).contains("too large"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_file_fails() {
    let output = matnet(&["decode", "/nonexistent/matnet/frame.bin"]);
    assert_eq!(output.status.code(), Some(1));
}
