#![allow(missing_docs)]

use std::process::{Command, Output};

use serde_json::{Value, json};

#[test]
fn sig_command_prints_the_type_tree() {
	let output = run(&["sig", "a{sv}"]);
	assert!(output.status.success(), "sig command succeeds");

	let stdout = String::from_utf8_lossy(&output.stdout);
	assert!(stdout.contains("signature: a{sv}"), "stdout: {stdout}");
	assert!(stdout.contains("types: 1"), "stdout: {stdout}");
	assert!(stdout.contains("dict (a{sv})"), "stdout: {stdout}");
	assert!(stdout.contains("key: string"), "stdout: {stdout}");
	assert!(stdout.contains("value: variant"), "stdout: {stdout}");
}

#[test]
fn sig_command_json_mode_is_structured() {
	let json = run_json(&["sig", "a{sv}", "--json"]);
	assert_eq!(json["signature"], "a{sv}");
	assert_eq!(json["types"][0]["kind"], "dict");
	assert_eq!(json["types"][0]["children"][0]["kind"], "string");
	assert_eq!(json["types"][0]["children"][1]["kind"], "variant");
}

#[test]
fn forward_command_emits_wire_shaped_json() {
	let json = run_json(&["forward", "--sig", "a{si}", "--value", r#"{"a": 1, "b": 2}"#]);
	assert_eq!(json, json!([["a", 1], ["b", 2]]));
}

#[test]
fn forward_command_boxes_container_variant_payloads() {
	let json = run_json(&["forward", "--sig", "v", "--value", r#"{"type": "ai", "value": [1, 2]}"#]);
	assert_eq!(json, json!(["ai", [[1, 2]]]));
}

#[test]
fn reverse_command_emits_ergonomic_json() {
	let json = run_json(&["reverse", "--sig", "a{si}", "--value", r#"[["a", 1], ["b", 2]]"#]);
	assert_eq!(json, json!({"a": 1, "b": 2}));
}

#[test]
fn reverse_command_unwraps_variant_pairs() {
	let json = run_json(&["reverse", "--sig", "v", "--value", r#"["i", 7]"#]);
	assert_eq!(json, json!(7));
}

#[test]
fn reverse_command_reports_byte_range_violations() {
	let output = run(&["reverse", "--sig", "ay", "--value", "[0, 256]"]);
	assert!(!output.status.success(), "out-of-range byte fails");

	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("byte out of range"), "stderr: {stderr}");
}

#[test]
fn malformed_signature_is_reported_on_stderr() {
	let output = run(&["sig", "a{"]);
	assert!(!output.status.success(), "broken signature fails");

	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("unterminated dict entry"), "stderr: {stderr}");
}

fn run(args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_buscodec")).args(args).output().expect("command executes")
}

fn run_json(args: &[&str]) -> Value {
	let output = run(args);
	assert!(
		output.status.success(),
		"command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}
