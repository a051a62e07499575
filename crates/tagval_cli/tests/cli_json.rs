#![allow(missing_docs)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tagval_testkit::{scratch_dir, stdout_json};

const BASE_JSON: &str = r#"{
	"name": "Base",
	"type": "struct",
	"value": [
		{"name": "x", "type": "int32", "value": 555},
		{"name": "y", "type": "string", "value": "meme string"},
		{"name": "z", "type": "array", "element": "int32", "value": [13, 14, 88]},
		{"name": "raw", "type": "blob", "value": "c0ffee"}
	]
}"#;

#[test]
fn encode_then_inspect_json_round_trips() {
	let dir = scratch_dir("encode_then_inspect_json_round_trips");
	let encoded = encode_base(&dir, &[]);

	let json = stdout_json(&run(&["inspect", &path_arg(&encoded), "--json"]));
	assert_eq!(json["bytes"], fs::metadata(&encoded).expect("encoded file exists").len());
	let root = &json["root"];
	assert_eq!(root["name"], "Base");
	assert_eq!(root["type"], "struct");
	assert_eq!(root["value"][0]["value"], 555);
	assert_eq!(root["value"][1]["value"], "meme string");
	assert_eq!(root["value"][2]["element"], "int32");
	assert_eq!(root["value"][2]["value"], serde_json::json!([13, 14, 88]));
	assert_eq!(root["value"][3]["value"], "c0ffee");
}

#[test]
fn inspect_text_prints_tree() {
	let dir = scratch_dir("inspect_text_prints_tree");
	let encoded = encode_base(&dir, &[]);

	let output = run(&["inspect", &path_arg(&encoded)]);
	assert!(output.status.success(), "inspect should succeed");
	let stdout = String::from_utf8_lossy(&output.stdout);
	assert!(stdout.contains("Base: struct {"), "{stdout}");
	assert!(stdout.contains("  x: int32 = 555"), "{stdout}");
	assert!(stdout.contains("  z: array<int32>[3] = [13, 14, 88]"), "{stdout}");
}

#[test]
fn info_json_counts_kinds() {
	let dir = scratch_dir("info_json_counts_kinds");
	let encoded = encode_base(&dir, &[]);

	let json = stdout_json(&run(&["info", &path_arg(&encoded), "--json"]));
	assert_eq!(json["root_kind"], "struct");
	assert_eq!(json["root_name"], "Base");
	assert_eq!(json["node_count"], 5);
	assert_eq!(json["max_depth"], 1);
	assert_eq!(json["kinds"]["array<int32>"], 1);
}

#[test]
fn wire_flags_must_match_between_encode_and_inspect() {
	let dir = scratch_dir("wire_flags_must_match_between_encode_and_inspect");
	let encoded = encode_base(&dir, &["--big-endian", "--string-len", "u32"]);

	let json = stdout_json(&run(&["--big-endian", "--string-len", "u32", "inspect", &path_arg(&encoded), "--json"]));
	assert_eq!(json["root"]["name"], "Base");

	let output = run(&["inspect", &path_arg(&encoded)]);
	assert!(!output.status.success(), "default wire settings should not decode big-endian input");
}

#[test]
fn garbage_input_fails_with_error_message() {
	let dir = scratch_dir("garbage_input_fails_with_error_message");
	let garbage = dir.join("garbage.bin");
	fs::write(&garbage, [0xEE_u8, 0, 0]).expect("garbage writes");

	let output = run(&["inspect", &path_arg(&garbage)]);
	assert_eq!(output.status.code(), Some(1));
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("error: unknown type tag 238"), "{stderr}");
}

#[test]
fn strict_limits_reject_large_counts() {
	let dir = scratch_dir("strict_limits_reject_large_counts");
	let encoded = encode_base(&dir, &[]);

	let output = run(&["inspect", &path_arg(&encoded), "--max-count", "2"]);
	assert!(!output.status.success(), "four fields exceed a count limit of two");
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("count too large"), "{stderr}");
}

fn encode_base(dir: &Path, wire: &[&str]) -> PathBuf {
	let input = dir.join("base.json");
	let encoded = dir.join("base.bin");
	fs::write(&input, BASE_JSON).expect("json writes");

	let mut args: Vec<String> = wire.iter().map(|arg| (*arg).to_owned()).collect();
	args.extend(["encode".to_owned(), path_arg(&input), "-o".to_owned(), path_arg(&encoded)]);
	let args: Vec<&str> = args.iter().map(String::as_str).collect();
	let output = run(&args);
	assert!(
		output.status.success(),
		"encode failed: {}",
		String::from_utf8_lossy(&output.stderr)
	);
	encoded
}

fn run(args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_tagval")).args(args).output().expect("command executes")
}

fn path_arg(path: &Path) -> String {
	path.display().to_string()
}
