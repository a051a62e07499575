use serde_json::json;
use tagval::proto::{Node, Record, StructBuilder};

use crate::cmd::json::{node_from_json, node_value, parse_node};
use crate::error::CliError;

#[test]
fn parses_base_struct_description() {
	let node = parse_node(
		r#"{
			"name": "Base",
			"type": "struct",
			"value": [
				{"name": "x", "type": "int32", "value": 555},
				{"name": "y", "type": "string", "value": "meme string"},
				{"name": "z", "type": "array", "element": "int32", "value": [13, 14, 88]}
			]
		}"#,
	)
	.expect("description parses");

	let record = node.get::<Record>().expect("struct payload");
	assert_eq!(node.name(), "Base");
	assert_eq!(*record.field::<i32>("x").expect("x"), 555);
	assert_eq!(record.field::<String>("y").expect("y"), "meme string");
	assert_eq!(record.field::<Vec<i32>>("z").expect("z"), &[13, 14, 88]);
}

#[test]
fn rendered_json_parses_back_to_same_node() {
	let element = Record::from_nodes(vec![Node::uint64("id", 9), Node::blob("raw", vec![0xDE_u8, 0xAD])]);
	let mut builder = StructBuilder::new();
	builder
		.push("ratio", 0.5)
		.add(Node::array("items", vec![element]))
		.add(Node::array("names", vec!["a".to_owned(), "b".to_owned()]));
	let node = builder.get("root").expect("builder finalizes");

	let rendered = node_value(&node);
	assert_eq!(rendered["type"], "struct");
	assert_eq!(rendered["value"][1]["element"], "struct");
	assert_eq!(rendered["value"][1]["value"][0][1]["value"], "dead");

	let parsed = node_from_json(serde_json::from_value(rendered).expect("rendered json has node shape")).expect("rendered json parses");
	assert_eq!(parsed, node);
}

#[test]
fn rejects_out_of_range_int32() {
	let err = parse_node(r#"{"name": "x", "type": "int32", "value": 4294967296}"#).expect_err("too wide for int32");
	assert!(matches!(err, CliError::InvalidValue { kind: "int32", .. }));
}

#[test]
fn rejects_unknown_type_label() {
	let err = parse_node(r#"{"type": "int128", "value": 1}"#).expect_err("no such type");
	assert!(matches!(err, CliError::UnknownType { ref label } if label == "int128"));
}

#[test]
fn rejects_nested_array_element() {
	let input = json!({"name": "a", "type": "array", "element": "array", "value": []});
	let err = node_from_json(serde_json::from_value(input).expect("node shape")).expect_err("arrays of arrays unsupported");
	assert!(matches!(err, CliError::Proto(_)));
}

#[test]
fn array_without_element_type_is_invalid() {
	let err = parse_node(r#"{"name": "a", "type": "array", "value": [1]}"#).expect_err("element type required");
	assert!(matches!(err, CliError::InvalidValue { kind: "array", .. }));
}

#[test]
fn blob_requires_hex() {
	let node = parse_node(r#"{"name": "b", "type": "blob", "value": "00ff"}"#).expect("hex parses");
	assert_eq!(node.get::<Vec<u8>>().expect("blob payload"), &[0x00, 0xFF]);

	let err = parse_node(r#"{"name": "b", "type": "blob", "value": "xyz"}"#).expect_err("not hex");
	assert!(matches!(err, CliError::InvalidValue { kind: "blob", .. }));
}
