use serde::Deserialize;
use serde_json::{Value as JsonValue, json};
use tagval::proto::{Array, Node, Record, TypeTag, Value};

use crate::error::{CliError, Result};

/// Input form of one node.
///
/// Struct values and struct array elements are lists of child nodes in this
/// same form. Blobs are hex strings.
#[derive(Debug, Deserialize)]
pub struct NodeJson {
	#[serde(default)]
	pub name: String,
	#[serde(rename = "type")]
	pub kind: String,
	#[serde(default)]
	pub element: Option<String>,
	pub value: JsonValue,
}

/// Render a node in the same shape [`NodeJson`] accepts.
pub fn node_value(node: &Node) -> JsonValue {
	let mut out = json!({
		"name": node.name(),
		"type": node.kind().as_str(),
	});
	if let Value::Array(array) = node.value() {
		out["element"] = json!(array.element_kind().as_str());
	}
	out["value"] = payload_value(node.value());
	out
}

fn payload_value(value: &Value) -> JsonValue {
	match value {
		Value::Int32(v) => json!(v),
		Value::Uint64(v) => json!(v),
		Value::Float64(v) => json!(v),
		Value::String(v) => json!(v),
		Value::Blob(blob) => json!(hex::encode(blob.as_slice())),
		Value::Array(Array::Int32(items)) => json!(items),
		Value::Array(Array::Uint64(items)) => json!(items),
		Value::Array(Array::Float64(items)) => json!(items),
		Value::Array(Array::String(items)) => json!(items),
		Value::Array(Array::Struct(items)) => JsonValue::Array(items.iter().map(record_value).collect()),
		Value::Struct(record) => record_value(record),
	}
}

fn record_value(record: &Record) -> JsonValue {
	JsonValue::Array(record.iter().map(node_value).collect())
}

/// Parse JSON text into a node.
pub fn parse_node(text: &str) -> Result<Node> {
	let input: NodeJson = serde_json::from_str(text)?;
	node_from_json(input)
}

/// Build a node from its JSON description.
pub fn node_from_json(input: NodeJson) -> Result<Node> {
	let NodeJson { name, kind, element, value } = input;
	let kind = parse_kind(&kind)?;

	let payload = match kind {
		TypeTag::Int32 => Value::Int32(to_i32(&name, &value)?),
		TypeTag::Uint64 => Value::Uint64(to_u64(&name, &value)?),
		TypeTag::Float64 => Value::Float64(to_f64(&name, &value)?),
		TypeTag::String => Value::String(to_string(&name, TypeTag::String, &value)?),
		TypeTag::Blob => {
			let text = to_string(&name, TypeTag::Blob, &value)?;
			let bytes = hex::decode(&text).map_err(|err| invalid(&name, TypeTag::Blob, err.to_string()))?;
			Value::Blob(bytes.into())
		}
		TypeTag::Struct => Value::Struct(record_from_json(&name, value)?),
		TypeTag::Array => {
			let element = element.ok_or_else(|| invalid(&name, TypeTag::Array, "missing \"element\" type".to_owned()))?;
			let element = parse_kind(&element)?;
			Value::Array(array_from_json(&name, element, value)?)
		}
		TypeTag::File => return Err(invalid(&name, TypeTag::File, "reserved kind has no value form".to_owned())),
	};

	Ok(Node::new(name, payload))
}

fn record_from_json(name: &str, value: JsonValue) -> Result<Record> {
	let JsonValue::Array(items) = value else {
		return Err(invalid(name, TypeTag::Struct, "expected a list of child nodes".to_owned()));
	};

	items
		.into_iter()
		.map(|item| node_from_json(serde_json::from_value(item)?))
		.collect::<Result<Vec<_>>>()
		.map(Record::from_nodes)
}

fn array_from_json(name: &str, element: TypeTag, value: JsonValue) -> Result<Array> {
	let JsonValue::Array(items) = value else {
		return Err(invalid(name, TypeTag::Array, "expected a list of elements".to_owned()));
	};

	let mut array = Array::empty(element)?;
	match &mut array {
		Array::Int32(out) => {
			for item in &items {
				out.push(to_i32(name, item)?);
			}
		}
		Array::Uint64(out) => {
			for item in &items {
				out.push(to_u64(name, item)?);
			}
		}
		Array::Float64(out) => {
			for item in &items {
				out.push(to_f64(name, item)?);
			}
		}
		Array::String(out) => {
			for item in &items {
				out.push(to_string(name, TypeTag::String, item)?);
			}
		}
		Array::Struct(out) => {
			for item in items {
				out.push(record_from_json(name, item)?);
			}
		}
	}
	Ok(array)
}

fn parse_kind(label: &str) -> Result<TypeTag> {
	TypeTag::from_name(label).ok_or_else(|| CliError::UnknownType { label: label.to_owned() })
}

fn to_i32(name: &str, value: &JsonValue) -> Result<i32> {
	value
		.as_i64()
		.and_then(|wide| i32::try_from(wide).ok())
		.ok_or_else(|| invalid(name, TypeTag::Int32, format!("{value} is not a 32-bit signed integer")))
}

fn to_u64(name: &str, value: &JsonValue) -> Result<u64> {
	value
		.as_u64()
		.ok_or_else(|| invalid(name, TypeTag::Uint64, format!("{value} is not a 64-bit unsigned integer")))
}

fn to_f64(name: &str, value: &JsonValue) -> Result<f64> {
	value
		.as_f64()
		.ok_or_else(|| invalid(name, TypeTag::Float64, format!("{value} is not a number")))
}

fn to_string(name: &str, kind: TypeTag, value: &JsonValue) -> Result<String> {
	value
		.as_str()
		.map(str::to_owned)
		.ok_or_else(|| invalid(name, kind, format!("{value} is not a string")))
}

fn invalid(name: &str, kind: TypeTag, reason: String) -> CliError {
	CliError::InvalidValue {
		name: name.to_owned(),
		kind: kind.as_str(),
		reason,
	}
}

#[cfg(test)]
mod tests;
