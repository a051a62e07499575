use std::fmt::Write as _;

use tagval::proto::{Array, Node, Record, Value};

/// Output truncation and formatting limits for value trees.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
	/// Maximum number of fields printed for a single struct.
	pub max_fields_per_struct: usize,
	/// Maximum number of Unicode scalar values printed for strings.
	pub max_string_len: usize,
	/// Maximum number of elements printed for arrays.
	pub max_array_items: usize,
	/// Maximum number of blob bytes printed as hex.
	pub max_blob_bytes: usize,
	/// Maximum recursive print depth for nested arrays/structs.
	pub max_print_depth: u32,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_fields_per_struct: 80,
			max_string_len: 200,
			max_array_items: 16,
			max_blob_bytes: 32,
			max_print_depth: 6,
		}
	}
}

/// Render `node` and its descendants as indented text, one line per scalar.
pub fn render_node(node: &Node, options: PrintOptions) -> String {
	let mut out = String::new();
	write_node(&mut out, node, 0, 0, options);
	out
}

fn write_node(out: &mut String, node: &Node, indent: usize, depth: u32, options: PrintOptions) {
	let pad = " ".repeat(indent);
	let label = node.value().label();
	let name = if node.name().is_empty() { "_" } else { node.name() };

	match node.value() {
		Value::Struct(record) => {
			let _ = writeln!(out, "{pad}{name}: {label} {{");
			write_record_body(out, record, indent + 2, depth + 1, options);
			let _ = writeln!(out, "{pad}}}");
		}
		Value::Array(Array::Struct(items)) => {
			let _ = writeln!(out, "{pad}{name}: {label}[{}] [", items.len());
			write_struct_items(out, items, indent + 2, depth + 1, options);
			let _ = writeln!(out, "{pad}]");
		}
		Value::Array(array) => {
			let _ = writeln!(out, "{pad}{name}: {label}[{}] = {}", array.len(), trivial_items(array, options));
		}
		scalar => {
			let _ = writeln!(out, "{pad}{name}: {label} = {}", scalar_text(scalar, options));
		}
	}
}

fn write_record_body(out: &mut String, record: &Record, indent: usize, depth: u32, options: PrintOptions) {
	let pad = " ".repeat(indent);
	if depth > options.max_print_depth {
		let _ = writeln!(out, "{pad}... {} fields", record.len());
		return;
	}

	for field in record.iter().take(options.max_fields_per_struct) {
		write_node(out, field, indent, depth, options);
	}
	if record.len() > options.max_fields_per_struct {
		let _ = writeln!(out, "{pad}... {} more fields", record.len() - options.max_fields_per_struct);
	}
}

fn write_struct_items(out: &mut String, items: &[Record], indent: usize, depth: u32, options: PrintOptions) {
	let pad = " ".repeat(indent);
	if depth > options.max_print_depth {
		let _ = writeln!(out, "{pad}... {} items", items.len());
		return;
	}

	for (index, item) in items.iter().take(options.max_array_items).enumerate() {
		let _ = writeln!(out, "{pad}[{index}] {{");
		write_record_body(out, item, indent + 2, depth + 1, options);
		let _ = writeln!(out, "{pad}}}");
	}
	if items.len() > options.max_array_items {
		let _ = writeln!(out, "{pad}... {} more", items.len() - options.max_array_items);
	}
}

fn trivial_items(array: &Array, options: PrintOptions) -> String {
	let rendered: Vec<String> = match array {
		Array::Int32(items) => items.iter().take(options.max_array_items).map(ToString::to_string).collect(),
		Array::Uint64(items) => items.iter().take(options.max_array_items).map(ToString::to_string).collect(),
		Array::Float64(items) => items.iter().take(options.max_array_items).map(ToString::to_string).collect(),
		Array::String(items) => items
			.iter()
			.take(options.max_array_items)
			.map(|item| quote(item, options.max_string_len))
			.collect(),
		Array::Struct(_) => Vec::new(),
	};

	let mut out = rendered.join(", ");
	if array.len() > options.max_array_items {
		let _ = write!(out, ", ... {} more", array.len() - options.max_array_items);
	}
	format!("[{out}]")
}

fn scalar_text(value: &Value, options: PrintOptions) -> String {
	match value {
		Value::Int32(v) => v.to_string(),
		Value::Uint64(v) => v.to_string(),
		Value::Float64(v) => v.to_string(),
		Value::String(v) => quote(v, options.max_string_len),
		Value::Blob(blob) => {
			let shown = blob.len().min(options.max_blob_bytes);
			let mut hex = String::with_capacity(shown * 2);
			for byte in &blob.as_slice()[..shown] {
				let _ = write!(hex, "{byte:02x}");
			}
			if blob.len() > shown {
				hex.push_str("...");
			}
			format!("bytes[{}] {hex}", blob.len())
		}
		Value::Array(_) | Value::Struct(_) => String::new(),
	}
}

fn quote(input: &str, max_len: usize) -> String {
	if input.chars().count() <= max_len {
		return format!("{input:?}");
	}
	let out: String = input.chars().take(max_len).collect();
	format!("{out:?}...")
}
