use std::path::PathBuf;

use serde::Serialize;
use serde_json::Value as JsonValue;
use tagval::proto::StreamConfig;

use crate::cmd::json::node_value;
use crate::cmd::print::{PrintOptions, render_node};
use crate::cmd::util::{DecodeArgs, emit_json, read_node};
use crate::error::Result;

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
	#[arg(long = "max-items")]
	pub max_items: Option<usize>,
	#[command(flatten)]
	pub decode: DecodeArgs,
}

#[derive(Serialize)]
struct InspectJson {
	path: String,
	bytes: usize,
	root: JsonValue,
}

/// Decode a file and print its value tree.
pub fn run(args: Args, config: StreamConfig) -> Result<()> {
	let Args {
		path,
		json,
		max_items,
		decode,
	} = args;

	let (node, bytes) = read_node(&path, config, &decode.options())?;

	if json {
		return emit_json(&InspectJson {
			path: path.display().to_string(),
			bytes,
			root: node_value(&node),
		});
	}

	let mut options = PrintOptions::default();
	if let Some(max_items) = max_items {
		options.max_array_items = max_items;
		options.max_fields_per_struct = max_items;
	}

	println!("path: {}", path.display());
	println!("bytes: {bytes}");
	print!("{}", render_node(&node, options));
	Ok(())
}
