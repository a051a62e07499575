use std::fs;
use std::path::PathBuf;

use tagval::proto::{StreamConfig, encode};

use crate::cmd::json::parse_node;
use crate::error::Result;

#[derive(clap::Args)]
pub struct Args {
	/// JSON node description.
	pub input: PathBuf,
	#[arg(short, long)]
	pub output: PathBuf,
}

/// Encode a JSON node description into the binary format.
pub fn run(args: Args, config: StreamConfig) -> Result<()> {
	let Args { input, output } = args;

	let text = fs::read_to_string(&input)?;
	let node = parse_node(&text)?;
	let bytes = encode(&node, config)?;
	fs::write(&output, &bytes)?;
	tracing::debug!(kind = %node.kind(), name = node.name(), len = bytes.len(), "encoded node");

	println!("wrote {} bytes to {}", bytes.len(), output.display());
	Ok(())
}
