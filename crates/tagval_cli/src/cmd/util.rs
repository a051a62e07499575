use std::fs;
use std::path::Path;

use serde::Serialize;
use tagval::proto::{DecodeOptions, Endianness, LenPrefix, Node, StreamConfig, decode_with};

use crate::error::Result;

/// String length prefix width accepted on the command line.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum PrefixArg {
	U16,
	U32,
	U64,
}

/// Wire settings shared by every command.
#[derive(clap::Args)]
pub struct WireArgs {
	/// Use big-endian scalars, counts, and prefixes.
	#[arg(long, global = true)]
	pub big_endian: bool,
	/// String length prefix width.
	#[arg(long = "string-len", value_enum, default_value_t = PrefixArg::U16, global = true)]
	pub string_len: PrefixArg,
}

impl WireArgs {
	pub fn config(&self) -> StreamConfig {
		StreamConfig {
			endianness: if self.big_endian { Endianness::Big } else { Endianness::Little },
			string_len: match self.string_len {
				PrefixArg::U16 => LenPrefix::U16,
				PrefixArg::U32 => LenPrefix::U32,
				PrefixArg::U64 => LenPrefix::U64,
			},
		}
	}
}

/// Decode limits shared by reading commands.
#[derive(clap::Args)]
pub struct DecodeArgs {
	/// Apply the strict decode preset before other limits.
	#[arg(long)]
	pub strict: bool,
	/// Maximum struct nesting depth.
	#[arg(long = "max-depth")]
	pub max_depth: Option<u32>,
	/// Maximum element count, child count, or blob length.
	#[arg(long = "max-count")]
	pub max_count: Option<u64>,
}

impl DecodeArgs {
	pub fn options(&self) -> DecodeOptions {
		let mut options = if self.strict { DecodeOptions::strict() } else { DecodeOptions::default() };
		if let Some(max_depth) = self.max_depth {
			options.max_depth = max_depth;
		}
		if let Some(max_count) = self.max_count {
			options.max_count = max_count;
		}
		options
	}
}

/// Read and decode one root node from a file, returning it with the file size.
pub(crate) fn read_node(path: &Path, config: StreamConfig, options: &DecodeOptions) -> Result<(Node, usize)> {
	let bytes = fs::read(path)?;
	tracing::debug!(path = %path.display(), len = bytes.len(), "read encoded file");
	let node = decode_with(&bytes, config, options)?;
	Ok((node, bytes.len()))
}

/// Print a serializable payload as pretty JSON on stdout.
pub(crate) fn emit_json<T: Serialize>(payload: &T) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(payload)?);
	Ok(())
}
