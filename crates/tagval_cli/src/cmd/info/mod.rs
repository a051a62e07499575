use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;
use tagval::proto::{Node, StreamConfig};

use crate::cmd::util::{DecodeArgs, emit_json, read_node};
use crate::error::Result;

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
	#[command(flatten)]
	pub decode: DecodeArgs,
}

/// Node-kind statistics from one pre-order walk.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct NodeStats {
	pub root_kind: &'static str,
	pub root_name: String,
	pub node_count: usize,
	pub max_depth: u32,
	pub kinds: BTreeMap<&'static str, usize>,
}

#[derive(Serialize)]
struct InfoJson {
	path: String,
	bytes: usize,
	#[serde(flatten)]
	stats: NodeStats,
}

/// Print root identity and per-kind node counts.
pub fn run(args: Args, config: StreamConfig) -> Result<()> {
	let Args { path, json, decode } = args;

	let (node, bytes) = read_node(&path, config, &decode.options())?;
	let stats = collect_stats(&node);

	if json {
		return emit_json(&InfoJson {
			path: path.display().to_string(),
			bytes,
			stats,
		});
	}

	println!("path: {}", path.display());
	println!("bytes: {bytes}");
	println!("root_kind: {}", stats.root_kind);
	println!("root_name: {}", stats.root_name);
	println!("node_count: {}", stats.node_count);
	println!("max_depth: {}", stats.max_depth);
	println!("kinds:");
	for (kind, count) in &stats.kinds {
		println!("  {kind}: {count}");
	}
	Ok(())
}

/// Count nodes by kind label and find the deepest nesting level.
pub fn collect_stats(root: &Node) -> NodeStats {
	let mut stats = NodeStats {
		root_kind: root.value().label(),
		root_name: root.name().to_owned(),
		node_count: 0,
		max_depth: 0,
		kinds: BTreeMap::new(),
	};

	root.walk(&mut |node: &Node, depth: u32| {
		stats.node_count += 1;
		stats.max_depth = stats.max_depth.max(depth);
		*stats.kinds.entry(node.value().label()).or_insert(0) += 1;
	});
	stats
}
