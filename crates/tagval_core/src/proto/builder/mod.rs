use std::mem;

use crate::proto::{Node, ProtoError, Record, Result, Value};

/// Accumulates nodes by ownership transfer and finalizes them into one struct node.
///
/// A builder is finalized exactly once with [`StructBuilder::get`]. Dropping a
/// builder that still holds nodes is a programming error: it is logged, and
/// debug builds assert on it. Use [`StructBuilder::discard`] to abandon one
/// explicitly.
#[derive(Debug, Default)]
pub struct StructBuilder {
	nodes: Vec<Node>,
	finalized: bool,
}

impl StructBuilder {
	/// Empty builder.
	pub fn new() -> Self {
		Self::default()
	}

	/// Construct a node in place from a name and payload, and take it.
	pub fn push(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
		self.accept(Node::new(name, value));
		self
	}

	/// Take ownership of an already constructed node.
	///
	/// After [`StructBuilder::get`] the node is logged and dropped instead.
	pub fn add(&mut self, node: Node) -> &mut Self {
		self.accept(node);
		self
	}

	/// Take ownership of `node` if present; `None` is a no-op.
	pub fn add_opt(&mut self, node: Option<Node>) -> &mut Self {
		if let Some(node) = node {
			self.accept(node);
		}
		self
	}

	/// Number of nodes waiting to be finalized.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Whether no nodes are pending.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Move every pending node into a new struct node named `name`.
	///
	/// Leaves the builder empty. Fails if the builder was already finalized.
	pub fn get(&mut self, name: impl Into<String>) -> Result<Node> {
		if self.finalized {
			return Err(ProtoError::BuilderMisuse {
				reason: "builder already finalized",
			});
		}

		self.finalized = true;
		let nodes = mem::take(&mut self.nodes);
		Ok(Node::record(name, Record::from_nodes(nodes)))
	}

	fn accept(&mut self, node: Node) {
		if self.finalized {
			tracing::error!(name = node.name(), "node added to a finalized struct builder was dropped");
			debug_assert!(false, "node {:?} added to a finalized struct builder", node.name());
			return;
		}
		self.nodes.push(node);
	}

	/// Abandon the builder, failing if nodes were never transferred out.
	///
	/// Pending nodes are dropped either way.
	pub fn discard(mut self) -> Result<()> {
		if self.nodes.is_empty() {
			return Ok(());
		}

		tracing::warn!(pending = self.nodes.len(), "struct builder discarded with pending nodes");
		self.nodes.clear();
		Err(ProtoError::BuilderMisuse {
			reason: "builder discarded with pending nodes",
		})
	}
}

impl Drop for StructBuilder {
	fn drop(&mut self) {
		if self.nodes.is_empty() || std::thread::panicking() {
			return;
		}

		tracing::error!(pending = self.nodes.len(), "struct builder dropped with un-transferred nodes");
		debug_assert!(false, "struct builder dropped with {} un-transferred nodes", self.nodes.len());
	}
}

#[cfg(test)]
mod tests;
