use std::collections::HashMap;
use std::sync::OnceLock;

use crate::proto::{Array, Blob, Node, ProtoError, ReadStream, Record, Result, TypeTag, Value};

static GLOBAL: OnceLock<Registry> = OnceLock::new();

type NodeCtor = fn() -> Value;
type ElementCtor = fn() -> Array;

/// Runtime limits applied while decoding untrusted input.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Maximum struct nesting depth, counting struct array elements.
	pub max_depth: u32,
	/// Maximum element count, child count, or blob length.
	///
	/// Counts are also checked against the bytes left when the stream can
	/// report them, so the default leaves this unbounded.
	pub max_count: u64,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			max_depth: 64,
			max_count: u64::MAX,
		}
	}
}

impl DecodeOptions {
	/// Tighter preset for input from untrusted peers.
	pub fn strict() -> Self {
		Self {
			max_depth: 16,
			max_count: 1 << 16,
		}
	}
}

/// Immutable table from type tag to an empty-payload constructor.
///
/// Array tags are resolved through a second table keyed by element kind,
/// since the element tag follows the `array` tag on the wire.
pub struct Registry {
	nodes: HashMap<TypeTag, NodeCtor>,
	elements: HashMap<TypeTag, ElementCtor>,
}

impl Registry {
	/// Build a registry covering every implemented node kind.
	pub fn new() -> Self {
		let mut nodes: HashMap<TypeTag, NodeCtor> = HashMap::new();
		nodes.insert(TypeTag::Int32, || Value::Int32(0));
		nodes.insert(TypeTag::Uint64, || Value::Uint64(0));
		nodes.insert(TypeTag::Float64, || Value::Float64(0.0));
		nodes.insert(TypeTag::String, || Value::String(String::new()));
		nodes.insert(TypeTag::Struct, || Value::Struct(Record::new()));
		nodes.insert(TypeTag::Blob, || Value::Blob(Blob::default()));

		let mut elements: HashMap<TypeTag, ElementCtor> = HashMap::new();
		elements.insert(TypeTag::Int32, || Array::Int32(Vec::new()));
		elements.insert(TypeTag::Uint64, || Array::Uint64(Vec::new()));
		elements.insert(TypeTag::Float64, || Array::Float64(Vec::new()));
		elements.insert(TypeTag::String, || Array::String(Vec::new()));
		elements.insert(TypeTag::Struct, || Array::Struct(Vec::new()));

		Self { nodes, elements }
	}

	/// Process-wide registry, built on first use.
	pub fn global() -> &'static Registry {
		GLOBAL.get_or_init(Registry::new)
	}

	/// Whether `tag` can head a decoded node.
	pub fn supports(&self, tag: TypeTag) -> bool {
		tag == TypeTag::Array || self.nodes.contains_key(&tag)
	}

	/// Whether arrays of `element` can be decoded.
	pub fn supports_element(&self, element: TypeTag) -> bool {
		self.elements.contains_key(&element)
	}

	/// Decoder over this registry with explicit limits.
	pub fn decoder(&self, options: DecodeOptions) -> Decoder<'_> {
		Decoder::new(self, options)
	}

	/// Decode one node with default limits.
	pub fn decode<R: ReadStream + ?Sized>(&self, stream: &mut R) -> Result<Node> {
		self.decoder(DecodeOptions::default()).decode(stream)
	}

	fn construct<R: ReadStream + ?Sized>(&self, tag: TypeTag, stream: &mut R) -> Result<Value> {
		if tag == TypeTag::Array {
			let element = stream.read_tag()?;
			let ctor = self.elements.get(&element).ok_or(ProtoError::UnsupportedElementKind { kind: element })?;
			return Ok(Value::Array(ctor()));
		}

		let ctor = self.nodes.get(&tag).ok_or(ProtoError::UnknownTag { tag: tag.to_byte() })?;
		Ok(ctor())
	}
}

impl Default for Registry {
	fn default() -> Self {
		Self::new()
	}
}

/// Registry-driven decode state: limits plus the current struct depth.
pub struct Decoder<'r> {
	registry: &'r Registry,
	options: DecodeOptions,
	depth: u32,
}

impl<'r> Decoder<'r> {
	/// Decoder at depth zero.
	pub fn new(registry: &'r Registry, options: DecodeOptions) -> Self {
		Self {
			registry,
			options,
			depth: 0,
		}
	}

	/// Limits in force.
	pub fn options(&self) -> &DecodeOptions {
		&self.options
	}

	/// Read a tag, construct the matching empty node, and let it read itself.
	pub fn decode<R: ReadStream + ?Sized>(&mut self, stream: &mut R) -> Result<Node> {
		let tag = stream.read_tag()?;
		let value = self.registry.construct(tag, stream)?;
		tracing::debug!(kind = value.label(), depth = self.depth, "decode node");

		let mut node = Node::new(String::new(), value);
		node.read(self, stream)?;
		Ok(node)
	}

	pub(crate) fn enter(&mut self) -> Result<()> {
		if self.depth >= self.options.max_depth {
			return Err(ProtoError::DepthExceeded {
				max_depth: self.options.max_depth,
			});
		}
		self.depth += 1;
		Ok(())
	}

	pub(crate) fn leave(&mut self) {
		self.depth = self.depth.saturating_sub(1);
	}

	/// Read a u64 count and validate it with [`Decoder::check_count`].
	pub(crate) fn read_count<R: ReadStream + ?Sized>(&self, stream: &mut R, min_elem_size: usize) -> Result<usize> {
		let count = stream.read_u64()?;
		self.check_count(count, min_elem_size, stream.remaining_hint())
	}

	/// Reject counts above the limit or needing more bytes than remain.
	pub(crate) fn check_count(&self, count: u64, min_elem_size: usize, remaining: Option<usize>) -> Result<usize> {
		if count > self.options.max_count {
			return Err(ProtoError::CountTooLarge {
				count,
				max: self.options.max_count,
			});
		}

		if let Some(rem) = remaining {
			let need = count.saturating_mul(min_elem_size as u64);
			if need > rem as u64 {
				return Err(ProtoError::MalformedLength { count, need, rem });
			}
		}

		usize::try_from(count).map_err(|_| ProtoError::CountTooLarge {
			count,
			max: self.options.max_count,
		})
	}
}
