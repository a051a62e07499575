use std::{ptr, slice};

use crate::proto::{Decoder, FieldType, Node, ProtoError, ReadStream, Result, WriteStream};

/// Smallest encoded child: tag byte plus at least one name prefix byte.
const MIN_NODE_WIRE_SIZE: usize = 2;

/// Payload of a struct node: ordered, exclusively owned child nodes.
///
/// Names are not required to be unique. Every lookup by name resolves to the
/// first child with that name in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
	fields: Vec<Node>,
}

impl Record {
	/// Empty record.
	pub fn new() -> Self {
		Self::default()
	}

	/// Take ownership of `fields` in order.
	pub fn from_nodes(fields: Vec<Node>) -> Self {
		Self { fields }
	}

	/// Append a child.
	pub fn push(&mut self, node: Node) {
		self.fields.push(node);
	}

	/// Child count.
	pub fn len(&self) -> usize {
		self.fields.len()
	}

	/// Whether the record has no children.
	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	/// Children in insertion order.
	pub fn fields(&self) -> &[Node] {
		&self.fields
	}

	/// Iterate children in insertion order.
	pub fn iter(&self) -> slice::Iter<'_, Node> {
		self.fields.iter()
	}

	/// Give up ownership of every child.
	pub fn into_nodes(self) -> Vec<Node> {
		self.fields
	}

	/// Index of the first child named `name`.
	pub fn position(&self, name: &str) -> Option<usize> {
		self.fields.iter().position(|node| node.name() == name)
	}

	/// First child named `name`.
	pub fn get(&self, name: &str) -> Option<&Node> {
		self.fields.iter().find(|node| node.name() == name)
	}

	/// First child named `name`, mutably.
	pub fn get_mut(&mut self, name: &str) -> Option<&mut Node> {
		self.fields.iter_mut().find(|node| node.name() == name)
	}

	/// Payload of the first child named `name`, checked against `T`.
	pub fn field<T: FieldType>(&self, name: &str) -> Result<&T> {
		self.get(name)
			.ok_or_else(|| ProtoError::FieldNotFound { name: name.to_owned() })?
			.get::<T>()
	}

	/// Detach the first child named `name`.
	pub fn release(&mut self, name: &str) -> Option<Node> {
		let index = self.position(name)?;
		Some(self.fields.remove(index))
	}

	/// Detach the child at `index`.
	pub fn release_at(&mut self, index: usize) -> Option<Node> {
		if index >= self.fields.len() {
			return None;
		}
		Some(self.fields.remove(index))
	}

	/// Detach the child stored at `node`, matching by address rather than name.
	///
	/// The pointer is only compared, never dereferenced; take it from
	/// [`Record::get`] or [`Record::iter`] before releasing. Returns `None` when
	/// no child lives at that address.
	pub fn release_node(&mut self, node: *const Node) -> Option<Node> {
		let index = self.fields.iter().position(|field| ptr::eq(field, node))?;
		Some(self.fields.remove(index))
	}

	pub(crate) fn write_payload<W: WriteStream + ?Sized>(&self, stream: &mut W) -> Result<()> {
		stream.write_u64(self.fields.len() as u64)?;
		for node in &self.fields {
			node.write(stream)?;
		}
		Ok(())
	}

	pub(crate) fn read_payload<R: ReadStream + ?Sized>(&mut self, decoder: &mut Decoder<'_>, stream: &mut R) -> Result<()> {
		decoder.enter()?;
		let result = self.read_fields(decoder, stream);
		decoder.leave();
		result
	}

	fn read_fields<R: ReadStream + ?Sized>(&mut self, decoder: &mut Decoder<'_>, stream: &mut R) -> Result<()> {
		let count = decoder.read_count(stream, MIN_NODE_WIRE_SIZE)?;
		self.fields.reserve(count);
		for _ in 0..count {
			let node = decoder.decode(stream)?;
			self.fields.push(node);
		}
		Ok(())
	}
}

impl<'a> IntoIterator for &'a Record {
	type Item = &'a Node;
	type IntoIter = slice::Iter<'a, Node>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl FromIterator<Node> for Record {
	fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
		Self::from_nodes(iter.into_iter().collect())
	}
}
