use crate::proto::{Decoder, Primitive, ProtoError, ReadStream, Record, Result, TypeTag, WriteStream};

/// Smallest encoded struct element: its child count.
const MIN_RECORD_WIRE_SIZE: usize = 8;

/// Homogeneous sequence; the variant is the element kind.
///
/// Arrays of arrays, blobs, and the reserved `file` kind are not
/// representable, so the element kind always comes from an allow-list.
#[derive(Debug, Clone, PartialEq)]
pub enum Array {
	/// `int32` elements.
	Int32(Vec<i32>),
	/// `uint64` elements.
	Uint64(Vec<u64>),
	/// `float64` elements.
	Float64(Vec<f64>),
	/// `string` elements.
	String(Vec<String>),
	/// Owned struct elements, written without tag or name.
	Struct(Vec<Record>),
}

impl Array {
	/// Element kinds an array may hold.
	pub const ELEMENT_KINDS: [TypeTag; 5] = [TypeTag::Int32, TypeTag::Uint64, TypeTag::Float64, TypeTag::String, TypeTag::Struct];

	/// Empty array of the given element kind.
	pub fn empty(element: TypeTag) -> Result<Self> {
		match element {
			TypeTag::Int32 => Ok(Self::Int32(Vec::new())),
			TypeTag::Uint64 => Ok(Self::Uint64(Vec::new())),
			TypeTag::Float64 => Ok(Self::Float64(Vec::new())),
			TypeTag::String => Ok(Self::String(Vec::new())),
			TypeTag::Struct => Ok(Self::Struct(Vec::new())),
			TypeTag::Array | TypeTag::File | TypeTag::Blob => Err(ProtoError::UnsupportedElementKind { kind: element }),
		}
	}

	/// Element kind written after the `array` tag.
	pub fn element_kind(&self) -> TypeTag {
		match self {
			Self::Int32(_) => TypeTag::Int32,
			Self::Uint64(_) => TypeTag::Uint64,
			Self::Float64(_) => TypeTag::Float64,
			Self::String(_) => TypeTag::String,
			Self::Struct(_) => TypeTag::Struct,
		}
	}

	/// `array<element>` label.
	pub fn label(&self) -> &'static str {
		match self {
			Self::Int32(_) => "array<int32>",
			Self::Uint64(_) => "array<uint64>",
			Self::Float64(_) => "array<float64>",
			Self::String(_) => "array<string>",
			Self::Struct(_) => "array<struct>",
		}
	}

	/// Element count.
	pub fn len(&self) -> usize {
		match self {
			Self::Int32(items) => items.len(),
			Self::Uint64(items) => items.len(),
			Self::Float64(items) => items.len(),
			Self::String(items) => items.len(),
			Self::Struct(items) => items.len(),
		}
	}

	/// Whether the array has no elements.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub(crate) fn write_payload<W: WriteStream + ?Sized>(&self, stream: &mut W) -> Result<()> {
		match self {
			Self::Int32(items) => write_trivial(items, stream),
			Self::Uint64(items) => write_trivial(items, stream),
			Self::Float64(items) => write_trivial(items, stream),
			Self::String(items) => write_trivial(items, stream),
			Self::Struct(items) => {
				stream.write_u64(items.len() as u64)?;
				for item in items {
					item.write_payload(stream)?;
				}
				Ok(())
			}
		}
	}

	pub(crate) fn read_payload<R: ReadStream + ?Sized>(&mut self, decoder: &mut Decoder<'_>, stream: &mut R) -> Result<()> {
		match self {
			Self::Int32(items) => read_trivial(items, decoder, stream),
			Self::Uint64(items) => read_trivial(items, decoder, stream),
			Self::Float64(items) => read_trivial(items, decoder, stream),
			Self::String(items) => read_trivial(items, decoder, stream),
			Self::Struct(items) => {
				let count = decoder.read_count(stream, MIN_RECORD_WIRE_SIZE)?;
				tracing::trace!(count, "struct array elements");
				items.reserve(count);
				for _ in 0..count {
					let mut item = Record::new();
					item.read_payload(decoder, stream)?;
					items.push(item);
				}
				Ok(())
			}
		}
	}
}

fn write_trivial<T: Primitive, W: WriteStream + ?Sized>(items: &[T], stream: &mut W) -> Result<()> {
	stream.write_u64(items.len() as u64)?;
	for item in items {
		item.write_to(stream)?;
	}
	Ok(())
}

fn read_trivial<T: Primitive, R: ReadStream + ?Sized>(items: &mut Vec<T>, decoder: &mut Decoder<'_>, stream: &mut R) -> Result<()> {
	let count = decoder.read_count(stream, T::MIN_WIRE_SIZE)?;
	tracing::trace!(count, kind = %T::KIND, "trivial array elements");
	items.reserve(count);
	for _ in 0..count {
		items.push(T::read_from(stream)?);
	}
	Ok(())
}

impl From<Vec<i32>> for Array {
	fn from(items: Vec<i32>) -> Self {
		Self::Int32(items)
	}
}

impl From<Vec<u64>> for Array {
	fn from(items: Vec<u64>) -> Self {
		Self::Uint64(items)
	}
}

impl From<Vec<f64>> for Array {
	fn from(items: Vec<f64>) -> Self {
		Self::Float64(items)
	}
}

impl From<Vec<String>> for Array {
	fn from(items: Vec<String>) -> Self {
		Self::String(items)
	}
}

impl From<Vec<Record>> for Array {
	fn from(items: Vec<Record>) -> Self {
		Self::Struct(items)
	}
}
