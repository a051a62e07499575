use crate::proto::{ReadStream, Result, TypeTag, Value, WriteStream};

/// Terminal value that the stream reads and writes directly.
///
/// Implemented for the four scalar node kinds; also the element type of the
/// trivial array kinds.
pub trait Primitive: Sized + Into<Value> {
	/// Node kind carrying this scalar.
	const KIND: TypeTag;
	/// Fewest bytes one encoded value can take.
	const MIN_WIRE_SIZE: usize;

	/// Write the value through the stream's primitive writer.
	fn write_to<W: WriteStream + ?Sized>(&self, stream: &mut W) -> Result<()>;

	/// Read one value through the stream's primitive reader.
	fn read_from<R: ReadStream + ?Sized>(stream: &mut R) -> Result<Self>;
}

impl Primitive for i32 {
	const KIND: TypeTag = TypeTag::Int32;
	const MIN_WIRE_SIZE: usize = 4;

	fn write_to<W: WriteStream + ?Sized>(&self, stream: &mut W) -> Result<()> {
		stream.write_i32(*self)
	}

	fn read_from<R: ReadStream + ?Sized>(stream: &mut R) -> Result<Self> {
		stream.read_i32()
	}
}

impl Primitive for u64 {
	const KIND: TypeTag = TypeTag::Uint64;
	const MIN_WIRE_SIZE: usize = 8;

	fn write_to<W: WriteStream + ?Sized>(&self, stream: &mut W) -> Result<()> {
		stream.write_u64(*self)
	}

	fn read_from<R: ReadStream + ?Sized>(stream: &mut R) -> Result<Self> {
		stream.read_u64()
	}
}

impl Primitive for f64 {
	const KIND: TypeTag = TypeTag::Float64;
	const MIN_WIRE_SIZE: usize = 8;

	fn write_to<W: WriteStream + ?Sized>(&self, stream: &mut W) -> Result<()> {
		stream.write_f64(*self)
	}

	fn read_from<R: ReadStream + ?Sized>(stream: &mut R) -> Result<Self> {
		stream.read_f64()
	}
}

impl Primitive for String {
	const KIND: TypeTag = TypeTag::String;
	// Prefix width belongs to the stream; one byte is the floor.
	const MIN_WIRE_SIZE: usize = 1;

	fn write_to<W: WriteStream + ?Sized>(&self, stream: &mut W) -> Result<()> {
		stream.write_str(self)
	}

	fn read_from<R: ReadStream + ?Sized>(stream: &mut R) -> Result<Self> {
		stream.read_string()
	}
}

impl From<i32> for Value {
	fn from(value: i32) -> Self {
		Self::Int32(value)
	}
}

impl From<u64> for Value {
	fn from(value: u64) -> Self {
		Self::Uint64(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Self::Float64(value)
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::String(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::String(value.to_owned())
	}
}
