use crate::proto::{ProtoError, Result, TypeTag};

/// Byte order used for fixed-width scalars.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Endianness {
	/// Least significant byte first.
	#[default]
	Little,
	/// Most significant byte first.
	Big,
}

impl Endianness {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Little => "little",
			Self::Big => "big",
		}
	}
}

/// Width of the length prefix written before string payloads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LenPrefix {
	/// Two-byte prefix.
	#[default]
	U16,
	/// Four-byte prefix.
	U32,
	/// Eight-byte prefix.
	U64,
}

impl LenPrefix {
	/// Prefix size in bytes.
	pub fn width(self) -> usize {
		match self {
			Self::U16 => 2,
			Self::U32 => 4,
			Self::U64 => 8,
		}
	}

	fn max_len(self) -> u64 {
		match self {
			Self::U16 => u64::from(u16::MAX),
			Self::U32 => u64::from(u32::MAX),
			Self::U64 => u64::MAX,
		}
	}
}

/// Wire-level settings of a [`ByteStream`].
///
/// Both peers must agree on these; nothing on the wire records them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamConfig {
	/// Byte order for scalars, counts, and prefixes.
	pub endianness: Endianness,
	/// String length prefix width.
	pub string_len: LenPrefix,
}

/// Sink half of the stream contract the codec writes through.
pub trait WriteStream {
	/// Append raw bytes.
	fn write_bytes(&mut self, bytes: &[u8]) -> Result<()>;
	/// Write one byte.
	fn write_u8(&mut self, value: u8) -> Result<()>;
	/// Write a fixed-width `u32`.
	fn write_u32(&mut self, value: u32) -> Result<()>;
	/// Write a fixed-width `u64`.
	fn write_u64(&mut self, value: u64) -> Result<()>;
	/// Write a fixed-width `i32`.
	fn write_i32(&mut self, value: i32) -> Result<()>;
	/// Write a fixed-width `f64`.
	fn write_f64(&mut self, value: f64) -> Result<()>;
	/// Write a length-prefixed string.
	fn write_str(&mut self, value: &str) -> Result<()>;

	/// Write a type tag as its wire byte.
	fn write_tag(&mut self, tag: TypeTag) -> Result<()> {
		self.write_u8(tag.to_byte())
	}
}

/// Source half of the stream contract the codec reads through.
pub trait ReadStream {
	/// Fill `out` completely or fail.
	fn read_into(&mut self, out: &mut [u8]) -> Result<()>;
	/// Read one byte.
	fn read_u8(&mut self) -> Result<u8>;
	/// Read a fixed-width `u32`.
	fn read_u32(&mut self) -> Result<u32>;
	/// Read a fixed-width `u64`.
	fn read_u64(&mut self) -> Result<u64>;
	/// Read a fixed-width `i32`.
	fn read_i32(&mut self) -> Result<i32>;
	/// Read a fixed-width `f64`.
	fn read_f64(&mut self) -> Result<f64>;
	/// Read a length-prefixed string.
	fn read_string(&mut self) -> Result<String>;

	/// Bytes known to be left, if the stream can tell.
	fn remaining_hint(&self) -> Option<usize> {
		None
	}

	/// Read exactly `len` raw bytes.
	fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
		let mut out = vec![0_u8; len];
		self.read_into(&mut out)?;
		Ok(out)
	}

	/// Read a type tag, rejecting bytes outside the tag set.
	fn read_tag(&mut self) -> Result<TypeTag> {
		TypeTag::try_from(self.read_u8()?)
	}
}

/// In-memory stream: a growable write buffer with a bounded read cursor.
#[derive(Debug, Clone, Default)]
pub struct ByteStream {
	bytes: Vec<u8>,
	pos: usize,
	config: StreamConfig,
}

impl ByteStream {
	/// Create an empty stream.
	pub fn new(config: StreamConfig) -> Self {
		Self {
			bytes: Vec::new(),
			pos: 0,
			config,
		}
	}

	/// Create a stream positioned at the start of existing bytes.
	pub fn from_bytes(bytes: impl Into<Vec<u8>>, config: StreamConfig) -> Self {
		Self {
			bytes: bytes.into(),
			pos: 0,
			config,
		}
	}

	/// Wire settings in use.
	pub fn config(&self) -> StreamConfig {
		self.config
	}

	/// Current read offset.
	pub fn position(&self) -> usize {
		self.pos
	}

	/// Unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Every byte written so far, read or not.
	pub fn as_bytes(&self) -> &[u8] {
		&self.bytes
	}

	/// Give up the buffer.
	pub fn into_inner(self) -> Vec<u8> {
		self.bytes
	}

	fn take(&mut self, n: usize) -> Result<&[u8]> {
		if n > self.remaining() {
			return Err(ProtoError::UnexpectedEof {
				at: self.pos,
				need: n,
				rem: self.remaining(),
			});
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
		let raw = self.take(N)?;
		let mut buf = [0_u8; N];
		buf.copy_from_slice(raw);
		Ok(buf)
	}

	fn put<const N: usize>(&mut self, le: [u8; N], be: [u8; N]) {
		match self.config.endianness {
			Endianness::Little => self.bytes.extend_from_slice(&le),
			Endianness::Big => self.bytes.extend_from_slice(&be),
		}
	}

	fn write_len(&mut self, len: usize) -> Result<()> {
		let prefix = self.config.string_len;
		let wide = len as u64;
		if wide > prefix.max_len() {
			return Err(ProtoError::LengthOverflow { len, width: prefix.width() });
		}

		match prefix {
			LenPrefix::U16 => {
				let value = wide as u16;
				self.put(value.to_le_bytes(), value.to_be_bytes());
			}
			LenPrefix::U32 => {
				let value = wide as u32;
				self.put(value.to_le_bytes(), value.to_be_bytes());
			}
			LenPrefix::U64 => self.put(wide.to_le_bytes(), wide.to_be_bytes()),
		}
		Ok(())
	}

	fn read_len(&mut self) -> Result<u64> {
		let endianness = self.config.endianness;
		Ok(match self.config.string_len {
			LenPrefix::U16 => {
				let buf = self.take_array::<2>()?;
				u64::from(match endianness {
					Endianness::Little => u16::from_le_bytes(buf),
					Endianness::Big => u16::from_be_bytes(buf),
				})
			}
			LenPrefix::U32 => u64::from(self.read_u32()?),
			LenPrefix::U64 => self.read_u64()?,
		})
	}
}

impl WriteStream for ByteStream {
	fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
		self.bytes.extend_from_slice(bytes);
		Ok(())
	}

	fn write_u8(&mut self, value: u8) -> Result<()> {
		self.bytes.push(value);
		Ok(())
	}

	fn write_u32(&mut self, value: u32) -> Result<()> {
		self.put(value.to_le_bytes(), value.to_be_bytes());
		Ok(())
	}

	fn write_u64(&mut self, value: u64) -> Result<()> {
		self.put(value.to_le_bytes(), value.to_be_bytes());
		Ok(())
	}

	fn write_i32(&mut self, value: i32) -> Result<()> {
		self.put(value.to_le_bytes(), value.to_be_bytes());
		Ok(())
	}

	fn write_f64(&mut self, value: f64) -> Result<()> {
		self.put(value.to_le_bytes(), value.to_be_bytes());
		Ok(())
	}

	fn write_str(&mut self, value: &str) -> Result<()> {
		self.write_len(value.len())?;
		self.bytes.extend_from_slice(value.as_bytes());
		Ok(())
	}
}

impl ReadStream for ByteStream {
	fn read_into(&mut self, out: &mut [u8]) -> Result<()> {
		let raw = self.take(out.len())?;
		out.copy_from_slice(raw);
		Ok(())
	}

	fn read_u8(&mut self) -> Result<u8> {
		Ok(self.take_array::<1>()?[0])
	}

	fn read_u32(&mut self) -> Result<u32> {
		let buf = self.take_array::<4>()?;
		Ok(match self.config.endianness {
			Endianness::Little => u32::from_le_bytes(buf),
			Endianness::Big => u32::from_be_bytes(buf),
		})
	}

	fn read_u64(&mut self) -> Result<u64> {
		let buf = self.take_array::<8>()?;
		Ok(match self.config.endianness {
			Endianness::Little => u64::from_le_bytes(buf),
			Endianness::Big => u64::from_be_bytes(buf),
		})
	}

	fn read_i32(&mut self) -> Result<i32> {
		let buf = self.take_array::<4>()?;
		Ok(match self.config.endianness {
			Endianness::Little => i32::from_le_bytes(buf),
			Endianness::Big => i32::from_be_bytes(buf),
		})
	}

	fn read_f64(&mut self) -> Result<f64> {
		let buf = self.take_array::<8>()?;
		Ok(match self.config.endianness {
			Endianness::Little => f64::from_le_bytes(buf),
			Endianness::Big => f64::from_be_bytes(buf),
		})
	}

	fn read_string(&mut self) -> Result<String> {
		let len = self.read_len()?;
		let at = self.pos;
		let len = usize::try_from(len).map_err(|_| ProtoError::MalformedLength {
			count: len,
			need: len,
			rem: self.remaining(),
		})?;
		let raw = self.take(len)?;
		String::from_utf8(raw.to_vec()).map_err(|_| ProtoError::InvalidUtf8 { at })
	}

	fn remaining_hint(&self) -> Option<usize> {
		Some(self.remaining())
	}

	fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
		Ok(self.take(len)?.to_vec())
	}
}

#[cfg(test)]
mod tests;
