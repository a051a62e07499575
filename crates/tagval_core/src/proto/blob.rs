use std::mem;

use crate::proto::{Decoder, ProtoError, ReadStream, Result, WriteStream};

/// Variable-length raw byte buffer owned by a blob node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blob {
	pub(crate) bytes: Vec<u8>,
}

impl Blob {
	/// Wrap an owned buffer.
	pub fn new(bytes: Vec<u8>) -> Self {
		Self { bytes }
	}

	/// Borrow the buffer contents.
	pub fn as_slice(&self) -> &[u8] {
		&self.bytes
	}

	/// Buffer length in bytes.
	pub fn len(&self) -> usize {
		self.bytes.len()
	}

	/// Whether the buffer is empty.
	pub fn is_empty(&self) -> bool {
		self.bytes.is_empty()
	}

	/// Move the buffer out, leaving this blob empty.
	pub fn take_buffer(&mut self) -> Vec<u8> {
		mem::take(&mut self.bytes)
	}

	pub(crate) fn write_payload<W: WriteStream + ?Sized>(&self, stream: &mut W) -> Result<()> {
		let len = u32::try_from(self.bytes.len()).map_err(|_| ProtoError::LengthOverflow {
			len: self.bytes.len(),
			width: 4,
		})?;
		stream.write_u32(len)?;
		stream.write_bytes(&self.bytes)
	}

	pub(crate) fn read_payload<R: ReadStream + ?Sized>(&mut self, decoder: &mut Decoder<'_>, stream: &mut R) -> Result<()> {
		let len = stream.read_u32()?;
		let len = decoder.check_count(u64::from(len), 1, stream.remaining_hint())?;
		self.bytes = stream.read_bytes(len)?;
		Ok(())
	}
}

impl From<Vec<u8>> for Blob {
	fn from(bytes: Vec<u8>) -> Self {
		Self::new(bytes)
	}
}

#[cfg(test)]
mod tests {
	use crate::proto::{Blob, ByteStream, Node, ProtoError, Registry, StreamConfig, TypeTag};

	#[test]
	fn writes_u32_length_then_raw_bytes() {
		let node = Node::blob("", vec![0xAA_u8, 0xBB, 0xCC]);
		let mut stream = ByteStream::new(StreamConfig::default());
		node.write(&mut stream).expect("blob writes");
		assert_eq!(stream.as_bytes(), &[TypeTag::Blob.to_byte(), 0, 0, 3, 0, 0, 0, 0xAA, 0xBB, 0xCC]);
	}

	#[test]
	fn round_trips_and_hands_out_buffer() {
		let bytes: Vec<u8> = (0..=255).collect();
		let mut stream = ByteStream::new(StreamConfig::default());
		Node::blob("payload", bytes.clone()).write(&mut stream).expect("blob writes");

		let mut node = Registry::global().decode(&mut stream).expect("blob decodes");
		assert_eq!(node.kind(), TypeTag::Blob);
		assert_eq!(node.name(), "payload");

		let mut value = node.value_mut();
		let blob = value.get::<Blob>().expect("payload is a blob");
		assert_eq!(blob.take_buffer(), bytes);
		assert!(blob.is_empty());
		assert_eq!(node.get::<Vec<u8>>().expect("still a blob").len(), 0);
	}

	#[test]
	fn length_past_end_is_malformed() {
		let mut stream = ByteStream::from_bytes(vec![TypeTag::Blob.to_byte(), 0, 0, 0xFF, 0xFF, 0, 0, 1, 2], StreamConfig::default());
		let err = Registry::global().decode(&mut stream).expect_err("length exceeds input");
		assert!(matches!(err, ProtoError::MalformedLength { count: 0xFFFF, rem: 2, .. }));
	}
}
