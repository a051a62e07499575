use std::fmt;

use crate::proto::{ProtoError, Result};

/// Wire discriminator identifying a node kind (and, for arrays, an element kind).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TypeTag {
	/// Signed 32-bit integer scalar.
	Int32 = 0,
	/// Unsigned 64-bit integer scalar.
	Uint64 = 1,
	/// 64-bit float scalar.
	Float64 = 2,
	/// Length-prefixed string scalar.
	String = 3,
	/// Homogeneous array; followed on the wire by an element tag.
	Array = 4,
	/// Ordered collection of named child nodes.
	Struct = 5,
	/// Reserved. No node kind implements it.
	File = 6,
	/// Raw byte buffer.
	Blob = 7,
}

impl TypeTag {
	/// Every tag in wire order.
	pub const ALL: [TypeTag; 8] = [
		Self::Int32,
		Self::Uint64,
		Self::Float64,
		Self::String,
		Self::Array,
		Self::Struct,
		Self::File,
		Self::Blob,
	];

	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Int32 => "int32",
			Self::Uint64 => "uint64",
			Self::Float64 => "float64",
			Self::String => "string",
			Self::Array => "array",
			Self::Struct => "struct",
			Self::File => "file",
			Self::Blob => "blob",
		}
	}

	/// Parse a label produced by [`TypeTag::as_str`].
	pub fn from_name(name: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|tag| tag.as_str() == name)
	}

	/// Raw wire byte.
	pub fn to_byte(self) -> u8 {
		self as u8
	}
}

impl TryFrom<u8> for TypeTag {
	type Error = ProtoError;

	fn try_from(byte: u8) -> Result<Self> {
		Self::ALL.get(usize::from(byte)).copied().ok_or(ProtoError::UnknownTag { tag: byte })
	}
}

impl fmt::Display for TypeTag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	use crate::proto::{ProtoError, TypeTag};

	#[test]
	fn wire_bytes_are_stable() {
		let bytes: Vec<u8> = TypeTag::ALL.into_iter().map(TypeTag::to_byte).collect();
		assert_eq!(bytes, [0, 1, 2, 3, 4, 5, 6, 7]);
		for tag in TypeTag::ALL {
			assert_eq!(TypeTag::try_from(tag.to_byte()).expect("tag byte parses"), tag);
		}
	}

	#[test]
	fn rejects_out_of_range_byte() {
		let err = TypeTag::try_from(8).expect_err("byte 8 is not a tag");
		assert!(matches!(err, ProtoError::UnknownTag { tag: 8 }));
	}

	#[test]
	fn labels_round_trip() {
		assert_eq!(TypeTag::from_name("struct"), Some(TypeTag::Struct));
		assert_eq!(TypeTag::from_name("float64"), Some(TypeTag::Float64));
		assert_eq!(TypeTag::from_name("Struct"), None);
		assert_eq!(TypeTag::Blob.to_string(), "blob");
	}
}
