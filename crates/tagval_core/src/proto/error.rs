use thiserror::Error;

use crate::proto::TypeTag;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, ProtoError>;

/// Errors produced while encoding, decoding, and accessing tagged values.
#[derive(Debug, Error)]
pub enum ProtoError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Decoded tag byte has no registered node constructor.
	#[error("unknown type tag {tag}")]
	UnknownTag {
		/// Raw tag byte read from the stream.
		tag: u8,
	},
	/// Array element tag is not one of the supported element kinds.
	#[error("unsupported array element kind {kind}")]
	UnsupportedElementKind {
		/// Rejected element kind.
		kind: TypeTag,
	},
	/// Typed accessor requested a payload kind the node does not hold.
	#[error("type mismatch: expected {expected}, got {got}")]
	TypeMismatch {
		/// Requested payload kind.
		expected: &'static str,
		/// Actual payload kind.
		got: &'static str,
	},
	/// Struct field lookup found no child with the requested name.
	#[error("field not found: {name}")]
	FieldNotFound {
		/// Requested field name.
		name: String,
	},
	/// Struct builder used outside its single-finalization contract.
	#[error("struct builder misuse: {reason}")]
	BuilderMisuse {
		/// What the caller did wrong.
		reason: &'static str,
	},
	/// Not enough bytes remained for a requested read.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEof {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// Count or length field implies more data than the stream holds.
	#[error("malformed length: count {count} needs at least {need} bytes, remaining {rem}")]
	MalformedLength {
		/// Declared element count or byte length.
		count: u64,
		/// Minimum bytes implied by the count.
		need: u64,
		/// Bytes still available.
		rem: usize,
	},
	/// Count exceeded the configured decode limit.
	#[error("count too large: count={count}, max={max}")]
	CountTooLarge {
		/// Declared count.
		count: u64,
		/// Maximum permitted count.
		max: u64,
	},
	/// Struct nesting exceeded the configured decode limit.
	#[error("decode depth exceeded (max={max_depth})")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Length does not fit the wire field that must carry it.
	#[error("length {len} does not fit in {width}-byte prefix")]
	LengthOverflow {
		/// Length that was to be written.
		len: usize,
		/// Prefix width in bytes.
		width: usize,
	},
	/// String payload is not valid UTF-8.
	#[error("invalid utf-8 in string at offset {at}")]
	InvalidUtf8 {
		/// Byte offset where the string payload started.
		at: usize,
	},
	/// Bytes remained after the root value was decoded.
	#[error("{count} trailing bytes after root value")]
	TrailingBytes {
		/// Unconsumed byte count.
		count: usize,
	},
}
