mod array;
mod blob;
mod builder;
mod codec;
mod error;
mod node;
mod record;
mod registry;
mod scalar;
mod stream;
mod tag;

/// Homogeneous array payload.
pub use array::Array;
/// Blob payload.
pub use blob::Blob;
/// Struct builder.
pub use builder::StructBuilder;
/// Whole-buffer encode and decode entry points.
pub use codec::{decode, decode_with, encode};
/// Error and result aliases.
pub use error::{ProtoError, Result};
/// Value node, payload, and checked typed access.
pub use node::{FieldType, Node, Value, ValueMut};
/// Struct payload.
pub use record::Record;
/// Decode dispatch and limits.
pub use registry::{DecodeOptions, Decoder, Registry};
/// Scalar payload contract.
pub use scalar::Primitive;
/// Stream contract and the in-memory implementation.
pub use stream::{ByteStream, Endianness, LenPrefix, ReadStream, StreamConfig, WriteStream};
/// Wire type tags.
pub use tag::TypeTag;
