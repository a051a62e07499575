use crate::proto::{Array, Blob, Decoder, Primitive, ProtoError, ReadStream, Record, Result, TypeTag, WriteStream};

/// Kind-specific content of a node.
///
/// The variant fixes the node's [`TypeTag`]; arrays additionally fix their
/// element kind through the [`Array`] variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Signed 32-bit integer.
	Int32(i32),
	/// Unsigned 64-bit integer.
	Uint64(u64),
	/// 64-bit float.
	Float64(f64),
	/// UTF-8 string.
	String(String),
	/// Owned byte buffer.
	Blob(Blob),
	/// Homogeneous sequence.
	Array(Array),
	/// Ordered named children.
	Struct(Record),
}

impl Value {
	/// Wire tag of this payload.
	pub fn kind(&self) -> TypeTag {
		match self {
			Self::Int32(_) => TypeTag::Int32,
			Self::Uint64(_) => TypeTag::Uint64,
			Self::Float64(_) => TypeTag::Float64,
			Self::String(_) => TypeTag::String,
			Self::Blob(_) => TypeTag::Blob,
			Self::Array(_) => TypeTag::Array,
			Self::Struct(_) => TypeTag::Struct,
		}
	}

	/// Kind label, including the element kind for arrays.
	pub fn label(&self) -> &'static str {
		match self {
			Self::Array(array) => array.label(),
			other => other.kind().as_str(),
		}
	}

	/// Borrow the payload as `T`, failing on a kind mismatch.
	pub fn get<T: FieldType>(&self) -> Result<&T> {
		T::from_value(self).ok_or(ProtoError::TypeMismatch {
			expected: T::LABEL,
			got: self.label(),
		})
	}

	/// Move the payload out as `T`, failing on a kind mismatch.
	pub fn into_inner<T: FieldType>(self) -> Result<T> {
		let got = self.label();
		T::from_owned(self).map_err(|_| ProtoError::TypeMismatch { expected: T::LABEL, got })
	}

	pub(crate) fn write_payload<W: WriteStream + ?Sized>(&self, stream: &mut W) -> Result<()> {
		match self {
			Self::Int32(value) => value.write_to(stream),
			Self::Uint64(value) => value.write_to(stream),
			Self::Float64(value) => value.write_to(stream),
			Self::String(value) => value.write_to(stream),
			Self::Blob(blob) => blob.write_payload(stream),
			Self::Array(array) => array.write_payload(stream),
			Self::Struct(record) => record.write_payload(stream),
		}
	}

	pub(crate) fn read_payload<R: ReadStream + ?Sized>(&mut self, decoder: &mut Decoder<'_>, stream: &mut R) -> Result<()> {
		match self {
			Self::Int32(value) => *value = i32::read_from(stream)?,
			Self::Uint64(value) => *value = u64::read_from(stream)?,
			Self::Float64(value) => *value = f64::read_from(stream)?,
			Self::String(value) => *value = String::read_from(stream)?,
			Self::Blob(blob) => blob.read_payload(decoder, stream)?,
			Self::Array(array) => array.read_payload(decoder, stream)?,
			Self::Struct(record) => record.read_payload(decoder, stream)?,
		}
		Ok(())
	}
}

/// Self-describing unit of data: a name plus a typed payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
	name: String,
	value: Value,
}

impl Node {
	/// Build a node from any payload convertible into [`Value`].
	pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
		Self {
			name: name.into(),
			value: value.into(),
		}
	}

	/// Signed 32-bit integer node.
	pub fn int32(name: impl Into<String>, value: i32) -> Self {
		Self::new(name, value)
	}

	/// Unsigned 64-bit integer node.
	pub fn uint64(name: impl Into<String>, value: u64) -> Self {
		Self::new(name, value)
	}

	/// 64-bit float node.
	pub fn float64(name: impl Into<String>, value: f64) -> Self {
		Self::new(name, value)
	}

	/// String node.
	pub fn string(name: impl Into<String>, value: impl Into<String>) -> Self {
		Self::new(name, Value::String(value.into()))
	}

	/// Blob node taking ownership of `bytes`.
	pub fn blob(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
		Self::new(name, Blob::new(bytes.into()))
	}

	/// Array node.
	pub fn array(name: impl Into<String>, array: impl Into<Array>) -> Self {
		Self::new(name, array.into())
	}

	/// Struct node owning `record`'s children.
	pub fn record(name: impl Into<String>, record: Record) -> Self {
		Self::new(name, record)
	}

	/// Node name; empty for anonymous nodes.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Rename the node.
	pub fn set_name(&mut self, name: impl Into<String>) {
		self.name = name.into();
	}

	/// Wire tag of the payload.
	pub fn kind(&self) -> TypeTag {
		self.value.kind()
	}

	/// Borrow the payload.
	pub fn value(&self) -> &Value {
		&self.value
	}

	/// Mutably borrow the payload. The kind cannot change through this.
	pub fn value_mut(&mut self) -> ValueMut<'_> {
		ValueMut(&mut self.value)
	}

	/// Split into name and payload.
	pub fn into_parts(self) -> (String, Value) {
		(self.name, self.value)
	}

	/// Borrow the payload as `T`, failing on a kind mismatch.
	pub fn get<T: FieldType>(&self) -> Result<&T> {
		self.value.get()
	}

	/// Move the payload out as `T`, failing on a kind mismatch.
	pub fn into_inner<T: FieldType>(self) -> Result<T> {
		self.value.into_inner()
	}

	/// Emit tag, element tag for arrays, name, then payload.
	pub fn write<W: WriteStream + ?Sized>(&self, stream: &mut W) -> Result<()> {
		stream.write_tag(self.kind())?;
		if let Value::Array(array) = &self.value {
			stream.write_tag(array.element_kind())?;
		}
		stream.write_str(&self.name)?;
		self.value.write_payload(stream)
	}

	/// Consume name then payload. The tag was already read by the dispatcher.
	pub fn read<R: ReadStream + ?Sized>(&mut self, decoder: &mut Decoder<'_>, stream: &mut R) -> Result<()> {
		self.name = stream.read_string()?;
		self.value.read_payload(decoder, stream)
	}

	/// Visit this node and every descendant node in pre-order with its depth.
	///
	/// Struct array elements have no node of their own, so their fields are
	/// visited one level below the array.
	pub fn walk(&self, visit: &mut impl FnMut(&Node, u32)) {
		self.walk_at(0, visit);
	}

	fn walk_at(&self, depth: u32, visit: &mut impl FnMut(&Node, u32)) {
		visit(self, depth);
		match &self.value {
			Value::Struct(record) => {
				for child in record.iter() {
					child.walk_at(depth + 1, visit);
				}
			}
			Value::Array(Array::Struct(items)) => {
				for child in items.iter().flat_map(Record::iter) {
					child.walk_at(depth + 1, visit);
				}
			}
			_ => {}
		}
	}
}

/// Mutable payload handle that keeps the node's kind fixed.
pub struct ValueMut<'a>(&'a mut Value);

impl ValueMut<'_> {
	/// Mutably borrow the payload as `T`, failing on a kind mismatch.
	pub fn get<T: FieldType>(&mut self) -> Result<&mut T> {
		let got = self.0.label();
		T::from_value_mut(self.0).ok_or(ProtoError::TypeMismatch { expected: T::LABEL, got })
	}
}

/// Rust type that a node payload can be viewed as.
pub trait FieldType: Sized {
	/// Kind label reported in mismatch errors.
	const LABEL: &'static str;

	/// Borrow from a matching payload.
	fn from_value(value: &Value) -> Option<&Self>;

	/// Mutably borrow from a matching payload.
	fn from_value_mut(value: &mut Value) -> Option<&mut Self>;

	/// Take a matching payload, or hand it back.
	fn from_owned(value: Value) -> std::result::Result<Self, Value>;
}

macro_rules! field_type {
	($ty:ty, $label:literal, Array::$element:ident) => {
		impl FieldType for $ty {
			const LABEL: &'static str = $label;

			fn from_value(value: &Value) -> Option<&Self> {
				match value {
					Value::Array(Array::$element(items)) => Some(items),
					_ => None,
				}
			}

			fn from_value_mut(value: &mut Value) -> Option<&mut Self> {
				match value {
					Value::Array(Array::$element(items)) => Some(items),
					_ => None,
				}
			}

			fn from_owned(value: Value) -> std::result::Result<Self, Value> {
				match value {
					Value::Array(Array::$element(items)) => Ok(items),
					other => Err(other),
				}
			}
		}
	};
	($ty:ty, $label:literal, $variant:ident) => {
		impl FieldType for $ty {
			const LABEL: &'static str = $label;

			fn from_value(value: &Value) -> Option<&Self> {
				match value {
					Value::$variant(inner) => Some(inner),
					_ => None,
				}
			}

			fn from_value_mut(value: &mut Value) -> Option<&mut Self> {
				match value {
					Value::$variant(inner) => Some(inner),
					_ => None,
				}
			}

			fn from_owned(value: Value) -> std::result::Result<Self, Value> {
				match value {
					Value::$variant(inner) => Ok(inner),
					other => Err(other),
				}
			}
		}
	};
}

field_type!(i32, "int32", Int32);
field_type!(u64, "uint64", Uint64);
field_type!(f64, "float64", Float64);
field_type!(String, "string", String);
field_type!(Blob, "blob", Blob);
field_type!(Array, "array", Array);
field_type!(Record, "struct", Struct);
field_type!(Vec<i32>, "array<int32>", Array::Int32);
field_type!(Vec<u64>, "array<uint64>", Array::Uint64);
field_type!(Vec<f64>, "array<float64>", Array::Float64);
field_type!(Vec<String>, "array<string>", Array::String);
field_type!(Vec<Record>, "array<struct>", Array::Struct);

impl FieldType for Vec<u8> {
	const LABEL: &'static str = "blob";

	fn from_value(value: &Value) -> Option<&Self> {
		match value {
			Value::Blob(blob) => Some(&blob.bytes),
			_ => None,
		}
	}

	fn from_value_mut(value: &mut Value) -> Option<&mut Self> {
		match value {
			Value::Blob(blob) => Some(&mut blob.bytes),
			_ => None,
		}
	}

	fn from_owned(value: Value) -> std::result::Result<Self, Value> {
		match value {
			Value::Blob(blob) => Ok(blob.bytes),
			other => Err(other),
		}
	}
}

impl From<Blob> for Value {
	fn from(blob: Blob) -> Self {
		Self::Blob(blob)
	}
}

impl From<Array> for Value {
	fn from(array: Array) -> Self {
		Self::Array(array)
	}
}

impl From<Record> for Value {
	fn from(record: Record) -> Self {
		Self::Struct(record)
	}
}
