/// Ergonomic value shape used by application code.
///
/// Containers are plain: arrays and structs are ordered sequences, a
/// dictionary is a key-unique mapping, a variant is a tagged record carrying
/// its own signature text. Byte arrays get a dedicated carrier because the
/// wire boundary hands them over as a distinct physical buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Unsigned 8-bit integer.
	Byte(u8),
	/// Boolean.
	Bool(bool),
	/// Signed 16-bit integer.
	I16(i16),
	/// Unsigned 16-bit integer.
	U16(u16),
	/// Signed 32-bit integer.
	I32(i32),
	/// Unsigned 32-bit integer.
	U32(u32),
	/// Signed 64-bit integer.
	I64(i64),
	/// Unsigned 64-bit integer.
	U64(u64),
	/// IEEE 754 double.
	F64(f64),
	/// UTF-8 string.
	Str(Box<str>),
	/// Object path string.
	ObjectPath(Box<str>),
	/// Type signature string.
	Signature(Box<str>),
	/// Validated byte array.
	Bytes(Vec<u8>),
	/// Ordered sequence of homogeneous elements.
	Array(Vec<Value>),
	/// Ordered sequence of positional fields.
	Struct(Vec<Value>),
	/// Key-unique mapping with scalar keys.
	Dict(Dict),
	/// Tagged record holding a signature and a payload of that type.
	Variant {
		/// Signature text describing the payload.
		sig: Box<str>,
		/// Payload value conforming to `sig`.
		value: Box<Value>,
	},
}

impl Value {
	/// Whether this value is a scalar (non-container) leaf.
	pub fn is_scalar(&self) -> bool {
		!matches!(
			self,
			Value::Bytes(_) | Value::Array(_) | Value::Struct(_) | Value::Dict(_) | Value::Variant { .. }
		)
	}

	/// Logical kind label used in diagnostics.
	pub fn kind(&self) -> &'static str {
		match self {
			Value::Byte(_) => "byte",
			Value::Bool(_) => "bool",
			Value::I16(_) => "int16",
			Value::U16(_) => "uint16",
			Value::I32(_) => "int32",
			Value::U32(_) => "uint32",
			Value::I64(_) => "int64",
			Value::U64(_) => "uint64",
			Value::F64(_) => "double",
			Value::Str(_) => "string",
			Value::ObjectPath(_) => "object path",
			Value::Signature(_) => "signature",
			Value::Bytes(_) => "byte array",
			Value::Array(_) => "array",
			Value::Struct(_) => "struct",
			Value::Dict(_) => "dict",
			Value::Variant { .. } => "variant",
		}
	}
}

/// Insertion-ordered, key-unique dictionary with scalar keys.
///
/// Iteration order is insertion order; inserting an existing key overwrites
/// its value in place (last write wins).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dict {
	entries: Vec<(Value, Value)>,
}

impl Dict {
	/// Create an empty dictionary.
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert a key/value pair, overwriting any existing entry for the key.
	pub fn insert(&mut self, key: Value, value: Value) {
		if let Some(entry) = self.entries.iter_mut().find(|(existing, _)| *existing == key) {
			entry.1 = value;
		} else {
			self.entries.push((key, value));
		}
	}

	/// Look up the value stored under a key.
	pub fn get(&self, key: &Value) -> Option<&Value> {
		self.entries.iter().find(|(existing, _)| existing == key).map(|(_, value)| value)
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the dictionary holds no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterate entries in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
		self.entries.iter().map(|(key, value)| (key, value))
	}
}

impl FromIterator<(Value, Value)> for Dict {
	fn from_iter<T: IntoIterator<Item = (Value, Value)>>(iter: T) -> Self {
		let mut dict = Dict::new();
		for (key, value) in iter {
			dict.insert(key, value);
		}
		dict
	}
}

/// Wire-shaped value as exchanged with the byte-level marshaller.
///
/// Every container arrives as an ordered `Seq`: arrays element by element,
/// structs field by field, dictionaries as 2-element key/value pairs, and
/// variants as a `[signature, payload]` pair. Byte-array bodies arrive in
/// the raw buffer carrier with elements not yet range-validated.
#[derive(Debug, Clone, PartialEq)]
pub enum WireValue {
	/// Unsigned 8-bit integer.
	Byte(u8),
	/// Boolean.
	Bool(bool),
	/// Signed 16-bit integer.
	I16(i16),
	/// Unsigned 16-bit integer.
	U16(u16),
	/// Signed 32-bit integer.
	I32(i32),
	/// Unsigned 32-bit integer.
	U32(u32),
	/// Signed 64-bit integer.
	I64(i64),
	/// Unsigned 64-bit integer.
	U64(u64),
	/// IEEE 754 double.
	F64(f64),
	/// UTF-8 string.
	Str(Box<str>),
	/// Object path string.
	ObjectPath(Box<str>),
	/// Type signature string.
	Signature(Box<str>),
	/// Ordered sequence carrying any container shape.
	Seq(Vec<WireValue>),
	/// Raw byte-buffer payload with unvalidated elements.
	Bytes(Vec<i64>),
}

impl WireValue {
	/// Whether this wire value is a container carrier.
	pub fn is_container(&self) -> bool {
		matches!(self, WireValue::Seq(_) | WireValue::Bytes(_))
	}

	/// Logical kind label used in diagnostics.
	pub fn kind(&self) -> &'static str {
		match self {
			WireValue::Byte(_) => "byte",
			WireValue::Bool(_) => "bool",
			WireValue::I16(_) => "int16",
			WireValue::U16(_) => "uint16",
			WireValue::I32(_) => "int32",
			WireValue::U32(_) => "uint32",
			WireValue::I64(_) => "int64",
			WireValue::U64(_) => "uint64",
			WireValue::F64(_) => "double",
			WireValue::Str(_) => "string",
			WireValue::ObjectPath(_) => "object path",
			WireValue::Signature(_) => "signature",
			WireValue::Seq(_) => "sequence",
			WireValue::Bytes(_) => "byte buffer",
		}
	}
}
