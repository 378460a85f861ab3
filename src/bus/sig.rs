use std::fmt;

use crate::bus::{BusError, Result};

/// Container nesting ceiling shared by the parser and both transcoders.
pub const MAX_NESTING_DEPTH: u32 = 64;

/// One parsed signature tree node.
///
/// Child arity is fixed per tag: scalars and `Variant` are leaves, `Array`
/// holds exactly one element type, `DictEntry` exactly a key and a value,
/// `Struct` one or more field types. A `DictEntry` is only ever produced as
/// the sole child of an `Array`, which marks that array as a dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SigNode {
	/// Unsigned 8-bit integer (`y`).
	Byte,
	/// Boolean (`b`).
	Bool,
	/// Signed 16-bit integer (`n`).
	Int16,
	/// Unsigned 16-bit integer (`q`).
	UInt16,
	/// Signed 32-bit integer (`i`).
	Int32,
	/// Unsigned 32-bit integer (`u`).
	UInt32,
	/// Signed 64-bit integer (`x`).
	Int64,
	/// Unsigned 64-bit integer (`t`).
	UInt64,
	/// IEEE 754 double (`d`).
	Double,
	/// UTF-8 string (`s`).
	Str,
	/// Object path string (`o`).
	ObjectPath,
	/// Type signature string (`g`).
	Signature,
	/// Array of one element type (`a...`).
	Array(Box<SigNode>),
	/// Dictionary entry key/value pair (`{kv}`), sole child of an `Array`.
	DictEntry(Box<SigNode>, Box<SigNode>),
	/// Struct with positional field types (`(...)`).
	Struct(Vec<SigNode>),
	/// Self-describing variant (`v`); element type carried by the value.
	Variant,
}

impl SigNode {
	/// Whether this node is a scalar (single-value, non-container) type.
	pub fn is_scalar(&self) -> bool {
		!matches!(self, SigNode::Array(_) | SigNode::DictEntry(..) | SigNode::Struct(_) | SigNode::Variant)
	}

	/// Render the node back to signature text.
	pub fn signature(&self) -> String {
		self.to_string()
	}
}

impl fmt::Display for SigNode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SigNode::Byte => f.write_str("y"),
			SigNode::Bool => f.write_str("b"),
			SigNode::Int16 => f.write_str("n"),
			SigNode::UInt16 => f.write_str("q"),
			SigNode::Int32 => f.write_str("i"),
			SigNode::UInt32 => f.write_str("u"),
			SigNode::Int64 => f.write_str("x"),
			SigNode::UInt64 => f.write_str("t"),
			SigNode::Double => f.write_str("d"),
			SigNode::Str => f.write_str("s"),
			SigNode::ObjectPath => f.write_str("o"),
			SigNode::Signature => f.write_str("g"),
			SigNode::Array(element) => write!(f, "a{element}"),
			SigNode::DictEntry(key, value) => write!(f, "{{{key}{value}}}"),
			SigNode::Struct(fields) => {
				f.write_str("(")?;
				for field in fields {
					write!(f, "{field}")?;
				}
				f.write_str(")")
			}
			SigNode::Variant => f.write_str("v"),
		}
	}
}

/// Parse signature text into a sequence of complete type trees.
pub fn parse(text: &str) -> Result<Vec<SigNode>> {
	let mut parser = Parser { bytes: text.as_bytes(), pos: 0 };
	let mut nodes = Vec::new();
	while parser.pos < parser.bytes.len() {
		nodes.push(parser.parse_type(0)?);
	}
	Ok(nodes)
}

/// Parse signature text that must contain exactly one complete type.
pub fn parse_one(text: &str) -> Result<SigNode> {
	let mut nodes = parse(text)?;
	if nodes.len() != 1 {
		return Err(BusError::SigExpectedSingle { got: nodes.len() });
	}
	Ok(nodes.remove(0))
}

struct Parser<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl Parser<'_> {
	fn peek(&self) -> Option<u8> {
		self.bytes.get(self.pos).copied()
	}

	fn parse_type(&mut self, depth: u32) -> Result<SigNode> {
		if depth >= MAX_NESTING_DEPTH {
			return Err(BusError::SigDepthExceeded { max: MAX_NESTING_DEPTH });
		}

		let at = self.pos;
		let code = self.bytes.get(at).copied().ok_or(BusError::SigMissingArrayElement { at })?;
		self.pos += 1;

		match code {
			b'y' => Ok(SigNode::Byte),
			b'b' => Ok(SigNode::Bool),
			b'n' => Ok(SigNode::Int16),
			b'q' => Ok(SigNode::UInt16),
			b'i' => Ok(SigNode::Int32),
			b'u' => Ok(SigNode::UInt32),
			b'x' => Ok(SigNode::Int64),
			b't' => Ok(SigNode::UInt64),
			b'd' => Ok(SigNode::Double),
			b's' => Ok(SigNode::Str),
			b'o' => Ok(SigNode::ObjectPath),
			b'g' => Ok(SigNode::Signature),
			b'v' => Ok(SigNode::Variant),
			b'a' => self.parse_array_element(at, depth),
			b'(' => self.parse_struct(at, depth),
			b'{' => Err(BusError::SigDictEntryOutsideArray { at }),
			other => Err(BusError::SigUnexpectedChar { ch: char::from(other), at }),
		}
	}

	fn parse_array_element(&mut self, array_at: usize, depth: u32) -> Result<SigNode> {
		match self.peek() {
			None => Err(BusError::SigMissingArrayElement { at: array_at }),
			Some(b'{') => {
				let brace_at = self.pos;
				self.pos += 1;
				let entry = self.parse_dict_entry(brace_at, depth + 1)?;
				Ok(SigNode::Array(Box::new(entry)))
			}
			Some(_) => {
				let element = self.parse_type(depth + 1)?;
				Ok(SigNode::Array(Box::new(element)))
			}
		}
	}

	fn parse_dict_entry(&mut self, brace_at: usize, depth: u32) -> Result<SigNode> {
		let key_at = self.pos;
		if self.peek().is_none() {
			return Err(BusError::SigUnterminatedDictEntry { at: brace_at });
		}
		let key = self.parse_type(depth + 1)?;
		if !key.is_scalar() {
			return Err(BusError::SigDictKeyNotScalar { at: key_at });
		}

		if self.peek().is_none() {
			return Err(BusError::SigUnterminatedDictEntry { at: brace_at });
		}
		let value = self.parse_type(depth + 1)?;

		if self.peek() != Some(b'}') {
			return Err(BusError::SigUnterminatedDictEntry { at: brace_at });
		}
		self.pos += 1;

		Ok(SigNode::DictEntry(Box::new(key), Box::new(value)))
	}

	fn parse_struct(&mut self, open_at: usize, depth: u32) -> Result<SigNode> {
		let mut fields = Vec::new();
		loop {
			match self.peek() {
				None => return Err(BusError::SigUnterminatedStruct { at: open_at }),
				Some(b')') => {
					self.pos += 1;
					break;
				}
				Some(_) => fields.push(self.parse_type(depth + 1)?),
			}
		}

		if fields.is_empty() {
			return Err(BusError::SigEmptyStruct { at: open_at });
		}
		Ok(SigNode::Struct(fields))
	}
}
