use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, BusError>;

/// Errors produced while parsing signatures and transcoding bus values.
#[derive(Debug, Error)]
pub enum BusError {
	/// Value's runtime shape disagrees with the signature node.
	#[error("type mismatch: expected {expected}, got {got}")]
	TypeMismatch {
		/// Shape required by the signature node.
		expected: &'static str,
		/// Logical kind of the offending value.
		got: String,
	},
	/// Dictionary key in the ergonomic representation is not scalar-typed.
	#[error("invalid dict key type: {got}")]
	InvalidKeyType {
		/// Logical kind of the offending key value.
		got: String,
	},
	/// Variant record or wire pair violated the variant shape rules.
	#[error("malformed variant: {reason}")]
	MalformedVariant {
		/// Human-readable shape violation.
		reason: String,
	},
	/// Raw byte-buffer element is outside the 0-255 range.
	#[error("byte out of range at index {index}: {value}")]
	ByteRange {
		/// Offending element value.
		value: i64,
		/// Element position inside the buffer.
		index: usize,
	},
	/// Signature node reached a transcoder arm it cannot occupy.
	#[error("unsupported signature node: {node}")]
	UnsupportedType {
		/// Rendered signature of the offending node.
		node: String,
	},
	/// Recursion depth exceeded the container nesting ceiling.
	#[error("nesting too deep (max={max})")]
	NestingTooDeep {
		/// Configured depth ceiling.
		max: u32,
	},
	/// Signature text contains a character outside the type grammar.
	#[error("unexpected signature character {ch:?} at {at}")]
	SigUnexpectedChar {
		/// Offending character.
		ch: char,
		/// Byte offset in the signature text.
		at: usize,
	},
	/// Array type code has no element type following it.
	#[error("array at {at} has no element type")]
	SigMissingArrayElement {
		/// Byte offset of the array code.
		at: usize,
	},
	/// Struct opened with `(` but never closed.
	#[error("unterminated struct opened at {at}")]
	SigUnterminatedStruct {
		/// Byte offset of the opening parenthesis.
		at: usize,
	},
	/// Struct contains no field types.
	#[error("empty struct at {at}")]
	SigEmptyStruct {
		/// Byte offset of the opening parenthesis.
		at: usize,
	},
	/// Dict entry opened with `{` but was not closed after key and value.
	#[error("unterminated dict entry opened at {at}")]
	SigUnterminatedDictEntry {
		/// Byte offset of the opening brace.
		at: usize,
	},
	/// Dict entry key type is not a scalar type code.
	#[error("dict key at {at} is not a scalar type")]
	SigDictKeyNotScalar {
		/// Byte offset of the key type code.
		at: usize,
	},
	/// Dict entry appeared outside an array element position.
	#[error("dict entry at {at} is only valid as an array element")]
	SigDictEntryOutsideArray {
		/// Byte offset of the opening brace.
		at: usize,
	},
	/// Signature nesting exceeded the container nesting ceiling.
	#[error("signature nesting too deep (max={max})")]
	SigDepthExceeded {
		/// Configured depth ceiling.
		max: u32,
	},
	/// Signature was expected to contain exactly one complete type.
	#[error("expected a single complete type, signature contains {got}")]
	SigExpectedSingle {
		/// Number of complete types parsed.
		got: usize,
	},
	/// JSON value shape does not fit the signature node.
	#[error("json shape mismatch: expected {expected}, got {got}")]
	JsonShape {
		/// JSON shape required by the signature node.
		expected: &'static str,
		/// Description of the offending JSON value.
		got: String,
	},
}
