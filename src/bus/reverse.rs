use crate::bus::sig::{self, MAX_NESTING_DEPTH, SigNode};
use crate::bus::value::{Dict, Value, WireValue};
use crate::bus::{BusError, Result};

/// Convert a wire-shaped value into its ergonomic counterpart, guided by a
/// signature tree node.
///
/// Mirror image of the forward direction: dictionaries collapse from pair
/// sequences into mappings, variants drop their wire pair and yield the bare
/// payload, and raw byte buffers are range-checked into validated byte
/// arrays. That range check is the single value-level check performed here;
/// everything else is structural.
pub fn transcode_reverse(wire: &WireValue, node: &SigNode) -> Result<Value> {
	reverse(wire, node, 0)
}

fn reverse(wire: &WireValue, node: &SigNode, depth: u32) -> Result<Value> {
	if depth >= MAX_NESTING_DEPTH {
		return Err(BusError::NestingTooDeep { max: MAX_NESTING_DEPTH });
	}

	match node {
		SigNode::Array(element) => match element.as_ref() {
			SigNode::DictEntry(key_node, value_node) => reverse_dict(wire, key_node, value_node, depth),
			element => reverse_array(wire, element, depth),
		},
		SigNode::Struct(fields) => reverse_struct(wire, fields, depth),
		SigNode::Variant => reverse_variant(wire, depth),
		SigNode::DictEntry(..) => Err(BusError::UnsupportedType { node: node.signature() }),
		_ => reverse_scalar(wire),
	}
}

fn reverse_scalar(wire: &WireValue) -> Result<Value> {
	let value = match wire {
		WireValue::Byte(item) => Value::Byte(*item),
		WireValue::Bool(item) => Value::Bool(*item),
		WireValue::I16(item) => Value::I16(*item),
		WireValue::U16(item) => Value::U16(*item),
		WireValue::I32(item) => Value::I32(*item),
		WireValue::U32(item) => Value::U32(*item),
		WireValue::I64(item) => Value::I64(*item),
		WireValue::U64(item) => Value::U64(*item),
		WireValue::F64(item) => Value::F64(*item),
		WireValue::Str(item) => Value::Str(item.clone()),
		WireValue::ObjectPath(item) => Value::ObjectPath(item.clone()),
		WireValue::Signature(item) => Value::Signature(item.clone()),
		other => {
			return Err(BusError::TypeMismatch {
				expected: "scalar",
				got: other.kind().to_owned(),
			});
		}
	};
	Ok(value)
}

fn reverse_array(wire: &WireValue, element: &SigNode, depth: u32) -> Result<Value> {
	match wire {
		WireValue::Bytes(raw) if *element == SigNode::Byte => reverse_byte_buffer(raw),
		WireValue::Seq(items) => {
			let mut out = Vec::with_capacity(items.len());
			for item in items {
				out.push(reverse(item, element, depth + 1)?);
			}
			Ok(Value::Array(out))
		}
		other => Err(BusError::TypeMismatch {
			expected: "sequence",
			got: other.kind().to_owned(),
		}),
	}
}

fn reverse_byte_buffer(raw: &[i64]) -> Result<Value> {
	let mut bytes = Vec::with_capacity(raw.len());
	for (index, item) in raw.iter().enumerate() {
		let byte = u8::try_from(*item).map_err(|_| BusError::ByteRange { value: *item, index })?;
		bytes.push(byte);
	}
	Ok(Value::Bytes(bytes))
}

fn reverse_struct(wire: &WireValue, fields: &[SigNode], depth: u32) -> Result<Value> {
	let WireValue::Seq(items) = wire else {
		return Err(BusError::TypeMismatch {
			expected: "sequence",
			got: wire.kind().to_owned(),
		});
	};
	if items.len() != fields.len() {
		return Err(BusError::TypeMismatch {
			expected: "struct of matching arity",
			got: format!("sequence of {} elements, signature has {}", items.len(), fields.len()),
		});
	}

	let mut out = Vec::with_capacity(items.len());
	for (item, field) in items.iter().zip(fields) {
		out.push(reverse(item, field, depth + 1)?);
	}
	Ok(Value::Struct(out))
}

fn reverse_dict(wire: &WireValue, key_node: &SigNode, value_node: &SigNode, depth: u32) -> Result<Value> {
	let WireValue::Seq(entries) = wire else {
		return Err(BusError::TypeMismatch {
			expected: "sequence of dict entries",
			got: wire.kind().to_owned(),
		});
	};

	let mut dict = Dict::new();
	for entry in entries {
		let WireValue::Seq(pair) = entry else {
			return Err(BusError::TypeMismatch {
				expected: "2-element dict entry",
				got: entry.kind().to_owned(),
			});
		};
		let [key, value] = pair.as_slice() else {
			return Err(BusError::TypeMismatch {
				expected: "2-element dict entry",
				got: format!("sequence of {} elements", pair.len()),
			});
		};
		// Duplicate keys overwrite earlier entries, last write wins.
		dict.insert(reverse(key, key_node, depth + 1)?, reverse(value, value_node, depth + 1)?);
	}
	Ok(Value::Dict(dict))
}

fn reverse_variant(wire: &WireValue, depth: u32) -> Result<Value> {
	let WireValue::Seq(pair) = wire else {
		return Err(BusError::MalformedVariant {
			reason: format!("expected a [signature, payload] pair, got {}", wire.kind()),
		});
	};
	let [tag, payload] = pair.as_slice() else {
		return Err(BusError::MalformedVariant {
			reason: format!("expected a 2-element pair, got {} elements", pair.len()),
		});
	};

	let text = match tag {
		WireValue::Signature(text) | WireValue::Str(text) => text,
		other => {
			return Err(BusError::MalformedVariant {
				reason: format!("expected a signature tag, got {}", other.kind()),
			});
		}
	};
	let tree = sig::parse_one(text).map_err(|err| BusError::MalformedVariant {
		reason: format!("signature {text:?}: {err}"),
	})?;

	// Container payloads carry the marshaller's extra singleton wrap; peel it
	// before converting. Scalar payloads travel bare.
	let payload = if tree.is_scalar() {
		payload
	} else {
		let WireValue::Seq(boxed) = payload else {
			return Err(BusError::MalformedVariant {
				reason: format!("container payload not boxed, got {}", payload.kind()),
			});
		};
		let [inner] = boxed.as_slice() else {
			return Err(BusError::MalformedVariant {
				reason: format!("container payload boxed {} times", boxed.len()),
			});
		};
		inner
	};

	reverse(payload, &tree, depth + 1)
}
