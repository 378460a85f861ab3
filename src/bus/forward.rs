use crate::bus::sig::{self, MAX_NESTING_DEPTH, SigNode};
use crate::bus::value::{Value, WireValue};
use crate::bus::{BusError, Result};

/// Convert an ergonomic value into its wire-shaped counterpart, guided by a
/// signature tree node.
///
/// Structure-only: scalar leaves pass through unchanged and value-level
/// range checking is left to the byte-level marshaller. The conversion is
/// pure and total over the signature grammar; malformed input is rejected
/// with a typed error, never coerced.
pub fn transcode_forward(value: &Value, node: &SigNode) -> Result<WireValue> {
	forward(value, node, 0)
}

fn forward(value: &Value, node: &SigNode, depth: u32) -> Result<WireValue> {
	if depth >= MAX_NESTING_DEPTH {
		return Err(BusError::NestingTooDeep { max: MAX_NESTING_DEPTH });
	}

	match node {
		SigNode::Array(element) => match element.as_ref() {
			SigNode::DictEntry(key_node, value_node) => forward_dict(value, key_node, value_node, depth),
			element => forward_array(value, element, depth),
		},
		SigNode::Struct(fields) => forward_struct(value, fields, depth),
		SigNode::Variant => forward_variant(value, depth),
		SigNode::DictEntry(..) => Err(BusError::UnsupportedType { node: node.signature() }),
		_ => forward_scalar(value),
	}
}

fn forward_scalar(value: &Value) -> Result<WireValue> {
	let wire = match value {
		Value::Byte(item) => WireValue::Byte(*item),
		Value::Bool(item) => WireValue::Bool(*item),
		Value::I16(item) => WireValue::I16(*item),
		Value::U16(item) => WireValue::U16(*item),
		Value::I32(item) => WireValue::I32(*item),
		Value::U32(item) => WireValue::U32(*item),
		Value::I64(item) => WireValue::I64(*item),
		Value::U64(item) => WireValue::U64(*item),
		Value::F64(item) => WireValue::F64(*item),
		Value::Str(item) => WireValue::Str(item.clone()),
		Value::ObjectPath(item) => WireValue::ObjectPath(item.clone()),
		Value::Signature(item) => WireValue::Signature(item.clone()),
		other => {
			return Err(BusError::TypeMismatch {
				expected: "scalar",
				got: other.kind().to_owned(),
			});
		}
	};
	Ok(wire)
}

fn forward_array(value: &Value, element: &SigNode, depth: u32) -> Result<WireValue> {
	match value {
		// Byte arrays travel in the raw buffer carrier the marshaller expects.
		Value::Bytes(bytes) if *element == SigNode::Byte => Ok(WireValue::Bytes(bytes.iter().map(|byte| i64::from(*byte)).collect())),
		Value::Array(items) => {
			let mut out = Vec::with_capacity(items.len());
			for item in items {
				out.push(forward(item, element, depth + 1)?);
			}
			Ok(WireValue::Seq(out))
		}
		other => Err(BusError::TypeMismatch {
			expected: "array",
			got: other.kind().to_owned(),
		}),
	}
}

fn forward_struct(value: &Value, fields: &[SigNode], depth: u32) -> Result<WireValue> {
	let Value::Struct(items) = value else {
		return Err(BusError::TypeMismatch {
			expected: "struct",
			got: value.kind().to_owned(),
		});
	};
	if items.len() != fields.len() {
		return Err(BusError::TypeMismatch {
			expected: "struct of matching arity",
			got: format!("struct of {} fields, signature has {}", items.len(), fields.len()),
		});
	}

	let mut out = Vec::with_capacity(items.len());
	for (item, field) in items.iter().zip(fields) {
		out.push(forward(item, field, depth + 1)?);
	}
	Ok(WireValue::Seq(out))
}

fn forward_dict(value: &Value, key_node: &SigNode, value_node: &SigNode, depth: u32) -> Result<WireValue> {
	let Value::Dict(dict) = value else {
		return Err(BusError::TypeMismatch {
			expected: "dict",
			got: value.kind().to_owned(),
		});
	};

	let mut out = Vec::with_capacity(dict.len());
	for (key, item) in dict.iter() {
		if !key.is_scalar() {
			return Err(BusError::InvalidKeyType { got: key.kind().to_owned() });
		}
		let pair = vec![forward(key, key_node, depth + 1)?, forward(item, value_node, depth + 1)?];
		out.push(WireValue::Seq(pair));
	}
	Ok(WireValue::Seq(out))
}

fn forward_variant(value: &Value, depth: u32) -> Result<WireValue> {
	let Value::Variant { sig, value: payload } = value else {
		return Err(BusError::MalformedVariant {
			reason: format!("expected a variant record, got {}", value.kind()),
		});
	};

	let tree = sig::parse_one(sig).map_err(|err| BusError::MalformedVariant {
		reason: format!("signature {sig:?}: {err}"),
	})?;

	let converted = forward(payload, &tree, depth + 1)?;
	// Container payloads are pre-wrapped one extra level for the marshaller;
	// scalar payloads travel bare.
	let wrapped = if converted.is_container() {
		WireValue::Seq(vec![converted])
	} else {
		converted
	};
	Ok(WireValue::Seq(vec![WireValue::Signature(sig.clone()), wrapped]))
}

#[cfg(test)]
mod tests {
	use super::transcode_forward;
	use crate::bus::sig::parse_one;
	use crate::bus::value::{Dict, Value, WireValue};
	use crate::bus::{BusError, SigNode};

	#[test]
	fn scalar_passes_through_unchanged() {
		let node = parse_one("s").expect("signature parses");
		let wire = transcode_forward(&Value::Str("hello".into()), &node).expect("forward succeeds");
		assert_eq!(wire, WireValue::Str("hello".into()));
	}

	#[test]
	fn int_array_maps_elementwise() {
		let node = parse_one("ai").expect("signature parses");
		let value = Value::Array(vec![Value::I32(1), Value::I32(2), Value::I32(3)]);
		let wire = transcode_forward(&value, &node).expect("forward succeeds");
		assert_eq!(wire, WireValue::Seq(vec![WireValue::I32(1), WireValue::I32(2), WireValue::I32(3)]));
	}

	#[test]
	fn byte_array_uses_raw_buffer_carrier() {
		let node = parse_one("ay").expect("signature parses");
		let wire = transcode_forward(&Value::Bytes(vec![0, 127, 255]), &node).expect("forward succeeds");
		assert_eq!(wire, WireValue::Bytes(vec![0, 127, 255]));
	}

	#[test]
	fn struct_arity_mismatch_is_rejected() {
		let node = parse_one("(is)").expect("signature parses");
		let value = Value::Struct(vec![Value::I32(42)]);
		let err = transcode_forward(&value, &node).expect_err("short struct rejected");
		assert!(matches!(err, BusError::TypeMismatch { .. }));
	}

	#[test]
	fn dict_emits_pairs_in_iteration_order() {
		let node = parse_one("a{si}").expect("signature parses");
		let dict: Dict = [
			(Value::Str("a".into()), Value::I32(1)),
			(Value::Str("b".into()), Value::I32(2)),
		]
		.into_iter()
		.collect();

		let wire = transcode_forward(&Value::Dict(dict), &node).expect("forward succeeds");
		assert_eq!(
			wire,
			WireValue::Seq(vec![
				WireValue::Seq(vec![WireValue::Str("a".into()), WireValue::I32(1)]),
				WireValue::Seq(vec![WireValue::Str("b".into()), WireValue::I32(2)]),
			])
		);
	}

	#[test]
	fn dict_container_key_is_rejected() {
		// Hand-built node: the parser refuses container keys, the transcoder
		// must still reject a conforming value with a container key.
		let node = SigNode::Array(Box::new(SigNode::DictEntry(Box::new(SigNode::Str), Box::new(SigNode::Int32))));
		let dict: Dict = [(Value::Array(vec![]), Value::I32(1))].into_iter().collect();
		let err = transcode_forward(&Value::Dict(dict), &node).expect_err("container key rejected");
		assert!(matches!(err, BusError::InvalidKeyType { .. }));
	}

	#[test]
	fn scalar_variant_payload_is_not_wrapped() {
		let node = parse_one("v").expect("signature parses");
		let value = Value::Variant {
			sig: "i".into(),
			value: Box::new(Value::I32(7)),
		};
		let wire = transcode_forward(&value, &node).expect("forward succeeds");
		assert_eq!(wire, WireValue::Seq(vec![WireValue::Signature("i".into()), WireValue::I32(7)]));
	}

	#[test]
	fn container_variant_payload_gets_one_extra_wrap() {
		let node = parse_one("v").expect("signature parses");
		let value = Value::Variant {
			sig: "ai".into(),
			value: Box::new(Value::Array(vec![Value::I32(1), Value::I32(2)])),
		};
		let wire = transcode_forward(&value, &node).expect("forward succeeds");
		assert_eq!(
			wire,
			WireValue::Seq(vec![
				WireValue::Signature("ai".into()),
				WireValue::Seq(vec![WireValue::Seq(vec![WireValue::I32(1), WireValue::I32(2)])]),
			])
		);
	}

	#[test]
	fn variant_with_multi_type_signature_is_rejected() {
		let node = parse_one("v").expect("signature parses");
		let value = Value::Variant {
			sig: "ii".into(),
			value: Box::new(Value::I32(7)),
		};
		let err = transcode_forward(&value, &node).expect_err("multi-type variant rejected");
		assert!(matches!(err, BusError::MalformedVariant { .. }));
	}

	#[test]
	fn bare_dict_entry_node_is_unsupported() {
		let node = SigNode::DictEntry(Box::new(SigNode::Str), Box::new(SigNode::Int32));
		let err = transcode_forward(&Value::I32(1), &node).expect_err("bare dict entry rejected");
		assert!(matches!(err, BusError::UnsupportedType { .. }));
	}

	#[test]
	fn hand_built_deep_nesting_is_rejected() {
		let mut node = SigNode::Int32;
		for _ in 0..80 {
			node = SigNode::Array(Box::new(node));
		}
		let mut value = Value::I32(1);
		for _ in 0..80 {
			value = Value::Array(vec![value]);
		}
		let err = transcode_forward(&value, &node).expect_err("deep nesting rejected");
		assert!(matches!(err, BusError::NestingTooDeep { .. }));
	}
}
