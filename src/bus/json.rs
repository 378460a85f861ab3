use serde_json::json;

use crate::bus::sig::{self, SigNode};
use crate::bus::value::{Dict, Value, WireValue};
use crate::bus::{BusError, Result};

/// Build an ergonomic value from JSON, guided by a signature tree node.
///
/// Scalars come from JSON numbers/strings/booleans, arrays and structs from
/// JSON arrays, dictionaries from JSON objects (string-keyed) or arrays of
/// `[key, value]` pairs, and variants from `{"type", "value"}` objects.
pub fn value_from_json(json: &serde_json::Value, node: &SigNode) -> Result<Value> {
	match node {
		SigNode::Array(element) => match element.as_ref() {
			SigNode::DictEntry(key_node, value_node) => dict_from_json(json, key_node, value_node),
			SigNode::Byte => byte_array_from_json(json),
			element => {
				let items = as_array(json, "array")?;
				let mut out = Vec::with_capacity(items.len());
				for item in items {
					out.push(value_from_json(item, element)?);
				}
				Ok(Value::Array(out))
			}
		},
		SigNode::Struct(fields) => {
			let items = as_array(json, "struct array")?;
			if items.len() != fields.len() {
				return Err(BusError::JsonShape {
					expected: "struct array of matching arity",
					got: format!("array of {} elements, signature has {}", items.len(), fields.len()),
				});
			}
			let mut out = Vec::with_capacity(items.len());
			for (item, field) in items.iter().zip(fields) {
				out.push(value_from_json(item, field)?);
			}
			Ok(Value::Struct(out))
		}
		SigNode::Variant => variant_from_json(json),
		SigNode::DictEntry(..) => Err(BusError::UnsupportedType { node: node.signature() }),
		scalar => scalar_from_json(json, scalar),
	}
}

/// Render an ergonomic value as JSON.
pub fn value_to_json(value: &Value) -> serde_json::Value {
	match value {
		Value::Byte(item) => json!(item),
		Value::Bool(item) => json!(item),
		Value::I16(item) => json!(item),
		Value::U16(item) => json!(item),
		Value::I32(item) => json!(item),
		Value::U32(item) => json!(item),
		Value::I64(item) => json!(item),
		Value::U64(item) => json!(item),
		Value::F64(item) => json!(item),
		Value::Str(item) | Value::ObjectPath(item) | Value::Signature(item) => json!(item),
		Value::Bytes(bytes) => json!(bytes),
		Value::Array(items) | Value::Struct(items) => serde_json::Value::Array(items.iter().map(value_to_json).collect()),
		Value::Dict(dict) => dict_to_json(dict),
		Value::Variant { sig, value } => json!({ "type": sig, "value": value_to_json(value) }),
	}
}

/// Build a wire-shaped value from JSON, guided by a signature tree node.
///
/// Mirrors the wire shape exactly: containers are JSON arrays, dictionary
/// entries 2-element arrays, variants `[signature, payload]` pairs with
/// container payloads boxed one extra level, and byte-array bodies arrays
/// of integers loaded into the raw buffer carrier without range checks.
pub fn wire_from_json(json: &serde_json::Value, node: &SigNode) -> Result<WireValue> {
	match node {
		SigNode::Array(element) => match element.as_ref() {
			SigNode::DictEntry(key_node, value_node) => {
				let entries = as_array(json, "array of dict entries")?;
				let mut out = Vec::with_capacity(entries.len());
				for entry in entries {
					let pair = as_array(entry, "2-element dict entry")?;
					let [key, value] = pair.as_slice() else {
						return Err(BusError::JsonShape {
							expected: "2-element dict entry",
							got: format!("array of {} elements", pair.len()),
						});
					};
					out.push(WireValue::Seq(vec![wire_from_json(key, key_node)?, wire_from_json(value, value_node)?]));
				}
				Ok(WireValue::Seq(out))
			}
			SigNode::Byte => {
				let items = as_array(json, "byte buffer array")?;
				let mut raw = Vec::with_capacity(items.len());
				for item in items {
					raw.push(item.as_i64().ok_or_else(|| shape("integer", item))?);
				}
				Ok(WireValue::Bytes(raw))
			}
			element => {
				let items = as_array(json, "array")?;
				let mut out = Vec::with_capacity(items.len());
				for item in items {
					out.push(wire_from_json(item, element)?);
				}
				Ok(WireValue::Seq(out))
			}
		},
		SigNode::Struct(fields) => {
			let items = as_array(json, "struct array")?;
			if items.len() != fields.len() {
				return Err(BusError::JsonShape {
					expected: "struct array of matching arity",
					got: format!("array of {} elements, signature has {}", items.len(), fields.len()),
				});
			}
			let mut out = Vec::with_capacity(items.len());
			for (item, field) in items.iter().zip(fields) {
				out.push(wire_from_json(item, field)?);
			}
			Ok(WireValue::Seq(out))
		}
		SigNode::Variant => wire_variant_from_json(json),
		SigNode::DictEntry(..) => Err(BusError::UnsupportedType { node: node.signature() }),
		scalar => wire_scalar_from_json(json, scalar),
	}
}

/// Render a wire-shaped value as JSON.
pub fn wire_to_json(wire: &WireValue) -> serde_json::Value {
	match wire {
		WireValue::Byte(item) => json!(item),
		WireValue::Bool(item) => json!(item),
		WireValue::I16(item) => json!(item),
		WireValue::U16(item) => json!(item),
		WireValue::I32(item) => json!(item),
		WireValue::U32(item) => json!(item),
		WireValue::I64(item) => json!(item),
		WireValue::U64(item) => json!(item),
		WireValue::F64(item) => json!(item),
		WireValue::Str(item) | WireValue::ObjectPath(item) | WireValue::Signature(item) => json!(item),
		WireValue::Seq(items) => serde_json::Value::Array(items.iter().map(wire_to_json).collect()),
		WireValue::Bytes(raw) => json!(raw),
	}
}

fn scalar_from_json(json: &serde_json::Value, node: &SigNode) -> Result<Value> {
	let value = match node {
		SigNode::Byte => Value::Byte(int_in_range(json, 0, 255)? as u8),
		SigNode::Bool => Value::Bool(json.as_bool().ok_or_else(|| shape("boolean", json))?),
		SigNode::Int16 => Value::I16(int_in_range(json, i64::from(i16::MIN), i64::from(i16::MAX))? as i16),
		SigNode::UInt16 => Value::U16(int_in_range(json, 0, i64::from(u16::MAX))? as u16),
		SigNode::Int32 => Value::I32(int_in_range(json, i64::from(i32::MIN), i64::from(i32::MAX))? as i32),
		SigNode::UInt32 => Value::U32(int_in_range(json, 0, i64::from(u32::MAX))? as u32),
		SigNode::Int64 => Value::I64(json.as_i64().ok_or_else(|| shape("integer", json))?),
		SigNode::UInt64 => Value::U64(json.as_u64().ok_or_else(|| shape("unsigned integer", json))?),
		SigNode::Double => Value::F64(json.as_f64().ok_or_else(|| shape("number", json))?),
		SigNode::Str => Value::Str(as_str(json)?.into()),
		SigNode::ObjectPath => Value::ObjectPath(as_str(json)?.into()),
		SigNode::Signature => Value::Signature(as_str(json)?.into()),
		other => return Err(BusError::UnsupportedType { node: other.signature() }),
	};
	Ok(value)
}

fn wire_scalar_from_json(json: &serde_json::Value, node: &SigNode) -> Result<WireValue> {
	let wire = match scalar_from_json(json, node)? {
		Value::Byte(item) => WireValue::Byte(item),
		Value::Bool(item) => WireValue::Bool(item),
		Value::I16(item) => WireValue::I16(item),
		Value::U16(item) => WireValue::U16(item),
		Value::I32(item) => WireValue::I32(item),
		Value::U32(item) => WireValue::U32(item),
		Value::I64(item) => WireValue::I64(item),
		Value::U64(item) => WireValue::U64(item),
		Value::F64(item) => WireValue::F64(item),
		Value::Str(item) => WireValue::Str(item),
		Value::ObjectPath(item) => WireValue::ObjectPath(item),
		Value::Signature(item) => WireValue::Signature(item),
		other => {
			return Err(BusError::JsonShape {
				expected: "scalar",
				got: other.kind().to_owned(),
			});
		}
	};
	Ok(wire)
}

fn byte_array_from_json(json: &serde_json::Value) -> Result<Value> {
	let items = as_array(json, "byte array")?;
	let mut bytes = Vec::with_capacity(items.len());
	for item in items {
		bytes.push(int_in_range(item, 0, 255)? as u8);
	}
	Ok(Value::Bytes(bytes))
}

fn dict_from_json(json: &serde_json::Value, key_node: &SigNode, value_node: &SigNode) -> Result<Value> {
	let mut dict = Dict::new();
	match json {
		serde_json::Value::Object(map) => {
			for (key, value) in map {
				let key = scalar_from_json(&json!(key), key_node)?;
				dict.insert(key, value_from_json(value, value_node)?);
			}
		}
		serde_json::Value::Array(entries) => {
			for entry in entries {
				let pair = as_array(entry, "2-element dict entry")?;
				let [key, value] = pair.as_slice() else {
					return Err(BusError::JsonShape {
						expected: "2-element dict entry",
						got: format!("array of {} elements", pair.len()),
					});
				};
				dict.insert(value_from_json(key, key_node)?, value_from_json(value, value_node)?);
			}
		}
		other => return Err(shape("object or array of pairs", other)),
	}
	Ok(Value::Dict(dict))
}

fn dict_to_json(dict: &Dict) -> serde_json::Value {
	let stringy = dict.iter().all(|(key, _)| matches!(key, Value::Str(_) | Value::ObjectPath(_) | Value::Signature(_)));
	if stringy {
		let mut map = serde_json::Map::with_capacity(dict.len());
		for (key, value) in dict.iter() {
			let (Value::Str(text) | Value::ObjectPath(text) | Value::Signature(text)) = key else {
				continue;
			};
			map.insert(text.to_string(), value_to_json(value));
		}
		return serde_json::Value::Object(map);
	}

	serde_json::Value::Array(
		dict.iter()
			.map(|(key, value)| serde_json::Value::Array(vec![value_to_json(key), value_to_json(value)]))
			.collect(),
	)
}

fn variant_from_json(json: &serde_json::Value) -> Result<Value> {
	let map = json.as_object().ok_or_else(|| shape("variant object", json))?;
	let tag = map.get("type").and_then(serde_json::Value::as_str).ok_or_else(|| shape("variant \"type\" string", json))?;
	let payload = map.get("value").ok_or_else(|| shape("variant \"value\" field", json))?;

	let tree = sig::parse_one(tag)?;
	Ok(Value::Variant {
		sig: tag.into(),
		value: Box::new(value_from_json(payload, &tree)?),
	})
}

fn wire_variant_from_json(json: &serde_json::Value) -> Result<WireValue> {
	let pair = as_array(json, "[signature, payload] pair")?;
	let [tag, payload] = pair.as_slice() else {
		return Err(BusError::JsonShape {
			expected: "[signature, payload] pair",
			got: format!("array of {} elements", pair.len()),
		});
	};
	let tag = tag.as_str().ok_or_else(|| shape("signature string", tag))?;
	let tree = sig::parse_one(tag)?;

	let payload = if tree.is_scalar() {
		wire_from_json(payload, &tree)?
	} else {
		let boxed = as_array(payload, "boxed container payload")?;
		let [inner] = boxed.as_slice() else {
			return Err(BusError::JsonShape {
				expected: "singleton boxed payload",
				got: format!("array of {} elements", boxed.len()),
			});
		};
		WireValue::Seq(vec![wire_from_json(inner, &tree)?])
	};
	Ok(WireValue::Seq(vec![WireValue::Signature(tag.into()), payload]))
}

fn as_array<'a>(json: &'a serde_json::Value, expected: &'static str) -> Result<&'a Vec<serde_json::Value>> {
	match json {
		serde_json::Value::Array(items) => Ok(items),
		other => Err(shape(expected, other)),
	}
}

fn as_str(json: &serde_json::Value) -> Result<&str> {
	json.as_str().ok_or_else(|| shape("string", json))
}

fn int_in_range(json: &serde_json::Value, min: i64, max: i64) -> Result<i64> {
	let value = json.as_i64().ok_or_else(|| shape("integer", json))?;
	if value < min || value > max {
		return Err(BusError::JsonShape {
			expected: "integer in range",
			got: format!("{value} outside {min}..={max}"),
		});
	}
	Ok(value)
}

fn shape(expected: &'static str, got: &serde_json::Value) -> BusError {
	BusError::JsonShape {
		expected,
		got: describe(got),
	}
}

fn describe(json: &serde_json::Value) -> String {
	match json {
		serde_json::Value::Null => "null".to_owned(),
		serde_json::Value::Bool(_) => "boolean".to_owned(),
		serde_json::Value::Number(_) => "number".to_owned(),
		serde_json::Value::String(_) => "string".to_owned(),
		serde_json::Value::Array(items) => format!("array of {} elements", items.len()),
		serde_json::Value::Object(_) => "object".to_owned(),
	}
}
