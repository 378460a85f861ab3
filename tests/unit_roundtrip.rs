#![allow(missing_docs)]

use buscodec::bus::{Dict, SigNode, Value, WireValue, parse_one, transcode_forward, transcode_reverse};

#[test]
fn string_scalar_passes_both_directions_unchanged() {
	let node = parse_one("s").expect("signature parses");
	let value = Value::Str("hello".into());

	let wire = transcode_forward(&value, &node).expect("forward succeeds");
	assert_eq!(wire, WireValue::Str("hello".into()));
	assert_eq!(transcode_reverse(&wire, &node).expect("reverse succeeds"), value);
}

#[test]
fn int_array_round_trips() {
	let node = parse_one("ai").expect("signature parses");
	let value = Value::Array(vec![Value::I32(1), Value::I32(2), Value::I32(3)]);

	let wire = transcode_forward(&value, &node).expect("forward succeeds");
	assert_eq!(wire, WireValue::Seq(vec![WireValue::I32(1), WireValue::I32(2), WireValue::I32(3)]));
	assert_eq!(transcode_reverse(&wire, &node).expect("reverse succeeds"), value);
}

#[test]
fn two_field_struct_round_trips() {
	let node = parse_one("(is)").expect("signature parses");
	let value = Value::Struct(vec![Value::I32(42), Value::Str("x".into())]);

	let wire = transcode_forward(&value, &node).expect("forward succeeds");
	assert_eq!(wire, WireValue::Seq(vec![WireValue::I32(42), WireValue::Str("x".into())]));
	assert_eq!(transcode_reverse(&wire, &node).expect("reverse succeeds"), value);
}

#[test]
fn string_keyed_dict_round_trips_in_iteration_order() {
	let node = parse_one("a{si}").expect("signature parses");
	let dict: Dict = [
		(Value::Str("a".into()), Value::I32(1)),
		(Value::Str("b".into()), Value::I32(2)),
	]
	.into_iter()
	.collect();
	let value = Value::Dict(dict);

	let wire = transcode_forward(&value, &node).expect("forward succeeds");
	assert_eq!(
		wire,
		WireValue::Seq(vec![
			WireValue::Seq(vec![WireValue::Str("a".into()), WireValue::I32(1)]),
			WireValue::Seq(vec![WireValue::Str("b".into()), WireValue::I32(2)]),
		])
	);
	assert_eq!(transcode_reverse(&wire, &node).expect("reverse succeeds"), value);
}

#[test]
fn scalar_variant_forward_matches_wire_pair() {
	let node = parse_one("v").expect("signature parses");
	let value = Value::Variant {
		sig: "i".into(),
		value: Box::new(Value::I32(7)),
	};

	let wire = transcode_forward(&value, &node).expect("forward succeeds");
	assert_eq!(wire, WireValue::Seq(vec![WireValue::Signature("i".into()), WireValue::I32(7)]));

	// The reverse direction intentionally drops the variant record and hands
	// back the bare payload.
	assert_eq!(transcode_reverse(&wire, &node).expect("reverse succeeds"), Value::I32(7));
}

#[test]
fn container_variant_payload_round_trips_through_the_extra_wrap() {
	let node = parse_one("v").expect("signature parses");
	let payload = Value::Array(vec![Value::I32(1), Value::I32(2)]);
	let value = Value::Variant {
		sig: "ai".into(),
		value: Box::new(payload.clone()),
	};

	let wire = transcode_forward(&value, &node).expect("forward succeeds");
	assert_eq!(
		wire,
		WireValue::Seq(vec![
			WireValue::Signature("ai".into()),
			WireValue::Seq(vec![WireValue::Seq(vec![WireValue::I32(1), WireValue::I32(2)])]),
		])
	);
	assert_eq!(transcode_reverse(&wire, &node).expect("reverse succeeds"), payload);
}

#[test]
fn variant_container_payload_wrap_is_exactly_one_level() {
	let variant_node = parse_one("v").expect("signature parses");
	let payload_node = parse_one("a(ii)").expect("signature parses");
	let payload = Value::Array(vec![Value::Struct(vec![Value::I32(1), Value::I32(2)])]);

	let direct = transcode_forward(&payload, &payload_node).expect("direct forward succeeds");
	let value = Value::Variant {
		sig: "a(ii)".into(),
		value: Box::new(payload),
	};
	let wire = transcode_forward(&value, &variant_node).expect("variant forward succeeds");

	let WireValue::Seq(pair) = wire else {
		panic!("expected wire pair");
	};
	assert_eq!(pair[0], WireValue::Signature("a(ii)".into()));
	assert_eq!(pair[1], WireValue::Seq(vec![direct]));
}

#[test]
fn byte_array_round_trips_through_the_raw_carrier() {
	let node = parse_one("ay").expect("signature parses");
	let value = Value::Bytes(vec![0, 127, 255]);

	let wire = transcode_forward(&value, &node).expect("forward succeeds");
	assert_eq!(wire, WireValue::Bytes(vec![0, 127, 255]));
	assert_eq!(transcode_reverse(&wire, &node).expect("reverse succeeds"), value);
}

#[test]
fn deeply_mixed_signature_round_trips() {
	let node = parse_one("a{s(iav)}").expect("signature parses");
	let inner: Dict = [(
		Value::Str("k".into()),
		Value::Struct(vec![
			Value::I32(5),
			Value::Array(vec![Value::Variant {
				sig: "s".into(),
				value: Box::new(Value::Str("deep".into())),
			}]),
		]),
	)]
	.into_iter()
	.collect();
	let value = Value::Dict(inner);

	let wire = transcode_forward(&value, &node).expect("forward succeeds");
	let back = transcode_reverse(&wire, &node).expect("reverse succeeds");

	// Variants come back as bare payloads, everything else structurally equal.
	let Value::Dict(dict) = back else {
		panic!("expected dict value");
	};
	let Some(Value::Struct(fields)) = dict.get(&Value::Str("k".into())) else {
		panic!("expected struct entry");
	};
	assert_eq!(fields[0], Value::I32(5));
	assert_eq!(fields[1], Value::Array(vec![Value::Str("deep".into())]));
}

#[test]
fn empty_struct_node_round_trips_empty_value() {
	let node = SigNode::Struct(Vec::new());
	let value = Value::Struct(Vec::new());

	let wire = transcode_forward(&value, &node).expect("forward succeeds");
	assert_eq!(wire, WireValue::Seq(Vec::new()));
	assert_eq!(transcode_reverse(&wire, &node).expect("reverse succeeds"), value);
}
