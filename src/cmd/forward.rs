use buscodec::bus::{Result, parse_one, transcode_forward, value_from_json, wire_to_json};

use crate::cmd::util::parse_json_arg;

/// Transcode an ergonomic JSON value into wire shape and print it.
pub fn run(sig: &str, value: &str) -> Result<()> {
	let node = parse_one(sig)?;
	let json = parse_json_arg(value)?;

	let ergonomic = value_from_json(&json, &node)?;
	let wire = transcode_forward(&ergonomic, &node)?;

	println!("{}", wire_to_json(&wire));
	Ok(())
}
