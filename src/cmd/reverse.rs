use buscodec::bus::{Result, parse_one, transcode_reverse, value_to_json, wire_from_json};

use crate::cmd::util::parse_json_arg;

/// Transcode a wire-shaped JSON value into ergonomic shape and print it.
pub fn run(sig: &str, value: &str) -> Result<()> {
	let node = parse_one(sig)?;
	let json = parse_json_arg(value)?;

	let wire = wire_from_json(&json, &node)?;
	let ergonomic = transcode_reverse(&wire, &node)?;

	println!("{}", value_to_json(&ergonomic));
	Ok(())
}
