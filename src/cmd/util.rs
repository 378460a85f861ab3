use buscodec::bus::{BusError, Result};

/// Parse a CLI JSON argument, surfacing parse failures as shape errors.
pub(crate) fn parse_json_arg(text: &str) -> Result<serde_json::Value> {
	serde_json::from_str(text).map_err(|err| BusError::JsonShape {
		expected: "valid json",
		got: err.to_string(),
	})
}
