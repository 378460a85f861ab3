mod error;
mod forward;
mod json;
mod names;
mod reverse;
mod sig;
mod value;

/// Error and result aliases.
pub use error::{BusError, Result};
/// Ergonomic-to-wire transcoding entry point.
pub use forward::transcode_forward;
/// Signature-guided JSON conversions for both value shapes.
pub use json::{value_from_json, value_to_json, wire_from_json, wire_to_json};
/// Interface and path-component validators.
pub use names::{is_valid_interface_name, is_valid_path_component};
/// Wire-to-ergonomic transcoding entry point.
pub use reverse::transcode_reverse;
/// Signature tree node, parser entry points, and the nesting ceiling.
pub use sig::{MAX_NESTING_DEPTH, SigNode, parse, parse_one};
/// Runtime value representations on both sides of the wire boundary.
pub use value::{Dict, Value, WireValue};
