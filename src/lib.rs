//! Public library API for message-bus signature parsing and value transcoding.

/// Signature parsing, value representations, and the bidirectional transcoder.
pub mod bus;
