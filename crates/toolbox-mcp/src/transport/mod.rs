//! Transport layer.

pub mod stdio;

pub use stdio::{StdioTransport, MAX_MESSAGE_BYTES};
