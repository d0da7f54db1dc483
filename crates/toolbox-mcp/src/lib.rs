//! Toolbox MCP Server — small utility tools for LLM clients over MCP.
//!
//! This library implements an MCP (Model Context Protocol) server that exposes
//! the [`toolbox`] crate's calculator, clock, geocoding, weather and image
//! tools, a server-info resource and a code review prompt.

pub mod config;
pub mod dispatcher;
pub mod prompts;
pub mod protocol;
pub mod resources;
pub mod schema;
pub mod tools;
pub mod transport;
pub mod types;

pub use config::ServerConfig;
pub use dispatcher::{Dispatcher, DispatcherBuilder};
pub use protocol::ProtocolHandler;
pub use transport::StdioTransport;
