//! Toolbox — the domain side of the toolbox MCP server.
//!
//! Every capability the server exposes is a small, stateless function or a
//! single upstream HTTP call. This crate holds those pieces with no knowledge
//! of MCP: the server crate validates arguments, calls into here, and renders
//! the result (or the [`DomainError`]) as content blocks.

pub mod calculator;
pub mod clock;
pub mod error;
pub mod geocode;
pub mod greeting;
pub mod http;
pub mod image;
pub mod review;
pub mod weather;

pub use calculator::{Calculation, Operator};
pub use clock::UtcOffset;
pub use error::{DomainError, DomainResult};
pub use geocode::{GeocodeClient, Place};
pub use greeting::Language;
pub use image::{GeneratedImage, ImageClient};
pub use review::{Focus, ReviewLanguage, ReviewRequest};
pub use weather::{Forecast, WeatherClient};
