//! License lookup relay library.
//!
//! Forwards professional-license searches to the Illinois, Colorado and
//! California registries and returns their JSON to the caller.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod lookup;
pub mod observability;

pub use config::RelayConfig;
pub use error::{RelayError, RelayResult};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
