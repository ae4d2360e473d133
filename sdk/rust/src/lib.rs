//! Typed client for the license relay.

mod client;

pub use client::{CaliforniaSearch, ColoradoSearch, RelayClient, RelayReply};
