//! License lookup subsystem.
//!
//! # Data Flow
//! ```text
//! inbound params (query string / JSON body)
//!     → <jurisdiction>::*Params::into_query (validation, no I/O)
//!     → SearchQuery
//!     → <jurisdiction>::*Lookup::build_request (URL, headers, body)
//!     → upstream.rs (single awaited call, status check, metrics)
//!     → dates.rs (Colorado only: MM/DD/YYYY normalization)
//!     → response body
//! ```
//!
//! # Design Decisions
//! - Validation always completes before a request is built
//! - Request construction is pure so it can be tested without a network
//! - Illinois and California bodies are relayed byte-for-byte
//! - No retries: an upstream failure is surfaced to the caller as-is

pub mod california;
pub mod colorado;
pub mod dates;
pub mod illinois;
pub mod names;
pub mod query;
pub mod upstream;

pub use california::{CaliforniaLookup, CaliforniaParams, CaliforniaSearchBody, SearchMethod};
pub use colorado::{ColoradoLicense, ColoradoLookup, ColoradoParams};
pub use illinois::{IllinoisLookup, IllinoisParams};
pub use query::{Jurisdiction, SearchMode, SearchQuery, SearchTerm};

use crate::config::RelayConfig;
use crate::error::RelayResult;

/// The three jurisdiction lookups, sharing one connection pool.
#[derive(Debug, Clone)]
pub struct Lookups {
    pub illinois: IllinoisLookup,
    pub colorado: ColoradoLookup,
    pub california: CaliforniaLookup,
}

impl Lookups {
    pub fn from_config(config: &RelayConfig) -> RelayResult<Self> {
        let client = upstream::build_client(&config.timeouts)?;
        Ok(Self {
            illinois: IllinoisLookup::new(client.clone(), config.illinois.clone()),
            colorado: ColoradoLookup::new(client.clone(), config.colorado.clone()),
            california: CaliforniaLookup::new(client, config.california.clone()),
        })
    }
}
