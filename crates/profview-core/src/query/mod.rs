//! URL query mapping for view configurations.
//!
//! # Data flow
//!
//! ```text
//! request URL ──► QueryParams::from_url ──► decode_from_url ──► ViewConfig
//! ViewConfig + base URL ──► encode_to_url ──► (new URL, changed?)
//! ```

pub mod codec;
pub mod params;

pub use codec::{decode_from_url, encode_to_url, DecodeError};
pub use params::QueryParams;
