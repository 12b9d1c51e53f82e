//! cr-core: stable foundation for chiproute.
//!
//! Contains:
//! - point (planar coordinates with exact-match identity)
//! - numeric (Real + finiteness checks)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod point;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use point::Point;
