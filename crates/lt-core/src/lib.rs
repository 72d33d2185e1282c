//! lt-core: stable foundation for looptune.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)

pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use numeric::*;
