//! tm-core: shared foundation for trainmotion.
//!
//! Contains:
//! - units (uom SI types + km/h, cm/s² constructors)
//! - numeric (Real + tolerances + rounding helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{TmError, TmResult};
pub use numeric::*;
pub use units::*;
