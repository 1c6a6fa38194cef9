//! Physical models: thermistor resistance and divider node voltage.
//!
//! Models are implemented as small, pure functions so that the search code can
//! evaluate them millions of times without allocation.

pub mod divider;
pub mod thermistor;

pub use divider::*;
pub use thermistor::*;
