//! Resistor search orchestration.
//!
//! Responsibilities:
//!
//! - generate evenly spaced resistor grids
//! - evaluate every grid candidate at both temperature extremes (parallel for the 2-D case)
//! - select the feasible candidate with the largest voltage swing, first one on ties

use serde::{Deserialize, Serialize};

pub mod divider;
pub mod grid;
pub mod pullup;

pub use divider::*;
pub use grid::*;
pub use pullup::*;

/// Stride between recorded progress samples in the 2-D enumeration.
pub const DEFAULT_PROGRESS_STRIDE: u64 = 99_931;

/// Knobs that affect how a search runs but never what it returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Scan rows of the 2-D grid on the rayon thread pool.
    pub parallel: bool,
    /// Record every N-th enumerated combination; 0 records nothing.
    pub progress_stride: u64,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            progress_stride: DEFAULT_PROGRESS_STRIDE,
        }
    }
}
