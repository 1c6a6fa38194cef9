//! Candidate resistor grids.
//!
//! Resistors are searched over evenly spaced values. The spacing follows the usual
//! `linspace` construction (`low + i * step`, with the last point pinned to `high`)
//! so a given grid always enumerates the same values in the same order.

use serde::{Deserialize, Serialize};

use crate::error::DesignError;

/// Largest number of points a single grid may hold.
pub const MAX_GRID_POINTS: usize = 1_000_000;

/// `points` evenly spaced values over `[low, high]` (both inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearGrid {
    pub low: f64,
    pub high: f64,
    pub points: usize,
}

impl LinearGrid {
    pub fn new(low: f64, high: f64, points: usize) -> Self {
        Self { low, high, points }
    }

    /// Check the grid describes a strictly increasing sequence of non-negative values.
    ///
    /// `name` is used in the error message (e.g. `"rd"`).
    pub fn validate(&self, name: &str) -> Result<(), DesignError> {
        if !(self.low.is_finite() && self.high.is_finite() && self.low >= 0.0 && self.high > self.low)
        {
            return Err(DesignError::invalid(format!(
                "invalid {name} range: low={}, high={} (must be finite, >=0, and high>low)",
                self.low, self.high
            )));
        }
        if self.points < 2 {
            return Err(DesignError::invalid(format!(
                "{name} grid needs at least 2 points (got {})",
                self.points
            )));
        }
        if self.points > MAX_GRID_POINTS {
            return Err(DesignError::invalid(format!(
                "{name} grid has too many points (got {}, max {MAX_GRID_POINTS})",
                self.points
            )));
        }
        Ok(())
    }

    pub fn step(&self) -> f64 {
        (self.high - self.low) / (self.points as f64 - 1.0)
    }

    /// Materialize the grid.
    pub fn values(&self) -> Vec<f64> {
        let step = self.step();
        let mut out = Vec::with_capacity(self.points);
        for i in 0..self.points {
            out.push(self.low + i as f64 * step);
        }
        if let Some(last) = out.last_mut() {
            *last = self.high;
        }
        out
    }
}
