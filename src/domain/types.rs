//! Shared domain types.
//!
//! These types are kept small and serializable so they can be:
//!
//! - passed explicitly into the pure model/search functions
//! - printed as text reports or emitted as JSON
//!
//! All temperatures are in degrees Celsius. Conversion to Kelvin happens in exactly
//! one place: [`crate::models::celsius_to_kelvin`].

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::DesignError;
use crate::models::ABSOLUTE_ZERO_CELSIUS;
use crate::search::{LinearGrid, SearchOptions};

/// Upper bound on `rd` x `ru` pairs a single divider search will enumerate.
pub const MAX_DIVIDER_COMBINATIONS: usize = 100_000_000;

/// Beta-model thermistor parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thermistor {
    /// Reference temperature `T0` (°C) at which the resistance equals `r0`.
    pub t0_celsius: f64,
    /// Beta constant `B` (K).
    pub beta: f64,
    /// Resistance `R0` (Ω) at `t0_celsius`.
    pub r0: f64,
}

impl Default for Thermistor {
    /// A common 10 kΩ NTC (B = 3960 K at 25 °C).
    fn default() -> Self {
        Self {
            t0_celsius: 25.0,
            beta: 3960.0,
            r0: 10_000.0,
        }
    }
}

impl Thermistor {
    pub fn validate(&self) -> Result<(), DesignError> {
        if !(self.r0.is_finite() && self.r0 > 0.0) {
            return Err(DesignError::invalid(format!(
                "thermistor R0 must be finite and > 0 (got {})",
                self.r0
            )));
        }
        if !(self.beta.is_finite() && self.beta > 0.0) {
            return Err(DesignError::invalid(format!(
                "thermistor B must be finite and > 0 (got {})",
                self.beta
            )));
        }
        if !(self.t0_celsius.is_finite() && self.t0_celsius > ABSOLUTE_ZERO_CELSIUS) {
            return Err(DesignError::invalid(format!(
                "thermistor T0 must be above absolute zero (got {} °C)",
                self.t0_celsius
            )));
        }
        Ok(())
    }
}

/// Temperature range of interest, in °C.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRange {
    pub min_celsius: f64,
    pub max_celsius: f64,
}

impl Default for TemperatureRange {
    fn default() -> Self {
        Self {
            min_celsius: -20.0,
            max_celsius: 120.0,
        }
    }
}

impl TemperatureRange {
    pub fn validate(&self) -> Result<(), DesignError> {
        if !(self.min_celsius.is_finite() && self.max_celsius.is_finite()) {
            return Err(DesignError::invalid("temperature range must be finite"));
        }
        if self.min_celsius <= ABSOLUTE_ZERO_CELSIUS {
            return Err(DesignError::invalid(format!(
                "minimum temperature must be above absolute zero (got {} °C)",
                self.min_celsius
            )));
        }
        if self.min_celsius >= self.max_celsius {
            return Err(DesignError::invalid(format!(
                "temperature range must satisfy min < max (got [{}, {}] °C)",
                self.min_celsius, self.max_celsius
            )));
        }
        Ok(())
    }
}

/// Allowed ADC input window, in volts (inclusive on both ends).
///
/// An inverted window (`min > max`) is accepted; it simply admits no voltage, so a
/// search over it reports [`DesignError::NoFeasibleSolution`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdcWindow {
    pub min_volts: f64,
    pub max_volts: f64,
}

impl Default for AdcWindow {
    fn default() -> Self {
        Self {
            min_volts: 0.1,
            max_volts: 0.95,
        }
    }
}

impl AdcWindow {
    pub fn validate(&self) -> Result<(), DesignError> {
        if !(self.min_volts.is_finite() && self.max_volts.is_finite()) {
            return Err(DesignError::invalid("ADC window bounds must be finite"));
        }
        Ok(())
    }

    pub fn contains(&self, volts: f64) -> bool {
        self.min_volts <= volts && volts <= self.max_volts
    }
}

/// Thermistor resistance at the two ends of a [`TemperatureRange`].
///
/// For an NTC part `at_min_temp > at_max_temp`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResistanceBounds {
    /// Resistance at the cold end (largest resistance).
    pub at_min_temp: f64,
    /// Resistance at the hot end (smallest resistance).
    pub at_max_temp: f64,
}

/// Circuit the thermistor sits in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Topology {
    /// `GND - rd - Rt - node - ru - Vdd`.
    Divider { rd: f64, ru: f64 },
    /// `GND - Rt - node - rp - Vref`.
    Pullup { rp: f64 },
}

/// Topology selector for the `convert` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TopologyKind {
    Divider,
    Pullup,
}

/// Inputs of the two-resistor (`rd` + `ru`) search.
#[derive(Debug, Clone, Serialize)]
pub struct DividerConfig {
    pub thermistor: Thermistor,
    pub range: TemperatureRange,
    /// Supply voltage at the top of the chain.
    pub vdd: f64,
    pub adc: AdcWindow,
    /// Candidate ground-side resistors.
    pub rd_grid: LinearGrid,
    /// Candidate supply-side resistors.
    pub ru_grid: LinearGrid,
    pub options: SearchOptions,
}

impl Default for DividerConfig {
    fn default() -> Self {
        Self {
            thermistor: Thermistor::default(),
            range: TemperatureRange::default(),
            vdd: 3.3,
            adc: AdcWindow::default(),
            rd_grid: LinearGrid::new(1.0, 100_000.0, 5000),
            ru_grid: LinearGrid::new(100.0, 600_000.0, 5000),
            options: SearchOptions::default(),
        }
    }
}

impl DividerConfig {
    pub fn validate(&self) -> Result<(), DesignError> {
        self.thermistor.validate()?;
        self.range.validate()?;
        self.adc.validate()?;
        if !(self.vdd.is_finite() && self.vdd > 0.0) {
            return Err(DesignError::invalid(format!(
                "supply voltage must be finite and > 0 (got {})",
                self.vdd
            )));
        }
        self.rd_grid.validate("rd")?;
        self.ru_grid.validate("ru")?;
        match self.rd_grid.points.checked_mul(self.ru_grid.points) {
            Some(pairs) if pairs <= MAX_DIVIDER_COMBINATIONS => Ok(()),
            _ => Err(DesignError::invalid(format!(
                "rd x ru grid is too large ({} x {} points, max {MAX_DIVIDER_COMBINATIONS} pairs)",
                self.rd_grid.points, self.ru_grid.points
            ))),
        }
    }
}

/// Inputs of the single pull-up (`rp`) search.
///
/// The `rp` grid spans `[rp_min_factor * r0, rp_max_factor * r0]`.
#[derive(Debug, Clone, Serialize)]
pub struct PullupConfig {
    pub thermistor: Thermistor,
    pub range: TemperatureRange,
    /// Reference voltage at the top of the pull-up; 1.0 yields normalized readings.
    pub vref: f64,
    pub rp_min_factor: f64,
    pub rp_max_factor: f64,
    pub rp_points: usize,
}

impl Default for PullupConfig {
    fn default() -> Self {
        Self {
            thermistor: Thermistor::default(),
            range: TemperatureRange::default(),
            vref: 1.0,
            rp_min_factor: 0.1,
            rp_max_factor: 10.0,
            rp_points: 10_000,
        }
    }
}

impl PullupConfig {
    pub fn validate(&self) -> Result<(), DesignError> {
        self.thermistor.validate()?;
        self.range.validate()?;
        if !(self.vref.is_finite() && self.vref > 0.0) {
            return Err(DesignError::invalid(format!(
                "reference voltage must be finite and > 0 (got {})",
                self.vref
            )));
        }
        self.rp_grid().validate("rp")
    }

    pub fn rp_grid(&self) -> LinearGrid {
        LinearGrid::new(
            self.rp_min_factor * self.thermistor.r0,
            self.rp_max_factor * self.thermistor.r0,
            self.rp_points,
        )
    }
}

/// Best two-resistor design.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DividerDesign {
    pub rd: f64,
    pub ru: f64,
    /// Node voltage at the hot end (smallest thermistor resistance).
    pub v_at_max_temp: f64,
    /// Node voltage at the cold end (largest thermistor resistance).
    pub v_at_min_temp: f64,
    /// `v_at_min_temp - v_at_max_temp`.
    pub swing: f64,
}

/// Best pull-up design.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PullupDesign {
    pub rp: f64,
    pub v_at_max_temp: f64,
    pub v_at_min_temp: f64,
    pub swing: f64,
}

/// A sampled point of the enumeration, kept for progress reporting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressSample {
    /// Zero-based position in row-major enumeration order.
    pub iteration: u64,
    pub rd: f64,
    pub ru: f64,
    pub v_at_max_temp: f64,
    pub v_at_min_temp: f64,
    pub swing: f64,
    pub feasible: bool,
}

/// One row of a temperature response table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResponsePoint {
    pub celsius: f64,
    pub resistance: f64,
    pub volts: f64,
}

/// A normalized reading converted back to a temperature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    pub topology: Topology,
    /// Node voltage as a fraction of the supply.
    pub ratio: f64,
    pub resistance: f64,
    pub celsius: f64,
}
