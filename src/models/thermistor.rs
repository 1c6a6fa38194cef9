//! Beta-model NTC thermistor.
//!
//! `R(T) = R0 * exp(B * (1/T - 1/T0))` with absolute temperatures, and its inverse
//! `T = 1 / (1/T0 + ln(R/R0) / B)`.

use crate::domain::{ResistanceBounds, TemperatureRange, Thermistor};
use crate::error::DesignError;

/// 0 °C expressed in Kelvin.
pub const KELVIN_OFFSET: f64 = 273.15;

/// Absolute zero in °C. Temperatures at or below it are rejected.
pub const ABSOLUTE_ZERO_CELSIUS: f64 = -KELVIN_OFFSET;

/// Convert °C to K.
///
/// Every temperature crossing the public API is in °C; this is the only place that
/// produces Kelvin values, and both searches go through it.
pub fn celsius_to_kelvin(celsius: f64) -> f64 {
    celsius + KELVIN_OFFSET
}

/// Convert K to °C.
pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - KELVIN_OFFSET
}

/// Thermistor resistance (Ω) at `celsius`.
pub fn resistance_at(thermistor: &Thermistor, celsius: f64) -> Result<f64, DesignError> {
    if !(celsius.is_finite() && celsius > ABSOLUTE_ZERO_CELSIUS) {
        return Err(DesignError::invalid(format!(
            "temperature must be finite and above absolute zero (got {celsius} °C)"
        )));
    }
    let t_k = celsius_to_kelvin(celsius);
    let t0_k = celsius_to_kelvin(thermistor.t0_celsius);
    let rt = thermistor.r0 * (thermistor.beta * (1.0 / t_k - 1.0 / t0_k)).exp();
    if !rt.is_finite() {
        return Err(DesignError::numerical(format!(
            "thermistor resistance at {celsius} °C is not finite"
        )));
    }
    Ok(rt)
}

/// Temperature (°C) at which the thermistor has resistance `rt`.
pub fn temperature_at(thermistor: &Thermistor, rt: f64) -> Result<f64, DesignError> {
    if !(rt.is_finite() && rt > 0.0) {
        return Err(DesignError::invalid(format!(
            "thermistor resistance must be finite and > 0 (got {rt})"
        )));
    }
    let t0_k = celsius_to_kelvin(thermistor.t0_celsius);
    let inv_t = 1.0 / t0_k + (rt / thermistor.r0).ln() / thermistor.beta;
    if !(inv_t.is_finite() && inv_t > 0.0) {
        return Err(DesignError::numerical(format!(
            "resistance {rt} Ω maps to no physical temperature"
        )));
    }
    Ok(kelvin_to_celsius(1.0 / inv_t))
}

impl Thermistor {
    /// Resistance at both ends of `range`.
    pub fn bounds(&self, range: &TemperatureRange) -> Result<ResistanceBounds, DesignError> {
        Ok(ResistanceBounds {
            at_min_temp: resistance_at(self, range.min_celsius)?,
            at_max_temp: resistance_at(self, range.max_celsius)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn reference_point_returns_r0_exactly() {
        let th = Thermistor::default();
        assert_eq!(resistance_at(&th, th.t0_celsius).unwrap(), th.r0);
    }

    #[test]
    fn resistance_strictly_decreases_with_temperature() {
        let th = Thermistor::default();
        let mut prev = resistance_at(&th, -40.0).unwrap();
        for i in 1..=40 {
            let t = -40.0 + 5.0 * i as f64;
            let rt = resistance_at(&th, t).unwrap();
            assert!(rt < prev, "R({t}) = {rt} should be < {prev}");
            prev = rt;
        }
    }

    #[test]
    fn reference_scenario_bounds() {
        let th = Thermistor::default();
        let bounds = th.bounds(&TemperatureRange::default()).unwrap();
        assert_relative_eq!(bounds.at_min_temp, 106_014.881_776_799_27, max_relative = 1e-12);
        assert_relative_eq!(bounds.at_max_temp, 403.802_826_711_981_1, max_relative = 1e-12);
        assert!(bounds.at_min_temp > bounds.at_max_temp);
    }

    #[test]
    fn inverse_recovers_temperature() {
        let th = Thermistor::default();
        for t in [-20.0, 0.0, 25.0, 60.0, 120.0] {
            let rt = resistance_at(&th, t).unwrap();
            assert_relative_eq!(temperature_at(&th, rt).unwrap(), t, epsilon = 1e-9);
        }
    }

    #[test]
    fn rejects_temperatures_at_or_below_absolute_zero() {
        let th = Thermistor::default();
        assert!(matches!(
            resistance_at(&th, ABSOLUTE_ZERO_CELSIUS),
            Err(DesignError::InvalidInput { .. })
        ));
        assert!(resistance_at(&th, f64::NAN).is_err());
        assert!(temperature_at(&th, 0.0).is_err());
    }

    #[test]
    fn kelvin_conversion_round_trips() {
        assert_eq!(celsius_to_kelvin(0.0), 273.15);
        assert_relative_eq!(kelvin_to_celsius(celsius_to_kelvin(-20.0)), -20.0, epsilon = 1e-12);
    }
}
