//! Reporting utilities: temperature response tables and formatted terminal output.

pub mod format;

pub use format::*;

use crate::domain::{ResponsePoint, TemperatureRange, Thermistor, Topology};
use crate::error::DesignError;
use crate::models::resistance_at;

/// Sample `n` evenly spaced temperatures across `range` and evaluate the circuit.
pub fn response_curve(
    thermistor: &Thermistor,
    range: &TemperatureRange,
    topology: &Topology,
    supply: f64,
    n: usize,
) -> Result<Vec<ResponsePoint>, DesignError> {
    let n = n.max(2);
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let u = i as f64 / (n as f64 - 1.0);
        let celsius = range.min_celsius + u * (range.max_celsius - range.min_celsius);
        let resistance = resistance_at(thermistor, celsius)?;
        let volts = topology.node_voltage(resistance, supply)?;
        out.push(ResponsePoint {
            celsius,
            resistance,
            volts,
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_curve_spans_range_and_falls_with_temperature() {
        let th = Thermistor::default();
        let range = TemperatureRange::default();
        let topo = Topology::Pullup { rp: 6_500.0 };

        let curve = response_curve(&th, &range, &topo, 1.0, 15).unwrap();
        assert_eq!(curve.len(), 15);
        assert_eq!(curve[0].celsius, -20.0);
        assert_eq!(curve[14].celsius, 120.0);
        for pair in curve.windows(2) {
            assert!(pair[1].resistance < pair[0].resistance);
            assert!(pair[1].volts < pair[0].volts);
        }
    }
}
