//! Node voltage of the two sensing circuits, and the inverse used to turn a
//! measured node voltage back into a thermistor resistance.

use crate::domain::Topology;
use crate::error::DesignError;

/// Node voltage of `GND - rd - Rt - node - ru - Vdd`.
///
/// Total for non-negative resistances unless all three are zero.
pub fn divider_voltage(rt: f64, rd: f64, ru: f64, vdd: f64) -> f64 {
    vdd * ((rt + rd) / (rt + ru + rd))
}

/// Node voltage of `GND - Rt - node - rp - Vref`.
pub fn pullup_voltage(rt: f64, rp: f64, vref: f64) -> f64 {
    vref * rt / (rt + rp)
}

impl Topology {
    /// Node voltage for thermistor resistance `rt` and supply `supply`.
    pub fn node_voltage(&self, rt: f64, supply: f64) -> Result<f64, DesignError> {
        let v = match *self {
            Topology::Divider { rd, ru } => divider_voltage(rt, rd, ru, supply),
            Topology::Pullup { rp } => pullup_voltage(rt, rp, supply),
        };
        if v.is_finite() {
            Ok(v)
        } else {
            Err(DesignError::numerical(format!(
                "node voltage is not finite for Rt={rt} Ω ({self:?})"
            )))
        }
    }

    /// Thermistor resistance for a node voltage expressed as a fraction of the supply.
    ///
    /// `ratio` must lie in `(0, 1)`; a reading of exactly 1 would need infinite
    /// resistance.
    pub fn resistance_from_ratio(&self, ratio: f64) -> Result<f64, DesignError> {
        if !(ratio.is_finite() && ratio > 0.0 && ratio <= 1.0) {
            return Err(DesignError::invalid(format!(
                "normalized reading must lie in (0, 1] (got {ratio})"
            )));
        }
        if ratio == 1.0 {
            return Err(DesignError::numerical(
                "normalized reading of 1.0 implies an open thermistor",
            ));
        }

        let rt = match *self {
            Topology::Pullup { rp } => rp * ratio / (1.0 - ratio),
            Topology::Divider { rd, ru } => ratio * ru / (1.0 - ratio) - rd,
        };
        if !rt.is_finite() {
            return Err(DesignError::numerical(format!(
                "reading {ratio} maps to a non-finite resistance ({self:?})"
            )));
        }
        if rt <= 0.0 {
            // Below rd / (rd + ru) for a divider: the reading cannot come from this circuit.
            return Err(DesignError::invalid(format!(
                "reading {ratio} is below the range of {self:?} (implies Rt={rt} Ω)"
            )));
        }
        Ok(rt)
    }
}
