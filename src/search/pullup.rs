//! Single pull-up search for the `Rt + rp` divider.
//!
//! Every `rp` on the grid is accepted; the best one maximizes the node-voltage swing
//! between the temperature extremes. The first maximum in grid order wins.

use serde::{Deserialize, Serialize};

use crate::domain::{PullupConfig, PullupDesign, ResistanceBounds};
use crate::error::DesignError;
use crate::models::pullup_voltage;

/// Outcome of a pull-up search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullupSearch {
    pub bounds: ResistanceBounds,
    pub design: PullupDesign,
    /// Zero-based grid index of `design.rp`.
    pub index: usize,
    pub evaluated: u64,
}

pub fn search_pullup(config: &PullupConfig) -> Result<PullupSearch, DesignError> {
    config.validate()?;
    let bounds = config.thermistor.bounds(&config.range)?;
    let rp_values = config.rp_grid().values();

    let swings: Vec<f64> = rp_values
        .iter()
        .map(|&rp| {
            pullup_voltage(bounds.at_min_temp, rp, config.vref)
                - pullup_voltage(bounds.at_max_temp, rp, config.vref)
        })
        .collect();

    if swings.iter().any(|s| !s.is_finite()) {
        return Err(DesignError::numerical("pull-up swing is not finite"));
    }

    let Some(index) = first_argmax(&swings) else {
        return Err(DesignError::invalid("rp grid is empty"));
    };

    let rp = rp_values[index];
    let v_at_max_temp = pullup_voltage(bounds.at_max_temp, rp, config.vref);
    let v_at_min_temp = pullup_voltage(bounds.at_min_temp, rp, config.vref);

    Ok(PullupSearch {
        bounds,
        design: PullupDesign {
            rp,
            v_at_max_temp,
            v_at_min_temp,
            swing: swings[index],
        },
        index,
        evaluated: rp_values.len() as u64,
    })
}

/// Index of the first maximum (later equal values do not replace it).
fn first_argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}
