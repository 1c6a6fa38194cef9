//! Shared "search pipeline" logic used by the CLI commands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! validate -> resistance bounds -> grid search -> response table
//!
//! The command handlers can then focus on presentation (text vs JSON).

use serde::Serialize;

use crate::domain::{
    Conversion, DividerConfig, PullupConfig, ResponsePoint, Thermistor, Topology,
};
use crate::error::AppError;
use crate::models::temperature_at;
use crate::report::response_curve;
use crate::search::{DividerSearch, PullupSearch, search_divider, search_pullup};

/// All computed outputs of a `thermdiv divider` run.
#[derive(Debug, Clone, Serialize)]
pub struct DividerRun {
    pub config: DividerConfig,
    pub search: DividerSearch,
    /// Node voltage across the temperature range for the chosen resistors.
    pub response: Vec<ResponsePoint>,
}

/// All computed outputs of a `thermdiv pullup` run.
#[derive(Debug, Clone, Serialize)]
pub struct PullupRun {
    pub config: PullupConfig,
    pub search: PullupSearch,
    pub response: Vec<ResponsePoint>,
}

/// Execute the two-resistor search and tabulate the chosen design.
pub fn run_divider(config: &DividerConfig, samples: usize) -> Result<DividerRun, AppError> {
    let search = search_divider(config)?;
    let topology = Topology::Divider {
        rd: search.design.rd,
        ru: search.design.ru,
    };
    let response = response_curve(&config.thermistor, &config.range, &topology, config.vdd, samples)?;

    Ok(DividerRun {
        config: config.clone(),
        search,
        response,
    })
}

/// Execute the pull-up search and tabulate the chosen design.
pub fn run_pullup(config: &PullupConfig, samples: usize) -> Result<PullupRun, AppError> {
    let search = search_pullup(config)?;
    let topology = Topology::Pullup {
        rp: search.design.rp,
    };
    let response = response_curve(&config.thermistor, &config.range, &topology, config.vref, samples)?;

    Ok(PullupRun {
        config: config.clone(),
        search,
        response,
    })
}

/// Convert a normalized reading (node voltage / supply) into a temperature.
pub fn run_convert(thermistor: &Thermistor, topology: Topology, ratio: f64) -> Result<Conversion, AppError> {
    thermistor.validate()?;
    let resistance = topology.resistance_from_ratio(ratio)?;
    let celsius = temperature_at(thermistor, resistance)?;

    Ok(Conversion {
        topology,
        ratio,
        resistance,
        celsius,
    })
}
