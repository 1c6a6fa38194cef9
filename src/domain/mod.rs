//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - thermistor and circuit parameters (`Thermistor`, `TemperatureRange`, `AdcWindow`, `Topology`)
//! - search inputs (`DividerConfig`, `PullupConfig`)
//! - search outputs (`DividerDesign`, `PullupDesign`, `ProgressSample`, `ResponsePoint`)

pub mod types;

pub use types::*;
