//! Exhaustive `(rd, ru)` search for the three-element divider.
//!
//! For every pair on the `rd x ru` grid we evaluate the node voltage at both
//! temperature extremes. A pair is feasible when both voltages lie inside the ADC
//! window; among feasible pairs we keep the one with the largest swing.
//!
//! Selection is "first strictly greater wins" in row-major order (`rd` outer, `ru`
//! inner). Rows are independent, so they are scanned in parallel and the per-row
//! winners are reduced in row order with the same strict comparison, which picks
//! exactly the pair a sequential scan would.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::{DividerConfig, DividerDesign, ProgressSample, ResistanceBounds};
use crate::error::DesignError;
use crate::models::divider_voltage;

/// Outcome of a divider search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DividerSearch {
    pub bounds: ResistanceBounds,
    pub design: DividerDesign,
    /// Number of `(rd, ru)` pairs evaluated.
    pub evaluated: u64,
    /// Number of pairs that satisfied the ADC window.
    pub feasible: u64,
    /// Sampled enumeration points, in enumeration order.
    pub progress: Vec<ProgressSample>,
}

#[derive(Debug, Clone, Copy)]
struct Scan<'a> {
    config: &'a DividerConfig,
    bounds: ResistanceBounds,
    ru_values: &'a [f64],
    stride: u64,
}

#[derive(Debug, Clone, Default)]
struct RowOutcome {
    best: Option<DividerDesign>,
    feasible: u64,
    progress: Vec<ProgressSample>,
}

/// Run the search described by `config`.
///
/// Returns [`DesignError::NoFeasibleSolution`] when no grid pair keeps both
/// voltages inside the window with a positive swing.
pub fn search_divider(config: &DividerConfig) -> Result<DividerSearch, DesignError> {
    config.validate()?;
    let bounds = config.thermistor.bounds(&config.range)?;

    let rd_values = config.rd_grid.values();
    let ru_values = config.ru_grid.values();
    let scan = Scan {
        config,
        bounds,
        ru_values: &ru_values,
        stride: config.options.progress_stride,
    };

    let rows: Vec<RowOutcome> = if config.options.parallel {
        rd_values
            .par_iter()
            .enumerate()
            .map(|(row, &rd)| scan_row(&scan, row, rd))
            .collect()
    } else {
        rd_values
            .iter()
            .enumerate()
            .map(|(row, &rd)| scan_row(&scan, row, rd))
            .collect()
    };

    let evaluated = rd_values.len() as u64 * ru_values.len() as u64;
    let merged = merge_rows(rows);

    let Some(design) = merged.best else {
        return Err(DesignError::NoFeasibleSolution {
            evaluated,
            in_window: merged.feasible,
        });
    };
    if !design.swing.is_finite() {
        return Err(DesignError::numerical("best divider swing is not finite"));
    }

    Ok(DividerSearch {
        bounds,
        design,
        evaluated,
        feasible: merged.feasible,
        progress: merged.progress,
    })
}

/// Fold per-row outcomes in row order.
///
/// A later row only replaces the running best with a strictly larger swing.
fn merge_rows(rows: Vec<RowOutcome>) -> RowOutcome {
    let mut out = RowOutcome::default();
    let mut best_swing = 0.0;

    for row in rows {
        out.feasible += row.feasible;
        out.progress.extend(row.progress);
        if let Some(candidate) = row.best {
            if candidate.swing > best_swing {
                best_swing = candidate.swing;
                out.best = Some(candidate);
            }
        }
    }

    out
}

/// Evaluate a single `(rd, ru)` pair at both temperature extremes.
pub fn evaluate_pair(bounds: &ResistanceBounds, rd: f64, ru: f64, vdd: f64) -> DividerDesign {
    let v_at_max_temp = divider_voltage(bounds.at_max_temp, rd, ru, vdd);
    let v_at_min_temp = divider_voltage(bounds.at_min_temp, rd, ru, vdd);
    DividerDesign {
        rd,
        ru,
        v_at_max_temp,
        v_at_min_temp,
        swing: v_at_min_temp - v_at_max_temp,
    }
}

fn scan_row(scan: &Scan<'_>, row: usize, rd: f64) -> RowOutcome {
    let adc = &scan.config.adc;
    let vdd = scan.config.vdd;
    let row_start = row as u64 * scan.ru_values.len() as u64;

    let mut out = RowOutcome::default();
    let mut best_swing = 0.0;

    for (col, &ru) in scan.ru_values.iter().enumerate() {
        let candidate = evaluate_pair(&scan.bounds, rd, ru, vdd);
        let is_feasible = adc.contains(candidate.v_at_max_temp) && adc.contains(candidate.v_at_min_temp);

        if is_feasible {
            out.feasible += 1;
            if candidate.swing > best_swing {
                best_swing = candidate.swing;
                out.best = Some(candidate);
            }
        }

        let iteration = row_start + col as u64;
        if scan.stride > 0 && iteration % scan.stride == 0 {
            out.progress.push(ProgressSample {
                iteration,
                rd,
                ru,
                v_at_max_temp: candidate.v_at_max_temp,
                v_at_min_temp: candidate.v_at_min_temp,
                swing: candidate.swing,
                feasible: is_feasible,
            });
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AdcWindow;
    use crate::search::{LinearGrid, SearchOptions};

    fn small_config() -> DividerConfig {
        DividerConfig {
            rd_grid: LinearGrid::new(1.0, 100_000.0, 200),
            ru_grid: LinearGrid::new(100.0, 600_000.0, 300),
            options: SearchOptions {
                parallel: true,
                progress_stride: 997,
            },
            ..DividerConfig::default()
        }
    }

    /// Straightforward nested loop used as the oracle for the parallel scan.
    fn sequential_oracle(config: &DividerConfig) -> Option<DividerDesign> {
        let bounds = config.thermistor.bounds(&config.range).unwrap();
        let mut best = None;
        let mut best_swing = 0.0;
        for rd in config.rd_grid.values() {
            for ru in config.ru_grid.values() {
                let c = evaluate_pair(&bounds, rd, ru, config.vdd);
                if config.adc.contains(c.v_at_max_temp)
                    && config.adc.contains(c.v_at_min_temp)
                    && c.swing > best_swing
                {
                    best_swing = c.swing;
                    best = Some(c);
                }
            }
        }
        best
    }

    #[test]
    fn parallel_scan_matches_sequential_oracle() {
        let config = small_config();
        let found = search_divider(&config).unwrap();
        assert_eq!(Some(found.design), sequential_oracle(&config));

        let sequential = DividerConfig {
            options: SearchOptions {
                parallel: false,
                ..config.options
            },
            ..config.clone()
        };
        let again = search_divider(&sequential).unwrap();
        assert_eq!(again.design, found.design);
        assert_eq!(again.feasible, found.feasible);
        assert_eq!(again.progress, found.progress);
    }

    #[test]
    fn selected_pair_lies_inside_window() {
        let config = small_config();
        let found = search_divider(&config).unwrap();
        let d = found.design;
        assert!(config.adc.contains(d.v_at_max_temp));
        assert!(config.adc.contains(d.v_at_min_temp));
        assert!(d.swing > 0.0);
        assert_eq!(found.evaluated, 200 * 300);
        assert!(found.feasible > 0 && found.feasible <= found.evaluated);
    }

    #[test]
    fn no_other_feasible_pair_beats_the_winner() {
        let config = small_config();
        let found = search_divider(&config).unwrap();
        let bounds = found.bounds;
        for rd in config.rd_grid.values() {
            for ru in config.ru_grid.values() {
                let c = evaluate_pair(&bounds, rd, ru, config.vdd);
                if config.adc.contains(c.v_at_max_temp) && config.adc.contains(c.v_at_min_temp) {
                    assert!(c.swing <= found.design.swing);
                }
            }
        }
    }

    #[test]
    fn first_maximum_wins_on_ties() {
        let design = |rd: f64, swing: f64| DividerDesign {
            rd,
            ru: 1.0,
            v_at_max_temp: 0.1,
            v_at_min_temp: 0.1 + swing,
            swing,
        };
        let row = |rd: f64, swing: f64| RowOutcome {
            best: Some(design(rd, swing)),
            feasible: 1,
            progress: Vec::new(),
        };

        let merged = merge_rows(vec![
            row(1.0, 0.5),
            row(2.0, 0.8),
            RowOutcome::default(),
            row(3.0, 0.8),
            row(4.0, 0.7),
        ]);
        assert_eq!(merged.best.map(|d| d.rd), Some(2.0));
        assert_eq!(merged.feasible, 4);
    }

    #[test]
    fn zero_swing_never_replaces_the_sentinel() {
        let merged = merge_rows(vec![RowOutcome {
            best: Some(DividerDesign {
                rd: 1.0,
                ru: 1.0,
                v_at_max_temp: 0.5,
                v_at_min_temp: 0.5,
                swing: 0.0,
            }),
            feasible: 1,
            progress: Vec::new(),
        }]);
        assert!(merged.best.is_none());
    }

    #[test]
    fn inverted_window_reports_infeasibility() {
        let config = DividerConfig {
            adc: AdcWindow {
                min_volts: 0.99,
                max_volts: 0.01,
            },
            ..small_config()
        };
        let err = search_divider(&config).unwrap_err();
        assert_eq!(
            err,
            DesignError::NoFeasibleSolution {
                evaluated: 200 * 300,
                in_window: 0
            }
        );
    }

    #[test]
    fn unreachable_window_reports_infeasibility() {
        let config = DividerConfig {
            adc: AdcWindow {
                min_volts: 3.4,
                max_volts: 5.0,
            },
            ..small_config()
        };
        assert!(matches!(
            search_divider(&config),
            Err(DesignError::NoFeasibleSolution { .. })
        ));
    }

    #[test]
    fn progress_samples_follow_stride_in_order() {
        let config = small_config();
        let found = search_divider(&config).unwrap();
        let expected: Vec<u64> = (0..200 * 300).step_by(997).collect();
        let got: Vec<u64> = found.progress.iter().map(|s| s.iteration).collect();
        assert_eq!(got, expected);

        let quiet = DividerConfig {
            options: SearchOptions {
                progress_stride: 0,
                ..config.options
            },
            ..config
        };
        assert!(search_divider(&quiet).unwrap().progress.is_empty());
    }

    #[test]
    fn degenerate_thermistor_is_rejected_before_searching() {
        let mut config = small_config();
        config.thermistor.beta = 0.0;
        assert!(matches!(
            search_divider(&config),
            Err(DesignError::InvalidInput { .. })
        ));
    }

    #[test]
    fn flat_in_window_pairs_are_counted_but_not_selected() {
        // ru = 0 pins the node to vdd at both temperatures: inside [3.3, 3.3] with zero swing.
        let config = DividerConfig {
            adc: AdcWindow {
                min_volts: 3.3,
                max_volts: 3.3,
            },
            rd_grid: LinearGrid::new(1.0, 2.0, 2),
            ru_grid: LinearGrid::new(0.0, 1.0, 2),
            ..small_config()
        };
        let err = search_divider(&config).unwrap_err();
        assert_eq!(
            err,
            DesignError::NoFeasibleSolution {
                evaluated: 4,
                in_window: 2
            }
        );
        assert!(err.to_string().contains("2 inside the ADC window"));
    }

    #[test]
    fn oversized_pair_count_is_rejected_before_searching() {
        let config = DividerConfig {
            rd_grid: LinearGrid::new(1.0, 100_000.0, 1_000_000),
            ru_grid: LinearGrid::new(100.0, 600_000.0, 1_000_000),
            ..small_config()
        };
        let err = search_divider(&config).unwrap_err();
        assert!(matches!(err, DesignError::InvalidInput { .. }), "{err}");
        assert!(err.to_string().contains("too large"));
    }
}
