//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the model/search code stays clean and testable
//! - output changes are localized

use crate::domain::{AdcWindow, Conversion, DividerConfig, ProgressSample, PullupConfig, Topology};
use crate::search::{DividerSearch, PullupSearch};

/// Format the divider search summary.
pub fn format_divider_summary(config: &DividerConfig, found: &DividerSearch) -> String {
    let mut out = String::new();

    out.push_str("=== thermdiv - Rd/Ru divider search ===\n");
    push_thermistor(&mut out, config.thermistor.t0_celsius, config.thermistor.beta, config.thermistor.r0);
    out.push_str(&format!(
        "Range: [{:.2}, {:.2}] °C | Vdd={:.3} V | ADC window=[{:.3}, {:.3}] V\n",
        config.range.min_celsius,
        config.range.max_celsius,
        config.vdd,
        config.adc.min_volts,
        config.adc.max_volts,
    ));
    out.push_str(&format!(
        "Grid: rd=[{:.2}, {:.2}] x{} | ru=[{:.2}, {:.2}] x{}\n",
        config.rd_grid.low,
        config.rd_grid.high,
        config.rd_grid.points,
        config.ru_grid.low,
        config.ru_grid.high,
        config.ru_grid.points,
    ));
    out.push_str(&format!(
        "Evaluated: {} | feasible: {}\n",
        found.evaluated, found.feasible
    ));

    out.push_str("\nThermistor bounds:\n");
    out.push_str(&format!(
        "- Rt at {:.2} °C: {:.2} Ohms\n",
        config.range.min_celsius, found.bounds.at_min_temp
    ));
    out.push_str(&format!(
        "- Rt at {:.2} °C: {:.2} Ohms\n",
        config.range.max_celsius, found.bounds.at_max_temp
    ));

    let d = &found.design;
    out.push_str("\nBest design:\n");
    out.push_str(&format!("- Rd: {:.2} Ohms\n", d.rd));
    out.push_str(&format!("- Ru: {:.2} Ohms\n", d.ru));
    out.push_str(&format!(
        "- Vout: {:.3} V (hot) .. {:.3} V (cold) | swing {:.3} V\n",
        d.v_at_max_temp, d.v_at_min_temp, d.swing
    ));

    out
}

/// Format the pull-up search summary.
pub fn format_pullup_summary(config: &PullupConfig, found: &PullupSearch) -> String {
    let mut out = String::new();
    let grid = config.rp_grid();

    out.push_str("=== thermdiv - Rp pull-up search ===\n");
    push_thermistor(&mut out, config.thermistor.t0_celsius, config.thermistor.beta, config.thermistor.r0);
    out.push_str(&format!(
        "Range: [{:.2}, {:.2}] °C | Vref={:.3} V\n",
        config.range.min_celsius, config.range.max_celsius, config.vref,
    ));
    out.push_str(&format!(
        "Grid: rp=[{:.2}, {:.2}] x{}\n",
        grid.low, grid.high, grid.points
    ));

    out.push_str("\nThermistor bounds:\n");
    out.push_str(&format!(
        "- Rt at {:.2} °C: {:.2} Ohms\n",
        config.range.min_celsius, found.bounds.at_min_temp
    ));
    out.push_str(&format!(
        "- Rt at {:.2} °C: {:.2} Ohms\n",
        config.range.max_celsius, found.bounds.at_max_temp
    ));

    let d = &found.design;
    out.push_str("\nBest design:\n");
    out.push_str(&format!("- Rp: {:.2} Ohms (grid index {})\n", d.rp, found.index));
    out.push_str(&format!(
        "- Vt: {:.4} V (hot) .. {:.4} V (cold) | swing {:.4} V\n",
        d.v_at_max_temp, d.v_at_min_temp, d.swing
    ));

    out
}

/// Format sampled enumeration points as a table.
pub fn format_progress(samples: &[ProgressSample], adc: &AdcWindow) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Progress samples (ADC window [{:.3}, {:.3}] V):\n",
        adc.min_volts, adc.max_volts
    ));
    out.push_str(
        format!(
            "{:>10} {:>12} {:>12} {:>9} {:>9} {:>9} {:<8}\n",
            "iteration", "rd", "ru", "v_hot", "v_cold", "swing", "feasible"
        )
        .trim_end(),
    );
    out.push('\n');

    for s in samples {
        out.push_str(
            format!(
                "{:>10} {:>12.2} {:>12.2} {:>9.3} {:>9.3} {:>9.3} {:<8}\n",
                s.iteration,
                s.rd,
                s.ru,
                s.v_at_max_temp,
                s.v_at_min_temp,
                s.swing,
                if s.feasible { "yes" } else { "no" },
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

/// Format a reading-to-temperature conversion.
pub fn format_conversion(conv: &Conversion) -> String {
    let circuit = match conv.topology {
        Topology::Pullup { rp } => format!("pull-up rp={rp:.2} Ohms"),
        Topology::Divider { rd, ru } => format!("divider rd={rd:.2} Ohms, ru={ru:.2} Ohms"),
    };
    format!(
        "Reading {:.5} of supply ({circuit})\n- Rt: {:.2} Ohms\n- T : {:.2} °C\n",
        conv.ratio, conv.resistance, conv.celsius
    )
}

fn push_thermistor(out: &mut String, t0: f64, beta: f64, r0: f64) {
    out.push_str(&format!(
        "Thermistor: R0={r0:.2} Ohms @ {t0:.2} °C, B={beta:.1} K\n"
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DividerDesign, ResistanceBounds};

    #[test]
    fn divider_summary_lists_best_resistors() {
        let config = DividerConfig::default();
        let found = DividerSearch {
            bounds: ResistanceBounds {
                at_min_temp: 106_014.88,
                at_max_temp: 403.80,
            },
            design: DividerDesign {
                rd: 8_462.61,
                ru: 283_189.44,
                v_at_max_temp: 0.1002,
                v_at_min_temp: 0.9500,
                swing: 0.8498,
            },
            evaluated: 25_000_000,
            feasible: 7_115_078,
            progress: Vec::new(),
        };

        let txt = format_divider_summary(&config, &found);
        assert!(txt.contains("- Rd: 8462.61 Ohms\n"));
        assert!(txt.contains("- Ru: 283189.44 Ohms\n"));
        assert!(txt.contains("- Rt at -20.00 °C: 106014.88 Ohms\n"));
        assert!(txt.contains("swing 0.850 V"));
        assert!(txt.contains("Evaluated: 25000000 | feasible: 7115078\n"));
    }

    #[test]
    fn progress_table_has_one_row_per_sample() {
        let samples = vec![
            ProgressSample {
                iteration: 0,
                rd: 1.0,
                ru: 100.0,
                v_at_max_temp: 2.7,
                v_at_min_temp: 3.29,
                swing: 0.59,
                feasible: false,
            },
            ProgressSample {
                iteration: 99_931,
                rd: 21.0,
                ru: 595_560.0,
                v_at_max_temp: 0.003,
                v_at_min_temp: 0.50,
                swing: 0.497,
                feasible: false,
            },
        ];
        let txt = format_progress(&samples, &AdcWindow::default());
        assert_eq!(txt.lines().count(), 4);
        assert!(txt.lines().nth(3).unwrap().starts_with("     99931"));
        assert!(txt.lines().all(|l| l == l.trim_end()));
    }

    #[test]
    fn conversion_names_the_circuit() {
        let txt = format_conversion(&Conversion {
            topology: Topology::Pullup { rp: 10_000.0 },
            ratio: 0.5,
            resistance: 10_000.0,
            celsius: 25.0,
        });
        assert_eq!(
            txt,
            "Reading 0.50000 of supply (pull-up rp=10000.00 Ohms)\n- Rt: 10000.00 Ohms\n- T : 25.00 °C\n"
        );
    }
}
