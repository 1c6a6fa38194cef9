//! Command-line parsing for the thermistor divider calculator.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the model/search code. Defaults reproduce the reference design:
//! a 10 kΩ / B=3960 NTC over -20..120 °C feeding a 0.1..0.95 V ADC window from 3.3 V.

use clap::{Args, Parser, Subcommand};

use crate::domain::TopologyKind;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "thermdiv",
    version,
    about = "Thermistor voltage-divider resistor calculator"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search ground (rd) and supply (ru) resistors that keep the node inside the ADC window.
    Divider(DividerArgs),
    /// Search the single pull-up (rp) that maximizes the voltage swing.
    Pullup(PullupArgs),
    /// Convert a measured node voltage back into a temperature.
    Convert(ConvertArgs),
}

/// Beta-model thermistor parameters.
#[derive(Debug, Args, Clone)]
pub struct ThermistorArgs {
    /// Reference temperature T0 (°C).
    #[arg(long, default_value_t = 25.0, allow_negative_numbers = true)]
    pub t0: f64,

    /// Beta constant B (K).
    #[arg(long, default_value_t = 3960.0)]
    pub beta: f64,

    /// Resistance R0 at T0 (Ohms).
    #[arg(long, default_value_t = 10_000.0)]
    pub r0: f64,
}

/// Temperature range of interest.
#[derive(Debug, Args, Clone)]
pub struct RangeArgs {
    /// Lowest temperature of interest (°C).
    #[arg(long, default_value_t = -20.0, allow_negative_numbers = true)]
    pub t_min: f64,

    /// Highest temperature of interest (°C).
    #[arg(long, default_value_t = 120.0, allow_negative_numbers = true)]
    pub t_max: f64,
}

/// Presentation options shared by the search commands.
#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    /// Render a voltage-versus-temperature plot for the chosen design.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 16)]
    pub height: usize,

    /// Number of temperatures in the response table/plot.
    #[arg(long, default_value_t = 29)]
    pub samples: usize,

    /// Print the result as JSON instead of text.
    #[arg(long)]
    pub json: bool,

    /// Print progress samples and timing to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Options for the two-resistor search.
#[derive(Debug, Args, Clone)]
pub struct DividerArgs {
    #[command(flatten)]
    pub thermistor: ThermistorArgs,

    #[command(flatten)]
    pub range: RangeArgs,

    /// Supply voltage (V).
    #[arg(long, default_value_t = 3.3)]
    pub vdd: f64,

    /// Lowest allowed ADC input (V).
    #[arg(long, default_value_t = 0.1, allow_negative_numbers = true)]
    pub adc_min: f64,

    /// Highest allowed ADC input (V).
    #[arg(long, default_value_t = 0.95, allow_negative_numbers = true)]
    pub adc_max: f64,

    /// Smallest candidate rd (Ohms).
    #[arg(long, default_value_t = 1.0)]
    pub rd_min: f64,

    /// Largest candidate rd (Ohms).
    #[arg(long, default_value_t = 100_000.0)]
    pub rd_max: f64,

    /// Number of rd candidates.
    #[arg(long, default_value_t = 5000)]
    pub rd_steps: usize,

    /// Smallest candidate ru (Ohms).
    #[arg(long, default_value_t = 100.0)]
    pub ru_min: f64,

    /// Largest candidate ru (Ohms).
    #[arg(long, default_value_t = 600_000.0)]
    pub ru_max: f64,

    /// Number of ru candidates.
    #[arg(long, default_value_t = 5000)]
    pub ru_steps: usize,

    /// Record every N-th combination for progress output (0 disables).
    #[arg(long, default_value_t = crate::search::DEFAULT_PROGRESS_STRIDE)]
    pub progress_every: u64,

    /// Scan on a single thread.
    #[arg(long)]
    pub sequential: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Options for the pull-up search.
#[derive(Debug, Args, Clone)]
pub struct PullupArgs {
    #[command(flatten)]
    pub thermistor: ThermistorArgs,

    #[command(flatten)]
    pub range: RangeArgs,

    /// Reference voltage at the top of the pull-up (V).
    #[arg(long, default_value_t = 1.0)]
    pub vref: f64,

    /// Smallest candidate rp as a multiple of R0.
    #[arg(long, default_value_t = 0.1)]
    pub rp_min_factor: f64,

    /// Largest candidate rp as a multiple of R0.
    #[arg(long, default_value_t = 10.0)]
    pub rp_max_factor: f64,

    /// Number of rp candidates.
    #[arg(long, default_value_t = 10_000)]
    pub rp_steps: usize,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Options for converting a reading to a temperature.
#[derive(Debug, Args, Clone)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub thermistor: ThermistorArgs,

    /// Circuit the reading was taken from.
    #[arg(long, value_enum, default_value_t = TopologyKind::Pullup)]
    pub topology: TopologyKind,

    /// Node voltage as a fraction of the supply (0..1).
    #[arg(long, conflicts_with = "volts", required_unless_present = "volts")]
    pub ratio: Option<f64>,

    /// Node voltage (V); divided by `--supply`.
    #[arg(long)]
    pub volts: Option<f64>,

    /// Supply/reference voltage used with `--volts` (V) [default: 1.0].
    #[arg(long, requires = "volts")]
    pub supply: Option<f64>,

    /// Pull-up resistor (Ohms), for `--topology pullup`.
    #[arg(long)]
    pub rp: Option<f64>,

    /// Ground-side resistor (Ohms), for `--topology divider`.
    #[arg(long)]
    pub rd: Option<f64>,

    /// Supply-side resistor (Ohms), for `--topology divider`.
    #[arg(long)]
    pub ru: Option<f64>,

    /// Print the result as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divider_defaults_match_reference_design() {
        let cli = Cli::parse_from(["thermdiv", "divider"]);
        let Command::Divider(args) = cli.command else {
            panic!("expected divider command");
        };
        assert_eq!(args.range.t_min, -20.0);
        assert_eq!(args.vdd, 3.3);
        assert_eq!(args.rd_steps, 5000);
        assert_eq!(args.progress_every, 99_931);
        assert!(!args.sequential);
    }

    #[test]
    fn negative_temperatures_parse() {
        let cli = Cli::parse_from(["thermdiv", "pullup", "--t-min", "-40", "--t-max", "-5"]);
        let Command::Pullup(args) = cli.command else {
            panic!("expected pullup command");
        };
        assert_eq!(args.range.t_min, -40.0);
        assert_eq!(args.range.t_max, -5.0);
    }

    #[test]
    fn convert_requires_a_reading() {
        assert!(Cli::try_parse_from(["thermdiv", "convert", "--rp", "10000"]).is_err());
        assert!(
            Cli::try_parse_from(["thermdiv", "convert", "--ratio", "0.5", "--volts", "1.0"]).is_err()
        );
        assert!(Cli::try_parse_from(["thermdiv", "convert", "--ratio", "0.5", "--rp", "10000"]).is_ok());
    }

    #[test]
    fn supply_only_applies_to_volts() {
        assert!(
            Cli::try_parse_from(["thermdiv", "convert", "--ratio", "0.5", "--supply", "3.3", "--rp", "10000"])
                .is_err()
        );
        let cli =
            Cli::try_parse_from(["thermdiv", "convert", "--volts", "1.65", "--supply", "3.3", "--rp", "10000"])
                .unwrap();
        let Command::Convert(args) = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(args.supply, Some(3.3));
    }
}
