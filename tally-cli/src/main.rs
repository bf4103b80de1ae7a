//! Tally CLI entry point: amounts -> format/convert -> table or JSON.

mod input;
mod mode;
mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{error::ErrorKind, Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use is_terminal::IsTerminal;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use tally_core::{
    coerce_number, format_reward, is_exact_amount, parse_major_units, parse_minor_units,
    BalanceFormatter, Denomination, BALANCE_DECIMALS,
};

use input::InputError;
use mode::{OutputFormat, OutputMode};
use output::{AgentError, AmountRow, Report};

/// CLI-only enum to satisfy clap's ValueEnum without adding clap to core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CliDenomination {
    Satoshi,
    Gwei,
    Wei,
}

impl CliDenomination {
    fn to_core(self) -> Denomination {
        match self {
            CliDenomination::Satoshi => Denomination::Satoshi,
            CliDenomination::Gwei => Denomination::Gwei,
            CliDenomination::Wei => Denomination::Wei,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "tally", version)]
#[command(about = "Format minor-unit amounts (satoshi, gwei, wei) as coin balances")]
struct Cli {
    /// Output format: auto (tty=human, pipe=agent), json (agent), human (operator).
    #[arg(long, value_enum, default_value = "auto", global = true)]
    output: OutputFormat,

    /// Disable colored output in human mode.
    #[arg(long = "no-color", global = true)]
    no_color: bool,

    /// Log at debug level (TALLY_LOG overrides).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Args)]
struct SourceArgs {
    /// Amounts to process; read from --input or stdin when omitted.
    #[arg(allow_negative_numbers = true)]
    amounts: Vec<String>,

    /// CSV file to read amounts from (must include a header row).
    #[arg(long)]
    input: Option<PathBuf>,

    /// CSV column holding the amounts.
    #[arg(long, default_value = "amount")]
    column: String,
}

#[derive(Debug, Clone, Subcommand)]
enum Commands {
    /// Format amounts as fixed-decimal balances (never rejects unless --strict).
    Balance {
        #[command(flatten)]
        source: SourceArgs,

        #[arg(long, value_enum, default_value = "satoshi")]
        unit: CliDenomination,

        /// Fractional digits in the output.
        #[arg(long, default_value_t = BALANCE_DECIMALS)]
        decimals: u8,

        /// Reject NaN and infinite amounts instead of printing them.
        #[arg(long)]
        strict: bool,
    },
    /// Format integer amounts exactly, without floating point.
    Reward {
        #[command(flatten)]
        source: SourceArgs,

        #[arg(long, value_enum, default_value = "satoshi")]
        unit: CliDenomination,
    },
    /// Convert coin amounts back into integer minor units.
    Parse {
        #[command(flatten)]
        source: SourceArgs,

        #[arg(long, value_enum, default_value = "satoshi")]
        unit: CliDenomination,
    },
}

impl Commands {
    fn source(&self) -> &SourceArgs {
        match self {
            Commands::Balance { source, .. }
            | Commands::Reward { source, .. }
            | Commands::Parse { source, .. } => source,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExitCode {
    Success = 0,
    ValidationError = 1,
    ConfigError = 2,
    IoError = 3,
}

impl ExitCode {
    const fn as_i32(self) -> i32 {
        self as i32
    }
}

fn exit_code_for_input_error(err: &InputError) -> ExitCode {
    match err {
        InputError::Io(_) | InputError::Csv(_) => ExitCode::IoError,
        InputError::MissingColumn { .. } | InputError::NoInput => ExitCode::ConfigError,
    }
}

fn agent_error_name(err: &InputError) -> &'static str {
    match err {
        InputError::Io(_) => "io_error",
        InputError::Csv(_) => "csv_parse_error",
        InputError::MissingColumn { .. } => "missing_column",
        InputError::NoInput => "no_input",
    }
}

fn init_tracing(verbose: bool, ansi: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("TALLY_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(ansi)
        .init();
}

fn run_balance(amounts: &[String], formatter: BalanceFormatter, strict: bool) -> Report {
    let mut rows = Vec::with_capacity(amounts.len());
    let mut warnings = Vec::new();

    for (i, raw) in amounts.iter().enumerate() {
        let row_num = i + 1;
        let value = coerce_number(raw);

        let row = if strict {
            match formatter.format_checked(value) {
                Ok(formatted) => AmountRow::ok(row_num, raw, formatted),
                Err(e) => AmountRow::failed(row_num, raw, e),
            }
        } else {
            AmountRow::ok(row_num, raw, formatter.format(value))
        };

        if row.error.is_none() && !is_exact_amount(value) {
            debug!(row = row_num, value, "amount outside exact integer range");
            warnings.push(format!(
                "row {row_num}: '{raw}' is not an exact integer amount; output may not round-trip"
            ));
        }
        rows.push(row);
    }

    Report::new("balance", formatter.denomination.as_str(), rows, warnings)
}

fn run_reward(amounts: &[String], denomination: Denomination) -> Report {
    let rows = amounts
        .iter()
        .enumerate()
        .map(|(i, raw)| match parse_minor_units(raw) {
            Ok(value) => AmountRow::ok(i + 1, raw, format_reward(value, denomination)),
            Err(e) => AmountRow::failed(i + 1, raw, e),
        })
        .collect();

    Report::new("reward", denomination.as_str(), rows, Vec::new())
}

fn run_parse(amounts: &[String], denomination: Denomination) -> Report {
    let rows = amounts
        .iter()
        .enumerate()
        .map(|(i, raw)| match parse_major_units(raw, denomination) {
            Ok(value) => AmountRow::ok(i + 1, raw, value.to_string()),
            Err(e) => AmountRow::failed(i + 1, raw, e),
        })
        .collect();

    Report::new("parse", denomination.as_str(), rows, Vec::new())
}

fn execute(command: &Commands) -> Result<Report, InputError> {
    let source = command.source();
    let amounts =
        input::collect_amounts(&source.amounts, source.input.as_deref(), &source.column)?;

    let report = match command {
        Commands::Balance {
            unit,
            decimals,
            strict,
            ..
        } => {
            let formatter = BalanceFormatter::new(unit.to_core(), *decimals);
            debug!(?formatter, strict, "formatting balances");
            run_balance(&amounts, formatter, *strict)
        }
        Commands::Reward { unit, .. } => run_reward(&amounts, unit.to_core()),
        Commands::Parse { unit, .. } => run_parse(&amounts, unit.to_core()),
    };
    Ok(report)
}

fn emit_report(report: &Report, mode: OutputMode) -> Result<()> {
    match mode {
        OutputMode::Human => print!("{}", output::render_human(report)),
        OutputMode::Agent => {
            let json = output::render_agent(report).context("failed to serialize report")?;
            println!("{json}");
        }
    }
    Ok(())
}

fn emit_input_error(err: &InputError, mode: OutputMode, code: ExitCode) -> Result<()> {
    match mode {
        OutputMode::Human => eprintln!("{} {}", "✗".red(), err.to_string().red()),
        OutputMode::Agent => {
            let payload = AgentError {
                error: agent_error_name(err).to_string(),
                code: code.as_i32(),
                message: err.to_string(),
            };
            let json =
                serde_json::to_string(&payload).context("failed to serialize agent error")?;
            eprintln!("{json}");
        }
    }
    Ok(())
}

fn usage_error_payload(err: &clap::Error) -> AgentError {
    AgentError {
        error: "usage_error".to_string(),
        code: ExitCode::ConfigError.as_i32(),
        message: err.to_string().trim().to_string(),
    }
}

/// Parse arguments, handling clap failures in the mode the caller asked for.
fn parse_cli(raw_args: &[String]) -> Result<Cli> {
    let err = match Cli::try_parse_from(raw_args) {
        Ok(cli) => return Ok(cli),
        Err(err) => err,
    };

    if matches!(
        err.kind(),
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
    ) {
        err.print().context("failed to print help")?;
        std::process::exit(ExitCode::Success.as_i32());
    }

    match mode::detect_mode_from_raw_args(raw_args) {
        OutputMode::Agent => {
            let json = serde_json::to_string(&usage_error_payload(&err))
                .context("failed to serialize agent error")?;
            eprintln!("{json}");
        }
        OutputMode::Human => err.print().context("failed to print usage error")?,
    }
    std::process::exit(ExitCode::ConfigError.as_i32());
}

fn main() -> Result<()> {
    let raw_args: Vec<String> = std::env::args().collect();
    let cli = parse_cli(&raw_args)?;
    init_tracing(cli.verbose, std::io::stderr().is_terminal() && !cli.no_color);
    if cli.no_color {
        colored::control::set_override(false);
    }
    let mode = mode::detect_output_mode(cli.output);
    debug!(?mode, "output mode selected");

    let code = match execute(&cli.command) {
        Ok(report) => {
            emit_report(&report, mode)?;
            if report.success {
                ExitCode::Success
            } else {
                if mode == OutputMode::Human {
                    warn!(rejected = report.error_count(), "some amounts were rejected");
                }
                ExitCode::ValidationError
            }
        }
        Err(err) => {
            let code = exit_code_for_input_error(&err);
            emit_input_error(&err, mode, code)?;
            code
        }
    };

    if code != ExitCode::Success {
        std::process::exit(code.as_i32());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io;

    use clap::Parser;

    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn cli_parses_balance_with_flags() {
        let cli = Cli::try_parse_from([
            "tally",
            "--output",
            "json",
            "balance",
            "123456789",
            "-1",
            "--unit",
            "gwei",
            "--decimals",
            "4",
            "--strict",
        ])
        .unwrap();

        assert_eq!(cli.output, OutputFormat::Json);
        match cli.command {
            Commands::Balance {
                source,
                unit,
                decimals,
                strict,
            } => {
                assert_eq!(source.amounts, strings(&["123456789", "-1"]));
                assert_eq!(source.column, "amount");
                assert_eq!(unit, CliDenomination::Gwei);
                assert_eq!(decimals, 4);
                assert!(strict);
            }
            _ => panic!("expected balance command"),
        }
    }

    #[test]
    fn cli_defaults_to_satoshi_and_eight_decimals() {
        let cli = Cli::try_parse_from(["tally", "balance", "50"]).unwrap();
        assert_eq!(cli.output, OutputFormat::Auto);
        match cli.command {
            Commands::Balance {
                unit,
                decimals,
                strict,
                ..
            } => {
                assert_eq!(unit.to_core(), Denomination::Satoshi);
                assert_eq!(decimals, 8);
                assert!(!strict);
            }
            _ => panic!("expected balance command"),
        }
    }

    #[test]
    fn global_flags_are_accepted_after_subcommand() {
        let cli = Cli::try_parse_from([
            "tally",
            "reward",
            "--input",
            "payouts.csv",
            "--column",
            "value",
            "--no-color",
            "--verbose",
        ])
        .unwrap();

        assert!(cli.no_color);
        assert!(cli.verbose);
        match cli.command {
            Commands::Reward { source, .. } => {
                assert!(source.amounts.is_empty());
                assert_eq!(source.input, Some(PathBuf::from("payouts.csv")));
                assert_eq!(source.column, "value");
            }
            _ => panic!("expected reward command"),
        }
    }

    #[test]
    fn unknown_unit_is_rejected() {
        assert!(Cli::try_parse_from(["tally", "parse", "1", "--unit", "lamport"]).is_err());
    }

    #[test]
    fn hyphen_led_amounts_are_usage_errors() {
        let err = Cli::try_parse_from(["tally", "--output", "json", "balance", "-Infinity"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);

        let payload = usage_error_payload(&err);
        assert_eq!(payload.error, "usage_error");
        assert_eq!(payload.code, 2);
        assert!(payload.message.contains("'-I'"));

        let separated =
            Cli::try_parse_from(["tally", "balance", "--", "-Infinity", "-abc"]).unwrap();
        assert_eq!(separated.command.source().amounts, strings(&["-Infinity", "-abc"]));
    }

    #[test]
    fn balance_never_rejects_without_strict() {
        let report = run_balance(
            &strings(&["123456789", "abc", "Infinity", ""]),
            BalanceFormatter::default(),
            false,
        );

        assert!(report.success);
        let outputs: Vec<_> = report.rows.iter().map(|r| r.output.clone().unwrap()).collect();
        assert_eq!(outputs, strings(&["1.23456789", "NaN", "Infinity", "0.00000000"]));
        assert_eq!(report.warnings.len(), 2);
    }

    #[test]
    fn strict_balance_rejects_non_finite() {
        let report = run_balance(&strings(&["50", "abc"]), BalanceFormatter::default(), true);

        assert!(!report.success);
        assert_eq!(report.rows[0].output.as_deref(), Some("0.00000050"));
        assert!(report.rows[1].error.as_deref().unwrap().contains("not a finite number"));
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn balance_warns_beyond_safe_integers() {
        let report = run_balance(
            &strings(&["9007199254740993"]),
            BalanceFormatter::default(),
            false,
        );
        assert!(report.success);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].starts_with("row 1:"));
    }

    #[test]
    fn reward_formats_integers_exactly() {
        let report = run_reward(&strings(&["9007199254740993", "1.5"]), Denomination::Satoshi);
        assert_eq!(report.rows[0].output.as_deref(), Some("90071992.54740993"));
        assert!(report.rows[1].error.is_some());
        assert!(!report.success);

        let wei = run_reward(&strings(&["5000000000"]), Denomination::Wei);
        assert_eq!(wei.unit, "wei");
        assert_eq!(wei.rows[0].output.as_deref(), Some("0.00000001"));
    }

    #[test]
    fn parse_converts_back_to_minor_units() {
        let report = run_parse(&strings(&["1.23456789", "-1"]), Denomination::Satoshi);
        assert_eq!(report.rows[0].output.as_deref(), Some("123456789"));
        assert_eq!(
            report.rows[1].error.as_deref(),
            Some("amount contains a sign; negative/positive signs are not allowed")
        );
    }

    #[test]
    fn input_errors_map_to_exit_codes() {
        assert_eq!(
            exit_code_for_input_error(&InputError::Io(io::Error::other("io"))),
            ExitCode::IoError
        );
        assert_eq!(
            exit_code_for_input_error(&InputError::NoInput),
            ExitCode::ConfigError
        );
        assert_eq!(
            exit_code_for_input_error(&InputError::MissingColumn {
                column: "amount".to_string()
            }),
            ExitCode::ConfigError
        );
    }
}
