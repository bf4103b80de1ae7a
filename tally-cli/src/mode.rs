//! Output mode selection: operator (tables, color) vs agent (JSON).

use clap::ValueEnum;
use is_terminal::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Auto,
    Json,
    Human,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Agent,
}

/// Resolve the requested format; `auto` follows whether stdout is a terminal.
pub fn detect_output_mode(format: OutputFormat) -> OutputMode {
    resolve(format, std::io::stdout().is_terminal())
}

/// Mode for reporting failures that happen before clap has parsed the arguments.
pub fn detect_mode_from_raw_args(args: &[String]) -> OutputMode {
    detect_output_mode(format_from_raw_args(args))
}

fn format_from_raw_args(args: &[String]) -> OutputFormat {
    let mut format = OutputFormat::Auto;
    let mut index = 1;
    while index < args.len() {
        let arg = args[index].as_str();
        if arg == "--" {
            break;
        }
        let value = if arg == "--output" {
            index += 1;
            args.get(index).map(String::as_str)
        } else {
            arg.strip_prefix("--output=")
        };
        if let Some(parsed) = value.and_then(|v| OutputFormat::from_str(v, true).ok()) {
            format = parsed;
        }
        index += 1;
    }
    format
}

fn resolve(format: OutputFormat, stdout_is_terminal: bool) -> OutputMode {
    match format {
        OutputFormat::Human => OutputMode::Human,
        OutputFormat::Json => OutputMode::Agent,
        OutputFormat::Auto if stdout_is_terminal => OutputMode::Human,
        OutputFormat::Auto => OutputMode::Agent,
    }
}
