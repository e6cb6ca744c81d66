//! CLI argument definitions for the SMBIOS compliance checker.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "smbios-validate",
    version,
    about = "Check a dmidecode dump against SMBIOS compliance rules",
    long_about = "Check the SMBIOS tables of a system, as printed by dmidecode,\n\
                  against a TOML rule file.\n\n\
                  Exits with status 0 when the dump is compliant and 1 otherwise."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a dmidecode dump and print the compliance transcript.
    Check(CheckArgs),

    /// List the type rules declared in a rule file.
    Rules(RulesArgs),
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Text output of `dmidecode` to validate.
    #[arg(long = "table", value_name = "DUMP")]
    pub table: PathBuf,

    /// Rule file (default: $SMBIOS_RULES_FILE, then the bundled rules).
    #[arg(long = "rules", value_name = "RULES")]
    pub rules: Option<PathBuf>,

    /// Output format for the transcript.
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormatArg,

    /// Skip the summary table after the text transcript.
    #[arg(long = "no-summary")]
    pub no_summary: bool,
}

#[derive(Parser)]
pub struct RulesArgs {
    /// Rule file (default: $SMBIOS_RULES_FILE, then the bundled rules).
    #[arg(long = "rules", value_name = "RULES")]
    pub rules: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Text,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn check_defaults_to_text() {
        let cli = Cli::parse_from(["smbios-validate", "check", "--table", "dump.txt"]);
        let Command::Check(args) = cli.command else {
            panic!("expected check command");
        };
        assert_eq!(args.table, PathBuf::from("dump.txt"));
        assert!(args.rules.is_none());
        assert!(args.format == OutputFormatArg::Text);
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::parse_from([
            "smbios-validate",
            "rules",
            "--rules",
            "custom.toml",
            "--log-level",
            "debug",
        ]);
        assert!(matches!(cli.log_level, Some(LogLevelArg::Debug)));
        assert!(matches!(cli.command, Command::Rules(_)));
    }
}
