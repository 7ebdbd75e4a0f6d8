//! CLI command definitions for the `parley` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod persona;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Conversational English tutor service.
#[derive(Parser)]
#[command(name = "parley", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to parley.toml (defaults are used if it does not exist).
    #[arg(long, global = true, env = "PARLEY_CONFIG", default_value = "parley.toml")]
    pub config: PathBuf,

    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Also export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Default log filter for the chosen verbosity. `RUST_LOG` wins when set.
    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "info",
            1 => "info,parley=debug,parley_core=debug,parley_infra=debug,parley_api=debug",
            _ => "trace",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server.
    Serve {
        /// Port to listen on (overrides config and PORT).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides config and PARLEY_HOST).
        #[arg(long)]
        host: Option<String>,
    },

    /// List the configured personas.
    #[command(alias = "ls")]
    Personas,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_serve_overrides() {
        let cli = Cli::try_parse_from(["parley", "serve", "--port", "8080", "--host", "127.0.0.1"])
            .unwrap();
        match cli.command {
            Commands::Serve { port, host } => {
                assert_eq!(port, Some(8080));
                assert_eq!(host.as_deref(), Some("127.0.0.1"));
            }
            _ => panic!("Expected serve"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["parley", "personas", "--json", "-vv"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.log_directive(), "trace");
        assert!(matches!(cli.command, Commands::Personas));
    }

    #[test]
    fn quiet_lowers_log_level() {
        let cli = Cli::try_parse_from(["parley", "--quiet", "serve"]).unwrap();
        assert_eq!(cli.log_directive(), "error");
    }

    #[test]
    fn command_definition_is_valid() {
        <Cli as clap::CommandFactory>::command().debug_assert();
    }
}
