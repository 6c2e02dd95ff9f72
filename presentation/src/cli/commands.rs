//! CLI command definitions

use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

/// CLI arguments for mabrur
#[derive(Parser, Debug)]
#[command(name = "mabrur")]
#[command(author, version, about = "Mabrur AI - hajj and umrah assistant for pilgrims")]
#[command(long_about = r#"
Mabrur AI answers pilgrims' questions about hajj and umrah.

Each question is grounded with matching entries from the knowledge base
before it is sent to the language model. Provider failures never reach
the pilgrim: they receive a polite fallback message instead.

Configuration files are loaded from (in priority order):
1. MABRUR_* environment variables (e.g. MABRUR_RETRY__MAX_ATTEMPTS=3)
2. --config <path>     Explicit config file
3. ./mabrur.toml       Project-level config
4. ~/.config/mabrur/config.toml   Global config

Example:
  mabrur serve --bind 0.0.0.0:3000
  mabrur ask "Bagaimana niat ihram untuk umrah?"
  mabrur seed
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write daily-rotated log files into this directory
    #[arg(long, value_name = "DIR", global = true)]
    pub log_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP chat service
    Serve {
        /// Address to listen on (overrides server.bind)
        #[arg(long, value_name = "ADDR")]
        bind: Option<SocketAddr>,
    },

    /// Answer a single question on the console
    Ask {
        /// The pilgrim's question
        question: String,

        /// Print the answer as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create the knowledge table and insert the sample records
    Seed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve_with_bind() {
        let cli = Cli::parse_from(["mabrur", "-vv", "serve", "--bind", "0.0.0.0:8080"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Some(Command::Serve { bind }) => {
                assert_eq!(bind, Some("0.0.0.0:8080".parse().unwrap()));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_ask_json_with_global_config_after_subcommand() {
        let cli = Cli::parse_from([
            "mabrur",
            "ask",
            "Dimana Jabal Rahmah?",
            "--json",
            "--config",
            "custom.toml",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        match cli.command {
            Some(Command::Ask { question, json }) => {
                assert_eq!(question, "Dimana Jabal Rahmah?");
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_bind_is_rejected() {
        assert!(Cli::try_parse_from(["mabrur", "serve", "--bind", "nowhere"]).is_err());
    }
}
