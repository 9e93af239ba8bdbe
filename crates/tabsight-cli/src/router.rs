// Command routing and dispatch

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tabsight_config::{AppConfig, ConfigManager, ConfigManagerTrait, OutputFormat};
use tracing::debug;

use crate::commands::*;
use crate::error::CliResult;
use crate::output::OutputStyle;

/// Tabsight - ask plain-English questions about tabular data
#[derive(Parser, Debug)]
#[command(name = "tabsight")]
#[command(bin_name = "tabsight")]
#[command(about = "Ask plain-English questions about CSV files")]
#[command(
    long_about = "Tabsight answers questions such as \"what is the average price\" or \
                  \"bar chart of region\" about a CSV or TSV file.\n\n\
                  Quick start:\n  \
                  tabsight ask sales.csv how many records\n  \
                  tabsight repl sales.csv\n  \
                  tabsight profile sales.csv"
)]
#[command(version)]
#[command(author = "Tabsight Contributors")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (default: <config dir>/tabsight/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Diagnostic log level (trace, debug, info, warn, error)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Answer one question about a file
    Ask {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// The question, as one or more words
        #[arg(value_name = "QUESTION", required = true, num_args = 1.., allow_hyphen_values = true)]
        question: Vec<String>,
    },

    /// Answer questions read from stdin until EOF, exit or quit
    Repl {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Show the semantic type of every column
    Profile {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Show the first rows of a file
    Preview {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Number of rows (default: output.preview_rows)
        #[arg(short, long)]
        rows: Option<usize>,
    },

    /// Execute a JSON-encoded intent
    Run {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[arg(value_name = "INTENT_JSON")]
        intent: String,
    },
}

/// Command router
pub struct CommandRouter;

impl CommandRouter {
    /// Load configuration and apply command-line overrides on top of it
    pub fn resolve_config(cli: &Cli) -> CliResult<AppConfig> {
        let mut manager = match &cli.config {
            Some(path) => ConfigManager::with_path(path.clone()),
            None => ConfigManager::new(),
        };
        let mut config = manager.load_config()?;
        Self::apply_overrides(cli, &mut config);
        manager.validate_config(&config)?;
        debug!(?config, "configuration resolved");
        Ok(config)
    }

    fn apply_overrides(cli: &Cli, config: &mut AppConfig) {
        if cli.json {
            config.output.format = OutputFormat::Json;
        }
        if let Some(level) = &cli.log_level {
            config.logging.level = level.clone();
        }
        if cli.no_color {
            config.output.color = false;
        }
    }

    /// Build the shared context for a resolved configuration
    pub fn context(config: AppConfig) -> Context {
        let color = config.output.color && config.output.format == OutputFormat::Text;
        Context::new(config, OutputStyle::new(color))
    }

    /// Route a command to its handler
    pub fn route(command: &Commands, ctx: &Context, out: &mut dyn Write) -> CliResult<()> {
        match command {
            Commands::Ask { file, question } => {
                AskCommand::new(file.clone(), question).execute(ctx, out)
            }
            Commands::Repl { file } => ReplCommand::new(file.clone()).execute(ctx, out),
            Commands::Profile { file } => ProfileCommand::new(file.clone()).execute(ctx, out),
            Commands::Preview { file, rows } => {
                PreviewCommand::new(file.clone(), *rows).execute(ctx, out)
            }
            Commands::Run { file, intent } => {
                RunCommand::new(file.clone(), intent.clone()).execute(ctx, out)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_multi_word_question() {
        let cli = Cli::try_parse_from(["tabsight", "ask", "sales.csv", "how", "many", "records"])
            .unwrap();
        match cli.command {
            Commands::Ask { file, question } => {
                assert_eq!(file, PathBuf::from("sales.csv"));
                assert_eq!(question.join(" "), "how many records");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn ask_requires_a_question() {
        assert!(Cli::try_parse_from(["tabsight", "ask", "sales.csv"]).is_err());
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from([
            "tabsight",
            "preview",
            "sales.csv",
            "--rows",
            "3",
            "--json",
            "--no-color",
        ])
        .unwrap();
        assert!(cli.json);
        assert!(cli.no_color);
        assert!(matches!(cli.command, Commands::Preview { rows: Some(3), .. }));
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[logging]\nlevel = \"info\"\n\n[output]\nformat = \"text\"\n",
        )
        .unwrap();
        let path_arg = path.to_string_lossy().to_string();

        let cli = Cli::try_parse_from([
            "tabsight",
            "--config",
            path_arg.as_str(),
            "--json",
            "--log-level",
            "debug",
            "profile",
            "sales.csv",
        ])
        .unwrap();
        let config = CommandRouter::resolve_config(&cli).unwrap();
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn invalid_level_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path_arg = dir.path().join("missing.toml").to_string_lossy().to_string();
        let cli = Cli::try_parse_from([
            "tabsight",
            "--config",
            path_arg.as_str(),
            "--log-level",
            "chatty",
            "profile",
            "sales.csv",
        ])
        .unwrap();
        assert!(CommandRouter::resolve_config(&cli).is_err());
    }
}
