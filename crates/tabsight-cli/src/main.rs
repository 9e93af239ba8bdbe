// Tabsight CLI Entry Point

use anyhow::Context as _;
use clap::Parser;
use tabsight_cli::{init_logging, output, Cli, CommandRouter};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match CommandRouter::resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            output::print_error(&e.user_message());
            std::process::exit(2);
        }
    };
    init_logging(&config.logging.level).context("failed to initialize logging")?;

    let ctx = CommandRouter::context(config);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if let Err(e) = CommandRouter::route(&cli.command, &ctx, &mut out) {
        output::print_error(&e.user_message());
        std::process::exit(1);
    }
    Ok(())
}
