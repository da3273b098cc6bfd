use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cloud_cost_calculator::config::load_config;
use cloud_cost_calculator::init_tracing;

fn main() -> Result<()> {
    // Parse CLI arguments
    let args = cli::Cli::parse();
    let command = args.get_command();

    if let cli::Commands::Version = command {
        println!("Cloud Cost Calculator v{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Configuration decides the log level and format, so it is loaded first
    let cfg = load_config(&args.config)?;
    init_tracing(&cfg.logging);

    // Dispatch to appropriate command handler
    match command {
        cli::Commands::Estimate { scenario, format } => {
            commands::estimate::execute(&cfg, scenario, format)?;
        }
        cli::Commands::Export { scenario, output } => {
            commands::export::execute(&cfg, scenario, output)?;
        }
        cli::Commands::Rates { compute_type } => {
            commands::rates::execute(&cfg, compute_type)?;
        }
        cli::Commands::Init { output, force } => {
            commands::init::execute(&cfg, output, force)?;
        }
        cli::Commands::Check { scenario } => {
            commands::check::execute(&cfg, scenario)?;
        }
        cli::Commands::Config { action } => match action {
            cli::ConfigCommands::Show => commands::config::show(&cfg)?,
        },
        cli::Commands::Version => {}
    }

    Ok(())
}
