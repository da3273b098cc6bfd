use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "cloud-cost-calculator",
    version,
    about = "Monthly cost estimates for data-platform workloads"
)]
pub struct Cli {
    /// Configuration file path
    #[arg(
        short,
        long,
        default_value = "config.toml",
        env = "COSTCALC_CONFIG",
        global = true
    )]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Price a scenario and print the breakdown (default)
    Estimate {
        /// Scenario file (defaults to scenario.path from the config)
        #[arg(short, long)]
        scenario: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Write the full report document as JSON
    Export {
        /// Scenario file (defaults to scenario.path from the config)
        #[arg(short, long)]
        scenario: Option<PathBuf>,

        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List rate-card entries and storage prices
    Rates {
        /// Only show this compute type, e.g. "Jobs Compute"
        #[arg(short = 't', long)]
        compute_type: Option<String>,
    },

    /// Write a default scenario built from the rate card
    Init {
        /// Destination (defaults to scenario.path from the config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Validate pricing and scenario, listing unresolved references
    Check {
        /// Scenario file (defaults to scenario.path from the config)
        #[arg(short, long)]
        scenario: Option<PathBuf>,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Display the effective configuration
    Show,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl Cli {
    /// Get the command to execute, defaulting to Estimate if none provided
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Estimate {
            scenario: None,
            format: OutputFormat::Table,
        })
    }
}
