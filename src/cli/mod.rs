pub mod commands;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "staff-dashboard")]
#[command(about = "Staff dashboard - guarded pages over schema-driven model tables")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the dashboard server")]
    Serve {
        #[arg(long, help = "Port to listen on (overrides DASHBOARD_PORT)")]
        port: Option<u16>,
        #[arg(long, help = "Address to bind (overrides DASHBOARD_BIND)")]
        bind: Option<String>,
    },

    #[command(about = "List the registered model types")]
    Models,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Serve { port, bind } => commands::serve::handle(port, bind).await,
        Commands::Models => commands::models::handle(output_format),
    }
}
