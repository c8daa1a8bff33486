pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "blog-cms")]
#[command(about = "Blog CMS backend - server and maintenance commands")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve,

    #[command(about = "Write any missing default settings to the configured store")]
    SeedSettings,

    #[command(about = "Mint a session token for an operator")]
    IssueToken {
        #[arg(long, default_value = "admin", help = "Role to embed: admin or user")]
        role: String,
        #[arg(long, help = "User id (random when omitted)")]
        user_id: Option<uuid::Uuid>,
        #[arg(
            long,
            value_parser = clap::value_parser!(u64).range(1..=876_000),
            help = "Lifetime in hours (defaults to JWT_EXPIRY_HOURS)"
        )]
        hours: Option<u64>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
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
    let config = crate::config::config().clone();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => commands::serve::handle(config).await,
        Commands::SeedSettings => commands::settings::seed(config, output_format).await,
        Commands::IssueToken { role, user_id, hours } => {
            commands::token::issue(&config, &role, user_id, hours, output_format)
        }
    }
}
