use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod config;
mod dashboard_cmd;
mod list_cmd;
mod state;

#[derive(Parser, Debug)]
#[command(
    name = "triage",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("TRIAGE_BUILD_SHA"), ")"),
    about = "Caseworker worklist triage: severity, deadline groups and ordering"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Group, filter and page a task export for one sort mode
    List(list_cmd::ListArgs),

    /// Count open tasks per severity and deadline bucket
    Dashboard(dashboard_cmd::DashboardArgs),

    /// Manage ~/.triage/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,

    /// Print the effective configuration
    Show,
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the worklist.
    // Example: RUST_LOG=triage_core=trace triage list --file tasks.json
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("triage_cli=info,triage_core=info,triage_ingest=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::List(args) => {
            let cfg = config::load_config()?;
            list_cmd::run(args, &cfg)?;
        }

        Command::Dashboard(args) => {
            let cfg = config::load_config()?;
            dashboard_cmd::run(args, &cfg)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => config::show_config()?,
        },
    }

    tracing::debug!("triage completed");
    Ok(())
}
