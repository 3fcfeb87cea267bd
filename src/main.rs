// src/main.rs

//! ghl-sync: GoHighLevel CRM to Postgres sync CLI
//!
//! Triggers the contact and task sync pipelines and prints each run's
//! report as JSON. Credentials come from the environment; pacing and
//! endpoints come from the config file.

use clap::{Parser, Subcommand};

use ghl_sync::error::Result;
use ghl_sync::models::{Config, SyncReport};
use ghl_sync::pipeline::{Pacer, run_contact_sync, run_task_sync};
use ghl_sync::services::CrmClient;
use ghl_sync::storage::PgStore;

#[derive(Parser, Debug)]
#[command(
    name = "ghl-sync",
    version = "0.1.0",
    about = "Mirrors GoHighLevel CRM contacts and tasks into Postgres"
)]

/// CLI Arguments
struct Cli {
    #[arg(short, long, default_value = "data/config.toml")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

/// CLI Commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Run the cursor-paginated contact sync
    SyncContacts,
    /// Run the per-contact task sync
    SyncTasks,
    /// Run contact sync, then task sync
    SyncAll,
    /// Validate configuration and exit
    Validate,
}

/// Main entry point
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = Config::load_or_default(&cli.config);

    if let Command::Validate = cli.command {
        config.validate()?;
        println!("configuration ok");
        return Ok(());
    }

    config.validate()?;
    let crm = CrmClient::new(&config.crm, config.sync.page_size)?;
    let store = PgStore::connect(&config.database.url).await?;

    let reports: Vec<SyncReport> = match cli.command {
        Command::SyncContacts => {
            vec![run_contact_sync(&crm, &store, &Pacer::for_pages(&config.sync)).await]
        }
        Command::SyncTasks => {
            vec![run_task_sync(&crm, &store, &Pacer::for_contacts(&config.sync)).await]
        }
        Command::SyncAll => {
            let contacts = run_contact_sync(&crm, &store, &Pacer::for_pages(&config.sync)).await;
            let tasks = run_task_sync(&crm, &store, &Pacer::for_contacts(&config.sync)).await;
            vec![contacts, tasks]
        }
        Command::Validate => unreachable!(),
    };

    for report in &reports {
        println!("{}", serde_json::to_string_pretty(report)?);
    }

    if reports.iter().any(|report| !report.success) {
        std::process::exit(1);
    }

    Ok(())
}
