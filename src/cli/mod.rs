//! Command-line interface.

pub mod commands;
pub mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use crate::adapters::sqlite::{initialize_database, PoolConfig, SqliteFactStore};
use crate::domain::models::Config;
use crate::infrastructure::config::ConfigLoader;
use crate::services::SchedulerService;
use commands::task::AddArgs;

#[derive(Parser, Debug)]
#[command(name = "taskbrain", version, about = "Priority and deadline task scheduler")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Config file (defaults to .taskbrain/config.yaml and .taskbrain/local.yaml)
    #[arg(short, long, global = true, env = "TASKBRAIN_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a pending task
    Add(AddArgs),
    /// Mark a task completed and drop it from every dependency list
    Complete {
        /// Task ID
        id: Option<String>,
    },
    /// Show all pending tasks in recommended order
    Schedule,
    /// Show the recommended next task
    Next,
    /// List stored tasks, completed ones included
    List {
        /// Filter by status (pending, completed)
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Show task details
    Show {
        /// Task ID
        id: String,
    },
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        match self.config {
            Some(ref path) => ConfigLoader::load_from_file(path),
            None => ConfigLoader::load(),
        }
    }
}

/// Open the configured SQLite store and wrap it in a scheduler.
pub async fn open_scheduler(config: &Config) -> Result<SchedulerService<SqliteFactStore>> {
    let database_url = format!("sqlite://{}", config.database.path);
    let pool_config = PoolConfig {
        max_connections: config.database.max_connections,
        ..PoolConfig::default()
    };
    let pool = initialize_database(&database_url, Some(pool_config))
        .await
        .with_context(|| format!("Failed to open task database at {}", config.database.path))?;

    Ok(SchedulerService::with_config(
        Arc::new(SqliteFactStore::new(pool)),
        config.scheduler,
    ))
}

/// Run a parsed command against a scheduler.
pub async fn dispatch<S: crate::domain::ports::FactStore>(
    service: &SchedulerService<S>,
    command: Commands,
    json: bool,
) -> Result<()> {
    match command {
        Commands::Add(args) => commands::task::handle_add(service, args, json).await,
        Commands::Complete { id } => commands::task::handle_complete(service, id, json).await,
        Commands::Schedule => commands::schedule::handle_schedule(service, json).await,
        Commands::Next => commands::schedule::handle_next(service, json).await,
        Commands::List { status } => commands::task::handle_list(service, status, json).await,
        Commands::Show { id } => commands::task::handle_show(service, id, json).await,
    }
}

/// Report a failed command and exit non-zero.
pub fn handle_error(err: &anyhow::Error, json: bool) -> ! {
    if json {
        let body = serde_json::json!({ "error": root_message(err) });
        println!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}

/// The innermost cause, which carries the domain message (`missing field id`).
fn root_message(err: &anyhow::Error) -> String {
    err.root_cause().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::DomainError;

    #[test]
    fn test_root_message_unwraps_context() {
        let err = anyhow::Error::new(DomainError::MissingField("title")).context("Failed to add task");
        assert_eq!(root_message(&err), "missing field title");
    }
}
