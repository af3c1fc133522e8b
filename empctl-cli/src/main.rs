//! empctl CLI - Employee records console
//!
//! Runs an interactive menu (add, view, update, delete) over the
//! `employees` table, or a single operation per invocation:
//! - `empctl` / `empctl menu` - interactive menu
//! - `empctl add|list|update|delete` - one-shot operations for scripts
//! - `empctl config` - inspect configuration

use std::io;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use empctl_core::config::load_dotenv;
use empctl_core::{EmpConfig, EmployeeStore, UrlProvider};
use tracing::debug;

mod commands;
mod config;
mod menu;
mod prompt;
mod tracing_setup;

use menu::Menu;
use prompt::Console;

#[derive(Parser, Debug)]
#[command(
    name = "empctl",
    author,
    version,
    about = "Add, view, update and delete employee records",
    long_about = "Interactive console for the employees table (id, name, department, salary). \
                  Works against SQLite or MySQL; each operation opens its own connection."
)]
struct Cli {
    /// Database URL (sqlite://... or mysql://...)
    #[arg(
        long,
        global = true,
        env = "EMPCTL_DATABASE_URL",
        hide_env_values = true,
        value_name = "URL"
    )]
    database_url: Option<String>,

    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive menu (default when no subcommand is given)
    Menu,
    /// Add one employee
    Add(commands::AddArgs),
    /// Print all employees as a tab-separated table
    List,
    /// Update an employee's salary by id
    Update(commands::UpdateArgs),
    /// Delete an employee by id
    Delete(commands::DeleteArgs),
    /// Inspect empctl configuration (path, show)
    Config(config::ConfigArgs),
}

fn open_store(config: &EmpConfig, database_url: Option<&str>) -> Result<EmployeeStore<UrlProvider>> {
    let url = config.resolve_database_url(database_url)?;
    let provider = UrlProvider::new(url).context("invalid database URL")?;
    Ok(EmployeeStore::new(provider))
}

async fn run_menu(store: EmployeeStore<UrlProvider>) -> Result<()> {
    let stdin = io::stdin();
    let console = Console::new(stdin.lock(), io::stdout());
    let mut menu = Menu::new(store, console);
    menu.run().await.context("console I/O failed")
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // .env must be loaded before clap reads EMPCTL_DATABASE_URL
    let dotenv_files = load_dotenv();
    let cli = Cli::parse();
    let config = EmpConfig::load().context("failed to load config")?;

    tracing_setup::init(&tracing_setup::TracingConfig {
        debug: cli.debug,
        level: config.logging.level.clone(),
    })
    .ok();
    for path in &dotenv_files {
        debug!("loaded environment from {}", path.display());
    }

    let database_url = cli.database_url.as_deref();
    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Config(args) => config::run_config(args, &config, database_url)?,
        Commands::Menu => run_menu(open_store(&config, database_url)?).await?,
        Commands::Add(args) => commands::run_add(&open_store(&config, database_url)?, args).await?,
        Commands::List => commands::run_list(&open_store(&config, database_url)?).await?,
        Commands::Update(args) => {
            commands::run_update(&open_store(&config, database_url)?, args).await?
        }
        Commands::Delete(args) => {
            commands::run_delete(&open_store(&config, database_url)?, args).await?
        }
    }
    Ok(())
}
