use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use empctl_core::db::redact_url;
use empctl_core::EmpConfig;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show config file path
    Path,
    /// Show the resolved configuration (passwords masked)
    Show,
}

pub fn run_config(args: ConfigArgs, config: &EmpConfig, database_url: Option<&str>) -> Result<()> {
    match args.command {
        ConfigCommands::Path => run_path(),
        ConfigCommands::Show => run_show(config, database_url),
    }
}

fn run_path() -> Result<()> {
    let path = EmpConfig::config_path().context("Could not determine home directory")?;
    println!("{}", path.display());
    Ok(())
}

fn run_show(config: &EmpConfig, database_url: Option<&str>) -> Result<()> {
    let path = EmpConfig::config_path();
    match &path {
        Some(path) if path.exists() => println!("config file:  {}", path.display()),
        Some(path) => println!("config file:  {} (not found, using defaults)", path.display()),
        None => println!("config file:  (no home directory)"),
    }

    let url = match config.resolve_database_url(database_url) {
        Ok(url) => redact_url(&url),
        Err(_) => "(not set)".to_string(),
    };
    println!("database url: {}", url);
    println!(
        "log level:    {}",
        config
            .logging
            .level
            .as_deref()
            .unwrap_or(crate::tracing_setup::DEFAULT_LEVEL)
    );

    Ok(())
}
