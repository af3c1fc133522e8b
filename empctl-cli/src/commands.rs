//! One-shot subcommands: run a single store operation and exit.
//!
//! Output matches the interactive menu. A database failure is returned as
//! an error (non-zero exit); "not found" is not a failure.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use empctl_core::render::write_table;
use empctl_core::{ConnectionProvider, EmployeeStore, Mutation, NewEmployee};
use tracing::info;

use crate::menu::{ADDED, DELETED, NOT_FOUND, UPDATED};

/// Parse a finite salary for clap
fn parse_salary(value: &str) -> Result<f64, String> {
    let salary: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    if salary.is_finite() {
        Ok(salary)
    } else {
        Err(format!("'{}' is not a finite number", value))
    }
}

#[derive(Parser, Debug)]
pub struct AddArgs {
    /// Employee name
    #[arg(long)]
    pub name: String,

    /// Department the employee belongs to
    #[arg(long)]
    pub department: String,

    /// Salary (floating point)
    #[arg(long, value_parser = parse_salary, allow_negative_numbers = true)]
    pub salary: f64,
}

#[derive(Parser, Debug)]
pub struct UpdateArgs {
    /// Id of the employee to update
    #[arg(long)]
    pub id: i64,

    /// New salary
    #[arg(long, value_parser = parse_salary, allow_negative_numbers = true)]
    pub salary: f64,
}

#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// Id of the employee to delete
    #[arg(long)]
    pub id: i64,
}

pub async fn run_add<P: ConnectionProvider>(store: &EmployeeStore<P>, args: AddArgs) -> Result<()> {
    let employee = NewEmployee::new(args.name, args.department, args.salary);
    store
        .add(&employee)
        .await
        .context("failed to add employee")?;

    info!(name = %employee.name, "employee added");
    println!("{}", ADDED);
    Ok(())
}

pub async fn run_list<P: ConnectionProvider>(store: &EmployeeStore<P>) -> Result<()> {
    let employees = store.view().await.context("failed to list employees")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_table(&mut out, &employees)?;
    out.flush()?;
    Ok(())
}

pub async fn run_update<P: ConnectionProvider>(
    store: &EmployeeStore<P>,
    args: UpdateArgs,
) -> Result<()> {
    let outcome = store
        .update_salary(args.id, args.salary)
        .await
        .with_context(|| format!("failed to update employee {}", args.id))?;

    println!("{}", mutation_message(outcome, UPDATED));
    Ok(())
}

pub async fn run_delete<P: ConnectionProvider>(
    store: &EmployeeStore<P>,
    args: DeleteArgs,
) -> Result<()> {
    let outcome = store
        .delete(args.id)
        .await
        .with_context(|| format!("failed to delete employee {}", args.id))?;

    println!("{}", mutation_message(outcome, DELETED));
    Ok(())
}

fn mutation_message(outcome: Mutation, applied: &'static str) -> &'static str {
    match outcome {
        Mutation::Applied { .. } => applied,
        Mutation::NotFound => NOT_FOUND,
    }
}
