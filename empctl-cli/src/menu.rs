//! Interactive menu loop
//!
//! One state: waiting for a menu choice. Each choice runs one store
//! operation, prints its outcome, and comes back here. Only "5" or the end
//! of input leaves the loop. Database failures are logged and printed but
//! never end the session.

use std::io::{self, BufRead, Write};

use empctl_core::render::write_table;
use empctl_core::{ConnectionProvider, EmpError, EmployeeStore, Mutation, NewEmployee};
use tracing::{debug, error};

use crate::prompt::Console;

pub const MENU: &str = "\n--- Employee Database ---\n\
                        1. Add Employee\n\
                        2. View Employees\n\
                        3. Update Employee\n\
                        4. Delete Employee\n\
                        5. Exit";

pub const ADDED: &str = "Employee added successfully!";
pub const UPDATED: &str = "Employee updated!";
pub const DELETED: &str = "Employee deleted!";
pub const NOT_FOUND: &str = "Employee not found!";
pub const INVALID_CHOICE: &str = "Invalid choice!";
pub const FAREWELL: &str = "Thank you for using Employee App. Goodbye!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Add,
    View,
    Update,
    Delete,
    Exit,
    Invalid,
}

impl Choice {
    /// Anything that is not 1-5 (including non-numbers) is `Invalid`.
    pub fn parse(input: &str) -> Self {
        match input.trim().parse::<i32>() {
            Ok(1) => Choice::Add,
            Ok(2) => Choice::View,
            Ok(3) => Choice::Update,
            Ok(4) => Choice::Delete,
            Ok(5) => Choice::Exit,
            _ => Choice::Invalid,
        }
    }
}

/// Whether the loop keeps going after a handler returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    /// Input ended mid-operation
    Stop,
}

pub struct Menu<P, R, W> {
    store: EmployeeStore<P>,
    console: Console<R, W>,
}

impl<P, R, W> Menu<P, R, W>
where
    P: ConnectionProvider,
    R: BufRead,
    W: Write,
{
    pub fn new(store: EmployeeStore<P>, console: Console<R, W>) -> Self {
        Self { store, console }
    }

    pub async fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.console.output(), "{}", MENU)?;
            let Some(answer) = self.console.read_line("Enter choice: ")? else {
                debug!("input closed at menu prompt");
                return Ok(());
            };

            let choice = Choice::parse(&answer);
            debug!(?choice, "menu choice");

            let flow = match choice {
                Choice::Add => self.add().await?,
                Choice::View => self.view().await?,
                Choice::Update => self.update().await?,
                Choice::Delete => self.delete().await?,
                Choice::Exit => {
                    writeln!(self.console.output(), "{}", FAREWELL)?;
                    return Ok(());
                }
                Choice::Invalid => {
                    writeln!(self.console.output(), "{}", INVALID_CHOICE)?;
                    Flow::Continue
                }
            };

            if flow == Flow::Stop {
                debug!("input closed during operation");
                return Ok(());
            }
        }
    }

    async fn add(&mut self) -> io::Result<Flow> {
        let Some(name) = self.console.read_text("Enter name: ")? else {
            return Ok(Flow::Stop);
        };
        let Some(department) = self.console.read_text("Enter department: ")? else {
            return Ok(Flow::Stop);
        };
        let Some(salary) = self.console.read_salary("Enter salary: ")? else {
            return Ok(Flow::Stop);
        };

        let employee = NewEmployee::new(name, department, salary);
        match self.store.add(&employee).await {
            Ok(()) => writeln!(self.console.output(), "{}", ADDED)?,
            Err(err) => self.report("add employee", &err)?,
        }
        Ok(Flow::Continue)
    }

    async fn view(&mut self) -> io::Result<Flow> {
        match self.store.view().await {
            Ok(employees) => write_table(self.console.output(), &employees)?,
            Err(err) => self.report("view employees", &err)?,
        }
        Ok(Flow::Continue)
    }

    async fn update(&mut self) -> io::Result<Flow> {
        let Some(id) = self.console.read_id("Enter Employee ID to update: ")? else {
            return Ok(Flow::Stop);
        };
        let Some(salary) = self.console.read_salary("Enter new salary: ")? else {
            return Ok(Flow::Stop);
        };

        match self.store.update_salary(id, salary).await {
            Ok(outcome) => self.write_mutation(outcome, UPDATED)?,
            Err(err) => self.report("update employee", &err)?,
        }
        Ok(Flow::Continue)
    }

    async fn delete(&mut self) -> io::Result<Flow> {
        let Some(id) = self.console.read_id("Enter Employee ID to delete: ")? else {
            return Ok(Flow::Stop);
        };

        match self.store.delete(id).await {
            Ok(outcome) => self.write_mutation(outcome, DELETED)?,
            Err(err) => self.report("delete employee", &err)?,
        }
        Ok(Flow::Continue)
    }

    fn write_mutation(&mut self, outcome: Mutation, applied: &str) -> io::Result<()> {
        let message = match outcome {
            Mutation::Applied { .. } => applied,
            Mutation::NotFound => NOT_FOUND,
        };
        writeln!(self.console.output(), "{}", message)
    }

    fn report(&mut self, operation: &str, err: &EmpError) -> io::Result<()> {
        error!(operation, error = %err, "database operation failed");
        writeln!(self.console.output(), "Error: {}", err)
    }

    #[cfg(test)]
    pub fn into_console(self) -> Console<R, W> {
        self.console
    }
}
