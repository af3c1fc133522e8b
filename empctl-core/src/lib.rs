pub mod config;
pub mod db;
pub mod employee;
pub mod error;
pub mod render;
pub mod store;

pub use config::EmpConfig;
pub use db::{ConnectionProvider, UrlProvider};
pub use employee::{Employee, Mutation, NewEmployee};
pub use error::{EmpError, Result};
pub use store::EmployeeStore;
