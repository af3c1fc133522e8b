//! Employee store - one SQL statement per operation
//!
//! Each method acquires its own connection from the provider, runs exactly
//! one parameterized statement, and releases the connection before it
//! returns, whether the statement succeeded or not.

use tracing::debug;

use crate::db::{release, ConnectionProvider};
use crate::employee::{Employee, Mutation, NewEmployee};
use crate::error::{EmpError, Result};

pub const INSERT_EMPLOYEE: &str =
    "INSERT INTO employees (name, department, salary) VALUES (?, ?, ?)";
/// Salary is cast per column so NUMERIC/DECIMAL columns (which the Any
/// driver cannot decode) and integer-stored values come back as doubles.
pub const SELECT_EMPLOYEES: &str =
    "SELECT id, name, department, CAST(salary AS DOUBLE) AS salary FROM employees";
pub const UPDATE_SALARY: &str = "UPDATE employees SET salary = ? WHERE id = ?";
pub const DELETE_EMPLOYEE: &str = "DELETE FROM employees WHERE id = ?";

pub struct EmployeeStore<P> {
    provider: P,
}

impl<P: ConnectionProvider> EmployeeStore<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Insert one employee; the database assigns the id.
    pub async fn add(&self, employee: &NewEmployee) -> Result<()> {
        let mut conn = self.provider.acquire().await?;
        let result = sqlx::query(INSERT_EMPLOYEE)
            .bind(employee.name.as_str())
            .bind(employee.department.as_str())
            .bind(employee.salary)
            .execute(&mut conn)
            .await;
        release(conn).await;

        let done = result.map_err(|e| EmpError::query("add employee", e))?;
        debug!(
            name = %employee.name,
            department = %employee.department,
            rows = done.rows_affected(),
            "employee added"
        );
        Ok(())
    }

    /// All rows, in whatever order the database returns them.
    pub async fn view(&self) -> Result<Vec<Employee>> {
        let mut conn = self.provider.acquire().await?;
        let result = sqlx::query(SELECT_EMPLOYEES).fetch_all(&mut conn).await;
        release(conn).await;

        let rows = result.map_err(|e| EmpError::query("view employees", e))?;
        let employees = rows
            .iter()
            .map(Employee::from_row)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| EmpError::query("view employees", e))?;

        debug!(count = employees.len(), "employees fetched");
        Ok(employees)
    }

    pub async fn update_salary(&self, id: i64, salary: f64) -> Result<Mutation> {
        let mut conn = self.provider.acquire().await?;
        let result = sqlx::query(UPDATE_SALARY)
            .bind(salary)
            .bind(id)
            .execute(&mut conn)
            .await;
        release(conn).await;

        let done = result.map_err(|e| EmpError::query("update employee", e))?;
        let outcome = Mutation::from_rows_affected(done.rows_affected());
        debug!(id, salary, ?outcome, "salary update finished");
        Ok(outcome)
    }

    pub async fn delete(&self, id: i64) -> Result<Mutation> {
        let mut conn = self.provider.acquire().await?;
        let result = sqlx::query(DELETE_EMPLOYEE)
            .bind(id)
            .execute(&mut conn)
            .await;
        release(conn).await;

        let done = result.map_err(|e| EmpError::query("delete employee", e))?;
        let outcome = Mutation::from_rows_affected(done.rows_affected());
        debug!(id, ?outcome, "delete finished");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::UrlProvider;
    use sqlx::AnyConnection;
    use sqlx::Connection;
    use tempfile::TempDir;

    const CREATE_TABLE: &str = r#"
        CREATE TABLE employees (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            department TEXT NOT NULL,
            salary REAL NOT NULL
        )
    "#;

    const CREATE_NUMERIC_TABLE: &str = r#"
        CREATE TABLE employees (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            department TEXT NOT NULL,
            salary NUMERIC NOT NULL
        )
    "#;

    /// Fresh SQLite file with the employees table; keep the TempDir alive.
    async fn sqlite_store(with_table: bool) -> (TempDir, EmployeeStore<UrlProvider>) {
        sqlite_store_with(with_table.then_some(CREATE_TABLE)).await
    }

    async fn sqlite_store_with(schema: Option<&str>) -> (TempDir, EmployeeStore<UrlProvider>) {
        let dir = tempfile::tempdir().unwrap();
        let url = format!(
            "sqlite://{}?mode=rwc",
            dir.path().join("employees.db").display()
        );
        let provider = UrlProvider::new(url.as_str()).unwrap();

        let mut conn = AnyConnection::connect(&url).await.unwrap();
        if let Some(schema) = schema {
            sqlx::query(schema).execute(&mut conn).await.unwrap();
        }
        conn.close().await.unwrap();

        (dir, EmployeeStore::new(provider))
    }

    #[tokio::test]
    async fn view_empty_table() {
        let (_dir, store) = sqlite_store(true).await;
        assert!(store.view().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn add_then_view_shows_new_row() {
        let (_dir, store) = sqlite_store(true).await;

        store
            .add(&NewEmployee::new("Alice", "Eng", 1000.0))
            .await
            .unwrap();

        let employees = store.view().await.unwrap();
        assert_eq!(
            employees,
            vec![Employee {
                id: 1,
                name: "Alice".to_string(),
                department: "Eng".to_string(),
                salary: 1000.0,
            }]
        );
    }

    #[tokio::test]
    async fn update_changes_only_matching_row() {
        let (_dir, store) = sqlite_store(true).await;
        store.add(&NewEmployee::new("Alice", "Eng", 1000.0)).await.unwrap();
        store.add(&NewEmployee::new("Bob", "Ops", 800.0)).await.unwrap();

        let outcome = store.update_salary(1, 1200.0).await.unwrap();
        assert_eq!(outcome, Mutation::Applied { rows: 1 });

        let employees = store.view().await.unwrap();
        let alice = employees.iter().find(|e| e.id == 1).unwrap();
        let bob = employees.iter().find(|e| e.id == 2).unwrap();
        assert_eq!(alice.salary, 1200.0);
        assert_eq!(bob.salary, 800.0);
    }

    #[tokio::test]
    async fn update_missing_id_is_not_found() {
        let (_dir, store) = sqlite_store(true).await;
        store.add(&NewEmployee::new("Alice", "Eng", 1000.0)).await.unwrap();

        let outcome = store.update_salary(42, 500.0).await.unwrap();
        assert_eq!(outcome, Mutation::NotFound);
        assert_eq!(store.view().await.unwrap()[0].salary, 1000.0);
    }

    #[tokio::test]
    async fn delete_removes_exactly_one_row() {
        let (_dir, store) = sqlite_store(true).await;
        store.add(&NewEmployee::new("Alice", "Eng", 1000.0)).await.unwrap();
        store.add(&NewEmployee::new("Bob", "Ops", 800.0)).await.unwrap();

        assert!(store.delete(1).await.unwrap().is_applied());

        let employees = store.view().await.unwrap();
        assert_eq!(employees.len(), 1);
        assert_eq!(employees[0].name, "Bob");

        assert_eq!(store.delete(1).await.unwrap(), Mutation::NotFound);
        assert_eq!(store.view().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn full_lifecycle() {
        let (_dir, store) = sqlite_store(true).await;

        store.add(&NewEmployee::new("Alice", "Eng", 1000.0)).await.unwrap();
        assert_eq!(store.view().await.unwrap()[0].id, 1);

        store.update_salary(1, 1200.0).await.unwrap();
        assert_eq!(store.view().await.unwrap()[0].salary, 1200.0);

        store.delete(1).await.unwrap();
        assert!(store.view().await.unwrap().is_empty());

        assert_eq!(
            store.update_salary(1, 500.0).await.unwrap(),
            Mutation::NotFound
        );
    }

    #[tokio::test]
    async fn missing_table_is_query_error() {
        let (_dir, store) = sqlite_store(false).await;

        let err = store.view().await.unwrap_err();
        assert!(matches!(
            err,
            EmpError::Query {
                operation: "view employees",
                ..
            }
        ));

        let err = store
            .add(&NewEmployee::new("Alice", "Eng", 1000.0))
            .await
            .unwrap_err();
        assert!(matches!(err, EmpError::Query { .. }));
    }

    #[tokio::test]
    async fn names_with_quotes_are_bound_not_interpolated() {
        let (_dir, store) = sqlite_store(true).await;
        let name = "O'Brien'); DROP TABLE employees; --";

        store.add(&NewEmployee::new(name, "Eng", 1.5)).await.unwrap();

        let employees = store.view().await.unwrap();
        assert_eq!(employees[0].name, name);
        assert_eq!(employees[0].salary, 1.5);
    }

    #[tokio::test]
    async fn numeric_salary_column_reads_as_double() {
        let (dir, store) = sqlite_store_with(Some(CREATE_NUMERIC_TABLE)).await;

        // NUMERIC affinity stores 1000.0 as the integer 1000
        store.add(&NewEmployee::new("Alice", "Eng", 1000.0)).await.unwrap();
        store.add(&NewEmployee::new("Bob", "Ops", 1200.5)).await.unwrap();

        let url = format!(
            "sqlite://{}",
            dir.path().join("employees.db").display()
        );
        let mut conn = AnyConnection::connect(&url).await.unwrap();
        sqlx::query("INSERT INTO employees (name, department, salary) VALUES ('Cy', 'Ops', 700)")
            .execute(&mut conn)
            .await
            .unwrap();
        conn.close().await.unwrap();

        let salaries: Vec<f64> = store
            .view()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.salary)
            .collect();
        assert_eq!(salaries, vec![1000.0, 1200.5, 700.0]);
    }
}
