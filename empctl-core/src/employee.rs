use sqlx::any::AnyRow;
use sqlx::Row;

/// One row of the `employees` table.
#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub department: String,
    pub salary: f64,
}

impl Employee {
    /// Decode a row returned by [`SELECT_EMPLOYEES`](crate::store::SELECT_EMPLOYEES).
    ///
    /// Columns are looked up by name, so column order in the table does not
    /// matter and extra columns are ignored.
    pub fn from_row(row: &AnyRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            department: row.try_get("department")?,
            salary: salary_from_row(row)?,
        })
    }
}

/// Salary as f64, accepting integer-typed values as well.
fn salary_from_row(row: &AnyRow) -> Result<f64, sqlx::Error> {
    match row.try_get::<f64, _>("salary") {
        Ok(salary) => Ok(salary),
        Err(err @ sqlx::Error::ColumnDecode { .. }) => row
            .try_get::<i64, _>("salary")
            .map(|salary| salary as f64)
            .map_err(|_| err),
        Err(err) => Err(err),
    }
}

/// Input for an insert; the database assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub name: String,
    pub department: String,
    pub salary: f64,
}

impl NewEmployee {
    pub fn new(name: impl Into<String>, department: impl Into<String>, salary: f64) -> Self {
        Self {
            name: name.into(),
            department: department.into(),
            salary,
        }
    }
}

/// Outcome of an update or delete keyed by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// At least one row matched
    Applied { rows: u64 },
    /// No row has that id
    NotFound,
}

impl Mutation {
    pub fn from_rows_affected(rows: u64) -> Self {
        if rows > 0 {
            Mutation::Applied { rows }
        } else {
            Mutation::NotFound
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Mutation::Applied { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_rows_is_not_found() {
        assert_eq!(Mutation::from_rows_affected(0), Mutation::NotFound);
        assert!(!Mutation::from_rows_affected(0).is_applied());
    }

    #[test]
    fn any_matched_row_is_applied() {
        assert_eq!(
            Mutation::from_rows_affected(1),
            Mutation::Applied { rows: 1 }
        );
        assert!(Mutation::from_rows_affected(3).is_applied());
    }
}
