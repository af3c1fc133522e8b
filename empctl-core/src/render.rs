//! Console rendering for employee rows.
//!
//! The table is tab-separated with a fixed header; rows are written in the
//! order the database returned them.

use std::io::{self, Write};

use crate::employee::Employee;

pub const TABLE_HEADER: &str = "ID\tName\tDepartment\tSalary";

/// Format a salary with Rust's `Debug` rule for f64: integral values keep a
/// trailing `.0` (`1000.0`, `10000000.0`), everything else uses the
/// shortest round-trip form (`1200.5`).
pub fn format_salary(salary: f64) -> String {
    // Debug for f64 keeps the ".0" that Display drops
    format!("{:?}", salary)
}

pub fn format_row(employee: &Employee) -> String {
    format!(
        "{}\t{}\t{}\t{}",
        employee.id,
        employee.name,
        employee.department,
        format_salary(employee.salary)
    )
}

/// Write the blank separator line, header, and one line per employee.
pub fn write_table<W: Write>(out: &mut W, employees: &[Employee]) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", TABLE_HEADER)?;
    for employee in employees {
        writeln!(out, "{}", format_row(employee))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Employee {
        Employee {
            id: 1,
            name: "Alice".to_string(),
            department: "Eng".to_string(),
            salary: 1000.0,
        }
    }

    #[test]
    fn salary_keeps_fraction_digit() {
        assert_eq!(format_salary(1000.0), "1000.0");
        assert_eq!(format_salary(1200.5), "1200.5");
        assert_eq!(format_salary(0.0), "0.0");
        assert_eq!(format_salary(1e7), "10000000.0");
    }

    #[test]
    fn row_is_tab_separated() {
        assert_eq!(format_row(&alice()), "1\tAlice\tEng\t1000.0");
    }

    #[test]
    fn empty_table_is_header_only() {
        let mut out = Vec::new();
        write_table(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\nID\tName\tDepartment\tSalary\n");
    }

    #[test]
    fn table_lists_rows_in_given_order() {
        let mut bob = alice();
        bob.id = 2;
        bob.name = "Bob".to_string();
        bob.salary = 950.25;

        let mut out = Vec::new();
        write_table(&mut out, &[bob, alice()]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[1], TABLE_HEADER);
        assert_eq!(lines[2], "2\tBob\tEng\t950.25");
        assert_eq!(lines[3], "1\tAlice\tEng\t1000.0");
    }
}
