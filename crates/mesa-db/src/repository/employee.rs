//! # Employee Repository
//!
//! Staff records and credential checks.

use mesa_core::{hash_password, Employee, NewEmployee};
use sqlx::SqliteConnection;
use tracing::debug;

use crate::error::{DbError, DbResult};

const SELECT_EMPLOYEE: &str = "SELECT id, name, employee_number, hashed_password FROM employees";

/// Repository for employee database operations.
#[derive(Debug)]
pub struct EmployeeRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> EmployeeRepository<'c> {
    /// Creates a new EmployeeRepository on the given unit of work.
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        EmployeeRepository { conn }
    }

    /// Inserts an employee.
    ///
    /// ## Errors
    /// - `UniqueViolation` when the employee number is taken
    pub async fn insert(&mut self, employee: &NewEmployee) -> DbResult<Employee> {
        employee.validate()?;

        debug!(
            employee_number = employee.employee_number,
            "Inserting employee"
        );

        let id = sqlx::query(
            "INSERT INTO employees (name, employee_number, hashed_password) VALUES (?1, ?2, ?3)",
        )
        .bind(&employee.name)
        .bind(employee.employee_number)
        .bind(&employee.hashed_password)
        .execute(&mut *self.conn)
        .await?
        .last_insert_rowid();

        Ok(Employee {
            id,
            name: employee.name.clone(),
            employee_number: employee.employee_number,
            hashed_password: employee.hashed_password.clone(),
        })
    }

    /// Gets an employee by ID.
    pub async fn get_by_id(&mut self, id: i64) -> DbResult<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(&format!("{SELECT_EMPLOYEE} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?;

        Ok(employee)
    }

    /// Gets an employee by their business number.
    pub async fn get_by_number(&mut self, employee_number: i64) -> DbResult<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(&format!(
            "{SELECT_EMPLOYEE} WHERE employee_number = ?1"
        ))
        .bind(employee_number)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(employee)
    }

    /// Lists all employees by employee number.
    pub async fn list(&mut self) -> DbResult<Vec<Employee>> {
        let employees =
            sqlx::query_as::<_, Employee>(&format!("{SELECT_EMPLOYEE} ORDER BY employee_number"))
                .fetch_all(&mut *self.conn)
                .await?;

        Ok(employees)
    }

    /// Re-hashes and stores a new password.
    pub async fn update_credential(&mut self, id: i64, plaintext: &str) -> DbResult<()> {
        debug!(id, "Updating employee credential");

        let hashed = hash_password(plaintext)?;
        let result = sqlx::query("UPDATE employees SET hashed_password = ?1 WHERE id = ?2")
            .bind(hashed)
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Employee", id));
        }

        Ok(())
    }

    /// Returns the employee when `password` matches their credential.
    ///
    /// Unknown numbers and wrong passwords both yield `None`.
    pub async fn authenticate(
        &mut self,
        employee_number: i64,
        password: &str,
    ) -> DbResult<Option<Employee>> {
        let employee = self.get_by_number(employee_number).await?;

        Ok(employee.filter(|e| e.check_credential(password)))
    }

    /// Deletes an employee.
    ///
    /// ## Errors
    /// - `ForeignKeyViolation` while the employee still serves orders
    pub async fn delete(&mut self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM employees WHERE id = ?1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Employee", id));
        }

        Ok(())
    }

    /// Returns the total employee count.
    pub async fn count(&mut self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees")
            .fetch_one(&mut *self.conn)
            .await?;

        Ok(count)
    }
}
