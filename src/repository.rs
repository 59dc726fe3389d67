use crate::access::Role;
use crate::models::{CreateEmployeeRequest, Employee};
use async_trait::async_trait;
use sqlx::{PgPool, query_builder::QueryBuilder};
use std::sync::Arc;

/// Repository Trait
///
/// The persistence contract for employee records. Handlers and the session
/// extractor only see this trait, so tests can swap in stubs.
///
/// **Send + Sync + async_trait** let the trait object (`Arc<dyn Repository>`)
/// live in `AppState` and cross Axum's task boundaries.
///
/// Reads never fail outward: a database error is logged and reported as
/// "not found" or an empty list. Only writes surface their error text.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Inserts a new employee and returns the stored row.
    async fn create_employee(&self, req: CreateEmployeeRequest) -> Result<Employee, String>;
    /// Fetches one employee by primary key. Also backs the local bypass.
    async fn get_employee(&self, id: i32) -> Option<Employee>;
    /// Lists employees, newest hire first, optionally filtered by role.
    async fn list_employees(&self, role: Option<Role>) -> Vec<Employee>;
}

/// RepositoryState
///
/// The shared handle stored in `AppState`.
pub type RepositoryState = Arc<dyn Repository>;

const EMPLOYEE_COLUMNS: &str = r#"
    id, first_name, last_name, email, phone, employment_id,
    hire_date, role, department, monthly_salary,
    street_address, city, zip_code, created_at, updated_at
"#;

/// PostgresRepository
///
/// `Repository` backed by the `employees` table.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Creates a new repository instance using the initialized connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PostgresRepository {
    /// create_employee
    ///
    /// 1. Insert: binds every request field positionally; `role` is stored as its string form.
    /// 2. Return: `RETURNING` hands back the row with its generated id and timestamps.
    /// 3. Failure: the driver error is logged and its message returned, so the
    ///    handler can report a unique `email` or `employment_id` clash.
    async fn create_employee(&self, req: CreateEmployeeRequest) -> Result<Employee, String> {
        let sql = format!(
            r#"
            INSERT INTO employees (
                first_name, last_name, email, phone, employment_id,
                hire_date, role, department, monthly_salary,
                street_address, city, zip_code
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {}
            "#,
            EMPLOYEE_COLUMNS
        );

        let result = sqlx::query_as::<_, Employee>(&sql)
            .bind(&req.first_name)
            .bind(&req.last_name)
            .bind(&req.email)
            .bind(&req.phone)
            .bind(&req.employment_id)
            .bind(req.hire_date)
            .bind(req.role.as_str())
            .bind(&req.department)
            .bind(req.monthly_salary)
            .bind(&req.street_address)
            .bind(&req.city)
            .bind(&req.zip_code)
            .fetch_one(&self.pool)
            .await;

        match result {
            Ok(employee) => {
                tracing::info!(
                    employee_id = employee.id,
                    role = %employee.role,
                    "Employee created"
                );
                Ok(employee)
            }
            Err(e) => {
                tracing::error!("create_employee error: {:?}", e);
                Err(e.to_string())
            }
        }
    }

    /// get_employee
    ///
    /// Single-row lookup. A row whose `role` is outside the four known values
    /// fails to decode and is logged, leaving the caller with `None`.
    async fn get_employee(&self, id: i32) -> Option<Employee> {
        let sql = format!("SELECT {} FROM employees WHERE id = $1", EMPLOYEE_COLUMNS);

        match sqlx::query_as::<_, Employee>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
        {
            Ok(employee) => employee,
            Err(e) => {
                tracing::error!("get_employee error: {:?}", e);
                None
            }
        }
    }

    /// list_employees
    ///
    /// 1. Base Query: every column of `employees`.
    /// 2. Filter: an optional `WHERE role = $1`, pushed with `push_bind` so the
    ///    value never reaches the SQL text.
    /// 3. Ordering: newest hire first, id breaking ties for a stable order.
    async fn list_employees(&self, role: Option<Role>) -> Vec<Employee> {
        let mut builder: QueryBuilder<sqlx::Postgres> =
            QueryBuilder::new(format!("SELECT {} FROM employees", EMPLOYEE_COLUMNS));

        if let Some(role) = role {
            builder.push(" WHERE role = ");
            builder.push_bind(role.as_str());
        }

        builder.push(" ORDER BY hire_date DESC, id DESC");

        match builder.build_query_as::<Employee>().fetch_all(&self.pool).await {
            Ok(employees) => employees,
            Err(e) => {
                tracing::error!("list_employees error: {:?}", e);
                vec![]
            }
        }
    }
}
