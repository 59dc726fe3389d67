use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;

use crate::access::Role;

// --- Core Schemas (Mapped to Database) ---

/// Employee
///
/// A staff record from the `employees` table. The `role` column is the
/// origin of the role claim carried by session tokens.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow)]
#[ts(export)]
pub struct Employee {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub employment_id: String,
    pub hire_date: NaiveDate,
    // Stored as TEXT; rows with an unrecognized role fail to decode.
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub department: Option<String>,
    pub monthly_salary: Option<f64>,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub zip_code: Option<String>,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// --- Request Payloads ---

/// CreateEmployeeRequest
///
/// Input payload for `POST /api/employees`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct CreateEmployeeRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub employment_id: String,
    #[schema(value_type = String, example = "2024-06-01")]
    pub hire_date: NaiveDate,
    pub role: Role,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub monthly_salary: Option<f64>,
    #[serde(default)]
    pub street_address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
}

impl CreateEmployeeRequest {
    /// Returns the first problem with the payload, if any.
    pub fn validate(&self) -> Result<(), String> {
        let required = [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("email", &self.email),
            ("employment_id", &self.employment_id),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(format!("{} is required", field));
        }
        if !self.email.contains('@') {
            return Err("email must be a valid address".to_string());
        }
        if self.monthly_salary.is_some_and(|salary| salary < 0.0) {
            return Err("monthly_salary cannot be negative".to_string());
        }
        Ok(())
    }
}

/// PresignedUrlRequest
///
/// Input payload for requesting a profile photo upload URL.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, TS, Default)]
#[ts(export)]
pub struct PresignedUrlRequest {
    #[schema(example = "portrait.jpg")]
    pub filename: String,
    #[schema(example = "image/jpeg")]
    pub file_type: String,
}

/// PresignedUrlResponse
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, TS, Default)]
#[ts(export)]
pub struct PresignedUrlResponse {
    pub upload_url: String,
    pub resource_key: String,
}

// --- Output Schemas ---

/// EmployeeProfile
///
/// The extended profile shown on the dashboard's profile page.
/// `id` is empty when the session's subject has no employee record.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, PartialEq)]
#[ts(export)]
pub struct EmployeeProfile {
    pub id: Option<i32>,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub employment_id: Option<String>,
    pub department: Option<String>,
    pub picture: Option<String>,
}

impl From<Employee> for EmployeeProfile {
    fn from(employee: Employee) -> Self {
        Self {
            id: Some(employee.id),
            name: employee.full_name(),
            email: employee.email,
            role: employee.role,
            employment_id: Some(employee.employment_id),
            department: employee.department,
            picture: None,
        }
    }
}

/// ApiResponse
///
/// Envelope used by the employee endpoints: `{success, data, message}` on
/// success and `{success: false, error}` on failure.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: None,
            error: Some(error.into()),
        }
    }
}
