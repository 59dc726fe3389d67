#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use csr_portal::{
    AppState,
    access::Role,
    auth::Claims,
    config::{AppConfig, Env},
    models::{CreateEmployeeRequest, Employee},
    repository::Repository,
    storage::MockStorageService,
};
use jsonwebtoken::{EncodingKey, Header, encode};
use std::{
    sync::{Arc, Mutex},
    time::SystemTime,
};

pub const TEST_JWT_SECRET: &str = "test-secret-value-1234567890";

// --- In-memory Repository ---

#[derive(Default)]
pub struct MemoryRepo {
    pub employees: Mutex<Vec<Employee>>,
    pub fail_writes: bool,
}

impl MemoryRepo {
    pub fn with(employees: Vec<Employee>) -> Self {
        Self {
            employees: Mutex::new(employees),
            fail_writes: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            employees: Mutex::new(vec![]),
            fail_writes: true,
        }
    }
}

#[async_trait]
impl Repository for MemoryRepo {
    async fn create_employee(&self, req: CreateEmployeeRequest) -> Result<Employee, String> {
        if self.fail_writes {
            return Err("duplicate key value violates unique constraint".to_string());
        }
        let mut employees = self.employees.lock().unwrap();
        let now = Utc::now();
        let employee = Employee {
            id: employees.len() as i32 + 1,
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            phone: req.phone,
            employment_id: req.employment_id,
            hire_date: req.hire_date,
            role: req.role,
            department: req.department,
            monthly_salary: req.monthly_salary,
            street_address: req.street_address,
            city: req.city,
            zip_code: req.zip_code,
            created_at: now,
            updated_at: now,
        };
        employees.push(employee.clone());
        Ok(employee)
    }

    async fn get_employee(&self, id: i32) -> Option<Employee> {
        self.employees
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == id)
            .cloned()
    }

    async fn list_employees(&self, role: Option<Role>) -> Vec<Employee> {
        self.employees
            .lock()
            .unwrap()
            .iter()
            .filter(|e| role.is_none_or(|r| e.role == r))
            .cloned()
            .collect()
    }
}

// --- Fixtures ---

pub fn employee(id: i32, first_name: &str, role: Role) -> Employee {
    let now = Utc::now();
    Employee {
        id,
        first_name: first_name.to_string(),
        last_name: "Reyes".to_string(),
        email: format!("{}@staycation.com", first_name.to_lowercase()),
        phone: None,
        employment_id: format!("EMP-{:04}", id),
        hire_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        role,
        department: Some("Guest Services".to_string()),
        monthly_salary: Some(25000.0),
        street_address: None,
        city: Some("Quezon City".to_string()),
        zip_code: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn create_request(role: Role) -> CreateEmployeeRequest {
    CreateEmployeeRequest {
        first_name: "Ana".to_string(),
        last_name: "Santos".to_string(),
        email: "ana@staycation.com".to_string(),
        phone: Some("+63 912 345 6789".to_string()),
        employment_id: "EMP-0100".to_string(),
        hire_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
        role,
        department: Some("Housekeeping".to_string()),
        monthly_salary: Some(18000.0),
        street_address: None,
        city: None,
        zip_code: None,
    }
}

/// Signs a session token. `exp_offset` is seconds from now.
pub fn token(sub: &str, role: Option<&str>, exp_offset: i64) -> String {
    let now = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64;

    let claims = Claims {
        sub: sub.to_string(),
        role: role.map(str::to_string),
        name: Some("Test Account".to_string()),
        email: Some("test@staycation.com".to_string()),
        iat: now as usize,
        exp: (now + exp_offset) as usize,
    };

    let key = EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes());
    encode(&Header::default(), &claims, &key).unwrap()
}

pub fn app_state(env: Env, repo: MemoryRepo, storage: MockStorageService) -> AppState {
    let mut config = AppConfig::default();
    config.env = env;
    config.jwt_secret = TEST_JWT_SECRET.to_string();

    AppState {
        repo: Arc::new(repo),
        storage: Arc::new(storage),
        config,
    }
}
