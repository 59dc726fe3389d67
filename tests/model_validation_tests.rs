mod common;

use common::{create_request, employee};
use csr_portal::{
    access::Role,
    dashboard::{NotificationKind, mock_notifications},
    models::{ApiResponse, CreateEmployeeRequest, EmployeeProfile},
};

#[test]
fn test_create_employee_request_validation() {
    assert!(create_request(Role::Csr).validate().is_ok());

    let mut missing_name = create_request(Role::Csr);
    missing_name.first_name = "   ".to_string();
    assert_eq!(missing_name.validate().unwrap_err(), "first_name is required");

    let mut missing_id = create_request(Role::Csr);
    missing_id.employment_id = String::new();
    assert_eq!(missing_id.validate().unwrap_err(), "employment_id is required");

    let mut negative_salary = create_request(Role::Csr);
    negative_salary.monthly_salary = Some(-1.0);
    assert!(negative_salary.validate().is_err());
}

#[test]
fn test_create_employee_request_optional_fields_default() {
    let json = r#"{
        "first_name": "Ana",
        "last_name": "Santos",
        "email": "ana@staycation.com",
        "employment_id": "EMP-0100",
        "hire_date": "2025-01-15",
        "role": "Partner"
    }"#;

    let request: CreateEmployeeRequest = serde_json::from_str(json).unwrap();
    assert_eq!(request.role, Role::Partner);
    assert!(request.phone.is_none());
    assert!(request.monthly_salary.is_none());
}

#[test]
fn test_create_employee_request_rejects_unknown_role() {
    let json = r#"{
        "first_name": "Ana",
        "last_name": "Santos",
        "email": "ana@staycation.com",
        "employment_id": "EMP-0100",
        "hire_date": "2025-01-15",
        "role": "Manager"
    }"#;

    assert!(serde_json::from_str::<CreateEmployeeRequest>(json).is_err());
}

#[test]
fn test_api_response_envelope_shapes() {
    let ok = serde_json::to_value(ApiResponse::ok(1, "done")).unwrap();
    assert_eq!(ok, serde_json::json!({"success": true, "data": 1, "message": "done"}));

    let failure = serde_json::to_value(ApiResponse::<i32>::failure("boom")).unwrap();
    assert_eq!(failure, serde_json::json!({"success": false, "error": "boom"}));
}

#[test]
fn test_employee_profile_from_record() {
    let profile = EmployeeProfile::from(employee(5, "Carla", Role::Csr));

    assert_eq!(profile.id, Some(5));
    assert_eq!(profile.name, "Carla Reyes");
    assert_eq!(profile.email, "carla@staycation.com");
    assert_eq!(profile.role, Role::Csr);
}

#[test]
fn test_notification_kind_serializes_as_type() {
    let json = serde_json::to_string(&mock_notifications()[1]).unwrap();

    assert!(json.contains(r#""type":"success""#));
    assert!(!json.contains("kind"));
    assert_eq!(mock_notifications()[2].kind, NotificationKind::Warning);
}

#[test]
fn test_role_serializes_as_claim_value() {
    assert_eq!(serde_json::to_string(&Role::Csr).unwrap(), r#""Csr""#);
    assert_eq!(Role::try_from("Cleaner".to_string()), Ok(Role::Cleaner));
    assert!(Role::try_from("cleaner".to_string()).is_err());
}
