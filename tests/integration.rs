//! Integration tests for the payroll engine.
//!
//! This test suite covers:
//! - Daily attendance metrics (schedule, lateness, overtime, lunch break)
//! - Statutory contributions and withholding tax
//! - Empty pay periods
//! - Clock-in/clock-out flows feeding payroll
//! - Payslip rendering
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::calculation::withholding_tax;
use payroll_engine::config::{ConfigLoader, TaxTable};
use payroll_engine::engine::PayrollEngine;
use payroll_engine::models::{AttendanceRecord, EmployeeProfile};
use payroll_engine::store::{AttendanceStore, EmployeeStore};

// =============================================================================
// Test Helpers
// =============================================================================

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn make_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

fn make_time(time_str: &str) -> NaiveTime {
    NaiveTime::parse_from_str(time_str, "%H:%M").unwrap()
}

fn create_employee(id: u32, basic_salary: &str) -> EmployeeProfile {
    serde_json::from_value(json!({
        "id": id,
        "last_name": "Reyes",
        "first_name": "Ana",
        "position": "Payroll Rank and File",
        "basic_salary": basic_salary
    }))
    .unwrap()
}

fn record(id: u32, date: &str, time_in: Option<&str>, time_out: Option<&str>) -> AttendanceRecord {
    AttendanceRecord::new(
        id,
        make_date(date),
        time_in.map(make_time),
        time_out.map(make_time),
    )
}

fn create_test_state(employees: Vec<EmployeeProfile>, records: Vec<AttendanceRecord>) -> AppState {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    AppState::new(
        config,
        EmployeeStore::from_employees(employees).unwrap(),
        AttendanceStore::from_records(records).unwrap(),
    )
}

async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn post_payroll(router: Router, employee_id: u32, start: &str, end: &str) -> (StatusCode, Value) {
    post_json(
        router,
        "/payroll",
        json!({ "employee_id": employee_id, "start_date": start, "end_date": end }),
    )
    .await
}

fn field(value: &Value, path: &[&str]) -> Decimal {
    let mut current = value;
    for key in path {
        current = &current[*key];
    }
    decimal(
        current
            .as_str()
            .unwrap_or_else(|| panic!("{:?} is not a decimal string: {}", path, current)),
    )
}

fn rule_ids(result: &Value) -> Vec<String> {
    result["audit_trace"]
        .as_array()
        .unwrap()
        .iter()
        .map(|step| step["rule_id"].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// SECTION 1: Attendance Metrics
// =============================================================================

#[tokio::test]
async fn test_on_schedule_day() {
    // 08:00-17:00 is 9h raw, 8h after lunch
    let router = create_router(create_test_state(
        vec![create_employee(1, "22000")],
        vec![record(1, "2026-03-02", Some("08:00"), Some("17:00"))],
    ));

    let (status, result) = post_payroll(router, 1, "2026-03-01", "2026-03-15").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["attendance"]["days_present"], 1);
    assert_eq!(field(&result, &["attendance", "total_hours"]), decimal("8"));
    assert_eq!(field(&result, &["attendance", "overtime_hours"]), Decimal::ZERO);
    assert_eq!(field(&result, &["attendance", "late_minutes"]), Decimal::ZERO);
    assert_eq!(result["entries"][0]["metrics"]["status"], "present");

    // 22000 / 22 days
    assert_eq!(field(&result, &["earnings", "regular_pay"]), decimal("1000"));
}

#[tokio::test]
async fn test_late_day_with_overtime() {
    let router = create_router(create_test_state(
        vec![create_employee(1, "22000")],
        vec![record(1, "2026-03-02", Some("09:30"), Some("18:30"))],
    ));

    let (status, result) = post_payroll(router, 1, "2026-03-01", "2026-03-15").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(field(&result, &["attendance", "late_minutes"]), decimal("90"));
    assert_eq!(field(&result, &["attendance", "overtime_hours"]), decimal("1"));
    assert_eq!(field(&result, &["attendance", "total_hours"]), decimal("8"));
    assert_eq!(result["entries"][0]["metrics"]["status"], "late");

    // 1h × (22000 / 22 / 8) × 1.25
    assert_eq!(field(&result, &["earnings", "overtime_pay"]), decimal("156.25"));
}

#[tokio::test]
async fn test_short_day_keeps_lunch() {
    // 08:00-12:00 is under the lunch threshold
    let router = create_router(create_test_state(
        vec![create_employee(1, "22000")],
        vec![record(1, "2026-03-02", Some("08:00"), Some("12:00"))],
    ));

    let (_, result) = post_payroll(router, 1, "2026-03-01", "2026-03-15").await;

    assert_eq!(field(&result, &["attendance", "total_hours"]), decimal("4"));
}

#[tokio::test]
async fn test_missing_clock_out_counts_as_absent_day() {
    let router = create_router(create_test_state(
        vec![create_employee(1, "22000")],
        vec![
            record(1, "2026-03-02", Some("08:00"), Some("17:00")),
            record(1, "2026-03-03", Some("08:00"), None),
        ],
    ));

    let (_, result) = post_payroll(router, 1, "2026-03-01", "2026-03-15").await;

    assert_eq!(result["entries"][1]["metrics"]["status"], "absent");
    assert_eq!(field(&result["entries"][1], &["metrics", "total_hours"]), Decimal::ZERO);
    // Every record in the period is counted.
    assert_eq!(result["attendance"]["days_present"], 2);
    assert_eq!(field(&result, &["attendance", "total_hours"]), decimal("8"));
}

// =============================================================================
// SECTION 2: Deductions and Tax
// =============================================================================

#[tokio::test]
async fn test_sss_capped() {
    let router = create_router(create_test_state(
        vec![create_employee(1, "30000")],
        vec![record(1, "2026-03-02", Some("08:00"), Some("17:00"))],
    ));

    let (_, result) = post_payroll(router, 1, "2026-03-01", "2026-03-15").await;

    // min(30000 × 0.045, 1125)
    assert_eq!(field(&result, &["deductions", "sss"]), decimal("1125"));
    assert_eq!(field(&result, &["deductions", "philhealth"]), decimal("1200"));
    assert_eq!(field(&result, &["deductions", "pagibig"]), decimal("100"));
}

#[test]
fn test_withholding_tax_third_bracket() {
    // 20000 × 24 = 480000: 30000 + (480000 - 400000) × 0.25 = 50000 annual
    let tax = withholding_tax(decimal("20000"), &TaxTable::default(), 24);

    assert_eq!(tax, decimal("50000") / decimal("24"));
    assert_eq!(tax.round_dp(2), decimal("2083.33"));
}

#[tokio::test]
async fn test_net_pay_is_gross_less_deductions() {
    let router = create_router(create_test_state(
        vec![create_employee(1, "90000")],
        (2..=13)
            .filter(|day| *day != 7 && *day != 8)
            .map(|day| record(1, &format!("2026-03-{:02}", day), Some("08:00"), Some("18:00")))
            .collect(),
    ));

    let (_, result) = post_payroll(router, 1, "2026-03-01", "2026-03-15").await;

    let gross = field(&result, &["earnings", "gross_pay"]);
    let total_deductions = field(&result, &["deductions", "total_deductions"]);
    let statutory = field(&result, &["deductions", "sss"])
        + field(&result, &["deductions", "philhealth"])
        + field(&result, &["deductions", "pagibig"]);
    let tax = field(&result, &["deductions", "withholding_tax"]);

    assert_eq!(result["attendance"]["days_present"], 10);
    assert!(tax > Decimal::ZERO);
    assert_eq!(total_deductions, statutory + tax);
    assert_eq!(field(&result, &["net_pay"]), gross - total_deductions);
}

// =============================================================================
// SECTION 3: Empty Periods and Filtering
// =============================================================================

#[tokio::test]
async fn test_empty_period_is_all_zero() {
    let router = create_router(create_test_state(
        vec![create_employee(1, "22000")],
        vec![record(1, "2026-04-02", Some("08:00"), Some("17:00"))],
    ));

    let (status, result) = post_payroll(router, 1, "2026-03-01", "2026-03-15").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["attendance"]["days_present"], 0);
    for path in [
        &["earnings", "gross_pay"][..],
        &["earnings", "regular_pay"],
        &["earnings", "rice_subsidy"],
        &["deductions", "sss"],
        &["deductions", "withholding_tax"],
        &["deductions", "total_deductions"],
        &["net_pay"],
    ] {
        assert_eq!(field(&result, path), Decimal::ZERO, "{:?}", path);
    }
    assert_eq!(rule_ids(&result), vec!["attendance_totals", "empty_period"]);
}

#[tokio::test]
async fn test_other_employees_records_are_ignored() {
    let router = create_router(create_test_state(
        vec![create_employee(1, "22000"), create_employee(2, "22000")],
        vec![
            record(1, "2026-03-02", Some("08:00"), Some("17:00")),
            record(2, "2026-03-02", Some("08:00"), Some("17:00")),
            record(2, "2026-03-03", Some("08:00"), Some("17:00")),
        ],
    ));

    let (_, result) = post_payroll(router, 1, "2026-03-01", "2026-03-15").await;

    assert_eq!(result["attendance"]["days_present"], 1);
}

#[tokio::test]
async fn test_audit_trace_order() {
    let router = create_router(create_test_state(
        vec![create_employee(1, "22000")],
        vec![record(1, "2026-03-02", Some("08:00"), Some("17:00"))],
    ));

    let (_, result) = post_payroll(router, 1, "2026-03-01", "2026-03-15").await;

    assert_eq!(
        rule_ids(&result),
        vec![
            "attendance_totals",
            "regular_pay",
            "overtime_pay",
            "allowance_proration",
            "gross_pay",
            "statutory_sss",
            "statutory_philhealth",
            "statutory_pagibig",
            "withholding_tax",
            "net_pay",
        ]
    );
    let numbers: Vec<u64> = result["audit_trace"]
        .as_array()
        .unwrap()
        .iter()
        .map(|step| step["step_number"].as_u64().unwrap())
        .collect();
    assert_eq!(numbers, (1..=10).collect::<Vec<u64>>());
}

#[tokio::test]
async fn test_repeated_requests_are_identical() {
    let state = create_test_state(
        vec![create_employee(1, "22000")],
        vec![
            record(1, "2026-03-02", Some("08:00"), Some("17:00")),
            record(1, "2026-03-03", Some("08:45"), Some("19:10")),
        ],
    );

    let (_, first) = post_payroll(create_router(state.clone()), 1, "2026-03-01", "2026-03-15").await;
    let (_, second) = post_payroll(create_router(state), 1, "2026-03-01", "2026-03-15").await;

    assert_eq!(first, second);
}

// =============================================================================
// SECTION 4: Clock Events
// =============================================================================

#[tokio::test]
async fn test_clock_events_feed_payroll() {
    let state = create_test_state(vec![create_employee(1, "22000")], vec![]);

    let (status, _) = post_json(
        create_router(state.clone()),
        "/attendance/clock-in",
        json!({ "employee_id": 1, "date": "03/02/2026", "time": "9:30 AM" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // A second clock-in on the same day keeps the first one.
    let (_, entry) = post_json(
        create_router(state.clone()),
        "/attendance/clock-in",
        json!({ "employee_id": 1, "date": "2026-03-02", "time": "10:00" }),
    )
    .await;
    assert_eq!(entry["record"]["time_in"], "09:30:00");

    let (status, entry) = post_json(
        create_router(state.clone()),
        "/attendance/clock-out",
        json!({ "employee_id": 1, "date": "2026-03-02", "time": "18:30:00" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(entry["metrics"]["status"], "late");

    let (_, result) = post_payroll(create_router(state), 1, "2026-03-01", "2026-03-15").await;
    assert_eq!(result["attendance"]["days_present"], 1);
    assert_eq!(field(&result, &["attendance", "late_minutes"]), decimal("90"));
}

#[tokio::test]
async fn test_clock_out_before_clock_in_is_rejected() {
    let state = create_test_state(vec![create_employee(1, "22000")], vec![]);

    post_json(
        create_router(state.clone()),
        "/attendance/clock-in",
        json!({ "employee_id": 1, "date": "2026-03-02", "time": "08:00" }),
    )
    .await;
    let (status, error) = post_json(
        create_router(state),
        "/attendance/clock-out",
        json!({ "employee_id": 1, "date": "2026-03-02", "time": "07:00" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

// =============================================================================
// SECTION 5: Payslip and Sample Data
// =============================================================================

#[tokio::test]
async fn test_payslip_endpoint() {
    let router = create_router(create_test_state(
        vec![create_employee(1, "22000")],
        vec![record(1, "2026-03-02", Some("08:00"), Some("17:00"))],
    ));

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/payslip")
                .header("Content-Type", "application/json")
                .body(Body::from(
                    json!({ "employee_id": 1, "start_date": "2026-03-01", "end_date": "2026-03-15" })
                        .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();

    assert!(text.contains("Reyes, Ana"));
    assert!(text.contains("Regular Pay:        PHP 1,000.00"));
    assert!(text.contains("03/02/2026"));
}

#[test]
fn test_sample_data_loads_and_calculates() {
    let config = ConfigLoader::load("./config/default").unwrap();
    let employees = EmployeeStore::load_json("./data/employees.json").unwrap();
    let attendance = AttendanceStore::load_json("./data/attendance.json").unwrap();
    let engine = PayrollEngine::new(&employees, &attendance, config.config().clone()).unwrap();

    let summary = engine
        .calculate_payroll(10001, make_date("2026-01-01"), make_date("2026-01-15"))
        .unwrap();

    assert_eq!(summary.attendance.days_present, 3);
    assert_eq!(summary.attendance.late_minutes, decimal("90"));
    assert_eq!(summary.deductions.sss, decimal("1125"));
}

// =============================================================================
// SECTION 6: Error Cases
// =============================================================================

#[tokio::test]
async fn test_unknown_employee() {
    let router = create_router(create_test_state(vec![create_employee(1, "22000")], vec![]));

    let (status, error) = post_payroll(router, 404, "2026-03-01", "2026-03-15").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "EMPLOYEE_NOT_FOUND");
}

#[tokio::test]
async fn test_start_after_end() {
    let router = create_router(create_test_state(vec![create_employee(1, "22000")], vec![]));

    let (status, error) = post_payroll(router, 1, "2026-03-15", "2026-03-01").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_unparseable_dates_fall_back_to_current_month() {
    let router = create_router(create_test_state(vec![create_employee(1, "22000")], vec![]));

    let (status, result) = post_json(
        router,
        "/payroll",
        json!({ "employee_id": 1, "start_date": "yesterday", "end_date": "2026-03-15" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let start = make_date(result["pay_period"]["start_date"].as_str().unwrap());
    let end = make_date(result["pay_period"]["end_date"].as_str().unwrap());
    assert_eq!(chrono::Datelike::day(&start), 1);
    assert!(end > start);
}

#[tokio::test]
async fn test_wrong_field_type() {
    let router = create_router(create_test_state(vec![create_employee(1, "22000")], vec![]));

    let (status, error) = post_json(router, "/payroll", json!({ "employee_id": "one" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "MALFORMED_JSON");
}
