//! Integration tests for the Payroll Calculation Engine.
//!
//! This suite drives the HTTP router end to end with the shipped Mauritanian
//! configuration:
//! - Single calculations from priced line items
//! - Contribution ceilings and pay-run policies
//! - Expatriate tax treatment and benefits in kind
//! - Batch pay runs with overtime, installments and defaulted input data
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/mauritania").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Reads a decimal serialized as a JSON string.
fn amount(value: &Value) -> Decimal {
    decimal(value.as_str().expect("amount should be a JSON string"))
}

async fn post(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
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

fn salary_item(amount: &str) -> Value {
    json!({
        "code": "BASE_SALARY",
        "kind": "gain",
        "base_amount": amount,
        "quantity": "1",
        "calculated_amount": amount,
        "affects_social_fund_a": true,
        "affects_social_fund_b": true,
        "affects_income_tax": true
    })
}

fn calculation_request(employee: Value, line_items: Vec<Value>) -> Value {
    json!({
        "employee": employee,
        "effective_date": "2025-03-31",
        "line_items": line_items
    })
}

fn national(id: &str) -> Value {
    json!({ "employee_id": id })
}

/// Asserts net = gains − employee contributions − tax − deductions − benefits in kind.
fn assert_reconciles(result: &Value) {
    let expected = amount(&result["gross_gains"])
        - amount(&result["fund_a"]["employee"])
        - amount(&result["fund_b"]["employee"])
        - amount(&result["income_tax"]["total"])
        - amount(&result["gross_deductions"])
        - amount(&result["net_deductions"])
        - amount(&result["benefits_in_kind"]);
    assert_eq!(amount(&result["net_salary"]), expected);
}

// =============================================================================
// Single Calculations
// =============================================================================

#[tokio::test]
async fn test_national_salary_45000() {
    let (status, result) = post(
        create_router_for_test(),
        "/calculate",
        calculation_request(national("emp_001"), vec![salary_item("45000.00")]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["employee_id"], "emp_001");
    assert_eq!(result["pay_run_code"], "REGULAR");
    assert_eq!(amount(&result["fund_a"]["employee"]), decimal("150.00"));
    assert_eq!(amount(&result["fund_a"]["employer"]), decimal("1950.00"));
    assert_eq!(amount(&result["fund_b"]["employee"]), decimal("1800.00"));
    assert_eq!(amount(&result["fund_b"]["employer"]), decimal("2250.00"));
    assert_eq!(amount(&result["income_tax"]["adjusted_base"]), decimal("37050.00"));
    assert_eq!(amount(&result["income_tax"]["tranche1"]), decimal("1350.00"));
    assert_eq!(amount(&result["income_tax"]["tranche2"]), decimal("3000.00"));
    assert_eq!(amount(&result["income_tax"]["tranche3"]), decimal("6420.00"));
    assert_eq!(amount(&result["income_tax"]["total"]), decimal("10770.00"));
    assert_eq!(amount(&result["net_salary"]), decimal("32280.00"));
    assert_reconciles(&result);
}

#[tokio::test]
async fn test_expatriate_pays_half_first_tranche() {
    let employee = json!({ "employee_id": "emp_exp", "is_expatriate": true });
    let (status, result) = post(
        create_router_for_test(),
        "/calculate",
        calculation_request(employee, vec![salary_item("45000.00")]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(amount(&result["income_tax"]["tranche1"]), decimal("675.00"));
    assert_eq!(amount(&result["income_tax"]["tranche2"]), decimal("3000.00"));
    assert_eq!(amount(&result["income_tax"]["total"]), decimal("10095.00"));
    assert_eq!(amount(&result["net_salary"]), decimal("32955.00"));
    assert_reconciles(&result);
}

#[tokio::test]
async fn test_fund_a_ceiling_caps_high_salary() {
    let (status, result) = post(
        create_router_for_test(),
        "/calculate",
        calculation_request(national("emp_002"), vec![salary_item("200000.00")]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(amount(&result["fund_a_base"]), decimal("200000.00"));
    assert_eq!(amount(&result["fund_a"]["employee"]), decimal("150.00"));
    assert_eq!(amount(&result["fund_a"]["employer"]), decimal("1950.00"));
    // Fund B has no ceiling
    assert_eq!(amount(&result["fund_b"]["employee"]), decimal("8000.00"));
    assert_eq!(amount(&result["income_tax"]["total"]), decimal("70290.00"));
    assert_eq!(amount(&result["net_salary"]), decimal("121560.00"));
    assert_reconciles(&result);
}

#[tokio::test]
async fn test_bonus_policy_without_fund_a() {
    let mut request = calculation_request(national("emp_001"), vec![salary_item("45000.00")]);
    request["policy"] = json!({
        "code": "BONUS",
        "subject_to_fund_a": false,
        "subject_to_fund_b": true,
        "subject_to_income_tax": true
    });

    let (status, result) = post(create_router_for_test(), "/calculate", request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["pay_run_code"], "BONUS");
    assert_eq!(amount(&result["fund_a"]["employee"]), Decimal::ZERO);
    assert_eq!(amount(&result["fund_a"]["employer"]), Decimal::ZERO);
    assert_eq!(amount(&result["income_tax"]["total"]), decimal("10830.00"));
    assert_reconciles(&result);

    let rule_ids: Vec<&str> = result["audit_trace"]["steps"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["rule_id"].as_str().unwrap())
        .collect();
    assert!(!rule_ids.contains(&"fund_a_contribution"));
    assert!(rule_ids.contains(&"fund_b_contribution"));
}

#[tokio::test]
async fn test_deductions_and_benefits_in_kind() {
    let items = vec![
        salary_item("30000.00"),
        json!({
            "code": "HOUSING",
            "kind": "gain",
            "base_amount": "5000.00",
            "quantity": "1",
            "calculated_amount": "5000.00",
            "affects_income_tax": true,
            "is_benefit_in_kind": true
        }),
        json!({
            "code": "ABSENCE",
            "kind": { "deduction": "gross" },
            "base_amount": "1000.00",
            "quantity": "1",
            "calculated_amount": "1000.00"
        }),
        json!({
            "code": "CANTEEN",
            "kind": { "deduction": "net" },
            "base_amount": "20.00",
            "quantity": "20",
            "calculated_amount": "400.00"
        }),
    ];

    let (status, result) = post(
        create_router_for_test(),
        "/calculate",
        calculation_request(national("emp_003"), items),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(amount(&result["gross_gains"]), decimal("35000.00"));
    assert_eq!(amount(&result["fund_a_base"]), decimal("29000.00"));
    assert_eq!(amount(&result["fund_b_base"]), decimal("29000.00"));
    assert_eq!(amount(&result["gross_taxable"]), decimal("34000.00"));
    assert_eq!(amount(&result["gross_non_taxable"]), decimal("1000.00"));
    assert_eq!(amount(&result["benefits_in_kind"]), decimal("5000.00"));
    // 34000 - 150 - 1160 - 6000 = 26690 -> 1350 + 3000 + 2276
    assert_eq!(amount(&result["income_tax"]["total"]), decimal("6626.00"));
    // 35000 - 150 - 1160 - 6626 - 1000 - 400 - 5000
    assert_eq!(amount(&result["net_salary"]), decimal("20664.00"));
    assert_reconciles(&result);
}

#[tokio::test]
async fn test_income_tax_reports_every_bracket() {
    let (_, result) = post(
        create_router_for_test(),
        "/calculate",
        calculation_request(national("emp_001"), vec![salary_item("45000.00")]),
    )
    .await;

    let brackets = result["income_tax"]["brackets"].as_array().unwrap();
    assert_eq!(brackets.len(), 3);
    assert!(brackets[2]["upper_bound"].is_null());
    let sum: Decimal = brackets.iter().map(|b| amount(&b["amount"])).sum();
    assert_eq!(sum, amount(&result["income_tax"]["total"]));
}

#[tokio::test]
async fn test_identical_requests_give_identical_responses() {
    let request = calculation_request(national("emp_001"), vec![salary_item("52345.67")]);

    let (_, first) = post(create_router_for_test(), "/calculate", request.clone()).await;
    let (_, second) = post(create_router_for_test(), "/calculate", request).await;

    assert_eq!(first, second);
}

// =============================================================================
// Pay Runs
// =============================================================================

fn pay_run_employee(id: &str, attendance: Value, installments: Vec<Value>) -> Value {
    json!({
        "employee": {
            "profile": { "employee_id": id },
            "salary_grade": { "code": "C5", "monthly_base": "86666.67" },
            "weekly_contract_hours": "40"
        },
        "attendance": attendance,
        "installments": installments
    })
}

fn pay_run_request(employees: Vec<Value>) -> Value {
    json!({
        "period": { "start_date": "2025-03-01", "end_date": "2025-03-31" },
        "employees": employees
    })
}

#[tokio::test]
async fn test_pay_run_with_overtime_and_installments() {
    let employee = pay_run_employee(
        "emp_010",
        json!({ "worked_days": "30", "overtime_hours": "14" }),
        vec![
            json!({ "id": "loan", "amount": "30000.00" }),
            json!({ "id": "advance", "amount": "10000.00" }),
        ],
    );

    let (status, outcome) = post(
        create_router_for_test(),
        "/pay-run",
        pay_run_request(vec![employee]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["pay_run_code"], "REGULAR");

    let payslip = &outcome["payslips"][0];
    let result = &payslip["result"];
    // 86666.67 + 8 h × 500 × 1.15 + 6 h × 500 × 1.40
    assert_eq!(amount(&result["gross_gains"]), decimal("95466.67"));
    assert_eq!(amount(&result["fund_b"]["employee"]), decimal("3818.67"));
    assert_eq!(amount(&result["income_tax"]["total"]), decimal("30149.20"));

    // 40% of 61348.80 = 24539.52 shared in proportion to 30000 / 10000
    let installments = &payslip["installments"];
    assert_eq!(amount(&installments["quota_cessible"]), decimal("24539.52"));
    assert_eq!(
        amount(&installments["installments"][0]["amount"]),
        decimal("18404.64")
    );
    assert_eq!(
        amount(&installments["installments"][1]["amount"]),
        decimal("6134.88")
    );
    assert_eq!(amount(&result["net_deductions"]), decimal("24539.52"));
    assert_eq!(amount(&result["net_salary"]), decimal("36809.28"));
    assert_reconciles(result);
}

#[tokio::test]
async fn test_pay_run_reports_defaulted_input() {
    let employee = pay_run_employee("emp_011", json!({}), vec![]);

    let (status, outcome) = post(
        create_router_for_test(),
        "/pay-run",
        pay_run_request(vec![employee]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let result = &outcome["payslips"][0]["result"];
    assert_eq!(amount(&result["net_salary"]), Decimal::ZERO);

    let warnings = result["audit_trace"]["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0]["code"], "MISSING_WORKED_DAYS");
}

#[tokio::test]
async fn test_pay_run_keeps_employee_order() {
    let employees = (1..=12)
        .map(|i| {
            pay_run_employee(
                &format!("emp_{:02}", i),
                json!({ "worked_days": format!("{}", i) }),
                vec![],
            )
        })
        .collect();

    let (status, outcome) = post(
        create_router_for_test(),
        "/pay-run",
        pay_run_request(employees),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let payslips = outcome["payslips"].as_array().unwrap();
    assert_eq!(payslips.len(), 12);
    for (i, payslip) in payslips.iter().enumerate() {
        assert_eq!(payslip["employee_id"], format!("emp_{:02}", i + 1));
    }
}

// =============================================================================
// Error Cases
// =============================================================================

#[tokio::test]
async fn test_date_before_configuration_returns_400() {
    let mut request = calculation_request(national("emp_001"), vec![salary_item("1000.00")]);
    request["effective_date"] = json!("2010-01-31");

    let (status, error) = post(create_router_for_test(), "/calculate", request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "RATE_CONFIGURATION_NOT_FOUND");
}

#[tokio::test]
async fn test_unknown_line_item_kind_returns_400() {
    let mut item = salary_item("1000.00");
    item["kind"] = json!("bonus");

    let (status, error) = post(
        create_router_for_test(),
        "/calculate",
        calculation_request(national("emp_001"), vec![item]),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_pay_run_missing_period_returns_400() {
    let (status, error) = post(
        create_router_for_test(),
        "/pay-run",
        json!({ "employees": [] }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_missing_content_type_returns_400() {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/calculate")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let error: Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(error["code"], "MISSING_CONTENT_TYPE");
}
