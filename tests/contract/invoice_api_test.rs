// Contract tests for the invoice API response shapes
//
// These pin the JSON the mobile client relies on:
// - Required fields are present
// - Money fields are decimal strings
// - Enum values use their wire spelling
// - Errors share one envelope

use actix_web::{http::StatusCode, test};
use clinic_invoicing::discounts::DiscountPolicy;
use serde_json::{json, Value};

#[path = "../helpers/mod.rs"]
#[macro_use]
mod helpers;
use helpers::TestDataFactory;

const TOTALS_FIELDS: [&str; 4] = ["subtotal", "discount_amount", "tax_amount", "total_amount"];

fn assert_money_object(value: &Value, label: &str) {
    for field in TOTALS_FIELDS {
        assert!(
            value[field].is_string(),
            "{}.{} must be a decimal string, got {}",
            label,
            field,
            value[field]
        );
    }
}

#[actix_web::test]
async fn test_invoice_response_schema() {
    let app = init_app!(DiscountPolicy::Clamp).await;

    let req = test::TestRequest::post()
        .uri("/invoices")
        .set_json(TestDataFactory::create_invoice_payload(
            &TestDataFactory::random_client_id(),
        ))
        .to_request();
    let invoice: Value = test::call_and_read_body_json(&app, req).await;

    for field in [
        "id",
        "client_id",
        "child_name",
        "currency",
        "line_items",
        "discount",
        "tax",
        "totals",
        "formatted_totals",
        "status",
        "is_mutable",
        "created_at",
        "updated_at",
    ] {
        assert!(invoice.get(field).is_some(), "{} is required", field);
    }

    assert!(uuid::Uuid::parse_str(invoice["id"].as_str().unwrap()).is_ok());
    assert_eq!(invoice["currency"], "ZAR");
    assert_eq!(invoice["status"], "draft");
    assert_money_object(&invoice["totals"], "totals");
    assert_money_object(&invoice["formatted_totals"], "formatted_totals");

    assert_eq!(invoice["discount"]["type"], "percentage");
    assert!(invoice["discount"]["value"].is_string());
    assert!(invoice["tax"]["rate"].is_string());

    let line_items = invoice["line_items"].as_array().unwrap();
    assert_eq!(line_items.len(), 2);
    for item in line_items {
        assert!(item["description"].is_string());
        assert!(item["quantity"].is_i64());
        assert!(item["unit_price"].is_string());
    }

    // Not yet issued or paid
    assert!(invoice["issued_at"].is_null());
    assert!(invoice["paid_at"].is_null());
    assert!(invoice["due_date"].is_null());
}

#[actix_web::test]
async fn test_quote_response_schema() {
    let app = init_app!(DiscountPolicy::Clamp).await;

    let req = test::TestRequest::post()
        .uri("/invoices/quote")
        .set_json(json!({ "line_items": [] }))
        .to_request();
    let quote: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(quote["currency"], "ZAR");
    assert_money_object(&quote["totals"], "totals");
    assert_eq!(quote["totals"]["total_amount"], "0");
    assert_eq!(quote["formatted"]["total_amount"], "ZAR 0.00");
}

#[actix_web::test]
async fn test_validation_error_envelope() {
    let app = init_app!(DiscountPolicy::Clamp).await;

    let cases = [
        (
            json!({ "line_items": [{ "description": "x", "quantity": -1, "unit_price": "10" }] }),
            "invalid_line_item",
        ),
        (
            json!({ "line_items": [{ "description": "x", "quantity": 1, "unit_price": "-10" }] }),
            "invalid_line_item",
        ),
        (
            json!({ "line_items": [], "discount": { "type": "percentage", "value": 120 } }),
            "invalid_discount",
        ),
        (
            json!({ "line_items": [], "discount": { "type": "fixed", "value": -1 } }),
            "invalid_discount",
        ),
        (
            json!({ "line_items": [], "tax": { "rate": -15 } }),
            "invalid_tax_rate",
        ),
        (
            json!({ "line_items": [{ "description": "x", "quantity": 2, "unit_price": "79228162514264337593543950335" }] }),
            "amount_overflow",
        ),
        (
            json!({
                "line_items": [{ "description": "x", "quantity": 1, "unit_price": "100" }],
                "tax": { "rate": "1000000000000000000000000000" }
            }),
            "amount_overflow",
        ),
    ];

    for (body, kind) in cases {
        let req = test::TestRequest::post()
            .uri("/invoices/quote")
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body: {}", body);

        let error: Value = test::read_body_json(resp).await;
        assert_eq!(error["error"]["code"], 400);
        assert_eq!(error["error"]["kind"], kind, "body: {}", body);
        assert!(error["error"]["message"].is_string());
    }
}

#[actix_web::test]
async fn test_malformed_json_uses_error_envelope() {
    let app = init_app!(DiscountPolicy::Clamp).await;

    let req = test::TestRequest::post()
        .uri("/invoices/quote")
        .insert_header(("content-type", "application/json"))
        .set_payload(r#"{"line_items": [{"quantity": "many"}]}"#)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let error: Value = test::read_body_json(resp).await;
    assert_eq!(error["error"]["kind"], "json");
}

#[actix_web::test]
async fn test_bad_query_uses_error_envelope() {
    let app = init_app!(DiscountPolicy::Clamp).await;

    let req = test::TestRequest::get()
        .uri("/invoices?status=bogus")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let error: Value = test::read_body_json(resp).await;
    assert_eq!(error["error"]["code"], 400);
    assert_eq!(error["error"]["kind"], "validation");
    assert!(error["error"]["message"].as_str().unwrap().contains("bogus"));
}

#[actix_web::test]
async fn test_bad_invoice_id_uses_error_envelope() {
    let app = init_app!(DiscountPolicy::Clamp).await;

    for req in [
        test::TestRequest::get().uri("/invoices/not-a-uuid").to_request(),
        test::TestRequest::post()
            .uri("/invoices/12345/issue")
            .to_request(),
    ] {
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let error: Value = test::read_body_json(resp).await;
        assert_eq!(error["error"]["code"], 404);
        assert_eq!(error["error"]["kind"], "not_found");
    }
}

#[actix_web::test]
async fn test_request_id_header_returned() {
    let app = init_app!(DiscountPolicy::Clamp).await;

    let req = test::TestRequest::get()
        .uri("/health")
        .insert_header(("X-Request-ID", "contract-1"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("x-request-id").unwrap().to_str().unwrap(),
        "contract-1"
    );
}
