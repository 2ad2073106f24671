//! HTTP-level integration tests for `/api/emps`, including the bulk import.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

fn emp(ship_name: &str, dw: i64) -> serde_json::Value {
    json!({
        "ship_name": ship_name,
        "dw": dw,
        "loaded_cargo_name": "Iron ore",
        "data_date": 20250612,
        "created_by": "sato",
    })
}

// ---------------------------------------------------------------------------
// Single-row lifecycle
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_emp_single_lifecycle(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/emps",
        emp("Hokuto Maru", 12_500),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["ship_name"], "Hokuto Maru");
    assert_eq!(created["dw"], 12_500);
    assert_eq!(created["data_date"], 20250612);
    assert!(created.get("session_id").is_none());

    let response = put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/emps/{id}"),
        json!({
            "ship_name": "Hokuto Maru",
            "dw": 13_000,
            "loaded_cargo_name": "Cement",
            "data_date": 20250613,
            "updated_by": "suzuki",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(common::build_test_app(pool.clone()), &format!("/api/emps/{id}")).await;
    let json = body_json(response).await;
    assert_eq!(json["dw"], 13_000);
    assert_eq!(json["loaded_cargo_name"], "Cement");
    assert_eq!(json["data_date"], 20250613);

    let response = delete(
        common::build_test_app(pool.clone()),
        &format!("/api/emps/{id}?deleted_by=suzuki"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(common::build_test_app(pool), &format!("/api/emps/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["error"],
        format!("Emp with id {id} not found")
    );
}

// ---------------------------------------------------------------------------
// Bulk import
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_returns_records_in_request_order(pool: PgPool) {
    let body = json!([
        emp("Pacific Dawn", 58_000),
        emp("Sea Breeze", 33_100),
        emp("Hokuto Maru", 12_500),
    ]);

    let response = post_json(common::build_test_app(pool.clone()), "/api/emps/bulk", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let records = json.as_array().unwrap();
    let names: Vec<&str> = records
        .iter()
        .map(|r| r["ship_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Pacific Dawn", "Sea Breeze", "Hokuto Maru"]);

    for record in records {
        let id = record["id"].as_i64().unwrap();
        let response = get(common::build_test_app(pool.clone()), &format!("/api/emps/{id}")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = get(common::build_test_app(pool), "/api/emps").await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_empty_list_is_400(pool: PgPool) {
    let response = post_json(common::build_test_app(pool.clone()), "/api/emps/bulk", json!([])).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Input list is empty");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM emps")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_with_blank_row_inserts_nothing(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/emps/bulk",
        json!([emp("Good", 1), emp("", 2)]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM emps")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}
