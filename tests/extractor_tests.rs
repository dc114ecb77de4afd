//! HTTP-level tests for the `Validated<K>` extractor

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use axum_test::TestServer;
use fleetdesk::prelude::*;
use serde_json::{Value, json};
use std::sync::Arc;

async fn create_vehicle(
    State(service): State<Arc<InMemoryRecordService>>,
    payload: Validated<Vehicle>,
) -> Result<Json<Value>, FleetError> {
    let created = service.create(Vehicle::NAME, payload.into_inner()).await?;
    Ok(Json(created))
}

fn create_test_server() -> (TestServer, Arc<InMemoryRecordService>) {
    let service = Arc::new(InMemoryRecordService::new());
    let app = Router::new()
        .route("/vehicles", post(create_vehicle))
        .with_state(service.clone());

    let server = TestServer::new(app);
    (server, service)
}

#[tokio::test]
async fn test_valid_vehicle_created_with_filtered_values() {
    let (server, service) = create_test_server();

    let response = server
        .post("/vehicles")
        .json(&json!({
            "vehicleNo": " mh12ab1234 ",
            "category": "cat-1",
            "seatingCapacity": 5,
            "ownershipType": "own"
        }))
        .await;

    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["vehicleNo"], "MH12AB1234");
    assert_eq!(service.list("vehicle").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_populated_reference_stored_as_bare_id() {
    let (server, service) = create_test_server();
    let body = json!({
        "vehicleNo": "MH12AB1234",
        "category": { "_id": "cat-2", "name": "SUV" },
        "seatingCapacity": 7,
        "ownershipType": "own"
    });

    let response = server.post("/vehicles").json(&body).await;
    response.assert_status_ok();

    let stored: Value = response.json();
    assert_eq!(stored["category"], "cat-2");

    let piped = submit_create::<Vehicle>(service.as_ref(), &body).await.unwrap();
    assert_eq!(stored["category"], piped["category"]);
}

#[tokio::test]
async fn test_invalid_vehicle_refused_with_error_map() {
    let (server, service) = create_test_server();

    let response = server
        .post("/vehicles")
        .json(&json!({
            "vehicleNo": "",
            "category": "cat-1",
            "seatingCapacity": 0,
            "ownershipType": "supplier"
        }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["details"]["banner"], SUBMISSION_BANNER);
    assert_eq!(body["details"]["errors"]["vehicleNo"], "Vehicle number is required");
    assert_eq!(
        body["details"]["errors"]["seatingCapacity"],
        "Seating capacity must be greater than 0"
    );
    assert_eq!(body["details"]["errors"]["supplier"], "Select a supplier");

    assert!(service.list("vehicle").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_non_json_body_is_bad_request() {
    let (server, _) = create_test_server();

    let response = server.post("/vehicles").text("vehicleNo=MH12AB1234").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_PAYLOAD");
}

#[tokio::test]
async fn test_json_array_is_bad_request() {
    let (server, _) = create_test_server();

    let response = server.post("/vehicles").json(&json!([1, 2, 3])).await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
