//! Page pipelines: loading detail/list views and submitting create/edit forms
//!
//! Loading goes fetch → normalize references → filter panels → resolve.
//! Submitting goes filter → build rules → validate → collapse references →
//! mutation collaborator. The collaborator is only called for valid payloads.

use crate::core::error::{FleetError, RecordError};
use crate::core::reference::{depopulate_references, normalize_references};
use crate::core::service::RecordService;
use crate::core::validation::{ValidationResult, validate_payload};
use crate::entities::{RecordKind, visibility_predicate};
use crate::template::{ResolvedField, ResolvedPanel, filter_panels, resolve_panels, resolve_table};
use serde::Serialize;
use serde_json::Value;

/// A resolved detail page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    /// The record with references normalized
    pub record: Value,
    pub panels: Vec<ResolvedPanel>,
}

/// A resolved list grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListView {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<ResolvedField>>,
}

/// Fetch one record of kind `K` and resolve its detail panels
pub async fn load_detail<K: RecordKind>(
    service: &dyn RecordService,
    id: &str,
) -> Result<DetailView, FleetError> {
    let record = service
        .get(K::NAME, id)
        .await?
        .ok_or_else(|| RecordError::NotFound {
            kind: K::NAME.to_string(),
            id: id.to_string(),
        })?;

    let record = normalize_references(&record, &K::references());
    let panels = filter_panels(&K::panels(), &record, visibility_predicate::<K>());

    tracing::debug!(kind = K::NAME, id, panels = panels.len(), "resolved detail view");

    Ok(DetailView {
        panels: resolve_panels(&panels, &record),
        record,
    })
}

/// Fetch every record of kind `K` and resolve the list columns
pub async fn load_list<K: RecordKind>(service: &dyn RecordService) -> Result<ListView, FleetError> {
    let references = K::references();
    let records: Vec<Value> = service
        .list(K::NAME)
        .await?
        .iter()
        .map(|record| normalize_references(record, &references))
        .collect();

    let columns = K::columns();
    tracing::debug!(kind = K::NAME, rows = records.len(), "resolved list view");

    Ok(ListView {
        headers: columns.iter().map(|c| c.label().to_string()).collect(),
        rows: resolve_table(&records, &columns),
    })
}

/// Filter and validate a payload for kind `K` without submitting it
///
/// Returns the filtered payload alongside the validation result so a form
/// can keep editing the normalized values.
pub fn check_payload<K: RecordKind>(payload: &Value) -> (Value, ValidationResult) {
    let payload = K::filters().apply(payload);
    let result = validate_payload(&K::rules(&payload), &payload);
    (payload, result)
}

/// Filter, validate and collapse references to bare ids
///
/// This is the shape handed to the mutation collaborator by every submit
/// entry point, the HTTP extractor included.
pub(crate) fn prepare_submission<K: RecordKind>(payload: &Value) -> Result<Value, FleetError> {
    let (payload, result) = check_payload::<K>(payload);
    if let Err(err) = result.into_result() {
        tracing::debug!(kind = K::NAME, "submission refused by validation");
        return Err(err.into());
    }
    Ok(depopulate_references(&payload, &K::references()))
}

/// Validate and create a record of kind `K`
pub async fn submit_create<K: RecordKind>(
    service: &dyn RecordService,
    payload: &Value,
) -> Result<Value, FleetError> {
    let payload = prepare_submission::<K>(payload)?;
    let created = service.create(K::NAME, payload).await?;

    tracing::info!(kind = K::NAME, id = ?created.get("_id"), "record created");
    Ok(created)
}

/// Validate and update record `id` of kind `K`
pub async fn submit_update<K: RecordKind>(
    service: &dyn RecordService,
    id: &str,
    payload: &Value,
) -> Result<Value, FleetError> {
    let payload = prepare_submission::<K>(payload)?;
    if service.get(K::NAME, id).await?.is_none() {
        return Err(RecordError::NotFound {
            kind: K::NAME.to_string(),
            id: id.to_string(),
        }
        .into());
    }
    let updated = service.update(K::NAME, id, payload).await?;

    tracing::info!(kind = K::NAME, id, "record updated");
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Customer, Vehicle};
    use crate::storage::InMemoryRecordService;
    use serde_json::json;

    #[tokio::test]
    async fn test_invalid_payload_never_reaches_service() {
        let service = InMemoryRecordService::new();
        let err = submit_create::<Customer>(&service, &json!({ "name": "" }))
            .await
            .unwrap_err();

        assert!(err.error_map().is_some());
        assert!(service.list("customer").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_stores_filtered_payload() {
        let service = InMemoryRecordService::new();
        let created = submit_create::<Customer>(
            &service,
            &json!({ "name": " Ramesh ", "contact": "9999999999" }),
        )
        .await
        .unwrap();

        assert_eq!(created["name"], "Ramesh");
        assert!(created["_id"].is_string());
    }

    #[tokio::test]
    async fn test_update_collapses_populated_references() {
        let service = InMemoryRecordService::new();
        service
            .seed(
                "vehicle",
                json!({ "_id": "v1", "vehicleNo": "MH12AB1234", "category": "cat-1" }),
            )
            .unwrap();

        let edited = json!({
            "vehicleNo": "MH12AB1234",
            "category": { "_id": "cat-2", "name": "SUV" },
            "seatingCapacity": 7,
            "ownershipType": "own"
        });
        let updated = submit_update::<Vehicle>(&service, "v1", &edited).await.unwrap();

        assert_eq!(updated["category"], "cat-2");
    }

    #[tokio::test]
    async fn test_update_of_missing_record_is_not_found() {
        let service = InMemoryRecordService::new();
        let err = submit_update::<Customer>(
            &service,
            "nope",
            &json!({ "name": "Ramesh", "contact": "9999999999" }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.error_code(), "RECORD_NOT_FOUND");
        assert_eq!(err.status_code(), axum::http::StatusCode::NOT_FOUND);
        assert!(service.list("customer").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_record_is_not_found() {
        let service = InMemoryRecordService::new();
        let err = load_detail::<Customer>(&service, "nope").await.unwrap_err();
        assert_eq!(err.error_code(), "RECORD_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_list_view_resolves_reference_columns() {
        let service = InMemoryRecordService::new();
        service
            .seed(
                "vehicle",
                json!({ "vehicleNo": "MH12AB1234", "category": { "_id": "c1", "name": "Sedan" } }),
            )
            .unwrap();
        service
            .seed("vehicle", json!({ "vehicleNo": "KA01CD4321", "category": "c9" }))
            .unwrap();

        let view = load_list::<Vehicle>(&service).await.unwrap();
        assert_eq!(view.headers[1], "Category");
        assert_eq!(view.rows[0][1].value, "Sedan");
        assert_eq!(view.rows[1][1].value, "c9");
        assert_eq!(view.rows[1][3].value, "-");
    }
}
