//! Axum extractor for validated record payloads
//!
//! This module provides the `Validated<K>` extractor that filters and
//! validates a request body against a record kind before it reaches the
//! handler.

use crate::core::error::{FleetError, ValidationError};
use crate::core::submission::prepare_submission;
use crate::entities::RecordKind;
use axum::{
    Json,
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use std::marker::PhantomData;

/// Axum extractor that filters and validates a record payload
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_vehicle(
///     State(service): State<Arc<InMemoryRecordService>>,
///     payload: Validated<Vehicle>,
/// ) -> Result<Json<Value>, FleetError> {
///     // payload is already filtered and validated
///     let created = service.create(Vehicle::NAME, payload.into_inner()).await?;
///     Ok(Json(created))
/// }
/// ```
///
/// A body that is not a JSON object is refused with `400`; a payload failing
/// the kind's rules is refused with `422` and the full error map. Accepted
/// payloads carry their references as bare ids.
pub struct Validated<K>(pub Value, PhantomData<K>);

impl<K> Validated<K> {
    pub fn new(payload: Value) -> Self {
        Self(payload, PhantomData)
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl<K> std::ops::Deref for Validated<K> {
    type Target = Value;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, K> FromRequest<S> for Validated<K>
where
    S: Send + Sync,
    K: RecordKind,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload): Json<Value> = Json::from_request(req, state).await.map_err(|e| {
            FleetError::from(ValidationError::InvalidPayload {
                message: e.body_text(),
            })
            .into_response()
        })?;

        if !payload.is_object() {
            return Err(FleetError::from(ValidationError::InvalidPayload {
                message: "expected a JSON object".to_string(),
            })
            .into_response());
        }

        prepare_submission::<K>(&payload)
            .map(Validated::new)
            .map_err(IntoResponse::into_response)
    }
}
