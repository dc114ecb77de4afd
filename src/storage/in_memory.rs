//! In-memory implementation of RecordService for testing and development

use crate::core::reference::ID_KEY;
use crate::core::service::RecordService;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

type Table = IndexMap<String, Value>;

/// In-memory record service
///
/// Records are kept per kind in insertion order. Uses RwLock for thread-safe
/// access. References are stored and returned exactly as given, so tests can
/// seed populated or unpopulated shapes.
#[derive(Clone, Default)]
pub struct InMemoryRecordService {
    tables: Arc<RwLock<HashMap<String, Table>>>,
}

impl InMemoryRecordService {
    /// Create a new in-memory record service
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a record as-is, keeping its `_id` or assigning one
    pub fn seed(&self, kind: &str, record: Value) -> Result<Value> {
        let (id, record) = with_id(record, None)?;
        let mut tables = self
            .tables
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        tables
            .entry(kind.to_string())
            .or_default()
            .insert(id, record.clone());
        Ok(record)
    }
}

fn with_id(record: Value, forced: Option<&str>) -> Result<(String, Value)> {
    let Value::Object(mut map) = record else {
        return Err(anyhow!("Record must be a JSON object"));
    };

    let id = match (forced, map.get(ID_KEY).and_then(Value::as_str)) {
        (Some(id), _) => id.to_string(),
        (None, Some(id)) => id.to_string(),
        (None, None) => Uuid::new_v4().to_string(),
    };
    map.insert(ID_KEY.to_string(), Value::String(id.clone()));
    Ok((id, Value::Object(map)))
}

#[async_trait]
impl RecordService for InMemoryRecordService {
    async fn get(&self, kind: &str, id: &str) -> Result<Option<Value>> {
        let tables = self
            .tables
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(tables.get(kind).and_then(|table| table.get(id)).cloned())
    }

    async fn list(&self, kind: &str) -> Result<Vec<Value>> {
        let tables = self
            .tables
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(tables
            .get(kind)
            .map(|table| table.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn create(&self, kind: &str, payload: Value) -> Result<Value> {
        let (id, record) = with_id(payload, Some(&Uuid::new_v4().to_string()))?;
        let mut tables = self
            .tables
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        tables
            .entry(kind.to_string())
            .or_default()
            .insert(id, record.clone());

        Ok(record)
    }

    async fn update(&self, kind: &str, id: &str, payload: Value) -> Result<Value> {
        let (id, record) = with_id(payload, Some(id))?;
        let mut tables = self
            .tables
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let table = tables
            .get_mut(kind)
            .filter(|table| table.contains_key(&id))
            .ok_or_else(|| anyhow!("{} with id '{}' not found", kind, id))?;
        table.insert(id, record.clone());

        Ok(record)
    }

    async fn delete(&self, kind: &str, id: &str) -> Result<()> {
        let mut tables = self
            .tables
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        tables
            .get_mut(kind)
            .and_then(|table| table.shift_remove(id))
            .map(|_| ())
            .ok_or_else(|| anyhow!("{} with id '{}' not found", kind, id))
    }
}
