//! In-memory record store standing in for the persistence layer.

use std::{collections::BTreeMap, marker::PhantomData};

use async_trait::async_trait;
use estate_http::error::AppError;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use super::{crud::CrudService, id::NumericId};

/// JSON object fields of a record or payload.
pub type Fields = Map<String, Value>;

/// A stored record, serialized flat as `{"id": .., ...fields}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: u64,
    #[serde(flatten)]
    pub fields: Fields,
}

struct Inner {
    next_id: u64,
    records: BTreeMap<u64, Fields>,
}

/// Thread-safe store generic over a resource's create and update payloads.
///
/// Ids start at 1 and are never reused. The store owns identity, so an `id`
/// key inside a payload is dropped.
pub struct MemoryStore<C, U> {
    resource: &'static str,
    inner: RwLock<Inner>,
    _payloads: PhantomData<fn() -> (C, U)>,
}

impl<C, U> MemoryStore<C, U> {
    pub fn new(resource: &'static str) -> Self {
        Self {
            resource,
            inner: RwLock::new(Inner {
                next_id: 1,
                records: BTreeMap::new(),
            }),
            _payloads: PhantomData,
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn without_id(mut fields: Fields) -> Fields {
    fields.remove("id");
    fields
}

#[async_trait]
impl<C, U> CrudService for MemoryStore<C, U>
where
    C: Into<Fields> + DeserializeOwned + Send + 'static,
    U: Into<Fields> + DeserializeOwned + Send + 'static,
{
    type Create = C;
    type Update = U;
    type Record = Record;

    fn resource(&self) -> &'static str {
        self.resource
    }

    async fn create(&self, dto: C) -> Result<Record, AppError> {
        let fields = without_id(dto.into());
        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id += 1;
        inner.records.insert(id, fields.clone());

        tracing::info!(resource = self.resource, id, "record created");
        Ok(Record { id, fields })
    }

    async fn find_all(&self) -> Result<Vec<Record>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .records
            .iter()
            .map(|(id, fields)| Record {
                id: *id,
                fields: fields.clone(),
            })
            .collect())
    }

    async fn find_one(&self, id: NumericId) -> Result<Option<Record>, AppError> {
        let Some(key) = id.as_key() else {
            return Ok(None);
        };
        let inner = self.inner.read().await;
        Ok(inner.records.get(&key).map(|fields| Record {
            id: key,
            fields: fields.clone(),
        }))
    }

    async fn update(&self, id: NumericId, dto: U) -> Result<Option<Record>, AppError> {
        let Some(key) = id.as_key() else {
            return Ok(None);
        };
        let mut inner = self.inner.write().await;
        let Some(fields) = inner.records.get_mut(&key) else {
            return Ok(None);
        };
        for (name, value) in without_id(dto.into()) {
            fields.insert(name, value);
        }

        tracing::info!(resource = self.resource, id = key, "record updated");
        Ok(Some(Record {
            id: key,
            fields: fields.clone(),
        }))
    }

    async fn remove(&self, id: NumericId) -> Result<Option<Record>, AppError> {
        let Some(key) = id.as_key() else {
            return Ok(None);
        };
        let removed = self.inner.write().await.records.remove(&key);
        if removed.is_some() {
            tracing::info!(resource = self.resource, id = key, "record removed");
        }
        Ok(removed.map(|fields| Record { id: key, fields }))
    }
}
