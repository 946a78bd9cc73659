// src/api/memory.rs
//
// In-memory `CrudService` used by store and page tests.

use std::any::{Any, TypeId};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use super::body::RequestBody;
use super::envelope::{ListParams, ListResponse, PageEnvelope};
use super::service::{CrudService, ServiceFactory};
use crate::domain::{EntityId, Resource};
use crate::error::{AppError, AppResult};

#[derive(Debug, Default)]
pub struct Calls {
    pub get_all: Vec<ListParams>,
    pub create: Vec<RequestBody>,
    pub update: Vec<(EntityId, RequestBody)>,
    pub delete: Vec<EntityId>,
}

pub struct InMemoryService<T> {
    rows: Mutex<Vec<T>>,
    next_id: Mutex<EntityId>,
    failures: Mutex<VecDeque<(u16, Value)>>,
    envelope: Mutex<Option<(u64, Option<u64>, Option<u64>)>>,
    hang: Mutex<bool>,
    pub calls: Mutex<Calls>,
}

impl<T: Resource> InMemoryService<T> {
    pub fn new(rows: Vec<T>) -> Self {
        let next_id = rows.iter().map(Resource::id).max().unwrap_or(0) + 1;
        Self {
            rows: Mutex::new(rows),
            next_id: Mutex::new(next_id),
            failures: Mutex::new(VecDeque::new()),
            envelope: Mutex::new(None),
            hang: Mutex::new(false),
            calls: Mutex::new(Calls::default()),
        }
    }

    /// The next call fails with `status` and `body`
    pub fn fail_next(&self, status: u16, body: Value) {
        self.failures.lock().unwrap().push_back((status, body));
    }

    /// Answer lists with a page envelope carrying these values
    pub fn paginate(&self, count: u64, limit: Option<u64>, offset: Option<u64>) {
        *self.envelope.lock().unwrap() = Some((count, limit, offset));
    }

    /// Every following call never resolves
    pub fn hang(&self) {
        *self.hang.lock().unwrap() = true;
    }

    pub fn rows(&self) -> Vec<T> {
        self.rows.lock().unwrap().clone()
    }

    async fn gate(&self) -> AppResult<()> {
        let hang = *self.hang.lock().unwrap();
        if hang {
            std::future::pending::<()>().await;
        }

        let failure = self.failures.lock().unwrap().pop_front();
        match failure {
            Some((status, body)) => Err(AppError::Api {
                status,
                body: Some(body),
            }),
            None => Ok(()),
        }
    }

    fn materialize(&self, id: EntityId, body: &RequestBody) -> AppResult<T> {
        let mut object = match body {
            RequestBody::Json(Value::Object(map)) => map.clone(),
            RequestBody::Json(_) => serde_json::Map::new(),
            RequestBody::Multipart(payload) => payload
                .fields
                .iter()
                .map(|(k, v)| {
                    let value = serde_json::from_str(v).unwrap_or_else(|_| json!(v));
                    (k.clone(), value)
                })
                .collect(),
        };
        object.insert("id".to_string(), json!(id));
        Ok(serde_json::from_value(Value::Object(object))?)
    }
}

#[async_trait]
impl<T: Resource> CrudService<T> for InMemoryService<T> {
    async fn get_all(&self, params: &ListParams) -> AppResult<ListResponse<T>> {
        self.calls.lock().unwrap().get_all.push(params.clone());
        self.gate().await?;

        let rows = self.rows();
        let envelope = *self.envelope.lock().unwrap();
        Ok(match envelope {
            Some((count, limit, offset)) => ListResponse::Page(PageEnvelope {
                results: rows,
                count: Some(count),
                next: None,
                previous: None,
                limit,
                offset,
            }),
            None => ListResponse::Bare(rows),
        })
    }

    async fn get_by_id(&self, id: EntityId) -> AppResult<T> {
        self.gate().await?;
        self.rows()
            .into_iter()
            .find(|row| row.id() == id)
            .ok_or(AppError::NotFound)
    }

    async fn create(&self, body: RequestBody) -> AppResult<T> {
        self.calls.lock().unwrap().create.push(body.clone());
        self.gate().await?;

        let id = {
            let mut next = self.next_id.lock().unwrap();
            let id = *next;
            *next += 1;
            id
        };
        let row = self.materialize(id, &body)?;
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: EntityId, body: RequestBody) -> AppResult<T> {
        self.calls.lock().unwrap().update.push((id, body.clone()));
        self.gate().await?;

        let row = self.materialize(id, &body)?;
        let mut rows = self.rows.lock().unwrap();
        let slot = rows
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or(AppError::NotFound)?;
        *slot = row.clone();
        Ok(row)
    }

    async fn delete(&self, id: EntityId) -> AppResult<()> {
        self.calls.lock().unwrap().delete.push(id);
        self.gate().await?;

        self.rows.lock().unwrap().retain(|r| r.id() != id);
        Ok(())
    }
}

/// One shared in-memory service per resource type
#[derive(Default)]
pub struct MemoryServices {
    services: Mutex<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl MemoryServices {
    pub fn new() -> Self {
        Self::default()
    }

    /// The service backing `T`, created empty on first use
    pub fn memory<T: Resource>(&self) -> Arc<InMemoryService<T>> {
        let mut services = self.services.lock().unwrap();
        let entry = services
            .entry(TypeId::of::<T>())
            .or_insert_with(|| {
                Arc::new(InMemoryService::<T>::new(Vec::new())) as Arc<dyn Any + Send + Sync>
            });

        entry
            .clone()
            .downcast::<InMemoryService<T>>()
            .unwrap()
    }

    pub fn seed<T: Resource>(&self, rows: Vec<T>) -> Arc<InMemoryService<T>> {
        let service = Arc::new(InMemoryService::new(rows));
        self.services
            .lock()
            .unwrap()
            .insert(TypeId::of::<T>(), service.clone());
        service
    }
}

impl ServiceFactory for MemoryServices {
    fn service<T: Resource>(&self) -> Arc<dyn CrudService<T>> {
        self.memory::<T>()
    }
}
