// src/api/service.rs
//
// Per-resource CRUD surface
//
// RULES:
// - Stores depend on `CrudService<T>`, never on HTTP details
// - `RestService<T>` maps the surface onto `{root}/{endpoint}/[{id}/]`

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;

use super::body::RequestBody;
use super::client::ApiClient;
use super::envelope::{ListParams, ListResponse};
use crate::domain::{EntityId, Resource};
use crate::error::AppResult;

#[async_trait]
pub trait CrudService<T>: Send + Sync {
    async fn get_all(&self, params: &ListParams) -> AppResult<ListResponse<T>>;
    async fn get_by_id(&self, id: EntityId) -> AppResult<T>;
    async fn create(&self, body: RequestBody) -> AppResult<T>;
    async fn update(&self, id: EntityId, body: RequestBody) -> AppResult<T>;
    async fn delete(&self, id: EntityId) -> AppResult<()>;
}

/// Hands out one `CrudService` per resource type
pub trait ServiceFactory {
    fn service<T: Resource>(&self) -> Arc<dyn CrudService<T>>;
}

impl ServiceFactory for ApiClient {
    fn service<T: Resource>(&self) -> Arc<dyn CrudService<T>> {
        Arc::new(RestService::<T>::new(self.clone()))
    }
}

pub struct RestService<T> {
    client: ApiClient,
    _resource: PhantomData<fn() -> T>,
}

impl<T: Resource> RestService<T> {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    fn collection_path() -> String {
        format!("{}/", T::ENDPOINT)
    }

    fn item_path(id: EntityId) -> String {
        format!("{}/{}/", T::ENDPOINT, id)
    }
}

#[async_trait]
impl<T: Resource> CrudService<T> for RestService<T> {
    async fn get_all(&self, params: &ListParams) -> AppResult<ListResponse<T>> {
        log::debug!("GET {} {:?}", T::ENDPOINT, params.as_query());
        self.client
            .get(&Self::collection_path(), params.as_query())
            .await
    }

    async fn get_by_id(&self, id: EntityId) -> AppResult<T> {
        self.client.get(&Self::item_path(id), &[]).await
    }

    async fn create(&self, body: RequestBody) -> AppResult<T> {
        self.client
            .send(Method::POST, &Self::collection_path(), body)
            .await
    }

    /// Multipart updates are partial so an untouched file field survives
    async fn update(&self, id: EntityId, body: RequestBody) -> AppResult<T> {
        let method = match body {
            RequestBody::Json(_) => Method::PUT,
            RequestBody::Multipart(_) => Method::PATCH,
        };
        self.client.send(method, &Self::item_path(id), body).await
    }

    async fn delete(&self, id: EntityId) -> AppResult<()> {
        self.client.delete(&Self::item_path(id)).await
    }
}
