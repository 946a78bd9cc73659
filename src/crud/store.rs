// src/crud/store.rs
//
// Generic CRUD store
//
// Holds the last successful list of one resource and patches it after each
// mutation. Every mutation runs inside the loading-toast lifecycle and
// under the owning page's mount scope.
//
// RULES:
// - `data` only changes on success and only while mounted
// - Errors are surfaced as toasts, then returned to the caller

use std::sync::Arc;

use crate::api::{CrudService, ListParams, ListResponse, RequestBody};
use crate::domain::{EntityId, Resource};
use crate::error::{AppError, AppResult};
use crate::lifecycle::MountScope;
use crate::notify::{toast_wrapped, Notifier, ToastMessages};

use super::pagination::Pagination;

pub struct CrudStore<T: Resource> {
    service: Arc<dyn CrudService<T>>,
    notifier: Arc<dyn Notifier>,
    scope: MountScope,
    entity_name: String,
    data: Vec<T>,
    pagination: Option<Pagination>,
    loading: bool,
}

impl<T: Resource> CrudStore<T> {
    pub fn new(
        service: Arc<dyn CrudService<T>>,
        notifier: Arc<dyn Notifier>,
        scope: MountScope,
    ) -> Self {
        Self {
            service,
            notifier,
            scope,
            entity_name: T::NAME.to_string(),
            data: Vec::new(),
            pagination: None,
            loading: false,
        }
    }

    pub fn with_entity_name(mut self, name: impl Into<String>) -> Self {
        self.entity_name = name.into();
        self
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn pagination(&self) -> Option<&Pagination> {
        self.pagination.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }

    pub fn find(&self, id: EntityId) -> Option<&T> {
        self.data.iter().find(|item| item.id() == id)
    }

    /// Load the list. Bare arrays clear the pagination metadata.
    pub async fn fetch_data(&mut self, params: &ListParams) -> AppResult<()> {
        if !self.scope.is_mounted() {
            return Err(AppError::Cancelled);
        }
        self.loading = true;

        let result = self.scope.guard(self.service.get_all(params)).await;

        match result {
            Ok(response) => {
                self.pagination = match &response {
                    ListResponse::Page(envelope) => Some(Pagination::from_envelope(envelope, params)),
                    ListResponse::Bare(_) => None,
                };
                self.data = response.into_items();
                self.loading = false;
                log::debug!("{}: loaded {} rows", self.entity_name, self.data.len());
                Ok(())
            }
            Err(e) if e.is_cancelled() => Err(e),
            Err(e) => {
                self.loading = false;
                log::warn!("{}: list failed: {}", self.entity_name, e);
                self.notifier
                    .error(&e.user_message(&format!("Error loading {}", self.entity_name)));
                Err(e)
            }
        }
    }

    /// Create a record and put it at the head of `data`
    pub async fn create_item(&mut self, body: RequestBody) -> AppResult<T> {
        let messages = ToastMessages::create(&self.entity_name);
        let item = toast_wrapped(
            self.notifier.clone(),
            &messages,
            self.scope.guard(self.service.create(body)),
        )
        .await?;

        self.data.insert(0, item.clone());
        Ok(item)
    }

    /// Update a record and replace it in place
    pub async fn update_item(&mut self, id: EntityId, body: RequestBody) -> AppResult<T> {
        let messages = ToastMessages::update(&self.entity_name);
        let item = toast_wrapped(
            self.notifier.clone(),
            &messages,
            self.scope.guard(self.service.update(id, body)),
        )
        .await?;

        if let Some(slot) = self.data.iter_mut().find(|row| row.id() == id) {
            *slot = item.clone();
        }
        Ok(item)
    }

    /// Delete a record and drop exactly that row
    pub async fn delete_item(&mut self, id: EntityId) -> AppResult<()> {
        let messages = ToastMessages::delete(&self.entity_name);
        toast_wrapped(
            self.notifier.clone(),
            &messages,
            self.scope.guard(self.service.delete(id)),
        )
        .await?;

        self.data.retain(|row| row.id() != id);
        Ok(())
    }

    /// Fetch one record. Silent on success.
    pub async fn get_item(&self, id: EntityId) -> AppResult<T> {
        match self.scope.guard(self.service.get_by_id(id)).await {
            Ok(item) => Ok(item),
            Err(e) if e.is_cancelled() => Err(e),
            Err(e) => {
                self.notifier
                    .error(&e.user_message(&format!("Error loading {}", self.entity_name)));
                Err(e)
            }
        }
    }
}
