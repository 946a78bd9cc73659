// src/pages/tab.rs
//
// One resource tab: a CRUD store plus the modal and form that edit it.
//
// ARCHITECTURE:
// - `ResourceTab<T>` is generic over the record type
// - `TabController` erases the type so a page can hold mixed tabs
//
// RULES:
// - The form is reset whenever the modal opens for creation or closes
// - A failed submit leaves the modal open with field errors in the form
// - A successful submit closes the modal, then reloads the list

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::api::ListParams;
use crate::crud::{CrudStore, Pagination};
use crate::domain::{EntityId, Resource};
use crate::error::{AppError, AppResult};
use crate::form::{values_from_record, ChangeEvent, FormState};

use super::coerce::{coerce_values, initial_values, FieldSpec};
use super::confirm::{delete_question, ConfirmPrompt};
use super::filter::filter_rows;
use super::modal::{ModalMode, ModalState};

/// Static description of a tab
pub struct TabSpec {
    pub key: &'static str,
    pub title: &'static str,
    pub fields: Vec<FieldSpec>,
}

/// Serializable snapshot painted by the webview
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabView {
    pub key: String,
    pub title: String,
    pub entity: String,
    /// Rows matching the search query
    pub rows: Vec<Value>,
    /// Rows held before filtering
    pub total: usize,
    pub pagination: Option<Pagination>,
    pub loading: bool,
    pub modal: ModalMode,
    pub editing_id: Option<EntityId>,
    pub form: FormState,
}

#[async_trait]
pub trait TabController: Send {
    fn key(&self) -> &'static str;

    fn title(&self) -> &'static str;

    fn is_modal_open(&self) -> bool;

    async fn load(&mut self) -> AppResult<()>;

    /// Ids of the rows matching `query`, in display order
    fn rows(&self, query: &str) -> Vec<EntityId>;

    fn open_create(&mut self);

    fn open_edit(&mut self, id: EntityId) -> AppResult<()>;

    fn close_modal(&mut self);

    fn change(&mut self, event: ChangeEvent);

    async fn submit(&mut self) -> AppResult<()>;

    /// `Ok(false)` when the user declined the confirmation
    async fn delete(&mut self, id: EntityId, confirm: &dyn ConfirmPrompt) -> AppResult<bool>;

    fn view(&self, query: &str) -> AppResult<TabView>;
}

pub struct ResourceTab<T: Resource> {
    spec: TabSpec,
    store: CrudStore<T>,
    modal: ModalState<T>,
    form: FormState,
    params: ListParams,
}

impl<T: Resource> ResourceTab<T> {
    pub fn new(spec: TabSpec, store: CrudStore<T>, params: ListParams) -> Self {
        let form = FormState::new(initial_values(&spec.fields));
        Self {
            spec,
            store,
            modal: ModalState::Closed,
            form,
            params,
        }
    }

    pub fn store(&self) -> &CrudStore<T> {
        &self.store
    }

    pub fn modal(&self) -> &ModalState<T> {
        &self.modal
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    fn visible(&self, query: &str) -> Vec<&T> {
        filter_rows(self.store.data(), query)
    }
}

#[async_trait]
impl<T: Resource> TabController for ResourceTab<T> {
    fn key(&self) -> &'static str {
        self.spec.key
    }

    fn title(&self) -> &'static str {
        self.spec.title
    }

    fn is_modal_open(&self) -> bool {
        self.modal.is_open()
    }

    async fn load(&mut self) -> AppResult<()> {
        self.store.fetch_data(&self.params).await
    }

    fn rows(&self, query: &str) -> Vec<EntityId> {
        self.visible(query).into_iter().map(Resource::id).collect()
    }

    fn open_create(&mut self) {
        self.form.reset();
        self.modal = ModalState::Creating;
    }

    fn open_edit(&mut self, id: EntityId) -> AppResult<()> {
        let record = self.store.find(id).cloned().ok_or(AppError::NotFound)?;

        self.form.reset();
        let mut values = self.form.values().clone();
        values.extend(values_from_record(&record)?);
        self.form.set_values(values);

        self.modal = ModalState::Editing(record);
        Ok(())
    }

    fn close_modal(&mut self) {
        self.modal = ModalState::Closed;
        self.form.reset();
    }

    fn change(&mut self, event: ChangeEvent) {
        self.form.handle_change(event);
    }

    async fn submit(&mut self) -> AppResult<()> {
        let editing = match &self.modal {
            ModalState::Closed => {
                return Err(AppError::Validation("No form is open".to_string()));
            }
            ModalState::Creating => None,
            ModalState::Editing(record) => Some(record.id()),
        };

        let specs = &self.spec.fields;
        let store = &mut self.store;

        self.form
            .handle_submit(|values| async move {
                let body = coerce_values(specs, &values, T::MULTIPART)?;
                match editing {
                    Some(id) => store.update_item(id, body).await.map(|_| ()),
                    None => store.create_item(body).await.map(|_| ()),
                }
            })
            .await?;

        self.close_modal();
        self.store.fetch_data(&self.params).await
    }

    async fn delete(&mut self, id: EntityId, confirm: &dyn ConfirmPrompt) -> AppResult<bool> {
        if !confirm.confirm(&delete_question(self.store.entity_name())) {
            log::debug!("{}: delete of {} declined", self.spec.key, id);
            return Ok(false);
        }

        self.store.delete_item(id).await?;

        if self.modal.editing().map(Resource::id) == Some(id) {
            self.close_modal();
        }
        Ok(true)
    }

    fn view(&self, query: &str) -> AppResult<TabView> {
        let rows = self
            .visible(query)
            .into_iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TabView {
            key: self.spec.key.to_string(),
            title: self.spec.title.to_string(),
            entity: self.store.entity_name().to_string(),
            rows,
            total: self.store.data().len(),
            pagination: self.store.pagination().cloned(),
            loading: self.store.is_loading() || self.form.is_loading(),
            modal: self.modal.mode(),
            editing_id: self.modal.editing().map(Resource::id),
            form: self.form.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::api::memory::InMemoryService;
    use crate::api::RequestBody;
    use crate::domain::{Amenity, Visitor};
    use crate::form::FieldValue;
    use crate::lifecycle::MountScope;
    use crate::notify::{RecordingNotifier, ToastKind};
    use crate::pages::coerce::{boolean, file, integer, optional, text};
    use crate::pages::confirm::MockConfirmPrompt;
    use serde_json::json;

    fn amenity(id: i64, name: &str) -> Amenity {
        Amenity {
            id,
            name: name.to_string(),
            is_active: true,
            ..Default::default()
        }
    }

    fn amenity_tab(
        rows: Vec<Amenity>,
    ) -> (ResourceTab<Amenity>, Arc<InMemoryService<Amenity>>, Arc<RecordingNotifier>) {
        let service = Arc::new(InMemoryService::new(rows));
        let notifier = Arc::new(RecordingNotifier::new());
        let store = CrudStore::new(service.clone(), notifier.clone(), MountScope::new());
        let spec = TabSpec {
            key: "amenities",
            title: "Amenities",
            fields: vec![
                text("name"),
                optional("description"),
                integer("capacity"),
                boolean("is_active").checked(),
            ],
        };
        (ResourceTab::new(spec, store, ListParams::new()), service, notifier)
    }

    #[tokio::test]
    async fn test_rows_filtered_by_query() {
        let (mut tab, _, _) = amenity_tab(vec![amenity(1, "Piscina"), amenity(2, "Quincho")]);
        tab.load().await.unwrap();

        assert_eq!(tab.rows(""), vec![1, 2]);
        assert_eq!(tab.rows("QUIN"), vec![2]);

        let view = tab.view("quin").unwrap();
        assert_eq!(view.total, 2);
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0]["name"], "Quincho");
    }

    #[tokio::test]
    async fn test_create_submit_sends_coerced_body_and_reloads() {
        let (mut tab, service, notifier) = amenity_tab(vec![]);
        tab.load().await.unwrap();

        tab.open_create();
        assert_eq!(tab.form().value("is_active"), Some(&FieldValue::Bool(true)));
        tab.change(ChangeEvent::text("name", "Gimnasio"));
        tab.change(ChangeEvent::text("capacity", "12"));

        tab.submit().await.unwrap();

        let calls = service.calls.lock().unwrap();
        assert_eq!(
            calls.create[0],
            RequestBody::Json(json!({
                "name": "Gimnasio",
                "description": null,
                "capacity": 12,
                "is_active": true
            }))
        );
        assert_eq!(calls.get_all.len(), 2);
        drop(calls);

        assert!(!tab.is_modal_open());
        assert_eq!(tab.store().data()[0].name, "Gimnasio");
        assert_eq!(notifier.messages(ToastKind::Success), vec!["Amenity created successfully"]);
    }

    #[tokio::test]
    async fn test_edit_prefills_and_updates() {
        let (mut tab, service, _) = amenity_tab(vec![Amenity {
            capacity: Some(30),
            ..amenity(5, "Piscina")
        }]);
        tab.load().await.unwrap();

        tab.open_edit(5).unwrap();
        assert_eq!(tab.form().value("capacity"), Some(&FieldValue::text("30")));
        assert_eq!(tab.view("").unwrap().editing_id, Some(5));

        tab.change(ChangeEvent::text("capacity", "40"));
        tab.submit().await.unwrap();

        let calls = service.calls.lock().unwrap();
        let (id, RequestBody::Json(body)) = &calls.update[0] else {
            panic!("expected JSON update");
        };
        assert_eq!(*id, 5);
        assert_eq!(body["capacity"], json!(40));
        drop(calls);

        assert_eq!(tab.store().data()[0].capacity, Some(40));
    }

    #[tokio::test]
    async fn test_open_edit_unknown_id() {
        let (mut tab, _, _) = amenity_tab(vec![]);
        assert!(matches!(tab.open_edit(9), Err(AppError::NotFound)));
        assert!(!tab.is_modal_open());
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_modal_open_with_errors() {
        let (mut tab, service, notifier) = amenity_tab(vec![]);
        tab.open_create();
        service.fail_next(400, json!({"name": ["This field may not be blank."]}));

        assert!(tab.submit().await.is_err());

        assert!(tab.is_modal_open());
        assert_eq!(tab.form().errors()["name"], "This field may not be blank.");
        assert_eq!(notifier.messages(ToastKind::Error), vec!["Error creating Amenity"]);
    }

    #[tokio::test]
    async fn test_coercion_error_never_reaches_service() {
        let (mut tab, service, _) = amenity_tab(vec![]);
        tab.open_create();
        tab.change(ChangeEvent::text("capacity", "many"));

        assert!(tab.submit().await.is_err());

        assert!(service.calls.lock().unwrap().create.is_empty());
        assert!(tab.form().errors().contains_key("capacity"));
        assert!(tab.is_modal_open());
    }

    #[tokio::test]
    async fn test_submit_without_modal_is_rejected() {
        let (mut tab, _, _) = amenity_tab(vec![]);
        assert!(matches!(tab.submit().await, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_declined_delete_calls_nothing() {
        let (mut tab, service, _) = amenity_tab(vec![amenity(1, "Piscina")]);
        tab.load().await.unwrap();

        let mut confirm = MockConfirmPrompt::new();
        confirm
            .expect_confirm()
            .withf(|message| message.ends_with("delete this amenity?"))
            .times(1)
            .return_const(false);

        assert!(!tab.delete(1, &confirm).await.unwrap());
        assert!(service.calls.lock().unwrap().delete.is_empty());
        assert_eq!(tab.rows(""), vec![1]);
    }

    #[tokio::test]
    async fn test_confirmed_delete_removes_row_and_closes_its_modal() {
        let (mut tab, _, _) = amenity_tab(vec![amenity(1, "Piscina"), amenity(2, "Quincho")]);
        tab.load().await.unwrap();
        tab.open_edit(2).unwrap();

        let mut confirm = MockConfirmPrompt::new();
        confirm.expect_confirm().return_const(true);

        assert!(tab.delete(2, &confirm).await.unwrap());
        assert_eq!(tab.rows(""), vec![1]);
        assert!(!tab.is_modal_open());
    }

    #[tokio::test]
    async fn test_multipart_resource_submits_multipart() {
        let service = Arc::new(InMemoryService::<Visitor>::new(vec![]));
        let notifier = Arc::new(RecordingNotifier::new());
        let store = CrudStore::new(service.clone(), notifier, MountScope::new());
        let spec = TabSpec {
            key: "visitors",
            title: "Visitors",
            fields: vec![text("full_name"), file("photo")],
        };
        let mut tab = ResourceTab::new(spec, store, ListParams::new());

        tab.open_create();
        tab.change(ChangeEvent::text("full_name", "Ana Rojas"));
        tab.submit().await.unwrap();

        let calls = service.calls.lock().unwrap();
        let RequestBody::Multipart(payload) = &calls.create[0] else {
            panic!("expected multipart");
        };
        assert_eq!(payload.field("full_name"), Some("Ana Rojas"));
        assert!(payload.files.is_empty());
    }
}
