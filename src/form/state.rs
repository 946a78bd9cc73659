// src/form/state.rs
//
// Controlled form state: values, per-field errors and a submitting flag.

use std::collections::BTreeMap;
use std::future::Future;

use serde::Serialize;

use super::value::{ChangeEvent, FieldValue, FormValues, InputType};
use crate::error::AppResult;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormState {
    #[serde(skip)]
    initial: FormValues,
    values: FormValues,
    errors: BTreeMap<String, String>,
    loading: bool,
}

impl FormState {
    pub fn new(initial: FormValues) -> Self {
        Self {
            values: initial.clone(),
            initial,
            errors: BTreeMap::new(),
            loading: false,
        }
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Checkboxes store a boolean, file inputs the chosen file, everything
    /// else the raw string. Clears the error of that field only.
    pub fn handle_change(&mut self, event: ChangeEvent) {
        let value = match event.input_type {
            InputType::Checkbox => FieldValue::Bool(event.checked),
            InputType::File => event.file.map(FieldValue::File).unwrap_or(FieldValue::Empty),
            _ => FieldValue::Text(event.value),
        };

        self.errors.remove(&event.name);
        self.values.insert(event.name, value);
    }

    pub fn set_value(&mut self, name: &str, value: FieldValue) {
        self.values.insert(name.to_string(), value);
    }

    /// Replace all values, e.g. to prefill an edit form
    pub fn set_values(&mut self, values: FormValues) {
        self.values = values;
        self.errors.clear();
    }

    pub fn set_errors(&mut self, errors: BTreeMap<String, String>) {
        self.errors = errors;
    }

    /// Run `on_submit` with the current values.
    ///
    /// Field-keyed error bodies become the new error map. The result is
    /// returned unchanged and `loading` is cleared on every path.
    pub async fn handle_submit<F, Fut, T>(&mut self, on_submit: F) -> AppResult<T>
    where
        F: FnOnce(FormValues) -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        self.loading = true;
        self.errors.clear();

        let result = on_submit(self.values.clone()).await;

        if let Err(e) = &result {
            if let Some(errors) = e.field_errors() {
                self.errors = errors;
            }
        }

        self.loading = false;
        result
    }

    pub fn reset(&mut self) {
        self.values = self.initial.clone();
        self.errors.clear();
        self.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use serde_json::json;

    fn form() -> FormState {
        FormState::new(FormValues::from([
            ("name".to_string(), FieldValue::text("")),
            ("is_active".to_string(), FieldValue::Bool(true)),
        ]))
    }

    #[test]
    fn test_checkbox_stores_boolean() {
        let mut form = form();
        form.handle_change(ChangeEvent::checkbox("is_active", false));
        assert_eq!(form.value("is_active"), Some(&FieldValue::Bool(false)));
    }

    #[test]
    fn test_other_inputs_store_raw_string() {
        let mut form = form();
        let mut event = ChangeEvent::text("capacity", "12");
        event.input_type = InputType::Number;
        form.handle_change(event);
        assert_eq!(form.value("capacity"), Some(&FieldValue::text("12")));
    }

    #[test]
    fn test_change_clears_only_that_fields_error() {
        let mut form = form();
        form.set_errors(BTreeMap::from([
            ("name".to_string(), "Required".to_string()),
            ("email".to_string(), "Invalid".to_string()),
        ]));

        form.handle_change(ChangeEvent::text("name", "Piscina"));

        assert!(!form.errors().contains_key("name"));
        assert_eq!(form.errors()["email"], "Invalid");
    }

    #[tokio::test]
    async fn test_submit_maps_body_to_errors() {
        let mut form = form();
        form.handle_change(ChangeEvent::text("name", "x"));

        let result: AppResult<()> = form
            .handle_submit(|values| async move {
                assert_eq!(values["name"], FieldValue::text("x"));
                Err(AppError::Api {
                    status: 400,
                    body: Some(json!({"name": ["Too short."]})),
                })
            })
            .await;

        assert!(result.is_err());
        assert_eq!(form.errors()["name"], "Too short.");
        assert!(!form.is_loading());
    }

    #[tokio::test]
    async fn test_submit_success_clears_errors() {
        let mut form = form();
        form.set_errors(BTreeMap::from([("name".to_string(), "old".to_string())]));

        let value = form.handle_submit(|_| async { Ok(7) }).await.unwrap();

        assert_eq!(value, 7);
        assert!(form.errors().is_empty());
        assert!(!form.is_loading());
    }

    #[test]
    fn test_reset_restores_initial() {
        let mut form = form();
        form.handle_change(ChangeEvent::text("name", "Gimnasio"));
        form.set_errors(BTreeMap::from([("name".to_string(), "bad".to_string())]));

        form.reset();

        assert_eq!(form.value("name"), Some(&FieldValue::text("")));
        assert!(form.errors().is_empty());
    }
}
