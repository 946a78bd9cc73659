// src/pages/modal.rs
//
// Modal state as one tagged value instead of `showModal` + `editingItem`
// booleans, so "open with no mode" cannot be represented.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub enum ModalState<T> {
    Closed,
    Creating,
    Editing(T),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalMode {
    Closed,
    Creating,
    Editing,
}

impl<T> ModalState<T> {
    pub fn is_open(&self) -> bool {
        !matches!(self, ModalState::Closed)
    }

    pub fn editing(&self) -> Option<&T> {
        match self {
            ModalState::Editing(record) => Some(record),
            _ => None,
        }
    }

    pub fn mode(&self) -> ModalMode {
        match self {
            ModalState::Closed => ModalMode::Closed,
            ModalState::Creating => ModalMode::Creating,
            ModalState::Editing(_) => ModalMode::Editing,
        }
    }
}

impl<T> Default for ModalState<T> {
    fn default() -> Self {
        ModalState::Closed
    }
}
