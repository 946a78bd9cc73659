// src/notify/notifier.rs
//
// Toast notifications as an injected capability
//
// Components never reach for a global toast system. They receive an
// `Arc<dyn Notifier>` so tests can substitute a recording implementation.

use std::sync::Mutex;

use serde::Serialize;
use uuid::Uuid;

pub type ToastId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    Success,
    Error,
    Loading,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToastEvent {
    Shown {
        id: ToastId,
        kind: ToastKind,
        message: String,
    },
    Dismissed {
        id: ToastId,
    },
}

pub trait Notifier: Send + Sync {
    fn success(&self, message: &str) -> ToastId;
    fn error(&self, message: &str) -> ToastId;
    fn loading(&self, message: &str) -> ToastId;
    fn dismiss(&self, id: ToastId);
}

/// Discards every notification
#[derive(Debug, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn success(&self, _message: &str) -> ToastId {
        Uuid::new_v4()
    }

    fn error(&self, _message: &str) -> ToastId {
        Uuid::new_v4()
    }

    fn loading(&self, _message: &str) -> ToastId {
        Uuid::new_v4()
    }

    fn dismiss(&self, _id: ToastId) {}
}

/// Writes notifications to the log instead of a UI
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn success(&self, message: &str) -> ToastId {
        log::info!("toast success: {}", message);
        Uuid::new_v4()
    }

    fn error(&self, message: &str) -> ToastId {
        log::warn!("toast error: {}", message);
        Uuid::new_v4()
    }

    fn loading(&self, message: &str) -> ToastId {
        let id = Uuid::new_v4();
        log::debug!("toast loading {}: {}", id, message);
        id
    }

    fn dismiss(&self, id: ToastId) {
        log::debug!("toast dismissed {}", id);
    }
}

/// Keeps every notification in order, for assertions
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<ToastEvent>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ToastEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Number of toasts of `kind` that were shown
    pub fn shown(&self, kind: ToastKind) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ToastEvent::Shown { kind: k, .. } if *k == kind))
            .count()
    }

    pub fn messages(&self, kind: ToastKind) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ToastEvent::Shown { kind: k, message, .. } if k == kind => Some(message),
                _ => None,
            })
            .collect()
    }

    pub fn dismissed(&self) -> Vec<ToastId> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ToastEvent::Dismissed { id } => Some(id),
                _ => None,
            })
            .collect()
    }

    /// Loading toasts that were shown and never dismissed
    pub fn pending_loading(&self) -> Vec<ToastId> {
        let dismissed = self.dismissed();
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ToastEvent::Shown {
                    id,
                    kind: ToastKind::Loading,
                    ..
                } if !dismissed.contains(&id) => Some(id),
                _ => None,
            })
            .collect()
    }

    fn push(&self, kind: ToastKind, message: &str) -> ToastId {
        let id = Uuid::new_v4();
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(ToastEvent::Shown {
                id,
                kind,
                message: message.to_string(),
            });
        id
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) -> ToastId {
        self.push(ToastKind::Success, message)
    }

    fn error(&self, message: &str) -> ToastId {
        self.push(ToastKind::Error, message)
    }

    fn loading(&self, message: &str) -> ToastId {
        self.push(ToastKind::Loading, message)
    }

    fn dismiss(&self, id: ToastId) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(ToastEvent::Dismissed { id });
    }
}
