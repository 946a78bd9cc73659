// src/notify/mod.rs
//
// Notification layer
//
// - `Notifier` is the capability (success / error / loading / dismiss)
// - `toast` owns the loading-toast discipline shared by every mutation

pub mod notifier;
pub mod toast;

pub use notifier::{
    LogNotifier, NoopNotifier, Notifier, RecordingNotifier, ToastEvent, ToastId, ToastKind,
};
pub use toast::{toast_wrapped, with_toast, LoadingToast, ToastMessages};
