// src/notify/toast.rs
//
// Loading-toast lifecycle
//
// RULES:
// - A loading toast is always dismissed before the terminal toast appears
// - Dismissal happens on every exit path, including drop
// - Errors are surfaced, then handed back to the caller unchanged

use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;

use super::notifier::{Notifier, ToastId};
use crate::error::AppResult;

/// Message templates for one wrapped operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastMessages {
    pub loading: String,
    pub success: String,
    pub error: String,
}

impl ToastMessages {
    pub fn new(
        loading: impl Into<String>,
        success: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            loading: loading.into(),
            success: success.into(),
            error: error.into(),
        }
    }

    pub fn create(entity: &str) -> Self {
        Self::new(
            format!("Creating {}...", entity),
            format!("{} created successfully", entity),
            format!("Error creating {}", entity),
        )
    }

    pub fn update(entity: &str) -> Self {
        Self::new(
            format!("Updating {}...", entity),
            format!("{} updated successfully", entity),
            format!("Error updating {}", entity),
        )
    }

    pub fn delete(entity: &str) -> Self {
        Self::new(
            format!("Deleting {}...", entity),
            format!("{} deleted successfully", entity),
            format!("Error deleting {}", entity),
        )
    }
}

/// Handle to a visible loading toast.
pub struct LoadingToast {
    notifier: Arc<dyn Notifier>,
    id: Option<ToastId>,
}

impl LoadingToast {
    pub fn show(notifier: Arc<dyn Notifier>, message: &str) -> Self {
        let id = notifier.loading(message);
        Self {
            notifier,
            id: Some(id),
        }
    }

    pub fn succeed(mut self, message: &str) {
        self.dismiss();
        self.notifier.success(message);
    }

    pub fn fail(mut self, message: &str) {
        self.dismiss();
        self.notifier.error(message);
    }

    /// Dismiss without a terminal toast
    pub fn cancel(mut self) {
        self.dismiss();
    }

    fn dismiss(&mut self) {
        if let Some(id) = self.id.take() {
            self.notifier.dismiss(id);
        }
    }
}

impl Drop for LoadingToast {
    fn drop(&mut self) {
        self.dismiss();
    }
}

/// Run one operation inside the loading → success/error lifecycle.
pub async fn toast_wrapped<T, Fut>(
    notifier: Arc<dyn Notifier>,
    messages: &ToastMessages,
    operation: Fut,
) -> AppResult<T>
where
    Fut: Future<Output = AppResult<T>>,
{
    let toast = LoadingToast::show(notifier, &messages.loading);

    match operation.await {
        Ok(value) => {
            toast.succeed(&messages.success);
            Ok(value)
        }
        Err(e) if e.is_cancelled() => {
            toast.cancel();
            Err(e)
        }
        Err(e) => {
            log::warn!("{}: {}", messages.error, e);
            toast.fail(&e.user_message(&messages.error));
            Err(e)
        }
    }
}

/// Decorate an async function with the toast lifecycle.
///
/// The returned function takes the same argument and resolves to the same
/// result; only the notifications are added.
pub fn with_toast<A, T, F, Fut>(
    notifier: Arc<dyn Notifier>,
    messages: ToastMessages,
    operation: F,
) -> impl Fn(A) -> BoxFuture<'static, AppResult<T>>
where
    F: Fn(A) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = AppResult<T>> + Send + 'static,
    T: Send + 'static,
{
    let messages = Arc::new(messages);

    move |args: A| {
        let future = operation(args);
        let notifier = notifier.clone();
        let messages = messages.clone();

        Box::pin(async move { toast_wrapped(notifier, &messages, future).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::notify::{RecordingNotifier, ToastEvent, ToastKind};
    use serde_json::json;

    fn recorder() -> (Arc<RecordingNotifier>, Arc<dyn Notifier>) {
        let recording = Arc::new(RecordingNotifier::new());
        let notifier: Arc<dyn Notifier> = recording.clone();
        (recording, notifier)
    }

    #[tokio::test]
    async fn test_success_dismisses_before_success_toast() {
        let (recording, notifier) = recorder();
        let messages = ToastMessages::create("Notice");

        let value = toast_wrapped(notifier, &messages, async { Ok::<_, AppError>(5) })
            .await
            .unwrap();

        assert_eq!(value, 5);
        let events = recording.events();
        assert_eq!(events.len(), 3);
        let ToastEvent::Shown { id: loading_id, kind: ToastKind::Loading, .. } = events[0].clone()
        else {
            panic!("expected loading toast first");
        };
        assert_eq!(events[1], ToastEvent::Dismissed { id: loading_id });
        assert!(matches!(
            &events[2],
            ToastEvent::Shown { kind: ToastKind::Success, message, .. } if message == "Notice created successfully"
        ));
    }

    #[tokio::test]
    async fn test_error_prefers_server_detail_and_rethrows() {
        let (recording, notifier) = recorder();
        let messages = ToastMessages::delete("Unit");

        let result: AppResult<()> = toast_wrapped(notifier, &messages, async {
            Err(AppError::Api {
                status: 409,
                body: Some(json!({"detail": "Unit has pending charges"})),
            })
        })
        .await;

        assert!(matches!(result, Err(AppError::Api { status: 409, .. })));
        assert_eq!(recording.messages(ToastKind::Error), vec!["Unit has pending charges"]);
        assert!(recording.pending_loading().is_empty());
        assert_eq!(recording.shown(ToastKind::Success), 0);
    }

    #[tokio::test]
    async fn test_error_without_body_uses_template() {
        let (recording, notifier) = recorder();
        let messages = ToastMessages::update("Fine");

        let _ = toast_wrapped(notifier, &messages, async { Err::<(), _>(AppError::NotFound) }).await;

        assert_eq!(recording.messages(ToastKind::Error), vec!["Error updating Fine"]);
    }

    #[tokio::test]
    async fn test_cancelled_operation_only_dismisses() {
        let (recording, notifier) = recorder();
        let messages = ToastMessages::create("Asset");

        let _ = toast_wrapped(notifier, &messages, async { Err::<(), _>(AppError::Cancelled) }).await;

        assert_eq!(recording.shown(ToastKind::Error), 0);
        assert_eq!(recording.shown(ToastKind::Success), 0);
        assert!(recording.pending_loading().is_empty());
    }

    #[tokio::test]
    async fn test_with_toast_keeps_signature() {
        let (recording, notifier) = recorder();
        let double = with_toast(
            notifier,
            ToastMessages::new("Working", "Done", "Failed"),
            |n: i32| async move { Ok::<_, AppError>(n * 2) },
        );

        assert_eq!(double(4).await.unwrap(), 8);
        assert_eq!(double(5).await.unwrap(), 10);
        assert_eq!(recording.messages(ToastKind::Success), vec!["Done", "Done"]);
    }

    #[test]
    fn test_dropped_handle_dismisses() {
        let (recording, notifier) = recorder();
        {
            let _toast = LoadingToast::show(notifier, "Loading");
        }
        assert!(recording.pending_loading().is_empty());
        assert_eq!(recording.dismissed().len(), 1);
    }
}
