// src/lifecycle/mod.rs
//
// Mounted-lifetime tracking for async work
//
// Every request a page starts runs under the page's `MountScope`. Unmounting
// the page resolves pending guarded futures with `AppError::Cancelled`, which
// drops the in-flight request and tells the caller to skip its state update.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct MountScope {
    mounted: Arc<watch::Sender<bool>>,
}

impl MountScope {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(true);
        Self {
            mounted: Arc::new(tx),
        }
    }

    pub fn is_mounted(&self) -> bool {
        *self.mounted.borrow()
    }

    /// Cancel everything running under this scope. Idempotent.
    pub fn unmount(&self) {
        if self.mounted.send_replace(false) {
            log::debug!("scope unmounted");
        }
    }

    /// Drive `future` unless the scope unmounts first.
    ///
    /// A future that completes after unmount still yields `Cancelled`.
    pub async fn guard<T, Fut>(&self, future: Fut) -> AppResult<T>
    where
        Fut: Future<Output = AppResult<T>>,
    {
        if !self.is_mounted() {
            return Err(AppError::Cancelled);
        }

        let mut unmounted = self.mounted.subscribe();

        tokio::select! {
            result = future => {
                if self.is_mounted() {
                    result
                } else {
                    Err(AppError::Cancelled)
                }
            }
            _ = unmounted.wait_for(|mounted| !*mounted) => Err(AppError::Cancelled),
        }
    }
}

impl Default for MountScope {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_guard_passes_result_through_while_mounted() {
        let scope = MountScope::new();
        let value = scope.guard(async { Ok::<_, AppError>(3) }).await.unwrap();
        assert_eq!(value, 3);
    }

    #[tokio::test]
    async fn test_unmount_cancels_pending_future() {
        let scope = MountScope::new();
        let remote = scope.clone();

        let task = tokio::spawn(async move {
            remote
                .guard(async {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    Ok::<_, AppError>(())
                })
                .await
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        scope.unmount();

        let result = tokio::time::timeout(Duration::from_secs(2), task)
            .await
            .expect("guard did not observe unmount")
            .unwrap();
        assert!(matches!(result, Err(AppError::Cancelled)));
    }

    #[tokio::test]
    async fn test_guard_after_unmount_never_runs() {
        let scope = MountScope::new();
        scope.unmount();
        scope.unmount();

        let polled = AtomicBool::new(false);
        let result = scope
            .guard(async {
                polled.store(true, Ordering::SeqCst);
                Ok::<_, AppError>(())
            })
            .await;
        assert!(matches!(result, Err(AppError::Cancelled)));
        assert!(!polled.load(Ordering::SeqCst));
        assert!(!scope.is_mounted());
    }
}
