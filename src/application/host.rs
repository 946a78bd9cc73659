// src/application/host.rs
//
// Mounted pages
//
// RULES:
// - At most one instance per page kind is mounted
// - Mounting again replaces the previous instance and unmounts it
// - Unmounting cancels the page's in-flight requests without waiting for
//   its lock, so a stuck load never blocks navigation

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::api::ServiceFactory;
use crate::error::{AppError, AppResult};
use crate::lifecycle::MountScope;
use crate::notify::Notifier;
use crate::pages::{Page, PageKind, PageView};

pub type SharedPage = Arc<Mutex<Page>>;

struct Mounted {
    scope: MountScope,
    page: SharedPage,
}

pub struct PageHost<F: ServiceFactory> {
    factory: F,
    notifier: Arc<dyn Notifier>,
    page_size: u32,
    pages: std::sync::Mutex<HashMap<PageKind, Mounted>>,
}

impl<F: ServiceFactory> PageHost<F> {
    pub fn new(factory: F, notifier: Arc<dyn Notifier>, page_size: u32) -> Self {
        Self {
            factory,
            notifier,
            page_size,
            pages: std::sync::Mutex::new(HashMap::new()),
        }
    }

    /// Build a fresh page and make it the mounted instance for `kind`
    pub fn mount(&self, kind: PageKind) -> AppResult<(SharedPage, PageView)> {
        let page = Page::build(kind, &self.factory, self.notifier.clone(), self.page_size)?;
        let view = page.view()?;
        let scope = page.scope().clone();
        let page = Arc::new(Mutex::new(page));

        let previous = self.lock_pages().insert(
            kind,
            Mounted {
                scope,
                page: page.clone(),
            },
        );

        if let Some(previous) = previous {
            log::debug!("{:?}: replacing mounted page", kind);
            previous.scope.unmount();
        }

        log::info!("{:?}: mounted", kind);
        Ok((page, view))
    }

    pub fn unmount(&self, kind: PageKind) -> bool {
        match self.lock_pages().remove(&kind) {
            Some(mounted) => {
                mounted.scope.unmount();
                log::info!("{:?}: unmounted", kind);
                true
            }
            None => false,
        }
    }

    pub fn page(&self, kind: PageKind) -> AppResult<SharedPage> {
        self.lock_pages()
            .get(&kind)
            .map(|mounted| mounted.page.clone())
            .ok_or_else(|| AppError::Validation(format!("{} page is not mounted", kind.title())))
    }

    pub fn is_mounted(&self, kind: PageKind) -> bool {
        self.lock_pages().contains_key(&kind)
    }

    fn lock_pages(&self) -> std::sync::MutexGuard<'_, HashMap<PageKind, Mounted>> {
        self.pages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
