// src/pages/page.rs
//
// A backoffice page: a fixed set of resource tabs sharing one search box
// and one mount scope.
//
// RULES:
// - `load` fetches every tab concurrently and fails as a whole
// - Only the active tab may hold an open modal
// - Unmounting cancels whatever the tabs are still waiting on

use std::sync::Arc;

use futures::future::try_join_all;
use serde::{Deserialize, Serialize};

use crate::api::{ListParams, ServiceFactory};
use crate::crud::CrudStore;
use crate::domain::{EntityId, Resource};
use crate::error::{AppError, AppResult};
use crate::form::ChangeEvent;
use crate::lifecycle::MountScope;
use crate::notify::Notifier;

use super::catalog;
use super::coerce::FieldSpec;
use super::confirm::ConfirmPrompt;
use super::tab::{ResourceTab, TabController, TabSpec, TabView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    Users,
    Structure,
    Finance,
    Amenities,
    Maintenance,
    Security,
    Notices,
}

impl PageKind {
    pub const ALL: [PageKind; 7] = [
        PageKind::Users,
        PageKind::Structure,
        PageKind::Finance,
        PageKind::Amenities,
        PageKind::Maintenance,
        PageKind::Security,
        PageKind::Notices,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            PageKind::Users => "Users & Roles",
            PageKind::Structure => "Structure",
            PageKind::Finance => "Finance",
            PageKind::Amenities => "Amenities",
            PageKind::Maintenance => "Maintenance",
            PageKind::Security => "Security",
            PageKind::Notices => "Notices",
        }
    }
}

/// What a page needs to build its tabs
pub struct PageContext<'a, F: ServiceFactory> {
    pub factory: &'a F,
    pub notifier: Arc<dyn Notifier>,
    pub scope: MountScope,
    pub page_size: u32,
}

impl<F: ServiceFactory> PageContext<'_, F> {
    pub fn tab<T: Resource>(
        &self,
        key: &'static str,
        title: &'static str,
        fields: Vec<FieldSpec>,
    ) -> Box<dyn TabController> {
        let store = CrudStore::new(
            self.factory.service::<T>(),
            self.notifier.clone(),
            self.scope.clone(),
        );
        let params = ListParams::new().page_size(self.page_size);

        Box::new(ResourceTab::new(TabSpec { key, title, fields }, store, params))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabSummary {
    pub key: String,
    pub title: String,
}

/// Serializable snapshot of the whole page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    pub kind: PageKind,
    pub title: String,
    pub tabs: Vec<TabSummary>,
    pub query: String,
    pub loading: bool,
    pub active: TabView,
}

pub struct Page {
    kind: PageKind,
    tabs: Vec<Box<dyn TabController>>,
    active: usize,
    query: String,
    loading: bool,
    scope: MountScope,
}

impl Page {
    pub fn new(kind: PageKind, tabs: Vec<Box<dyn TabController>>, scope: MountScope) -> AppResult<Self> {
        if tabs.is_empty() {
            return Err(AppError::Other(format!("{:?} page has no tabs", kind)));
        }

        Ok(Self {
            kind,
            tabs,
            active: 0,
            query: String::new(),
            loading: false,
            scope,
        })
    }

    /// Build the page for `kind` under a fresh mount scope
    pub fn build<F: ServiceFactory>(
        kind: PageKind,
        factory: &F,
        notifier: Arc<dyn Notifier>,
        page_size: u32,
    ) -> AppResult<Self> {
        let ctx = PageContext {
            factory,
            notifier,
            scope: MountScope::new(),
            page_size,
        };
        let tabs = catalog::tabs(kind, &ctx);
        Self::new(kind, tabs, ctx.scope)
    }

    pub fn kind(&self) -> PageKind {
        self.kind
    }

    pub fn scope(&self) -> &MountScope {
        &self.scope
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn active_key(&self) -> &'static str {
        self.tabs[self.active].key()
    }

    pub fn tab_keys(&self) -> Vec<&'static str> {
        self.tabs.iter().map(|tab| tab.key()).collect()
    }

    fn active_tab(&mut self) -> &mut dyn TabController {
        self.tabs[self.active].as_mut()
    }

    /// Mark the page loading and return the snapshot to paint meanwhile
    pub fn begin_load(&mut self) -> AppResult<PageView> {
        self.loading = true;
        self.view()
    }

    pub async fn load(&mut self) -> AppResult<()> {
        self.loading = true;
        log::debug!("{:?}: loading {} tabs", self.kind, self.tabs.len());

        let result = try_join_all(self.tabs.iter_mut().map(|tab| tab.load())).await;

        self.loading = false;
        result.map(|_| ())
    }

    /// Switch tabs. Any open modal is closed first.
    pub fn set_tab(&mut self, key: &str) -> AppResult<()> {
        let index = self
            .tabs
            .iter()
            .position(|tab| tab.key() == key)
            .ok_or_else(|| AppError::Validation(format!("Unknown tab '{}'", key)))?;

        if index != self.active {
            self.close_modal();
            self.active = index;
        }
        Ok(())
    }

    pub fn search(&mut self, query: &str) {
        self.query = query.to_string();
    }

    /// Ids of the active tab's rows matching the current query
    pub fn rows(&self) -> Vec<EntityId> {
        self.tabs[self.active].rows(&self.query)
    }

    pub fn open_create(&mut self) {
        self.close_modal();
        self.active_tab().open_create();
    }

    pub fn open_edit(&mut self, id: EntityId) -> AppResult<()> {
        self.close_modal();
        self.active_tab().open_edit(id)
    }

    pub fn close_modal(&mut self) {
        for tab in self.tabs.iter_mut().filter(|tab| tab.is_modal_open()) {
            tab.close_modal();
        }
    }

    pub fn change(&mut self, event: ChangeEvent) {
        self.active_tab().change(event);
    }

    pub async fn submit(&mut self) -> AppResult<()> {
        self.active_tab().submit().await
    }

    pub async fn delete(&mut self, id: EntityId, confirm: &dyn ConfirmPrompt) -> AppResult<bool> {
        self.active_tab().delete(id, confirm).await
    }

    pub fn view(&self) -> AppResult<PageView> {
        Ok(PageView {
            kind: self.kind,
            title: self.kind.title().to_string(),
            tabs: self
                .tabs
                .iter()
                .map(|tab| TabSummary {
                    key: tab.key().to_string(),
                    title: tab.title().to_string(),
                })
                .collect(),
            query: self.query.clone(),
            loading: self.loading,
            active: self.tabs[self.active].view(&self.query)?,
        })
    }

    pub fn unmount(&self) {
        log::debug!("{:?}: unmounted", self.kind);
        self.scope.unmount();
    }
}
