// src/application/commands/page_commands.rs
//
// Page Command Handlers
//
// Every mutating command answers with the fresh `PageView`, so the webview
// repaints from one snapshot instead of patching its own copy. Loads hold the
// page lock until every tab answers, so they emit a loading snapshot first.

use serde::Serialize;
use tauri::{AppHandle, Emitter, State};

use crate::application::dto::PAGE_VIEW_EVENT;
use crate::application::error_handling::ToErrorResponse;
use crate::application::state::AppState;
use crate::domain::EntityId;
use crate::error::AppResult;
use crate::form::ChangeEvent;
use crate::pages::{Page, PageKind, PageView};

#[derive(Debug, Clone, Serialize)]
pub struct PageEntry {
    pub kind: PageKind,
    pub title: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct AppInfo {
    pub api_root: String,
    pub pages: Vec<PageEntry>,
}

/// Backend location and navigation entries
#[tauri::command]
pub fn app_info(state: State<'_, AppState>) -> AppInfo {
    AppInfo {
        api_root: state.config.api_root(),
        pages: PageKind::ALL
            .iter()
            .map(|kind| PageEntry {
                kind: *kind,
                title: kind.title(),
            })
            .collect(),
    }
}

async fn load_page(page: &mut Page, app: &AppHandle) -> AppResult<()> {
    let snapshot = page.begin_load()?;
    if let Err(e) = app.emit(PAGE_VIEW_EVENT, &snapshot) {
        log::warn!("Failed to emit {}: {}", PAGE_VIEW_EVENT, e);
    }

    page.load().await
}

/// Mount a page and load all of its tabs
#[tauri::command]
pub async fn page_mount(
    kind: PageKind,
    app: AppHandle,
    state: State<'_, AppState>,
) -> Result<PageView, String> {
    let (page, _) = state.host.mount(kind).to_error_response()?;
    let mut page = page.lock().await;

    match load_page(&mut page, &app).await {
        Err(e) if e.is_cancelled() => Err(e).to_error_response(),
        // Already toasted; the page still renders with what it has
        Err(e) => {
            log::warn!("{:?}: initial load failed: {}", kind, e);
            page.view().to_error_response()
        }
        Ok(()) => page.view().to_error_response(),
    }
}

#[tauri::command]
pub fn page_unmount(kind: PageKind, state: State<'_, AppState>) -> bool {
    state.host.unmount(kind)
}

/// Reload every tab of a mounted page
#[tauri::command]
pub async fn page_load(
    kind: PageKind,
    app: AppHandle,
    state: State<'_, AppState>,
) -> Result<PageView, String> {
    let page = state.host.page(kind).to_error_response()?;
    let mut page = page.lock().await;

    let result: AppResult<PageView> = async {
        load_page(&mut page, &app).await?;
        page.view()
    }
    .await;
    result.to_error_response()
}

#[tauri::command]
pub async fn page_view(kind: PageKind, state: State<'_, AppState>) -> Result<PageView, String> {
    let page = state.host.page(kind).to_error_response()?;
    let page = page.lock().await;
    page.view().to_error_response()
}

#[tauri::command]
pub async fn page_set_tab(
    kind: PageKind,
    tab: String,
    state: State<'_, AppState>,
) -> Result<PageView, String> {
    let page = state.host.page(kind).to_error_response()?;
    let mut page = page.lock().await;

    page.set_tab(&tab)
        .and_then(|_| page.view())
        .to_error_response()
}

#[tauri::command]
pub async fn page_search(
    kind: PageKind,
    query: String,
    state: State<'_, AppState>,
) -> Result<PageView, String> {
    let page = state.host.page(kind).to_error_response()?;
    let mut page = page.lock().await;

    page.search(&query);
    page.view().to_error_response()
}

#[tauri::command]
pub async fn page_open_create(kind: PageKind, state: State<'_, AppState>) -> Result<PageView, String> {
    let page = state.host.page(kind).to_error_response()?;
    let mut page = page.lock().await;

    page.open_create();
    page.view().to_error_response()
}

#[tauri::command]
pub async fn page_open_edit(
    kind: PageKind,
    id: EntityId,
    state: State<'_, AppState>,
) -> Result<PageView, String> {
    let page = state.host.page(kind).to_error_response()?;
    let mut page = page.lock().await;

    page.open_edit(id)
        .and_then(|_| page.view())
        .to_error_response()
}

#[tauri::command]
pub async fn page_close_modal(kind: PageKind, state: State<'_, AppState>) -> Result<PageView, String> {
    let page = state.host.page(kind).to_error_response()?;
    let mut page = page.lock().await;

    page.close_modal();
    page.view().to_error_response()
}

#[tauri::command]
pub async fn page_change_field(
    kind: PageKind,
    event: ChangeEvent,
    state: State<'_, AppState>,
) -> Result<PageView, String> {
    let page = state.host.page(kind).to_error_response()?;
    let mut page = page.lock().await;

    page.change(event);
    page.view().to_error_response()
}

/// Submit the open form. Field errors come back inside the view as well as
/// in the error response.
#[tauri::command]
pub async fn page_submit(kind: PageKind, state: State<'_, AppState>) -> Result<PageView, String> {
    let page = state.host.page(kind).to_error_response()?;
    let mut page = page.lock().await;

    let result: AppResult<PageView> = async {
        page.submit().await?;
        page.view()
    }
    .await;
    result.to_error_response()
}

/// Delete after confirmation. A declined confirmation is not an error.
#[tauri::command]
pub async fn page_delete(
    kind: PageKind,
    id: EntityId,
    state: State<'_, AppState>,
) -> Result<PageView, String> {
    let page = state.host.page(kind).to_error_response()?;
    let mut page = page.lock().await;

    let result: AppResult<PageView> = async {
        page.delete(id, state.confirm.as_ref()).await?;
        page.view()
    }
    .await;
    result.to_error_response()
}
