// src/pages/mod.rs
//
// Headless page view-models
//
// ARCHITECTURE:
// - `tab`: one resource with its store, modal and form
// - `page`: the tabs of one screen, search box and mount scope
// - `catalog`: which tabs and fields each page shows
// - `coerce`: form strings to backend types
//
// The webview renders `PageView` snapshots and sends user actions back as
// commands; no page state lives in the webview.

pub mod catalog;
pub mod coerce;
pub mod confirm;
pub mod filter;
pub mod modal;
pub mod page;
pub mod tab;

pub use coerce::{coerce_values, FieldKind, FieldSpec};
pub use confirm::ConfirmPrompt;
pub use filter::{filter_rows, matches_query};
pub use modal::{ModalMode, ModalState};
pub use page::{Page, PageContext, PageKind, PageView, TabSummary};
pub use tab::{ResourceTab, TabController, TabSpec, TabView};
