// src/api/envelope.rs
//
// List request parameters and list response shapes.

use serde::Deserialize;

/// Ordered query parameters for a list request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pairs: Vec<(String, String)>,
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_size(self, size: u32) -> Self {
        self.with("page_size", size.to_string())
    }

    pub fn page(self, page: u32) -> Self {
        self.with("page", page.to_string())
    }

    pub fn search(self, query: &str) -> Self {
        self.with("search", query)
    }

    /// Set `key`, replacing an earlier value
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key.to_string(), value)),
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(|v| v.parse().ok())
    }

    pub fn as_query(&self) -> &[(String, String)] {
        &self.pairs
    }
}

/// Paginated list wrapper
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PageEnvelope<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub offset: Option<u64>,
}

/// List endpoints answer either a bare array or a page envelope
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Page(PageEnvelope<T>),
    Bare(Vec<T>),
}

impl<T> ListResponse<T> {
    pub fn items(&self) -> &[T] {
        match self {
            ListResponse::Page(page) => &page.results,
            ListResponse::Bare(items) => items,
        }
    }

    pub fn into_items(self) -> Vec<T> {
        match self {
            ListResponse::Page(page) => page.results,
            ListResponse::Bare(items) => items,
        }
    }
}
