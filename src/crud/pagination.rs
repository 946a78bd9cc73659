// src/crud/pagination.rs
use serde::Serialize;

use crate::api::{ListParams, PageEnvelope};

/// Pagination metadata derived from a page envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub count: u64,
    /// 1-based
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl Pagination {
    /// Page size comes from the envelope's `limit`, else the requested
    /// `page_size`, else the number of returned rows. The page number comes
    /// from `offset`, else the requested `page`.
    pub fn from_envelope<T>(envelope: &PageEnvelope<T>, params: &ListParams) -> Self {
        let returned = envelope.results.len() as u64;

        let page_size = envelope
            .limit
            .or_else(|| params.get_u64("page_size"))
            .unwrap_or(returned)
            .max(1);

        let count = envelope.count.unwrap_or(returned);

        let page = match envelope.offset {
            Some(offset) => offset / page_size + 1,
            None => params.get_u64("page").unwrap_or(1).max(1),
        };

        let total_pages = count.div_ceil(page_size);

        Self {
            count,
            page,
            page_size,
            total_pages,
            has_next: envelope.next.is_some() || page < total_pages,
            has_previous: envelope.previous.is_some() || page > 1,
        }
    }
}
