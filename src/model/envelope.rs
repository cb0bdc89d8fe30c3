//! Strapi response and request envelopes.

use serde::{Deserialize, Serialize};

/// `{data: [...], meta: {pagination: {...}}}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: ListMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListMeta {
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub page_count: u32,
    pub total: u32,
}

impl Pagination {
    pub fn has_next(&self) -> bool {
        self.page < self.page_count
    }
}

/// `{data: {...}, meta: {}}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SingleResponse<T> {
    pub data: T,
}

/// Request body wrapper: every create/update is sent as `{data: {...}}`.
#[derive(Debug, Clone, Serialize)]
pub struct DataWrapper<T> {
    pub data: T,
}

impl<T> DataWrapper<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}
