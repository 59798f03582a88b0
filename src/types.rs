//! Shared types used across the codebase

use serde::{Deserialize, Serialize};

use crate::config::ApiConfig;

/// Resolved skip/limit window for a list query.
///
/// `limit` is clamped to the configured maximum page size; a missing limit
/// falls back to the configured default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub skip: i64,
    pub limit: i64,
}

impl PageRequest {
    pub fn new(skip: i64, limit: i64) -> Self {
        Self {
            skip: skip.max(0),
            limit: limit.max(0),
        }
    }

    pub fn resolve(skip: Option<u32>, limit: Option<u32>, api: &ApiConfig) -> Self {
        let limit = limit
            .map(i64::from)
            .unwrap_or(api.default_page_size)
            .min(api.max_page_size);
        Self::new(skip.map(i64::from).unwrap_or(0), limit)
    }

    /// Window as `usize` bounds for slicing in-memory collections
    pub fn bounds(&self) -> (usize, usize) {
        (self.skip as usize, self.limit as usize)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, 100)
    }
}

/// `?skip=&limit=` query string shared by the plain list endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

impl ListQuery {
    pub fn page(&self, api: &ApiConfig) -> PageRequest {
        PageRequest::resolve(self.skip, self.limit, api)
    }
}

/// A page of results with counting metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, total: i64, request: PageRequest) -> Self {
        let PageRequest { skip, limit } = request;
        let (page, total_pages) = if limit > 0 {
            (skip / limit + 1, (total + limit - 1) / limit)
        } else {
            (1, 1)
        };

        Self {
            data,
            total,
            page,
            page_size: limit,
            total_pages,
        }
    }
}
