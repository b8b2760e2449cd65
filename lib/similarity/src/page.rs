//! Pagination and dedup
//!
//! Similarity decides which rows land on a page; popularity decides the order
//! they are shown in.

use ahash::AHashSet;
use platewise_core::RestaurantRecord;
use serde::Serialize;

/// Number of results per page unless configured otherwise
pub const DEFAULT_PAGE_SIZE: usize = 4;

/// One page of similarity results
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Page<'a> {
    /// 1-based page number actually served
    pub number: usize,
    pub page_size: usize,
    /// Rows in the ranked view before slicing
    pub total_candidates: usize,
    /// Deduplicated rows, votes descending
    pub items: Vec<&'a RestaurantRecord>,
}

impl<'a> Page<'a> {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Slice page `page` (1-based) out of `ordered`.
///
/// Page 0 is served as page 1. A slice past the end is empty.
pub fn paginate<T>(ordered: &[T], page: usize, page_size: usize) -> &[T] {
    let page = page.max(1);
    let start = (page - 1).saturating_mul(page_size);
    if start >= ordered.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(ordered.len());
    &ordered[start..end]
}

/// Keep the first row for each name, then order by votes descending.
///
/// Rows with equal votes keep their incoming (similarity) order.
pub fn dedup_and_sort<'a>(rows: &[&'a RestaurantRecord]) -> Vec<&'a RestaurantRecord> {
    let mut seen: AHashSet<&'a str> = AHashSet::with_capacity(rows.len());
    let mut kept: Vec<&'a RestaurantRecord> = Vec::with_capacity(rows.len());
    for &record in rows {
        if seen.insert(record.name.as_str()) {
            kept.push(record);
        }
    }

    kept.sort_by(|a, b| b.votes.cmp(&a.votes));
    kept
}
