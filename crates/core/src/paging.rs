//! In-memory filtering and pagination over slot inventories.
//!
//! Availability queries fetch an examiner's full slot list and filter and
//! page it here; duty release listings paginate in SQL instead and only
//! reuse the `Pagination` envelope.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::availability::{SlotStatus, TimeSlot};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub pages: u32,
}

impl Pagination {
    pub fn new(total: u64, page: u32, limit: u32) -> Self {
        let pages = if limit == 0 {
            0
        } else {
            total.div_ceil(u64::from(limit)) as u32
        };
        Self {
            total,
            page,
            limit,
            pages,
        }
    }
}

/// Keeps slots inside the inclusive date bounds and matching the exact
/// status, when those filters are supplied.
pub fn filter_slots(
    slots: Vec<TimeSlot>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    status: Option<SlotStatus>,
) -> Vec<TimeSlot> {
    slots
        .into_iter()
        .filter(|slot| start_date.is_none_or(|from| slot.date >= from))
        .filter(|slot| end_date.is_none_or(|to| slot.date <= to))
        .filter(|slot| status.is_none_or(|s| slot.status == s))
        .collect()
}

/// Slices one page out of an already-filtered set and describes the whole
/// set in the returned `Pagination`. Pages are 1-based; a page past the
/// end yields an empty slice, not an error.
pub fn paginate<T>(items: Vec<T>, page: u32, limit: u32) -> (Vec<T>, Pagination) {
    let page = page.max(1);
    let pagination = Pagination::new(items.len() as u64, page, limit);

    let start = (page as usize - 1).saturating_mul(limit as usize);
    let page_items = items
        .into_iter()
        .skip(start)
        .take(limit as usize)
        .collect();

    (page_items, pagination)
}
