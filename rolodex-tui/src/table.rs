//! Sorting and pagination for the contact table.
//!
//! Everything here is a pure projection over the cached contacts. The cache
//! itself is never reordered.

use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions};
use rolodex_core::{Contact, ContactField};
use serde::{Deserialize, Serialize};

/// Any of the six displayed fields can be sorted on.
pub type SortColumn = ContactField;

pub const PAGE_SIZE_OPTIONS: [usize; 3] = [5, 10, 25];
pub const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortState {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            column: ContactField::FirstName,
            direction: SortDirection::Asc,
        }
    }
}

impl SortState {
    /// Clicking the active column flips direction; any other column becomes
    /// active in ascending order.
    pub fn toggle(&mut self, column: SortColumn) {
        if self.column == column {
            self.direction = self.direction.reversed();
        } else {
            self.column = column;
            self.direction = SortDirection::Asc;
        }
    }

    /// Total order over contacts for this column and direction.
    ///
    /// Values compare by root-locale collation first, then by code point,
    /// then by id, so descending is always the exact reverse of ascending.
    pub fn compare(&self, collation: &Collation, a: &Contact, b: &Contact) -> Ordering {
        let left = a.field(self.column);
        let right = b.field(self.column);
        let ordering = collation
            .compare(left, right)
            .then_with(|| left.cmp(right))
            .then_with(|| a.id.cmp(&b.id));
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Locale-aware string ordering for table cells.
///
/// Uses the CLDR root collation, so accented letters sort next to their base
/// letter ("Émile" before "Fred"). Falls back to Unicode lowercase order if
/// the collation data cannot be loaded.
pub struct Collation {
    collator: Option<Collator>,
}

impl Collation {
    pub fn root() -> Self {
        Self {
            collator: Collator::try_new(&Default::default(), CollatorOptions::new()).ok(),
        }
    }

    pub fn compare(&self, left: &str, right: &str) -> Ordering {
        match &self.collator {
            Some(collator) => collator.compare(left, right),
            None => left.to_lowercase().cmp(&right.to_lowercase()),
        }
    }
}

impl Default for Collation {
    fn default() -> Self {
        Self::root()
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("page size must be greater than zero")]
pub struct InvalidPageSize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    pub fn new(page_size: usize) -> Result<Self, InvalidPageSize> {
        let mut pagination = Self::default();
        pagination.set_page_size(page_size)?;
        Ok(pagination)
    }

    /// Zero-based page index.
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Change the page size and go back to the first page.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), InvalidPageSize> {
        if page_size == 0 {
            return Err(InvalidPageSize);
        }
        self.page_size = page_size;
        self.page = 0;
        Ok(())
    }

    /// Step through [`PAGE_SIZE_OPTIONS`], wrapping at the end.
    pub fn cycle_page_size(&mut self) {
        let next = PAGE_SIZE_OPTIONS
            .iter()
            .position(|&size| size == self.page_size)
            .map(|i| PAGE_SIZE_OPTIONS[(i + 1) % PAGE_SIZE_OPTIONS.len()])
            .unwrap_or(DEFAULT_PAGE_SIZE);
        self.page_size = next;
        self.page = 0;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn next_page(&mut self, total: usize) {
        if self.page + 1 < page_count(total, self.page_size) {
            self.page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    /// Pull the page back inside range after the list shrinks.
    pub fn clamp(&mut self, total: usize) {
        let pages = page_count(total, self.page_size);
        if pages == 0 {
            self.page = 0;
        } else if self.page >= pages {
            self.page = pages - 1;
        }
    }
}

pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// All contacts in display order.
pub fn sorted<'a>(contacts: &'a [Contact], sort: &SortState) -> Vec<&'a Contact> {
    let collation = Collation::root();
    let mut rows: Vec<&Contact> = contacts.iter().collect();
    rows.sort_by(|a, b| sort.compare(&collation, a, b));
    rows
}

/// The rows visible on the current page. Out-of-range pages are empty.
pub fn project<'a>(
    contacts: &'a [Contact],
    sort: &SortState,
    pagination: &Pagination,
) -> Vec<&'a Contact> {
    let start = pagination.page.saturating_mul(pagination.page_size);
    sorted(contacts, sort)
        .into_iter()
        .skip(start)
        .take(pagination.page_size)
        .collect()
}
