//! List-view state: view mode, page size, and the page-reset rules that hold
//! whenever the user changes a filter, the sort, or the view mode.

use std::str::FromStr;

use crate::pipeline::{clamp_page, page_count, ListQuery, ListRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Table layout.
    #[default]
    List,
    /// Card layout.
    Grid,
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "list" => Ok(Self::List),
            "grid" => Ok(Self::Grid),
            other => Err(format!("unknown view mode '{other}' (list|grid)")),
        }
    }
}

/// Page size for each view mode of one screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSizes {
    pub list: usize,
    pub grid: usize,
}

impl PageSizes {
    #[must_use]
    pub fn for_mode(self, mode: ViewMode) -> usize {
        match mode {
            ViewMode::List => self.list,
            ViewMode::Grid => self.grid,
        }
    }
}

pub const PRODUCT_PAGE_SIZES: PageSizes = PageSizes { list: 6, grid: 8 };
pub const VARIANT_PAGE_SIZES: PageSizes = PageSizes { list: 10, grid: 12 };

/// Query state owned by one list screen.
///
/// Search, status, and sort changes return to the first page. A view-mode
/// change swaps the page size and clamps the page against the last known
/// page count, so the screen never points past its final page.
#[derive(Debug, Clone)]
pub struct ListState<R: ListRecord> {
    query: ListQuery<R>,
    mode: ViewMode,
    sizes: PageSizes,
    /// Result size from the most recent render, used for clamping.
    last_total: usize,
}

impl<R: ListRecord> ListState<R> {
    #[must_use]
    pub fn new(sizes: PageSizes) -> Self {
        let mode = ViewMode::default();
        Self {
            query: ListQuery::new(sizes.for_mode(mode)),
            mode,
            sizes,
            last_total: 0,
        }
    }

    #[must_use]
    pub fn query(&self) -> &ListQuery<R> {
        &self.query
    }

    #[must_use]
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    #[must_use]
    pub fn page(&self) -> usize {
        self.query.page
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.query.page_size
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        if search != self.query.search {
            self.query.search = search;
            self.query.page = 0;
        }
    }

    pub fn set_status(&mut self, status: R::Status) {
        if status != self.query.status {
            self.query.status = status;
            self.query.page = 0;
        }
    }

    /// Changes the search text and status filter without touching the page.
    ///
    /// For remotely sourced lists, where the filter narrows only the rows
    /// of the page already fetched and the server page stays the same.
    pub fn set_local_filter(&mut self, search: impl Into<String>, status: R::Status) {
        self.query.search = search.into();
        self.query.status = status;
    }

    pub fn set_sort(&mut self, sort: R::SortKey) {
        if sort != self.query.sort {
            self.query.sort = sort;
            self.query.page = 0;
        }
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
        self.query.page_size = self.sizes.for_mode(mode).max(1);
        self.query.page = clamp_page(
            self.query.page,
            page_count(self.last_total, self.query.page_size),
        );
    }

    /// Moves to a zero-based page, clamped to the last known page count.
    pub fn set_page(&mut self, page: usize) {
        self.query.page = clamp_page(page, self.page_count());
    }

    /// Records how many items the latest render produced.
    ///
    /// For locally sourced lists this is the filtered count; for remote
    /// lists it is `total_pages * page_size` as reported by the server.
    pub fn observe_total(&mut self, total: usize) {
        self.last_total = total;
        self.query.page = clamp_page(self.query.page, self.page_count());
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        page_count(self.last_total, self.query.page_size)
    }
}
