//! The Variant List screen: server-paged rows plus local filtering and the
//! inline stock editor.
//!
//! Sorting and paging happen on the server. Search and the stock filter
//! run locally over the rows of the fetched page only, so a filtered page
//! can show fewer rows than the page size.

use backoffice_core::{
    filter, BatchEditor, ListState, StockFilter, StockNotice, VariantRow, VariantSortKey,
    VariantTable, ViewMode, VARIANT_PAGE_SIZES,
};

use crate::client::AdminClient;
use crate::error::ClientError;

#[derive(Debug)]
pub struct VariantListScreen {
    state: ListState<VariantRow>,
    table: VariantTable,
    total_pages: usize,
}

impl Default for VariantListScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl VariantListScreen {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: ListState::new(VARIANT_PAGE_SIZES),
            table: VariantTable::default(),
            total_pages: 1,
        }
    }

    #[must_use]
    pub fn state(&self) -> &ListState<VariantRow> {
        &self.state
    }

    /// Narrows the fetched page. The server page is unchanged, so the page
    /// index stays where it is and no fetch is needed.
    pub fn set_filter(&mut self, search: impl Into<String>, status: StockFilter) {
        self.state.set_local_filter(search, status);
    }

    /// Changes the server sort and returns to the first page. Call
    /// [`Self::refresh`] afterwards.
    pub fn set_sort(&mut self, sort: VariantSortKey) {
        self.state.set_sort(sort);
    }

    /// Moves to a zero-based server page, clamped to the known page count.
    /// Call [`Self::refresh`] afterwards.
    pub fn set_page(&mut self, page: usize) {
        self.state.set_page(page);
    }

    /// Switches the layout and its page size. Call [`Self::refresh`]
    /// afterwards.
    pub fn set_mode(&mut self, mode: ViewMode) {
        self.state.set_mode(mode);
    }

    #[must_use]
    pub fn table(&self) -> &VariantTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut VariantTable {
        &mut self.table
    }

    /// Page count reported by the last successful fetch.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Fetches the current page with the current sort and replaces the rows.
    ///
    /// An inline edit that is mid-save survives the refresh; an idle one
    /// whose row disappeared is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the fetch fails; the previous rows stay.
    pub async fn refresh(&mut self, client: &AdminClient) -> Result<(), ClientError> {
        let query = self.state.query();
        let page = client
            .list_variants(query.page, query.page_size, query.sort)
            .await?;

        tracing::debug!(
            page = self.state.page(),
            rows = page.content.len(),
            total_pages = page.total_pages,
            "variant page fetched"
        );

        self.total_pages = page.total_pages.max(1);
        self.table.replace_rows(page.content);
        self.state
            .observe_total(self.total_pages * self.state.page_size());
        Ok(())
    }

    /// Rows of the fetched page that pass the search and stock filter, in
    /// server order.
    #[must_use]
    pub fn visible(&self) -> Vec<&VariantRow> {
        let query = self.state.query();
        filter(self.table.rows(), &query.search, query.status)
    }

    /// Saves the active inline edit.
    ///
    /// # Errors
    ///
    /// See [`AdminClient::commit_stock_edit`].
    pub async fn commit_edit(
        &mut self,
        client: &AdminClient,
    ) -> Result<Option<StockNotice>, ClientError> {
        client.commit_stock_edit(&mut self.table).await
    }

    /// Saves a batch editor opened from this screen and, on success,
    /// re-fetches the current page so the rows show the new stocks.
    ///
    /// A saved batch returns `Ok(true)` even if the re-fetch fails; the
    /// failure is logged and the previous rows stay until the next refresh.
    ///
    /// # Errors
    ///
    /// Returns the [`ClientError`] of the failed save.
    pub async fn commit_batch(
        &mut self,
        client: &AdminClient,
        editor: &mut BatchEditor,
    ) -> Result<bool, ClientError> {
        let saved = client.commit_batch(editor).await?;
        if saved {
            if let Err(e) = self.refresh(client).await {
                tracing::warn!(
                    product_id = editor.product_id(),
                    error = %e,
                    "batch saved but variant page refresh failed"
                );
            }
        }
        Ok(saved)
    }
}
