use backoffice_core::{
    BatchEditor, BatchStockUpdate, ProductVariant, StockNotice, VariantSortKey, VariantTable,
};
use reqwest::Method;

use super::AdminClient;
use crate::error::ClientError;
use crate::types::{ProductVariantsResponse, StockBody, VariantPage};

impl AdminClient {
    /// Fetches one server-side page of variants (`page` is zero-based).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on network failure, non-2xx status, or an
    /// unexpected body shape.
    pub async fn list_variants(
        &self,
        page: usize,
        size: usize,
        sort: VariantSortKey,
    ) -> Result<VariantPage, ClientError> {
        let sort = sort.to_param().to_string();
        let url = self.endpoint_with_query(
            "wholesaler/products/variants",
            &[
                ("page", &page.to_string()),
                ("size", &size.to_string()),
                ("sort", &sort),
            ],
        )?;
        let builder = self.request(Method::GET, url.clone());
        Self::send_json(builder, &url, &format!("variants(page={page}, sort={sort})")).await
    }

    /// Sets the stock of one variant.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on network failure or non-2xx status.
    pub async fn update_variant_stock(
        &self,
        product_id: i64,
        variant_id: i64,
        stock: u32,
    ) -> Result<(), ClientError> {
        let url = self.endpoint(&format!(
            "wholesaler/products/{product_id}/variants/{variant_id}"
        ))?;
        let builder = self
            .request(Method::PATCH, url.clone())
            .json(&StockBody { stock });
        Self::send_empty(builder, &url).await
    }

    /// Fetches every variant of one product.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on network failure, non-2xx status, or an
    /// unexpected body shape.
    pub async fn product_variants(
        &self,
        product_id: i64,
    ) -> Result<Vec<ProductVariant>, ClientError> {
        let url = self.endpoint(&format!("wholesaler/products/{product_id}/variants"))?;
        let builder = self.request(Method::GET, url.clone());
        let body: ProductVariantsResponse =
            Self::send_json(builder, &url, &format!("variants(product={product_id})")).await?;
        Ok(body.prod_variants)
    }

    /// Replaces the stock of every variant of one product in one request.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on network failure or non-2xx status.
    pub async fn update_product_stocks(
        &self,
        product_id: i64,
        update: &BatchStockUpdate,
    ) -> Result<(), ClientError> {
        let url = self.endpoint(&format!("wholesaler/products/{product_id}/variants"))?;
        let builder = self.request(Method::PATCH, url.clone()).json(update);
        Self::send_empty(builder, &url).await
    }

    /// Fetches a product's variants and opens a batch editor over them.
    ///
    /// # Errors
    ///
    /// Same as [`AdminClient::product_variants`].
    pub async fn open_batch_editor(&self, product_id: i64) -> Result<BatchEditor, ClientError> {
        let variants = self.product_variants(product_id).await?;
        tracing::debug!(product_id, count = variants.len(), "opened batch editor");
        Ok(BatchEditor::new(product_id, variants))
    }

    /// Saves the table's active inline edit, if there is one to save.
    ///
    /// Returns `Ok(None)` only when nothing was sent: no session, no value
    /// entered yet, or a save already in flight. A confirmed save always
    /// yields a notice; its `previous` is `None` if the row left the table
    /// meanwhile. On failure the session stays open in the failed phase with
    /// its pending value, and the error is also returned.
    ///
    /// # Errors
    ///
    /// Returns the [`ClientError`] of the failed update.
    pub async fn commit_stock_edit(
        &self,
        table: &mut VariantTable,
    ) -> Result<Option<StockNotice>, ClientError> {
        let Some(commit) = table.begin_save() else {
            return Ok(None);
        };

        match self
            .update_variant_stock(commit.product_id, commit.variant_id, commit.stock)
            .await
        {
            Ok(()) => {
                let notice = table.finish_save(Ok(()));
                if let Some(notice) = &notice {
                    tracing::info!(
                        variant_id = notice.variant_id,
                        previous = notice.previous,
                        stock = notice.stock,
                        "variant stock updated"
                    );
                }
                Ok(notice)
            }
            Err(e) => {
                tracing::warn!(
                    variant_id = commit.variant_id,
                    error = %e,
                    "variant stock update failed"
                );
                table.finish_save(Err(e.to_string()));
                Err(e)
            }
        }
    }

    /// Saves a batch editor's pending stocks.
    ///
    /// Returns `Ok(false)` when the editor is not in a savable phase. On
    /// success the editor closes; on failure it stays open with the error.
    ///
    /// # Errors
    ///
    /// Returns the [`ClientError`] of the failed update.
    pub async fn commit_batch(&self, editor: &mut BatchEditor) -> Result<bool, ClientError> {
        let Some(update) = editor.begin_save() else {
            return Ok(false);
        };
        let product_id = editor.product_id();
        let changed = editor.changed().len();

        match self.update_product_stocks(product_id, &update).await {
            Ok(()) => {
                editor.finish_save(Ok(()));
                tracing::info!(product_id, changed, "batch stock update saved");
                Ok(true)
            }
            Err(e) => {
                tracing::warn!(product_id, error = %e, "batch stock update failed");
                editor.finish_save(Err(e.to_string()));
                Err(e)
            }
        }
    }
}
