use backoffice_core::{ProductDetail, ProductPayload};
use reqwest::Method;

use super::AdminClient;
use crate::error::ClientError;
use crate::types::{ActiveState, CreatedProduct};

impl AdminClient {
    /// Fetches a product's editable fields and its size/color combinations.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] for an unknown id, or another
    /// [`ClientError`] on network, status, or body failures.
    pub async fn get_product(&self, product_id: i64) -> Result<ProductDetail, ClientError> {
        let url = self.endpoint(&format!("wholesaler/products/{product_id}"))?;
        let builder = self.request(Method::GET, url.clone());
        Self::send_json(builder, &url, &format!("product(id={product_id})")).await
    }

    /// Registers a new product and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on network, status, or body failures.
    pub async fn create_product(&self, payload: &ProductPayload) -> Result<i64, ClientError> {
        let url = self.endpoint("wholesaler/products")?;
        let builder = self.request(Method::POST, url.clone()).json(payload);
        let created: CreatedProduct = Self::send_json(builder, &url, "create product").await?;
        tracing::info!(product_id = created.product_id, "product created");
        Ok(created.product_id)
    }

    /// Replaces a product's fields.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on network failure or non-2xx status.
    pub async fn update_product(
        &self,
        product_id: i64,
        payload: &ProductPayload,
    ) -> Result<(), ClientError> {
        let url = self.endpoint(&format!("wholesaler/products/{product_id}"))?;
        let builder = self.request(Method::PUT, url.clone()).json(payload);
        Self::send_empty(builder, &url).await?;
        tracing::info!(product_id, "product updated");
        Ok(())
    }

    /// Deletes a product.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on network failure or non-2xx status.
    pub async fn delete_product(&self, product_id: i64) -> Result<(), ClientError> {
        let url = self.endpoint(&format!("wholesaler/products/{product_id}"))?;
        let builder = self.request(Method::DELETE, url.clone());
        Self::send_empty(builder, &url).await?;
        tracing::info!(product_id, "product deleted");
        Ok(())
    }

    /// Switches a product between on sale and suspended, returning the state
    /// the server reports back.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on network, status, or body failures.
    pub async fn set_product_active(
        &self,
        product_id: i64,
        active: bool,
    ) -> Result<bool, ClientError> {
        let url = self.endpoint(&format!("wholesaler/products/{product_id}/is-active"))?;
        let builder = self
            .request(Method::PATCH, url.clone())
            .json(&ActiveState { active });
        let state: ActiveState =
            Self::send_json(builder, &url, &format!("is-active(id={product_id})")).await?;
        tracing::info!(product_id, active = state.active, "product sale status changed");
        Ok(state.active)
    }
}
