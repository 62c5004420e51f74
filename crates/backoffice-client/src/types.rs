//! Response and request shapes of the back-office REST API that are not
//! part of the core record model.

use backoffice_core::{ProductVariant, VariantRow};
use serde::{Deserialize, Serialize};

/// One page of `GET wholesaler/products/variants`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantPage {
    pub content: Vec<VariantRow>,
    pub total_pages: usize,
}

/// Response of `GET wholesaler/products/{id}/variants`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariantsResponse {
    pub prod_variants: Vec<ProductVariant>,
}

#[derive(Debug, Serialize)]
pub(crate) struct StockBody {
    pub stock: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginBody<'a> {
    pub user_id: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
}

/// Body of a rejected login.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct AuthErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response of `POST wholesaler/products`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedProduct {
    pub product_id: i64,
}

/// Request and response body of `PATCH wholesaler/products/{id}/is-active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveState {
    pub active: bool,
}
