use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Whether a product is currently offered to buyers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    OnSale,
    Suspended,
}

impl std::fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaleStatus::OnSale => write!(f, "on sale"),
            SaleStatus::Suspended => write!(f, "suspended"),
        }
    }
}

/// One row of the Product List.
///
/// Size and color options are never empty; [`ProductSummary::new`] enforces
/// this, and fixture loading re-checks it for deserialized rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: i64,
    pub name: String,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    /// Unit price in whole currency units, e.g. `24000`.
    pub price: u32,
    pub stock: u32,
    pub status: SaleStatus,
}

impl ProductSummary {
    /// Builds a product row, rejecting empty size or color option lists.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyOptions`] if `sizes` or `colors` is empty.
    pub fn new(
        id: i64,
        name: impl Into<String>,
        sizes: Vec<String>,
        colors: Vec<String>,
        price: u32,
        stock: u32,
        status: SaleStatus,
    ) -> Result<Self, CoreError> {
        let product = Self {
            id,
            name: name.into(),
            sizes,
            colors,
            price,
            stock,
            status,
        };
        product.check_options()?;
        Ok(product)
    }

    pub(crate) fn check_options(&self) -> Result<(), CoreError> {
        if self.sizes.is_empty() {
            return Err(CoreError::EmptyOptions {
                product_id: self.id,
                field: "size",
            });
        }
        if self.colors.is_empty() {
            return Err(CoreError::EmptyOptions {
                product_id: self.id,
                field: "color",
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn is_on_sale(&self) -> bool {
        self.status == SaleStatus::OnSale
    }
}

/// One row of the Variant List as returned by the paged variants endpoint.
///
/// `(product_id, size, color)` is unique across the server's data set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantRow {
    pub id: i64,
    pub product_id: i64,
    /// Owning product's name, denormalized for display and search.
    pub product_name: String,
    pub size: String,
    pub color: String,
    pub stock: u32,
}

impl VariantRow {
    #[must_use]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// One size/color combination of a single product, as listed by the
/// per-product variants endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: i64,
    pub size: String,
    pub color: String,
    pub stock: u32,
}
