//! Local product fixtures that feed the Product List.
//!
//! The Product List filters, sorts, and pages a locally held array. The
//! array comes either from a YAML file (`products: [...]`) or from the
//! built-in catalogue returned by [`default_fixture`].

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::records::{ProductSummary, SaleStatus};
use crate::ConfigError;

#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    pub products: Vec<ProductSummary>,
}

/// Load and validate a product fixture from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_fixture(path: &Path) -> Result<ProductFixture, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FixtureIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let fixture: ProductFixture =
        serde_yaml::from_str(&content).map_err(ConfigError::FixtureParse)?;

    validate_fixture(&fixture)?;

    Ok(fixture)
}

fn validate_fixture(fixture: &ProductFixture) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();

    for product in &fixture.products {
        if product.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "product {} has an empty name",
                product.id
            )));
        }

        product
            .check_options()
            .map_err(|e| ConfigError::Validation(e.to_string()))?;

        if !seen_ids.insert(product.id) {
            return Err(ConfigError::Validation(format!(
                "duplicate product id: {}",
                product.id
            )));
        }
    }

    Ok(())
}

fn summary(
    id: i64,
    name: &str,
    sizes: &[&str],
    colors: &[&str],
    price: u32,
    stock: u32,
    status: SaleStatus,
) -> ProductSummary {
    ProductSummary {
        id,
        name: name.to_string(),
        sizes: sizes.iter().map(|s| (*s).to_string()).collect(),
        colors: colors.iter().map(|c| (*c).to_string()).collect(),
        price,
        stock,
        status,
    }
}

/// The built-in eight-product catalogue used when no fixture file is configured.
#[must_use]
pub fn default_fixture() -> ProductFixture {
    let base = [
        summary(
            1,
            "Loose-fit shirt",
            &["S", "M", "L"],
            &["black", "white"],
            24_000,
            38,
            SaleStatus::OnSale,
        ),
        summary(
            2,
            "Atti basic short-sleeve hood",
            &["Free"],
            &["ivory", "beige", "green", "black", "purple", "pink"],
            22_000,
            102,
            SaleStatus::OnSale,
        ),
        summary(
            3,
            "Ere check blouse",
            &["Free"],
            &["sky", "black"],
            23_000,
            302,
            SaleStatus::OnSale,
        ),
        summary(
            4,
            "Shonya bustier blouse",
            &["Free"],
            &["pink", "ivory", "black"],
            22_000,
            192,
            SaleStatus::Suspended,
        ),
    ];

    // The catalogue lists each of the four styles twice under later ids.
    let products = base
        .iter()
        .cloned()
        .chain(base.iter().map(|p| ProductSummary {
            id: p.id + 4,
            ..p.clone()
        }))
        .collect();

    ProductFixture { products }
}

#[cfg(test)]
#[path = "fixtures_test.rs"]
mod tests;
