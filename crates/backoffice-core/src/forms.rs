//! Product detail and product form payloads.
//!
//! The create and edit screens share one request body:
//!
//! ```text
//! { "prodValue": { "productName", "category": {id, name}, "price",
//!                  "isSmplAva", "memo", "description",
//!                  "images": [{id, imgUrl, sortOrder}], "detailBlocks": [] },
//!   "sizes": "S,M,L", "colors": "black,white" }
//! ```
//!
//! `sizes` and `colors` travel as comma-joined strings; the detail response
//! instead lists every size/color combination under `stockOptions`.

use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    #[serde(default)]
    pub id: i64,
    /// A URL on responses; a bare base64 body on uploads.
    pub img_url: String,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductValue {
    pub product_name: String,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub price: u32,
    #[serde(rename = "isSmplAva", default)]
    pub sample_available: bool,
    #[serde(default)]
    pub memo: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    #[serde(default)]
    pub detail_blocks: Vec<serde_json::Value>,
    /// Present on detail responses only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// One size/color combination listed on a product detail response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockOption {
    #[serde(default)]
    pub id: Option<i64>,
    pub size: String,
    pub color: String,
    #[serde(default)]
    pub stock: Option<u32>,
}

/// Response of `GET wholesaler/products/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub prod_value: ProductValue,
    #[serde(default)]
    pub stock_options: Vec<StockOption>,
}

impl ProductDetail {
    /// Sizes in first-seen order without repeats.
    #[must_use]
    pub fn distinct_sizes(&self) -> Vec<String> {
        distinct(self.stock_options.iter().map(|o| o.size.as_str()))
    }

    /// Colors in first-seen order without repeats.
    #[must_use]
    pub fn distinct_colors(&self) -> Vec<String> {
        distinct(self.stock_options.iter().map(|o| o.color.as_str()))
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.prod_value.is_active.unwrap_or(false)
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for v in values {
        if !out.iter().any(|seen| seen == v) {
            out.push(v.to_string());
        }
    }
    out
}

/// Extracts the base64 body from an image data URL
/// (`data:image/png;base64,iVBOR...`).
///
/// Returns `None` for anything that is not an image data URL, including
/// remote URLs of images that were already uploaded.
#[must_use]
pub fn image_payload(preview: &str) -> Option<&str> {
    if !preview.starts_with("data:image") {
        return None;
    }
    preview
        .split_once(',')
        .map(|(_, body)| body)
        .filter(|body| !body.is_empty())
}

/// Body of product create (`POST`) and update (`PUT`) requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub prod_value: ProductValue,
    pub sizes: String,
    pub colors: String,
}

/// Editable fields of the product create/edit screens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub category_id: i64,
    pub price: u32,
    pub memo: String,
    pub description: String,
    /// Image preview: a data URL for a freshly chosen file, or the stored URL.
    pub image: Option<String>,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
}

impl ProductForm {
    /// Seeds the edit form from a detail response.
    #[must_use]
    pub fn from_detail(detail: &ProductDetail) -> Self {
        let value = &detail.prod_value;
        Self {
            name: value.product_name.clone(),
            category_id: value.category.as_ref().map_or(0, |c| c.id),
            price: value.price,
            memo: value.memo.clone(),
            description: value.description.clone(),
            image: value.images.first().map(|i| i.img_url.clone()),
            sizes: detail.distinct_sizes(),
            colors: detail.distinct_colors(),
        }
    }

    /// Replaces the image preview with a data URL built from a chosen file.
    ///
    /// The media type comes from the file extension (png, jpg/jpeg, gif, webp).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidForm`] for an unsupported extension or an
    /// empty file; the previous preview is kept.
    pub fn attach_image(&mut self, file_name: &str, bytes: &[u8]) -> Result<(), CoreError> {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        let media = match extension.as_str() {
            "png" => "png",
            "jpg" | "jpeg" => "jpeg",
            "gif" => "gif",
            "webp" => "webp",
            _ => {
                return Err(CoreError::InvalidForm(format!(
                    "unsupported image type: {file_name}"
                )))
            }
        };
        if bytes.is_empty() {
            return Err(CoreError::InvalidForm(format!("image file is empty: {file_name}")));
        }

        let body = base64::engine::general_purpose::STANDARD.encode(bytes);
        self.image = Some(format!("data:image/{media};base64,{body}"));
        Ok(())
    }

    /// Builds the request body.
    ///
    /// Blank size and color entries are dropped. An image is attached only
    /// when the preview is a freshly chosen data URL; a stored URL is left
    /// out so the server keeps its copy.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidForm`] if the name is blank or no size or
    /// color option remains.
    pub fn to_payload(&self) -> Result<ProductPayload, CoreError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CoreError::InvalidForm("product name is required".into()));
        }
        let sizes = non_blank(&self.sizes);
        if sizes.is_empty() {
            return Err(CoreError::InvalidForm("at least one size is required".into()));
        }
        let colors = non_blank(&self.colors);
        if colors.is_empty() {
            return Err(CoreError::InvalidForm("at least one color is required".into()));
        }

        let images = self
            .image
            .as_deref()
            .and_then(image_payload)
            .map(|body| {
                vec![ProductImage {
                    id: 0,
                    img_url: body.to_string(),
                    sort_order: 0,
                }]
            })
            .unwrap_or_default();

        Ok(ProductPayload {
            prod_value: ProductValue {
                product_name: name.to_string(),
                category: Some(Category {
                    id: self.category_id,
                    name: String::new(),
                }),
                price: self.price,
                sample_available: true,
                memo: self.memo.clone(),
                description: self.description.clone(),
                images,
                detail_blocks: Vec::new(),
                is_active: None,
            },
            sizes: sizes.join(","),
            colors: colors.join(","),
        })
    }
}

fn non_blank(values: &[String]) -> Vec<&str> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail_json() -> serde_json::Value {
        serde_json::json!({
            "prodValue": {
                "productName": "Ere check blouse",
                "category": { "id": 3, "name": "blouse" },
                "price": 23000,
                "memo": "restock in May",
                "description": "cotton",
                "images": [{ "id": 9, "imgUrl": "https://cdn.example.com/9.png", "sortOrder": 0 }],
                "isActive": true
            },
            "stockOptions": [
                { "size": "S", "color": "sky" },
                { "size": "S", "color": "black" },
                { "size": "M", "color": "sky" },
                { "size": "M", "color": "black" }
            ]
        })
    }

    fn form() -> ProductForm {
        ProductForm {
            name: "Knit vest".to_string(),
            category_id: 2,
            price: 19_000,
            memo: String::new(),
            description: "wool blend".to_string(),
            image: Some("data:image/png;base64,iVBORw0KGgo=".to_string()),
            sizes: vec!["Free".to_string()],
            colors: vec!["grey".to_string(), " navy ".to_string()],
        }
    }

    #[test]
    fn detail_dedupes_sizes_and_colors_in_order() {
        let detail: ProductDetail = serde_json::from_value(detail_json()).unwrap();
        assert_eq!(detail.distinct_sizes(), ["S", "M"]);
        assert_eq!(detail.distinct_colors(), ["sky", "black"]);
        assert!(detail.is_active());
    }

    #[test]
    fn form_from_detail_copies_fields() {
        let detail: ProductDetail = serde_json::from_value(detail_json()).unwrap();
        let form = ProductForm::from_detail(&detail);
        assert_eq!(form.name, "Ere check blouse");
        assert_eq!(form.category_id, 3);
        assert_eq!(form.price, 23_000);
        assert_eq!(form.image.as_deref(), Some("https://cdn.example.com/9.png"));
        assert_eq!(form.sizes, ["S", "M"]);
    }

    #[test]
    fn image_payload_strips_data_url_prefix() {
        assert_eq!(
            image_payload("data:image/jpeg;base64,/9j/4AAQ"),
            Some("/9j/4AAQ")
        );
        assert_eq!(image_payload("https://cdn.example.com/1.png"), None);
        assert_eq!(image_payload("data:image/png;base64,"), None);
        assert_eq!(image_payload("data:text/plain;base64,aGk="), None);
    }

    #[test]
    fn payload_matches_wire_shape() {
        let payload = form().to_payload().unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "prodValue": {
                    "productName": "Knit vest",
                    "category": { "id": 2, "name": "" },
                    "price": 19000,
                    "isSmplAva": true,
                    "memo": "",
                    "description": "wool blend",
                    "images": [{ "id": 0, "imgUrl": "iVBORw0KGgo=", "sortOrder": 0 }],
                    "detailBlocks": []
                },
                "sizes": "Free",
                "colors": "grey,navy"
            })
        );
    }

    #[test]
    fn stored_image_url_is_not_reuploaded() {
        let mut f = form();
        f.image = Some("https://cdn.example.com/9.png".to_string());
        let payload = f.to_payload().unwrap();
        assert!(payload.prod_value.images.is_empty());
    }

    #[test]
    fn attached_image_is_uploaded_as_base64() {
        let mut f = form();
        f.image = Some("https://cdn.example.com/9.png".to_string());
        f.attach_image("Front.JPG", b"hello").unwrap();

        assert_eq!(f.image.as_deref(), Some("data:image/jpeg;base64,aGVsbG8="));
        let payload = f.to_payload().unwrap();
        assert_eq!(payload.prod_value.images[0].img_url, "aGVsbG8=");
    }

    #[test]
    fn attach_image_rejects_unknown_type_and_empty_file() {
        let mut f = form();
        let before = f.image.clone();
        assert!(matches!(
            f.attach_image("notes.txt", b"hi"),
            Err(CoreError::InvalidForm(_))
        ));
        assert!(matches!(
            f.attach_image("blank.png", b""),
            Err(CoreError::InvalidForm(_))
        ));
        assert_eq!(f.image, before);
    }

    #[test]
    fn payload_requires_name_and_options() {
        let mut f = form();
        f.name = " ".to_string();
        assert!(matches!(f.to_payload(), Err(CoreError::InvalidForm(_))));

        let mut f = form();
        f.sizes = vec![String::new()];
        assert!(f.to_payload().unwrap_err().to_string().contains("size"));

        let mut f = form();
        f.colors.clear();
        assert!(f.to_payload().unwrap_err().to_string().contains("color"));
    }
}
