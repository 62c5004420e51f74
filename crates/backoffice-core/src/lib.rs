pub mod app_config;
pub mod config;
pub mod edit;
pub mod error;
pub mod fixtures;
pub mod forms;
pub mod pipeline;
pub mod records;
pub mod view;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use edit::{
    parse_stock_input, BatchEditor, BatchPhase, BatchStockLine, BatchStockUpdate, EditPhase,
    EditSession, StockCommit, StockNotice, VariantTable,
};
pub use error::CoreError;
pub use fixtures::{default_fixture, load_fixture, ProductFixture};
pub use forms::{
    image_payload, Category, ProductDetail, ProductForm, ProductImage, ProductPayload,
    ProductValue, StockOption,
};
pub use pipeline::{
    apply, clamp_page, filter, page_count, ListPage, ListQuery, ListRecord, ProductSortKey,
    ProductStatusFilter, SortDirection, SortParam, StockFilter, VariantSortKey,
};
pub use records::{ProductSummary, ProductVariant, SaleStatus, VariantRow};
pub use view::{ListState, PageSizes, ViewMode, PRODUCT_PAGE_SIZES, VARIANT_PAGE_SIZES};
