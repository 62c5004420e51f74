//! `products` command handlers.
//!
//! `list` runs the local filter/sort/page pipeline over a product fixture;
//! the remaining subcommands call the product endpoints.

use std::path::{Path, PathBuf};

use backoffice_core::{
    apply, AppConfig, ConfigError, ListState, ProductForm, ProductSortKey, ProductStatusFilter,
    ProductSummary, ViewMode, PRODUCT_PAGE_SIZES,
};
use clap::{Args, Subcommand};

/// Sub-commands available under `products`.
#[derive(Debug, Subcommand)]
pub enum ProductCommands {
    /// List products from the local fixture
    List {
        /// Case-insensitive name search
        #[arg(long, default_value = "")]
        search: String,
        /// Sale status filter: all, on, off
        #[arg(long, default_value = "all")]
        status: ProductStatusFilter,
        /// Sort order: latest, price, stock, name
        #[arg(long, default_value = "latest")]
        sort: ProductSortKey,
        /// One-based page number (clamped to the last page)
        #[arg(long, default_value = "1")]
        page: usize,
        /// Layout: list (6 per page) or grid (8 per page)
        #[arg(long, default_value = "list")]
        view: ViewMode,
        /// YAML fixture to list; defaults to `BACKOFFICE_PRODUCTS_FIXTURE`,
        /// then the built-in catalogue
        #[arg(long)]
        fixture: Option<PathBuf>,
    },
    /// Show a product's fields and size/color options
    Show {
        #[arg(long)]
        id: i64,
    },
    /// Register a new product
    Create {
        #[command(flatten)]
        fields: FormFields,
    },
    /// Update a product; fields left out keep their stored values
    Update {
        #[arg(long)]
        id: i64,
        #[command(flatten)]
        fields: FormFields,
    },
    /// Delete a product
    Delete {
        #[arg(long)]
        id: i64,
    },
    /// Put a product on sale
    Activate {
        #[arg(long)]
        id: i64,
    },
    /// Suspend sales of a product
    Suspend {
        #[arg(long)]
        id: i64,
    },
}

/// Product form fields shared by `create` and `update`.
#[derive(Debug, Args)]
pub struct FormFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub category: Option<i64>,
    #[arg(long)]
    pub price: Option<u32>,
    #[arg(long)]
    pub memo: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Size option; repeat for several
    #[arg(long = "size")]
    pub sizes: Vec<String>,
    /// Color option; repeat for several
    #[arg(long = "color")]
    pub colors: Vec<String>,
    /// Image file (png, jpg, gif, webp) to upload as the product image
    #[arg(long)]
    pub image: Option<PathBuf>,
}

impl FormFields {
    fn apply_to(self, form: &mut ProductForm) -> anyhow::Result<()> {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(category) = self.category {
            form.category_id = category;
        }
        if let Some(price) = self.price {
            form.price = price;
        }
        if let Some(memo) = self.memo {
            form.memo = memo;
        }
        if let Some(description) = self.description {
            form.description = description;
        }
        if !self.sizes.is_empty() {
            form.sizes = self.sizes;
        }
        if !self.colors.is_empty() {
            form.colors = self.colors;
        }
        if let Some(path) = self.image {
            let bytes = std::fs::read(&path)
                .map_err(|e| anyhow::anyhow!("failed to read image {}: {e}", path.display()))?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            form.attach_image(&file_name, &bytes)?;
            tracing::debug!(path = %path.display(), bytes = bytes.len(), "attached product image");
        }
        Ok(())
    }
}

pub(crate) async fn run(
    command: ProductCommands,
    config: Result<AppConfig, ConfigError>,
) -> anyhow::Result<()> {
    match command {
        ProductCommands::List {
            search,
            status,
            sort,
            page,
            view,
            fixture,
        } => {
            let fixture = fixture_path(fixture, config.as_ref().ok());
            let products = load_products(fixture.as_deref())?;
            let mut state = ListState::new(PRODUCT_PAGE_SIZES);
            state.set_search(search);
            state.set_status(status);
            state.set_sort(sort);
            state.set_mode(view);
            print_product_page(&products, &mut state, page);
            Ok(())
        }
        ProductCommands::Show { id } => {
            let client = crate::api_client(config).await?;
            let detail = client.get_product(id).await?;
            let value = &detail.prod_value;
            println!("Product: {} ({id})", value.product_name);
            println!(
                "Status: {}",
                if detail.is_active() {
                    "on sale"
                } else {
                    "suspended"
                }
            );
            if let Some(category) = &value.category {
                println!("Category: {} ({})", category.name, category.id);
            }
            println!("Price: {}", value.price);
            println!("Sizes: {}", detail.distinct_sizes().join(", "));
            println!("Colors: {}", detail.distinct_colors().join(", "));
            if !value.memo.is_empty() {
                println!("Memo: {}", value.memo);
            }
            if !value.description.is_empty() {
                println!();
                println!("{}", value.description);
            }
            Ok(())
        }
        ProductCommands::Create { fields } => {
            let client = crate::api_client(config).await?;
            let mut form = ProductForm::default();
            fields.apply_to(&mut form)?;
            let payload = form.to_payload()?;
            let id = client.create_product(&payload).await?;
            println!("created product {id}");
            Ok(())
        }
        ProductCommands::Update { id, fields } => {
            let client = crate::api_client(config).await?;
            let detail = client.get_product(id).await?;
            let mut form = ProductForm::from_detail(&detail);
            fields.apply_to(&mut form)?;
            let payload = form.to_payload()?;
            client.update_product(id, &payload).await?;
            println!("updated product {id}");
            Ok(())
        }
        ProductCommands::Delete { id } => {
            let client = crate::api_client(config).await?;
            client.delete_product(id).await?;
            println!("deleted product {id}");
            Ok(())
        }
        ProductCommands::Activate { id } => set_active(config, id, true).await,
        ProductCommands::Suspend { id } => set_active(config, id, false).await,
    }
}

async fn set_active(
    config: Result<AppConfig, ConfigError>,
    id: i64,
    active: bool,
) -> anyhow::Result<()> {
    let client = crate::api_client(config).await?;
    let now_active = client.set_product_active(id, active).await?;
    println!(
        "product {id} is now {}",
        if now_active { "on sale" } else { "suspended" }
    );
    Ok(())
}

/// The `--fixture` flag wins over the configured fixture.
pub(crate) fn fixture_path(flag: Option<PathBuf>, config: Option<&AppConfig>) -> Option<PathBuf> {
    flag.or_else(|| config.and_then(|c| c.products_fixture.clone()))
}

fn load_products(fixture: Option<&Path>) -> anyhow::Result<Vec<ProductSummary>> {
    let fixture = match fixture {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading product fixture");
            backoffice_core::load_fixture(path)
                .map_err(|e| anyhow::anyhow!("failed to load product fixture: {e}"))?
        }
        None => backoffice_core::default_fixture(),
    };
    Ok(fixture.products)
}

/// Renders one page of the pipeline output. `page` is one-based.
fn print_product_page(
    products: &[ProductSummary],
    state: &mut ListState<ProductSummary>,
    page: usize,
) {
    let total = apply(products, state.query()).total();
    state.observe_total(total);
    state.set_page(page.saturating_sub(1));

    let result = apply(products, state.query());
    if result.total() == 0 {
        println!("no products match");
        return;
    }

    match state.mode() {
        ViewMode::List => {
            println!(
                "{:<5}{:<32}{:>9}{:>7}  STATUS",
                "ID", "NAME", "PRICE", "STOCK"
            );
            for p in result.items() {
                println!(
                    "{:<5}{:<32}{:>9}{:>7}  {}",
                    p.id,
                    truncate(&p.name, 30),
                    p.price,
                    p.stock,
                    p.status
                );
            }
        }
        ViewMode::Grid => {
            for row in result.items().chunks(4) {
                let line: Vec<String> = row
                    .iter()
                    .map(|p| format!("[{}] {} {}", p.id, truncate(&p.name, 18), p.price))
                    .collect();
                println!("{}", line.join("  |  "));
            }
        }
    }
    println!(
        "page {} of {} ({} matching)",
        result.page() + 1,
        result.page_count(),
        result.total()
    );
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        format!("{}...", s.chars().take(max - 3).collect::<String>())
    } else {
        s.to_string()
    }
}
