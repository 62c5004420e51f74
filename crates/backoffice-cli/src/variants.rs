//! `variants` command handlers.

use backoffice_client::{AdminClient, VariantListScreen};
use backoffice_core::{StockFilter, VariantRow, VariantSortKey, VariantTable, ViewMode};
use clap::Subcommand;

/// Sub-commands available under `variants`.
#[derive(Debug, Subcommand)]
pub enum VariantCommands {
    /// List one server page of variants
    List {
        /// Case-insensitive product name search within the page
        #[arg(long, default_value = "")]
        search: String,
        /// Stock filter within the page: all, inStock, outOfStock
        #[arg(long, default_value = "all")]
        stock: StockFilter,
        /// Sort order: name, stock, latest, or a server form such as stock,desc
        #[arg(long, default_value = "name")]
        sort: VariantSortKey,
        /// One-based page number (clamped to the last page)
        #[arg(long, default_value = "1")]
        page: usize,
        /// Layout: list (10 per page) or grid (12 per page)
        #[arg(long, default_value = "list")]
        view: ViewMode,
    },
    /// Set the stock of a single variant
    SetStock {
        #[arg(long)]
        product: i64,
        #[arg(long)]
        variant: i64,
        /// New stock; a non-negative whole number
        #[arg(long)]
        stock: String,
    },
    /// Edit the stock of several variants of one product in one request
    Batch {
        #[arg(long)]
        product: i64,
        /// `VARIANT_ID=STOCK`; repeat for several variants
        #[arg(long = "set", value_parser = parse_assignment)]
        assignments: Vec<(i64, String)>,
    },
}

/// Parses a `VARIANT_ID=STOCK` pair. The stock text is validated later by
/// the batch editor.
pub(crate) fn parse_assignment(s: &str) -> Result<(i64, String), String> {
    let (id, stock) = s
        .split_once('=')
        .ok_or_else(|| format!("expected VARIANT_ID=STOCK, got '{s}'"))?;
    let id = id
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid variant id '{id}': {e}"))?;
    Ok((id, stock.trim().to_string()))
}

pub(crate) async fn run(command: VariantCommands, client: &AdminClient) -> anyhow::Result<()> {
    match command {
        VariantCommands::List {
            search,
            stock,
            sort,
            page,
            view,
        } => run_list(client, search, stock, sort, page, view).await,
        VariantCommands::SetStock {
            product,
            variant,
            stock,
        } => run_set_stock(client, product, variant, &stock).await,
        VariantCommands::Batch {
            product,
            assignments,
        } => run_batch(client, product, &assignments).await,
    }
}

async fn run_list(
    client: &AdminClient,
    search: String,
    stock: StockFilter,
    sort: VariantSortKey,
    page: usize,
    view: ViewMode,
) -> anyhow::Result<()> {
    let mut screen = VariantListScreen::new();
    screen.set_mode(view);
    screen.set_sort(sort);
    screen.refresh(client).await?;

    let target = page.saturating_sub(1);
    if target > 0 {
        screen.set_page(target);
        screen.refresh(client).await?;
    }
    screen.set_filter(search, stock);

    let visible = screen.visible();
    if visible.is_empty() {
        println!("no variants match on this page");
    } else {
        println!(
            "{:<7}{:<32}{:<8}{:<10}{:>7}",
            "ID", "PRODUCT", "SIZE", "COLOR", "STOCK"
        );
        for row in visible {
            println!(
                "{:<7}{:<32}{:<8}{:<10}{:>7}",
                row.id, row.product_name, row.size, row.color, row.stock
            );
        }
    }
    println!(
        "page {} of {}",
        screen.state().page() + 1,
        screen.total_pages()
    );
    Ok(())
}

async fn run_set_stock(
    client: &AdminClient,
    product_id: i64,
    variant_id: i64,
    stock: &str,
) -> anyhow::Result<()> {
    let rows = client
        .product_variants(product_id)
        .await?
        .into_iter()
        .map(|v| VariantRow {
            id: v.id,
            product_id,
            product_name: String::new(),
            size: v.size,
            color: v.color,
            stock: v.stock,
        })
        .collect();

    let mut table = VariantTable::new(rows);
    table.begin_edit(variant_id)?;
    table.set_pending_input(stock)?;

    match client.commit_stock_edit(&mut table).await? {
        Some(notice) => println!("{notice}"),
        None => println!("nothing to save"),
    }
    Ok(())
}

async fn run_batch(
    client: &AdminClient,
    product_id: i64,
    assignments: &[(i64, String)],
) -> anyhow::Result<()> {
    let mut editor = client.open_batch_editor(product_id).await?;
    for (variant_id, stock) in assignments {
        editor.set_pending_input(*variant_id, stock)?;
    }

    let changes = editor.changed();
    if changes.is_empty() {
        println!("no stock changes for product {product_id}");
        return Ok(());
    }
    for (variant_id, old, new) in &changes {
        println!("variant {variant_id}: {old} -> {new}");
    }

    if client.commit_batch(&mut editor).await? {
        println!(
            "saved {} change(s) across {} variant(s) of product {product_id}",
            changes.len(),
            editor.variants().len()
        );
    }
    Ok(())
}
