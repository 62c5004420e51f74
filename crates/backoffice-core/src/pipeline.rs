//! Filter, sort, and page stages shared by the Product List and Variant List.
//!
//! A [`ListQuery`] is applied to a slice of records in a fixed order: text
//! filter, status filter, sort, page slice. Filters compose by logical AND.
//! Sorting uses [`slice::sort_by`], which is stable, so records with equal
//! keys keep their source order.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::error::CoreError;
use crate::records::{ProductSummary, SaleStatus, VariantRow};

/// A record kind that can flow through the list pipeline.
pub trait ListRecord {
    /// Status filter enumeration. Its `Default` is the "all" sentinel.
    type Status: Copy + Eq + Default + std::fmt::Debug;
    /// Sort key enumeration. Its `Default` is the view's initial ordering.
    type SortKey: Copy + Eq + Default + std::fmt::Debug;

    /// Field matched by the text filter.
    fn display_name(&self) -> &str;

    fn matches_status(&self, status: Self::Status) -> bool;

    fn compare(&self, other: &Self, key: Self::SortKey) -> Ordering;
}

/// Product List status filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductStatusFilter {
    #[default]
    All,
    OnSale,
    Suspended,
}

impl FromStr for ProductStatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "on" => Ok(Self::OnSale),
            "off" => Ok(Self::Suspended),
            other => Err(format!("unknown product status filter '{other}' (all|on|off)")),
        }
    }
}

/// Product List sort keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSortKey {
    /// Identifier descending; there is no creation timestamp, so the highest
    /// id stands in for "most recent".
    #[default]
    Latest,
    /// Price descending.
    Price,
    /// Stock descending.
    Stock,
    /// Name ascending.
    Name,
}

impl FromStr for ProductSortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" => Ok(Self::Latest),
            "price" => Ok(Self::Price),
            "stock" => Ok(Self::Stock),
            "name" => Ok(Self::Name),
            other => Err(format!(
                "unknown product sort '{other}' (latest|price|stock|name)"
            )),
        }
    }
}

impl ListRecord for ProductSummary {
    type Status = ProductStatusFilter;
    type SortKey = ProductSortKey;

    fn display_name(&self) -> &str {
        &self.name
    }

    fn matches_status(&self, status: ProductStatusFilter) -> bool {
        match status {
            ProductStatusFilter::All => true,
            ProductStatusFilter::OnSale => self.status == SaleStatus::OnSale,
            ProductStatusFilter::Suspended => self.status == SaleStatus::Suspended,
        }
    }

    fn compare(&self, other: &Self, key: ProductSortKey) -> Ordering {
        match key {
            ProductSortKey::Latest => other.id.cmp(&self.id),
            ProductSortKey::Price => other.price.cmp(&self.price),
            ProductSortKey::Stock => other.stock.cmp(&self.stock),
            ProductSortKey::Name => self.name.cmp(&other.name),
        }
    }
}

/// Variant List status filter, derived from the stock count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StockFilter {
    #[default]
    All,
    InStock,
    OutOfStock,
}

impl FromStr for StockFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "inStock" | "in-stock" => Ok(Self::InStock),
            "outOfStock" | "out-of-stock" => Ok(Self::OutOfStock),
            other => Err(format!(
                "unknown stock filter '{other}' (all|in-stock|out-of-stock)"
            )),
        }
    }
}

/// Variant List sort keys. Each maps onto a server `sort` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VariantSortKey {
    /// Product name ascending (`productName,asc`).
    #[default]
    ProductName,
    /// Stock descending (`stock,desc`).
    Stock,
    /// Identifier descending (`id,desc`).
    Latest,
}

impl VariantSortKey {
    #[must_use]
    pub fn to_param(self) -> SortParam {
        let (field, direction) = match self {
            VariantSortKey::ProductName => ("productName", SortDirection::Asc),
            VariantSortKey::Stock => ("stock", SortDirection::Desc),
            VariantSortKey::Latest => ("id", SortDirection::Desc),
        };
        SortParam {
            field: field.to_string(),
            direction,
        }
    }

    /// Maps a server sort parameter back onto a key.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidSort`] for field/direction pairs that no
    /// key produces.
    pub fn from_param(param: &SortParam) -> Result<Self, CoreError> {
        match (param.field.as_str(), param.direction) {
            ("productName", SortDirection::Asc) => Ok(Self::ProductName),
            ("stock", SortDirection::Desc) => Ok(Self::Stock),
            ("id", SortDirection::Desc) => Ok(Self::Latest),
            _ => Err(CoreError::InvalidSort(param.to_string())),
        }
    }
}

impl FromStr for VariantSortKey {
    type Err = CoreError;

    /// Accepts either a short name (`name`, `stock`, `latest`) or the server
    /// form (`productName,asc`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::ProductName),
            "stock" => Ok(Self::Stock),
            "latest" => Ok(Self::Latest),
            other => Self::from_param(&other.parse::<SortParam>()?),
        }
    }
}

impl ListRecord for VariantRow {
    type Status = StockFilter;
    type SortKey = VariantSortKey;

    fn display_name(&self) -> &str {
        &self.product_name
    }

    fn matches_status(&self, status: StockFilter) -> bool {
        match status {
            StockFilter::All => true,
            StockFilter::InStock => self.stock > 0,
            StockFilter::OutOfStock => self.stock == 0,
        }
    }

    fn compare(&self, other: &Self, key: VariantSortKey) -> Ordering {
        match key {
            VariantSortKey::ProductName => self.product_name.cmp(&other.product_name),
            VariantSortKey::Stock => other.stock.cmp(&self.stock),
            VariantSortKey::Latest => other.id.cmp(&self.id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Server-side sort parameter of the form `<field>,<asc|desc>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortParam {
    pub field: String,
    pub direction: SortDirection,
}

impl std::fmt::Display for SortParam {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let dir = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        write!(f, "{},{dir}", self.field)
    }
}

impl FromStr for SortParam {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, dir) = s
            .split_once(',')
            .ok_or_else(|| CoreError::InvalidSort(s.to_string()))?;
        let field = field.trim();
        if field.is_empty() {
            return Err(CoreError::InvalidSort(s.to_string()));
        }
        let direction = match dir.trim() {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            _ => return Err(CoreError::InvalidSort(s.to_string())),
        };
        Ok(Self {
            field: field.to_string(),
            direction,
        })
    }
}

/// Inputs to one pipeline run. `page` is zero-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery<R: ListRecord> {
    /// Case-insensitive substring; empty matches everything.
    pub search: String,
    pub status: R::Status,
    pub sort: R::SortKey,
    pub page: usize,
    pub page_size: usize,
}

impl<R: ListRecord> ListQuery<R> {
    /// A query on the first page with no filters and the default sort.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            search: String::new(),
            status: R::Status::default(),
            sort: R::SortKey::default(),
            page: 0,
            page_size: page_size.max(1),
        }
    }
}

/// Output of one pipeline run over borrowed records.
#[derive(Debug)]
pub struct ListPage<'a, R> {
    matched: Vec<&'a R>,
    page: usize,
    page_count: usize,
    page_size: usize,
}

impl<'a, R> ListPage<'a, R> {
    /// The full filtered-and-sorted sequence.
    #[must_use]
    pub fn matched(&self) -> &[&'a R] {
        &self.matched
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.matched.len()
    }

    /// Zero-based page actually rendered, after clamping.
    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Records on the rendered page. Empty when nothing matched.
    #[must_use]
    pub fn items(&self) -> &[&'a R] {
        let start = (self.page * self.page_size).min(self.matched.len());
        let end = (start + self.page_size).min(self.matched.len());
        &self.matched[start..end]
    }

    /// Every page in order; always yields at least one (possibly empty) page.
    pub fn pages(&self) -> impl Iterator<Item = &[&'a R]> + '_ {
        let size = self.page_size;
        (0..self.page_count).map(move |idx| {
            let start = (idx * size).min(self.matched.len());
            let end = (start + size).min(self.matched.len());
            &self.matched[start..end]
        })
    }
}

/// `ceil(total / page_size)`, never less than one.
#[must_use]
pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

/// Clamps a zero-based page index into `[0, page_count - 1]`.
#[must_use]
pub fn clamp_page(page: usize, page_count: usize) -> usize {
    page.min(page_count.saturating_sub(1))
}

/// Runs only the text and status filter stages, keeping source order.
///
/// Used for remotely sourced lists whose rows already arrive sorted and
/// paged by the server.
#[must_use]
pub fn filter<'a, R: ListRecord>(
    records: &'a [R],
    search: &str,
    status: R::Status,
) -> Vec<&'a R> {
    let needle = search.to_lowercase();
    records
        .iter()
        .filter(|r| needle.is_empty() || r.display_name().to_lowercase().contains(&needle))
        .filter(|r| r.matches_status(status))
        .collect()
}

/// Runs the text filter, status filter, sort, and page stages over `records`.
#[must_use]
pub fn apply<'a, R: ListRecord>(records: &'a [R], query: &ListQuery<R>) -> ListPage<'a, R> {
    let mut matched = filter(records, &query.search, query.status);

    matched.sort_by(|a, b| a.compare(b, query.sort));

    let page_size = query.page_size.max(1);
    let pages = page_count(matched.len(), page_size);
    ListPage {
        matched,
        page: clamp_page(query.page, pages),
        page_count: pages,
        page_size,
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
