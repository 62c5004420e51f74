use super::*;

fn product(id: i64, name: &str, price: u32, stock: u32, status: SaleStatus) -> ProductSummary {
    ProductSummary {
        id,
        name: name.to_string(),
        sizes: vec!["Free".to_string()],
        colors: vec!["black".to_string()],
        price,
        stock,
        status,
    }
}

fn variant(id: i64, product_name: &str, stock: u32) -> VariantRow {
    VariantRow {
        id,
        product_id: id / 10,
        product_name: product_name.to_string(),
        size: "M".to_string(),
        color: "ivory".to_string(),
        stock,
    }
}

/// Five products A..E with statuses [on, on, off, on, off] and prices
/// [10, 30, 20, 5, 40].
fn five_products() -> Vec<ProductSummary> {
    vec![
        product(1, "A", 10, 3, SaleStatus::OnSale),
        product(2, "B", 30, 0, SaleStatus::OnSale),
        product(3, "C", 20, 7, SaleStatus::Suspended),
        product(4, "D", 5, 7, SaleStatus::OnSale),
        product(5, "E", 40, 1, SaleStatus::Suspended),
    ]
}

fn names<R: ListRecord>(rows: &[&R]) -> Vec<String> {
    rows.iter().map(|r| r.display_name().to_string()).collect()
}

#[test]
fn default_query_orders_products_by_id_descending() {
    let products = five_products();
    let query = ListQuery::<ProductSummary>::new(10);
    let page = apply(&products, &query);
    assert_eq!(names(page.matched()), ["E", "D", "C", "B", "A"]);
    assert_eq!(page.total(), 5);
    assert_eq!(page.page_count(), 1);
}

#[test]
fn empty_filters_keep_every_record() {
    let products = five_products();
    let mut query = ListQuery::<ProductSummary>::new(10);
    query.sort = ProductSortKey::Name;
    let page = apply(&products, &query);
    let got: Vec<&ProductSummary> = page.matched().to_vec();
    let want: Vec<&ProductSummary> = products.iter().collect();
    assert_eq!(got, want);
}

#[test]
fn suspended_filter_keeps_only_suspended_products() {
    let products = five_products();
    let mut query = ListQuery::<ProductSummary>::new(10);
    query.status = ProductStatusFilter::Suspended;
    let page = apply(&products, &query);
    assert_eq!(names(page.matched()), ["E", "C"]);
}

#[test]
fn price_sort_is_descending() {
    let products = five_products();
    let mut query = ListQuery::<ProductSummary>::new(10);
    query.sort = ProductSortKey::Price;
    let page = apply(&products, &query);
    assert_eq!(names(page.matched()), ["E", "B", "C", "A", "D"]);
}

#[test]
fn stock_sort_keeps_source_order_for_ties() {
    let products = five_products();
    let mut query = ListQuery::<ProductSummary>::new(10);
    query.sort = ProductSortKey::Stock;
    let page = apply(&products, &query);
    // C and D both hold 7; C comes first in the source.
    assert_eq!(names(page.matched()), ["C", "D", "A", "E", "B"]);
}

#[test]
fn text_filter_is_case_insensitive_substring() {
    let products = vec![
        product(1, "Loose Fit Shirt", 1, 1, SaleStatus::OnSale),
        product(2, "Basic Hood", 1, 1, SaleStatus::OnSale),
        product(3, "check SHIRT", 1, 1, SaleStatus::OnSale),
    ];
    let mut query = ListQuery::<ProductSummary>::new(10);
    query.search = "sHiRt".to_string();
    let page = apply(&products, &query);
    assert_eq!(names(page.matched()), ["check SHIRT", "Loose Fit Shirt"]);
    assert!(page
        .matched()
        .iter()
        .all(|p| p.name.to_lowercase().contains("shirt")));
}

#[test]
fn text_and_status_filters_compose_with_and() {
    let products = vec![
        product(1, "shirt one", 1, 1, SaleStatus::OnSale),
        product(2, "shirt two", 1, 1, SaleStatus::Suspended),
        product(3, "hood", 1, 1, SaleStatus::Suspended),
    ];
    let mut query = ListQuery::<ProductSummary>::new(10);
    query.search = "shirt".to_string();
    query.status = ProductStatusFilter::Suspended;
    let page = apply(&products, &query);
    assert_eq!(names(page.matched()), ["shirt two"]);
}

#[test]
fn page_count_has_floor_of_one() {
    assert_eq!(page_count(0, 6), 1);
    assert_eq!(page_count(1, 6), 1);
    assert_eq!(page_count(6, 6), 1);
    assert_eq!(page_count(7, 6), 2);
    assert_eq!(page_count(13, 6), 3);
}

#[test]
fn zero_page_size_is_treated_as_one() {
    assert_eq!(page_count(3, 0), 3);
    let query = ListQuery::<ProductSummary>::new(0);
    assert_eq!(query.page_size, 1);
}

#[test]
fn pages_concatenate_back_to_the_matched_sequence() {
    let products: Vec<ProductSummary> = (1..=13)
        .map(|id| product(id, &format!("p{id}"), 1, 1, SaleStatus::OnSale))
        .collect();
    for size in 1..=14 {
        let query = ListQuery::<ProductSummary>::new(size);
        let page = apply(&products, &query);
        assert_eq!(page.page_count(), page_count(13, size));
        let rebuilt: Vec<&ProductSummary> = page.pages().flatten().copied().collect();
        assert_eq!(rebuilt, page.matched().to_vec(), "page size {size}");
    }
}

#[test]
fn page_index_is_clamped_after_the_result_shrinks() {
    let products: Vec<ProductSummary> = (1..=8)
        .map(|id| product(id, &format!("p{id}"), 1, 1, SaleStatus::OnSale))
        .collect();
    let mut query = ListQuery::<ProductSummary>::new(3);
    query.page = 2;
    assert_eq!(apply(&products, &query).items().len(), 2);

    query.search = "p1".to_string();
    let page = apply(&products, &query);
    assert_eq!(page.page(), 0);
    assert_eq!(names(page.items()), ["p1"]);
}

#[test]
fn empty_result_renders_one_empty_page() {
    let products = five_products();
    let mut query = ListQuery::<ProductSummary>::new(6);
    query.search = "zzz".to_string();
    query.page = 4;
    let page = apply(&products, &query);
    assert_eq!(page.page_count(), 1);
    assert_eq!(page.page(), 0);
    assert!(page.items().is_empty());
    assert_eq!(page.pages().count(), 1);
}

#[test]
fn stock_filter_splits_on_zero() {
    let rows = vec![variant(11, "a", 0), variant(12, "b", 4), variant(13, "c", 0)];
    let mut query = ListQuery::<VariantRow>::new(10);
    query.status = StockFilter::OutOfStock;
    assert_eq!(names(apply(&rows, &query).matched()), ["a", "c"]);
    query.status = StockFilter::InStock;
    assert_eq!(names(apply(&rows, &query).matched()), ["b"]);
}

#[test]
fn variant_default_sort_is_product_name_ascending() {
    let rows = vec![variant(1, "hood", 2), variant(2, "blouse", 9), variant(3, "shirt", 5)];
    let query = ListQuery::<VariantRow>::new(10);
    assert_eq!(names(apply(&rows, &query).matched()), ["blouse", "hood", "shirt"]);
}

#[test]
fn filter_keeps_source_order() {
    // Server collation put "apple" before "Banana"; byte order would not.
    let rows = vec![
        variant(1, "apple", 3),
        variant(2, "Banana", 4),
        variant(3, "cherry", 0),
    ];
    let kept = filter(&rows, "", StockFilter::InStock);
    assert_eq!(names(&kept), ["apple", "Banana"]);

    let kept = filter(&rows, "AN", StockFilter::All);
    assert_eq!(names(&kept), ["Banana"]);
}

#[test]
fn variant_sort_keys_map_to_server_params() {
    assert_eq!(VariantSortKey::ProductName.to_param().to_string(), "productName,asc");
    assert_eq!(VariantSortKey::Stock.to_param().to_string(), "stock,desc");
    assert_eq!(VariantSortKey::Latest.to_param().to_string(), "id,desc");
    assert_eq!(
        "stock,desc".parse::<VariantSortKey>().unwrap(),
        VariantSortKey::Stock
    );
    assert_eq!("name".parse::<VariantSortKey>().unwrap(), VariantSortKey::ProductName);
}

#[test]
fn sort_param_rejects_malformed_values() {
    assert!("stock".parse::<SortParam>().is_err());
    assert!(",asc".parse::<SortParam>().is_err());
    assert!("stock,sideways".parse::<SortParam>().is_err());
    assert!(matches!(
        "price,desc".parse::<VariantSortKey>(),
        Err(CoreError::InvalidSort(ref s)) if s == "price,desc"
    ));
}

#[test]
fn filter_names_parse_from_select_values() {
    assert_eq!("off".parse::<ProductStatusFilter>().unwrap(), ProductStatusFilter::Suspended);
    assert_eq!("inStock".parse::<StockFilter>().unwrap(), StockFilter::InStock);
    assert_eq!("out-of-stock".parse::<StockFilter>().unwrap(), StockFilter::OutOfStock);
    assert!("sold".parse::<StockFilter>().is_err());
}
