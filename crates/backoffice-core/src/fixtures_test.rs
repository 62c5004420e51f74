use std::io::Write as _;
use std::path::PathBuf;

use super::*;

/// Writes `contents` to a unique file under the system temp dir.
fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "backoffice-fixture-{}-{name}.yaml",
        std::process::id()
    ));
    let mut file = std::fs::File::create(&path).expect("create temp fixture");
    file.write_all(contents.as_bytes())
        .expect("write temp fixture");
    path
}

#[test]
fn default_fixture_has_eight_valid_products() {
    let fixture = default_fixture();
    assert_eq!(fixture.products.len(), 8);
    validate_fixture(&fixture).expect("built-in fixture must validate");

    let suspended: Vec<i64> = fixture
        .products
        .iter()
        .filter(|p| p.status == SaleStatus::Suspended)
        .map(|p| p.id)
        .collect();
    assert_eq!(suspended, [4, 8]);
}

#[test]
fn load_fixture_reads_yaml() {
    let path = write_temp(
        "ok",
        r"
products:
  - id: 1
    name: Linen pants
    sizes: [S, M]
    colors: [beige]
    price: 31000
    stock: 12
    status: on_sale
  - id: 2
    name: Knit vest
    sizes: [Free]
    colors: [grey, navy]
    price: 19000
    stock: 0
    status: suspended
",
    );
    let fixture = load_fixture(&path).expect("fixture should load");
    std::fs::remove_file(&path).ok();

    assert_eq!(fixture.products.len(), 2);
    assert_eq!(fixture.products[1].status, SaleStatus::Suspended);
    assert_eq!(fixture.products[1].colors, ["grey", "navy"]);
}

#[test]
fn load_fixture_missing_file_is_io_error() {
    let err = load_fixture(Path::new("/nonexistent/products.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::FixtureIo { .. }));
}

#[test]
fn load_fixture_rejects_bad_yaml() {
    let path = write_temp("bad", "products: [ {id: one} ]");
    let err = load_fixture(&path).unwrap_err();
    std::fs::remove_file(&path).ok();
    assert!(matches!(err, ConfigError::FixtureParse(_)));
}

#[test]
fn validate_rejects_duplicate_ids() {
    let mut fixture = default_fixture();
    fixture.products[1].id = 1;
    let err = validate_fixture(&fixture).unwrap_err();
    assert!(err.to_string().contains("duplicate product id: 1"));
}

#[test]
fn validate_rejects_empty_name() {
    let mut fixture = default_fixture();
    fixture.products[0].name = "   ".to_string();
    let err = validate_fixture(&fixture).unwrap_err();
    assert!(err.to_string().contains("empty name"));
}

#[test]
fn validate_rejects_empty_color_options() {
    let mut fixture = default_fixture();
    fixture.products[2].colors.clear();
    let err = validate_fixture(&fixture).unwrap_err();
    assert!(err.to_string().contains("color"));
}
