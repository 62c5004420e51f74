use backoffice_core::{ProductSortKey, ProductStatusFilter, StockFilter, VariantSortKey, ViewMode};

use super::*;
use crate::variants::parse_assignment;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["backoffice"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn products_list_defaults() {
    let cli = Cli::try_parse_from(["backoffice", "products", "list"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Products {
            command: ProductCommands::List {
                ref search,
                status: ProductStatusFilter::All,
                sort: ProductSortKey::Latest,
                page: 1,
                view: ViewMode::List,
                ..
            }
        }) if search.is_empty()
    ));
}

#[test]
fn products_list_parses_filters() {
    let cli = Cli::try_parse_from([
        "backoffice",
        "products",
        "list",
        "--search",
        "blouse",
        "--status",
        "off",
        "--sort",
        "price",
        "--page",
        "2",
        "--view",
        "grid",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Products {
            command: ProductCommands::List {
                ref search,
                status: ProductStatusFilter::Suspended,
                sort: ProductSortKey::Price,
                page: 2,
                view: ViewMode::Grid,
                ..
            }
        }) if search == "blouse"
    ));
}

#[test]
fn products_list_rejects_unknown_status() {
    let result = Cli::try_parse_from(["backoffice", "products", "list", "--status", "maybe"]);
    assert!(result.is_err());
}

#[test]
fn products_update_collects_repeated_options() {
    let cli = Cli::try_parse_from([
        "backoffice",
        "products",
        "update",
        "--id",
        "7",
        "--size",
        "S",
        "--size",
        "M",
        "--price",
        "21000",
    ])
    .unwrap();
    match cli.command {
        Some(Commands::Products {
            command: ProductCommands::Update { id, fields },
        }) => {
            assert_eq!(id, 7);
            assert_eq!(fields.sizes, ["S", "M"]);
            assert!(fields.colors.is_empty());
            assert_eq!(fields.price, Some(21_000));
            assert!(fields.name.is_none());
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn products_create_takes_image_path() {
    let cli = Cli::try_parse_from([
        "backoffice",
        "products",
        "create",
        "--name",
        "Linen shirt",
        "--image",
        "./shots/front.png",
    ])
    .unwrap();
    match cli.command {
        Some(Commands::Products {
            command: ProductCommands::Create { fields },
        }) => {
            assert_eq!(
                fields.image.as_deref(),
                Some(std::path::Path::new("./shots/front.png"))
            );
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

fn config_with_fixture(fixture: Option<&str>) -> AppConfig {
    AppConfig {
        api_base_url: "http://localhost:8080/api".to_string(),
        env: backoffice_core::Environment::Test,
        log_level: "info".to_string(),
        access_token: None,
        login_user_id: None,
        login_password: None,
        request_timeout_secs: 30,
        user_agent: "backoffice-test".to_string(),
        products_fixture: fixture.map(std::path::PathBuf::from),
    }
}

#[test]
fn fixture_flag_overrides_configured_fixture() {
    let config = config_with_fixture(Some("config/products.yaml"));
    let flag = Some(std::path::PathBuf::from("local.yaml"));

    assert_eq!(
        products::fixture_path(flag, Some(&config)).as_deref(),
        Some(std::path::Path::new("local.yaml"))
    );
    assert_eq!(
        products::fixture_path(None, Some(&config)).as_deref(),
        Some(std::path::Path::new("config/products.yaml"))
    );
    assert!(products::fixture_path(None, Some(&config_with_fixture(None))).is_none());
    assert!(products::fixture_path(None, None).is_none());
}

#[test]
fn variants_list_accepts_server_sort_form() {
    let cli = Cli::try_parse_from([
        "backoffice",
        "variants",
        "list",
        "--sort",
        "stock,desc",
        "--stock",
        "outOfStock",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Variants {
            command: VariantCommands::List {
                sort: VariantSortKey::Stock,
                stock: StockFilter::OutOfStock,
                ..
            }
        })
    ));
}

#[test]
fn variants_list_default_sort_is_product_name() {
    let cli = Cli::try_parse_from(["backoffice", "variants", "list"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Variants {
            command: VariantCommands::List {
                sort: VariantSortKey::ProductName,
                stock: StockFilter::All,
                ..
            }
        })
    ));
}

#[test]
fn variants_batch_parses_assignments() {
    let cli = Cli::try_parse_from([
        "backoffice",
        "variants",
        "batch",
        "--product",
        "3",
        "--set",
        "21=5",
        "--set",
        "22=0",
    ])
    .unwrap();
    match cli.command {
        Some(Commands::Variants {
            command:
                VariantCommands::Batch {
                    product,
                    assignments,
                },
        }) => {
            assert_eq!(product, 3);
            assert_eq!(
                assignments,
                [(21, "5".to_string()), (22, "0".to_string())]
            );
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parse_assignment_rejects_malformed_pairs() {
    assert!(parse_assignment("21").is_err());
    assert!(parse_assignment("abc=5").is_err());
    assert_eq!(parse_assignment(" 21 = 7 ").unwrap(), (21, "7".to_string()));
}

#[test]
fn login_takes_user_and_password() {
    let cli = Cli::try_parse_from([
        "backoffice",
        "login",
        "--user-id",
        "wholesaler01",
        "--password",
        "pw",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Login { ref user_id, ref password })
            if user_id == "wholesaler01" && password == "pw"
    ));
}
