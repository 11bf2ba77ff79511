use std::sync::Arc;

use storefront_cli::cli::commands::CliApp;
use storefront_cli::models::{CartState, ProductId};
use storefront_cli::services::{BuiltinCatalog, CartStore, CartStoreError, CatalogSource};
use storefront_cli::utils::formatting::CurrencyFormatter;
use storefront_cli::utils::Config;

async fn builtin_app() -> (CliApp, Arc<storefront_cli::models::Catalog>) {
    let catalog = Arc::new(BuiltinCatalog.load().await.unwrap());
    let app = CliApp::with_catalog(catalog.clone(), CurrencyFormatter::default());
    (app, catalog)
}

#[tokio::test]
async fn test_new_uses_builtin_catalog_by_default() {
    let config = Config::default();

    let app = CliApp::new(&config).await.unwrap();
    let (cart, rejected) = app.fill_cart(&[1]);

    assert!(rejected.is_empty());
    assert_eq!(cart.amount_of(ProductId(1)), 1);
}

#[tokio::test]
async fn test_new_fails_for_missing_catalog_file() {
    let config = Config {
        catalog_path: Some("/definitely/not/here/catalog.json".into()),
        ..Config::default()
    };

    assert!(CliApp::new(&config).await.is_err());
}

#[tokio::test]
async fn test_fill_cart_collects_rejections() {
    let (app, _) = builtin_app().await;

    let (cart, rejected) = app.fill_cart(&[1, 1, 99, 3]);

    assert_eq!(cart.len(), 2);
    assert_eq!(cart.amount_of(ProductId(1)), 2);
    assert_eq!(cart.amount_of(ProductId(3)), 1);
    assert_eq!(rejected, vec![CartStoreError::UnknownProduct { id: ProductId(99) }]);
}

#[tokio::test]
async fn test_render_cart_shows_subtotals_and_total() {
    let (app, catalog) = builtin_app().await;
    let (cart, _) = app.fill_cart(&[1, 1]);
    let (_, dispatcher) = CartStore::new(catalog);

    let output = app.render_cart(&cart, &dispatcher);

    assert!(output.contains("R$ 159,90"));
    assert!(output.contains("R$ 319,80"));
    assert!(output.contains("[-] 2 [+]"));
    assert!(output.contains("Finalizar pedido"));
}

#[tokio::test]
async fn test_render_empty_cart_shows_header_and_zero_total() {
    let (app, catalog) = builtin_app().await;
    let (_, dispatcher) = CartStore::new(catalog);

    let output = app.render_cart(&CartState::new(), &dispatcher);

    assert!(output.contains("Subtotal"));
    assert!(output.contains("R$ 0,00"));
}

#[tokio::test]
async fn test_render_catalog_lists_every_product() {
    let (app, catalog) = builtin_app().await;
    let (cart, _) = app.fill_cart(&[5, 5]);
    let (_, dispatcher) = CartStore::new(catalog.clone());

    let output = app.render_catalog(&cart, &dispatcher);

    for product in catalog.products() {
        assert!(output.contains(&product.id.0.to_string()));
    }
    assert!(output.contains("R$ 89,90"));
    assert!(output.contains("In cart"));
}

#[test]
fn test_config_rejects_non_json_catalog_path() {
    let config = Config {
        catalog_path: Some("catalog.csv".into()),
        ..Config::default()
    };

    assert!(config.validate().is_err());
}

#[test]
fn test_config_requires_catalog_in_production() {
    let config = Config {
        environment: "production".to_string(),
        ..Config::default()
    };
    assert!(config.validate().is_err());

    let config = Config {
        catalog_path: Some("catalog.json".into()),
        ..config
    };
    assert!(config.validate().is_ok());
}

#[test]
fn test_log_filter_uses_configured_level_unless_verbose() {
    let config = Config {
        log_level: "warn".to_string(),
        ..Config::default()
    };

    assert_eq!(config.log_filter(false), "warn");
    assert_eq!(config.log_filter(true), "debug");
}
