use std::io::Write;

use rust_decimal_macros::dec;
use tempfile::NamedTempFile;

use storefront_cli::models::{CatalogBuildError, ProductId};
use storefront_cli::services::{BuiltinCatalog, CatalogError, CatalogSource, JsonFileCatalog};

fn write_catalog(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(contents.as_bytes()).expect("Failed to write catalog");
    file
}

#[tokio::test]
async fn test_builtin_catalog_is_valid() {
    let catalog = BuiltinCatalog.load().await.unwrap();

    assert_eq!(catalog.len(), 5);
    let first = catalog.get(ProductId(1)).unwrap();
    assert_eq!(first.price, dec!(159.90));
    assert_eq!(catalog.stock_of(ProductId(1)), Some(5));
    assert_eq!(catalog.stock_of(ProductId(3)), None);
}

#[tokio::test]
async fn test_load_json_catalog_preserves_order_and_stock() {
    let file = write_catalog(
        r#"[
            {"id": 10, "title": "Tênis Azul", "price": 99.9, "image": "https://example.com/a.jpg", "stock": 2},
            {"id": 3, "title": "Tênis Preto", "price": "120.00", "image": "https://example.com/b.jpg"}
        ]"#,
    );

    let catalog = JsonFileCatalog::new(file.path()).load().await.unwrap();

    let ids: Vec<ProductId> = catalog.products().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![ProductId(10), ProductId(3)]);
    assert_eq!(catalog.products()[0].price, dec!(99.9));
    assert_eq!(catalog.products()[1].price, dec!(120.00));
    assert_eq!(catalog.stock_of(ProductId(10)), Some(2));
    assert_eq!(catalog.stock_of(ProductId(3)), None);
}

#[tokio::test]
async fn test_empty_json_catalog_loads() {
    let file = write_catalog("[]");

    let catalog = JsonFileCatalog::new(file.path()).load().await.unwrap();

    assert!(catalog.is_empty());
}

#[tokio::test]
async fn test_missing_file_reports_path() {
    let source = JsonFileCatalog::new("/definitely/not/here/catalog.json");

    let result = source.load().await;

    match result {
        Err(CatalogError::Io { path, .. }) => assert_eq!(path, source.path()),
        other => panic!("expected Io error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_json_is_parse_error() {
    let file = write_catalog(r#"[{"id": 1, "title": "Tênis""#);

    let result = JsonFileCatalog::new(file.path()).load().await;

    assert!(matches!(result, Err(CatalogError::Parse(_))));
}

#[tokio::test]
async fn test_invalid_product_is_rejected() {
    let file = write_catalog(
        r#"[{"id": 7, "title": "   ", "price": 10, "image": "https://example.com/a.jpg"}]"#,
    );

    let result = JsonFileCatalog::new(file.path()).load().await;

    assert!(matches!(
        result,
        Err(CatalogError::Invalid(CatalogBuildError::InvalidProduct { id: ProductId(7), .. }))
    ));
}

#[tokio::test]
async fn test_negative_price_and_bad_image_are_rejected() {
    let negative = write_catalog(
        r#"[{"id": 1, "title": "Tênis", "price": -1, "image": "https://example.com/a.jpg"}]"#,
    );
    let bad_image = write_catalog(r#"[{"id": 2, "title": "Tênis", "price": 1, "image": "not a url"}]"#);

    assert!(JsonFileCatalog::new(negative.path()).load().await.is_err());
    assert!(JsonFileCatalog::new(bad_image.path()).load().await.is_err());
}

#[tokio::test]
async fn test_duplicate_ids_are_rejected() {
    let file = write_catalog(
        r#"[
            {"id": 1, "title": "Tênis A", "price": 1, "image": "https://example.com/a.jpg"},
            {"id": 1, "title": "Tênis B", "price": 2, "image": "https://example.com/b.jpg"}
        ]"#,
    );

    let result = JsonFileCatalog::new(file.path()).load().await;

    assert!(matches!(
        result,
        Err(CatalogError::Invalid(CatalogBuildError::DuplicateId { id: ProductId(1) }))
    ));
}

#[test]
fn test_builtin_records_load_outside_async_context() {
    let catalog = tokio_test::block_on(BuiltinCatalog.load());

    let catalog = tokio_test::assert_ok!(catalog);
    assert!(catalog.products().iter().all(|p| p.title.starts_with("Tênis")));
}
