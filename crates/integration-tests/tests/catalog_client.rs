//! Integration tests for the catalog client against an in-process catalog.

#![allow(clippy::unwrap_used)]

use fakestore_core::{Price, ProductId};
use fakestore_integration_tests::FakeCatalog;
use fakestore_storefront::catalog::{CatalogClient, CatalogError, categories};

// =============================================================================
// Listing
// =============================================================================

#[tokio::test]
async fn test_get_products_lists_catalog() {
    let catalog = FakeCatalog::spawn().await;
    let client = CatalogClient::new(&catalog.config(0).catalog);

    let products = client.get_products().await.unwrap();

    assert_eq!(products.len(), 3);
    assert_eq!(products[0].id, ProductId::Number(1));
    assert_eq!(products[1].price, Price::from_cents(6400));
    assert_eq!(categories(&products), vec!["men's clothing", "electronics"]);
}

// =============================================================================
// Single Product
// =============================================================================

#[tokio::test]
async fn test_get_product_parses_fields() {
    let catalog = FakeCatalog::spawn().await;
    let client = CatalogClient::new(&catalog.config(0).catalog);

    let product = client.get_product(&ProductId::Number(14)).await.unwrap();

    assert_eq!(product.title, "Samsung 49-Inch CHG90 Curved Gaming Monitor");
    assert_eq!(product.price, Price::from_cents(99_999));
    assert_eq!(product.category, "electronics");
    let rating = product.rating.unwrap();
    assert_eq!(rating.count, 140);
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let catalog = FakeCatalog::spawn().await;
    let client = CatalogClient::new(&catalog.config(0).catalog);

    let err = client.get_product(&ProductId::Number(999)).await.unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(_)), "got {err:?}");
}

#[tokio::test]
async fn test_rate_limit_reports_retry_after() {
    let catalog = FakeCatalog::spawn().await;
    let client = CatalogClient::new(&catalog.config(0).catalog);

    let err = client.get_product(&"limited".into()).await.unwrap_err();
    assert!(matches!(err, CatalogError::RateLimited(7)), "got {err:?}");
}

#[tokio::test]
async fn test_server_error_keeps_status_and_body() {
    let catalog = FakeCatalog::spawn().await;
    let client = CatalogClient::new(&catalog.config(0).catalog);

    let err = client.get_product(&"broken".into()).await.unwrap_err();
    match err {
        CatalogError::Status { status, body } => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "upstream exploded");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_body_is_parse_error() {
    let catalog = FakeCatalog::spawn().await;
    let client = CatalogClient::new(&catalog.config(0).catalog);

    let err = client.get_product(&"garbage".into()).await.unwrap_err();
    assert!(matches!(err, CatalogError::Parse(_)), "got {err:?}");
}

// =============================================================================
// Caching
// =============================================================================

#[tokio::test]
async fn test_responses_are_cached() {
    let catalog = FakeCatalog::spawn().await;
    let client = CatalogClient::new(&catalog.config(300).catalog);

    client.get_products().await.unwrap();
    client.get_products().await.unwrap();
    client.get_product(&ProductId::Number(1)).await.unwrap();
    client.get_product(&ProductId::Number(1)).await.unwrap();

    assert_eq!(catalog.hits(), 2);
}

#[tokio::test]
async fn test_zero_ttl_disables_cache() {
    let catalog = FakeCatalog::spawn().await;
    let client = CatalogClient::new(&catalog.config(0).catalog);

    client.get_product(&ProductId::Number(1)).await.unwrap();
    client.get_product(&ProductId::Number(1)).await.unwrap();

    assert_eq!(catalog.hits(), 2);
}

#[tokio::test]
async fn test_not_found_is_not_cached() {
    let catalog = FakeCatalog::spawn().await;
    let client = CatalogClient::new(&catalog.config(300).catalog);

    assert!(client.get_product(&ProductId::Number(999)).await.is_err());
    assert!(client.get_product(&ProductId::Number(999)).await.is_err());

    assert_eq!(catalog.hits(), 2);
}
