//! Catalog browsing commands.

use fakestore_core::{Product, ProductId};
use fakestore_storefront::catalog::CatalogClient;
use fakestore_storefront::config::StorefrontConfig;

/// Print the catalog, optionally limited to one category.
///
/// # Errors
///
/// Returns an error if the catalog request fails.
#[allow(clippy::print_stdout)]
pub async fn list(
    config: &StorefrontConfig,
    category: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let products = CatalogClient::new(&config.catalog).get_products().await?;

    for product in products
        .iter()
        .filter(|p| category.is_none_or(|c| p.category == c))
    {
        println!("{}", summary_line(product));
    }
    Ok(())
}

/// Print one product in full.
///
/// # Errors
///
/// Returns an error if the id is empty or the product cannot be fetched.
#[allow(clippy::print_stdout)]
pub async fn show(config: &StorefrontConfig, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let id: ProductId = id.parse()?;
    let product = CatalogClient::new(&config.catalog).get_product(&id).await?;

    println!("{}", product.title);
    println!("  id:       {}", product.id);
    println!("  price:    {}", product.price.display());
    println!("  category: {}", product.category);
    if let Some(rating) = product.rating {
        println!("  rating:   {} ({} ratings)", rating.rate, rating.count);
    }
    if !product.description.is_empty() {
        println!();
        println!("{}", product.description);
    }
    Ok(())
}

fn summary_line(product: &Product) -> String {
    format!(
        "{:>4}  {:>9}  {}",
        product.id.to_string(),
        product.price.display(),
        product.title
    )
}
