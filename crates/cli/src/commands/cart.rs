//! Cart commands.
//!
//! Each invocation opens the persisted cart, applies one operation (which
//! writes the cart back), and prints the result.

use fakestore_core::{EmptyProductId, ProductId};
use fakestore_core::cart::{CartState, CartStore};
use fakestore_storefront::catalog::CatalogClient;
use fakestore_storefront::config::StorefrontConfig;
use fakestore_storefront::storage::FileStorage;

fn open(config: &StorefrontConfig) -> CartStore<FileStorage> {
    CartStore::with_slot_key(
        FileStorage::new(&config.cart.storage_dir),
        config.cart.slot_key.clone(),
    )
}

/// The cart's own id for `raw`, so `42` reaches a line stored as `"42"`.
fn line_id(store: &CartStore<FileStorage>, raw: &str) -> Result<ProductId, EmptyProductId> {
    let id: ProductId = raw.parse()?;
    Ok(store.state().resolve_id(&id).cloned().unwrap_or(id))
}

/// Print the cart.
pub fn show(config: &StorefrontConfig) {
    print_cart(&open(config).state());
}

/// Fetch a product from the catalog and add one unit of it.
///
/// # Errors
///
/// Returns an error if the id is empty or the product cannot be fetched.
pub async fn add(config: &StorefrontConfig, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let id: ProductId = id.parse()?;
    let product = CatalogClient::new(&config.catalog).get_product(&id).await?;

    let state = open(config).add_to_cart(&product);
    print_cart(&state);
    Ok(())
}

/// Set an item's quantity. Quantities below 1 remove the item.
///
/// # Errors
///
/// Returns an error if the id is empty.
pub fn update(
    config: &StorefrontConfig,
    id: &str,
    quantity: i64,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open(config);
    let id = line_id(&store, id)?;
    print_cart(&store.update_quantity(&id, quantity));
    Ok(())
}

/// Remove an item.
///
/// # Errors
///
/// Returns an error if the id is empty.
pub fn remove(config: &StorefrontConfig, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open(config);
    let id = line_id(&store, id)?;
    print_cart(&store.remove_from_cart(&id));
    Ok(())
}

/// Empty the cart.
pub fn clear(config: &StorefrontConfig) {
    print_cart(&open(config).clear_cart());
}

#[allow(clippy::print_stdout)]
fn print_cart(cart: &CartState) {
    for line in render(cart) {
        println!("{line}");
    }
}

fn render(cart: &CartState) -> Vec<String> {
    if cart.is_empty() {
        return vec!["Your cart is empty.".to_string()];
    }

    let mut lines: Vec<String> = cart
        .items()
        .iter()
        .map(|item| {
            let product = item.product();
            format!(
                "{:>4}  {:>3} x {:>9} = {:>9}  {}",
                product.id.to_string(),
                item.quantity(),
                product.price.display(),
                item.subtotal().display(),
                product.title
            )
        })
        .collect();
    lines.push(format!(
        "Total: {} ({} items)",
        cart.subtotal().display(),
        cart.item_count()
    ));
    lines
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use fakestore_core::{Price, Product};

    use super::*;

    #[test]
    fn test_line_id_matches_text_id() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = CartStore::initialize(FileStorage::new(dir.path()));
        store.add_to_cart(&Product::new("42", "Text id", Price::from_cents(100)));
        store.add_to_cart(&Product::new("007", "Padded", Price::from_cents(100)));

        assert_eq!(line_id(&store, "42").unwrap(), ProductId::from("42"));
        assert_eq!(line_id(&store, "007").unwrap(), ProductId::from("007"));
        assert_eq!(line_id(&store, "9").unwrap(), ProductId::Number(9));
        assert!(line_id(&store, " ").is_err());
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render(&CartState::new()), vec!["Your cart is empty."]);
    }

    #[test]
    fn test_render_items_and_total() {
        let cart = CartState::new()
            .with_product_added(&Product::new(1, "Backpack", Price::from_cents(10995)))
            .with_product_added(&Product::new(1, "Backpack", Price::from_cents(10995)));

        assert_eq!(
            render(&cart),
            vec![
                "   1    2 x   $109.95 =   $219.90  Backpack",
                "Total: $219.90 (2 items)",
            ]
        );
    }
}
