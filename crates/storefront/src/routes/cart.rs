//! Cart route handlers.
//!
//! Mutations are plain HTML form posts that redirect back to the cart page.
//! All of them go through the single [`CartStore`](fakestore_core::cart::CartStore)
//! held in [`AppState`], which persists the cart after every change.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use fakestore_core::ProductId;
use fakestore_core::cart::{CartState, LineItem};
use serde::Deserialize;
use tracing::instrument;

use super::products::parse_product_id;
use crate::error::Result;
use crate::state::{AppState, SharedCartStore};

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: String,
    pub title: String,
    pub image: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u64,
}

impl From<&LineItem> for CartItemView {
    fn from(item: &LineItem) -> Self {
        let product = item.product();
        Self {
            id: product.id.to_string(),
            title: product.title.clone(),
            image: product.image.clone(),
            quantity: item.quantity(),
            price: product.price.display(),
            line_price: item.subtotal().display(),
        }
    }
}

impl From<&CartState> for CartView {
    fn from(cart: &CartState) -> Self {
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            subtotal: cart.subtotal().display(),
            item_count: cart.item_count(),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: String,
    pub quantity: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
}

fn back_to_cart() -> Redirect {
    Redirect::to("/cart")
}

/// The cart's own id for a posted id, so `42` reaches a line stored as `"42"`.
fn line_id(cart: &SharedCartStore, id: ProductId) -> ProductId {
    cart.state().resolve_id(&id).cloned().unwrap_or(id)
}

/// Display cart page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> impl IntoResponse {
    let cart = state.cart().lock().await.state();
    CartShowTemplate {
        cart: CartView::from(&*cart),
    }
}

/// Add one unit of a product to the cart.
///
/// The product is fetched from the catalog first so the cart holds a
/// snapshot of its current title, price and image.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let id = parse_product_id(&form.product_id)?;
    let product = state.catalog().get_product(&id).await?;

    let cart = state
        .update_cart(move |cart| cart.add_to_cart(&product))
        .await?;
    tracing::info!(product_id = %id, items = cart.item_count(), "Added to cart");

    Ok(back_to_cart())
}

/// Set a line item's quantity. Quantities below 1 remove the item.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Form(form): Form<UpdateCartForm>,
) -> Result<Redirect> {
    let id = parse_product_id(&form.product_id)?;
    state
        .update_cart(move |cart| {
            let id = line_id(cart, id);
            cart.update_quantity(&id, form.quantity)
        })
        .await?;
    Ok(back_to_cart())
}

/// Remove a line item.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Redirect> {
    let id = parse_product_id(&form.product_id)?;
    state
        .update_cart(move |cart| {
            let id = line_id(cart, id);
            cart.remove_from_cart(&id)
        })
        .await?;
    Ok(back_to_cart())
}

/// Empty the cart.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Result<Redirect> {
    state.update_cart(SharedCartStore::clear_cart).await?;
    Ok(back_to_cart())
}

/// Total number of units in the cart, as plain text.
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> String {
    state.cart().lock().await.state().item_count().to_string()
}
