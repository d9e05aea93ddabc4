//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use fakestore_core::{Product, ProductId};
use serde::Deserialize;
use tracing::instrument;

use crate::catalog;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: String,
    pub image: String,
    /// e.g. "3.9 (120)"; empty when the product has no rating
    pub rating: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.title.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
            price: product.price.display(),
            image: product.image.clone(),
            rating: product
                .rating
                .map(|r| format!("{} ({})", r.rate, r.count))
                .unwrap_or_default(),
        }
    }
}

/// Category filter link.
#[derive(Clone)]
pub struct CategoryLink {
    pub name: String,
    /// Form-encoded name for use in a query string
    pub query: String,
    pub selected: bool,
}

/// Category filter query parameters.
#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    pub category: Option<String>,
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<ProductView>,
    pub categories: Vec<CategoryLink>,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductView,
}

/// Parse a product id from a path segment or form field.
pub(crate) fn parse_product_id(raw: &str) -> Result<ProductId> {
    raw.parse()
        .map_err(|e| AppError::BadRequest(format!("{e}: {raw:?}")))
}

/// Display product listing page.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<CategoryQuery>,
) -> Result<impl IntoResponse> {
    let products = state.catalog().get_products().await?;
    let selected = query.category.filter(|c| !c.is_empty());

    let categories = catalog::categories(&products)
        .into_iter()
        .map(|name| CategoryLink {
            query: url::form_urlencoded::byte_serialize(name.as_bytes()).collect(),
            selected: selected.as_deref() == Some(name.as_str()),
            name,
        })
        .collect();

    let products = products
        .iter()
        .filter(|p| selected.as_deref().is_none_or(|c| p.category == c))
        .map(ProductView::from)
        .collect();

    Ok(ProductsIndexTemplate {
        products,
        categories,
    })
}

/// Display product detail page.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let id = parse_product_id(&id)?;
    let product = state.catalog().get_product(&id).await?;

    Ok(ProductShowTemplate {
        product: ProductView::from(&product),
    })
}
