//! Product catalog records.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Global Trade Item Number.
    pub gtin: String,
    #[serde(default)]
    pub price: Price,
}

/// Body of `POST /product/add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateProduct {
    pub name: String,
    pub gtin: String,
    pub price: Price,
}

/// Body of `POST /product/edit/{id}`. The id travels in the path.
pub type UpdateProduct = CreateProduct;
