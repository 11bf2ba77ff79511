use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::product::{Product, ProductError, ProductId};

/// One entry of a catalog file. `stock` is optional; absent means unlimited.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CatalogRecord {
    pub id: ProductId,
    pub title: String,
    pub price: Decimal,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogBuildError {
    #[error("Invalid product {id}: {source}")]
    InvalidProduct {
        id: ProductId,
        #[source]
        source: ProductError,
    },

    #[error("Duplicate product id {id}")]
    DuplicateId { id: ProductId },
}

/// Ordered, read-only product list with optional per-product stock.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    stock: HashMap<ProductId, u32>,
}

impl Catalog {
    pub fn from_records(records: Vec<CatalogRecord>) -> Result<Self, CatalogBuildError> {
        let mut catalog = Catalog::default();

        for record in records {
            let id = record.id;
            if catalog.get(id).is_some() {
                return Err(CatalogBuildError::DuplicateId { id });
            }

            let product = Product::new(id, record.title, record.price, record.image)
                .map_err(|source| CatalogBuildError::InvalidProduct { id, source })?;

            if let Some(stock) = record.stock {
                catalog.stock.insert(id, stock);
            }
            catalog.products.push(product);
        }

        Ok(catalog)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// `None` when the product has no stock limit.
    pub fn stock_of(&self, id: ProductId) -> Option<u32> {
        self.stock.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
