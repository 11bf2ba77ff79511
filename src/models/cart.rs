use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::product::{Product, ProductId};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CartError {
    #[error("Amount for product {id} must be at least 1")]
    ZeroAmount { id: ProductId },

    #[error("Product {id} appears more than once in the cart")]
    DuplicateLine { id: ProductId },
}

/// A product plus the quantity of it currently in the cart.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CartLineItem {
    #[serde(flatten)]
    pub product: Product,
    pub amount: u32,
}

impl CartLineItem {
    pub fn new(product: Product, amount: u32) -> Result<Self, CartError> {
        if amount == 0 {
            return Err(CartError::ZeroAmount { id: product.id });
        }
        Ok(Self { product, amount })
    }

    pub fn id(&self) -> ProductId {
        self.product.id
    }

    /// Exact, unrounded `price * amount`.
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.amount)
    }
}

/// Cart contents in insertion order, one line per product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartState {
    items: Vec<CartLineItem>,
}

impl CartState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<CartLineItem>) -> Result<Self, CartError> {
        let mut state = Self::new();
        for item in items {
            if state.get(item.id()).is_some() {
                return Err(CartError::DuplicateLine { id: item.id() });
            }
            state.items.push(item);
        }
        Ok(state)
    }

    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn get(&self, id: ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Units of `id` currently in the cart, 0 when absent.
    pub fn amount_of(&self, id: ProductId) -> u32 {
        self.get(id).map(|item| item.amount).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines.
    pub fn unit_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.amount)).sum()
    }

    pub(crate) fn get_mut(&mut self, id: ProductId) -> Option<&mut CartLineItem> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    pub(crate) fn push(&mut self, item: CartLineItem) {
        self.items.push(item);
    }

    pub(crate) fn remove(&mut self, id: ProductId) -> Option<CartLineItem> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }
}
