use serde::{Deserialize, Serialize};

use crate::models::product::ProductId;

/// A named request to change the cart. Views emit these; only the cart store
/// applies them.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Intent {
    AddToCart { product_id: ProductId },
    UpdateAmount { product_id: ProductId, amount: u32 },
    RemoveItem { product_id: ProductId },
}

impl Intent {
    pub fn product_id(&self) -> ProductId {
        match self {
            Intent::AddToCart { product_id }
            | Intent::UpdateAmount { product_id, .. }
            | Intent::RemoveItem { product_id } => *product_id,
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Intent::AddToCart { product_id } => write!(f, "add-to-cart({})", product_id),
            Intent::UpdateAmount { product_id, amount } => {
                write!(f, "update-amount({}, {})", product_id, amount)
            }
            Intent::RemoveItem { product_id } => write!(f, "remove-item({})", product_id),
        }
    }
}
