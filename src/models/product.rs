use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        ProductId(id)
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Immutable catalog entry. Views never mutate products.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Validate)]
pub struct Product {
    pub id: ProductId,

    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    #[validate(custom = "validate_title")]
    pub title: String,

    #[validate(custom = "validate_price")]
    pub price: Decimal,

    #[validate(url(message = "Image must be a valid URL"))]
    pub image: String,
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::new("Title is required"));
    }
    Ok(())
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ValidationError::new("Price must not be negative"));
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    #[error("Validation error: {0}")]
    ValidationError(#[from] validator::ValidationErrors),
}

impl Product {
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        price: Decimal,
        image: impl Into<String>,
    ) -> Result<Self, ProductError> {
        let product = Self {
            id: id.into(),
            title: title.into().trim().to_string(),
            price,
            image: image.into(),
        };
        product.validate()?;
        Ok(product)
    }
}
