use rust_decimal::Decimal;

use crate::{
    models::{
        cart::{CartLineItem, CartState},
        intent::Intent,
    },
    services::cart_store::Dispatch,
    utils::formatting::CurrencyFormatter,
};

pub const CHECKOUT_LABEL: &str = "Finalizar pedido";

/// One rendered cart line.
#[derive(Debug, Clone, PartialEq)]
pub struct CartRowView {
    pub item: CartLineItem,
    pub price_formatted: String,
    pub subtotal: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartViewModel {
    pub rows: Vec<CartRowView>,
    pub total: String,
    pub checkout_label: &'static str,
}

/// Cart table with a quantity stepper and remove affordance per line.
pub struct CartView<'a, D: Dispatch> {
    cart: &'a CartState,
    formatter: &'a CurrencyFormatter,
    dispatch: &'a D,
}

impl<'a, D: Dispatch> CartView<'a, D> {
    pub fn new(cart: &'a CartState, formatter: &'a CurrencyFormatter, dispatch: &'a D) -> Self {
        Self {
            cart,
            formatter,
            dispatch,
        }
    }

    /// Derives the view model. The total is formatted once from the exact
    /// sum of line totals, never from the rounded subtotals.
    pub fn render(&self) -> CartViewModel {
        let rows = self
            .cart
            .items()
            .iter()
            .map(|item| CartRowView {
                item: item.clone(),
                price_formatted: self.formatter.format(item.product.price),
                subtotal: self.formatter.format(item.line_total()),
            })
            .collect();

        let total: Decimal = self.cart.items().iter().map(CartLineItem::line_total).sum();

        CartViewModel {
            rows,
            total: self.formatter.format(total),
            checkout_label: CHECKOUT_LABEL,
        }
    }

    pub fn increment(&self, item: &CartLineItem) {
        self.dispatch.dispatch(Intent::UpdateAmount {
            product_id: item.id(),
            amount: item.amount.saturating_add(1),
        });
    }

    /// No floor is applied here; the store owns that policy.
    pub fn decrement(&self, item: &CartLineItem) {
        self.dispatch.dispatch(Intent::UpdateAmount {
            product_id: item.id(),
            amount: item.amount.saturating_sub(1),
        });
    }

    pub fn remove(&self, item: &CartLineItem) {
        self.dispatch.dispatch(Intent::RemoveItem {
            product_id: item.id(),
        });
    }
}
