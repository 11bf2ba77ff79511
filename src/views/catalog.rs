use crate::{
    models::{cart::CartState, intent::Intent, product::Product, product::ProductId},
    services::cart_store::Dispatch,
    utils::formatting::CurrencyFormatter,
};

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntryView {
    pub id: ProductId,
    pub title: String,
    pub image: String,
    pub price_formatted: String,
    /// Units of this product already in the cart.
    pub in_cart: u32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatalogViewModel {
    pub entries: Vec<CatalogEntryView>,
}

/// Product listing with an add-to-cart affordance per entry.
pub struct CatalogView<'a, D: Dispatch> {
    cart: &'a CartState,
    formatter: &'a CurrencyFormatter,
    dispatch: &'a D,
}

impl<'a, D: Dispatch> CatalogView<'a, D> {
    pub fn new(cart: &'a CartState, formatter: &'a CurrencyFormatter, dispatch: &'a D) -> Self {
        Self {
            cart,
            formatter,
            dispatch,
        }
    }

    pub fn render(&self, products: &[Product]) -> CatalogViewModel {
        let entries = products
            .iter()
            .map(|product| CatalogEntryView {
                id: product.id,
                title: product.title.clone(),
                image: product.image.clone(),
                price_formatted: self.formatter.format(product.price),
                in_cart: self.cart.amount_of(product.id),
            })
            .collect();

        CatalogViewModel { entries }
    }

    pub fn add_to_cart(&self, product: &Product) {
        self.dispatch.dispatch(Intent::AddToCart {
            product_id: product.id,
        });
    }
}
