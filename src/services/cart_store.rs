use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::models::{
    cart::{CartLineItem, CartState},
    catalog::Catalog,
    intent::Intent,
    product::ProductId,
};

/// Smallest amount a cart line may hold. Lines leave the cart only through
/// `Intent::RemoveItem`.
pub const MIN_AMOUNT: u32 = 1;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CartStoreError {
    #[error("Product {id} is not in the catalog")]
    UnknownProduct { id: ProductId },

    #[error("Product {id} is not in the cart")]
    NotInCart { id: ProductId },

    #[error("Amount {amount} for product {id} is below the minimum of {min}", min = MIN_AMOUNT)]
    AmountBelowMinimum { id: ProductId, amount: u32 },

    #[error("Requested {requested} of product {id} but only {available} in stock")]
    OutOfStock {
        id: ProductId,
        requested: u32,
        available: u32,
    },
}

/// Sink for intents emitted by views.
pub trait Dispatch {
    fn dispatch(&self, intent: Intent);
}

/// Sending half of the store's intent channel.
#[derive(Clone, Debug)]
pub struct Dispatcher {
    tx: mpsc::UnboundedSender<Intent>,
}

impl Dispatch for Dispatcher {
    fn dispatch(&self, intent: Intent) {
        debug!("Dispatching {}", intent);
        if self.tx.send(intent).is_err() {
            warn!(
                "Cart store is gone, dropping {} for product {}",
                intent,
                intent.product_id()
            );
        }
    }
}

/// Applies one intent to `state`. A rejected intent leaves `state` untouched.
pub fn reduce(state: &mut CartState, catalog: &Catalog, intent: Intent) -> Result<(), CartStoreError> {
    match intent {
        Intent::AddToCart { product_id } => {
            let product = catalog
                .get(product_id)
                .ok_or(CartStoreError::UnknownProduct { id: product_id })?;

            let requested = state.amount_of(product_id).saturating_add(1);
            check_stock(catalog, product_id, requested)?;

            match state.get_mut(product_id) {
                Some(item) => item.amount = requested,
                None => state.push(CartLineItem {
                    product: product.clone(),
                    amount: MIN_AMOUNT,
                }),
            }
        }
        Intent::UpdateAmount { product_id, amount } => {
            if state.get(product_id).is_none() {
                return Err(CartStoreError::NotInCart { id: product_id });
            }
            if amount < MIN_AMOUNT {
                return Err(CartStoreError::AmountBelowMinimum {
                    id: product_id,
                    amount,
                });
            }
            check_stock(catalog, product_id, amount)?;

            if let Some(item) = state.get_mut(product_id) {
                item.amount = amount;
            }
        }
        Intent::RemoveItem { product_id } => {
            state
                .remove(product_id)
                .ok_or(CartStoreError::NotInCart { id: product_id })?;
        }
    }
    Ok(())
}

fn check_stock(catalog: &Catalog, id: ProductId, requested: u32) -> Result<(), CartStoreError> {
    match catalog.stock_of(id) {
        Some(available) if requested > available => Err(CartStoreError::OutOfStock {
            id,
            requested,
            available,
        }),
        _ => Ok(()),
    }
}

/// Owner of the cart state and the only place it is mutated.
pub struct CartStore {
    catalog: Arc<Catalog>,
    state: CartState,
    intents: mpsc::UnboundedReceiver<Intent>,
    snapshots: watch::Sender<CartState>,
}

impl CartStore {
    pub fn new(catalog: Arc<Catalog>) -> (Self, Dispatcher) {
        Self::with_state(catalog, CartState::new())
    }

    pub fn with_state(catalog: Arc<Catalog>, state: CartState) -> (Self, Dispatcher) {
        let (tx, intents) = mpsc::unbounded_channel();
        let (snapshots, _) = watch::channel(state.clone());
        let store = Self {
            catalog,
            state,
            intents,
            snapshots,
        };
        (store, Dispatcher { tx })
    }

    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Receiver that observes every accepted state transition.
    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.snapshots.subscribe()
    }

    pub fn apply(&mut self, intent: Intent) -> Result<(), CartStoreError> {
        match reduce(&mut self.state, &self.catalog, intent) {
            Ok(()) => {
                info!("Applied {} ({} lines in cart)", intent, self.state.len());
                self.snapshots.send_replace(self.state.clone());
                Ok(())
            }
            Err(e) => {
                warn!("Rejected {}: {}", intent, e);
                Err(e)
            }
        }
    }

    /// Applies every intent already queued, returning the rejections.
    pub fn process_pending(&mut self) -> Vec<CartStoreError> {
        let mut rejected = Vec::new();
        while let Ok(intent) = self.intents.try_recv() {
            if let Err(e) = self.apply(intent) {
                rejected.push(e);
            }
        }
        rejected
    }

    /// Applies intents until every `Dispatcher` has been dropped, returning
    /// the final state and the rejections in arrival order.
    pub async fn run(mut self) -> (CartState, Vec<CartStoreError>) {
        let mut rejected = Vec::new();
        while let Some(intent) = self.intents.recv().await {
            if let Err(e) = self.apply(intent) {
                rejected.push(e);
            }
        }
        debug!(
            "All dispatchers dropped, cart store stopping ({} rejected)",
            rejected.len()
        );
        (self.state, rejected)
    }
}
