pub mod cart_store;
pub mod catalog_service;

pub use cart_store::*;
pub use catalog_service::*;
