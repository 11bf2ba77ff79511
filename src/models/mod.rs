pub mod catalog;
pub mod cart;
pub mod intent;
pub mod product;

pub use catalog::*;
pub use cart::*;
pub use intent::*;
pub use product::*;
