//! Data-access layer: one cloneable handle per table.
//!
//! Handles hold no state of their own; the owning actor is the only copy of
//! each collection, so every page reads the same data.

#[macro_use]
mod macros;

pub mod client_store;
pub mod order_store;
pub mod product_store;

pub use client_store::ClientStore;
pub use order_store::OrderStore;
pub use product_store::ProductStore;
