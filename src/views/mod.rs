//! Read-only detail views, already formatted for display.

mod client_view;
mod order_view;
mod product_view;

pub use client_view::ClientView;
pub use order_view::{OrderLineView, OrderView};
pub use product_view::ProductView;
