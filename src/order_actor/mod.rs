//! Order table: item ownership, status transitions and the read-only rule for closed orders.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
