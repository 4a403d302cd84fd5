//! List pages: the fetched collection, search, the open form and the
//! selected record for each entity.
//!
//! After every successful write a page closes its form and re-fetches the
//! whole list from the store. Failures leave the form open and post a
//! destructive notice naming the action.

pub mod clients;
pub mod orders;
pub mod products;

pub use clients::ClientsPage;
pub use orders::{OrderRowActions, OrdersPage, PendingConfirmation, StatusFilter};
pub use products::ProductsPage;

use crate::forms::FormErrors;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Saved,
    /// Field errors; nothing was sent.
    Invalid(FormErrors),
    /// The store rejected the write; the notice carries the message.
    Failed,
    /// No form was open.
    Idle,
}
