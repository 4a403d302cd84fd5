//! System orchestration, startup, and shutdown logic.

pub mod desk_system;
pub mod error;
pub mod telemetry;

pub use desk_system::*;
pub use error::*;
pub use telemetry::*;
