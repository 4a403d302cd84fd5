//! Landing page: KPIs for a selectable period and the open-orders table.

pub mod board;
pub mod kpi;
pub mod period;

pub use board::Dashboard;
pub use kpi::{compute_kpis, Kpis};
pub use period::{Period, PeriodWindow};
