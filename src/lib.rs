//! Order desk: clients, a product catalog, and orders (quotes and invoices)
//! with a KPI dashboard.
//!
//! Each table is owned by one [`actor_framework::ResourceActor`]; the
//! [`stores`] wrap the actor handles, and the [`pages`] and [`dashboard`]
//! view models sit on top of the stores.

pub mod actor_framework;
pub mod app_system;
pub mod client_actor;
pub mod config;
pub mod dashboard;
pub mod domain;
pub mod format;
pub mod forms;
pub mod notify;
pub mod order_actor;
pub mod pages;
pub mod product_actor;
pub mod shell;
pub mod storage;
pub mod stores;
pub mod views;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
mod mock_framework;
