//! Query operations for the analytics dashboard.
//!
//! Each module provides a query struct that borrows from a
//! [`Dashboard`](crate::Dashboard) and exposes a `fetch` method returning a
//! cache-backed [`QueryHandle`](crate::cache::QueryHandle) for its
//! resource.

pub mod customers;
pub mod frequency;
pub mod purchases;

pub use customers::CustomerQuery;
pub use frequency::FrequencyQuery;
pub use purchases::PurchaseQuery;
