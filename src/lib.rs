//! Client SDK for the shopping-mall purchase analytics dashboard.
//!
//! Wraps the analytics backend's JSON API (purchase-frequency histogram,
//! customer list, per-customer purchase history) behind a typed client and
//! a deduplicating, retrying query cache with observable fetch state, plus
//! the dashboard's view-state machines and Korean-locale formatting.
//!
//! # Quick start
//!
//! ```no_run
//! use storefront_dashboard::Dashboard;
//!
//! #[tokio::main]
//! async fn main() -> storefront_dashboard::Result<()> {
//!     let dashboard = Dashboard::builder().build()?;
//!
//!     // Observe the customer list; equal parameters share one cache entry.
//!     let mut customers = dashboard.customers().fetch(None)?;
//!     let state = customers.ready().await;
//!     for customer in state.data.unwrap_or_default() {
//!         println!("{}", storefront_dashboard::view::customer_list::row_line(&customer));
//!     }
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod queries;
pub mod view;

pub use cache::{FetchStatus, QueryCache, QueryHandle, QueryKey, QueryState, QueryStatus};
pub use client::ApiClient;
pub use error::{DashboardError, Result};

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

// ---------------------------------------------------------------------------
// DashboardBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`Dashboard`] instance.
///
/// Use [`Dashboard::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](DashboardBuilder::build).
pub struct DashboardBuilder {
    base_url: String,
    timeout: Duration,
    retry: u32,
    gc_time: Duration,
}

impl Default for DashboardBuilder {
    fn default() -> Self {
        Self {
            base_url: config::DEFAULT_BASE_URL.to_string(),
            timeout: config::DEFAULT_TIMEOUT,
            retry: config::DEFAULT_RETRY,
            gc_time: config::DEFAULT_GC_TIME,
        }
    }
}

impl DashboardBuilder {
    /// Point the client at a different API base (default
    /// `http://localhost:4000/api`).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the transport timeout for requests. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Number of retries after a failed fetch, applied to every query.
    /// Defaults to 1.
    pub fn retry(mut self, retry: u32) -> Self {
        self.retry = retry;
        self
    }

    /// Inactivity window after which unobserved cache entries are evicted.
    /// Defaults to 5 minutes.
    pub fn gc_time(mut self, gc_time: Duration) -> Self {
        self.gc_time = gc_time;
        self
    }

    /// Build the dashboard, constructing the HTTP client and the
    /// process-wide query cache.
    pub fn build(self) -> Result<Dashboard> {
        let api = Arc::new(ApiClient::new(self.base_url, self.timeout)?);
        let cache = QueryCache::new(self.retry, self.gc_time);
        Ok(Dashboard { api, cache })
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Root composition of the dashboard client.
///
/// Owns the configured [`ApiClient`] and the process-wide [`QueryCache`]
/// and hands out per-resource query interfaces as lightweight borrowing
/// wrappers. Create one per process -- or one per test, tearing it down
/// with [`close()`](Dashboard::close).
pub struct Dashboard {
    api: Arc<ApiClient>,
    cache: QueryCache,
}

impl Dashboard {
    /// Create a new builder for configuring the dashboard.
    pub fn builder() -> DashboardBuilder {
        DashboardBuilder::default()
    }

    // -- Query accessors ---------------------------------------------------

    /// Access the purchase-frequency histogram query.
    pub fn frequency(&self) -> queries::FrequencyQuery<'_> {
        queries::FrequencyQuery::new(self)
    }

    /// Access the customer list query.
    pub fn customers(&self) -> queries::CustomerQuery<'_> {
        queries::CustomerQuery::new(self)
    }

    /// Access the per-customer purchase-history query.
    pub fn purchases(&self) -> queries::PurchaseQuery<'_> {
        queries::PurchaseQuery::new(self)
    }

    // -- Shared infrastructure ---------------------------------------------

    /// The query cache shared by every operation of this dashboard.
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// The configured HTTP client.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub(crate) fn api_handle(&self) -> Arc<ApiClient> {
        self.api.clone()
    }

    /// Consume the dashboard and drop all cached state. Outstanding query
    /// handles observe their entries closing.
    pub fn close(self) {
        self.cache.clear();
    }
}

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Dashboard(base_url={}, cached_queries={})",
            self.api.base_url(),
            self.cache.len()
        )
    }
}
