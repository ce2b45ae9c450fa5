//! Purchase-history query for a single customer.

use std::sync::Arc;

use serde_json::Value;

use crate::cache::{QueryHandle, QueryKey};
use crate::client::ApiClient;
use crate::config;
use crate::error::{DashboardError, Result};
use crate::models::CustomerPurchase;

/// Query interface for `GET /customers/{id}/purchases`.
pub struct PurchaseQuery<'a> {
    dash: &'a crate::Dashboard,
}

impl<'a> PurchaseQuery<'a> {
    pub fn new(dash: &'a crate::Dashboard) -> Self {
        Self { dash }
    }

    /// Observe a customer's purchase history.
    ///
    /// With no customer selected (`None`) the query is gated off: the
    /// returned handle reports fetch status `Idle` and no request is
    /// issued. This is a guard, not an error path.
    pub fn fetch(&self, customer_id: Option<i64>) -> Result<QueryHandle<Vec<CustomerPurchase>>> {
        if customer_id.is_none() {
            return Ok(self.dash.cache().disabled());
        }

        let key = QueryKey::new("customer_purchases", customer_id.as_ref())?;
        let api = self.dash.api_handle();
        Ok(self
            .dash
            .cache()
            .query(key, move || load_purchases(api.clone(), customer_id)))
    }
}

/// Loader behind the gate. Rechecks the id so a fetch that somehow runs
/// without one fails loudly instead of hitting a bogus URL.
pub(crate) async fn load_purchases(api: Arc<ApiClient>, customer_id: Option<i64>) -> Result<Value> {
    let Some(id) = customer_id else {
        return Err(DashboardError::InvalidArgument(
            "customer ID is required".into(),
        ));
    };
    api.get::<Value, ()>(&config::customer_purchases_path(id), None)
        .await
}
