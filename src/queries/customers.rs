//! Customer list query.

use serde_json::Value;

use crate::cache::{QueryHandle, QueryKey};
use crate::config;
use crate::error::Result;
use crate::models::{Customer, CustomersParams};

/// Query interface for `GET /customers`.
///
/// A 404 response surfaces as [`DashboardError::NotFound`]
/// (`error.is_not_found()`), which the list view renders as "no results"
/// rather than a failure.
///
/// [`DashboardError::NotFound`]: crate::error::DashboardError::NotFound
pub struct CustomerQuery<'a> {
    dash: &'a crate::Dashboard,
}

impl<'a> CustomerQuery<'a> {
    pub fn new(dash: &'a crate::Dashboard) -> Self {
        Self { dash }
    }

    /// Observe the customer list under the given search/sort filter.
    pub fn fetch(&self, params: Option<CustomersParams>) -> Result<QueryHandle<Vec<Customer>>> {
        let key = QueryKey::new("customers", params.as_ref())?;
        let api = self.dash.api_handle();
        Ok(self.dash.cache().query(key, move || {
            let api = api.clone();
            let params = params.clone();
            async move {
                api.get::<Value, CustomersParams>(config::CUSTOMERS_PATH, params.as_ref())
                    .await
            }
        }))
    }
}
