//! Purchase-frequency histogram query.

use serde_json::Value;

use crate::cache::{QueryHandle, QueryKey};
use crate::config;
use crate::error::Result;
use crate::models::{FrequencyParams, PriceRange};

/// Query interface for `GET /purchase-frequency`.
pub struct FrequencyQuery<'a> {
    dash: &'a crate::Dashboard,
}

impl<'a> FrequencyQuery<'a> {
    pub fn new(dash: &'a crate::Dashboard) -> Self {
        Self { dash }
    }

    /// Observe the histogram for the given date range.
    ///
    /// `params == None` requests the unfiltered histogram with no query
    /// string on the wire; it caches under a different key than
    /// `Some(FrequencyParams::default())`.
    pub fn fetch(&self, params: Option<FrequencyParams>) -> Result<QueryHandle<Vec<PriceRange>>> {
        let key = QueryKey::new("purchase_frequency", params.as_ref())?;
        let api = self.dash.api_handle();
        Ok(self.dash.cache().query(key, move || {
            let api = api.clone();
            let params = params.clone();
            async move {
                api.get::<Value, FrequencyParams>(config::PURCHASE_FREQUENCY_PATH, params.as_ref())
                    .await
            }
        }))
    }
}
