use std::time::Duration;

/// Default API base, matching the local development backend.
pub const DEFAULT_BASE_URL: &str = "http://localhost:4000/api";

pub const PURCHASE_FREQUENCY_PATH: &str = "/purchase-frequency";
pub const CUSTOMERS_PATH: &str = "/customers";

pub fn customer_purchases_path(customer_id: i64) -> String {
    format!("/customers/{}/purchases", customer_id)
}

/// Transport timeout applied to every request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Failed fetches are retried once before the error surfaces.
pub const DEFAULT_RETRY: u32 = 1;

/// Unobserved cache entries expire after five minutes of inactivity.
pub const DEFAULT_GC_TIME: Duration = Duration::from_secs(300);
