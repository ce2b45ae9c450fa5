use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Customer — aggregate purchase stats per customer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    pub name: String,
    /// Number of purchases.
    pub count: u32,
    /// Total purchase amount in KRW.
    pub total_amount: i64,
}

// ---------------------------------------------------------------------------
// CustomerPurchase — one line item of a customer's purchase history
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPurchase {
    /// ISO date or date-time string as sent by the backend.
    pub date: String,
    pub quantity: u32,
    pub product: String,
    /// Unit price in KRW.
    pub price: i64,
    pub img_src: String,
}

// ---------------------------------------------------------------------------
// CustomersParams — search/sort filter for the customer list
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Optional filters for `GET /customers`. Absent fields are omitted from
/// both the query string and the cache key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomersParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
