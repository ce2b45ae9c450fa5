use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// PriceRange — one histogram bucket of the purchase-frequency chart
// ---------------------------------------------------------------------------

/// A labeled price bucket and the number of purchases that fell in it.
///
/// The backend labels buckets as `"min-max"` (older deployments emit
/// `"min - max"`); [`bucket_label`](crate::view::frequency_chart::bucket_label)
/// accepts both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub range: String,
    pub count: u32,
}

// ---------------------------------------------------------------------------
// FrequencyParams — date-range filter for the histogram
// ---------------------------------------------------------------------------

/// Optional date-range filter for `GET /purchase-frequency`.
/// Endpoints are ISO date-time strings; absent fields mean no filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrequencyParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}
