//! Dashboard view layer: render-state derivation and the interaction state
//! machines behind the chart, the customer list, and the purchase modal.
//!
//! View structs own display/interaction state only -- queries stay in the
//! cache layer, and each view derives its request parameters from its own
//! state on demand.

pub mod customer_list;
pub mod frequency_chart;
pub mod purchase_modal;

pub use customer_list::CustomerListState;
pub use frequency_chart::FrequencyChartState;
pub use purchase_modal::PurchaseModalState;

use std::sync::Arc;

use crate::cache::QueryState;
use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// RenderState
// ---------------------------------------------------------------------------

/// What a query-bound view should display. Exactly one variant at a time,
/// derived from the hook state rather than tracked as separate flags, so
/// "loading and error at once" is unrepresentable.
#[derive(Debug, Clone)]
pub enum RenderState<T> {
    Loading,
    Failed(Arc<DashboardError>),
    Empty,
    Ready(Vec<T>),
}

impl<T: Clone> RenderState<T> {
    /// Derive the render state from a list query's observable state.
    ///
    /// `not_found_is_empty` is the list-level carve-out: a 404 from a
    /// search renders as "no results" instead of an error banner.
    pub fn from_query(state: &QueryState<Vec<T>>, not_found_is_empty: bool) -> Self {
        if state.is_loading() {
            return RenderState::Loading;
        }
        if let Some(error) = &state.error {
            if not_found_is_empty && error.is_not_found() {
                return RenderState::Empty;
            }
            return RenderState::Failed(error.clone());
        }
        match &state.data {
            Some(items) if items.is_empty() => RenderState::Empty,
            Some(items) => RenderState::Ready(items.clone()),
            // Pending without a fetch: disabled or not yet started.
            None => RenderState::Loading,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RenderState::Empty)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RenderState::Failed(_))
    }
}

/// Fixed message for generic load failures.
pub const LOAD_FAILED_MESSAGE: &str = "데이터를 불러오지 못했습니다.";

/// Empty-state message for the customer search.
pub const NO_RESULTS_MESSAGE: &str = "검색 결과가 없습니다.";

/// Empty-state message for a purchase history without entries.
pub const NO_PURCHASES_MESSAGE: &str = "구매 내역이 없습니다.";
