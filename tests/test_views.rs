//! View-state contracts: sort cycling, draft vs applied filters, date-range
//! gating and normalization, modal lifecycle, and render-state derivation.

use std::sync::Arc;

use storefront_dashboard::models::{Customer, CustomerPurchase, CustomersParams, PriceRange, SortOrder};
use storefront_dashboard::view::frequency_chart::{bucket_label, render_rows};
use storefront_dashboard::view::purchase_modal::purchase_line;
use storefront_dashboard::view::{
    CustomerListState, FrequencyChartState, PurchaseModalState, RenderState,
};
use storefront_dashboard::{DashboardError, FetchStatus, QueryState, QueryStatus};

fn customer(id: i64) -> Customer {
    Customer {
        id,
        name: "김철수".to_string(),
        count: 5,
        total_amount: 300000,
    }
}

// ---------------------------------------------------------------------------
// Customer list
// ---------------------------------------------------------------------------

#[test]
fn sort_toggle_cycles_through_three_states() {
    let mut list = CustomerListState::new();
    assert_eq!(list.sort(), None);
    assert_eq!(list.sort_label(), "정렬");

    list.cycle_sort();
    assert_eq!(list.sort(), Some(SortOrder::Desc));
    assert_eq!(list.sort_label(), "내림차순");

    list.cycle_sort();
    assert_eq!(list.sort(), Some(SortOrder::Asc));
    assert_eq!(list.sort_label(), "오름차순");

    list.cycle_sort();
    assert_eq!(list.sort(), None);
}

#[test]
fn typing_in_the_search_box_does_not_change_the_applied_filter() {
    let mut list = CustomerListState::new();
    list.set_draft("김철수");

    assert_eq!(list.draft(), "김철수");
    assert_eq!(list.applied_search(), None);
    assert_eq!(list.params().name, None);
}

#[test]
fn submitting_applies_the_draft() {
    let mut list = CustomerListState::new();
    list.set_draft("김철수");
    list.submit_search();

    assert_eq!(list.applied_search(), Some("김철수"));
    assert_eq!(list.params().name.as_deref(), Some("김철수"));

    // an emptied draft, once submitted, removes the filter
    list.set_draft("");
    list.submit_search();
    assert_eq!(list.params().name, None);
}

#[test]
fn reset_clears_draft_applied_filter_and_sort_together() {
    let mut list = CustomerListState::new();
    list.cycle_sort();
    list.set_draft("이영희");
    list.submit_search();

    list.reset();

    assert_eq!(list.draft(), "");
    assert_eq!(list.applied_search(), None);
    assert_eq!(list.sort(), None);
    assert_eq!(list.params(), CustomersParams::default());
}

#[test]
fn row_line_formats_count_and_total() {
    let line = storefront_dashboard::view::customer_list::row_line(&customer(7));
    assert!(line.contains("김철수"));
    assert!(line.contains("5회"));
    assert!(line.contains("300,000원"));
}

// ---------------------------------------------------------------------------
// Frequency chart
// ---------------------------------------------------------------------------

#[test]
fn date_filter_requires_both_endpoints() {
    let mut chart = FrequencyChartState::new();
    assert!(!chart.can_apply());

    chart.set_draft_from("2024-07-15");
    assert!(!chart.can_apply());
    chart.apply().unwrap();
    assert_eq!(chart.applied(), None);

    chart.set_draft_to("2024-07-20");
    assert!(chart.can_apply());
}

#[test]
fn applying_normalizes_dates_to_utc_day_start() {
    let mut chart = FrequencyChartState::new();
    chart.set_draft_from("2024-07-15");
    chart.set_draft_to("2024-07-20");
    chart.apply().unwrap();

    assert_eq!(
        chart.applied(),
        Some(("2024-07-15T00:00:00.000Z", "2024-07-20T00:00:00.000Z"))
    );
    let params = chart.params();
    assert_eq!(params.from.as_deref(), Some("2024-07-15T00:00:00.000Z"));
    assert_eq!(params.to.as_deref(), Some("2024-07-20T00:00:00.000Z"));
}

#[test]
fn applying_an_invalid_date_fails_and_keeps_the_old_range() {
    let mut chart = FrequencyChartState::new();
    chart.set_draft_from("yesterday");
    chart.set_draft_to("2024-07-20");

    let err = chart.apply().unwrap_err();
    assert!(matches!(err, DashboardError::InvalidArgument(_)));
    assert_eq!(chart.applied(), None);
}

#[test]
fn chart_reset_clears_applied_range_and_drafts() {
    let mut chart = FrequencyChartState::new();
    chart.set_draft_from("2024-07-15");
    chart.set_draft_to("2024-07-20");
    chart.apply().unwrap();

    chart.reset();

    assert_eq!(chart.applied(), None);
    assert_eq!(chart.draft_from(), "");
    assert_eq!(chart.draft_to(), "");
    assert_eq!(chart.params().from, None);
}

#[test]
fn caption_shows_the_applied_range_with_padded_dates() {
    let mut chart = FrequencyChartState::new();
    assert_eq!(chart.caption(), None);

    chart.set_draft_from("2024-07-05");
    chart.set_draft_to("2024-07-20");
    chart.apply().unwrap();

    assert_eq!(
        chart.caption().as_deref(),
        Some("2024년 07월 05일 ~ 2024년 07월 20일 데이터")
    );
}

#[test]
fn bucket_labels_localize_both_bounds() {
    assert_eq!(bucket_label("0-20000"), "0원 - 20,000원");
    assert_eq!(bucket_label("20000 - 40000"), "20,000원 - 40,000원");
    assert_eq!(bucket_label("100000-1000000"), "100,000원 - 1,000,000원");
    // not a numeric range: passed through untouched
    assert_eq!(bucket_label("기타"), "기타");
}

#[test]
fn one_bucket_renders_one_localized_row() {
    let rows = render_rows(&[PriceRange {
        range: "0-20000".to_string(),
        count: 10,
    }]);
    assert_eq!(rows.len(), 1);
    assert!(rows[0].contains("0원 - 20,000원"));
    assert!(rows[0].contains("10개"));
}

// ---------------------------------------------------------------------------
// Purchase modal
// ---------------------------------------------------------------------------

#[test]
fn modal_opens_with_the_full_customer_record() {
    let mut modal = PurchaseModalState::new();
    assert!(!modal.is_open());
    assert_eq!(modal.customer_id(), None);

    modal.open_for(customer(5));
    assert!(modal.is_open());
    assert_eq!(modal.customer_id(), Some(5));
    assert_eq!(modal.title().as_deref(), Some("김철수님의 구매 내역"));
    assert_eq!(
        modal.summary().as_deref(),
        Some("총 구매 횟수: 5회 | 총 구매 금액: 300,000원")
    );
}

#[test]
fn closing_the_modal_deselects_the_customer() {
    let mut modal = PurchaseModalState::new();
    modal.open_for(customer(5));
    modal.close();

    assert!(!modal.is_open());
    assert_eq!(modal.customer(), None);
    // the purchases query gates off again
    assert_eq!(modal.customer_id(), None);
}

#[test]
fn purchase_lines_format_date_quantity_and_price() {
    let line = purchase_line(&CustomerPurchase {
        date: "2024-07-15".to_string(),
        quantity: 2,
        product: "무선 이어폰".to_string(),
        price: 89000,
        img_src: String::new(),
    });
    assert_eq!(line, "무선 이어폰 · 2024년 7월 15일 · 수량: 2개 · 89,000원");
}

// ---------------------------------------------------------------------------
// Render states
// ---------------------------------------------------------------------------

fn qstate(
    data: Option<Vec<Customer>>,
    error: Option<DashboardError>,
    status: QueryStatus,
    fetch_status: FetchStatus,
) -> QueryState<Vec<Customer>> {
    QueryState {
        data,
        error: error.map(Arc::new),
        status,
        fetch_status,
    }
}

#[test]
fn loading_wins_while_the_first_fetch_is_on_the_wire() {
    let state = qstate(None, None, QueryStatus::Pending, FetchStatus::Fetching);
    assert!(matches!(
        RenderState::from_query(&state, true),
        RenderState::Loading
    ));
}

#[test]
fn errors_render_as_failed_unless_remapped() {
    let failed = qstate(
        None,
        Some(DashboardError::Status {
            status: 500,
            path: "/customers".to_string(),
        }),
        QueryStatus::Error,
        FetchStatus::Idle,
    );
    assert!(RenderState::from_query(&failed, true).is_failed());

    let not_found = qstate(
        None,
        Some(DashboardError::NotFound("/customers".to_string())),
        QueryStatus::Error,
        FetchStatus::Idle,
    );
    assert!(RenderState::from_query(&not_found, true).is_empty());
    assert!(RenderState::from_query(&not_found, false).is_failed());
}

#[test]
fn success_splits_into_empty_and_ready() {
    let empty = qstate(Some(vec![]), None, QueryStatus::Success, FetchStatus::Idle);
    assert!(RenderState::from_query(&empty, false).is_empty());

    let ready = qstate(
        Some(vec![customer(1)]),
        None,
        QueryStatus::Success,
        FetchStatus::Idle,
    );
    match RenderState::from_query(&ready, false) {
        RenderState::Ready(items) => assert_eq!(items.len(), 1),
        other => panic!("expected Ready, got {other:?}"),
    }
}

#[test]
fn exactly_one_variant_for_every_flag_combination() {
    // Sweep representative combinations; the tagged union cannot express
    // "loading and error at once".
    let combos = [
        qstate(None, None, QueryStatus::Pending, FetchStatus::Idle),
        qstate(None, None, QueryStatus::Pending, FetchStatus::Fetching),
        qstate(
            None,
            Some(DashboardError::NotFound("x".to_string())),
            QueryStatus::Error,
            FetchStatus::Idle,
        ),
        qstate(Some(vec![]), None, QueryStatus::Success, FetchStatus::Idle),
        qstate(
            Some(vec![customer(1)]),
            None,
            QueryStatus::Success,
            FetchStatus::Idle,
        ),
    ];
    for state in &combos {
        // deriving twice is deterministic
        let a = format!("{:?}", RenderState::from_query(state, true));
        let b = format!("{:?}", RenderState::from_query(state, true));
        assert_eq!(a, b);
    }
}
