//! Terminal rendition of the purchase analytics dashboard.
//!
//! Point `STOREFRONT_API` at the backend (defaults to the local dev
//! server), run, and the demo prints the purchase-frequency histogram,
//! the customer list sorted by total amount, and the purchase history of
//! the top customer.

use storefront_dashboard::view::customer_list::row_line;
use storefront_dashboard::view::frequency_chart::render_rows;
use storefront_dashboard::view::purchase_modal::purchase_line;
use storefront_dashboard::view::{
    CustomerListState, PurchaseModalState, RenderState, LOAD_FAILED_MESSAGE, NO_PURCHASES_MESSAGE,
    NO_RESULTS_MESSAGE,
};
use storefront_dashboard::{config, Dashboard};

#[tokio::main]
async fn main() -> storefront_dashboard::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let base_url = std::env::var("STOREFRONT_API")
        .unwrap_or_else(|_| config::DEFAULT_BASE_URL.to_string());
    let dashboard = Dashboard::builder().base_url(base_url).build()?;
    eprintln!("{dashboard}");

    println!("쇼핑몰 구매 데이터 대시보드");

    // -- 가격대별 구매 빈도 -------------------------------------------------
    println!("\n[가격대별 구매 빈도]");
    let mut frequency = dashboard.frequency().fetch(None)?;
    match RenderState::from_query(&frequency.ready().await, false) {
        RenderState::Ready(buckets) => {
            for row in render_rows(&buckets) {
                println!("  {row}");
            }
        }
        RenderState::Empty => println!("  (데이터 없음)"),
        _ => println!("  {LOAD_FAILED_MESSAGE}"),
    }

    // -- 고객 목록 -----------------------------------------------------------
    let mut list = CustomerListState::new();
    list.cycle_sort(); // 내림차순: 구매 금액이 많은 고객부터
    println!("\n[고객 목록 · {}]", list.sort_label());

    let mut customers = dashboard.customers().fetch(Some(list.params()))?;
    let top = match RenderState::from_query(&customers.ready().await, true) {
        RenderState::Ready(customers) => {
            for customer in &customers {
                println!("  {}", row_line(customer));
            }
            customers.into_iter().next()
        }
        RenderState::Empty => {
            println!("  {NO_RESULTS_MESSAGE}");
            None
        }
        _ => {
            println!("  {LOAD_FAILED_MESSAGE}");
            None
        }
    };

    // -- 최다 구매 고객의 구매 내역 ------------------------------------------
    let Some(top) = top else { return Ok(()) };
    let mut modal = PurchaseModalState::new();
    modal.open_for(top);
    if let Some(title) = modal.title() {
        println!("\n[{title}]");
    }
    if let Some(summary) = modal.summary() {
        println!("  {summary}");
    }

    let mut purchases = dashboard.purchases().fetch(modal.customer_id())?;
    match RenderState::from_query(&purchases.ready().await, false) {
        RenderState::Ready(purchases) => {
            for purchase in &purchases {
                println!("  {}", purchase_line(purchase));
            }
        }
        RenderState::Empty => println!("  {NO_PURCHASES_MESSAGE}"),
        _ => println!("  {LOAD_FAILED_MESSAGE}"),
    }

    modal.close();
    Ok(())
}
