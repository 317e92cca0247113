//! Operational Analytics Report - terminal view of the aggregation core
//! Runs the same batch the dashboard endpoint runs, organization-wide.
//!
//! Run: ./target/release/analytics_report [section]
//! Sections: all, summary, restaurants, distribution, trend

use anyhow::Result;
use pizza_delivery_analytics::access::AccessScope;
use pizza_delivery_analytics::analytics::engine::AggregationEngine;
use pizza_delivery_analytics::analytics::projection::{
    self, DashboardSummary, DetailAnalytics, LabelValue,
};
use pizza_delivery_analytics::analytics::{metrics, names};
use pizza_delivery_analytics::db;
use pizza_delivery_analytics::store::SurrealStore;
use std::env;
use std::sync::Arc;

fn print_section_header(title: &str) {
    println!("\n{}", "═".repeat(80));
    println!("  {}", title);
    println!("{}\n", "═".repeat(80));
}

fn print_subsection(title: &str) {
    println!("\n{}", title);
    println!("{}", "─".repeat(70));
}

fn print_bar_rows(rows: &[LabelValue], total: i64) {
    for row in rows {
        let pct = metrics::percent_of_total(row.value, total);
        let bar_len = (pct / 2.0).min(30.0) as usize;
        let bar: String = "█".repeat(bar_len);
        println!("  {:16} {:>8} {:>6.1}% {}", row.label, row.value, pct, bar);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let section = args.get(1).map(|s| s.as_str()).unwrap_or("all");

    let database = db::connect("data/pizza.db").await?;
    let store = Arc::new(SurrealStore::new(database));
    let engine = AggregationEngine::new(store.clone());

    let aggregates = engine.aggregate_dashboard(&AccessScope::All).await?;
    let ids: Vec<String> = aggregates
        .core
        .by_restaurant
        .iter()
        .map(|entry| entry.label.clone())
        .collect();
    let restaurant_names = names::resolve_restaurant_names(store.as_ref(), &ids).await?;

    let derived = metrics::derive(&aggregates);
    let detail = projection::detail(aggregates.core.clone(), &restaurant_names);
    let summary = projection::dashboard(aggregates, derived);

    println!("\n{}", "█".repeat(80));
    println!(
        "{}  DELIVERY OPERATIONS REPORT  {}",
        "█".repeat(24),
        "█".repeat(25)
    );
    println!("{}\n", "█".repeat(80));

    match section {
        "all" => {
            run_summary_section(&summary);
            run_restaurant_section(&detail);
            run_distribution_section(&summary);
            run_trend_section(&summary);
        }
        "summary" => run_summary_section(&summary),
        "restaurants" => run_restaurant_section(&detail),
        "distribution" => run_distribution_section(&summary),
        "trend" => run_trend_section(&summary),
        _ => {
            println!("Unknown section: {}", section);
            println!("Available: all, summary, restaurants, distribution, trend");
        }
    }

    println!("\n{}", "█".repeat(80));
    Ok(())
}

fn run_summary_section(summary: &DashboardSummary) {
    print_section_header("1. DELIVERY KPIs");

    println!("  Total Orders:       {:>10}", summary.total_orders);
    println!("  On-Time Rate:       {:>9.1}%", summary.on_time_rate);
    println!("  Delayed Orders:     {:>10}", summary.delayed_orders);
    println!("  Avg Delivery Time:  {:>8} min", summary.avg_delivery_time);
    println!("  Avg Distance:       {:>9} km", summary.avg_distance_km);
    println!("  Avg Delay:          {:>8} min", summary.avg_delay_min);
    match summary.peak_hour {
        Some(hour) => println!("  Busiest Hour:       {:>9}:00", hour),
        None => println!("  Busiest Hour:       {:>10}", "n/a"),
    }

    print_subsection("Weekend vs Weekday");
    println!("  Weekday: {:>8}", summary.weekend_vs_weekday.weekday);
    println!("  Weekend: {:>8}", summary.weekend_vs_weekday.weekend);

    print_subsection("Rush Window (11-13, 18-20) vs Off-Peak");
    println!("  Rush:     {:>8}", summary.peak_off_peak.peak);
    println!("  Off-Peak: {:>8}", summary.peak_off_peak.off_peak);
}

fn run_restaurant_section(detail: &DetailAnalytics) {
    print_section_header("2. ORDERS BY RESTAURANT");

    println!(
        "  {:20} {:>8} {:>10} {:>20}",
        "Restaurant", "Orders", "% of Total", "Volume Bar"
    );
    println!("  {}", "─".repeat(66));
    for row in &detail.orders_by_restaurant {
        let pct = metrics::percent_of_total(row.count, detail.total_orders);
        let bar_len = (pct / 2.0).min(30.0) as usize;
        let bar: String = "█".repeat(bar_len);
        println!(
            "  {:20} {:>8} {:>9.1}% {}",
            row.restaurant, row.count, pct, bar
        );
    }

    print_subsection("Top Drop-Off Areas");
    for row in &detail.orders_by_location {
        println!("  {:20} {:>8}", row.location, row.count);
    }
}

fn run_distribution_section(summary: &DashboardSummary) {
    print_section_header("3. ORDER DISTRIBUTION");

    print_subsection("Pizza Sizes");
    print_bar_rows(&summary.pizza_sizes, summary.total_orders);

    print_subsection("Pizza Types");
    print_bar_rows(&summary.pizza_types, summary.total_orders);

    print_subsection("Payment Methods");
    print_bar_rows(&summary.payment_methods, summary.total_orders);

    print_subsection("Traffic Conditions");
    print_bar_rows(&summary.traffic_impact, summary.total_orders);
}

fn run_trend_section(summary: &DashboardSummary) {
    print_section_header("4. VOLUME TRENDS");

    print_subsection("Orders by Month");
    print_bar_rows(&summary.delivery_performance, summary.total_orders);

    print_subsection("Orders by Hour");
    print_bar_rows(&summary.peak_hours, summary.total_orders);
}
