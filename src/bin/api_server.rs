//! REST API Server for Delivery Analytics
//!
//! Usage:
//!   ./target/release/api_server [options]
//!
//! Options:
//!   --port PORT       Port to listen on (default: 8080)
//!   --db-path PATH    Path to SurrealDB database (default: data/pizza.db)
//!
//! Endpoints:
//!   GET /api/v1/health              - Health check
//!   GET /api/v1/analytics           - Detail analytics (scoped, ?restaurant_id=X)
//!   GET /api/v1/dashboard/summary   - Dashboard summary (scoped)
//!   GET /api/v1/restaurants         - Restaurant reference list
//!
//! Caller identity arrives via the x-user-id / x-user-role / x-restaurant-id
//! headers set by the upstream gateway; requests without x-user-id get 401.

use anyhow::Result;
use axum::{routing::get, Router};
use clap::Parser;
use pizza_delivery_analytics::api::{handlers, AnalyticsService};
use pizza_delivery_analytics::db;
use pizza_delivery_analytics::store::SurrealStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "api_server", about = "Delivery analytics REST API")]
struct Args {
    /// Port to listen on
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Path to the SurrealDB database
    #[arg(long, default_value = "data/pizza.db")]
    db_path: String,
}

fn print_banner(port: u16) {
    println!("============================================================");
    println!("          PIZZA DELIVERY ANALYTICS API SERVER");
    println!("============================================================");
    println!();
    println!("  Port:     {}", port);
    println!("  REST:     http://localhost:{}/api/v1/", port);
    println!();
    println!("Endpoints:");
    println!("  GET /api/v1/health              Health check");
    println!("  GET /api/v1/analytics           Detail analytics (scoped)");
    println!("  GET /api/v1/dashboard/summary   Dashboard summary (scoped)");
    println!("  GET /api/v1/restaurants         Restaurant list");
    println!();
    println!("============================================================");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .init();

    let args = Args::parse();
    print_banner(args.port);

    let db = db::connect(&args.db_path).await?;
    db::init_schema(&db).await?;

    let store = Arc::new(SurrealStore::new(db));
    let service = Arc::new(AnalyticsService::new(store));

    let app = create_rest_router(service);
    let addr: SocketAddr = format!("0.0.0.0:{}", args.port).parse()?;
    tracing::info!("Starting REST server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn create_rest_router(service: Arc<AnalyticsService>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/api/v1/health", get(handlers::health))
        // Scoped analytics
        .route("/api/v1/analytics", get(handlers::get_analytics))
        .route(
            "/api/v1/dashboard/summary",
            get(handlers::get_dashboard_summary),
        )
        // Reference data
        .route("/api/v1/restaurants", get(handlers::list_restaurants))
        // State and middleware
        .with_state(service)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
