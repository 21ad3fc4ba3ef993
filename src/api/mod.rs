mod errors;
mod handlers;

use axum::routing::get;
use axum::Router;
use sqlx::PgPool;

pub use errors::ApiError;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub analytics_year: i32
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/analytics/top-merchant", get(handlers::top_merchant))
        .route("/analytics/monthly-active-merchants", get(handlers::monthly_active_merchants))
        .route("/analytics/product-adoption", get(handlers::product_adoption))
        .route("/analytics/kyc-funnel", get(handlers::kyc_funnel))
        .route("/analytics/failure-rates", get(handlers::failure_rates))
        .with_state(state)
}
