use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::analytics;
use crate::analytics::{FailureRate, KycFunnel, MonthlyActiveMerchants, ProductAdoption, TopMerchant};
use crate::api::{ApiError, AppState};

pub async fn root() -> Json<Value> {
    Json(json!({ "status": "ok", "service": "Moniepoint Analytics API" }))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

pub async fn top_merchant(State(state): State<AppState>) -> Result<Json<TopMerchant>, ApiError> {
    analytics::top_merchant(&state.pool).await
        .map(Json)
        .map_err(|error| ApiError::internal("/analytics/top-merchant", error))
}

pub async fn monthly_active_merchants(State(state): State<AppState>) -> Result<Json<MonthlyActiveMerchants>, ApiError> {
    analytics::monthly_active_merchants(&state.pool, state.analytics_year).await
        .map(Json)
        .map_err(|error| ApiError::internal("/analytics/monthly-active-merchants", error))
}

pub async fn product_adoption(State(state): State<AppState>) -> Result<Json<ProductAdoption>, ApiError> {
    analytics::product_adoption(&state.pool).await
        .map(Json)
        .map_err(|error| ApiError::internal("/analytics/product-adoption", error))
}

pub async fn kyc_funnel(State(state): State<AppState>) -> Result<Json<KycFunnel>, ApiError> {
    analytics::kyc_funnel(&state.pool).await
        .map(Json)
        .map_err(|error| ApiError::internal("/analytics/kyc-funnel", error))
}

pub async fn failure_rates(State(state): State<AppState>) -> Result<Json<Vec<FailureRate>>, ApiError> {
    analytics::failure_rates(&state.pool).await
        .map(Json)
        .map_err(|error| ApiError::internal("/analytics/failure-rates", error))
}
