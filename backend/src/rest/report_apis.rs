use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json},
};
use tracing::info;

use crate::AppState;
use shared::{BeltFilter, SummaryRequest};

/// Dashboard fee totals, optionally for a single belt
pub async fn get_summary(
    State(state): State<AppState>,
    Query(request): Query<SummaryRequest>,
) -> impl IntoResponse {
    info!("GET /api/summary - query: {:?}", request);

    let belt = request
        .belt
        .as_deref()
        .map(BeltFilter::from_param)
        .unwrap_or_default();

    Json(state.directory_service.summary(&belt).await)
}

/// Student directory headline statistics
pub async fn get_student_stats(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/students/stats");

    Json(state.directory_service.student_stats().await)
}

/// Belt-wise analytics for charts
pub async fn get_belt_analytics(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/analytics/belts");

    Json(state.directory_service.belt_analytics().await)
}
