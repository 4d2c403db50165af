use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;

use crate::domain::belt_catalog;
use shared::BeltListResponse;

/// List every belt level in grading order
pub async fn list_belts() -> impl IntoResponse {
    info!("GET /api/belts");

    Json(BeltListResponse {
        belts: belt_catalog::list().to_vec(),
    })
}

/// Get a single belt level by id
pub async fn get_belt(Path(belt_id): Path<String>) -> impl IntoResponse {
    info!("GET /api/belts/{}", belt_id);

    match belt_catalog::lookup(&belt_id) {
        Some(belt) => (StatusCode::OK, Json(belt.clone())).into_response(),
        None => (StatusCode::NOT_FOUND, "Belt level not found").into_response(),
    }
}
