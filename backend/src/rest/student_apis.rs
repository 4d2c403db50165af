use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use crate::domain::RegistrationError;
use crate::AppState;
use shared::{RegisterStudentResponse, StudentFormData, StudentListRequest};

/// Register a student from raw form input
pub async fn register_student(
    State(state): State<AppState>,
    Json(form): Json<StudentFormData>,
) -> impl IntoResponse {
    info!("POST /api/students - request: {:?}", form);

    match state.registration_service.register(form).await {
        Ok(student) => {
            let success_message = format!(
                "{} ({}) has been registered.",
                student.student_name,
                student.belt_level.label()
            );
            (
                StatusCode::CREATED,
                Json(RegisterStudentResponse {
                    student,
                    success_message,
                }),
            )
                .into_response()
        }
        Err(e) => match e.downcast_ref::<RegistrationError>() {
            Some(rejection) => (StatusCode::UNPROCESSABLE_ENTITY, rejection.to_string()).into_response(),
            None => {
                error!("Failed to register student: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to register student").into_response()
            }
        },
    }
}

/// List students matching the directory filters, newest first
pub async fn list_students(
    State(state): State<AppState>,
    Query(request): Query<StudentListRequest>,
) -> impl IntoResponse {
    info!("GET /api/students - query: {:?}", request);

    Json(state.directory_service.list_students(&request).await)
}

/// Same as [`list_students`] with amounts formatted for display
pub async fn get_student_table(
    State(state): State<AppState>,
    Query(request): Query<StudentListRequest>,
) -> impl IntoResponse {
    info!("GET /api/students/table - query: {:?}", request);

    Json(state.directory_service.student_table(&request).await)
}
