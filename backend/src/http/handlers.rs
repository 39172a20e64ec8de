//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for the single store call it needs.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use tracing::{error, warn};

use super::dto::{
    CreateOrderRequest, CreateOrderResponse, HealthResponse, SearchQuery, UpdateLessonResponse,
    INVALID_ORDER_MESSAGE,
};
use super::error::AppError;
use super::state::AppState;
use crate::db::repository::RepositoryResult;
use crate::db::services as db_services;
use crate::models::{Lesson, LessonPatch};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Plain-text liveness string served at `/`.
pub const LIVENESS_MESSAGE: &str = "Backend is running!";

// =============================================================================
// Health Check
// =============================================================================

/// GET /
pub async fn root() -> &'static str {
    LIVENESS_MESSAGE
}

/// GET /health
///
/// Health check endpoint to verify the service is running and database is accessible.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = database_status(db_services::health_check(state.repository.as_ref()).await);

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: db_status.to_string(),
    }))
}

/// Collapse a health check result into a fixed status word. A failure is
/// logged and reported as `"error"` only.
fn database_status(result: RepositoryResult<bool>) -> &'static str {
    match result {
        Ok(true) => "connected",
        Ok(false) => "disconnected",
        Err(e) => {
            error!(error = %e, "Database health check failed");
            "error"
        }
    }
}

// =============================================================================
// Lessons
// =============================================================================

/// GET /lessons
pub async fn list_lessons(State(state): State<AppState>) -> HandlerResult<Vec<Lesson>> {
    let lessons = db_services::list_lessons(state.repository.as_ref()).await?;
    Ok(Json(lessons))
}

/// PUT /lessons/{id}
///
/// Set the given fields on one lesson and echo them back.
pub async fn update_lesson(
    State(state): State<AppState>,
    Path(lesson_id): Path<String>,
    body: Result<Json<LessonPatch>, JsonRejection>,
) -> HandlerResult<UpdateLessonResponse> {
    let Json(patch) = body.map_err(|rejection| {
        warn!(lesson_id = %lesson_id, error = %rejection, "Rejected lesson update body");
        AppError::BadRequest("Invalid lesson data".to_string())
    })?;

    db_services::update_lesson(state.repository.as_ref(), &lesson_id, &patch)
        .await
        .map_err(|e| {
            if e.is_not_found() {
                AppError::NotFound("Lesson not found".to_string())
            } else {
                AppError::from(e)
            }
        })?;

    Ok(Json(UpdateLessonResponse {
        success: true,
        message: "Lesson updated".to_string(),
        updated: patch,
    }))
}

/// GET /search?q=term
pub async fn search_lessons(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> HandlerResult<Vec<Lesson>> {
    let lessons =
        db_services::search_lessons(state.repository.as_ref(), query.q.as_deref()).await?;
    Ok(Json(lessons))
}

// =============================================================================
// Orders
// =============================================================================

/// POST /orders
///
/// Validate and store an order. Lesson capacity is not touched.
pub async fn create_order(
    State(state): State<AppState>,
    body: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> HandlerResult<CreateOrderResponse> {
    let Json(request) = body.map_err(|rejection| {
        warn!(error = %rejection, "Rejected order body");
        AppError::BadRequest(INVALID_ORDER_MESSAGE.to_string())
    })?;

    let order = request.validate().map_err(|reason| {
        warn!(reason = %reason, "Invalid order data");
        AppError::BadRequest(INVALID_ORDER_MESSAGE.to_string())
    })?;

    let order_id = db_services::place_order(state.repository.as_ref(), order).await?;

    Ok(Json(CreateOrderResponse {
        success: true,
        message: "Order placed successfully".to_string(),
        order_id,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::RepositoryError;

    #[test]
    fn test_database_status_hides_error_text() {
        assert_eq!(database_status(Ok(true)), "connected");
        assert_eq!(database_status(Ok(false)), "disconnected");

        let failed = Err(RepositoryError::connection("mongodb://admin:secret@db:27017"));
        assert_eq!(database_status(failed), "error");
    }
}
