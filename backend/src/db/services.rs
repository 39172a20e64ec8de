//! High-level database service layer.
//!
//! Repository-agnostic operations, one per HTTP endpoint. Each performs a
//! single repository call; the only logic here is turning raw request input
//! (path ids, query terms) into typed values and stamping new orders.
//!
//! # Usage
//!
//! ```no_run
//! use lesson_booking::db::{services, repositories::LocalRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = LocalRepository::new();
//!
//!     let lessons = services::list_lessons(&repo).await?;
//!     println!("Found {} lessons", lessons.len());
//!
//!     Ok(())
//! }
//! ```

use chrono::Utc;
use tracing::{debug, info};

use super::repository::{
    ConnectionRepository, ErrorContext, LessonRepository, OrderRepository, RepositoryError,
    RepositoryResult,
};
use crate::models::{Lesson, LessonId, LessonPatch, NewOrder, Order, OrderId, SearchTerm};

// ==================== Health & Connection ====================

/// Check if the database connection is healthy.
pub async fn health_check<R: ConnectionRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

// ==================== Lesson Operations ====================

/// All lessons, unfiltered, in store-native order.
pub async fn list_lessons<R: LessonRepository + ?Sized>(repo: &R) -> RepositoryResult<Vec<Lesson>> {
    let lessons = repo.list_lessons().await?;
    debug!(count = lessons.len(), "Listed lessons");
    Ok(lessons)
}

/// Parse a lesson id received from a client.
///
/// A malformed id is a [`RepositoryError::ValidationError`], which the HTTP
/// layer reports as a server error like any other store failure.
pub fn parse_lesson_id(raw: &str) -> RepositoryResult<LessonId> {
    LessonId::parse_str(raw).map_err(|e| {
        RepositoryError::validation_with_context(
            format!("Invalid lesson id: {}", e),
            ErrorContext::new("parse_lesson_id").lesson(raw),
        )
    })
}

/// Apply a partial update to one lesson.
///
/// # Returns
/// * `Ok(LessonId)` - The id of the updated lesson
/// * `Err(RepositoryError::NotFound)` - If no lesson has this id
/// * `Err(RepositoryError)` - Malformed id or store failure
pub async fn update_lesson<R: LessonRepository + ?Sized>(
    repo: &R,
    raw_id: &str,
    patch: &LessonPatch,
) -> RepositoryResult<LessonId> {
    let id = parse_lesson_id(raw_id)?;
    repo.update_lesson(id, patch).await?;
    info!(lesson_id = %id, fields = patch.fields().len(), "Lesson updated");
    Ok(id)
}

/// Lessons matching a free-text term. A missing term is treated as empty.
pub async fn search_lessons<R: LessonRepository + ?Sized>(
    repo: &R,
    term: Option<&str>,
) -> RepositoryResult<Vec<Lesson>> {
    let term = SearchTerm::new(term.unwrap_or_default()).map_err(|e| {
        RepositoryError::validation_with_context(
            e.to_string(),
            ErrorContext::new("search_lessons"),
        )
    })?;

    let lessons = repo.search_lessons(&term).await?;
    debug!(term = term.raw(), matches = lessons.len(), "Searched lessons");
    Ok(lessons)
}

// ==================== Order Operations ====================

/// Store a validated order, stamped with the current time.
///
/// Placing an order does not touch lesson capacity; callers update the
/// lessons' `spaces` with a separate [`update_lesson`] call.
pub async fn place_order<R: OrderRepository + ?Sized>(
    repo: &R,
    order: NewOrder,
) -> RepositoryResult<OrderId> {
    let order = Order::from_new(order, Utc::now());
    let order_id = repo.insert_order(&order).await?;
    info!(
        order_id = %order_id,
        lessons = order.lessons.len(),
        "Order placed"
    );
    Ok(order_id)
}
