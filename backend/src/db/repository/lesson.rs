//! Lesson collection operations.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{Lesson, LessonFields, LessonId, LessonPatch, SearchTerm};

/// Repository trait for the lesson collection.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait LessonRepository: Send + Sync {
    /// List every lesson in store-native order.
    async fn list_lessons(&self) -> RepositoryResult<Vec<Lesson>>;

    /// Retrieve a single lesson.
    ///
    /// # Returns
    /// * `Ok(Lesson)` - The lesson
    /// * `Err(RepositoryError::NotFound)` - If no lesson has this id
    async fn get_lesson(&self, id: LessonId) -> RepositoryResult<Lesson>;

    /// Insert a lesson and return its store-assigned id.
    async fn insert_lesson(&self, fields: LessonFields) -> RepositoryResult<LessonId>;

    /// Set the fields of `patch` on the lesson, leaving other fields untouched.
    ///
    /// # Returns
    /// * `Ok(())` - The lesson matched and was updated
    /// * `Err(RepositoryError::NotFound)` - If no lesson has this id; nothing is written
    /// * `Err(RepositoryError::ValidationError)` - If the patch rewrites `_id`
    async fn update_lesson(&self, id: LessonId, patch: &LessonPatch) -> RepositoryResult<()>;

    /// Lessons whose searched text fields contain `term`, in store-native order.
    async fn search_lessons(&self, term: &SearchTerm) -> RepositoryResult<Vec<Lesson>>;
}
