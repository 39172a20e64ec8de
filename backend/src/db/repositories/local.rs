//! In-memory local repository implementation.
//!
//! This module provides a local implementation of all repository traits
//! suitable for unit testing and local development. Lessons and orders live
//! in insertion-ordered `Vec`s, which stands in for the store-native order of
//! a real collection.

use async_trait::async_trait;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::db::repository::*;
use crate::models::{Lesson, LessonFields, LessonId, LessonPatch, Order, OrderId, SearchTerm};

/// In-memory local repository.
///
/// Cloning is cheap and every clone shares the same data, so a test can keep
/// a handle while the router owns another.
///
/// # Example
/// ```
/// use lesson_booking::db::repositories::LocalRepository;
/// use serde_json::json;
///
/// let repo = LocalRepository::new();
/// let fields = json!({"subject": "Math", "spaces": 5});
/// repo.seed_lesson(serde_json::from_value(fields).unwrap());
/// assert_eq!(repo.lesson_count(), 1);
/// ```
#[derive(Clone, Default)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    lessons: Vec<Lesson>,
    orders: Vec<Order>,

    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            lessons: Vec::new(),
            orders: Vec::new(),
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, LocalData> {
        self.data.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, LocalData> {
        self.data.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Read access that fails like a dropped connection when unhealthy.
    fn connected_read(&self, operation: &str) -> RepositoryResult<RwLockReadGuard<'_, LocalData>> {
        let data = self.read();
        if !data.is_healthy {
            return Err(Self::disconnected(operation));
        }
        Ok(data)
    }

    fn connected_write(&self, operation: &str) -> RepositoryResult<RwLockWriteGuard<'_, LocalData>> {
        let data = self.write();
        if !data.is_healthy {
            return Err(Self::disconnected(operation));
        }
        Ok(data)
    }

    fn disconnected(operation: &str) -> RepositoryError {
        RepositoryError::connection_with_context(
            "Local repository is marked unhealthy",
            ErrorContext::new(operation),
        )
    }

    /// Add a lesson directly, bypassing the health flag.
    ///
    /// # Returns
    /// The ID assigned to the lesson
    pub fn seed_lesson(&self, fields: LessonFields) -> LessonId {
        let id = LessonId::generate();
        self.write().lessons.push(Lesson::new(id, fields));
        id
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.write().is_healthy = healthy;
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        let mut data = self.write();
        data.lessons.clear();
        data.orders.clear();
    }

    /// Get the number of lessons stored.
    pub fn lesson_count(&self) -> usize {
        self.read().lessons.len()
    }

    /// Get the number of orders stored.
    pub fn order_count(&self) -> usize {
        self.read().orders.len()
    }

    /// Snapshot of a lesson, if present.
    pub fn lesson(&self, id: LessonId) -> Option<Lesson> {
        self.read().lessons.iter().find(|l| l.id == id).cloned()
    }

    /// Snapshot of every stored order, in insertion order.
    pub fn orders(&self) -> Vec<Order> {
        self.read().orders.clone()
    }
}

#[async_trait]
impl ConnectionRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.read().is_healthy)
    }
}

#[async_trait]
impl LessonRepository for LocalRepository {
    async fn list_lessons(&self) -> RepositoryResult<Vec<Lesson>> {
        Ok(self.connected_read("list_lessons")?.lessons.clone())
    }

    async fn get_lesson(&self, id: LessonId) -> RepositoryResult<Lesson> {
        self.connected_read("get_lesson")?
            .lessons
            .iter()
            .find(|l| l.id == id)
            .cloned()
            .ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    "Lesson not found",
                    ErrorContext::new("get_lesson").lesson(id),
                )
            })
    }

    async fn insert_lesson(&self, fields: LessonFields) -> RepositoryResult<LessonId> {
        let mut data = self.connected_write("insert_lesson")?;
        let id = LessonId::generate();
        data.lessons.push(Lesson::new(id, fields));
        Ok(id)
    }

    async fn update_lesson(&self, id: LessonId, patch: &LessonPatch) -> RepositoryResult<()> {
        let context = ErrorContext::new("update_lesson").lesson(id);

        let mut data = self.connected_write("update_lesson")?;
        let Some(lesson) = data.lessons.iter_mut().find(|l| l.id == id) else {
            return Err(RepositoryError::not_found_with_context(
                "Lesson not found",
                context,
            ));
        };

        // Only a matched document can trip the immutable-field check.
        if patch.touches_id() {
            return Err(RepositoryError::validation_with_context(
                "Performing an update on the path '_id' would modify the immutable field '_id'",
                context,
            ));
        }

        lesson.apply_patch(patch);
        Ok(())
    }

    async fn search_lessons(&self, term: &SearchTerm) -> RepositoryResult<Vec<Lesson>> {
        Ok(self
            .connected_read("search_lessons")?
            .lessons
            .iter()
            .filter(|l| term.matches(l))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl OrderRepository for LocalRepository {
    async fn insert_order(&self, order: &Order) -> RepositoryResult<OrderId> {
        let mut data = self.connected_write("insert_order")?;
        let id = OrderId::generate();
        data.orders.push(order.clone().with_id(id));
        Ok(id)
    }

    async fn get_order(&self, id: OrderId) -> RepositoryResult<Order> {
        self.connected_read("get_order")?
            .orders
            .iter()
            .find(|o| o.id == Some(id))
            .cloned()
            .ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    "Order not found",
                    ErrorContext::new("get_order").order(id),
                )
            })
    }

    async fn count_orders(&self) -> RepositoryResult<u64> {
        Ok(self.connected_read("count_orders")?.orders.len() as u64)
    }
}
