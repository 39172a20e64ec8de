//! Repository trait definitions for database operations.
//!
//! The store holds two collections, so the operations are split into one
//! trait per collection plus a connection trait:
//!
//! - [`error`]: Error types for repository operations
//! - [`connection`]: Health checks and shutdown
//! - [`lesson`]: Listing, updating and searching lessons
//! - [`order`]: Inserting orders
//!
//! For handlers that need everything, use the [`FullRepository`] bound:
//!
//! ```ignore
//! async fn book<R: FullRepository + ?Sized>(repo: &R, order: &Order) -> RepositoryResult<()> {
//!     repo.insert_order(order).await?;
//!     Ok(())
//! }
//! ```

pub mod connection;
pub mod error;
pub mod lesson;
pub mod order;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

pub use connection::ConnectionRepository;
pub use lesson::LessonRepository;
pub use order::OrderRepository;

/// Composite trait bound for a complete repository implementation.
///
/// Automatically implemented for any type that implements the three
/// repository traits.
pub trait FullRepository: ConnectionRepository + LessonRepository + OrderRepository {}

impl<T> FullRepository for T where T: ConnectionRepository + LessonRepository + OrderRepository {}
