//! # Lesson Booking Backend
//!
//! REST backend for booking tutoring lessons. It lists lessons, updates their
//! remaining seats, accepts orders and runs a keyword search, each as a single
//! call against a document store.
//!
//! ## Architecture
//!
//! - [`models`]: Lesson, order and search types
//! - [`db`]: Repository traits, the in-memory and MongoDB implementations,
//!   and the service functions the handlers call
//! - [`http`]: Axum router, handlers and error mapping
//! - [`config`]: Server settings from the environment
//!
//! ## Endpoints
//!
//! | Method & path       | Purpose                              |
//! |---------------------|--------------------------------------|
//! | `GET /`             | Liveness string                      |
//! | `GET /lessons`      | All lessons                          |
//! | `GET /search?q=`    | Case-insensitive keyword search      |
//! | `PUT /lessons/{id}` | Set fields on one lesson             |
//! | `POST /orders`      | Place an order                       |
//! | `GET /images/*`     | Lesson images                        |

pub mod db;
pub mod models;

#[cfg(feature = "http-server")]
pub mod config;

#[cfg(feature = "http-server")]
pub mod http;
