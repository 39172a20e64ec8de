//! MongoDB repository implementation.
//!
//! One [`Client`] is created at startup and shared by every request; the
//! driver pools connections internally. Each repository call is a single
//! collection operation with no retries.

use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Bson, Document};
use futures::TryStreamExt;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use serde_json::Value;
use tracing::{debug, info};

use crate::db::config::MongoConfig;
use crate::db::repository::{
    ConnectionRepository, ErrorContext, LessonRepository, OrderRepository, RepositoryError,
    RepositoryResult,
};
use crate::models::{
    Lesson, LessonFields, LessonId, LessonPatch, Order, OrderId, SearchTerm, ID_FIELD,
    SEARCH_FIELDS,
};

mod models;

use models::OrderDocument;

/// MongoDB-backed repository.
#[derive(Clone)]
pub struct MongoRepository {
    client: Client,
    database: Database,
    lessons: Collection<Document>,
    orders: Collection<OrderDocument>,
}

impl MongoRepository {
    /// Connect to MongoDB and verify the deployment answers a `ping`.
    pub async fn connect(config: MongoConfig) -> RepositoryResult<Self> {
        let mut options = ClientOptions::parse(&config.uri).await.map_err(|e| {
            RepositoryError::configuration(format!("Invalid MONGODB_URI: {}", e))
        })?;
        if let Some(app_name) = config.app_name.clone() {
            options.app_name = Some(app_name);
        }

        let client = Client::with_options(options)?;
        let database = client.database(&config.database);

        database.run_command(doc! { "ping": 1 }).await.map_err(|e| {
            RepositoryError::connection_with_context(
                e.to_string(),
                ErrorContext::new("connect").with_details(format!("database={}", config.database)),
            )
        })?;
        info!(database = %config.database, "Connected to MongoDB");

        Ok(Self {
            lessons: database.collection(&config.lesson_collection),
            orders: database.collection(&config.order_collection),
            database,
            client,
        })
    }

    fn search_filter(term: &SearchTerm) -> Document {
        let clauses: Vec<Document> = SEARCH_FIELDS
            .iter()
            .map(|field| {
                let mut clause = Document::new();
                clause.insert(*field, doc! { "$regex": term.raw(), "$options": "i" });
                clause
            })
            .collect();
        doc! { "$or": clauses }
    }
}

/// Convert a raw lesson document into the domain type, exposing BSON values
/// as relaxed extended JSON.
fn lesson_from_document(mut document: Document) -> RepositoryResult<Lesson> {
    let id = document.get_object_id(ID_FIELD).map_err(|e| {
        RepositoryError::internal_with_context(
            format!("Lesson document without ObjectId: {}", e),
            ErrorContext::new("decode_lesson").with_collection("lesson"),
        )
    })?;
    document.remove(ID_FIELD);

    match Bson::Document(document).into_relaxed_extjson() {
        Value::Object(fields) => Ok(Lesson::new(LessonId::from(id), fields)),
        other => Err(RepositoryError::internal(format!(
            "Lesson document decoded to non-object JSON: {}",
            other
        ))),
    }
}

fn fields_to_document(fields: &LessonFields) -> RepositoryResult<Document> {
    Ok(bson::to_document(fields)?)
}

#[async_trait]
impl ConnectionRepository for MongoRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        match self.database.run_command(doc! { "ping": 1 }).await {
            Ok(_) => Ok(true),
            Err(e) => {
                debug!(error = %e, "MongoDB ping failed");
                Ok(false)
            }
        }
    }

    async fn close(&self) -> RepositoryResult<()> {
        self.client.clone().shutdown().await;
        info!("MongoDB client shut down");
        Ok(())
    }
}

#[async_trait]
impl LessonRepository for MongoRepository {
    async fn list_lessons(&self) -> RepositoryResult<Vec<Lesson>> {
        let documents: Vec<Document> = self
            .lessons
            .find(doc! {})
            .await
            .map_err(|e| RepositoryError::from(e).with_operation("list_lessons"))?
            .try_collect()
            .await?;

        documents.into_iter().map(lesson_from_document).collect()
    }

    async fn get_lesson(&self, id: LessonId) -> RepositoryResult<Lesson> {
        let document = self
            .lessons
            .find_one(doc! { "_id": id.value() })
            .await
            .map_err(|e| RepositoryError::from(e).with_operation("get_lesson"))?
            .ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    "Lesson not found",
                    ErrorContext::new("get_lesson").lesson(id),
                )
            })?;

        lesson_from_document(document)
    }

    async fn insert_lesson(&self, mut fields: LessonFields) -> RepositoryResult<LessonId> {
        fields.remove(ID_FIELD);
        let document = fields_to_document(&fields)?;
        let result = self
            .lessons
            .insert_one(document)
            .await
            .map_err(|e| RepositoryError::from(e).with_operation("insert_lesson"))?;

        inserted_object_id(result.inserted_id, "insert_lesson").map(LessonId::from)
    }

    async fn update_lesson(&self, id: LessonId, patch: &LessonPatch) -> RepositoryResult<()> {
        let context = ErrorContext::new("update_lesson").lesson(id);

        let set = fields_to_document(patch.fields())?;
        let result = self
            .lessons
            .update_one(doc! { "_id": id.value() }, doc! { "$set": set })
            .await
            .map_err(|e| RepositoryError::from(e).with_operation("update_lesson"))?;

        if result.matched_count == 0 {
            return Err(RepositoryError::not_found_with_context(
                "Lesson not found",
                context,
            ));
        }

        debug!(lesson_id = %id, modified = result.modified_count, "Lesson updated");
        Ok(())
    }

    async fn search_lessons(&self, term: &SearchTerm) -> RepositoryResult<Vec<Lesson>> {
        let documents: Vec<Document> = self
            .lessons
            .find(Self::search_filter(term))
            .await
            .map_err(|e| RepositoryError::from(e).with_operation("search_lessons"))?
            .try_collect()
            .await?;

        documents.into_iter().map(lesson_from_document).collect()
    }
}

#[async_trait]
impl OrderRepository for MongoRepository {
    async fn insert_order(&self, order: &Order) -> RepositoryResult<OrderId> {
        let document = OrderDocument::from_order(order);
        let result = self
            .orders
            .insert_one(document)
            .await
            .map_err(|e| RepositoryError::from(e).with_operation("insert_order"))?;

        inserted_object_id(result.inserted_id, "insert_order").map(OrderId::from)
    }

    async fn get_order(&self, id: OrderId) -> RepositoryResult<Order> {
        self.orders
            .find_one(doc! { "_id": id.value() })
            .await
            .map_err(|e| RepositoryError::from(e).with_operation("get_order"))?
            .map(OrderDocument::into_order)
            .ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    "Order not found",
                    ErrorContext::new("get_order").order(id),
                )
            })
    }

    async fn count_orders(&self) -> RepositoryResult<u64> {
        Ok(self
            .orders
            .count_documents(doc! {})
            .await
            .map_err(|e| RepositoryError::from(e).with_operation("count_orders"))?)
    }
}

fn inserted_object_id(inserted: Bson, operation: &str) -> RepositoryResult<ObjectId> {
    inserted.as_object_id().ok_or_else(|| {
        RepositoryError::internal_with_context(
            format!("Store returned a non-ObjectId id: {}", inserted),
            ErrorContext::new(operation),
        )
    })
}
