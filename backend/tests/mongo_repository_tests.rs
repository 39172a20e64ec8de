//! Integration tests against a live MongoDB deployment.
//!
//! Skipped unless `MONGODB_URI` is set. Each test uses its own pair of
//! freshly named collections in the `booking_test` database.

#![cfg(feature = "mongo-repo")]

mod support;

use lesson_booking::db::{
    ConnectionRepository, LessonRepository, MongoConfig, MongoRepository, OrderRepository,
    RepositoryError,
};
use lesson_booking::models::{LessonId, LessonPatch, NewOrder, Order, SearchTerm};
use serde_json::json;
use support::lesson_fields;

async fn connect(test_name: &str) -> Option<MongoRepository> {
    let Ok(uri) = std::env::var("MONGODB_URI") else {
        eprintln!("MONGODB_URI not set, skipping {test_name}");
        return None;
    };

    let suffix = LessonId::generate().to_hex();
    let mut config = MongoConfig::new(uri, "booking_test");
    config.lesson_collection = format!("lesson_{test_name}_{suffix}");
    config.order_collection = format!("order_{test_name}_{suffix}");

    Some(MongoRepository::connect(config).await.unwrap())
}

#[tokio::test]
async fn test_health_check() {
    let Some(repo) = connect("health").await else {
        return;
    };
    assert!(repo.health_check().await.unwrap());
    repo.close().await.unwrap();
}

#[tokio::test]
async fn test_lesson_update_round_trip() {
    let Some(repo) = connect("update").await else {
        return;
    };

    let id = repo
        .insert_lesson(lesson_fields(json!({
            "subject": "Math",
            "location": "London",
            "price": 100,
            "spaces": 5
        })))
        .await
        .unwrap();

    let patch = LessonPatch::new(lesson_fields(json!({"spaces": 2})));
    repo.update_lesson(id, &patch).await.unwrap();

    let lesson = repo.get_lesson(id).await.unwrap();
    assert_eq!(lesson.spaces(), Some(2));
    assert_eq!(lesson.subject(), Some("Math"));
    assert_eq!(lesson.price(), Some(100.0));

    let lessons = repo.list_lessons().await.unwrap();
    assert_eq!(lessons.len(), 1);
    assert_eq!(lessons[0].id, id);
}

#[tokio::test]
async fn test_update_unknown_lesson_is_not_found() {
    let Some(repo) = connect("missing").await else {
        return;
    };

    let patch = LessonPatch::new(lesson_fields(json!({"spaces": 2})));
    let err = repo
        .update_lesson(LessonId::generate(), &patch)
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));
}

#[tokio::test]
async fn test_search_matches_text_fields_only() {
    let Some(repo) = connect("search").await else {
        return;
    };

    for fields in [
        json!({"subject": "Math", "location": "London", "price": 100}),
        json!({"subject": "Art", "location": "Mathura Hall", "price": 80}),
        json!({"subject": "Music", "location": "Oxford", "price": 100}),
    ] {
        repo.insert_lesson(lesson_fields(fields)).await.unwrap();
    }

    let found = repo
        .search_lessons(&SearchTerm::new("MATH").unwrap())
        .await
        .unwrap();
    let mut subjects: Vec<_> = found.iter().filter_map(|l| l.subject()).collect();
    subjects.sort_unstable();
    assert_eq!(subjects, vec!["Art", "Math"]);

    let found = repo
        .search_lessons(&SearchTerm::new("100").unwrap())
        .await
        .unwrap();
    assert!(found.is_empty());
}

#[tokio::test]
async fn test_order_round_trip() {
    let Some(repo) = connect("order").await else {
        return;
    };

    let order = Order::from_new(
        NewOrder::new("Alice", 5551234, [json!("a"), json!(2)]),
        chrono::Utc::now(),
    );

    let id = repo.insert_order(&order).await.unwrap();
    let stored = repo.get_order(id).await.unwrap();

    assert_eq!(stored.id, Some(id));
    assert_eq!(stored.phone, json!(5551234));
    assert_eq!(stored.lessons, order.lessons);
    assert_eq!(
        stored.created_at.timestamp_millis(),
        order.created_at.timestamp_millis()
    );
    assert_eq!(repo.count_orders().await.unwrap(), 1);
}
