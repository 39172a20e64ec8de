//! Lesson documents.
//!
//! Lessons are schemaless: the store enforces nothing beyond the `_id`, so a
//! lesson is an identifier plus an open map of fields. Typed accessors exist
//! for the fields the booking frontend relies on.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

crate::define_id_type!(LessonId);

/// Field map of a lesson document, without its `_id`.
pub type LessonFields = Map<String, Value>;

/// Name of the identifier field in stored documents.
pub const ID_FIELD: &str = "_id";

/// A bookable lesson.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    #[serde(rename = "_id")]
    pub id: LessonId,
    #[serde(flatten)]
    pub fields: LessonFields,
}

impl Lesson {
    /// Build a lesson from an identifier and its fields.
    ///
    /// A stray `_id` entry in `fields` is dropped so it can never shadow
    /// the real identifier on serialization.
    pub fn new(id: LessonId, mut fields: LessonFields) -> Self {
        fields.remove(ID_FIELD);
        Self { id, fields }
    }

    pub fn subject(&self) -> Option<&str> {
        self.fields.get("subject").and_then(Value::as_str)
    }

    pub fn location(&self) -> Option<&str> {
        self.fields.get("location").and_then(Value::as_str)
    }

    pub fn price(&self) -> Option<f64> {
        self.fields.get("price").and_then(Value::as_f64)
    }

    /// Remaining capacity.
    pub fn spaces(&self) -> Option<i64> {
        self.fields.get("spaces").and_then(Value::as_i64)
    }

    /// Relative path of the lesson image, served under `/images`.
    pub fn image(&self) -> Option<&str> {
        self.fields.get("image").and_then(Value::as_str)
    }

    /// Set every field of `patch` on this lesson, leaving the rest untouched.
    pub fn apply_patch(&mut self, patch: &LessonPatch) {
        for (key, value) in patch.fields() {
            self.fields.insert(key.clone(), value.clone());
        }
    }
}

/// Partial update of a lesson: every key is overwritten, nothing is removed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LessonPatch(LessonFields);

impl LessonPatch {
    pub fn new(fields: LessonFields) -> Self {
        Self(fields)
    }

    pub fn fields(&self) -> &LessonFields {
        &self.0
    }

    pub fn into_fields(self) -> LessonFields {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the patch tries to rewrite the immutable identifier.
    pub fn touches_id(&self) -> bool {
        self.0.contains_key(ID_FIELD)
    }
}

impl From<LessonFields> for LessonPatch {
    fn from(fields: LessonFields) -> Self {
        Self(fields)
    }
}
