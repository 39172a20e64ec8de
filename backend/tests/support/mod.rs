//! Helpers shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::{Map, Value};

use lesson_booking::models::LessonFields;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with the given environment variables set (`Some`) or removed
/// (`None`), restoring the previous values afterwards, even on panic.
///
/// Calls are serialized because the environment is process-global and the
/// test harness runs tests on several threads.
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let _restore = EnvRestore::apply(changes);
    f()
}

struct EnvRestore {
    previous: HashMap<String, Option<String>>,
}

impl EnvRestore {
    fn apply(changes: &[(&str, Option<&str>)]) -> Self {
        let mut previous = HashMap::new();
        for (key, value) in changes {
            previous
                .entry(key.to_string())
                .or_insert_with(|| std::env::var(key).ok());
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
        Self { previous }
    }
}

impl Drop for EnvRestore {
    fn drop(&mut self) {
        for (key, value) in self.previous.drain() {
            match value {
                Some(v) => std::env::set_var(&key, v),
                None => std::env::remove_var(&key),
            }
        }
    }
}

/// Lesson fields from a JSON object literal.
pub fn lesson_fields(value: Value) -> LessonFields {
    match value {
        Value::Object(map) => map,
        other => panic!("lesson fields must be a JSON object, got {other}"),
    }
}

/// An empty field map.
pub fn no_fields() -> LessonFields {
    Map::new()
}
