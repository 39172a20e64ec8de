//! Error types for repository operations.
//!
//! Every variant carries an [`ErrorContext`] so the server log can say which
//! operation failed on which document, while the HTTP layer only ever shows a
//! static message.

use std::fmt;

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Where a repository error happened.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Repository operation, e.g. `update_lesson`
    pub operation: Option<String>,
    /// `lesson` or `order`
    pub collection: Option<&'static str>,
    pub document_id: Option<String>,
    pub details: Option<String>,
    /// Set for failures that may succeed on a later attempt
    pub retryable: bool,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: Some(operation.into()),
            ..Default::default()
        }
    }

    /// Point the context at one lesson document.
    pub fn lesson(self, id: impl fmt::Display) -> Self {
        self.document("lesson", id)
    }

    /// Point the context at one order document.
    pub fn order(self, id: impl fmt::Display) -> Self {
        self.document("order", id)
    }

    /// Name the collection without a specific document.
    pub fn with_collection(mut self, collection: &'static str) -> Self {
        self.collection = Some(collection);
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn retryable(mut self) -> Self {
        self.retryable = true;
        self
    }

    fn document(mut self, collection: &'static str, id: impl fmt::Display) -> Self {
        self.collection = Some(collection);
        self.document_id = Some(id.to_string());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields: Vec<String> = Vec::new();
        if let Some(op) = &self.operation {
            fields.push(format!("op={}", op));
        }
        match (self.collection, &self.document_id) {
            (Some(collection), Some(id)) => fields.push(format!("doc={}/{}", collection, id)),
            (Some(collection), None) => fields.push(format!("collection={}", collection)),
            (None, Some(id)) => fields.push(format!("doc={}", id)),
            (None, None) => {}
        }
        if let Some(details) = &self.details {
            fields.push(details.clone());
        }
        if self.retryable {
            fields.push("retryable".to_string());
        }
        write!(f, "[{}]", fields.join(" "))
    }
}

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// The store is unreachable or the connection dropped.
    #[error("Connection error: {message} {context}")]
    ConnectionError {
        message: String,
        context: ErrorContext,
    },

    /// The store rejected or failed a query.
    #[error("Query error: {message} {context}")]
    QueryError {
        message: String,
        context: ErrorContext,
    },

    /// No document matched the given id.
    #[error("Not found: {message} {context}")]
    NotFound {
        message: String,
        context: ErrorContext,
    },

    /// Input could not be turned into a store operation (bad id, immutable field).
    #[error("Data validation error: {message} {context}")]
    ValidationError {
        message: String,
        context: ErrorContext,
    },

    /// Bad or missing settings at startup.
    #[error("Configuration error: {message} {context}")]
    ConfigurationError {
        message: String,
        context: ErrorContext,
    },

    /// A stored document did not have the expected shape.
    #[error("Internal error: {message} {context}")]
    InternalError {
        message: String,
        context: ErrorContext,
    },
}

/// Generates `name(message)` and `name_with_context(message, context)`
/// constructors for one variant.
macro_rules! constructors {
    ($($variant:ident => $name:ident, $with_context:ident;)*) => {
        $(
            pub fn $name(message: impl Into<String>) -> Self {
                Self::$with_context(message, ErrorContext::default())
            }

            pub fn $with_context(message: impl Into<String>, context: ErrorContext) -> Self {
                Self::$variant {
                    message: message.into(),
                    context,
                }
            }
        )*
    };
}

impl RepositoryError {
    constructors! {
        QueryError => query, query_with_context;
        NotFound => not_found, not_found_with_context;
        ValidationError => validation, validation_with_context;
        ConfigurationError => configuration, configuration_with_context;
        InternalError => internal, internal_with_context;
    }

    /// Connection errors are always retryable.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::connection_with_context(message, ErrorContext::default())
    }

    pub fn connection_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::ConnectionError {
            message: message.into(),
            context: context.retryable(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_retryable(&self) -> bool {
        self.context().retryable
    }

    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::ConnectionError { context, .. }
            | Self::QueryError { context, .. }
            | Self::NotFound { context, .. }
            | Self::ValidationError { context, .. }
            | Self::ConfigurationError { context, .. }
            | Self::InternalError { context, .. } => context,
        }
    }

    fn context_mut(&mut self) -> &mut ErrorContext {
        match self {
            Self::ConnectionError { context, .. }
            | Self::QueryError { context, .. }
            | Self::NotFound { context, .. }
            | Self::ValidationError { context, .. }
            | Self::ConfigurationError { context, .. }
            | Self::InternalError { context, .. } => context,
        }
    }

    /// Record which repository operation failed.
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.context_mut().operation = Some(operation.into());
        self
    }
}

impl From<bson::oid::Error> for RepositoryError {
    fn from(err: bson::oid::Error) -> Self {
        RepositoryError::validation_with_context(
            format!("Invalid identifier: {}", err),
            ErrorContext::default().with_details("object_id_parse"),
        )
    }
}

impl From<bson::ser::Error> for RepositoryError {
    fn from(err: bson::ser::Error) -> Self {
        RepositoryError::internal(format!("Cannot encode document as BSON: {}", err))
    }
}

impl From<bson::de::Error> for RepositoryError {
    fn from(err: bson::de::Error) -> Self {
        RepositoryError::internal(format!("Cannot decode BSON document: {}", err))
    }
}

#[cfg(feature = "mongo-repo")]
impl From<mongodb::error::Error> for RepositoryError {
    fn from(err: mongodb::error::Error) -> Self {
        use mongodb::error::ErrorKind;

        let message = err.to_string();
        match *err.kind {
            ErrorKind::ServerSelection { .. }
            | ErrorKind::Io(_)
            | ErrorKind::ConnectionPoolCleared { .. } => RepositoryError::connection_with_context(
                message,
                ErrorContext::default().with_details("mongodb_connection"),
            ),
            ErrorKind::InvalidArgument { .. } => RepositoryError::validation(message),
            _ => RepositoryError::query(message),
        }
    }
}
