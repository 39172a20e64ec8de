//! Choosing and connecting a repository at startup.
//!
//! The backend is picked from `REPOSITORY_TYPE`, from a `repository.toml`
//! file, or explicitly in code. Every path ends in the same place: a
//! [`RepositoryType`] plus, for MongoDB, a [`MongoConfig`].

use std::env;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use tracing::info;

use super::config::MongoConfig;
use super::repo_config::RepositoryConfig;
use super::repositories::LocalRepository;
#[cfg(feature = "mongo-repo")]
use super::repositories::MongoRepository;
use super::repository::{FullRepository, RepositoryError, RepositoryResult};

/// Storage backend behind the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// MongoDB (`mongo-repo` feature)
    Mongo,
    /// Process memory; data is lost on restart
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Accepts `mongo`/`mongodb` and `local`/`memory`, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        match name.as_str() {
            "mongo" | "mongodb" => Ok(Self::Mongo),
            "local" | "memory" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Resolve the backend from the environment.
    ///
    /// `REPOSITORY_TYPE` wins when set and valid. Otherwise MongoDB is used
    /// when `MONGODB_URI` is present and the in-memory store when it is not.
    pub fn from_env() -> Self {
        let explicit = env::var("REPOSITORY_TYPE")
            .ok()
            .and_then(|name| name.parse().ok());

        explicit.unwrap_or_else(|| match env::var_os("MONGODB_URI") {
            Some(_) => Self::Mongo,
            None => Self::Local,
        })
    }
}

/// Opens the repository the server runs on.
///
/// # Example
/// ```ignore
/// use lesson_booking::db::{MongoConfig, RepositoryFactory, RepositoryType};
///
/// # async fn run() -> lesson_booking::db::RepositoryResult<()> {
/// let config = MongoConfig::new("mongodb://localhost:27017", "booking");
/// let repo = RepositoryFactory::create(RepositoryType::Mongo, Some(&config)).await?;
/// # Ok(())
/// # }
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Open a repository of the given type. MongoDB needs `mongo_config`.
    pub async fn create(
        kind: RepositoryType,
        mongo_config: Option<&MongoConfig>,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        if kind == RepositoryType::Local {
            return Ok(Self::create_local());
        }

        let config = mongo_config.ok_or_else(|| {
            RepositoryError::configuration("MongoDB repository needs a connection config")
        })?;
        Self::open_mongo(config).await
    }

    /// Connect to MongoDB and verify the deployment answers.
    #[cfg(feature = "mongo-repo")]
    pub async fn create_mongo(config: &MongoConfig) -> RepositoryResult<Arc<MongoRepository>> {
        MongoRepository::connect(config.clone()).await.map(Arc::new)
    }

    #[cfg(feature = "mongo-repo")]
    async fn open_mongo(config: &MongoConfig) -> RepositoryResult<Arc<dyn FullRepository>> {
        let repo: Arc<dyn FullRepository> = Self::create_mongo(config).await?;
        Ok(repo)
    }

    #[cfg(not(feature = "mongo-repo"))]
    async fn open_mongo(_config: &MongoConfig) -> RepositoryResult<Arc<dyn FullRepository>> {
        Err(RepositoryError::configuration(
            "MongoDB requested but the crate was built without the mongo-repo feature",
        ))
    }

    pub fn create_local() -> Arc<dyn FullRepository> {
        info!("Using in-memory local repository");
        Arc::new(LocalRepository::new())
    }

    /// Open the repository described by `REPOSITORY_TYPE`, `MONGODB_URI`
    /// and the other `MongoConfig::from_env` variables.
    pub async fn from_env() -> RepositoryResult<Arc<dyn FullRepository>> {
        RepositoryBuilder::new().from_env()?.build().await
    }

    /// Open the repository described by a `repository.toml` file.
    pub async fn from_config_file(
        path: impl AsRef<Path>,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        RepositoryBuilder::new()
            .from_config_file(path)?
            .build()
            .await
    }

    /// Like [`Self::from_config_file`], searching the usual locations.
    pub async fn from_default_config() -> RepositoryResult<Arc<dyn FullRepository>> {
        let config = RepositoryConfig::from_default_location()?;
        RepositoryBuilder::new()
            .apply_config(&config)?
            .build()
            .await
    }
}

/// Step-by-step repository setup.
///
/// # Example
/// ```ignore
/// use lesson_booking::db::{MongoConfig, RepositoryBuilder, RepositoryType};
///
/// # async fn run() -> lesson_booking::db::RepositoryResult<()> {
/// let repo = RepositoryBuilder::new()
///     .repository_type(RepositoryType::Mongo)
///     .mongo_config(MongoConfig::new("mongodb://localhost:27017", "booking"))
///     .build()
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct RepositoryBuilder {
    kind: RepositoryType,
    mongo_config: Option<MongoConfig>,
}

impl RepositoryBuilder {
    /// Start from the type [`RepositoryType::from_env`] picks.
    pub fn new() -> Self {
        Self {
            kind: RepositoryType::from_env(),
            mongo_config: None,
        }
    }

    pub fn repository_type(mut self, kind: RepositoryType) -> Self {
        self.kind = kind;
        self
    }

    pub fn mongo_config(mut self, config: MongoConfig) -> Self {
        self.mongo_config = Some(config);
        self
    }

    /// Take the type and, for MongoDB, the connection settings from the
    /// environment.
    ///
    /// # Errors
    /// Fails when MongoDB is selected but `MONGODB_URI` is missing.
    pub fn from_env(mut self) -> RepositoryResult<Self> {
        self.kind = RepositoryType::from_env();
        if self.kind == RepositoryType::Mongo {
            self.mongo_config =
                Some(MongoConfig::from_env().map_err(RepositoryError::configuration)?);
        }
        Ok(self)
    }

    /// Take the type and connection settings from a `repository.toml` file.
    pub fn from_config_file(self, path: impl AsRef<Path>) -> RepositoryResult<Self> {
        let config = RepositoryConfig::from_file(path)?;
        self.apply_config(&config)
    }

    fn apply_config(mut self, config: &RepositoryConfig) -> RepositoryResult<Self> {
        self.kind = config
            .repository_type()
            .map_err(RepositoryError::configuration)?;
        self.mongo_config = config.to_mongo_config()?;
        Ok(self)
    }

    pub async fn build(self) -> RepositoryResult<Arc<dyn FullRepository>> {
        RepositoryFactory::create(self.kind, self.mongo_config.as_ref()).await
    }
}

impl Default for RepositoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::ConnectionRepository;

    #[test]
    fn test_repository_type_names() {
        for name in ["mongo", "MongoDB", " mongodb "] {
            assert_eq!(name.parse::<RepositoryType>(), Ok(RepositoryType::Mongo));
        }
        for name in ["local", "Memory"] {
            assert_eq!(name.parse::<RepositoryType>(), Ok(RepositoryType::Local));
        }

        let err = "sqlite".parse::<RepositoryType>().unwrap_err();
        assert!(err.contains("sqlite"));
    }

    #[tokio::test]
    async fn test_local_repository_is_healthy() {
        let repo = RepositoryFactory::create(RepositoryType::Local, None)
            .await
            .unwrap();
        assert!(repo.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_builder_with_explicit_local_type() {
        let repo = RepositoryBuilder::new()
            .repository_type(RepositoryType::Local)
            .build()
            .await
            .unwrap();
        assert!(repo.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_mongo_without_config_is_configuration_error() {
        let result = RepositoryFactory::create(RepositoryType::Mongo, None).await;
        assert!(matches!(
            result,
            Err(RepositoryError::ConfigurationError { .. })
        ));
    }
}
