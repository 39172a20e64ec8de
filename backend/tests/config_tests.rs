//! Environment and file configuration of the repository and server.

mod support;

use std::io::Write;

use lesson_booking::db::{
    ConnectionRepository, MongoConfig, RepositoryBuilder, RepositoryConfig, RepositoryError,
    RepositoryFactory, RepositoryType,
};
use support::with_scoped_env;

#[test]
fn test_repository_type_defaults_to_local_without_uri() {
    with_scoped_env(
        &[("REPOSITORY_TYPE", None), ("MONGODB_URI", None)],
        || assert_eq!(RepositoryType::from_env(), RepositoryType::Local),
    );
}

#[test]
fn test_repository_type_defaults_to_mongo_with_uri() {
    with_scoped_env(
        &[
            ("REPOSITORY_TYPE", None),
            ("MONGODB_URI", Some("mongodb://localhost:27017")),
        ],
        || assert_eq!(RepositoryType::from_env(), RepositoryType::Mongo),
    );
}

#[test]
fn test_explicit_repository_type_wins() {
    with_scoped_env(
        &[
            ("REPOSITORY_TYPE", Some("local")),
            ("MONGODB_URI", Some("mongodb://localhost:27017")),
        ],
        || assert_eq!(RepositoryType::from_env(), RepositoryType::Local),
    );
}

#[test]
fn test_mongo_config_from_env() {
    with_scoped_env(
        &[
            ("MONGODB_URI", Some("mongodb://db.example:27017")),
            ("DB_NAME", Some("school")),
            ("MONGO_LESSON_COLLECTION", None),
            ("MONGO_ORDER_COLLECTION", Some("bookings")),
            ("MONGO_APP_NAME", None),
        ],
        || {
            let config = MongoConfig::from_env().unwrap();
            assert_eq!(config.uri, "mongodb://db.example:27017");
            assert_eq!(config.database, "school");
            assert_eq!(config.lesson_collection, "lesson");
            assert_eq!(config.order_collection, "bookings");
            assert!(config.app_name.is_none());
        },
    );
}

#[test]
fn test_mongo_config_defaults_database_name() {
    with_scoped_env(
        &[
            ("MONGODB_URI", Some("mongodb://localhost:27017")),
            ("DB_NAME", None),
        ],
        || assert_eq!(MongoConfig::from_env().unwrap().database, "booking"),
    );
}

#[test]
fn test_mongo_config_requires_uri() {
    with_scoped_env(&[("MONGODB_URI", Some("  "))], || {
        assert!(MongoConfig::from_env().is_err());
    });
}

#[tokio::test]
async fn test_builder_picks_local_repository_from_env() {
    let build = with_scoped_env(
        &[("REPOSITORY_TYPE", Some("local")), ("MONGODB_URI", None)],
        RepositoryBuilder::new,
    );

    let repo = build.build().await.unwrap();
    assert!(repo.health_check().await.unwrap());
}

#[tokio::test]
async fn test_builder_from_env_without_uri_is_configuration_error() {
    let result = with_scoped_env(
        &[("REPOSITORY_TYPE", Some("mongo")), ("MONGODB_URI", None)],
        || RepositoryBuilder::new().from_env(),
    );

    assert!(matches!(
        result,
        Err(RepositoryError::ConfigurationError { .. })
    ));
}

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_config_file_for_mongo() {
    let file = write_config(
        r#"
[repository]
type = "mongodb"

[mongo]
uri = "mongodb://localhost:27017"
database = "school"
"#,
    );

    let config = RepositoryConfig::from_file(file.path()).unwrap();
    assert_eq!(config.repository_type().unwrap(), RepositoryType::Mongo);

    let mongo = config.to_mongo_config().unwrap().unwrap();
    assert_eq!(mongo.database, "school");
    assert_eq!(mongo.lesson_collection, "lesson");
    assert_eq!(mongo.order_collection, "order");
}

#[test]
fn test_config_file_mongo_without_uri_is_rejected() {
    let file = write_config("[repository]\ntype = \"mongo\"\n");
    let config = RepositoryConfig::from_file(file.path()).unwrap();
    assert!(config.to_mongo_config().is_err());
}

#[tokio::test]
async fn test_factory_from_local_config_file() {
    let file = write_config("[repository]\ntype = \"local\"\n");

    let repo = RepositoryFactory::from_config_file(file.path())
        .await
        .unwrap();
    assert!(repo.health_check().await.unwrap());
}

#[test]
fn test_unparseable_config_file_is_configuration_error() {
    let file = write_config("repository = [");
    assert!(matches!(
        RepositoryConfig::from_file(file.path()),
        Err(RepositoryError::ConfigurationError { .. })
    ));
}

#[cfg(feature = "http-server")]
mod server {
    use super::with_scoped_env;
    use lesson_booking::config::ServerConfig;

    #[test]
    fn test_server_config_defaults() {
        with_scoped_env(
            &[("HOST", None), ("PORT", None), ("IMAGES_DIR", None)],
            || {
                let config = ServerConfig::from_env().unwrap();
                assert_eq!(config.host, "0.0.0.0");
                assert_eq!(config.port, 3000);
                assert_eq!(config.images_dir, std::path::PathBuf::from("images"));
            },
        );
    }

    #[test]
    fn test_server_config_reads_port() {
        with_scoped_env(&[("HOST", Some("127.0.0.1")), ("PORT", Some("8080"))], || {
            let addr = ServerConfig::from_env().unwrap().bind_addr().unwrap();
            assert_eq!(addr.to_string(), "127.0.0.1:8080");
        });
    }

    #[test]
    fn test_server_config_rejects_bad_port() {
        with_scoped_env(&[("PORT", Some("eighty"))], || {
            assert!(ServerConfig::from_env().is_err());
        });
    }
}
