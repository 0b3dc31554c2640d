use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Method, Request, Response, StatusCode},
    Router,
};
use fake::faker::internet::en::SafeEmail;
use fake::Fake;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower::ServiceExt;

use crate::core::config::{AppConfig, Config, DatabaseConfig, SwaggerConfig};
use crate::core::database::Database;
use crate::features::users::dtos::{CreateUserDto, UserResponseDto};
use crate::features::users::UserService;

static USER_SEQ: AtomicU64 = AtomicU64::new(1);

/// Fresh in-memory database with the schema applied.
///
/// The pool holds exactly one connection that never expires, since every
/// in-memory SQLite connection is its own database.
pub async fn test_database() -> Database {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .acquire_timeout(Duration::from_secs(1))
        .connect_with(options)
        .await
        .unwrap();

    let db = Database::from_pool(pool);
    db.init_schema().await.unwrap();
    db
}

/// Database in a temporary file, for tests that need several live connections.
///
/// Keep the returned directory alive for as long as the database is used.
pub async fn file_database(max_connections: u32) -> (Database, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let config = DatabaseConfig {
        url: format!("sqlite://{}", dir.path().join("calendar.db").display()),
        max_connections,
        min_connections: 1,
        acquire_timeout_secs: 10,
        idle_timeout_secs: 600,
        max_lifetime_secs: 1800,
    };

    let db = Database::connect(&config).await.unwrap();
    db.init_schema().await.unwrap();
    (db, dir)
}

pub fn test_config() -> Config {
    Config {
        app: AppConfig {
            title: AppConfig::DEFAULT_TITLE.to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_allowed_origins: vec![AppConfig::DEFAULT_CORS_ORIGIN.to_string()],
        },
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            acquire_timeout_secs: 1,
            idle_timeout_secs: 600,
            max_lifetime_secs: 1800,
        },
        swagger: SwaggerConfig {
            username: None,
            password: None,
            version: "test".to_string(),
            description: "test".to_string(),
        },
    }
}

/// Insert a user with generated, unique email and username
pub async fn create_test_user(db: &Database) -> UserResponseDto {
    let seq = USER_SEQ.fetch_add(1, Ordering::Relaxed);
    let email: String = SafeEmail().fake();

    UserService::new(db.clone())
        .create(CreateUserDto {
            email: format!("{}.{}", seq, email),
            username: format!("writer_{}", seq),
            hashed_password: "hashed".to_string(),
            is_active: None,
        })
        .await
        .unwrap()
}

/// Send one request through the router
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    headers: &[(&str, &str)],
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    app.clone().oneshot(request).await.unwrap()
}

/// Status and parsed JSON body of a response
pub async fn read_json(response: Response<Body>) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}
