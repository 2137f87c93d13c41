use async_trait::async_trait;
use jiff::Timestamp;
use snip_core::error::StorageError;
use snip_core::repository::{InsertOutcome, LinkRecord, ReadRepository, Repository, Result};
use snip_core::shortcode::ShortCode;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteRow,
    SqliteSynchronous,
};
use sqlx::Row;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};
use typed_builder::TypedBuilder;

const SCHEMA: &str = include_str!("../ddl/sqlite/links.sql");

/// Connection settings for [`SqliteRepository::open`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct SqliteSettings {
    /// Database file; created together with its parent directory if missing.
    #[builder(setter(into))]
    pub path: PathBuf,
    #[builder(default = 8)]
    pub max_connections: u32,
    /// How long a writer waits for the database lock before giving up.
    #[builder(default = Duration::from_secs(5))]
    pub busy_timeout: Duration,
}

/// SQLite implementation of the repository contract.
///
/// Uniqueness of `code` is enforced by the table's primary key, so an insert
/// racing another insert for the same code loses at the storage layer and is
/// reported as [`InsertOutcome::AlreadyExists`]. Click increments are a single
/// `UPDATE ... RETURNING` statement and never lose concurrent updates.
#[derive(Debug, Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Creates a repository from an existing SQLite connection pool.
    ///
    /// The schema is not touched; call [`SqliteRepository::migrate`] if the
    /// pool points at a fresh database.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens (or creates) the database file and initialises the schema.
    pub async fn open(settings: SqliteSettings) -> Result<Self> {
        if let Some(parent) = settings
            .path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
        {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::Unavailable(format!(
                    "cannot create database directory '{}': {e}",
                    parent.display()
                ))
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(&settings.path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(settings.busy_timeout);

        let pool = SqlitePoolOptions::new()
            .max_connections(settings.max_connections)
            .connect_with(options)
            .await
            .map_err(map_sqlx_error)?;

        let repository = Self::new(pool);
        repository.migrate().await?;

        info!(path = %settings.path.display(), "sqlite link store ready");
        Ok(repository)
    }

    /// Creates the `links` table if it does not exist yet. Idempotent.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    /// Waits for in-flight queries and closes every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
        debug!("sqlite link store closed");
    }
}

fn parse_created_at(seconds: i64) -> Result<Timestamp> {
    Timestamp::from_second(seconds).map_err(|e| {
        StorageError::InvalidData(format!("invalid created_at timestamp '{}': {e}", seconds))
    })
}

fn record_from_row(row: &SqliteRow) -> Result<LinkRecord> {
    let code: String = row.try_get("code").map_err(map_sqlx_error)?;
    let url: String = row.try_get("url").map_err(map_sqlx_error)?;
    let clicks: i64 = row.try_get("clicks").map_err(map_sqlx_error)?;
    let created_at: i64 = row.try_get("created_at").map_err(map_sqlx_error)?;

    let clicks = u64::try_from(clicks).map_err(|_| {
        StorageError::InvalidData(format!("negative click count {} for '{}'", clicks, code))
    })?;

    Ok(LinkRecord {
        code: ShortCode::new_unchecked(code),
        url,
        clicks,
        created_at: parse_created_at(created_at)?,
    })
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed | sqlx::Error::WorkerCrashed | sqlx::Error::Io(_) => {
            StorageError::Unavailable(message)
        }
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        sqlx::Error::Configuration(_) => StorageError::Operation(message),
        _ => StorageError::Query(message),
    }
}

#[async_trait]
impl ReadRepository for SqliteRepository {
    async fn get(&self, code: &ShortCode) -> Result<Option<LinkRecord>> {
        let row = sqlx::query(
            r#"
            SELECT code, url, clicks, created_at
            FROM links
            WHERE code = ?
            "#,
        )
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(record_from_row).transpose()
    }
}

#[async_trait]
impl Repository for SqliteRepository {
    async fn insert_if_absent(
        &self,
        code: &ShortCode,
        url: &str,
        created_at: Timestamp,
    ) -> Result<InsertOutcome> {
        let result = sqlx::query(
            r#"
            INSERT INTO links (code, url, clicks, created_at)
            VALUES (?, ?, 0, ?)
            "#,
        )
        .bind(code.as_str())
        .bind(url)
        .bind(created_at.as_second())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(InsertOutcome::Inserted),
            Err(err) if is_unique_violation(&err) => Ok(InsertOutcome::AlreadyExists),
            Err(err) => Err(map_sqlx_error(err)),
        }
    }

    async fn increment_clicks(&self, code: &ShortCode) -> Result<Option<LinkRecord>> {
        let row = sqlx::query(
            r#"
            UPDATE links
            SET clicks = clicks + 1
            WHERE code = ?
            RETURNING code, url, clicks, created_at
            "#,
        )
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(record_from_row).transpose()
    }
}
