use crate::shared::errors::{AppError, AppResult};
use crate::shared::infrastructure::config::DatabaseConfig;
use crate::shared::utils::logger::LogContext;
use crate::{log_error, log_info};
use diesel::connection::{AnsiTransactionManager, TransactionManager};
use diesel::pg::PgConnection;
use diesel::r2d2::{self, ConnectionManager, Pool};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::time::Duration;

pub type DbPool = Pool<ConnectionManager<PgConnection>>;
pub type DbConnection = r2d2::PooledConnection<ConnectionManager<PgConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[derive(Debug)]
pub struct Database {
    pool: DbPool,
}

impl Database {
    pub fn new(config: &DatabaseConfig) -> AppResult<Self> {
        log_info!(
            "Initializing database connection to: {}",
            config.url.split('@').last().unwrap_or("unknown_host")
        );

        let manager = ConnectionManager::<PgConnection>::new(config.url.as_str());

        let pool_config = PoolConfig::for_host(config.max_connections);
        let pool = r2d2::Pool::builder()
            .max_size(pool_config.max_size)
            .min_idle(Some(pool_config.min_idle))
            .connection_timeout(Duration::from_secs(10))
            .idle_timeout(Some(Duration::from_secs(300)))
            .max_lifetime(Some(Duration::from_secs(1800)))
            .test_on_check_out(true)
            .build(manager)
            .map_err(|e| {
                AppError::DatabaseError(format!("Failed to create connection pool: {}", e))
            })?;

        log_info!(
            "Database connection pool initialized with max_size: {}, min_idle: {}",
            pool.max_size(),
            pool_config.min_idle
        );

        Ok(Self { pool })
    }

    /// Create a Database instance from an existing pool (useful for testing)
    pub fn from_pool(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn get_connection(&self) -> AppResult<DbConnection> {
        let start = std::time::Instant::now();

        match self.pool.get() {
            Ok(conn) => {
                let duration = start.elapsed().as_millis() as u64;
                if duration > 100 {
                    LogContext::performance_metric("db_connection_acquire", duration, Some("slow"));
                }
                Ok(conn)
            }
            Err(e) => {
                LogContext::error_with_context(
                    &e,
                    "Failed to acquire database connection from pool",
                );
                Err(AppError::from(e))
            }
        }
    }

    /// Apply every embedded migration that has not run yet.
    pub fn run_migrations(&self) -> AppResult<()> {
        let mut conn = self.get_connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| AppError::DatabaseError(format!("Failed to run migrations: {}", e)))?;

        log_info!("Database migrations completed ({} applied)", applied.len());
        Ok(())
    }
}

/// Runs `f` inside a transaction on `conn`.
///
/// Commits when `f` succeeds and rolls back otherwise. A failed rollback is
/// logged and the error returned by `f` is what the caller sees.
pub fn run_in_transaction<T, F>(conn: &mut PgConnection, operation: &str, f: F) -> AppResult<T>
where
    F: FnOnce(&mut PgConnection) -> AppResult<T>,
{
    AnsiTransactionManager::begin_transaction(conn)?;

    match f(conn) {
        Ok(value) => {
            AnsiTransactionManager::commit_transaction(conn).map_err(|e| {
                log_error!("Commit failed for {}: {}", operation, e);
                AppError::from(e)
            })?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = AnsiTransactionManager::rollback_transaction(conn) {
                log_error!(
                    "Rollback failed for {} (original error: {}): {}",
                    operation,
                    err,
                    rollback_err
                );
            }
            Err(err)
        }
    }
}

#[derive(Debug)]
struct PoolConfig {
    max_size: u32,
    min_idle: u32,
}

impl PoolConfig {
    /// Size the pool from the CPU count unless an explicit maximum is configured.
    fn for_host(max_connections: Option<u32>) -> Self {
        let max_size = max_connections.unwrap_or_else(|| {
            let cpu_count = std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4);
            std::cmp::min(cpu_count * 2, 20) as u32
        });
        let min_idle = std::cmp::min(max_size, std::cmp::max(2, max_size / 4));

        Self { max_size, min_idle }
    }
}
