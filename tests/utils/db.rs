/// Database test utilities with singleton pattern
///
/// Tests need a Postgres reachable through TEST_DATABASE_URL. Without it every
/// database test returns early instead of failing.
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager};
use diesel::sql_types::{BigInt, Uuid as SqlUuid};
use shop_review_lib::shared::Database;
use std::sync::{Arc, Mutex, OnceLock};
use uuid::Uuid;

static DATABASE: OnceLock<Option<Arc<Database>>> = OnceLock::new();

/// Get or create the shared, migrated test database
pub fn test_database() -> Option<Arc<Database>> {
    DATABASE
        .get_or_init(|| {
            dotenvy::dotenv().ok();
            let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
                eprintln!("TEST_DATABASE_URL is not set; skipping database tests");
                return None;
            };

            let manager = ConnectionManager::<PgConnection>::new(url);
            let pool = r2d2::Pool::builder()
                .max_size(10)
                .build(manager)
                .expect("Failed to create test database pool");

            let database = Database::from_pool(pool);
            database
                .run_migrations()
                .expect("Failed to run migrations on test database");
            Some(Arc::new(database))
        })
        .clone()
}

/// Empty every table - use at the start of each test
pub fn clean_test_db(database: &Database) {
    let mut conn = database.get_connection().expect("Failed to get DB connection");

    diesel::sql_query(
        "TRUNCATE TABLE review_images, reviews, shop_images, shop_payment_methods, \
         shop_stations, shops, stations CASCADE",
    )
    .execute(&mut conn)
    .expect("Failed to clean test tables");
}

#[derive(QueryableByName)]
struct RowCount {
    #[diesel(sql_type = BigInt)]
    count: i64,
}

/// Number of rows in `table` whose `column` equals `id`
pub fn count_rows(database: &Database, table: &str, column: &str, id: Uuid) -> i64 {
    let mut conn = database.get_connection().expect("Failed to get DB connection");

    diesel::sql_query(format!(
        "SELECT COUNT(*) AS count FROM {} WHERE {} = $1",
        table, column
    ))
    .bind::<SqlUuid, _>(id)
    .get_result::<RowCount>(&mut conn)
    .expect("Failed to count rows")
    .count
}

/// Global test mutex for serialization
static TEST_LOCK: Mutex<()> = Mutex::new(());

/// Acquire test lock to ensure tests run serially
/// Returns a guard that releases the lock when dropped
pub fn acquire_test_lock() -> std::sync::MutexGuard<'static, ()> {
    // Handle poisoned mutex by recovering from panic
    match TEST_LOCK.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
