use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::state::AppState;
use crate::domain::ports::DocumentStore;
use crate::domain::services::scheduler::SchedulingService;
use crate::infra::repositories::{
    document_academy_repo::DocumentAcademyRepo,
    document_appointment_repo::DocumentAppointmentRepo,
    document_availability_repo::DocumentAvailabilityRepo,
};
use crate::infra::store::{
    memory_store::MemoryDocumentStore,
    postgres_store::PostgresDocumentStore,
    sqlite_store::SqliteDocumentStore,
};

pub const MEMORY_URL: &str = "memory://";

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;

    let store: Arc<dyn DocumentStore> = if database_url.starts_with(MEMORY_URL) {
        info!("Using in-memory document store; data is lost on shutdown");
        Arc::new(MemoryDocumentStore::new())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;
        Arc::new(PostgresDocumentStore::new(pool))
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;
        Arc::new(SqliteDocumentStore::new(pool))
    };

    build_state(config.clone(), store)
}

/// Wires repositories and the scheduling service around an existing store.
pub fn build_state(config: Config, store: Arc<dyn DocumentStore>) -> AppState {
    let scheduler = SchedulingService::new(
        Arc::new(DocumentAppointmentRepo::new(store.clone())),
        Arc::new(DocumentAcademyRepo::new(store.clone())),
        Arc::new(DocumentAvailabilityRepo::new(store.clone())),
        config.policy.clone(),
    );

    AppState {
        config,
        store,
        scheduler: Arc::new(scheduler),
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
