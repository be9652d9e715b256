use anyhow::Result;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DatabaseTransaction, Statement,
    TransactionTrait,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::info;

pub mod migrator;
pub mod repositories;
pub mod seed;

pub use repositories::favorite::{FavoriteRepository, FavoriteWithRelations, NewFavorite};
pub use repositories::people::PersonRepository;
pub use repositories::planets::PlanetRepository;
pub use repositories::user::UserRepository;
pub use seed::{SeedData, SeedReport};

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,

    /// Held for the whole life of a writing [`UnitOfWork`].
    write_gate: Arc<Mutex<()>>,
}

fn is_memory_url(db_url: &str) -> bool {
    db_url.contains(":memory:") || db_url.contains("mode=memory")
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let memory = is_memory_url(db_url);
        let file_backed = db_url.starts_with("sqlite:") && !memory;

        if file_backed {
            let path_str = db_url.trim_start_matches("sqlite://").trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        // Every connection to an in-memory database is a separate database,
        // so the pool is pinned to one connection that is never recycled.
        if memory {
            opt.max_connections(1).min_connections(1);
        } else {
            opt.max_connections(max_connections)
                .min_connections(min_connections)
                .idle_timeout(Duration::from_secs(300))
                .max_lifetime(Duration::from_secs(600));
        }

        let conn = Database::connect(opt).await?;

        // Persisted in the database file; readers stop blocking the writer.
        // sqlx already gives every SQLite connection a 5s busy timeout.
        if file_backed {
            conn.execute_unprepared("PRAGMA journal_mode=WAL").await?;
        }

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self {
            conn,
            write_gate: Arc::new(Mutex::new(())),
        })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    /// Opens a unit of work. Nothing it writes is visible to other requests
    /// until [`UnitOfWork::commit`]; dropping it rolls back.
    pub async fn begin(&self) -> Result<UnitOfWork> {
        let txn = self.conn.begin().await?;
        Ok(UnitOfWork {
            txn,
            write_guard: None,
        })
    }

    /// Opens a unit of work that may write.
    ///
    /// Writers are admitted one at a time. SQLite cannot upgrade two
    /// concurrent read transactions to writers, so without the gate one of
    /// them fails with `SQLITE_BUSY` instead of waiting.
    pub async fn begin_write(&self) -> Result<UnitOfWork> {
        let guard = Arc::clone(&self.write_gate).lock_owned().await;
        let txn = self.conn.begin().await?;
        Ok(UnitOfWork {
            txn,
            write_guard: Some(guard),
        })
    }

    #[must_use]
    pub fn people(&self) -> PersonRepository<'_, DatabaseConnection> {
        PersonRepository::new(&self.conn)
    }

    #[must_use]
    pub fn planets(&self) -> PlanetRepository<'_, DatabaseConnection> {
        PlanetRepository::new(&self.conn)
    }

    #[must_use]
    pub fn users(&self) -> UserRepository<'_, DatabaseConnection> {
        UserRepository::new(&self.conn)
    }

    #[must_use]
    pub fn favorites(&self) -> FavoriteRepository<'_, DatabaseConnection> {
        FavoriteRepository::new(&self.conn)
    }

    /// Loads fixture rows in a single transaction.
    pub async fn seed(&self, data: &SeedData) -> Result<SeedReport> {
        data.validate()?;

        let uow = self.begin_write().await?;
        let result = seed::apply(&uow, data).await;
        let report = uow.finish(result).await?;

        info!(
            users = report.users,
            people = report.people,
            planets = report.planets,
            "Seed data loaded"
        );
        Ok(report)
    }
}

/// One request's worth of database work.
pub struct UnitOfWork {
    txn: DatabaseTransaction,

    // Released only after the transaction has committed or rolled back.
    write_guard: Option<OwnedMutexGuard<()>>,
}

impl UnitOfWork {
    #[must_use]
    pub const fn people(&self) -> PersonRepository<'_, DatabaseTransaction> {
        PersonRepository::new(&self.txn)
    }

    #[must_use]
    pub const fn planets(&self) -> PlanetRepository<'_, DatabaseTransaction> {
        PlanetRepository::new(&self.txn)
    }

    #[must_use]
    pub const fn users(&self) -> UserRepository<'_, DatabaseTransaction> {
        UserRepository::new(&self.txn)
    }

    #[must_use]
    pub const fn favorites(&self) -> FavoriteRepository<'_, DatabaseTransaction> {
        FavoriteRepository::new(&self.txn)
    }

    #[must_use]
    pub const fn is_writer(&self) -> bool {
        self.write_guard.is_some()
    }

    pub async fn commit(self) -> Result<()> {
        self.txn.commit().await?;
        Ok(())
    }

    pub async fn rollback(self) -> Result<()> {
        self.txn.rollback().await?;
        Ok(())
    }

    /// Commits when `result` is `Ok`, rolls back otherwise, and hands the
    /// result back. A failed commit replaces an `Ok` with its error.
    pub async fn finish<T, E>(self, result: Result<T, E>) -> Result<T, E>
    where
        E: From<anyhow::Error>,
    {
        match result {
            Ok(value) => {
                self.commit().await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = self.rollback().await {
                    tracing::warn!("Rollback failed: {rollback_err:#}");
                }
                Err(err)
            }
        }
    }
}
