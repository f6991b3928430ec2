use crate::config::get_database_path;
use anyhow::{Context, Result};
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::info;
use once_cell::sync::{Lazy, OnceCell};
use std::fs;

/// Embed all diesel migrations at compile time
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Type alias for SQLite connection pool
pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

// 全局数据库连接池
pub static DB_POOL: Lazy<DatabasePool> = Lazy::new(DatabasePool::new);

/// 全局连接池包装
///
/// 进程内只初始化一次，重复调用 init 不会重建连接池
pub struct DatabasePool {
    pool: OnceCell<DbPool>,
}

impl DatabasePool {
    fn new() -> Self {
        Self {
            pool: OnceCell::new(),
        }
    }

    /// 使用默认数据库路径初始化连接池并执行迁移
    ///
    /// 应用启动时调用一次
    pub fn init(&self) -> Result<()> {
        let db_path = get_database_path()?;
        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }
        self.init_with_url(db_path.to_string_lossy().as_ref())
    }

    /// 使用指定数据库地址初始化连接池并执行迁移
    pub fn init_with_url(&self, database_url: &str) -> Result<()> {
        if self.pool.get().is_some() {
            return Ok(());
        }

        let manager = ConnectionManager::<SqliteConnection>::new(database_url);
        let pool = Pool::builder()
            .build(manager)
            .context("Failed to create database pool")?;

        run_migrations(&pool)?;

        // 并发初始化时只保留第一个
        let _ = self.pool.set(pool);
        Ok(())
    }

    /// 从连接池中获取一个连接
    pub fn get_connection(&self) -> Result<DbConnection> {
        let pool = self
            .pool
            .get()
            .ok_or_else(|| anyhow::anyhow!("Database pool is not initialized"))?;
        Ok(pool.get()?)
    }
}

/// Run embedded Diesel migrations
fn run_migrations(pool: &DbPool) -> Result<()> {
    let mut conn = pool.get()?;

    info!("Running database migrations...");
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    info!("Database migrations completed");

    Ok(())
}
