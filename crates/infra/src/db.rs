//! # PostgreSQL データベース接続管理
//!
//! 接続プールの作成、マイグレーションの適用、疎通確認を行う。
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use applydesk_infra::db;
//!
//! let pool = db::create_pool("postgres://localhost/applydesk").await?;
//! db::run_migrations(&pool).await?;
//! ```

use std::time::Duration;

use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::error::InfraError;

/// PostgreSQL 接続プールを作成する
///
/// アプリケーション起動時に一度だけ呼び出し、作成したプールを共有する。
///
/// - `max_connections(10)`: 負荷に応じて調整する
/// - `acquire_timeout(5秒)`: 超過時はエラー
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
   PgPoolOptions::new()
      .max_connections(10)
      .acquire_timeout(Duration::from_secs(5))
      .connect(database_url)
      .await
}

/// マイグレーションを適用する
///
/// 適用済みのものはスキップされる。sqlx が advisory lock を取るため、
/// 複数プロセスから同時に呼び出してもよい。
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
   sqlx::migrate!("../../migrations").run(pool).await
}

/// 疎通確認（`SELECT 1`）
#[tracing::instrument(skip_all, level = "debug")]
pub async fn ping(pool: &PgPool) -> Result<(), InfraError> {
   sqlx::query("SELECT 1").execute(pool).await?;
   Ok(())
}
