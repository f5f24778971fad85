//! # Redis 接続管理
//!
//! セッションストアとして使う Redis への接続を管理する。
//! `ConnectionManager` は切断時に自動で再接続し、Clone してタスク間で共有できる。

use redis::{Client, aio::ConnectionManager};

use crate::error::InfraError;

/// Redis 接続マネージャを作成する
///
/// * `redis_url` - `redis://[[username:]password@]host[:port][/database]`
///   （TLS は `rediss://`）
pub async fn create_connection_manager(
   redis_url: &str,
) -> Result<ConnectionManager, redis::RedisError> {
   let client = Client::open(redis_url)?;
   ConnectionManager::new(client).await
}

/// 疎通確認（`PING`）
#[tracing::instrument(skip_all, level = "debug")]
pub async fn ping(conn: &ConnectionManager) -> Result<(), InfraError> {
   let mut conn = conn.clone();
   let _: String = redis::cmd("PING").query_async(&mut conn).await?;
   Ok(())
}
