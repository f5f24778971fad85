//! # ヘルスチェックハンドラ
//!
//! - `/health` — Liveness Check（常に `"healthy"` を返す）
//! - `/health/ready` — Readiness Check（PostgreSQL / Redis の接続状態を確認）
//!
//! レスポンス型は [`applydesk_shared::HealthResponse`] / [`applydesk_shared::ReadinessResponse`] を参照。

use std::{collections::HashMap, sync::Arc, time::Duration};

use applydesk_infra::InfraError;
use applydesk_shared::{CheckStatus, HealthResponse, ReadinessResponse};
use async_trait::async_trait;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use redis::aio::ConnectionManager;
use sqlx::PgPool;

/// 個別チェックのタイムアウト
const CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// 依存サービスの疎通確認
#[async_trait]
pub trait DependencyCheck: Send + Sync {
   /// レスポンスの `checks` に出力するキー
   fn name(&self) -> &'static str;

   async fn check(&self) -> Result<(), InfraError>;
}

/// PostgreSQL の疎通確認（`SELECT 1`）
pub struct DatabaseCheck {
   pool: PgPool,
}

impl DatabaseCheck {
   pub fn new(pool: PgPool) -> Self {
      Self { pool }
   }
}

#[async_trait]
impl DependencyCheck for DatabaseCheck {
   fn name(&self) -> &'static str {
      "database"
   }

   async fn check(&self) -> Result<(), InfraError> {
      applydesk_infra::db::ping(&self.pool).await
   }
}

/// Redis の疎通確認（`PING`）
pub struct RedisCheck {
   conn: ConnectionManager,
}

impl RedisCheck {
   pub fn new(conn: ConnectionManager) -> Self {
      Self { conn }
   }
}

#[async_trait]
impl DependencyCheck for RedisCheck {
   fn name(&self) -> &'static str {
      "redis"
   }

   async fn check(&self) -> Result<(), InfraError> {
      applydesk_infra::redis::ping(&self.conn).await
   }
}

/// Liveness Check
pub async fn health_check() -> Json<HealthResponse> {
   Json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}

/// Readiness Check 用の State
pub struct ReadinessState {
   pub checks: Vec<Arc<dyn DependencyCheck>>,
}

/// Readiness Check
///
/// 全チェック OK → 200、1 つでも失敗 → 503。
#[tracing::instrument(skip_all)]
pub async fn readiness_check(State(state): State<Arc<ReadinessState>>) -> impl IntoResponse {
   let mut checks = HashMap::new();
   for check in &state.checks {
      checks.insert(check.name().to_string(), run_check(check.as_ref()).await);
   }

   let response = ReadinessResponse::from_checks(checks);
   let http_status = if response.is_ready() {
      StatusCode::OK
   } else {
      StatusCode::SERVICE_UNAVAILABLE
   };

   (http_status, Json(response))
}

async fn run_check(check: &dyn DependencyCheck) -> CheckStatus {
   match tokio::time::timeout(CHECK_TIMEOUT, check.check()).await {
      Ok(Ok(())) => CheckStatus::Ok,
      Ok(Err(e)) => {
         tracing::warn!(
            check = check.name(),
            connectivity = e.is_connectivity(),
            error = %e,
            "readiness check failed"
         );
         CheckStatus::Error
      }
      Err(_) => {
         tracing::warn!(check = check.name(), "readiness check timed out");
         CheckStatus::Error
      }
   }
}
