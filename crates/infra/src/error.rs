//! # インフラ層エラー
//!
//! Postgres・Redis・S3 とのやり取りで起きた失敗を [`InfraError`] にまとめる。
//! 種別は [`InfraErrorKind`] で表し、どの経路で生成しても発生地点の
//! [`SpanTrace`] が付く（`From<InfraErrorKind>` に集約している）。

use std::fmt;

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
   kind:       InfraErrorKind,
   span_trace: SpanTrace,
}

/// エラー種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
   #[error("データベースエラー: {0}")]
   Database(#[source] sqlx::Error),

   /// 一意制約違反（値は制約名）
   #[error("一意制約違反: {0}")]
   UniqueViolation(String),

   /// 外部キー制約違反（値は制約名）
   #[error("外部キー制約違反: {0}")]
   ForeignKeyViolation(String),

   #[error("Redis エラー: {0}")]
   Redis(#[source] redis::RedisError),

   /// セッションの JSON 変換失敗
   #[error("シリアライズエラー: {0}")]
   Serialization(#[source] serde_json::Error),

   /// AWS SDK のエラーは型パラメータが多いため文字列で保持する
   #[error("S3 エラー: {0}")]
   S3(String),

   /// 行の値がドメインの制約を満たさない等
   #[error("予期しないエラー: {0}")]
   Unexpected(String),
}

impl InfraError {
   pub fn kind(&self) -> &InfraErrorKind {
      &self.kind
   }

   pub fn span_trace(&self) -> &SpanTrace {
      &self.span_trace
   }

   pub fn s3(msg: impl Into<String>) -> Self {
      InfraErrorKind::S3(msg.into()).into()
   }

   pub fn unexpected(msg: impl Into<String>) -> Self {
      InfraErrorKind::Unexpected(msg.into()).into()
   }

   pub fn unique_violation(constraint: impl Into<String>) -> Self {
      InfraErrorKind::UniqueViolation(constraint.into()).into()
   }

   pub fn foreign_key_violation(constraint: impl Into<String>) -> Self {
      InfraErrorKind::ForeignKeyViolation(constraint.into()).into()
   }

   pub fn is_unique_violation(&self) -> bool {
      matches!(self.kind, InfraErrorKind::UniqueViolation(_))
   }

   pub fn is_foreign_key_violation(&self) -> bool {
      matches!(self.kind, InfraErrorKind::ForeignKeyViolation(_))
   }

   /// 接続断など、依存先の一時的な不調とみなせるか
   ///
   /// レディネスチェックのログで原因を区別するのに使う。
   pub fn is_connectivity(&self) -> bool {
      match &self.kind {
         InfraErrorKind::Database(e) => matches!(
            e,
            sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed
         ),
         InfraErrorKind::Redis(e) => e.is_io_error() || e.is_timeout() || e.is_connection_dropped(),
         _ => false,
      }
   }
}

impl From<InfraErrorKind> for InfraError {
   fn from(kind: InfraErrorKind) -> Self {
      Self {
         kind,
         span_trace: SpanTrace::capture(),
      }
   }
}

impl From<sqlx::Error> for InfraError {
   fn from(source: sqlx::Error) -> Self {
      constraint_violation(&source)
         .unwrap_or_else(|| InfraErrorKind::Database(source))
         .into()
   }
}

/// 制約違反をクライアント起因のエラーとして分類する
fn constraint_violation(source: &sqlx::Error) -> Option<InfraErrorKind> {
   let db = source.as_database_error()?;
   let constraint = db.constraint().unwrap_or_default().to_string();

   if db.is_unique_violation() {
      Some(InfraErrorKind::UniqueViolation(constraint))
   } else if db.is_foreign_key_violation() {
      Some(InfraErrorKind::ForeignKeyViolation(constraint))
   } else {
      None
   }
}

impl From<redis::RedisError> for InfraError {
   fn from(source: redis::RedisError) -> Self {
      InfraErrorKind::Redis(source).into()
   }
}

impl From<serde_json::Error> for InfraError {
   fn from(source: serde_json::Error) -> Self {
      InfraErrorKind::Serialization(source).into()
   }
}

impl fmt::Debug for InfraError {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.debug_struct("InfraError")
         .field("kind", &self.kind)
         .field("span_trace", &self.span_trace)
         .finish()
   }
}

impl std::error::Error for InfraError {
   fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
      self.kind.source()
   }
}
