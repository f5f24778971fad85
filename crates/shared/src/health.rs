//! # ヘルスチェックのレスポンス型
//!
//! - `GET /health`: [`HealthResponse`]（プロセスが応答できるか）
//! - `GET /health/ready`: [`ReadinessResponse`]（依存サービスに接続できるか）

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Liveness のレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
   /// 常に `"healthy"`
   pub status:  String,
   /// アプリケーションのバージョン
   pub version: String,
}

impl HealthResponse {
   pub fn healthy(version: impl Into<String>) -> Self {
      Self {
         status:  "healthy".to_string(),
         version: version.into(),
      }
   }
}

/// 依存サービスごとの結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
   Ok,
   Error,
}

impl From<bool> for CheckStatus {
   fn from(ok: bool) -> Self {
      if ok { Self::Ok } else { Self::Error }
   }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessStatus {
   Ready,
   NotReady,
}

/// Readiness のレスポンス
///
/// ```
/// use std::collections::HashMap;
///
/// use applydesk_shared::{CheckStatus, ReadinessResponse};
///
/// let response = ReadinessResponse::from_checks(HashMap::from([
///    ("database".to_string(), CheckStatus::Ok),
///    ("redis".to_string(), CheckStatus::Error),
/// ]));
/// assert!(!response.is_ready());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessResponse {
   pub status: ReadinessStatus,
   /// チェック名 → 結果
   pub checks: HashMap<String, CheckStatus>,
}

impl ReadinessResponse {
   /// すべて `Ok` なら `Ready`、1 つでも `Error` があれば `NotReady`
   ///
   /// チェックが 1 つもなければ `Ready`。
   pub fn from_checks(checks: HashMap<String, CheckStatus>) -> Self {
      let status = if checks.values().all(|c| *c == CheckStatus::Ok) {
         ReadinessStatus::Ready
      } else {
         ReadinessStatus::NotReady
      };
      Self { status, checks }
   }

   pub fn is_ready(&self) -> bool {
      self.status == ReadinessStatus::Ready
   }
}
