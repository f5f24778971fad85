//! # エラーレスポンス（RFC 9457 Problem Details）
//!
//! Dashboard API が返す問題の種類は [`ProblemType`] に列挙する。
//! HTTP への変換（axum の `IntoResponse`）はアプリ側で行い、このクレートは axum に依存しない。

use serde::{Deserialize, Serialize};

/// `type` URI の共通部分
const PROBLEM_TYPE_BASE: &str = "https://applydesk.example.com/errors";

/// 500 系で返す固定の detail
const INTERNAL_ERROR_DETAIL: &str = "内部エラーが発生しました";

/// API が返す問題の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemType {
   BadRequest,
   Unauthorized,
   NotFound,
   Conflict,
   InternalError,
}

impl ProblemType {
   /// `type` URI の末尾
   fn slug(self) -> &'static str {
      match self {
         Self::BadRequest => "bad-request",
         Self::Unauthorized => "unauthorized",
         Self::NotFound => "not-found",
         Self::Conflict => "conflict",
         Self::InternalError => "internal-error",
      }
   }

   pub fn title(self) -> &'static str {
      match self {
         Self::BadRequest => "Bad Request",
         Self::Unauthorized => "Unauthorized",
         Self::NotFound => "Not Found",
         Self::Conflict => "Conflict",
         Self::InternalError => "Internal Server Error",
      }
   }

   pub fn status(self) -> u16 {
      match self {
         Self::BadRequest => 400,
         Self::Unauthorized => 401,
         Self::NotFound => 404,
         Self::Conflict => 409,
         Self::InternalError => 500,
      }
   }
}

/// エラーレスポンス本体
///
/// ```json
/// {
///   "type": "https://applydesk.example.com/errors/not-found",
///   "title": "Not Found",
///   "status": 404,
///   "detail": "求職者が見つかりません: 0190..."
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
   #[serde(rename = "type")]
   pub error_type: String,
   pub title:      String,
   pub status:     u16,
   pub detail:     String,
}

impl ErrorResponse {
   pub fn new(problem: ProblemType, detail: impl Into<String>) -> Self {
      Self {
         error_type: format!("{PROBLEM_TYPE_BASE}/{}", problem.slug()),
         title:      problem.title().to_string(),
         status:     problem.status(),
         detail:     detail.into(),
      }
   }

   pub fn bad_request(detail: impl Into<String>) -> Self {
      Self::new(ProblemType::BadRequest, detail)
   }

   pub fn unauthorized(detail: impl Into<String>) -> Self {
      Self::new(ProblemType::Unauthorized, detail)
   }

   pub fn not_found(detail: impl Into<String>) -> Self {
      Self::new(ProblemType::NotFound, detail)
   }

   pub fn conflict(detail: impl Into<String>) -> Self {
      Self::new(ProblemType::Conflict, detail)
   }

   /// 500 Internal Server Error（detail は固定文言）
   pub fn internal_error() -> Self {
      Self::new(ProblemType::InternalError, INTERNAL_ERROR_DETAIL)
   }
}
