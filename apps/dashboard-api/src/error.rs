//! # Dashboard API エラー定義
//!
//! API 固有のエラーと、HTTP レスポンス（RFC 9457 Problem Details）への変換を定義する。
//!
//! 5xx 系は詳細をログにだけ出し、レスポンスの detail は固定文言にする。

use applydesk_domain::DomainError;
use applydesk_infra::InfraError;
use applydesk_shared::ErrorResponse;
use axum::{
   Json,
   http::StatusCode,
   response::{IntoResponse, Response},
};
use thiserror::Error;

/// Dashboard API で発生するエラー
#[derive(Debug, Error)]
pub enum CoreError {
   /// 不正なリクエスト（必須パラメータの欠落・形式不正）
   #[error("不正なリクエスト: {0}")]
   BadRequest(String),

   /// 未認証（セッションが存在しない）
   #[error("認証が必要です: {0}")]
   Unauthorized(String),

   /// リソースが見つからない
   #[error("リソースが見つかりません: {0}")]
   NotFound(String),

   /// 一意制約など、現在のリソースの状態と競合する
   #[error("競合: {0}")]
   Conflict(String),

   /// データベース・セッションストア・オブジェクトストレージのエラー
   #[error("インフラエラー: {0}")]
   Database(#[from] InfraError),

   /// 内部エラー
   #[error("内部エラー: {0}")]
   Internal(String),
}

impl From<DomainError> for CoreError {
   fn from(e: DomainError) -> Self {
      match e {
         DomainError::Validation(msg) => Self::BadRequest(msg),
         e @ DomainError::NotFound { .. } => Self::NotFound(e.to_string()),
      }
   }
}

impl CoreError {
   fn status(&self) -> StatusCode {
      match self {
         Self::BadRequest(_) => StatusCode::BAD_REQUEST,
         Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
         Self::NotFound(_) => StatusCode::NOT_FOUND,
         Self::Conflict(_) => StatusCode::CONFLICT,
         Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
      }
   }
}

impl IntoResponse for CoreError {
   fn into_response(self) -> Response {
      let status = self.status();
      let body = match self {
         CoreError::BadRequest(msg) => ErrorResponse::bad_request(msg),
         CoreError::Unauthorized(msg) => ErrorResponse::unauthorized(msg),
         CoreError::NotFound(msg) => ErrorResponse::not_found(msg),
         CoreError::Conflict(msg) => ErrorResponse::conflict(msg),
         CoreError::Database(ref e) => {
            tracing::error!(error = %e, span_trace = %e.span_trace(), "インフラエラー");
            ErrorResponse::internal_error()
         }
         CoreError::Internal(ref msg) => {
            tracing::error!("内部エラー: {}", msg);
            ErrorResponse::internal_error()
         }
      };
      (status, Json(body)).into_response()
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;
   use rstest::rstest;

   use super::*;

   async fn body_json(response: Response) -> serde_json::Value {
      let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
         .await
         .unwrap();
      serde_json::from_slice(&bytes).unwrap()
   }

   #[rstest]
   #[case(CoreError::BadRequest("x".into()), StatusCode::BAD_REQUEST)]
   #[case(CoreError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED)]
   #[case(CoreError::NotFound("x".into()), StatusCode::NOT_FOUND)]
   #[case(CoreError::Conflict("x".into()), StatusCode::CONFLICT)]
   #[case(CoreError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR)]
   #[tokio::test]
   async fn test_エラー種別ごとのステータスコード(
      #[case] error: CoreError,
      #[case] expected: StatusCode,
   ) {
      assert_eq!(error.status(), expected);
      assert_eq!(error.into_response().status(), expected);
   }

   #[tokio::test]
   async fn test_bad_requestはproblem_details形式で返す() {
      let response = CoreError::BadRequest("cursor が不正です".to_string()).into_response();

      let json = body_json(response).await;

      assert_eq!(
         json,
         serde_json::json!({
            "type": "https://applydesk.example.com/errors/bad-request",
            "title": "Bad Request",
            "status": 400,
            "detail": "cursor が不正です",
         })
      );
   }

   #[tokio::test]
   async fn test_インフラエラーは内部情報を含めない() {
      let error = CoreError::Database(InfraError::unexpected("connection refused"));

      let response = error.into_response();
      assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

      let json = body_json(response).await;
      assert_eq!(json["detail"], "内部エラーが発生しました");
   }

   #[test]
   fn test_ドメインエラーの変換() {
      let validation: CoreError = DomainError::Validation("本文が空です".to_string()).into();
      let not_found: CoreError = DomainError::NotFound {
         entity_type: "求職者",
         id:          "abc".to_string(),
      }
      .into();

      assert!(matches!(validation, CoreError::BadRequest(msg) if msg == "本文が空です"));
      assert!(matches!(not_found, CoreError::NotFound(msg) if msg == "求職者が見つかりません: abc"));
   }
}
