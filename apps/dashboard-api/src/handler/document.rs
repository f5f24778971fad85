//! # 書類ハンドラ
//!
//! - `POST /api/v1/applicants/{applicant_id}/documents/upload-url` - Upload URL 発行

use std::sync::Arc;

use applydesk_shared::ApiResponse;
use axum::{
   Json,
   extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use super::applicant::parse_applicant_id;
use crate::{
   error::CoreError,
   usecase::{DocumentUseCaseImpl, RequestUploadUrlInput, UploadUrlOutput},
};

/// 書類 API の共有状態
pub struct DocumentState {
   pub usecase: DocumentUseCaseImpl,
}

/// Upload URL 発行リクエスト
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestUploadUrlRequest {
   pub filename:       String,
   pub content_type:   String,
   pub content_length: i64,
}

/// Upload URL レスポンス DTO
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlDto {
   pub upload_url: String,
   pub object_key: String,
   pub expires_in: u64,
}

impl From<UploadUrlOutput> for UploadUrlDto {
   fn from(output: UploadUrlOutput) -> Self {
      Self {
         upload_url: output.upload_url,
         object_key: output.object_key,
         expires_in: output.expires_in,
      }
   }
}

/// POST /api/v1/applicants/{applicant_id}/documents/upload-url
///
/// クライアントは返された `uploadUrl` に、リクエストと同じ Content-Type で PUT する。
///
/// ## レスポンス
///
/// - `200 OK`: Upload URL とオブジェクトキー
/// - `400 Bad Request`: 非対応の Content-Type、サイズ超過、不正なファイル名
/// - `404 Not Found`: 求職者が存在しない
#[tracing::instrument(skip_all, fields(%applicant_id))]
pub async fn request_upload_url(
   State(state): State<Arc<DocumentState>>,
   Path(applicant_id): Path<String>,
   Json(req): Json<RequestUploadUrlRequest>,
) -> Result<Json<ApiResponse<UploadUrlDto>>, CoreError> {
   let applicant_id = parse_applicant_id(&applicant_id)?;
   let input = RequestUploadUrlInput {
      filename:       req.filename,
      content_type:   req.content_type,
      content_length: req.content_length,
   };

   let output = state
      .usecase
      .request_upload_url(&applicant_id, input)
      .await?;

   Ok(Json(ApiResponse::new(UploadUrlDto::from(output))))
}
