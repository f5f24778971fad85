//! # 書類アップロードユースケース
//!
//! 求職者の書類をストレージへ直接アップロードするための Presigned PUT URL を発行する。
//! サーバーはファイル本体を受け取らない。

use std::{sync::Arc, time::Duration};

use applydesk_domain::{
   applicant::ApplicantId,
   document::{ObjectKeyGenerator, UploadRequest},
};
use applydesk_infra::{
   repository::ApplicantRepository,
   s3::{PresignPutRequest, S3Client},
};
use uuid::Uuid;

use super::helpers::FindResultExt;
use crate::error::CoreError;

/// Presigned URL の有効期限（5 分）
const UPLOAD_URL_EXPIRES_IN: Duration = Duration::from_secs(300);

/// Upload URL 発行の入力（未検証）
pub struct RequestUploadUrlInput {
   pub filename:       String,
   pub content_type:   String,
   pub content_length: i64,
}

/// Upload URL 発行の結果
#[derive(Debug)]
pub struct UploadUrlOutput {
   pub upload_url: String,
   pub object_key: String,
   pub expires_in: u64,
}

/// 書類アップロードユースケース
pub struct DocumentUseCaseImpl {
   applicant_repository: Arc<dyn ApplicantRepository>,
   s3_client:            Arc<dyn S3Client>,
}

impl DocumentUseCaseImpl {
   pub fn new(
      applicant_repository: Arc<dyn ApplicantRepository>,
      s3_client: Arc<dyn S3Client>,
   ) -> Self {
      Self {
         applicant_repository,
         s3_client,
      }
   }

   /// Upload URL を発行する
   ///
   /// 1. ファイル名・Content-Type・サイズの検証
   /// 2. 求職者の存在確認
   /// 3. オブジェクトキー生成（`applicants/{applicant_id}/{upload_id}/{filename}`）
   /// 4. Presigned PUT URL 生成
   #[tracing::instrument(skip_all, fields(%applicant_id))]
   pub async fn request_upload_url(
      &self,
      applicant_id: &ApplicantId,
      input: RequestUploadUrlInput,
   ) -> Result<UploadUrlOutput, CoreError> {
      let request = UploadRequest::new(input.filename, input.content_type, input.content_length)?;

      self
         .applicant_repository
         .find_by_id(applicant_id)
         .await
         .or_not_found("求職者", applicant_id)?;

      let object_key =
         ObjectKeyGenerator::generate(applicant_id, &Uuid::now_v7(), request.filename());

      let upload_url = self
         .s3_client
         .presign_put(PresignPutRequest {
            object_key:     &object_key,
            content_type:   request.content_type(),
            content_length: request.content_length(),
            expires_in:     UPLOAD_URL_EXPIRES_IN,
         })
         .await?;

      Ok(UploadUrlOutput {
         upload_url,
         object_key,
         expires_in: UPLOAD_URL_EXPIRES_IN.as_secs(),
      })
   }
}
