//! # 書類バケット
//!
//! 書類はブラウザからバケットへ直接 PUT する。サーバーは署名付き URL を
//! 発行するだけで、ファイル本体には触れない。
//!
//! `S3_ENDPOINT_URL` を設定するとそのエンドポイント（ローカルの MinIO など）に
//! パススタイルで接続し、未設定なら Amazon S3 に接続する。

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::{Client, presigning::PresigningConfig};

use crate::InfraError;

/// 署名付き PUT URL の発行条件
///
/// Content-Type と Content-Length は署名に含まれるため、
/// アップロード時のリクエストも同じ値でなければならない。
#[derive(Debug, Clone, Copy)]
pub struct PresignPutRequest<'a> {
   pub object_key:     &'a str,
   pub content_type:   &'a str,
   pub content_length: i64,
   pub expires_in:     Duration,
}

#[async_trait]
pub trait S3Client: Send + Sync {
   /// 署名付き PUT URL を発行する
   async fn presign_put(&self, request: PresignPutRequest<'_>) -> Result<String, InfraError>;
}

/// `aws-sdk-s3` による [`S3Client`] 実装
pub struct AwsS3Client {
   client: Client,
   bucket: String,
}

impl AwsS3Client {
   pub fn new(client: Client, bucket: impl Into<String>) -> Self {
      Self {
         client,
         bucket: bucket.into(),
      }
   }
}

#[async_trait]
impl S3Client for AwsS3Client {
   #[tracing::instrument(
      skip_all,
      level = "debug",
      fields(bucket = %self.bucket, object_key = request.object_key)
   )]
   async fn presign_put(&self, request: PresignPutRequest<'_>) -> Result<String, InfraError> {
      let config = PresigningConfig::expires_in(request.expires_in)
         .map_err(|e| InfraError::s3(format!("有効期限が不正です: {e}")))?;

      let presigned = self
         .client
         .put_object()
         .bucket(&self.bucket)
         .key(request.object_key)
         .content_type(request.content_type)
         .content_length(request.content_length)
         .presigned(config)
         .await
         .map_err(|e| InfraError::s3(format!("署名付き URL を発行できません: {e}")))?;

      Ok(presigned.uri().to_string())
   }
}

/// S3 クライアントを作成する
///
/// 認証情報は SDK の既定の解決順（環境変数、プロファイル、IAM ロール）に従う。
pub async fn create_client(endpoint: Option<&str>, region: &str) -> Client {
   let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
      .region(aws_config::Region::new(region.to_string()));
   if let Some(endpoint) = endpoint {
      loader = loader.endpoint_url(endpoint);
   }
   let shared = loader.load().await;

   let config = aws_sdk_s3::config::Builder::from(&shared)
      .force_path_style(endpoint.is_some())
      .build();

   Client::from_conf(config)
}
