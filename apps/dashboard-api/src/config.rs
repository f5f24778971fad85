//! # Dashboard API 設定
//!
//! 環境変数からサーバー設定を読み込む。

use std::env;

use thiserror::Error;

/// S3 リージョンの既定値
const DEFAULT_S3_REGION: &str = "ap-northeast-1";

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
   #[error("環境変数 {0} が設定されていません")]
   Missing(&'static str),

   #[error("環境変数 {name} の値が不正です: {value}")]
   Invalid { name: &'static str, value: String },
}

/// Dashboard API サーバーの設定
#[derive(Debug, Clone)]
pub struct DashboardConfig {
   /// バインドアドレス
   pub host:            String,
   /// ポート番号
   pub port:            u16,
   /// PostgreSQL 接続 URL
   pub database_url:    String,
   /// Redis 接続 URL
   pub redis_url:       String,
   /// S3 エンドポイント（MinIO 使用時のみ）
   pub s3_endpoint_url: Option<String>,
   pub s3_bucket_name:  String,
   pub s3_region:       String,
}

impl DashboardConfig {
   /// 環境変数から設定を読み込む
   pub fn from_env() -> Result<Self, ConfigError> {
      Self::from_lookup(|name| env::var(name).ok())
   }

   /// 任意の参照関数から設定を読み込む
   ///
   /// 空文字列の値は未設定として扱う。
   fn from_lookup(lookup: impl Fn(&'static str) -> Option<String>) -> Result<Self, ConfigError> {
      let get = |name: &'static str| lookup(name).filter(|v| !v.trim().is_empty());
      let require = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

      let port_value = require("API_PORT")?;
      let port = port_value.parse().map_err(|_| ConfigError::Invalid {
         name:  "API_PORT",
         value: port_value.clone(),
      })?;

      Ok(Self {
         host: get("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
         port,
         database_url: require("DATABASE_URL")?,
         redis_url: require("REDIS_URL")?,
         s3_endpoint_url: get("S3_ENDPOINT_URL"),
         s3_bucket_name: require("S3_BUCKET_NAME")?,
         s3_region: get("S3_REGION").unwrap_or_else(|| DEFAULT_S3_REGION.to_string()),
      })
   }
}
