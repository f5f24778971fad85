//! # ApplyDesk インフラ層
//!
//! 外部システム（PostgreSQL、Redis、オブジェクトストレージ）との接続・通信を担当する。
//!
//! ## 責務
//!
//! - **データベース接続**: PostgreSQL への接続プール管理とマイグレーション
//! - **リポジトリ実装**: 一覧取得（件数 + ページ取得）とコメントのカーソル取得
//! - **セッション**: Redis に保存された管理者セッションの参照・削除
//! - **書類ストレージ**: Presigned URL の発行
//!
//! ## 依存関係
//!
//! ```text
//! dashboard-api → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL 接続プール
//! - [`redis`] - Redis 接続マネージャ
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリトレイトと PostgreSQL 実装
//! - [`session`] - セッション管理
//! - [`s3`] - Presigned URL 生成
//! - `mock` - インメモリのモック実装（`test-utils` feature）

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod redis;
pub mod repository;
pub mod s3;
pub mod session;

pub use error::{InfraError, InfraErrorKind};
pub use s3::{AwsS3Client, S3Client};
pub use session::{RedisSessionManager, SessionData, SessionManager};
