//! # ApplyDesk Dashboard API
//!
//! 求職者管理ダッシュボードのバックエンド API。
//!
//! ## レイヤー構成
//!
//! - [`handler`] - HTTP の入出力（クエリ解析・DTO 変換）
//! - [`usecase`] - ページネーション・コメントスレッド・アップロード URL 発行
//! - [`middleware`] - セッション検証
//! - [`app_builder`] - State の組み立てとルーター構築
//!
//! ドメインモデルは `applydesk-domain`、永続化・セッション・ストレージは `applydesk-infra` に置く。

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod usecase;
