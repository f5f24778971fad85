//! # ApplyDesk ドメイン層
//!
//! 求職者・ビザ・書類の管理業務を表現するドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **エンティティ**: 一意の識別子を持つオブジェクト（例: Applicant, Comment）
//! - **値オブジェクト**: 識別子を持たない不変オブジェクト（例: Email, CommentBody）
//! - **ページネーション**: 一覧 API が共有するページ要求・ソート指定の値オブジェクト
//! - **ドメインエラー**: ビジネスルール違反を表現するエラー型
//!
//! ## 依存関係の方向
//!
//! ```text
//! dashboard-api → infra → domain
//!       ↘
//!         shared
//! ```
//!
//! ドメイン層はインフラ層（DB、外部サービス）には一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`pagination`] - ページ要求・ソート指定・カーソル要求
//! - [`admin`], [`applicant`], [`code`], [`sidebar`], [`comment`], [`alert`] - 各リソース
//! - [`document`] - 書類アップロードのバリデーションとオブジェクトキー
//! - [`error`] - ドメイン層エラー

#[macro_use]
mod macros;

pub mod admin;
pub mod alert;
pub mod applicant;
pub mod clock;
pub mod code;
pub mod comment;
pub mod document;
pub mod error;
pub mod pagination;
pub mod sidebar;
pub mod value_objects;

pub use error::DomainError;
