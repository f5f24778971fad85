//! # ドメイン層エラー定義
//!
//! ビジネスルール違反を表現するエラー型。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 400 Bad Request | 入力値の検証失敗 |
//! | `NotFound` | 404 Not Found | エンティティが存在しない |
//!
//! ## 使用例
//!
//! ```rust
//! use applydesk_domain::DomainError;
//!
//! fn validate_name(name: &str) -> Result<(), DomainError> {
//!     if name.is_empty() {
//!         return Err(DomainError::Validation("名前は必須です".to_string()));
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Error)]
pub enum DomainError {
   /// バリデーションエラー
   ///
   /// 入力値がビジネスルールに違反している場合に使用する。
   ///
   /// # 例
   ///
   /// - 必須フィールドが未入力
   /// - 文字数制限の超過
   /// - 不正なフォーマット
   #[error("バリデーションエラー: {0}")]
   Validation(String),

   /// エンティティが見つからない
   #[error("{entity_type}が見つかりません: {id}")]
   NotFound {
      /// エンティティの種類（"Applicant", "Comment" など）
      entity_type: &'static str,
      /// 検索に使用した識別子
      id:          String,
   },
}
