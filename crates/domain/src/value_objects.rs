//! # 値オブジェクト
//!
//! 複数のエンティティで共有される値オブジェクトを定義する。

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// メールアドレスの最大長
const EMAIL_MAX_LENGTH: usize = 254;

/// メールアドレス（値オブジェクト）
///
/// 生成時にバリデーションを実行し、不正な値の作成を防ぐ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
   /// メールアドレスを作成する
   ///
   /// # バリデーション
   ///
   /// - 空文字列ではない（前後の空白は除去する）
   /// - `local@domain` の形式
   /// - 最大 254 文字
   pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
      let value = value.into().trim().to_string();

      if value.is_empty() {
         return Err(DomainError::Validation(
            "メールアドレスは必須です".to_string(),
         ));
      }

      let Some((local, domain)) = value.split_once('@') else {
         return Err(DomainError::Validation(
            "メールアドレスの形式が不正です".to_string(),
         ));
      };

      if local.is_empty() || domain.is_empty() {
         return Err(DomainError::Validation(
            "メールアドレスの形式が不正です".to_string(),
         ));
      }

      if value.len() > EMAIL_MAX_LENGTH {
         return Err(DomainError::Validation(format!(
            "メールアドレスは{EMAIL_MAX_LENGTH}文字以内である必要があります"
         )));
      }

      Ok(Self(value))
   }

   pub fn as_str(&self) -> &str {
      &self.0
   }

   pub fn into_string(self) -> String {
      self.0
   }
}

impl std::fmt::Display for Email {
   fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
      write!(f, "{}", self.0)
   }
}

define_validated_string! {
   /// 人名（値オブジェクト）
   ///
   /// PII のため、Debug 出力はマスクされる。
   ///
   /// # バリデーション
   ///
   /// - 空文字列ではない（前後の空白は除去する）
   /// - 最大 100 文字
   pub struct PersonName {
      label: "氏名",
      max_length: 100,
      pii: true,
   }
}

define_validated_string! {
   /// 電話番号
   ///
   /// 国番号付き・ハイフン区切りなど表記は自由。PII のため Debug 出力はマスクされる。
   pub struct PhoneNumber {
      label: "電話番号",
      max_length: 50,
      pii: true,
   }
}

define_validated_string! {
   /// 国籍（例: `VN`, `Philippines`）
   pub struct Nationality {
      label: "国籍",
      max_length: 100,
   }
}
