//! # 求職者の書類
//!
//! パスポート・在留カード・履歴書などの書類は Presigned URL 方式で
//! オブジェクトストレージに直接アップロードする。サーバーはファイル本体を扱わず、
//! アップロード要求の検証とオブジェクトキーの生成だけを行う。
//!
//! ## アップロードフロー
//!
//! 1. クライアントがファイル名・Content-Type・サイズを送信
//! 2. サーバーが検証し、Presigned PUT URL を発行
//! 3. クライアントがストレージに直接アップロード

use uuid::Uuid;

use crate::{DomainError, applicant::ApplicantId};

/// アップロード要求（検証済み）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
   filename:       String,
   content_type:   String,
   content_length: i64,
}

impl UploadRequest {
   /// 対応 Content-Type の一覧
   const ALLOWED_CONTENT_TYPES: &[&str] = &[
      "application/pdf",
      "image/jpeg",
      "image/png",
      "application/msword",
      "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
   ];
   /// ファイル名の最大文字数
   pub const MAX_FILENAME_LENGTH: usize = 255;
   /// 最大ファイルサイズ（20 MiB）
   pub const MAX_FILE_SIZE: i64 = 20 * 1024 * 1024;

   /// アップロード要求を検証して作成する
   ///
   /// # Errors
   ///
   /// - ファイル名が空、255 文字超、またはパス区切り文字を含む
   /// - ファイル名の UTF-8 バイト長がオブジェクトキーの上限に収まらない
   /// - 非対応の Content-Type
   /// - サイズが 0 以下、または 20 MiB 超
   pub fn new(
      filename: impl Into<String>,
      content_type: impl Into<String>,
      content_length: i64,
   ) -> Result<Self, DomainError> {
      let filename = filename.into().trim().to_string();
      let content_type = content_type.into();

      if filename.is_empty() {
         return Err(DomainError::Validation("ファイル名は必須です".to_string()));
      }
      if filename.chars().count() > Self::MAX_FILENAME_LENGTH {
         return Err(DomainError::Validation(format!(
            "ファイル名は {} 文字以内である必要があります",
            Self::MAX_FILENAME_LENGTH
         )));
      }
      if filename.len() > ObjectKeyGenerator::MAX_FILENAME_BYTES {
         return Err(DomainError::Validation(format!(
            "ファイル名は {} バイト以内である必要があります",
            ObjectKeyGenerator::MAX_FILENAME_BYTES
         )));
      }
      if filename.contains(['/', '\\']) {
         return Err(DomainError::Validation(
            "ファイル名にパス区切り文字は使用できません".to_string(),
         ));
      }

      if !Self::ALLOWED_CONTENT_TYPES.contains(&content_type.as_str()) {
         return Err(DomainError::Validation(format!(
            "非対応のファイル形式です: {content_type}"
         )));
      }

      if content_length <= 0 {
         return Err(DomainError::Validation(
            "ファイルサイズは 1 バイト以上である必要があります".to_string(),
         ));
      }
      if content_length > Self::MAX_FILE_SIZE {
         return Err(DomainError::Validation(format!(
            "ファイルサイズが上限（{} MB）を超えています",
            Self::MAX_FILE_SIZE / (1024 * 1024)
         )));
      }

      Ok(Self {
         filename,
         content_type,
         content_length,
      })
   }

   pub fn filename(&self) -> &str {
      &self.filename
   }

   pub fn content_type(&self) -> &str {
      &self.content_type
   }

   pub fn content_length(&self) -> i64 {
      self.content_length
   }
}

/// オブジェクトキーの生成
///
/// `applicants/{applicant_id}/{upload_id}/{filename}`。
/// `upload_id` により同名ファイルの再アップロードでも上書きされない。
pub struct ObjectKeyGenerator;

impl ObjectKeyGenerator {
   /// S3 のオブジェクトキーの上限（UTF-8 で 1,024 バイト）
   pub const MAX_KEY_BYTES: usize = 1024;
   /// `applicants/{uuid}/{uuid}/` の長さ
   const PREFIX_BYTES: usize = "applicants/".len() + 36 + 1 + 36 + 1;
   /// キーが上限に収まるファイル名の最大バイト長
   pub const MAX_FILENAME_BYTES: usize = Self::MAX_KEY_BYTES - Self::PREFIX_BYTES;

   pub fn generate(applicant_id: &ApplicantId, upload_id: &Uuid, filename: &str) -> String {
      format!(
         "applicants/{}/{}/{}",
         applicant_id.as_uuid(),
         upload_id,
         filename
      )
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;
   use rstest::rstest;

   use super::*;

   #[rstest]
   #[case("application/pdf")]
   #[case("image/jpeg")]
   #[case("image/png")]
   #[case("application/msword")]
   #[case("application/vnd.openxmlformats-officedocument.wordprocessingml.document")]
   fn test_対応形式は受け付ける(#[case] content_type: &str) {
      assert!(UploadRequest::new("passport.pdf", content_type, 1024).is_ok());
   }

   #[rstest]
   #[case("text/plain")]
   #[case("application/zip")]
   #[case("")]
   fn test_非対応形式はエラー(#[case] content_type: &str) {
      assert!(UploadRequest::new("file", content_type, 1024).is_err());
   }

   #[rstest]
   #[case(0)]
   #[case(-1)]
   #[case(UploadRequest::MAX_FILE_SIZE + 1)]
   fn test_サイズ範囲外はエラー(#[case] size: i64) {
      assert!(UploadRequest::new("a.pdf", "application/pdf", size).is_err());
   }

   #[test]
   fn test_上限ちょうどのサイズは受け付ける() {
      assert!(
         UploadRequest::new("a.pdf", "application/pdf", UploadRequest::MAX_FILE_SIZE).is_ok()
      );
   }

   #[rstest]
   #[case("")]
   #[case("../etc/passwd")]
   #[case("dir\\file.pdf")]
   #[case(&"a".repeat(256))]
   fn test_不正なファイル名はエラー(#[case] filename: &str) {
      assert!(UploadRequest::new(filename, "application/pdf", 1).is_err());
   }

   #[test]
   fn test_文字数内でもバイト長が上限を超えるファイル名はエラー() {
      // 4 バイト文字 255 個 = 1,020 バイト
      let filename = "📄".repeat(UploadRequest::MAX_FILENAME_LENGTH);

      let result = UploadRequest::new(filename, "application/pdf", 1);

      assert!(result.is_err());
   }

   #[test]
   fn test_上限バイト長のファイル名ならキーは1024バイトに収まる() {
      // 3 バイト文字 255 個 = 765 バイト
      let multibyte = UploadRequest::new("履".repeat(255), "application/pdf", 1).unwrap();
      let longest = "a".repeat(ObjectKeyGenerator::MAX_FILENAME_BYTES);

      let key = ObjectKeyGenerator::generate(&ApplicantId::new(), &Uuid::now_v7(), &longest);
      let multibyte_key =
         ObjectKeyGenerator::generate(&ApplicantId::new(), &Uuid::now_v7(), multibyte.filename());

      assert_eq!(key.len(), ObjectKeyGenerator::MAX_KEY_BYTES);
      assert!(multibyte_key.len() <= ObjectKeyGenerator::MAX_KEY_BYTES);
   }

   #[test]
   fn test_オブジェクトキーの形式() {
      let applicant_id = ApplicantId::new();
      let upload_id = Uuid::now_v7();

      let key = ObjectKeyGenerator::generate(&applicant_id, &upload_id, "resume.pdf");

      assert_eq!(
         key,
         format!(
            "applicants/{}/{}/resume.pdf",
            applicant_id.as_uuid(),
            upload_id
         )
      );
   }
}
