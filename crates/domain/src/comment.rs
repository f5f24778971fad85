//! # 求職者コメント
//!
//! 求職者ごとのコメントスレッド。スタッフ間の申し送りに使う。
//!
//! ## 並び順
//!
//! スレッドは常に新しい順（`created_at DESC, id DESC`）で表示する。
//! コメント ID は UUID v7 で挿入順に単調増加するため、同一時刻のコメントは
//! ID で一意に順序付けられる。この全順序がカーソルページネーションの前提になる。

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::{DomainError, admin::AdminId, applicant::ApplicantId};

define_uuid_id! {
   /// コメントの一意識別子
   pub struct CommentId;
}

/// コメント本文の最大文字数
const COMMENT_BODY_MAX_LENGTH: usize = 2000;

/// コメント本文
///
/// 前後の空白を除いて 1〜2,000 文字。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentBody(String);

impl CommentBody {
   /// コメント本文を作成する
   ///
   /// # Errors
   ///
   /// - 前後の空白を除くと空になる場合
   /// - 2,000 文字を超える場合
   pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
      let value = value.into().trim().to_string();
      if value.is_empty() {
         return Err(DomainError::Validation(
            "コメント本文は必須です".to_string(),
         ));
      }
      if value.chars().count() > COMMENT_BODY_MAX_LENGTH {
         return Err(DomainError::Validation(format!(
            "コメント本文は{COMMENT_BODY_MAX_LENGTH}文字以内で入力してください"
         )));
      }
      Ok(Self(value))
   }

   pub fn as_str(&self) -> &str {
      &self.0
   }

   pub fn into_inner(self) -> String {
      self.0
   }
}

/// コメントエンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
   id:           CommentId,
   applicant_id: ApplicantId,
   author_id:    AdminId,
   body:         CommentBody,
   created_at:   DateTime<Utc>,
}

/// コメントの新規作成パラメータ
pub struct NewComment {
   pub id:           CommentId,
   pub applicant_id: ApplicantId,
   pub author_id:    AdminId,
   pub body:         CommentBody,
   pub now:          DateTime<Utc>,
}

/// コメントの DB 復元パラメータ
pub struct CommentRecord {
   pub id:           CommentId,
   pub applicant_id: ApplicantId,
   pub author_id:    AdminId,
   pub body:         CommentBody,
   pub created_at:   DateTime<Utc>,
}

impl Comment {
   pub fn new(params: NewComment) -> Self {
      Self {
         id:           params.id,
         applicant_id: params.applicant_id,
         author_id:    params.author_id,
         body:         params.body,
         created_at:   params.now,
      }
   }

   pub fn from_db(record: CommentRecord) -> Self {
      Self {
         id:           record.id,
         applicant_id: record.applicant_id,
         author_id:    record.author_id,
         body:         record.body,
         created_at:   record.created_at,
      }
   }

   pub fn id(&self) -> &CommentId {
      &self.id
   }

   pub fn applicant_id(&self) -> &ApplicantId {
      &self.applicant_id
   }

   pub fn author_id(&self) -> &AdminId {
      &self.author_id
   }

   pub fn body(&self) -> &CommentBody {
      &self.body
   }

   pub fn created_at(&self) -> DateTime<Utc> {
      self.created_at
   }

   /// スレッド上の表示順で比較する
   ///
   /// 新しいコメントほど前（`Less`）になる。
   pub fn cmp_newest_first(&self, other: &Self) -> Ordering {
      other
         .created_at
         .cmp(&self.created_at)
         .then_with(|| other.id.cmp(&self.id))
   }

   /// `other` より古い（スレッド上で後ろに並ぶ）かどうか
   pub fn is_older_than(&self, other: &Self) -> bool {
      self.cmp_newest_first(other) == Ordering::Greater
   }
}
