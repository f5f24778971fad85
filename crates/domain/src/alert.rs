//! # アラート
//!
//! 在留期限の接近や書類不備など、スタッフが対応すべき事項の通知。
//! 求職者に紐づくもの（`applicant_id` あり）と全体向けのものがある。
//!
//! 既読化は冪等で、最初に既読にした日時を保持する。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::{
   DomainError,
   applicant::ApplicantId,
   pagination::{SortField, SortOrder},
};

define_uuid_id! {
   /// アラートの一意識別子
   pub struct AlertId;
}

define_validated_string! {
   /// アラートの件名
   pub struct AlertTitle {
      label: "件名",
      max_length: 200,
   }
}

define_validated_string! {
   /// アラートの本文
   pub struct AlertMessage {
      label: "本文",
      max_length: 2000,
   }
}

/// アラートの重要度
///
/// 宣言順が重要度の昇順。
#[derive(
   Debug,
   Clone,
   Copy,
   PartialEq,
   Eq,
   PartialOrd,
   Ord,
   Serialize,
   Deserialize,
   IntoStaticStr,
   strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AlertLevel {
   Info,
   Warning,
   Critical,
}

impl std::str::FromStr for AlertLevel {
   type Err = DomainError;

   fn from_str(s: &str) -> Result<Self, Self::Err> {
      match s {
         "info" => Ok(Self::Info),
         "warning" => Ok(Self::Warning),
         "critical" => Ok(Self::Critical),
         _ => Err(DomainError::Validation(format!(
            "不正なアラート重要度: {s}"
         ))),
      }
   }
}

/// アラートエンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
   id:           AlertId,
   applicant_id: Option<ApplicantId>,
   level:        AlertLevel,
   title:        AlertTitle,
   message:      AlertMessage,
   read_at:      Option<DateTime<Utc>>,
   created_at:   DateTime<Utc>,
   updated_at:   DateTime<Utc>,
}

/// アラートの新規作成パラメータ
pub struct NewAlert {
   pub id:           AlertId,
   pub applicant_id: Option<ApplicantId>,
   pub level:        AlertLevel,
   pub title:        AlertTitle,
   pub message:      AlertMessage,
   pub now:          DateTime<Utc>,
}

/// アラートの DB 復元パラメータ
pub struct AlertRecord {
   pub id:           AlertId,
   pub applicant_id: Option<ApplicantId>,
   pub level:        AlertLevel,
   pub title:        AlertTitle,
   pub message:      AlertMessage,
   pub read_at:      Option<DateTime<Utc>>,
   pub created_at:   DateTime<Utc>,
   pub updated_at:   DateTime<Utc>,
}

impl Alert {
   /// 未読のアラートを作成する
   pub fn new(params: NewAlert) -> Self {
      Self {
         id:           params.id,
         applicant_id: params.applicant_id,
         level:        params.level,
         title:        params.title,
         message:      params.message,
         read_at:      None,
         created_at:   params.now,
         updated_at:   params.now,
      }
   }

   pub fn from_db(record: AlertRecord) -> Self {
      Self {
         id:           record.id,
         applicant_id: record.applicant_id,
         level:        record.level,
         title:        record.title,
         message:      record.message,
         read_at:      record.read_at,
         created_at:   record.created_at,
         updated_at:   record.updated_at,
      }
   }

   /// 既読にする
   ///
   /// 既読済みの場合はそのまま返す。
   pub fn mark_read(self, now: DateTime<Utc>) -> Self {
      if self.read_at.is_some() {
         return self;
      }
      Self {
         read_at: Some(now),
         updated_at: now,
         ..self
      }
   }

   pub fn id(&self) -> &AlertId {
      &self.id
   }

   pub fn applicant_id(&self) -> Option<&ApplicantId> {
      self.applicant_id.as_ref()
   }

   pub fn level(&self) -> AlertLevel {
      self.level
   }

   pub fn title(&self) -> &AlertTitle {
      &self.title
   }

   pub fn message(&self) -> &AlertMessage {
      &self.message
   }

   pub fn read_at(&self) -> Option<DateTime<Utc>> {
      self.read_at
   }

   pub fn is_read(&self) -> bool {
      self.read_at.is_some()
   }

   pub fn created_at(&self) -> DateTime<Utc> {
      self.created_at
   }

   pub fn updated_at(&self) -> DateTime<Utc> {
      self.updated_at
   }
}

/// アラート一覧のソート可能フィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString)]
#[strum(serialize_all = "camelCase")]
pub enum AlertSortField {
   Title,
   Level,
   CreatedAt,
}

impl SortField for AlertSortField {
   fn column(self) -> &'static str {
      match self {
         Self::Title => "title",
         // 文字列順ではなく重要度順に並べる
         Self::Level => "CASE level WHEN 'info' THEN 0 WHEN 'warning' THEN 1 ELSE 2 END",
         Self::CreatedAt => "created_at",
      }
   }

   fn default_order() -> Vec<SortOrder<Self>> {
      vec![SortOrder::desc(Self::CreatedAt)]
   }
}

/// アラート一覧の絞り込み条件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertFilter {
   /// 件名・本文の部分一致
   pub search:       Option<String>,
   pub level:        Option<AlertLevel>,
   pub is_read:      Option<bool>,
   pub applicant_id: Option<ApplicantId>,
}
