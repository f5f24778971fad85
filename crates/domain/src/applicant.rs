//! # 求職者
//!
//! エージェンシーが紹介・ビザ手続きを支援する求職者。
//!
//! ## ステータス
//!
//! `new` → `screening` → `visa_processing` → `placed`、任意の時点で `withdrawn`。
//! 状態遷移は管理画面の運用に委ねており、このモジュールでは値の検証のみを行う。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::{
   DomainError,
   pagination::{SortField, SortOrder},
   value_objects::{Email, Nationality, PersonName, PhoneNumber},
};

define_uuid_id! {
   /// 求職者の一意識別子
   pub struct ApplicantId;
}

define_validated_string! {
   /// ビザ種別（例: `specified_skilled_worker`）
   pub struct VisaType {
      label: "ビザ種別",
      max_length: 50,
   }
}

/// 求職者のステータス
#[derive(
   Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ApplicantStatus {
   /// 登録直後
   New,
   /// 書類選考・面談中
   Screening,
   /// ビザ申請中
   VisaProcessing,
   /// 就業開始
   Placed,
   /// 辞退
   Withdrawn,
}

impl std::str::FromStr for ApplicantStatus {
   type Err = DomainError;

   fn from_str(s: &str) -> Result<Self, Self::Err> {
      match s {
         "new" => Ok(Self::New),
         "screening" => Ok(Self::Screening),
         "visa_processing" => Ok(Self::VisaProcessing),
         "placed" => Ok(Self::Placed),
         "withdrawn" => Ok(Self::Withdrawn),
         _ => Err(DomainError::Validation(format!(
            "不正な求職者ステータス: {s}"
         ))),
      }
   }
}

/// 求職者エンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applicant {
   id:          ApplicantId,
   name:        PersonName,
   email:       Email,
   phone:       Option<PhoneNumber>,
   nationality: Option<Nationality>,
   visa_type:   Option<VisaType>,
   status:      ApplicantStatus,
   created_at:  DateTime<Utc>,
   updated_at:  DateTime<Utc>,
}

/// 求職者の新規作成パラメータ
pub struct NewApplicant {
   pub id:          ApplicantId,
   pub name:        PersonName,
   pub email:       Email,
   pub phone:       Option<PhoneNumber>,
   pub nationality: Option<Nationality>,
   pub visa_type:   Option<VisaType>,
   pub now:         DateTime<Utc>,
}

/// 求職者の更新パラメータ
///
/// PUT による全置換。`None` の任意項目はクリアされる。
pub struct ApplicantUpdate {
   pub name:        PersonName,
   pub email:       Email,
   pub phone:       Option<PhoneNumber>,
   pub nationality: Option<Nationality>,
   pub visa_type:   Option<VisaType>,
   pub status:      ApplicantStatus,
}

/// 求職者の DB 復元パラメータ
pub struct ApplicantRecord {
   pub id:          ApplicantId,
   pub name:        PersonName,
   pub email:       Email,
   pub phone:       Option<PhoneNumber>,
   pub nationality: Option<Nationality>,
   pub visa_type:   Option<VisaType>,
   pub status:      ApplicantStatus,
   pub created_at:  DateTime<Utc>,
   pub updated_at:  DateTime<Utc>,
}

impl Applicant {
   /// 新しい求職者を作成する
   ///
   /// 作成時のステータスは常に `New`。
   pub fn new(params: NewApplicant) -> Self {
      Self {
         id:          params.id,
         name:        params.name,
         email:       params.email,
         phone:       params.phone,
         nationality: params.nationality,
         visa_type:   params.visa_type,
         status:      ApplicantStatus::New,
         created_at:  params.now,
         updated_at:  params.now,
      }
   }

   /// 既存のデータから復元する
   pub fn from_db(record: ApplicantRecord) -> Self {
      Self {
         id:          record.id,
         name:        record.name,
         email:       record.email,
         phone:       record.phone,
         nationality: record.nationality,
         visa_type:   record.visa_type,
         status:      record.status,
         created_at:  record.created_at,
         updated_at:  record.updated_at,
      }
   }

   /// 内容を置き換えた新しいインスタンスを返す
   ///
   /// `id` と `created_at` は保持し、`updated_at` のみ進める。
   pub fn update(self, update: ApplicantUpdate, now: DateTime<Utc>) -> Self {
      Self {
         name: update.name,
         email: update.email,
         phone: update.phone,
         nationality: update.nationality,
         visa_type: update.visa_type,
         status: update.status,
         updated_at: now,
         ..self
      }
   }

   pub fn id(&self) -> &ApplicantId {
      &self.id
   }

   pub fn name(&self) -> &PersonName {
      &self.name
   }

   pub fn email(&self) -> &Email {
      &self.email
   }

   pub fn phone(&self) -> Option<&str> {
      self.phone.as_ref().map(PhoneNumber::as_str)
   }

   pub fn nationality(&self) -> Option<&str> {
      self.nationality.as_ref().map(Nationality::as_str)
   }

   pub fn visa_type(&self) -> Option<&VisaType> {
      self.visa_type.as_ref()
   }

   pub fn status(&self) -> ApplicantStatus {
      self.status
   }

   pub fn created_at(&self) -> DateTime<Utc> {
      self.created_at
   }

   pub fn updated_at(&self) -> DateTime<Utc> {
      self.updated_at
   }
}

/// 求職者一覧のソート可能フィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString)]
#[strum(serialize_all = "camelCase")]
pub enum ApplicantSortField {
   Name,
   Status,
   CreatedAt,
   UpdatedAt,
}

impl SortField for ApplicantSortField {
   fn column(self) -> &'static str {
      match self {
         Self::Name => "name",
         Self::Status => "status",
         Self::CreatedAt => "created_at",
         Self::UpdatedAt => "updated_at",
      }
   }

   fn default_order() -> Vec<SortOrder<Self>> {
      vec![SortOrder::desc(Self::CreatedAt)]
   }
}

/// 求職者一覧の絞り込み条件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicantFilter {
   /// 氏名・メールアドレスの部分一致
   pub search:    Option<String>,
   pub status:    Option<ApplicantStatus>,
   pub visa_type: Option<String>,
}
