//! # 求職者ユースケース

use std::sync::Arc;

use applydesk_domain::{
   DomainError,
   applicant::{
      Applicant,
      ApplicantFilter,
      ApplicantId,
      ApplicantStatus,
      ApplicantUpdate,
      NewApplicant,
      VisaType,
   },
   clock::Clock,
   pagination::{PageRequest, SortKey},
   value_objects::{Email, Nationality, PersonName, PhoneNumber},
};
use applydesk_infra::repository::ApplicantRepository;
use applydesk_shared::PaginatedResponse;

use super::{
   helpers::{FindResultExt, found_or_not_found},
   pagination::paginate,
};
use crate::error::CoreError;

/// 求職者登録の入力（未検証）
pub struct CreateApplicantInput {
   pub name:        String,
   pub email:       String,
   pub phone:       Option<String>,
   pub nationality: Option<String>,
   pub visa_type:   Option<String>,
}

/// 求職者更新の入力（未検証）
///
/// 全項目の置き換え。任意項目を省略するとクリアされる。
pub struct UpdateApplicantInput {
   pub name:        String,
   pub email:       String,
   pub phone:       Option<String>,
   pub nationality: Option<String>,
   pub visa_type:   Option<String>,
   pub status:      ApplicantStatus,
}

/// 求職者ユースケース
pub struct ApplicantUseCaseImpl {
   repository: Arc<dyn ApplicantRepository>,
   clock:      Arc<dyn Clock>,
}

impl ApplicantUseCaseImpl {
   pub fn new(repository: Arc<dyn ApplicantRepository>, clock: Arc<dyn Clock>) -> Self {
      Self { repository, clock }
   }

   pub async fn list_applicants(
      &self,
      filter: &ApplicantFilter,
      request: PageRequest,
      sort: &[SortKey],
   ) -> Result<PaginatedResponse<Applicant>, CoreError> {
      paginate(self.repository.as_ref(), filter, request, sort).await
   }

   pub async fn get_applicant(&self, id: &ApplicantId) -> Result<Applicant, CoreError> {
      self.repository.find_by_id(id).await.or_not_found("求職者", id)
   }

   /// 求職者を登録する
   ///
   /// 登録直後のステータスは `new`。空白だけの任意項目は未入力として扱う。
   #[tracing::instrument(skip_all)]
   pub async fn create_applicant(
      &self,
      input: CreateApplicantInput,
   ) -> Result<Applicant, CoreError> {
      let applicant = Applicant::new(NewApplicant {
         id:          ApplicantId::new(),
         name:        PersonName::new(input.name)?,
         email:       Email::new(input.email)?,
         phone:       optional(input.phone, PhoneNumber::new)?,
         nationality: optional(input.nationality, Nationality::new)?,
         visa_type:   optional(input.visa_type, VisaType::new)?,
         now:         self.clock.now(),
      });

      self.repository.insert(&applicant).await?;

      tracing::info!(applicant_id = %applicant.id(), "求職者を登録しました");
      Ok(applicant)
   }

   /// 求職者を更新する
   ///
   /// 入力の検証を存在確認より先に行う。
   #[tracing::instrument(skip_all, fields(%id))]
   pub async fn update_applicant(
      &self,
      id: &ApplicantId,
      input: UpdateApplicantInput,
   ) -> Result<Applicant, CoreError> {
      let update = ApplicantUpdate {
         name:        PersonName::new(input.name)?,
         email:       Email::new(input.email)?,
         phone:       optional(input.phone, PhoneNumber::new)?,
         nationality: optional(input.nationality, Nationality::new)?,
         visa_type:   optional(input.visa_type, VisaType::new)?,
         status:      input.status,
      };

      let current = self
         .repository
         .find_by_id(id)
         .await
         .or_not_found("求職者", id)?;
      let updated = current.update(update, self.clock.now());

      let found = self.repository.update(&updated).await?;
      found_or_not_found(found, "求職者", id)?;

      tracing::info!(status = %updated.status(), "求職者を更新しました");
      Ok(updated)
   }

   /// 求職者を削除する
   ///
   /// コメントとアラートも合わせて削除される。
   #[tracing::instrument(skip_all, fields(%id))]
   pub async fn delete_applicant(&self, id: &ApplicantId) -> Result<(), CoreError> {
      let found = self.repository.delete(id).await?;
      found_or_not_found(found, "求職者", id)?;

      tracing::info!("求職者を削除しました");
      Ok(())
   }
}

/// 空白だけの任意項目は未入力として扱い、それ以外は値オブジェクトに変換する
fn optional<T>(
   value: Option<String>,
   new: impl FnOnce(String) -> Result<T, DomainError>,
) -> Result<Option<T>, DomainError> {
   value
      .map(|v| v.trim().to_string())
      .filter(|v| !v.is_empty())
      .map(new)
      .transpose()
}
