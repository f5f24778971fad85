//! # アラートユースケース
//!
//! アラートの一覧・登録・既読化・削除。
//! 求職者に紐づけるアラートは、求職者が存在しなければ 400 を返す。

use std::sync::Arc;

use applydesk_domain::{
   alert::{Alert, AlertFilter, AlertId, AlertLevel, AlertMessage, AlertTitle, NewAlert},
   applicant::ApplicantId,
   clock::Clock,
   pagination::{PageRequest, SortKey},
};
use applydesk_infra::repository::{AlertRepository, ApplicantRepository};
use applydesk_shared::PaginatedResponse;

use super::{
   helpers::{FindResultExt, WriteResultExt, found_or_not_found},
   pagination::paginate,
};
use crate::error::CoreError;

/// アラート登録の入力（未検証）
pub struct CreateAlertInput {
   pub applicant_id: Option<ApplicantId>,
   pub level:        AlertLevel,
   pub title:        String,
   pub message:      String,
}

pub struct AlertUseCaseImpl {
   alert_repository:     Arc<dyn AlertRepository>,
   applicant_repository: Arc<dyn ApplicantRepository>,
   clock:                Arc<dyn Clock>,
}

impl AlertUseCaseImpl {
   pub fn new(
      alert_repository: Arc<dyn AlertRepository>,
      applicant_repository: Arc<dyn ApplicantRepository>,
      clock: Arc<dyn Clock>,
   ) -> Self {
      Self {
         alert_repository,
         applicant_repository,
         clock,
      }
   }

   pub async fn list_alerts(
      &self,
      filter: &AlertFilter,
      request: PageRequest,
      sort: &[SortKey],
   ) -> Result<PaginatedResponse<Alert>, CoreError> {
      paginate(self.alert_repository.as_ref(), filter, request, sort).await
   }

   /// アラートを登録する
   ///
   /// # Errors
   ///
   /// - 件名・本文の検証失敗、または紐づけ先の求職者が存在しない: `BadRequest`
   #[tracing::instrument(skip_all, fields(level = %input.level))]
   pub async fn create_alert(&self, input: CreateAlertInput) -> Result<Alert, CoreError> {
      let title = AlertTitle::new(input.title)?;
      let message = AlertMessage::new(input.message)?;

      if let Some(applicant_id) = &input.applicant_id
         && self.applicant_repository.find_by_id(applicant_id).await?.is_none()
      {
         return Err(CoreError::BadRequest(missing_applicant(applicant_id)));
      }

      let alert = Alert::new(NewAlert {
         id: AlertId::new(),
         applicant_id: input.applicant_id,
         level: input.level,
         title,
         message,
         now: self.clock.now(),
      });

      // 存在確認の後に求職者が削除された場合は外部キー違反になる
      let detail = alert
         .applicant_id()
         .map(missing_applicant)
         .unwrap_or_default();
      self
         .alert_repository
         .insert(&alert)
         .await
         .or_missing_reference(&detail)?;

      tracing::info!(alert_id = %alert.id(), "アラートを登録しました");
      Ok(alert)
   }

   /// アラートを既読にする
   ///
   /// 既読済みのアラートはそのまま返す（`read_at` は最初の既読日時のまま）。
   #[tracing::instrument(skip_all, fields(%id))]
   pub async fn mark_alert_read(&self, id: &AlertId) -> Result<Alert, CoreError> {
      let alert = self
         .alert_repository
         .find_by_id(id)
         .await
         .or_not_found("アラート", id)?;
      if alert.is_read() {
         return Ok(alert);
      }

      let alert = alert.mark_read(self.clock.now());
      let found = self.alert_repository.update(&alert).await?;
      found_or_not_found(found, "アラート", id)?;

      Ok(alert)
   }

   #[tracing::instrument(skip_all, fields(%id))]
   pub async fn delete_alert(&self, id: &AlertId) -> Result<(), CoreError> {
      let found = self.alert_repository.delete(id).await?;
      found_or_not_found(found, "アラート", id)
   }
}

fn missing_applicant(applicant_id: &ApplicantId) -> String {
   format!("求職者が存在しません: {applicant_id}")
}

#[cfg(test)]
mod tests {
   use applydesk_domain::{
      applicant::{Applicant, NewApplicant},
      clock::FixedClock,
      value_objects::{Email, PersonName},
   };
   use applydesk_infra::{
      mock::{MockAlertRepository, MockApplicantRepository},
      repository::PagedRepository,
   };
   use chrono::{DateTime, Duration, Utc};
   use pretty_assertions::assert_eq;
   use rstest::{fixture, rstest};

   use super::*;

   fn now() -> DateTime<Utc> {
      DateTime::from_timestamp(1_700_000_000, 0).unwrap()
   }

   struct Sut {
      usecase:      AlertUseCaseImpl,
      alerts:       MockAlertRepository,
      clock:        Arc<FixedClock>,
      applicant_id: ApplicantId,
   }

   #[fixture]
   fn sut() -> Sut {
      let applicants = MockApplicantRepository::new();
      let applicant = Applicant::new(NewApplicant {
         id:          ApplicantId::new(),
         name:        PersonName::new("Santos Maria").unwrap(),
         email:       Email::new("santos@example.com").unwrap(),
         phone:       None,
         nationality: None,
         visa_type:   None,
         now:         now(),
      });
      let applicant_id = applicant.id().clone();
      applicants.add(applicant);

      let alerts = MockAlertRepository::new();
      let clock = Arc::new(FixedClock::new(now()));
      let usecase =
         AlertUseCaseImpl::new(Arc::new(alerts.clone()), Arc::new(applicants), clock.clone());

      Sut {
         usecase,
         alerts,
         clock,
         applicant_id,
      }
   }

   fn input(applicant_id: Option<ApplicantId>, level: AlertLevel, title: &str) -> CreateAlertInput {
      CreateAlertInput {
         applicant_id,
         level,
         title: title.to_string(),
         message: "在留カードの更新手続きを確認してください".to_string(),
      }
   }

   #[rstest]
   #[tokio::test]
   async fn test_登録したアラートは未読で一覧に出る(sut: Sut) {
      let created = sut
         .usecase
         .create_alert(input(
            Some(sut.applicant_id.clone()),
            AlertLevel::Warning,
            "在留期限 30 日前",
         ))
         .await
         .unwrap();

      let unread = AlertFilter {
         is_read: Some(false),
         ..Default::default()
      };
      let page = sut
         .usecase
         .list_alerts(&unread, PageRequest::default(), &[])
         .await
         .unwrap();

      assert_eq!(page.data, vec![created.clone()]);
      assert_eq!(created.applicant_id(), Some(&sut.applicant_id));
      assert_eq!(created.read_at(), None);
   }

   #[rstest]
   #[tokio::test]
   async fn test_存在しない求職者へのアラートはbad_request(sut: Sut) {
      let result = sut
         .usecase
         .create_alert(input(Some(ApplicantId::new()), AlertLevel::Info, "書類不備"))
         .await;

      assert!(matches!(result, Err(CoreError::BadRequest(_))));
      assert_eq!(sut.alerts.count(&AlertFilter::default()).await.unwrap(), 0);
   }

   #[rstest]
   #[tokio::test]
   async fn test_求職者に紐づかないアラートも登録できる(sut: Sut) {
      let created = sut
         .usecase
         .create_alert(input(None, AlertLevel::Critical, "メンテナンスのお知らせ"))
         .await
         .unwrap();

      assert_eq!(created.applicant_id(), None);
   }

   #[rstest]
   #[tokio::test]
   async fn test_既読化は冪等で最初の日時を保持する(sut: Sut) {
      let created = sut
         .usecase
         .create_alert(input(None, AlertLevel::Info, "お知らせ"))
         .await
         .unwrap();
      sut.clock.advance(Duration::minutes(5));
      let first = sut.usecase.mark_alert_read(created.id()).await.unwrap();
      sut.clock.advance(Duration::minutes(5));

      let second = sut.usecase.mark_alert_read(created.id()).await.unwrap();

      assert_eq!(first.read_at(), Some(now() + Duration::minutes(5)));
      assert_eq!(second, first);
   }

   #[rstest]
   #[tokio::test]
   async fn test_重要度の降順で並べられる(sut: Sut) {
      for (level, title) in [
         (AlertLevel::Warning, "warning"),
         (AlertLevel::Critical, "critical"),
         (AlertLevel::Info, "info"),
      ] {
         sut.usecase
            .create_alert(input(None, level, title))
            .await
            .unwrap();
      }

      let page = sut
         .usecase
         .list_alerts(
            &AlertFilter::default(),
            PageRequest::default(),
            &[SortKey::new("level", true)],
         )
         .await
         .unwrap();

      let titles: Vec<&str> = page.data.iter().map(|a| a.title().as_str()).collect();
      assert_eq!(titles, vec!["critical", "warning", "info"]);
   }

   #[rstest]
   #[tokio::test]
   async fn test_削除したアラートは既読化できない(sut: Sut) {
      let created = sut
         .usecase
         .create_alert(input(None, AlertLevel::Info, "お知らせ"))
         .await
         .unwrap();

      sut.usecase.delete_alert(created.id()).await.unwrap();

      assert!(matches!(
         sut.usecase.mark_alert_read(created.id()).await,
         Err(CoreError::NotFound(_))
      ));
      assert!(matches!(
         sut.usecase.delete_alert(created.id()).await,
         Err(CoreError::NotFound(_))
      ));
   }

   #[rstest]
   #[case("", "本文")]
   #[case("件名", "")]
   #[tokio::test]
   async fn test_件名と本文は必須(sut: Sut, #[case] title: &str, #[case] message: &str) {
      let result = sut
         .usecase
         .create_alert(CreateAlertInput {
            applicant_id: None,
            level:        AlertLevel::Info,
            title:        title.to_string(),
            message:      message.to_string(),
         })
         .await;

      assert!(matches!(result, Err(CoreError::BadRequest(_))));
   }
}
