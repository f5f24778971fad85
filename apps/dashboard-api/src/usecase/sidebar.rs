//! # サイドバーユースケース

use std::sync::Arc;

use applydesk_domain::{
   clock::Clock,
   pagination::{PageRequest, SortKey},
   sidebar::{Sidebar, SidebarDraft, SidebarFilter, SidebarId, SidebarLabel, SidebarPath},
};
use applydesk_infra::repository::SidebarRepository;
use applydesk_shared::PaginatedResponse;

use super::{
   helpers::{FindResultExt, found_or_not_found},
   pagination::paginate,
};
use crate::error::CoreError;

/// サイドバー項目の登録・更新の入力（未検証）
pub struct SidebarInput {
   pub label:    String,
   pub path:     String,
   pub position: i32,
}

impl SidebarInput {
   fn validate(self) -> Result<SidebarDraft, CoreError> {
      Ok(SidebarDraft {
         label:    SidebarLabel::new(self.label)?,
         path:     SidebarPath::new(self.path)?,
         position: self.position,
      })
   }
}

pub struct SidebarUseCaseImpl {
   repository: Arc<dyn SidebarRepository>,
   clock:      Arc<dyn Clock>,
}

impl SidebarUseCaseImpl {
   pub fn new(repository: Arc<dyn SidebarRepository>, clock: Arc<dyn Clock>) -> Self {
      Self { repository, clock }
   }

   pub async fn list_sidebars(
      &self,
      filter: &SidebarFilter,
      request: PageRequest,
      sort: &[SortKey],
   ) -> Result<PaginatedResponse<Sidebar>, CoreError> {
      paginate(self.repository.as_ref(), filter, request, sort).await
   }

   #[tracing::instrument(skip_all)]
   pub async fn create_sidebar(&self, input: SidebarInput) -> Result<Sidebar, CoreError> {
      let sidebar = Sidebar::new(SidebarId::new(), input.validate()?, self.clock.now());

      self.repository.insert(&sidebar).await?;

      tracing::info!(sidebar_id = %sidebar.id, path = %sidebar.path, "サイドバー項目を登録しました");
      Ok(sidebar)
   }

   #[tracing::instrument(skip_all, fields(%id))]
   pub async fn update_sidebar(
      &self,
      id: &SidebarId,
      input: SidebarInput,
   ) -> Result<Sidebar, CoreError> {
      let draft = input.validate()?;
      let updated = self
         .repository
         .find_by_id(id)
         .await
         .or_not_found("サイドバー項目", id)?
         .apply(draft, self.clock.now());

      let found = self.repository.update(&updated).await?;
      found_or_not_found(found, "サイドバー項目", id)?;

      Ok(updated)
   }

   #[tracing::instrument(skip_all, fields(%id))]
   pub async fn delete_sidebar(&self, id: &SidebarId) -> Result<(), CoreError> {
      let found = self.repository.delete(id).await?;
      found_or_not_found(found, "サイドバー項目", id)
   }
}

#[cfg(test)]
mod tests {
   use applydesk_domain::clock::FixedClock;
   use applydesk_infra::mock::MockSidebarRepository;
   use chrono::{DateTime, Duration, Utc};
   use pretty_assertions::assert_eq;
   use rstest::rstest;

   use super::*;

   fn now() -> DateTime<Utc> {
      DateTime::from_timestamp(1_700_000_000, 0).unwrap()
   }

   fn input(label: &str, path: &str, position: i32) -> SidebarInput {
      SidebarInput {
         label: label.to_string(),
         path: path.to_string(),
         position,
      }
   }

   #[tokio::test]
   async fn test_登録した項目は位置の順に並ぶ() {
      let sut = SidebarUseCaseImpl::new(
         Arc::new(MockSidebarRepository::new()),
         Arc::new(FixedClock::new(now())),
      );
      sut.create_sidebar(input("コード", "/codes", 3))
         .await
         .unwrap();
      sut.create_sidebar(input("求職者", "/applicants", 1))
         .await
         .unwrap();

      let page = sut
         .list_sidebars(&SidebarFilter::default(), PageRequest::default(), &[])
         .await
         .unwrap();

      let paths: Vec<&str> = page.data.iter().map(|s| s.path.as_str()).collect();
      assert_eq!(paths, vec!["/applicants", "/codes"]);
   }

   #[tokio::test]
   async fn test_更新すると位置と更新日時が変わる() {
      let repo = MockSidebarRepository::new();
      let clock = Arc::new(FixedClock::new(now()));
      let sut = SidebarUseCaseImpl::new(Arc::new(repo.clone()), clock.clone());
      let created = sut
         .create_sidebar(input("アラート", "/alerts", 5))
         .await
         .unwrap();
      clock.advance(Duration::minutes(10));

      let updated = sut
         .update_sidebar(&created.id, input("アラート一覧", "/alerts", 2))
         .await
         .unwrap();

      assert_eq!(updated.label, "アラート一覧");
      assert_eq!(updated.position, 2);
      assert_eq!(updated.created_at, now());
      assert_eq!(updated.updated_at, now() + Duration::minutes(10));
      assert_eq!(repo.find_by_id(&created.id).await.unwrap(), Some(updated));
   }

   #[rstest]
   #[case(input("", "/applicants", 1))]
   #[case(input("求職者", "applicants", 1))]
   #[case(input("求職者", &format!("/{}", "a".repeat(255)), 1))]
   #[tokio::test]
   async fn test_不正な入力はbad_request(#[case] input: SidebarInput) {
      let sut = SidebarUseCaseImpl::new(
         Arc::new(MockSidebarRepository::new()),
         Arc::new(FixedClock::new(now())),
      );

      let result = sut.create_sidebar(input).await;

      assert!(matches!(result, Err(CoreError::BadRequest(_))));
   }

   #[tokio::test]
   async fn test_存在しない項目の更新と削除はnot_found() {
      let sut = SidebarUseCaseImpl::new(
         Arc::new(MockSidebarRepository::new()),
         Arc::new(FixedClock::new(now())),
      );
      let id = SidebarId::new();

      assert!(matches!(
         sut.update_sidebar(&id, input("求職者", "/applicants", 1)).await,
         Err(CoreError::NotFound(_))
      ));
      assert!(matches!(
         sut.delete_sidebar(&id).await,
         Err(CoreError::NotFound(_))
      ));
   }
}
