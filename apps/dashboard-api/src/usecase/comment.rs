//! # コメントユースケース
//!
//! 求職者ごとのコメントスレッドをカーソル方式で返し、新しいコメントを投稿する。
//!
//! ## カーソルページネーション
//!
//! スレッドは新しい順（`created_at DESC, id DESC`）に並ぶ。カーソルは直前のページで
//! 最後に返したコメントの ID で、次のページはそのコメントより古いものから始まる。
//!
//! `has_more` の判定は先頭ページとカーソル指定時で異なる:
//!
//! - カーソル指定時: ページ最後のコメントより古いコメントの件数
//! - 先頭ページ: ページに含まれなかったコメントの件数
//!
//! どちらも「ページ最後のコメントより古い未取得のコメントがあるか」を表す。

use std::sync::Arc;

use applydesk_domain::{
   applicant::ApplicantId,
   clock::Clock,
   comment::{Comment, CommentBody, CommentId, NewComment},
   pagination::CursorRequest,
};
use applydesk_infra::{
   SessionData,
   repository::{ApplicantRepository, CommentRepository},
};
use applydesk_shared::CursorPage;
use itertools::Itertools;
use uuid::Uuid;

use super::helpers::FindResultExt;
use crate::error::CoreError;

/// コメント投稿の入力
pub struct PostCommentInput {
   pub body: String,
}

/// コメントユースケース
pub struct CommentUseCaseImpl {
   applicant_repository: Arc<dyn ApplicantRepository>,
   comment_repository:   Arc<dyn CommentRepository>,
   clock:                Arc<dyn Clock>,
}

impl CommentUseCaseImpl {
   pub fn new(
      applicant_repository: Arc<dyn ApplicantRepository>,
      comment_repository: Arc<dyn CommentRepository>,
      clock: Arc<dyn Clock>,
   ) -> Self {
      Self {
         applicant_repository,
         comment_repository,
         clock,
      }
   }

   /// コメントスレッドの 1 ページを取得する
   ///
   /// # Errors
   ///
   /// - 求職者が存在しない: `NotFound`
   /// - カーソルが UUID でない、またはこの求職者のコメントでない: `BadRequest`
   #[tracing::instrument(skip_all, fields(%applicant_id, limit = request.limit()))]
   pub async fn list_comments(
      &self,
      applicant_id: &ApplicantId,
      request: &CursorRequest,
   ) -> Result<CursorPage<Comment>, CoreError> {
      self
         .applicant_repository
         .find_by_id(applicant_id)
         .await
         .or_not_found("求職者", applicant_id)?;

      let cursor = match request.cursor() {
         Some(raw) => Some(self.resolve_cursor(applicant_id, raw).await?),
         None => None,
      };

      let comments = self
         .comment_repository
         .find_page(applicant_id, cursor.as_ref(), i64::from(request.limit()))
         .await?;

      let Some(last) = comments.last() else {
         return Ok(CursorPage::empty());
      };

      let remaining = match cursor {
         Some(_) => self.comment_repository.count_older_than(last).await?,
         None => {
            let ids = comments.iter().map(|c| c.id().clone()).collect_vec();
            self
               .comment_repository
               .count_excluding(applicant_id, &ids)
               .await?
         }
      };

      Ok(CursorPage {
         next_cursor: Some(last.id().to_string()),
         has_more: remaining > 0,
         items: comments,
      })
   }

   /// コメントを投稿する
   ///
   /// 投稿者はセッションの管理者。`admins` に未登録の管理者でも投稿できる。
   #[tracing::instrument(skip_all, fields(%applicant_id, author_id = %session.admin_id()))]
   pub async fn post_comment(
      &self,
      applicant_id: &ApplicantId,
      session: &SessionData,
      input: PostCommentInput,
   ) -> Result<Comment, CoreError> {
      let body = CommentBody::new(input.body)?;

      self
         .applicant_repository
         .find_by_id(applicant_id)
         .await
         .or_not_found("求職者", applicant_id)?;

      let comment = Comment::new(NewComment {
         id: CommentId::new(),
         applicant_id: applicant_id.clone(),
         author_id: session.admin_id().clone(),
         body,
         now: self.clock.now(),
      });
      // 存在確認の後に求職者が削除された場合は外部キー違反になる
      self
         .comment_repository
         .insert(&comment)
         .await
         .map_err(|e| {
            if e.is_foreign_key_violation() {
               CoreError::NotFound(format!("求職者が見つかりません: {applicant_id}"))
            } else {
               e.into()
            }
         })?;

      tracing::info!(comment_id = %comment.id(), "コメントを投稿しました");
      Ok(comment)
   }

   /// カーソル文字列をこの求職者のコメントに解決する
   async fn resolve_cursor(
      &self,
      applicant_id: &ApplicantId,
      raw: &str,
   ) -> Result<Comment, CoreError> {
      let invalid = || CoreError::BadRequest(format!("cursor が不正です: {raw}"));

      let id = Uuid::parse_str(raw)
         .map(CommentId::from_uuid)
         .map_err(|_| invalid())?;

      self
         .comment_repository
         .find_by_id(&id)
         .await?
         .filter(|c| c.applicant_id() == applicant_id)
         .ok_or_else(invalid)
   }
}

#[cfg(test)]
mod tests {
   use applydesk_domain::{
      admin::{AdminId, AdminRole},
      applicant::{Applicant, NewApplicant},
      clock::FixedClock,
      value_objects::{Email, Nationality, PersonName},
   };
   use applydesk_infra::{
      InfraError,
      mock::{MockApplicantRepository, MockCommentRepository},
   };
   use chrono::{DateTime, Duration, Utc};
   use pretty_assertions::assert_eq;
   use rstest::{fixture, rstest};

   use super::*;

   fn base_time() -> DateTime<Utc> {
      DateTime::from_timestamp(1_700_000_000, 0).unwrap()
   }

   struct Sut {
      usecase:      CommentUseCaseImpl,
      comments:     MockCommentRepository,
      clock:        Arc<FixedClock>,
      applicant_id: ApplicantId,
   }

   impl Sut {
      /// `n` 件のコメントを 1 分間隔で登録する（i 番目が i 分後）
      fn add_comments(&self, n: i64) -> Vec<Comment> {
         (0..n)
            .map(|i| self.add_comment_at(base_time() + Duration::minutes(i)))
            .collect()
      }

      fn add_comment_at(&self, at: DateTime<Utc>) -> Comment {
         let comment = Comment::new(NewComment {
            id:           CommentId::new(),
            applicant_id: self.applicant_id.clone(),
            author_id:    AdminId::new(),
            body:         CommentBody::new("確認しました").unwrap(),
            now:          at,
         });
         self.comments.add(comment.clone());
         comment
      }

      async fn page(&self, limit: u32, cursor: Option<String>) -> CursorPage<Comment> {
         self
            .usecase
            .list_comments(&self.applicant_id, &CursorRequest::new(limit, cursor))
            .await
            .unwrap()
      }
   }

   fn new_applicant() -> Applicant {
      Applicant::new(NewApplicant {
         id:          ApplicantId::new(),
         name:        PersonName::new("Nguyen Van A").unwrap(),
         email:       Email::new("nguyen@example.com").unwrap(),
         phone:       None,
         nationality: Some(Nationality::new("VN").unwrap()),
         visa_type:   None,
         now:         base_time(),
      })
   }

   #[fixture]
   fn sut() -> Sut {
      let applicants = MockApplicantRepository::new();
      let applicant = new_applicant();
      let applicant_id = applicant.id().clone();
      applicants.add(applicant);

      let comments = MockCommentRepository::new();
      let clock = Arc::new(FixedClock::new(base_time()));
      let usecase = CommentUseCaseImpl::new(
         Arc::new(applicants),
         Arc::new(comments.clone()),
         clock.clone(),
      );

      Sut {
         usecase,
         comments,
         clock,
         applicant_id,
      }
   }

   fn session() -> SessionData {
      SessionData::new(
         AdminId::new(),
         "田中".to_string(),
         "tanaka@example.com".to_string(),
         AdminRole::Staff,
         base_time(),
      )
   }

   #[rstest]
   #[tokio::test]
   async fn test_25件を10件ずつ取得すると10_10_5件に分かれる(sut: Sut) {
      sut.add_comments(25);

      let first = sut.page(10, None).await;
      assert_eq!(first.items.len(), 10);
      assert!(first.has_more);

      let second = sut.page(10, first.next_cursor.clone()).await;
      assert_eq!(second.items.len(), 10);
      assert!(second.has_more);

      let third = sut.page(10, second.next_cursor.clone()).await;
      assert_eq!(third.items.len(), 5);
      assert!(!third.has_more);
   }

   #[rstest]
   #[tokio::test]
   async fn test_ページを連結すると重複なく新しい順の全件になる(
      sut: Sut,
      #[values(1, 3, 7, 10, 30)] limit: u32,
   ) {
      let mut expected = sut.add_comments(17);
      // 同一時刻のコメントも ID 順で取りこぼさない
      expected.push(sut.add_comment_at(base_time() + Duration::minutes(5)));
      expected.push(sut.add_comment_at(base_time() + Duration::minutes(5)));
      expected.sort_by(Comment::cmp_newest_first);

      let mut collected: Vec<Comment> = Vec::new();
      let mut cursor = None;
      loop {
         let page = sut.page(limit, cursor).await;
         collected.extend(page.items);
         if !page.has_more {
            break;
         }
         cursor = page.next_cursor;
      }

      assert!(collected.iter().map(Comment::id).all_unique());
      assert_eq!(collected, expected);
   }

   #[rstest]
   #[tokio::test]
   async fn test_next_cursorはページ最後のコメントのid(sut: Sut) {
      let comments = sut.add_comments(3);

      let page = sut.page(2, None).await;

      // 新しい順: 2, 1, 0
      assert_eq!(page.next_cursor, Some(comments[1].id().to_string()));
   }

   #[rstest]
   #[tokio::test]
   async fn test_コメントがなければ空ページ(sut: Sut) {
      let page = sut.page(10, None).await;

      assert_eq!(page, CursorPage::empty());
      assert_eq!(sut.comments.count_calls(), 0);
   }

   #[rstest]
   #[tokio::test]
   async fn test_ちょうどlimit件なら先頭ページでhas_moreはfalse(sut: Sut) {
      sut.add_comments(10);

      let page = sut.page(10, None).await;

      assert_eq!(page.items.len(), 10);
      assert!(!page.has_more);
   }

   #[rstest]
   #[tokio::test]
   async fn test_最後のコメントをカーソルにすると空ページで件数取得しない(sut: Sut) {
      let comments = sut.add_comments(3);
      let oldest = comments[0].id().to_string();

      let page = sut.page(10, Some(oldest)).await;

      assert!(page.items.is_empty());
      assert_eq!(page.next_cursor, None);
      assert!(!page.has_more);
      assert_eq!(sut.comments.count_calls(), 0);
   }

   #[rstest]
   #[tokio::test]
   async fn test_カーソルはページに含まれない(sut: Sut) {
      let comments = sut.add_comments(5);
      let cursor = comments[3].id().clone();

      let page = sut.page(10, Some(cursor.to_string())).await;

      assert!(page.items.iter().all(|c| c.id() != &cursor));
      assert_eq!(page.items.len(), 3);
   }

   #[rstest]
   #[case("not-a-uuid")]
   #[case("0190a1b2-0000-7000-8000-000000000000")]
   #[tokio::test]
   async fn test_不正なカーソルはbad_request(sut: Sut, #[case] cursor: &str) {
      sut.add_comments(3);

      let result = sut
         .usecase
         .list_comments(
            &sut.applicant_id,
            &CursorRequest::new(10, Some(cursor.to_string())),
         )
         .await;

      assert!(matches!(result, Err(CoreError::BadRequest(_))));
   }

   #[rstest]
   #[tokio::test]
   async fn test_他の求職者のコメントはカーソルに使えない(sut: Sut) {
      let other = Comment::new(NewComment {
         id:           CommentId::new(),
         applicant_id: ApplicantId::new(),
         author_id:    AdminId::new(),
         body:         CommentBody::new("別スレッド").unwrap(),
         now:          base_time(),
      });
      sut.comments.add(other.clone());

      let result = sut
         .usecase
         .list_comments(
            &sut.applicant_id,
            &CursorRequest::new(10, Some(other.id().to_string())),
         )
         .await;

      assert!(matches!(result, Err(CoreError::BadRequest(_))));
   }

   #[rstest]
   #[tokio::test]
   async fn test_存在しない求職者はnot_found(sut: Sut) {
      let result = sut
         .usecase
         .list_comments(&ApplicantId::new(), &CursorRequest::default())
         .await;

      assert!(matches!(result, Err(CoreError::NotFound(_))));
   }

   #[rstest]
   #[tokio::test]
   async fn test_投稿したコメントがスレッドに加わる(sut: Sut) {
      sut.add_comments(2);
      let session = session();

      let posted = sut
         .usecase
         .post_comment(
            &sut.applicant_id,
            &session,
            PostCommentInput {
               body: "  ビザ申請書類を受領  ".to_string(),
            },
         )
         .await
         .unwrap();

      assert_eq!(posted.body().as_str(), "ビザ申請書類を受領");
      assert_eq!(posted.author_id(), session.admin_id());

      let page = sut.page(10, None).await;
      assert_eq!(page.items.len(), 3);
      assert!(page.items.iter().any(|c| c.id() == posted.id()));
   }

   #[rstest]
   #[tokio::test]
   async fn test_後から投稿したコメントが先頭に来る(sut: Sut) {
      let session = session();
      let input = |body: &str| PostCommentInput {
         body: body.to_string(),
      };

      let first = sut
         .usecase
         .post_comment(&sut.applicant_id, &session, input("在留カードを確認"))
         .await
         .unwrap();
      sut.clock.advance(Duration::minutes(3));
      let second = sut
         .usecase
         .post_comment(&sut.applicant_id, &session, input("面接日程を調整中"))
         .await
         .unwrap();

      assert_eq!(second.created_at(), base_time() + Duration::minutes(3));
      let page = sut.page(10, None).await;
      assert_eq!(page.items, vec![second, first]);
   }

   #[rstest]
   #[case("")]
   #[case("   ")]
   #[tokio::test]
   async fn test_空の本文はbad_request(sut: Sut, #[case] body: &str) {
      let result = sut
         .usecase
         .post_comment(
            &sut.applicant_id,
            &session(),
            PostCommentInput {
               body: body.to_string(),
            },
         )
         .await;

      assert!(matches!(result, Err(CoreError::BadRequest(_))));
   }

   #[rstest]
   #[tokio::test]
   async fn test_存在しない求職者への投稿はnot_found(sut: Sut) {
      let result = sut
         .usecase
         .post_comment(
            &ApplicantId::new(),
            &session(),
            PostCommentInput {
               body: "メモ".to_string(),
            },
         )
         .await;

      assert!(matches!(result, Err(CoreError::NotFound(_))));
   }

   /// 確認後に求職者が削除され、登録時に外部キー違反となるリポジトリ
   struct ApplicantDeletedOnInsert;

   #[async_trait::async_trait]
   impl CommentRepository for ApplicantDeletedOnInsert {
      async fn insert(&self, _comment: &Comment) -> Result<(), InfraError> {
         Err(InfraError::foreign_key_violation("comments_applicant_id_fkey"))
      }

      async fn find_by_id(&self, _id: &CommentId) -> Result<Option<Comment>, InfraError> {
         Ok(None)
      }

      async fn find_page(
         &self,
         _applicant_id: &ApplicantId,
         _after: Option<&Comment>,
         _take: i64,
      ) -> Result<Vec<Comment>, InfraError> {
         Ok(Vec::new())
      }

      async fn count_older_than(&self, _comment: &Comment) -> Result<i64, InfraError> {
         Ok(0)
      }

      async fn count_excluding(
         &self,
         _applicant_id: &ApplicantId,
         _ids: &[CommentId],
      ) -> Result<i64, InfraError> {
         Ok(0)
      }
   }

   #[tokio::test]
   async fn test_投稿中に求職者が削除されるとnot_found() {
      let applicants = MockApplicantRepository::new();
      let applicant = new_applicant();
      let applicant_id = applicant.id().clone();
      applicants.add(applicant);
      let usecase = CommentUseCaseImpl::new(
         Arc::new(applicants),
         Arc::new(ApplicantDeletedOnInsert),
         Arc::new(FixedClock::new(base_time())),
      );

      let result = usecase
         .post_comment(
            &applicant_id,
            &session(),
            PostCommentInput {
               body: "メモ".to_string(),
            },
         )
         .await;

      assert!(matches!(result, Err(CoreError::NotFound(_))));
   }
}
