//! # CommentRepository
//!
//! 求職者コメントの永続化を担当するリポジトリ。
//!
//! ## 並び順
//!
//! スレッドは `created_at DESC, id DESC` で返す。カーソル以降の取得は行値比較
//! `(created_at, id) < ($1, $2)` で行い、同一時刻のコメントも取りこぼさない。
//! インデックス `(applicant_id, created_at DESC, id DESC)` を前提とする。

use applydesk_domain::{
   admin::AdminId,
   applicant::ApplicantId,
   comment::{Comment, CommentBody, CommentId, CommentRecord},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::InfraError;

/// コメントリポジトリトレイト
#[async_trait]
pub trait CommentRepository: Send + Sync {
   async fn insert(&self, comment: &Comment) -> Result<(), InfraError>;

   async fn find_by_id(&self, id: &CommentId) -> Result<Option<Comment>, InfraError>;

   /// 求職者のコメントを新しい順に最大 `take` 件取得する
   ///
   /// `after` を指定した場合は、そのコメントより古いものだけを返す（`after` 自身は含まない）。
   async fn find_page(
      &self,
      applicant_id: &ApplicantId,
      after: Option<&Comment>,
      take: i64,
   ) -> Result<Vec<Comment>, InfraError>;

   /// `comment` と同じ求職者のコメントのうち、`comment` より古いものの件数
   async fn count_older_than(&self, comment: &Comment) -> Result<i64, InfraError>;

   /// 求職者のコメントのうち、`ids` に含まれないものの件数
   async fn count_excluding(
      &self,
      applicant_id: &ApplicantId,
      ids: &[CommentId],
   ) -> Result<i64, InfraError>;
}

/// DB の comments テーブルの行を表す中間構造体
#[derive(sqlx::FromRow)]
struct CommentRow {
   id:           Uuid,
   applicant_id: Uuid,
   author_id:    Uuid,
   body:         String,
   created_at:   DateTime<Utc>,
}

impl TryFrom<CommentRow> for Comment {
   type Error = InfraError;

   fn try_from(row: CommentRow) -> Result<Self, Self::Error> {
      Ok(Comment::from_db(CommentRecord {
         id:           CommentId::from_uuid(row.id),
         applicant_id: ApplicantId::from_uuid(row.applicant_id),
         author_id:    AdminId::from_uuid(row.author_id),
         body:         CommentBody::new(row.body)
            .map_err(|e| InfraError::unexpected(e.to_string()))?,
         created_at:   row.created_at,
      }))
   }
}

/// PostgreSQL 実装の CommentRepository
#[derive(Debug, Clone)]
pub struct PostgresCommentRepository {
   pool: PgPool,
}

impl PostgresCommentRepository {
   pub fn new(pool: PgPool) -> Self {
      Self { pool }
   }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
   #[tracing::instrument(skip_all, level = "debug", fields(id = %comment.id()))]
   async fn insert(&self, comment: &Comment) -> Result<(), InfraError> {
      sqlx::query(
         r#"
            INSERT INTO comments (id, applicant_id, author_id, body, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
      )
      .bind(comment.id().as_uuid())
      .bind(comment.applicant_id().as_uuid())
      .bind(comment.author_id().as_uuid())
      .bind(comment.body().as_str())
      .bind(comment.created_at())
      .execute(&self.pool)
      .await?;

      Ok(())
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%id))]
   async fn find_by_id(&self, id: &CommentId) -> Result<Option<Comment>, InfraError> {
      let row: Option<CommentRow> = sqlx::query_as(
         r#"
            SELECT id, applicant_id, author_id, body, created_at
            FROM comments
            WHERE id = $1
            "#,
      )
      .bind(id.as_uuid())
      .fetch_optional(&self.pool)
      .await?;

      row.map(Comment::try_from).transpose()
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%applicant_id, take))]
   async fn find_page(
      &self,
      applicant_id: &ApplicantId,
      after: Option<&Comment>,
      take: i64,
   ) -> Result<Vec<Comment>, InfraError> {
      let rows: Vec<CommentRow> = match after {
         Some(cursor) => {
            sqlx::query_as(
               r#"
                  SELECT id, applicant_id, author_id, body, created_at
                  FROM comments
                  WHERE applicant_id = $1 AND (created_at, id) < ($2, $3)
                  ORDER BY created_at DESC, id DESC
                  LIMIT $4
                  "#,
            )
            .bind(applicant_id.as_uuid())
            .bind(cursor.created_at())
            .bind(cursor.id().as_uuid())
            .bind(take)
            .fetch_all(&self.pool)
            .await?
         }
         None => {
            sqlx::query_as(
               r#"
                  SELECT id, applicant_id, author_id, body, created_at
                  FROM comments
                  WHERE applicant_id = $1
                  ORDER BY created_at DESC, id DESC
                  LIMIT $2
                  "#,
            )
            .bind(applicant_id.as_uuid())
            .bind(take)
            .fetch_all(&self.pool)
            .await?
         }
      };

      rows.into_iter().map(Comment::try_from).collect()
   }

   #[tracing::instrument(skip_all, level = "debug", fields(id = %comment.id()))]
   async fn count_older_than(&self, comment: &Comment) -> Result<i64, InfraError> {
      let (count,): (i64,) = sqlx::query_as(
         r#"
            SELECT COUNT(*)
            FROM comments
            WHERE applicant_id = $1 AND (created_at, id) < ($2, $3)
            "#,
      )
      .bind(comment.applicant_id().as_uuid())
      .bind(comment.created_at())
      .bind(comment.id().as_uuid())
      .fetch_one(&self.pool)
      .await?;

      Ok(count)
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%applicant_id, excluded = ids.len()))]
   async fn count_excluding(
      &self,
      applicant_id: &ApplicantId,
      ids: &[CommentId],
   ) -> Result<i64, InfraError> {
      let ids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();

      let (count,): (i64,) = sqlx::query_as(
         r#"
            SELECT COUNT(*)
            FROM comments
            WHERE applicant_id = $1 AND NOT (id = ANY($2))
            "#,
      )
      .bind(applicant_id.as_uuid())
      .bind(&ids)
      .fetch_one(&self.pool)
      .await?;

      Ok(count)
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_トレイトはsendとsyncを実装している() {
      fn assert_send_sync<T: Send + Sync + ?Sized>() {}
      assert_send_sync::<dyn CommentRepository>();
   }
}
