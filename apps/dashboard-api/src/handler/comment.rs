//! # コメントハンドラ
//!
//! - `GET /api/v1/applicants/{applicant_id}/comments?limit=&cursor=` - コメントスレッド
//! - `POST /api/v1/applicants/{applicant_id}/comments` - コメント投稿
//!
//! スレッドは新しい順で、次のページは `nextCursor` を `cursor` に渡して取得する。

use std::sync::Arc;

use applydesk_domain::comment::Comment;
use applydesk_infra::SessionData;
use applydesk_shared::ApiResponse;
use axum::{
   Extension,
   Json,
   extract::{Path, Query, State},
   http::StatusCode,
   response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{applicant::parse_applicant_id, list_query::parse_cursor_request};
use crate::{
   error::CoreError,
   usecase::{CommentUseCaseImpl, PostCommentInput},
};

/// コメント API の共有状態
pub struct CommentState {
   pub usecase: CommentUseCaseImpl,
}

/// コメント投稿リクエスト
#[derive(Debug, Deserialize)]
pub struct PostCommentRequest {
   pub body: String,
}

/// コメント DTO
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
   pub id:           Uuid,
   pub applicant_id: Uuid,
   pub author_id:    Uuid,
   pub body:         String,
   pub created_at:   DateTime<Utc>,
}

impl From<Comment> for CommentDto {
   fn from(comment: Comment) -> Self {
      Self {
         id:           *comment.id().as_uuid(),
         applicant_id: *comment.applicant_id().as_uuid(),
         author_id:    *comment.author_id().as_uuid(),
         body:         comment.body().as_str().to_string(),
         created_at:   comment.created_at(),
      }
   }
}

/// コメントスレッドの 1 ページ
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPageDto {
   pub comments:    Vec<CommentDto>,
   pub next_cursor: Option<String>,
   pub has_more:    bool,
}

/// GET /api/v1/applicants/{applicant_id}/comments
///
/// ## レスポンス
///
/// - `200 OK`: コメントスレッドの 1 ページ
/// - `400 Bad Request`: ID・カーソルの形式不正、または他の求職者のコメントをカーソルに指定
/// - `404 Not Found`: 求職者が存在しない
#[tracing::instrument(skip_all, fields(%applicant_id))]
pub async fn list_comments(
   State(state): State<Arc<CommentState>>,
   Path(applicant_id): Path<String>,
   Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<ApiResponse<CommentPageDto>>, CoreError> {
   let applicant_id = parse_applicant_id(&applicant_id)?;
   let request = parse_cursor_request(&params);

   let page = state
      .usecase
      .list_comments(&applicant_id, &request)
      .await?
      .map(CommentDto::from);

   Ok(Json(ApiResponse::new(CommentPageDto {
      comments:    page.items,
      next_cursor: page.next_cursor,
      has_more:    page.has_more,
   })))
}

/// POST /api/v1/applicants/{applicant_id}/comments
///
/// 投稿者はセッションの管理者。
#[tracing::instrument(skip_all, fields(%applicant_id))]
pub async fn post_comment(
   State(state): State<Arc<CommentState>>,
   Extension(session): Extension<SessionData>,
   Path(applicant_id): Path<String>,
   Json(req): Json<PostCommentRequest>,
) -> Result<impl IntoResponse, CoreError> {
   let applicant_id = parse_applicant_id(&applicant_id)?;

   let comment = state
      .usecase
      .post_comment(&applicant_id, &session, PostCommentInput { body: req.body })
      .await?;

   Ok((
      StatusCode::CREATED,
      Json(ApiResponse::new(CommentDto::from(comment))),
   ))
}
