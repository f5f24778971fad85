//! # コードハンドラ
//!
//! - `GET /api/v1/codes` - コード一覧（`search`, `groupCodeId` で絞り込み）
//! - `POST /api/v1/codes` - コード登録
//! - `PUT /api/v1/codes/{code_id}` - コード更新
//! - `DELETE /api/v1/codes/{code_id}` - コード削除
//!
//! 既定の並び順は表示順（`sortOrder` 昇順）。

use std::sync::Arc;

use applydesk_domain::code::{Code, CodeFilter, CodeId, GroupCodeId};
use applydesk_shared::{ApiResponse, PaginatedResponse};
use axum::{
   Json,
   extract::{Path, Query, State},
   http::StatusCode,
   response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{list_query::ListQuery, path_id::parse_path_id};
use crate::{
   error::CoreError,
   usecase::{CodeInput, CodeUseCaseImpl},
};

pub struct CodeState {
   pub usecase: Arc<CodeUseCaseImpl>,
}

/// コード登録・更新リクエスト
///
/// `sortOrder` を省略した場合は 0。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeRequest {
   pub group_code_id: Uuid,
   pub code:          String,
   pub label:         String,
   #[serde(default)]
   pub sort_order:    i32,
}

impl From<CodeRequest> for CodeInput {
   fn from(req: CodeRequest) -> Self {
      Self {
         group_code_id: GroupCodeId::from_uuid(req.group_code_id),
         code:          req.code,
         label:         req.label,
         sort_order:    req.sort_order,
      }
   }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeDto {
   pub id:            Uuid,
   pub group_code_id: Uuid,
   pub code:          String,
   pub label:         String,
   pub sort_order:    i32,
   pub created_at:    DateTime<Utc>,
   pub updated_at:    DateTime<Utc>,
}

impl From<Code> for CodeDto {
   fn from(code: Code) -> Self {
      Self {
         id:            *code.id.as_uuid(),
         group_code_id: *code.group_code_id.as_uuid(),
         code:          code.code,
         label:         code.label,
         sort_order:    code.sort_order,
         created_at:    code.created_at,
         updated_at:    code.updated_at,
      }
   }
}

fn parse_code_id(raw: &str) -> Result<CodeId, CoreError> {
   parse_path_id(raw, "コード", CodeId::from_uuid)
}

/// GET /api/v1/codes
#[tracing::instrument(skip_all)]
pub async fn list_codes(
   State(state): State<Arc<CodeState>>,
   Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<ApiResponse<PaginatedResponse<CodeDto>>>, CoreError> {
   let query = ListQuery::parse(params);
   let filter = CodeFilter {
      search:        query.search(),
      group_code_id: query
         .parse_filter::<Uuid>("groupCodeId")
         .map(GroupCodeId::from_uuid),
   };

   let page = state
      .usecase
      .list_codes(&filter, query.page(), query.sort())
      .await?;

   Ok(Json(ApiResponse::new(page.map(CodeDto::from))))
}

/// POST /api/v1/codes
///
/// ## レスポンス
///
/// - `201 Created`: 登録したコード
/// - `400 Bad Request`: バリデーションエラー、またはグループコードが存在しない
/// - `409 Conflict`: 同じグループ内にコード値が登録済み
#[tracing::instrument(skip_all)]
pub async fn create_code(
   State(state): State<Arc<CodeState>>,
   Json(req): Json<CodeRequest>,
) -> Result<impl IntoResponse, CoreError> {
   let code = state.usecase.create_code(req.into()).await?;

   Ok((StatusCode::CREATED, Json(ApiResponse::new(CodeDto::from(code)))))
}

/// PUT /api/v1/codes/{code_id}
///
/// 登録時と同じエラーに加え、コードが存在しなければ 404。
#[tracing::instrument(skip_all, fields(%code_id))]
pub async fn update_code(
   State(state): State<Arc<CodeState>>,
   Path(code_id): Path<String>,
   Json(req): Json<CodeRequest>,
) -> Result<Json<ApiResponse<CodeDto>>, CoreError> {
   let id = parse_code_id(&code_id)?;

   let code = state.usecase.update_code(&id, req.into()).await?;

   Ok(Json(ApiResponse::new(CodeDto::from(code))))
}

/// DELETE /api/v1/codes/{code_id}
#[tracing::instrument(skip_all, fields(%code_id))]
pub async fn delete_code(
   State(state): State<Arc<CodeState>>,
   Path(code_id): Path<String>,
) -> Result<StatusCode, CoreError> {
   let id = parse_code_id(&code_id)?;

   state.usecase.delete_code(&id).await?;

   Ok(StatusCode::NO_CONTENT)
}
