//! # グループコードハンドラ
//!
//! - `GET /api/v1/group-codes` - グループコード一覧（`search` で絞り込み）
//! - `POST /api/v1/group-codes` - グループコード登録
//! - `PUT /api/v1/group-codes/{group_code_id}` - グループコード更新
//! - `DELETE /api/v1/group-codes/{group_code_id}` - グループコード削除（配下のコードも削除）

use std::sync::Arc;

use applydesk_domain::code::{GroupCode, GroupCodeFilter, GroupCodeId};
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
   usecase::{CodeUseCaseImpl, GroupCodeInput},
};

/// コードハンドラと同じユースケースを共有する
pub struct GroupCodeState {
   pub usecase: Arc<CodeUseCaseImpl>,
}

#[derive(Debug, Deserialize)]
pub struct GroupCodeRequest {
   pub code: String,
   pub name: String,
}

impl From<GroupCodeRequest> for GroupCodeInput {
   fn from(req: GroupCodeRequest) -> Self {
      Self {
         code: req.code,
         name: req.name,
      }
   }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupCodeDto {
   pub id:         Uuid,
   pub code:       String,
   pub name:       String,
   pub created_at: DateTime<Utc>,
   pub updated_at: DateTime<Utc>,
}

impl From<GroupCode> for GroupCodeDto {
   fn from(group_code: GroupCode) -> Self {
      Self {
         id:         *group_code.id.as_uuid(),
         code:       group_code.code,
         name:       group_code.name,
         created_at: group_code.created_at,
         updated_at: group_code.updated_at,
      }
   }
}

fn parse_group_code_id(raw: &str) -> Result<GroupCodeId, CoreError> {
   parse_path_id(raw, "グループコード", GroupCodeId::from_uuid)
}

/// GET /api/v1/group-codes
#[tracing::instrument(skip_all)]
pub async fn list_group_codes(
   State(state): State<Arc<GroupCodeState>>,
   Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<ApiResponse<PaginatedResponse<GroupCodeDto>>>, CoreError> {
   let query = ListQuery::parse(params);
   let filter = GroupCodeFilter {
      search: query.search(),
   };

   let page = state
      .usecase
      .list_group_codes(&filter, query.page(), query.sort())
      .await?;

   Ok(Json(ApiResponse::new(page.map(GroupCodeDto::from))))
}

/// POST /api/v1/group-codes
///
/// - `201 Created`: 登録したグループコード
/// - `400 Bad Request`: コード値・名称のバリデーションエラー
/// - `409 Conflict`: コード値が登録済み
#[tracing::instrument(skip_all)]
pub async fn create_group_code(
   State(state): State<Arc<GroupCodeState>>,
   Json(req): Json<GroupCodeRequest>,
) -> Result<impl IntoResponse, CoreError> {
   let group_code = state.usecase.create_group_code(req.into()).await?;

   Ok((
      StatusCode::CREATED,
      Json(ApiResponse::new(GroupCodeDto::from(group_code))),
   ))
}

/// PUT /api/v1/group-codes/{group_code_id}
#[tracing::instrument(skip_all, fields(%group_code_id))]
pub async fn update_group_code(
   State(state): State<Arc<GroupCodeState>>,
   Path(group_code_id): Path<String>,
   Json(req): Json<GroupCodeRequest>,
) -> Result<Json<ApiResponse<GroupCodeDto>>, CoreError> {
   let id = parse_group_code_id(&group_code_id)?;

   let group_code = state.usecase.update_group_code(&id, req.into()).await?;

   Ok(Json(ApiResponse::new(GroupCodeDto::from(group_code))))
}

/// DELETE /api/v1/group-codes/{group_code_id}
#[tracing::instrument(skip_all, fields(%group_code_id))]
pub async fn delete_group_code(
   State(state): State<Arc<GroupCodeState>>,
   Path(group_code_id): Path<String>,
) -> Result<StatusCode, CoreError> {
   let id = parse_group_code_id(&group_code_id)?;

   state.usecase.delete_group_code(&id).await?;

   Ok(StatusCode::NO_CONTENT)
}
