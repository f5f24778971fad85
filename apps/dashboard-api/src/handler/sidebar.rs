//! # サイドバーハンドラ
//!
//! - `GET /api/v1/sidebars` - サイドバー項目一覧（`search` で絞り込み）
//! - `POST /api/v1/sidebars` - サイドバー項目登録
//! - `PUT /api/v1/sidebars/{sidebar_id}` - サイドバー項目更新
//! - `DELETE /api/v1/sidebars/{sidebar_id}` - サイドバー項目削除

use std::sync::Arc;

use applydesk_domain::sidebar::{Sidebar, SidebarFilter, SidebarId};
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
   usecase::{SidebarInput, SidebarUseCaseImpl},
};

pub struct SidebarState {
   pub usecase: SidebarUseCaseImpl,
}

/// サイドバー項目の登録・更新リクエスト
///
/// `path` は `/` 始まり。`position` を省略した場合は 0。
#[derive(Debug, Deserialize)]
pub struct SidebarRequest {
   pub label:    String,
   pub path:     String,
   #[serde(default)]
   pub position: i32,
}

impl From<SidebarRequest> for SidebarInput {
   fn from(req: SidebarRequest) -> Self {
      Self {
         label:    req.label,
         path:     req.path,
         position: req.position,
      }
   }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarDto {
   pub id:         Uuid,
   pub label:      String,
   pub path:       String,
   pub position:   i32,
   pub created_at: DateTime<Utc>,
   pub updated_at: DateTime<Utc>,
}

impl From<Sidebar> for SidebarDto {
   fn from(sidebar: Sidebar) -> Self {
      Self {
         id:         *sidebar.id.as_uuid(),
         label:      sidebar.label,
         path:       sidebar.path,
         position:   sidebar.position,
         created_at: sidebar.created_at,
         updated_at: sidebar.updated_at,
      }
   }
}

fn parse_sidebar_id(raw: &str) -> Result<SidebarId, CoreError> {
   parse_path_id(raw, "サイドバー項目", SidebarId::from_uuid)
}

/// GET /api/v1/sidebars
#[tracing::instrument(skip_all)]
pub async fn list_sidebars(
   State(state): State<Arc<SidebarState>>,
   Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<ApiResponse<PaginatedResponse<SidebarDto>>>, CoreError> {
   let query = ListQuery::parse(params);
   let filter = SidebarFilter {
      search: query.search(),
   };

   let page = state
      .usecase
      .list_sidebars(&filter, query.page(), query.sort())
      .await?;

   Ok(Json(ApiResponse::new(page.map(SidebarDto::from))))
}

/// POST /api/v1/sidebars
#[tracing::instrument(skip_all)]
pub async fn create_sidebar(
   State(state): State<Arc<SidebarState>>,
   Json(req): Json<SidebarRequest>,
) -> Result<impl IntoResponse, CoreError> {
   let sidebar = state.usecase.create_sidebar(req.into()).await?;

   Ok((
      StatusCode::CREATED,
      Json(ApiResponse::new(SidebarDto::from(sidebar))),
   ))
}

/// PUT /api/v1/sidebars/{sidebar_id}
#[tracing::instrument(skip_all, fields(%sidebar_id))]
pub async fn update_sidebar(
   State(state): State<Arc<SidebarState>>,
   Path(sidebar_id): Path<String>,
   Json(req): Json<SidebarRequest>,
) -> Result<Json<ApiResponse<SidebarDto>>, CoreError> {
   let id = parse_sidebar_id(&sidebar_id)?;

   let sidebar = state.usecase.update_sidebar(&id, req.into()).await?;

   Ok(Json(ApiResponse::new(SidebarDto::from(sidebar))))
}

/// DELETE /api/v1/sidebars/{sidebar_id}
#[tracing::instrument(skip_all, fields(%sidebar_id))]
pub async fn delete_sidebar(
   State(state): State<Arc<SidebarState>>,
   Path(sidebar_id): Path<String>,
) -> Result<StatusCode, CoreError> {
   let id = parse_sidebar_id(&sidebar_id)?;

   state.usecase.delete_sidebar(&id).await?;

   Ok(StatusCode::NO_CONTENT)
}
