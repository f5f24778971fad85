//! # 管理者ハンドラ
//!
//! - `GET /api/v1/admins` - 管理者一覧（`search`, `role` で絞り込み）

use std::sync::Arc;

use applydesk_domain::admin::{Admin, AdminFilter, AdminRole};
use applydesk_infra::repository::AdminRepository;
use applydesk_shared::{ApiResponse, PaginatedResponse};
use axum::{
   Json,
   extract::{Query, State},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::list_query::ListQuery;
use crate::{error::CoreError, usecase::paginate};

/// 管理者 API の共有状態
pub struct AdminState {
   pub repository: Arc<dyn AdminRepository>,
}

/// 管理者 DTO
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDto {
   pub id:         Uuid,
   pub name:       String,
   pub email:      String,
   pub role:       AdminRole,
   pub created_at: DateTime<Utc>,
   pub updated_at: DateTime<Utc>,
}

impl From<Admin> for AdminDto {
   fn from(admin: Admin) -> Self {
      Self {
         id:         *admin.id.as_uuid(),
         name:       admin.name,
         email:      admin.email,
         role:       admin.role,
         created_at: admin.created_at,
         updated_at: admin.updated_at,
      }
   }
}

/// GET /api/v1/admins
#[tracing::instrument(skip_all)]
pub async fn list_admins(
   State(state): State<Arc<AdminState>>,
   Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<ApiResponse<PaginatedResponse<AdminDto>>>, CoreError> {
   let query = ListQuery::parse(params);
   let filter = AdminFilter {
      search: query.search(),
      role:   query.parse_filter("role"),
   };

   let page = paginate(state.repository.as_ref(), &filter, query.page(), query.sort()).await?;

   Ok(Json(ApiResponse::new(page.map(AdminDto::from))))
}
