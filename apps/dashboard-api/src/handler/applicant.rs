//! # 求職者ハンドラ
//!
//! ## エンドポイント
//!
//! - `GET /api/v1/applicants` - 求職者一覧（`search`, `status`, `visaType` で絞り込み）
//! - `GET /api/v1/applicants/{applicant_id}` - 求職者詳細
//! - `POST /api/v1/applicants` - 求職者登録
//! - `PUT /api/v1/applicants/{applicant_id}` - 求職者更新（全項目の置き換え）
//! - `DELETE /api/v1/applicants/{applicant_id}` - 求職者削除（コメント・アラートも削除）

use std::sync::Arc;

use applydesk_domain::applicant::{Applicant, ApplicantFilter, ApplicantId, ApplicantStatus};
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
   usecase::{ApplicantUseCaseImpl, CreateApplicantInput, UpdateApplicantInput},
};

/// 求職者 API の共有状態
pub struct ApplicantState {
   pub usecase: ApplicantUseCaseImpl,
}

// --- リクエスト/レスポンス型 ---

/// 求職者登録リクエスト
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicantRequest {
   pub name:        String,
   pub email:       String,
   pub phone:       Option<String>,
   pub nationality: Option<String>,
   pub visa_type:   Option<String>,
}

/// 求職者更新リクエスト
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApplicantRequest {
   pub name:        String,
   pub email:       String,
   pub phone:       Option<String>,
   pub nationality: Option<String>,
   pub visa_type:   Option<String>,
   pub status:      ApplicantStatus,
}

/// 求職者 DTO
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantDto {
   pub id:          Uuid,
   pub name:        String,
   pub email:       String,
   pub phone:       Option<String>,
   pub nationality: Option<String>,
   pub visa_type:   Option<String>,
   pub status:      ApplicantStatus,
   pub created_at:  DateTime<Utc>,
   pub updated_at:  DateTime<Utc>,
}

impl From<Applicant> for ApplicantDto {
   fn from(applicant: Applicant) -> Self {
      Self {
         id:          *applicant.id().as_uuid(),
         name:        applicant.name().as_str().to_string(),
         email:       applicant.email().as_str().to_string(),
         phone:       applicant.phone().map(str::to_string),
         nationality: applicant.nationality().map(str::to_string),
         visa_type:   applicant.visa_type().map(|v| v.as_str().to_string()),
         status:      applicant.status(),
         created_at:  applicant.created_at(),
         updated_at:  applicant.updated_at(),
      }
   }
}

/// パスパラメータの求職者 ID を解析する
///
/// UUID でなければ 400 を返す。
pub(crate) fn parse_applicant_id(raw: &str) -> Result<ApplicantId, CoreError> {
   parse_path_id(raw, "求職者", ApplicantId::from_uuid)
}

// --- ハンドラ ---

/// GET /api/v1/applicants
#[tracing::instrument(skip_all)]
pub async fn list_applicants(
   State(state): State<Arc<ApplicantState>>,
   Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<ApiResponse<PaginatedResponse<ApplicantDto>>>, CoreError> {
   let query = ListQuery::parse(params);
   let filter = ApplicantFilter {
      search:    query.search(),
      status:    query.parse_filter("status"),
      visa_type: query.get("visaType").map(str::to_string),
   };

   let page = state
      .usecase
      .list_applicants(&filter, query.page(), query.sort())
      .await?;

   Ok(Json(ApiResponse::new(page.map(ApplicantDto::from))))
}

/// GET /api/v1/applicants/{applicant_id}
///
/// ## レスポンス
///
/// - `200 OK`: 求職者詳細
/// - `400 Bad Request`: ID が UUID でない
/// - `404 Not Found`: 求職者が存在しない
#[tracing::instrument(skip_all, fields(%applicant_id))]
pub async fn get_applicant(
   State(state): State<Arc<ApplicantState>>,
   Path(applicant_id): Path<String>,
) -> Result<Json<ApiResponse<ApplicantDto>>, CoreError> {
   let id = parse_applicant_id(&applicant_id)?;

   let applicant = state.usecase.get_applicant(&id).await?;

   Ok(Json(ApiResponse::new(ApplicantDto::from(applicant))))
}

/// POST /api/v1/applicants
///
/// ## レスポンス
///
/// - `201 Created`: 登録した求職者
/// - `400 Bad Request`: 氏名・メールアドレス・ビザ種別のバリデーションエラー
#[tracing::instrument(skip_all)]
pub async fn create_applicant(
   State(state): State<Arc<ApplicantState>>,
   Json(req): Json<CreateApplicantRequest>,
) -> Result<impl IntoResponse, CoreError> {
   let input = CreateApplicantInput {
      name:        req.name,
      email:       req.email,
      phone:       req.phone,
      nationality: req.nationality,
      visa_type:   req.visa_type,
   };

   let applicant = state.usecase.create_applicant(input).await?;

   Ok((
      StatusCode::CREATED,
      Json(ApiResponse::new(ApplicantDto::from(applicant))),
   ))
}

/// PUT /api/v1/applicants/{applicant_id}
///
/// ## レスポンス
///
/// - `200 OK`: 更新後の求職者
/// - `400 Bad Request`: ID の形式不正、またはバリデーションエラー
/// - `404 Not Found`: 求職者が存在しない
#[tracing::instrument(skip_all, fields(%applicant_id))]
pub async fn update_applicant(
   State(state): State<Arc<ApplicantState>>,
   Path(applicant_id): Path<String>,
   Json(req): Json<UpdateApplicantRequest>,
) -> Result<Json<ApiResponse<ApplicantDto>>, CoreError> {
   let id = parse_applicant_id(&applicant_id)?;
   let input = UpdateApplicantInput {
      name:        req.name,
      email:       req.email,
      phone:       req.phone,
      nationality: req.nationality,
      visa_type:   req.visa_type,
      status:      req.status,
   };

   let applicant = state.usecase.update_applicant(&id, input).await?;

   Ok(Json(ApiResponse::new(ApplicantDto::from(applicant))))
}

/// DELETE /api/v1/applicants/{applicant_id}
///
/// - `204 No Content`: 削除した
/// - `404 Not Found`: 求職者が存在しない
#[tracing::instrument(skip_all, fields(%applicant_id))]
pub async fn delete_applicant(
   State(state): State<Arc<ApplicantState>>,
   Path(applicant_id): Path<String>,
) -> Result<StatusCode, CoreError> {
   let id = parse_applicant_id(&applicant_id)?;

   state.usecase.delete_applicant(&id).await?;

   Ok(StatusCode::NO_CONTENT)
}
