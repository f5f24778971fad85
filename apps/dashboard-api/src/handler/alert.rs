//! # アラートハンドラ
//!
//! ## エンドポイント
//!
//! - `GET /api/v1/alerts` - アラート一覧（`search`, `level`, `isRead`, `applicantId` で絞り込み）
//! - `POST /api/v1/alerts` - アラート登録
//! - `POST /api/v1/alerts/{alert_id}/read` - 既読化（冪等）
//! - `DELETE /api/v1/alerts/{alert_id}` - アラート削除
//!
//! 既定の並び順は作成日時の降順。

use std::sync::Arc;

use applydesk_domain::{
   alert::{Alert, AlertFilter, AlertId, AlertLevel},
   applicant::ApplicantId,
};
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
   usecase::{AlertUseCaseImpl, CreateAlertInput},
};

pub struct AlertState {
   pub usecase: AlertUseCaseImpl,
}

/// アラート登録リクエスト
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlertRequest {
   pub applicant_id: Option<Uuid>,
   pub level:        AlertLevel,
   pub title:        String,
   pub message:      String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertDto {
   pub id:           Uuid,
   pub applicant_id: Option<Uuid>,
   pub level:        AlertLevel,
   pub title:        String,
   pub message:      String,
   pub is_read:      bool,
   pub read_at:      Option<DateTime<Utc>>,
   pub created_at:   DateTime<Utc>,
   pub updated_at:   DateTime<Utc>,
}

impl From<Alert> for AlertDto {
   fn from(alert: Alert) -> Self {
      Self {
         id:           *alert.id().as_uuid(),
         applicant_id: alert.applicant_id().map(|id| *id.as_uuid()),
         level:        alert.level(),
         title:        alert.title().as_str().to_string(),
         message:      alert.message().as_str().to_string(),
         is_read:      alert.is_read(),
         read_at:      alert.read_at(),
         created_at:   alert.created_at(),
         updated_at:   alert.updated_at(),
      }
   }
}

fn parse_alert_id(raw: &str) -> Result<AlertId, CoreError> {
   parse_path_id(raw, "アラート", AlertId::from_uuid)
}

fn alert_filter(query: &ListQuery) -> AlertFilter {
   AlertFilter {
      search:       query.search(),
      level:        query.parse_filter("level"),
      is_read:      query.parse_filter("isRead"),
      applicant_id: query
         .parse_filter::<Uuid>("applicantId")
         .map(ApplicantId::from_uuid),
   }
}

/// GET /api/v1/alerts
///
/// 解釈できない絞り込み値（`level=urgent` など）は無視する。
#[tracing::instrument(skip_all)]
pub async fn list_alerts(
   State(state): State<Arc<AlertState>>,
   Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<ApiResponse<PaginatedResponse<AlertDto>>>, CoreError> {
   let query = ListQuery::parse(params);
   let filter = alert_filter(&query);

   let page = state
      .usecase
      .list_alerts(&filter, query.page(), query.sort())
      .await?;

   Ok(Json(ApiResponse::new(page.map(AlertDto::from))))
}

/// POST /api/v1/alerts
///
/// ## レスポンス
///
/// - `201 Created`: 登録したアラート（未読）
/// - `400 Bad Request`: 件名・本文のバリデーションエラー、または求職者が存在しない
#[tracing::instrument(skip_all)]
pub async fn create_alert(
   State(state): State<Arc<AlertState>>,
   Json(req): Json<CreateAlertRequest>,
) -> Result<impl IntoResponse, CoreError> {
   let input = CreateAlertInput {
      applicant_id: req.applicant_id.map(ApplicantId::from_uuid),
      level:        req.level,
      title:        req.title,
      message:      req.message,
   };

   let alert = state.usecase.create_alert(input).await?;

   Ok((StatusCode::CREATED, Json(ApiResponse::new(AlertDto::from(alert)))))
}

/// POST /api/v1/alerts/{alert_id}/read
#[tracing::instrument(skip_all, fields(%alert_id))]
pub async fn mark_alert_read(
   State(state): State<Arc<AlertState>>,
   Path(alert_id): Path<String>,
) -> Result<Json<ApiResponse<AlertDto>>, CoreError> {
   let id = parse_alert_id(&alert_id)?;

   let alert = state.usecase.mark_alert_read(&id).await?;

   Ok(Json(ApiResponse::new(AlertDto::from(alert))))
}

/// DELETE /api/v1/alerts/{alert_id}
#[tracing::instrument(skip_all, fields(%alert_id))]
pub async fn delete_alert(
   State(state): State<Arc<AlertState>>,
   Path(alert_id): Path<String>,
) -> Result<StatusCode, CoreError> {
   let id = parse_alert_id(&alert_id)?;

   state.usecase.delete_alert(&id).await?;

   Ok(StatusCode::NO_CONTENT)
}
