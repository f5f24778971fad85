//! # AlertRepository
//!
//! アラートの永続化を担当するリポジトリ。
//! 存在しない求職者への紐づけは [`InfraError::is_foreign_key_violation`] で判別できる。

use applydesk_domain::{
   alert::{
      Alert,
      AlertFilter,
      AlertId,
      AlertLevel,
      AlertMessage,
      AlertRecord,
      AlertSortField,
      AlertTitle,
   },
   applicant::ApplicantId,
   pagination::SortOrder,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::paging::{PagedRepository, push_limit_offset, push_order_by, push_search};
use crate::error::InfraError;

/// アラートリポジトリトレイト
#[async_trait]
pub trait AlertRepository:
   PagedRepository<Item = Alert, Filter = AlertFilter, SortField = AlertSortField>
{
   async fn find_by_id(&self, id: &AlertId) -> Result<Option<Alert>, InfraError>;

   async fn insert(&self, alert: &Alert) -> Result<(), InfraError>;

   /// 既読状態と更新日時を保存する。対象行が存在しない場合は `false`
   async fn update(&self, alert: &Alert) -> Result<bool, InfraError>;

   /// 対象行が存在しない場合は `false`
   async fn delete(&self, id: &AlertId) -> Result<bool, InfraError>;
}

const SELECT_COLUMNS: &str = "SELECT id, applicant_id, level, title, message, read_at, \
                              created_at, updated_at FROM alerts";

#[derive(sqlx::FromRow)]
struct AlertRow {
   id:           Uuid,
   applicant_id: Option<Uuid>,
   level:        String,
   title:        String,
   message:      String,
   read_at:      Option<DateTime<Utc>>,
   created_at:   DateTime<Utc>,
   updated_at:   DateTime<Utc>,
}

impl TryFrom<AlertRow> for Alert {
   type Error = InfraError;

   fn try_from(row: AlertRow) -> Result<Self, Self::Error> {
      let unexpected = |e: applydesk_domain::DomainError| InfraError::unexpected(e.to_string());

      Ok(Alert::from_db(AlertRecord {
         id:           AlertId::from_uuid(row.id),
         applicant_id: row.applicant_id.map(ApplicantId::from_uuid),
         level:        row.level.parse::<AlertLevel>().map_err(unexpected)?,
         title:        AlertTitle::new(row.title).map_err(unexpected)?,
         message:      AlertMessage::new(row.message).map_err(unexpected)?,
         read_at:      row.read_at,
         created_at:   row.created_at,
         updated_at:   row.updated_at,
      }))
   }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &AlertFilter) {
   if let Some(search) = &filter.search {
      push_search(qb, &["title", "message"], search);
   }
   if let Some(level) = filter.level {
      let level: &'static str = level.into();
      qb.push(" AND level = ").push_bind(level);
   }
   match filter.is_read {
      Some(true) => {
         qb.push(" AND read_at IS NOT NULL");
      }
      Some(false) => {
         qb.push(" AND read_at IS NULL");
      }
      None => {}
   }
   if let Some(applicant_id) = &filter.applicant_id {
      qb.push(" AND applicant_id = ")
         .push_bind(*applicant_id.as_uuid());
   }
}

/// PostgreSQL 実装の AlertRepository
#[derive(Debug, Clone)]
pub struct PostgresAlertRepository {
   pool: PgPool,
}

impl PostgresAlertRepository {
   pub fn new(pool: PgPool) -> Self {
      Self { pool }
   }
}

#[async_trait]
impl PagedRepository for PostgresAlertRepository {
   type Item = Alert;
   type Filter = AlertFilter;
   type SortField = AlertSortField;

   #[tracing::instrument(skip_all, level = "debug")]
   async fn count(&self, filter: &AlertFilter) -> Result<i64, InfraError> {
      let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM alerts WHERE TRUE");
      push_filters(&mut qb, filter);

      let (count,): (i64,) = qb.build_query_as().fetch_one(&self.pool).await?;
      Ok(count)
   }

   #[tracing::instrument(skip_all, level = "debug", fields(skip, take))]
   async fn find_many(
      &self,
      filter: &AlertFilter,
      order: &[SortOrder<AlertSortField>],
      skip: i64,
      take: i64,
   ) -> Result<Vec<Alert>, InfraError> {
      let mut qb = QueryBuilder::new(SELECT_COLUMNS);
      qb.push(" WHERE TRUE");
      push_filters(&mut qb, filter);
      push_order_by(&mut qb, order);
      push_limit_offset(&mut qb, skip, take);

      let rows: Vec<AlertRow> = qb.build_query_as().fetch_all(&self.pool).await?;
      rows.into_iter().map(Alert::try_from).collect()
   }
}

#[async_trait]
impl AlertRepository for PostgresAlertRepository {
   #[tracing::instrument(skip_all, level = "debug", fields(%id))]
   async fn find_by_id(&self, id: &AlertId) -> Result<Option<Alert>, InfraError> {
      let sql = format!("{SELECT_COLUMNS} WHERE id = $1");
      let row: Option<AlertRow> = sqlx::query_as(&sql)
         .bind(id.as_uuid())
         .fetch_optional(&self.pool)
         .await?;

      row.map(Alert::try_from).transpose()
   }

   #[tracing::instrument(skip_all, level = "debug", fields(id = %alert.id()))]
   async fn insert(&self, alert: &Alert) -> Result<(), InfraError> {
      let level: &'static str = alert.level().into();

      sqlx::query(
         r#"
            INSERT INTO alerts (
                id, applicant_id, level, title, message, read_at, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
      )
      .bind(alert.id().as_uuid())
      .bind(alert.applicant_id().map(|id| *id.as_uuid()))
      .bind(level)
      .bind(alert.title().as_str())
      .bind(alert.message().as_str())
      .bind(alert.read_at())
      .bind(alert.created_at())
      .bind(alert.updated_at())
      .execute(&self.pool)
      .await?;

      Ok(())
   }

   #[tracing::instrument(skip_all, level = "debug", fields(id = %alert.id()))]
   async fn update(&self, alert: &Alert) -> Result<bool, InfraError> {
      let result = sqlx::query("UPDATE alerts SET read_at = $2, updated_at = $3 WHERE id = $1")
         .bind(alert.id().as_uuid())
         .bind(alert.read_at())
         .bind(alert.updated_at())
         .execute(&self.pool)
         .await?;

      Ok(result.rows_affected() > 0)
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%id))]
   async fn delete(&self, id: &AlertId) -> Result<bool, InfraError> {
      let result = sqlx::query("DELETE FROM alerts WHERE id = $1")
         .bind(id.as_uuid())
         .execute(&self.pool)
         .await?;

      Ok(result.rows_affected() > 0)
   }
}
