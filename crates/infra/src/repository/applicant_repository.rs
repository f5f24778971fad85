//! # ApplicantRepository
//!
//! 求職者の永続化を担当するリポジトリ。
//! 一覧は [`PagedRepository`]、詳細取得・登録・更新・削除は固有のメソッドで提供する。
//! 削除するとコメントとアラートも `ON DELETE CASCADE` で削除される。

use applydesk_domain::{
   applicant::{
      Applicant,
      ApplicantFilter,
      ApplicantId,
      ApplicantRecord,
      ApplicantSortField,
      ApplicantStatus,
      VisaType,
   },
   pagination::SortOrder,
   value_objects::{Email, Nationality, PersonName, PhoneNumber},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::paging::{PagedRepository, push_limit_offset, push_order_by, push_search};
use crate::error::InfraError;

/// 求職者リポジトリトレイト
#[async_trait]
pub trait ApplicantRepository:
   PagedRepository<Item = Applicant, Filter = ApplicantFilter, SortField = ApplicantSortField>
{
   async fn find_by_id(&self, id: &ApplicantId) -> Result<Option<Applicant>, InfraError>;

   async fn insert(&self, applicant: &Applicant) -> Result<(), InfraError>;

   /// 対象行が存在しない場合は `false`
   async fn update(&self, applicant: &Applicant) -> Result<bool, InfraError>;

   /// 対象行が存在しない場合は `false`
   async fn delete(&self, id: &ApplicantId) -> Result<bool, InfraError>;
}

const SELECT_COLUMNS: &str = "SELECT id, name, email, phone, nationality, visa_type, status, \
                              created_at, updated_at FROM applicants";

/// DB の applicants テーブルの行を表す中間構造体
#[derive(sqlx::FromRow)]
struct ApplicantRow {
   id:          Uuid,
   name:        String,
   email:       String,
   phone:       Option<String>,
   nationality: Option<String>,
   visa_type:   Option<String>,
   status:      String,
   created_at:  DateTime<Utc>,
   updated_at:  DateTime<Utc>,
}

impl TryFrom<ApplicantRow> for Applicant {
   type Error = InfraError;

   fn try_from(row: ApplicantRow) -> Result<Self, Self::Error> {
      let unexpected = |e: applydesk_domain::DomainError| InfraError::unexpected(e.to_string());

      Ok(Applicant::from_db(ApplicantRecord {
         id:          ApplicantId::from_uuid(row.id),
         name:        PersonName::new(row.name).map_err(unexpected)?,
         email:       Email::new(row.email).map_err(unexpected)?,
         phone:       row.phone.map(PhoneNumber::new).transpose().map_err(unexpected)?,
         nationality: row
            .nationality
            .map(Nationality::new)
            .transpose()
            .map_err(unexpected)?,
         visa_type:   row.visa_type.map(VisaType::new).transpose().map_err(unexpected)?,
         status:      row.status.parse::<ApplicantStatus>().map_err(unexpected)?,
         created_at:  row.created_at,
         updated_at:  row.updated_at,
      }))
   }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &ApplicantFilter) {
   if let Some(search) = &filter.search {
      push_search(qb, &["name", "email"], search);
   }
   if let Some(status) = filter.status {
      let status: &'static str = status.into();
      qb.push(" AND status = ").push_bind(status);
   }
   if let Some(visa_type) = &filter.visa_type {
      qb.push(" AND visa_type = ").push_bind(visa_type.clone());
   }
}

/// PostgreSQL 実装の ApplicantRepository
#[derive(Debug, Clone)]
pub struct PostgresApplicantRepository {
   pool: PgPool,
}

impl PostgresApplicantRepository {
   pub fn new(pool: PgPool) -> Self {
      Self { pool }
   }
}

#[async_trait]
impl PagedRepository for PostgresApplicantRepository {
   type Item = Applicant;
   type Filter = ApplicantFilter;
   type SortField = ApplicantSortField;

   #[tracing::instrument(skip_all, level = "debug")]
   async fn count(&self, filter: &ApplicantFilter) -> Result<i64, InfraError> {
      let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM applicants WHERE TRUE");
      push_filters(&mut qb, filter);

      let (count,): (i64,) = qb.build_query_as().fetch_one(&self.pool).await?;
      Ok(count)
   }

   #[tracing::instrument(skip_all, level = "debug", fields(skip, take))]
   async fn find_many(
      &self,
      filter: &ApplicantFilter,
      order: &[SortOrder<ApplicantSortField>],
      skip: i64,
      take: i64,
   ) -> Result<Vec<Applicant>, InfraError> {
      let mut qb = QueryBuilder::new(SELECT_COLUMNS);
      qb.push(" WHERE TRUE");
      push_filters(&mut qb, filter);
      push_order_by(&mut qb, order);
      push_limit_offset(&mut qb, skip, take);

      let rows: Vec<ApplicantRow> = qb.build_query_as().fetch_all(&self.pool).await?;
      rows.into_iter().map(Applicant::try_from).collect()
   }
}

#[async_trait]
impl ApplicantRepository for PostgresApplicantRepository {
   #[tracing::instrument(skip_all, level = "debug", fields(%id))]
   async fn find_by_id(&self, id: &ApplicantId) -> Result<Option<Applicant>, InfraError> {
      let sql = format!("{SELECT_COLUMNS} WHERE id = $1");
      let row: Option<ApplicantRow> = sqlx::query_as(&sql)
         .bind(id.as_uuid())
         .fetch_optional(&self.pool)
         .await?;

      row.map(Applicant::try_from).transpose()
   }

   #[tracing::instrument(skip_all, level = "debug", fields(id = %applicant.id()))]
   async fn insert(&self, applicant: &Applicant) -> Result<(), InfraError> {
      let status: &'static str = applicant.status().into();

      sqlx::query(
         r#"
            INSERT INTO applicants (
                id, name, email, phone, nationality, visa_type, status,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
      )
      .bind(applicant.id().as_uuid())
      .bind(applicant.name().as_str())
      .bind(applicant.email().as_str())
      .bind(applicant.phone())
      .bind(applicant.nationality())
      .bind(applicant.visa_type().map(VisaType::as_str))
      .bind(status)
      .bind(applicant.created_at())
      .bind(applicant.updated_at())
      .execute(&self.pool)
      .await?;

      Ok(())
   }

   #[tracing::instrument(skip_all, level = "debug", fields(id = %applicant.id()))]
   async fn update(&self, applicant: &Applicant) -> Result<bool, InfraError> {
      let status: &'static str = applicant.status().into();

      let result = sqlx::query(
         r#"
            UPDATE applicants
            SET name = $2, email = $3, phone = $4, nationality = $5, visa_type = $6,
                status = $7, updated_at = $8
            WHERE id = $1
            "#,
      )
      .bind(applicant.id().as_uuid())
      .bind(applicant.name().as_str())
      .bind(applicant.email().as_str())
      .bind(applicant.phone())
      .bind(applicant.nationality())
      .bind(applicant.visa_type().map(VisaType::as_str))
      .bind(status)
      .bind(applicant.updated_at())
      .execute(&self.pool)
      .await?;

      Ok(result.rows_affected() > 0)
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%id))]
   async fn delete(&self, id: &ApplicantId) -> Result<bool, InfraError> {
      let result = sqlx::query("DELETE FROM applicants WHERE id = $1")
         .bind(id.as_uuid())
         .execute(&self.pool)
         .await?;

      Ok(result.rows_affected() > 0)
   }
}
