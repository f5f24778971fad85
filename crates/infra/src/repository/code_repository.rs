//! # CodeRepository
//!
//! コードの永続化を担当するリポジトリ。一覧はグループコードでの絞り込みに対応する。
//!
//! `(group_code_id, code)` の重複は [`InfraError::is_unique_violation`]、
//! 存在しないグループコードの参照は [`InfraError::is_foreign_key_violation`] で判別できる。

use applydesk_domain::{
   code::{Code, CodeFilter, CodeId, CodeSortField, GroupCodeId},
   pagination::SortOrder,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::paging::{PagedRepository, push_limit_offset, push_order_by, push_search};
use crate::error::InfraError;

/// コードリポジトリトレイト
#[async_trait]
pub trait CodeRepository:
   PagedRepository<Item = Code, Filter = CodeFilter, SortField = CodeSortField>
{
   async fn find_by_id(&self, id: &CodeId) -> Result<Option<Code>, InfraError>;

   async fn insert(&self, code: &Code) -> Result<(), InfraError>;

   /// 対象行が存在しない場合は `false`
   async fn update(&self, code: &Code) -> Result<bool, InfraError>;

   /// 対象行が存在しない場合は `false`
   async fn delete(&self, id: &CodeId) -> Result<bool, InfraError>;
}

const SELECT_COLUMNS: &str =
   "SELECT id, group_code_id, code, label, sort_order, created_at, updated_at FROM codes";

#[derive(sqlx::FromRow)]
struct CodeRow {
   id:            Uuid,
   group_code_id: Uuid,
   code:          String,
   label:         String,
   sort_order:    i32,
   created_at:    DateTime<Utc>,
   updated_at:    DateTime<Utc>,
}

impl From<CodeRow> for Code {
   fn from(row: CodeRow) -> Self {
      Code {
         id:            CodeId::from_uuid(row.id),
         group_code_id: GroupCodeId::from_uuid(row.group_code_id),
         code:          row.code,
         label:         row.label,
         sort_order:    row.sort_order,
         created_at:    row.created_at,
         updated_at:    row.updated_at,
      }
   }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &CodeFilter) {
   if let Some(search) = &filter.search {
      push_search(qb, &["code", "label"], search);
   }
   if let Some(group_code_id) = &filter.group_code_id {
      qb.push(" AND group_code_id = ")
         .push_bind(*group_code_id.as_uuid());
   }
}

/// PostgreSQL 実装の CodeRepository
#[derive(Debug, Clone)]
pub struct PostgresCodeRepository {
   pool: PgPool,
}

impl PostgresCodeRepository {
   pub fn new(pool: PgPool) -> Self {
      Self { pool }
   }
}

#[async_trait]
impl PagedRepository for PostgresCodeRepository {
   type Item = Code;
   type Filter = CodeFilter;
   type SortField = CodeSortField;

   #[tracing::instrument(skip_all, level = "debug")]
   async fn count(&self, filter: &CodeFilter) -> Result<i64, InfraError> {
      let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM codes WHERE TRUE");
      push_filters(&mut qb, filter);

      let (count,): (i64,) = qb.build_query_as().fetch_one(&self.pool).await?;
      Ok(count)
   }

   #[tracing::instrument(skip_all, level = "debug", fields(skip, take))]
   async fn find_many(
      &self,
      filter: &CodeFilter,
      order: &[SortOrder<CodeSortField>],
      skip: i64,
      take: i64,
   ) -> Result<Vec<Code>, InfraError> {
      let mut qb = QueryBuilder::new(SELECT_COLUMNS);
      qb.push(" WHERE TRUE");
      push_filters(&mut qb, filter);
      push_order_by(&mut qb, order);
      push_limit_offset(&mut qb, skip, take);

      let rows: Vec<CodeRow> = qb.build_query_as().fetch_all(&self.pool).await?;
      Ok(rows.into_iter().map(Code::from).collect())
   }
}

#[async_trait]
impl CodeRepository for PostgresCodeRepository {
   #[tracing::instrument(skip_all, level = "debug", fields(%id))]
   async fn find_by_id(&self, id: &CodeId) -> Result<Option<Code>, InfraError> {
      let sql = format!("{SELECT_COLUMNS} WHERE id = $1");
      let row: Option<CodeRow> = sqlx::query_as(&sql)
         .bind(id.as_uuid())
         .fetch_optional(&self.pool)
         .await?;

      Ok(row.map(Code::from))
   }

   #[tracing::instrument(skip_all, level = "debug", fields(id = %code.id))]
   async fn insert(&self, code: &Code) -> Result<(), InfraError> {
      sqlx::query(
         r#"
            INSERT INTO codes (
                id, group_code_id, code, label, sort_order, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
      )
      .bind(code.id.as_uuid())
      .bind(code.group_code_id.as_uuid())
      .bind(&code.code)
      .bind(&code.label)
      .bind(code.sort_order)
      .bind(code.created_at)
      .bind(code.updated_at)
      .execute(&self.pool)
      .await?;

      Ok(())
   }

   #[tracing::instrument(skip_all, level = "debug", fields(id = %code.id))]
   async fn update(&self, code: &Code) -> Result<bool, InfraError> {
      let result = sqlx::query(
         r#"
            UPDATE codes
            SET group_code_id = $2, code = $3, label = $4, sort_order = $5, updated_at = $6
            WHERE id = $1
            "#,
      )
      .bind(code.id.as_uuid())
      .bind(code.group_code_id.as_uuid())
      .bind(&code.code)
      .bind(&code.label)
      .bind(code.sort_order)
      .bind(code.updated_at)
      .execute(&self.pool)
      .await?;

      Ok(result.rows_affected() > 0)
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%id))]
   async fn delete(&self, id: &CodeId) -> Result<bool, InfraError> {
      let result = sqlx::query("DELETE FROM codes WHERE id = $1")
         .bind(id.as_uuid())
         .execute(&self.pool)
         .await?;

      Ok(result.rows_affected() > 0)
   }
}
