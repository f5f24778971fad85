//! # GroupCodeRepository
//!
//! グループコードの永続化を担当するリポジトリ。
//! 削除すると配下のコードも `ON DELETE CASCADE` で削除される。

use applydesk_domain::{
   code::{GroupCode, GroupCodeFilter, GroupCodeId, GroupCodeSortField},
   pagination::SortOrder,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::paging::{PagedRepository, push_limit_offset, push_order_by, push_search};
use crate::error::InfraError;

/// グループコードリポジトリトレイト
#[async_trait]
pub trait GroupCodeRepository:
   PagedRepository<Item = GroupCode, Filter = GroupCodeFilter, SortField = GroupCodeSortField>
{
   async fn find_by_id(&self, id: &GroupCodeId) -> Result<Option<GroupCode>, InfraError>;

   async fn insert(&self, group_code: &GroupCode) -> Result<(), InfraError>;

   /// 対象行が存在しない場合は `false`
   async fn update(&self, group_code: &GroupCode) -> Result<bool, InfraError>;

   /// 対象行が存在しない場合は `false`
   async fn delete(&self, id: &GroupCodeId) -> Result<bool, InfraError>;
}

const SELECT_COLUMNS: &str = "SELECT id, code, name, created_at, updated_at FROM group_codes";

#[derive(sqlx::FromRow)]
struct GroupCodeRow {
   id:         Uuid,
   code:       String,
   name:       String,
   created_at: DateTime<Utc>,
   updated_at: DateTime<Utc>,
}

impl From<GroupCodeRow> for GroupCode {
   fn from(row: GroupCodeRow) -> Self {
      GroupCode {
         id:         GroupCodeId::from_uuid(row.id),
         code:       row.code,
         name:       row.name,
         created_at: row.created_at,
         updated_at: row.updated_at,
      }
   }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &GroupCodeFilter) {
   if let Some(search) = &filter.search {
      push_search(qb, &["code", "name"], search);
   }
}

/// PostgreSQL 実装の GroupCodeRepository
#[derive(Debug, Clone)]
pub struct PostgresGroupCodeRepository {
   pool: PgPool,
}

impl PostgresGroupCodeRepository {
   pub fn new(pool: PgPool) -> Self {
      Self { pool }
   }
}

#[async_trait]
impl PagedRepository for PostgresGroupCodeRepository {
   type Item = GroupCode;
   type Filter = GroupCodeFilter;
   type SortField = GroupCodeSortField;

   #[tracing::instrument(skip_all, level = "debug")]
   async fn count(&self, filter: &GroupCodeFilter) -> Result<i64, InfraError> {
      let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM group_codes WHERE TRUE");
      push_filters(&mut qb, filter);

      let (count,): (i64,) = qb.build_query_as().fetch_one(&self.pool).await?;
      Ok(count)
   }

   #[tracing::instrument(skip_all, level = "debug", fields(skip, take))]
   async fn find_many(
      &self,
      filter: &GroupCodeFilter,
      order: &[SortOrder<GroupCodeSortField>],
      skip: i64,
      take: i64,
   ) -> Result<Vec<GroupCode>, InfraError> {
      let mut qb = QueryBuilder::new(SELECT_COLUMNS);
      qb.push(" WHERE TRUE");
      push_filters(&mut qb, filter);
      push_order_by(&mut qb, order);
      push_limit_offset(&mut qb, skip, take);

      let rows: Vec<GroupCodeRow> = qb.build_query_as().fetch_all(&self.pool).await?;
      Ok(rows.into_iter().map(GroupCode::from).collect())
   }
}

#[async_trait]
impl GroupCodeRepository for PostgresGroupCodeRepository {
   #[tracing::instrument(skip_all, level = "debug", fields(%id))]
   async fn find_by_id(&self, id: &GroupCodeId) -> Result<Option<GroupCode>, InfraError> {
      let sql = format!("{SELECT_COLUMNS} WHERE id = $1");
      let row: Option<GroupCodeRow> = sqlx::query_as(&sql)
         .bind(id.as_uuid())
         .fetch_optional(&self.pool)
         .await?;

      Ok(row.map(GroupCode::from))
   }

   #[tracing::instrument(skip_all, level = "debug", fields(id = %group_code.id))]
   async fn insert(&self, group_code: &GroupCode) -> Result<(), InfraError> {
      sqlx::query(
         r#"
            INSERT INTO group_codes (id, code, name, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
      )
      .bind(group_code.id.as_uuid())
      .bind(&group_code.code)
      .bind(&group_code.name)
      .bind(group_code.created_at)
      .bind(group_code.updated_at)
      .execute(&self.pool)
      .await?;

      Ok(())
   }

   #[tracing::instrument(skip_all, level = "debug", fields(id = %group_code.id))]
   async fn update(&self, group_code: &GroupCode) -> Result<bool, InfraError> {
      let result = sqlx::query(
         "UPDATE group_codes SET code = $2, name = $3, updated_at = $4 WHERE id = $1",
      )
      .bind(group_code.id.as_uuid())
      .bind(&group_code.code)
      .bind(&group_code.name)
      .bind(group_code.updated_at)
      .execute(&self.pool)
      .await?;

      Ok(result.rows_affected() > 0)
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%id))]
   async fn delete(&self, id: &GroupCodeId) -> Result<bool, InfraError> {
      let result = sqlx::query("DELETE FROM group_codes WHERE id = $1")
         .bind(id.as_uuid())
         .execute(&self.pool)
         .await?;

      Ok(result.rows_affected() > 0)
   }
}
