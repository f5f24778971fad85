//! # AdminRepository
//!
//! 管理者一覧の参照を担当するリポジトリ。

use applydesk_domain::{
   admin::{Admin, AdminFilter, AdminId, AdminRole, AdminSortField},
   pagination::SortOrder,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::paging::{PagedRepository, push_limit_offset, push_order_by, push_search};
use crate::error::InfraError;

/// 管理者リポジトリトレイト
pub trait AdminRepository:
   PagedRepository<Item = Admin, Filter = AdminFilter, SortField = AdminSortField>
{
}

impl<T> AdminRepository for T where
   T: PagedRepository<Item = Admin, Filter = AdminFilter, SortField = AdminSortField>
{
}

/// DB の admins テーブルの行を表す中間構造体
#[derive(sqlx::FromRow)]
struct AdminRow {
   id:         Uuid,
   name:       String,
   email:      String,
   role:       String,
   created_at: DateTime<Utc>,
   updated_at: DateTime<Utc>,
}

impl TryFrom<AdminRow> for Admin {
   type Error = InfraError;

   fn try_from(row: AdminRow) -> Result<Self, Self::Error> {
      Ok(Admin {
         id:         AdminId::from_uuid(row.id),
         name:       row.name,
         email:      row.email,
         role:       row
            .role
            .parse::<AdminRole>()
            .map_err(|e| InfraError::unexpected(e.to_string()))?,
         created_at: row.created_at,
         updated_at: row.updated_at,
      })
   }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &AdminFilter) {
   if let Some(search) = &filter.search {
      push_search(qb, &["name", "email"], search);
   }
   if let Some(role) = filter.role {
      let role: &'static str = role.into();
      qb.push(" AND role = ").push_bind(role);
   }
}

/// PostgreSQL 実装の AdminRepository
#[derive(Debug, Clone)]
pub struct PostgresAdminRepository {
   pool: PgPool,
}

impl PostgresAdminRepository {
   pub fn new(pool: PgPool) -> Self {
      Self { pool }
   }
}

#[async_trait]
impl PagedRepository for PostgresAdminRepository {
   type Item = Admin;
   type Filter = AdminFilter;
   type SortField = AdminSortField;

   #[tracing::instrument(skip_all, level = "debug")]
   async fn count(&self, filter: &AdminFilter) -> Result<i64, InfraError> {
      let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM admins WHERE TRUE");
      push_filters(&mut qb, filter);

      let (count,): (i64,) = qb.build_query_as().fetch_one(&self.pool).await?;
      Ok(count)
   }

   #[tracing::instrument(skip_all, level = "debug", fields(skip, take))]
   async fn find_many(
      &self,
      filter: &AdminFilter,
      order: &[SortOrder<AdminSortField>],
      skip: i64,
      take: i64,
   ) -> Result<Vec<Admin>, InfraError> {
      let mut qb = QueryBuilder::new(
         "SELECT id, name, email, role, created_at, updated_at FROM admins WHERE TRUE",
      );
      push_filters(&mut qb, filter);
      push_order_by(&mut qb, order);
      push_limit_offset(&mut qb, skip, take);

      let rows: Vec<AdminRow> = qb.build_query_as().fetch_all(&self.pool).await?;
      rows.into_iter().map(Admin::try_from).collect()
   }
}
