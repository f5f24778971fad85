//! # SidebarRepository
//!
//! サイドバー項目の永続化を担当するリポジトリ。

use applydesk_domain::{
   pagination::SortOrder,
   sidebar::{Sidebar, SidebarFilter, SidebarId, SidebarSortField},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::paging::{PagedRepository, push_limit_offset, push_order_by, push_search};
use crate::error::InfraError;

/// サイドバーリポジトリトレイト
#[async_trait]
pub trait SidebarRepository:
   PagedRepository<Item = Sidebar, Filter = SidebarFilter, SortField = SidebarSortField>
{
   async fn find_by_id(&self, id: &SidebarId) -> Result<Option<Sidebar>, InfraError>;

   async fn insert(&self, sidebar: &Sidebar) -> Result<(), InfraError>;

   /// 対象行が存在しない場合は `false`
   async fn update(&self, sidebar: &Sidebar) -> Result<bool, InfraError>;

   /// 対象行が存在しない場合は `false`
   async fn delete(&self, id: &SidebarId) -> Result<bool, InfraError>;
}

const SELECT_COLUMNS: &str =
   "SELECT id, label, path, position, created_at, updated_at FROM sidebars";

#[derive(sqlx::FromRow)]
struct SidebarRow {
   id:         Uuid,
   label:      String,
   path:       String,
   position:   i32,
   created_at: DateTime<Utc>,
   updated_at: DateTime<Utc>,
}

impl From<SidebarRow> for Sidebar {
   fn from(row: SidebarRow) -> Self {
      Sidebar {
         id:         SidebarId::from_uuid(row.id),
         label:      row.label,
         path:       row.path,
         position:   row.position,
         created_at: row.created_at,
         updated_at: row.updated_at,
      }
   }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &SidebarFilter) {
   if let Some(search) = &filter.search {
      push_search(qb, &["label", "path"], search);
   }
}

/// PostgreSQL 実装の SidebarRepository
#[derive(Debug, Clone)]
pub struct PostgresSidebarRepository {
   pool: PgPool,
}

impl PostgresSidebarRepository {
   pub fn new(pool: PgPool) -> Self {
      Self { pool }
   }
}

#[async_trait]
impl PagedRepository for PostgresSidebarRepository {
   type Item = Sidebar;
   type Filter = SidebarFilter;
   type SortField = SidebarSortField;

   #[tracing::instrument(skip_all, level = "debug")]
   async fn count(&self, filter: &SidebarFilter) -> Result<i64, InfraError> {
      let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM sidebars WHERE TRUE");
      push_filters(&mut qb, filter);

      let (count,): (i64,) = qb.build_query_as().fetch_one(&self.pool).await?;
      Ok(count)
   }

   #[tracing::instrument(skip_all, level = "debug", fields(skip, take))]
   async fn find_many(
      &self,
      filter: &SidebarFilter,
      order: &[SortOrder<SidebarSortField>],
      skip: i64,
      take: i64,
   ) -> Result<Vec<Sidebar>, InfraError> {
      let mut qb = QueryBuilder::new(SELECT_COLUMNS);
      qb.push(" WHERE TRUE");
      push_filters(&mut qb, filter);
      push_order_by(&mut qb, order);
      push_limit_offset(&mut qb, skip, take);

      let rows: Vec<SidebarRow> = qb.build_query_as().fetch_all(&self.pool).await?;
      Ok(rows.into_iter().map(Sidebar::from).collect())
   }
}

#[async_trait]
impl SidebarRepository for PostgresSidebarRepository {
   #[tracing::instrument(skip_all, level = "debug", fields(%id))]
   async fn find_by_id(&self, id: &SidebarId) -> Result<Option<Sidebar>, InfraError> {
      let sql = format!("{SELECT_COLUMNS} WHERE id = $1");
      let row: Option<SidebarRow> = sqlx::query_as(&sql)
         .bind(id.as_uuid())
         .fetch_optional(&self.pool)
         .await?;

      Ok(row.map(Sidebar::from))
   }

   #[tracing::instrument(skip_all, level = "debug", fields(id = %sidebar.id))]
   async fn insert(&self, sidebar: &Sidebar) -> Result<(), InfraError> {
      sqlx::query(
         r#"
            INSERT INTO sidebars (id, label, path, position, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
      )
      .bind(sidebar.id.as_uuid())
      .bind(&sidebar.label)
      .bind(&sidebar.path)
      .bind(sidebar.position)
      .bind(sidebar.created_at)
      .bind(sidebar.updated_at)
      .execute(&self.pool)
      .await?;

      Ok(())
   }

   #[tracing::instrument(skip_all, level = "debug", fields(id = %sidebar.id))]
   async fn update(&self, sidebar: &Sidebar) -> Result<bool, InfraError> {
      let result = sqlx::query(
         "UPDATE sidebars SET label = $2, path = $3, position = $4, updated_at = $5 WHERE id = $1",
      )
      .bind(sidebar.id.as_uuid())
      .bind(&sidebar.label)
      .bind(&sidebar.path)
      .bind(sidebar.position)
      .bind(sidebar.updated_at)
      .execute(&self.pool)
      .await?;

      Ok(result.rows_affected() > 0)
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%id))]
   async fn delete(&self, id: &SidebarId) -> Result<bool, InfraError> {
      let result = sqlx::query("DELETE FROM sidebars WHERE id = $1")
         .bind(id.as_uuid())
         .execute(&self.pool)
         .await?;

      Ok(result.rows_affected() > 0)
   }
}
