//! # 一覧取得の共通部品
//!
//! - [`PagedRepository`]: 件数取得とページ取得の能力
//! - 動的 SQL の組み立て（絞り込み・並び順・LIMIT/OFFSET）
//!
//! 並び順のカラム名は [`SortField::column`] が返す固定文字列だけを使う。
//! クライアント入力は検索語も含めてすべてバインド変数で渡す。

use applydesk_domain::pagination::{SortField, SortOrder};
use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};

use crate::error::InfraError;

/// 一覧系リソースの取得能力
///
/// ページネーションエンジンは件数取得 → ページ取得の順に呼び出す。
/// 2 つの読み取りは同一トランザクションではないため、間に挿入された行で
/// `count` が 1 件ずれることがある。
#[async_trait]
pub trait PagedRepository: Send + Sync {
   type Item: Send;
   type Filter: Send + Sync;
   type SortField: SortField;

   /// 絞り込み条件に一致する件数
   async fn count(&self, filter: &Self::Filter) -> Result<i64, InfraError>;

   /// 絞り込み条件に一致する行を `order` の順に `skip` 件読み飛ばして最大 `take` 件取得する
   ///
   /// `order` の後ろには主キーの昇順が暗黙に追加され、同値の行でも順序が安定する。
   async fn find_many(
      &self,
      filter: &Self::Filter,
      order: &[SortOrder<Self::SortField>],
      skip: i64,
      take: i64,
   ) -> Result<Vec<Self::Item>, InfraError>;
}

/// LIKE のメタ文字（`\`, `%`, `_`）をエスケープする
pub(crate) fn escape_like(term: &str) -> String {
   let mut escaped = String::with_capacity(term.len());
   for c in term.chars() {
      if matches!(c, '\\' | '%' | '_') {
         escaped.push('\\');
      }
      escaped.push(c);
   }
   escaped
}

/// `AND (col1 ILIKE $n OR col2 ILIKE $m ...)` を追加する
pub(crate) fn push_search(
   qb: &mut QueryBuilder<'_, Postgres>,
   columns: &[&'static str],
   term: &str,
) {
   let pattern = format!("%{}%", escape_like(term));

   qb.push(" AND (");
   let mut separated = qb.separated(" OR ");
   for column in columns {
      separated.push(format!("{column} ILIKE "));
      separated.push_bind_unseparated(pattern.clone());
   }
   separated.push_unseparated(")");
}

/// `ORDER BY ..., id ASC` を追加する
pub(crate) fn push_order_by<F: SortField>(
   qb: &mut QueryBuilder<'_, Postgres>,
   order: &[SortOrder<F>],
) {
   qb.push(" ORDER BY ");
   for o in order {
      qb.push(o.field.column())
         .push(" ")
         .push(o.direction.as_sql())
         .push(", ");
   }
   qb.push("id ASC");
}

/// `LIMIT $n OFFSET $m` を追加する
pub(crate) fn push_limit_offset(qb: &mut QueryBuilder<'_, Postgres>, skip: i64, take: i64) {
   qb.push(" LIMIT ")
      .push_bind(take)
      .push(" OFFSET ")
      .push_bind(skip);
}

#[cfg(test)]
mod tests {
   use applydesk_domain::{
      applicant::ApplicantSortField,
      pagination::{SortKey, resolve_sort},
   };
   use pretty_assertions::assert_eq;
   use rstest::rstest;

   use super::*;

   #[rstest]
   #[case("yamada", "yamada")]
   #[case("100%", "100\\%")]
   #[case("a_b", "a\\_b")]
   #[case("c:\\tmp", "c:\\\\tmp")]
   fn test_likeのメタ文字をエスケープする(#[case] input: &str, #[case] expected: &str) {
      assert_eq!(escape_like(input), expected);
   }

   #[test]
   fn test_検索条件は列ごとにバインド変数になる() {
      let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM applicants WHERE TRUE");

      push_search(&mut qb, &["name", "email"], "'; DROP TABLE applicants; --");

      assert_eq!(
         qb.sql(),
         "SELECT * FROM applicants WHERE TRUE AND (name ILIKE $1 OR email ILIKE $2)"
      );
   }

   #[test]
   fn test_並び順の末尾に主キーが追加される() {
      let order = resolve_sort::<ApplicantSortField>(&[
         SortKey::new("status", false),
         SortKey::new("createdAt", true),
      ]);
      let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM applicants");

      push_order_by(&mut qb, &order);

      assert_eq!(
         qb.sql(),
         "SELECT * FROM applicants ORDER BY status ASC, created_at DESC, id ASC"
      );
   }

   #[test]
   fn test_既定の並び順でも主キーが追加される() {
      let order = resolve_sort::<ApplicantSortField>(&[]);
      let mut qb = QueryBuilder::<Postgres>::new("");

      push_order_by(&mut qb, &order);
      push_limit_offset(&mut qb, 20, 10);

      assert_eq!(
         qb.sql(),
         " ORDER BY created_at DESC, id ASC LIMIT $1 OFFSET $2"
      );
   }
}
