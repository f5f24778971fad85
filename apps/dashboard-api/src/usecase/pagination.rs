//! # オフセットページネーション
//!
//! 一覧系リソース（管理者・求職者・グループコード・コード・サイドバー）が共有する取得処理。
//!
//! 1. ソート指定をリソースのホワイトリストで解決する
//! 2. 絞り込み条件に一致する件数を取得する
//! 3. `skip = (page - 1) * size`, `take = size` でページを取得する
//!
//! 件数取得とページ取得は同一トランザクションではない。間に行が追加・削除されると
//! `total` が実際のページ内容と 1 件ずれることがあるが、一覧表示の用途では許容する。

use applydesk_domain::pagination::{PageRequest, SortKey, resolve_sort};
use applydesk_infra::repository::PagedRepository;
use applydesk_shared::{PaginatedResponse, PaginationMeta};

use crate::error::CoreError;

/// 1 ページ分を取得してページ情報と組み合わせる
///
/// 最終ページを超えた `page` を指定した場合は `data` が空になり、
/// `meta.total` は実際の件数を返す（エラーにはしない）。
#[tracing::instrument(skip_all, level = "debug", fields(page = request.page(), size = request.size()))]
pub async fn paginate<R>(
   repository: &R,
   filter: &R::Filter,
   request: PageRequest,
   sort: &[SortKey],
) -> Result<PaginatedResponse<R::Item>, CoreError>
where
   R: PagedRepository + ?Sized,
{
   let order = resolve_sort::<R::SortField>(sort);
   let skip = i64::try_from(request.offset()).unwrap_or(i64::MAX);
   let take = i64::try_from(request.limit()).unwrap_or(i64::MAX);

   let total = repository.count(filter).await?;
   let data = repository.find_many(filter, &order, skip, take).await?;

   Ok(PaginatedResponse {
      data,
      meta: PaginationMeta::new(
         request.page(),
         request.size(),
         u64::try_from(total).unwrap_or(0),
      ),
   })
}
