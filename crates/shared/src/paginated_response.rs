//! # ページネーション付きレスポンス
//!
//! オフセットベース（page / size）のページネーションに対応した API レスポンス型。

use serde::{Deserialize, Serialize};

/// ページネーション付きレスポンス
///
/// `ApiResponse<T>` が単一データ用であるのに対し、
/// `PaginatedResponse<T>` はリスト + ページ情報の形式。
///
/// ## JSON 形式
///
/// ```json
/// {
///   "data": [...],
///   "meta": { "page": 1, "size": 10, "total": 25, "totalPages": 3 }
/// }
/// ```
///
/// `data` の件数は常に `meta.size` 以下。最終ページを超えたページを要求した場合は
/// `data` が空配列になり、`meta.total` は実際の件数を示す。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
   pub data: Vec<T>,
   pub meta: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
   /// 要素を変換する（ページ情報はそのまま引き継ぐ）
   ///
   /// エンティティから DTO への変換に使う。
   pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResponse<U> {
      PaginatedResponse {
         data: self.data.into_iter().map(f).collect(),
         meta: self.meta,
      }
   }
}

/// ページ情報
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
   pub page:        u32,
   pub size:        u32,
   pub total:       u64,
   pub total_pages: u64,
}

impl PaginationMeta {
   /// ページ情報を作成する
   ///
   /// `total_pages` は `ceil(total / size)` で算出する。
   pub fn new(page: u32, size: u32, total: u64) -> Self {
      let total_pages = if size == 0 {
         0
      } else {
         total.div_ceil(u64::from(size))
      };

      Self {
         page,
         size,
         total,
         total_pages,
      }
   }
}
