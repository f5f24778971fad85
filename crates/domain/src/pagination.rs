//! # ページネーション
//!
//! 一覧 API が共有するページ要求・ソート指定・カーソル要求の値オブジェクト。
//!
//! ## 2 種類のページネーション
//!
//! - **オフセット方式**（管理者・求職者・コード・グループコード・サイドバー・アラート）:
//!   [`PageRequest`] の page / size から skip / take を算出する
//! - **カーソル方式**（コメントスレッド）: [`CursorRequest`] の cursor
//!   （最後に見たコメントの ID）以降を取得する
//!
//! ソート指定はクライアント入力の [`SortKey`] をリソースごとのホワイトリスト
//! （[`SortField`] を実装した列挙型）で [`SortOrder`] に解決する。

mod cursor;
mod page_request;
mod sort;

pub use cursor::{CursorRequest, DEFAULT_CURSOR_LIMIT, MAX_CURSOR_LIMIT};
pub use page_request::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageRequest};
pub use sort::{SortDirection, SortField, SortKey, SortOrder, resolve_sort};
