//! # カーソルページ
//!
//! カーソルベースのページネーション結果。コメントスレッドの取得で使用する。

/// カーソルベースのページ
///
/// - `items`: 新しい順に並んだ要素
/// - `next_cursor`: このページ最後の要素の識別子（空ページなら `None`）
/// - `has_more`: 最後の要素より古い未取得の要素が存在するか
///
/// JSON 形式はエンドポイントごとに異なる（例: `comments` キー）ため、
/// この型自体はシリアライズせず、ハンドラで DTO に詰め替える。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorPage<T> {
   pub items:       Vec<T>,
   pub next_cursor: Option<String>,
   pub has_more:    bool,
}

impl<T> CursorPage<T> {
   /// 空のページ
   pub fn empty() -> Self {
      Self {
         items:       Vec::new(),
         next_cursor: None,
         has_more:    false,
      }
   }

   /// 要素を変換する（カーソル情報はそのまま引き継ぐ）
   pub fn map<U>(self, f: impl FnMut(T) -> U) -> CursorPage<U> {
      CursorPage {
         items:       self.items.into_iter().map(f).collect(),
         next_cursor: self.next_cursor,
         has_more:    self.has_more,
      }
   }
}
