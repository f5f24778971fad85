//! カーソル方式のページ要求

/// 既定の取得件数
pub const DEFAULT_CURSOR_LIMIT: u32 = 10;

/// 取得件数の上限
pub const MAX_CURSOR_LIMIT: u32 = 100;

/// カーソル要求
///
/// `cursor` は直前のページで最後に返された要素の識別子（opaque な文字列）。
/// `None` は先頭ページを意味する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorRequest {
   limit:  u32,
   cursor: Option<String>,
}

impl CursorRequest {
   /// カーソル要求を作成する
   ///
   /// `limit == 0` は既定値、上限超過は上限に正規化する。
   /// 空文字列のカーソルは未指定として扱う。
   pub fn new(limit: u32, cursor: Option<String>) -> Self {
      let limit = match limit {
         0 => DEFAULT_CURSOR_LIMIT,
         l => l.min(MAX_CURSOR_LIMIT),
      };
      let cursor = cursor
         .map(|c| c.trim().to_string())
         .filter(|c| !c.is_empty());
      Self { limit, cursor }
   }

   pub fn limit(&self) -> u32 {
      self.limit
   }

   pub fn cursor(&self) -> Option<&str> {
      self.cursor.as_deref()
   }
}

impl Default for CursorRequest {
   fn default() -> Self {
      Self::new(DEFAULT_CURSOR_LIMIT, None)
   }
}
