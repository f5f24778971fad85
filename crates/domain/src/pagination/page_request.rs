//! オフセット方式のページ要求

/// 既定のページサイズ
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// ページサイズの上限
///
/// クライアントの指定に関わらず、1 リクエストで DB から読む件数をこの値で抑える。
pub const MAX_PAGE_SIZE: u32 = 100;

/// ページ要求
///
/// # 不変条件
///
/// - `page >= 1`（1 始まり）
/// - `1 <= size <= MAX_PAGE_SIZE`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
   page: u32,
   size: u32,
}

impl PageRequest {
   /// ページ要求を作成する
   ///
   /// 不正な値はエラーにせず正規化する:
   /// - `page == 0` → 1
   /// - `size == 0` → [`DEFAULT_PAGE_SIZE`]
   /// - `size > MAX_PAGE_SIZE` → [`MAX_PAGE_SIZE`]
   pub fn new(page: u32, size: u32) -> Self {
      let page = page.max(1);
      let size = match size {
         0 => DEFAULT_PAGE_SIZE,
         s => s.min(MAX_PAGE_SIZE),
      };
      Self { page, size }
   }

   pub fn page(&self) -> u32 {
      self.page
   }

   pub fn size(&self) -> u32 {
      self.size
   }

   /// 読み飛ばす件数（`(page - 1) * size`）
   pub fn offset(&self) -> u64 {
      u64::from(self.page - 1) * u64::from(self.size)
   }

   /// 取得する最大件数
   pub fn limit(&self) -> u64 {
      u64::from(self.size)
   }
}

impl Default for PageRequest {
   fn default() -> Self {
      Self::new(1, DEFAULT_PAGE_SIZE)
   }
}
