//! # 一覧クエリパラメータの解析
//!
//! 一覧系エンドポイントのクエリ文字列を型付きの値に正規化する。
//! 解析は失敗しない。不正な値は既定値に置き換え、リクエストはそのまま処理する。
//!
//! ## 対応する形式
//!
//! ```text
//! ?page=2&size=20&search=nguyen
//! ?sort=name&order=asc&sort=createdAt&order=desc
//! ?sort=[{"id":"createdAt","desc":true}]
//! ```
//!
//! フィールド名の `sort` トークンと `order` トークンは出現順で対応付ける。対応する `order` がない、
//! または `desc` 以外の値なら昇順。`[` で始まる `sort` は JSON 配列として解釈し、
//! 解釈できなければソート指定なし（リソースの既定の並び順）として扱う。

use applydesk_domain::pagination::{
   CursorRequest,
   DEFAULT_CURSOR_LIMIT,
   DEFAULT_PAGE_SIZE,
   PageRequest,
   SortKey,
};
use serde::Deserialize;

/// 解析済みの一覧クエリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
   page:   PageRequest,
   sort:   Vec<SortKey>,
   search: Option<String>,
   params: Vec<(String, String)>,
}

/// JSON 形式のソート指定の要素
#[derive(Debug, Deserialize)]
struct SortParam {
   id:   String,
   #[serde(default)]
   desc: bool,
}

impl ListQuery {
   /// クエリパラメータを解析する
   ///
   /// `params` は出現順を保ったキーと値の組（同じキーの繰り返しを含む）。
   pub fn parse(params: Vec<(String, String)>) -> Self {
      let page = PageRequest::new(
         parse_positive(first(&params, "page"), 1),
         parse_positive(first(&params, "size"), DEFAULT_PAGE_SIZE),
      );
      let sort = parse_sort(&params);
      let search = first(&params, "search").map(str::to_string);

      Self {
         page,
         sort,
         search,
         params,
      }
   }

   pub fn page(&self) -> PageRequest {
      self.page
   }

   pub fn sort(&self) -> &[SortKey] {
      &self.sort
   }

   /// 検索語（前後の空白を除去、空なら `None`）
   pub fn search(&self) -> Option<String> {
      self.search.clone()
   }

   /// リソース固有の絞り込みパラメータを取得する
   pub fn get(&self, key: &str) -> Option<&str> {
      first(&self.params, key)
   }

   /// リソース固有の絞り込みパラメータを解析する
   ///
   /// 解析できない値は未指定として扱う。
   pub fn parse_filter<T: std::str::FromStr>(&self, key: &str) -> Option<T> {
      let value = self.get(key)?;
      match value.parse() {
         Ok(parsed) => Some(parsed),
         Err(_) => {
            tracing::debug!(key, value, "解釈できない絞り込み条件を無視します");
            None
         }
      }
   }
}

/// コメント一覧のクエリ（`limit`, `cursor`）を解析する
pub fn parse_cursor_request(params: &[(String, String)]) -> CursorRequest {
   CursorRequest::new(
      parse_positive(first(params, "limit"), DEFAULT_CURSOR_LIMIT),
      first(params, "cursor").map(str::to_string),
   )
}

/// キーに対応する最初の空でない値（前後の空白を除去）
fn first<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
   params
      .iter()
      .filter(|(k, _)| k == key)
      .map(|(_, v)| v.trim())
      .find(|v| !v.is_empty())
}

/// 正の整数として解析する。数値でない・0 以下なら `default`
fn parse_positive(value: Option<&str>, default: u32) -> u32 {
   value
      .and_then(|v| v.parse::<u32>().ok())
      .filter(|v| *v > 0)
      .unwrap_or(default)
}

fn parse_sort(params: &[(String, String)]) -> Vec<SortKey> {
   let mut orders = params
      .iter()
      .filter(|(k, _)| k == "order")
      .map(|(_, v)| v.trim());

   // `order` はフィールド名トークンにだけ対応付ける（JSON 形式・空の `sort` は消費しない）
   params
      .iter()
      .filter(|(k, _)| k == "sort")
      .map(|(_, v)| v.trim())
      .flat_map(|value| {
         if value.starts_with('[') {
            parse_sort_json(value)
         } else if value.is_empty() {
            Vec::new()
         } else {
            let descending = orders
               .next()
               .is_some_and(|o| o.eq_ignore_ascii_case("desc"));
            vec![SortKey::new(value, descending)]
         }
      })
      .collect()
}

fn parse_sort_json(value: &str) -> Vec<SortKey> {
   match serde_json::from_str::<Vec<SortParam>>(value) {
      Ok(params) => params
         .into_iter()
         .map(|p| SortKey::new(p.id, p.desc))
         .collect(),
      Err(e) => {
         tracing::warn!(error = %e, sort = value, "sort パラメータを解釈できないため既定の並び順を使います");
         Vec::new()
      }
   }
}
