//! ソート指定とホワイトリストによる解決

use std::str::FromStr;

/// ソート方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum SortDirection {
   Asc,
   Desc,
}

impl SortDirection {
   /// `descending` フラグから方向を決める
   pub fn from_descending(descending: bool) -> Self {
      if descending { Self::Desc } else { Self::Asc }
   }

   /// SQL の `ORDER BY` 句に埋め込むキーワード
   pub fn as_sql(self) -> &'static str {
      match self {
         Self::Asc => "ASC",
         Self::Desc => "DESC",
      }
   }
}

/// クライアントから受け取ったソート指定（未検証）
///
/// `field` はリクエストに含まれていた文字列そのまま。
/// ホワイトリストで [`SortOrder`] に解決されるまで信用しない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
   pub field:      String,
   pub descending: bool,
}

impl SortKey {
   pub fn new(field: impl Into<String>, descending: bool) -> Self {
      Self {
         field: field.into(),
         descending,
      }
   }
}

/// 解決済みのソート指定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder<F> {
   pub field:     F,
   pub direction: SortDirection,
}

impl<F> SortOrder<F> {
   pub fn asc(field: F) -> Self {
      Self {
         field,
         direction: SortDirection::Asc,
      }
   }

   pub fn desc(field: F) -> Self {
      Self {
         field,
         direction: SortDirection::Desc,
      }
   }
}

/// ソート可能なフィールドのホワイトリスト
///
/// リソースごとに列挙型で実装する。`FromStr` はクライアントが使う
/// フィールド名（例: `createdAt`）からの変換、[`column`](SortField::column)
/// は対応する DB カラム名を返す。カラム名は常に固定の `&'static str` であり、
/// クライアント入力が SQL に混入することはない。
pub trait SortField: Copy + Eq + FromStr + Send + Sync + 'static {
   /// 対応する DB カラム名
   fn column(self) -> &'static str;

   /// ソート指定が空のときに使う既定の並び順
   fn default_order() -> Vec<SortOrder<Self>>;
}

/// ソート指定をホワイトリストで解決する
///
/// - ホワイトリストにないフィールドは黙って捨てる（エラーにしない）
/// - 同じフィールドが複数回指定された場合は最初の指定だけを使う
/// - 指定順を優先順位として保持する（先頭が第 1 ソートキー）
/// - 結果が空なら [`SortField::default_order`] を返す
pub fn resolve_sort<F: SortField>(keys: &[SortKey]) -> Vec<SortOrder<F>> {
   let mut resolved: Vec<SortOrder<F>> = Vec::with_capacity(keys.len());

   for key in keys {
      let Ok(field) = key.field.parse::<F>() else {
         continue;
      };
      if resolved.iter().any(|o| o.field == field) {
         continue;
      }
      resolved.push(SortOrder {
         field,
         direction: SortDirection::from_descending(key.descending),
      });
   }

   if resolved.is_empty() {
      return F::default_order();
   }
   resolved
}
