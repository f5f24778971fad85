//! # サイドバー
//!
//! ダッシュボードのナビゲーション項目。

use chrono::{DateTime, Utc};

use crate::{
   DomainError,
   pagination::{SortField, SortOrder},
};

define_uuid_id! {
   /// サイドバー項目の一意識別子
   pub struct SidebarId;
}

/// 遷移先パスの最大長（`sidebars.path` のカラム長）
const SIDEBAR_PATH_MAX_LENGTH: usize = 255;

define_validated_string! {
   /// サイドバーの表示ラベル
   pub struct SidebarLabel {
      label: "ラベル",
      max_length: 100,
   }
}

/// サイドバーの遷移先パス
///
/// `/` から始まるアプリ内パスのみ受け付ける。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarPath(String);

impl SidebarPath {
   pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
      let value = value.into().trim().to_string();

      if !value.starts_with('/') {
         return Err(DomainError::Validation(
            "パスは / から始まる必要があります".to_string(),
         ));
      }

      if value.chars().count() > SIDEBAR_PATH_MAX_LENGTH {
         return Err(DomainError::Validation(format!(
            "パスは{SIDEBAR_PATH_MAX_LENGTH}文字以内である必要があります"
         )));
      }

      Ok(Self(value))
   }

   pub fn as_str(&self) -> &str {
      &self.0
   }

   pub fn into_string(self) -> String {
      self.0
   }
}

/// サイドバー項目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sidebar {
   pub id:         SidebarId,
   pub label:      String,
   /// 遷移先のパス（例: `/applicants`）
   pub path:       String,
   pub position:   i32,
   pub created_at: DateTime<Utc>,
   pub updated_at: DateTime<Utc>,
}

/// サイドバー項目の作成・更新内容
#[derive(Debug, Clone)]
pub struct SidebarDraft {
   pub label:    SidebarLabel,
   pub path:     SidebarPath,
   pub position: i32,
}

impl Sidebar {
   pub fn new(id: SidebarId, draft: SidebarDraft, now: DateTime<Utc>) -> Self {
      Self {
         id,
         label: draft.label.into_string(),
         path: draft.path.into_string(),
         position: draft.position,
         created_at: now,
         updated_at: now,
      }
   }

   pub fn apply(self, draft: SidebarDraft, now: DateTime<Utc>) -> Self {
      Self {
         label: draft.label.into_string(),
         path: draft.path.into_string(),
         position: draft.position,
         updated_at: now,
         ..self
      }
   }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString)]
#[strum(serialize_all = "camelCase")]
pub enum SidebarSortField {
   Label,
   Position,
   CreatedAt,
}

impl SortField for SidebarSortField {
   fn column(self) -> &'static str {
      match self {
         Self::Label => "label",
         Self::Position => "position",
         Self::CreatedAt => "created_at",
      }
   }

   fn default_order() -> Vec<SortOrder<Self>> {
      vec![SortOrder::asc(Self::Position)]
   }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SidebarFilter {
   /// ラベル・パスの部分一致
   pub search: Option<String>,
}
