//! # コードマスタ
//!
//! 画面のプルダウン等で使う区分値を、グループコードとコードの 2 階層で管理する。
//!
//! - グループコード: 区分の種類（例: `VISA_TYPE`, `NATIONALITY`）
//! - コード: グループに属する個々の値（例: `specified_skilled_worker`）
//!
//! コード値はグループ内で一意（DB の一意制約で担保）。グループを削除すると
//! 配下のコードも削除される。

use chrono::{DateTime, Utc};

use crate::pagination::{SortField, SortOrder};

define_uuid_id! {
   /// グループコードの一意識別子
   pub struct GroupCodeId;
}

define_uuid_id! {
   /// コードの一意識別子
   pub struct CodeId;
}

define_validated_string! {
   /// コード値（グループコード・コード共通）
   pub struct CodeKey {
      label: "コード",
      max_length: 50,
   }
}

define_validated_string! {
   /// グループコードの名称
   pub struct GroupCodeName {
      label: "グループ名",
      max_length: 100,
   }
}

define_validated_string! {
   /// コードの表示ラベル
   pub struct CodeLabel {
      label: "ラベル",
      max_length: 100,
   }
}

/// グループコード
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCode {
   pub id:         GroupCodeId,
   pub code:       String,
   pub name:       String,
   pub created_at: DateTime<Utc>,
   pub updated_at: DateTime<Utc>,
}

/// グループコードの作成・更新内容
#[derive(Debug, Clone)]
pub struct GroupCodeDraft {
   pub code: CodeKey,
   pub name: GroupCodeName,
}

impl GroupCode {
   pub fn new(id: GroupCodeId, draft: GroupCodeDraft, now: DateTime<Utc>) -> Self {
      Self {
         id,
         code: draft.code.into_string(),
         name: draft.name.into_string(),
         created_at: now,
         updated_at: now,
      }
   }

   /// 内容を置き換え、更新日時を進める
   pub fn apply(self, draft: GroupCodeDraft, now: DateTime<Utc>) -> Self {
      Self {
         code: draft.code.into_string(),
         name: draft.name.into_string(),
         updated_at: now,
         ..self
      }
   }
}

/// コード
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Code {
   pub id:            CodeId,
   pub group_code_id: GroupCodeId,
   pub code:          String,
   pub label:         String,
   pub sort_order:    i32,
   pub created_at:    DateTime<Utc>,
   pub updated_at:    DateTime<Utc>,
}

/// コードの作成・更新内容
#[derive(Debug, Clone)]
pub struct CodeDraft {
   pub group_code_id: GroupCodeId,
   pub code:          CodeKey,
   pub label:         CodeLabel,
   pub sort_order:    i32,
}

impl Code {
   pub fn new(id: CodeId, draft: CodeDraft, now: DateTime<Utc>) -> Self {
      Self {
         id,
         group_code_id: draft.group_code_id,
         code: draft.code.into_string(),
         label: draft.label.into_string(),
         sort_order: draft.sort_order,
         created_at: now,
         updated_at: now,
      }
   }

   pub fn apply(self, draft: CodeDraft, now: DateTime<Utc>) -> Self {
      Self {
         group_code_id: draft.group_code_id,
         code: draft.code.into_string(),
         label: draft.label.into_string(),
         sort_order: draft.sort_order,
         updated_at: now,
         ..self
      }
   }
}

/// グループコード一覧のソート可能フィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString)]
#[strum(serialize_all = "camelCase")]
pub enum GroupCodeSortField {
   Code,
   Name,
   CreatedAt,
}

impl SortField for GroupCodeSortField {
   fn column(self) -> &'static str {
      match self {
         Self::Code => "code",
         Self::Name => "name",
         Self::CreatedAt => "created_at",
      }
   }

   fn default_order() -> Vec<SortOrder<Self>> {
      vec![SortOrder::desc(Self::CreatedAt)]
   }
}

/// コード一覧のソート可能フィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString)]
#[strum(serialize_all = "camelCase")]
pub enum CodeSortField {
   Code,
   Label,
   SortOrder,
   CreatedAt,
}

impl SortField for CodeSortField {
   fn column(self) -> &'static str {
      match self {
         Self::Code => "code",
         Self::Label => "label",
         Self::SortOrder => "sort_order",
         Self::CreatedAt => "created_at",
      }
   }

   /// 表示順の昇順
   fn default_order() -> Vec<SortOrder<Self>> {
      vec![SortOrder::asc(Self::SortOrder)]
   }
}

/// グループコード一覧の絞り込み条件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupCodeFilter {
   /// コード・名称の部分一致
   pub search: Option<String>,
}

/// コード一覧の絞り込み条件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeFilter {
   /// コード・ラベルの部分一致
   pub search:        Option<String>,
   pub group_code_id: Option<GroupCodeId>,
}
