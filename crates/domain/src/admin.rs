//! # 管理者
//!
//! ダッシュボードにログインするエージェンシーのスタッフ。
//! 作成・更新は認証基盤側で行い、このサービスは参照のみを行う。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::{
   DomainError,
   pagination::{SortField, SortOrder},
};

define_uuid_id! {
   /// 管理者の一意識別子
   pub struct AdminId;
}

/// 管理者のロール
#[derive(
   Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AdminRole {
   SuperAdmin,
   Admin,
   Staff,
}

impl std::str::FromStr for AdminRole {
   type Err = DomainError;

   fn from_str(s: &str) -> Result<Self, Self::Err> {
      match s {
         "super_admin" => Ok(Self::SuperAdmin),
         "admin" => Ok(Self::Admin),
         "staff" => Ok(Self::Staff),
         _ => Err(DomainError::Validation(format!(
            "不正な管理者ロール: {s}"
         ))),
      }
   }
}

/// 管理者（参照専用）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admin {
   pub id:         AdminId,
   pub name:       String,
   pub email:      String,
   pub role:       AdminRole,
   pub created_at: DateTime<Utc>,
   pub updated_at: DateTime<Utc>,
}

/// 管理者一覧のソート可能フィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString)]
#[strum(serialize_all = "camelCase")]
pub enum AdminSortField {
   Name,
   Email,
   CreatedAt,
}

impl SortField for AdminSortField {
   fn column(self) -> &'static str {
      match self {
         Self::Name => "name",
         Self::Email => "email",
         Self::CreatedAt => "created_at",
      }
   }

   fn default_order() -> Vec<SortOrder<Self>> {
      vec![SortOrder::desc(Self::CreatedAt)]
   }
}

/// 管理者一覧の絞り込み条件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminFilter {
   /// 名前・メールアドレスの部分一致
   pub search: Option<String>,
   pub role:   Option<AdminRole>,
}
