//! テスト共通フィクスチャ
//!
//! DB を使用する統合テストで共通利用する固定日時・エンティティ生成ヘルパー。
//! Rust の統合テスト規約に従い `tests/common/mod.rs` に配置。

// 各テストファイルが独立したクレートとしてコンパイルされるため、
// 使用しない関数に dead_code 警告が出る。モジュール全体で抑制する。
#![allow(dead_code)]

use applydesk_domain::{
   admin::{AdminId, AdminRole},
   alert::{Alert, AlertId, AlertLevel, AlertMessage, AlertTitle, NewAlert},
   applicant::{Applicant, ApplicantId, NewApplicant},
   code::{
      Code,
      CodeDraft,
      CodeId,
      CodeKey,
      CodeLabel,
      GroupCode,
      GroupCodeDraft,
      GroupCodeId,
      GroupCodeName,
   },
   comment::{Comment, CommentBody, CommentId, NewComment},
   sidebar::{Sidebar, SidebarDraft, SidebarId, SidebarLabel, SidebarPath},
   value_objects::{Email, PersonName},
};
use applydesk_infra::repository::{ApplicantRepository, PostgresApplicantRepository};
use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// テスト用の固定日時
pub fn test_now() -> DateTime<Utc> {
   DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

/// `test_now()` から `minutes` 分後
pub fn minutes_later(minutes: i64) -> DateTime<Utc> {
   test_now() + Duration::minutes(minutes)
}

// =============================================================================
// エンティティ生成ヘルパー
// =============================================================================

/// `minutes` 分後に作成した求職者
pub fn create_test_applicant(name: &str, minutes: i64) -> Applicant {
   let local = name.to_lowercase().replace(' ', ".");
   Applicant::new(NewApplicant {
      id:          ApplicantId::new(),
      name:        PersonName::new(name).unwrap(),
      email:       Email::new(format!("{local}@example.com")).unwrap(),
      phone:       None,
      nationality: None,
      visa_type:   None,
      now:         minutes_later(minutes),
   })
}

/// コメントを作成する
///
/// `seq` は ID の UUID 値。同一時刻のコメントの順序を固定するために使う。
pub fn create_test_comment(
   applicant_id: &ApplicantId,
   author_id: &AdminId,
   seq: u128,
   created_at: DateTime<Utc>,
) -> Comment {
   Comment::new(NewComment {
      id:           CommentId::from_uuid(Uuid::from_u128(seq)),
      applicant_id: applicant_id.clone(),
      author_id:    author_id.clone(),
      body:         CommentBody::new(format!("コメント {seq}")).unwrap(),
      now:          created_at,
   })
}

pub fn create_test_group_code(code: &str) -> GroupCode {
   GroupCode::new(
      GroupCodeId::new(),
      GroupCodeDraft {
         code: CodeKey::new(code).unwrap(),
         name: GroupCodeName::new(format!("{code} の名称")).unwrap(),
      },
      test_now(),
   )
}

pub fn create_test_code(group_code_id: &GroupCodeId, code: &str, sort_order: i32) -> Code {
   Code::new(
      CodeId::new(),
      CodeDraft {
         group_code_id: group_code_id.clone(),
         code: CodeKey::new(code).unwrap(),
         label: CodeLabel::new(format!("{code} のラベル")).unwrap(),
         sort_order,
      },
      test_now(),
   )
}

pub fn create_test_sidebar(label: &str, path: &str, position: i32) -> Sidebar {
   Sidebar::new(
      SidebarId::new(),
      SidebarDraft {
         label: SidebarLabel::new(label).unwrap(),
         path: SidebarPath::new(path).unwrap(),
         position,
      },
      test_now(),
   )
}

/// `minutes` 分後に作成した未読のアラート
pub fn create_test_alert(
   applicant_id: Option<&ApplicantId>,
   level: AlertLevel,
   title: &str,
   minutes: i64,
) -> Alert {
   Alert::new(NewAlert {
      id:           AlertId::new(),
      applicant_id: applicant_id.cloned(),
      level,
      title:        AlertTitle::new(title).unwrap(),
      message:      AlertMessage::new(format!("{title} を確認してください")).unwrap(),
      now:          minutes_later(minutes),
   })
}

// =============================================================================
// DB セットアップヘルパー
// =============================================================================

/// 求職者を 1 名登録して返す
pub async fn setup_applicant(pool: &PgPool, name: &str) -> Applicant {
   let applicant = create_test_applicant(name, 0);
   PostgresApplicantRepository::new(pool.clone())
      .insert(&applicant)
      .await
      .unwrap();
   applicant
}

/// 管理者を登録する（リポジトリは参照専用のため SQL で直接挿入）
pub async fn insert_admin(pool: &PgPool, name: &str, role: AdminRole, minutes: i64) -> AdminId {
   let id = AdminId::new();
   let role: &'static str = role.into();
   sqlx::query(
      r#"
      INSERT INTO admins (id, name, email, role, created_at, updated_at)
      VALUES ($1, $2, $3, $4, $5, $5)
      "#,
   )
   .bind(id.as_uuid())
   .bind(name)
   .bind(format!("{}@example.com", name.to_lowercase()))
   .bind(role)
   .bind(minutes_later(minutes))
   .execute(pool)
   .await
   .unwrap();
   id
}
