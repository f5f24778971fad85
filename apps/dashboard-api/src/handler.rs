//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! - 各ハンドラはサブモジュールに配置し、ここで re-export する
//! - ハンドラはクエリ・パス・ボディの解析と DTO 変換のみを行い、処理はユースケースに委譲する

pub mod admin;
pub mod alert;
pub mod applicant;
pub mod auth;
pub mod code;
pub mod comment;
pub mod document;
pub mod group_code;
pub mod health;
pub mod list_query;
mod path_id;
pub mod sidebar;

pub use admin::{AdminState, list_admins};
pub use alert::{AlertState, create_alert, delete_alert, list_alerts, mark_alert_read};
pub use applicant::{
   ApplicantState,
   create_applicant,
   delete_applicant,
   get_applicant,
   list_applicants,
   update_applicant,
};
pub use auth::{AuthState, SESSION_COOKIE_NAME, logout};
pub use code::{CodeState, create_code, delete_code, list_codes, update_code};
pub use comment::{CommentState, list_comments, post_comment};
pub use document::{DocumentState, request_upload_url};
pub use group_code::{
   GroupCodeState,
   create_group_code,
   delete_group_code,
   list_group_codes,
   update_group_code,
};
pub use health::{
   DatabaseCheck,
   DependencyCheck,
   ReadinessState,
   RedisCheck,
   health_check,
   readiness_check,
};
pub use sidebar::{SidebarState, create_sidebar, delete_sidebar, list_sidebars, update_sidebar};
