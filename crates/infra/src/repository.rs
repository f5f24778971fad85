//! # リポジトリ実装
//!
//! 一覧系リソースは [`PagedRepository`] を共通の能力として実装する。
//! ページネーションエンジンはこのトレイトだけに依存し、件数取得とページ取得を組み合わせる。
//!
//! コメントだけはカーソル方式のため、専用の [`CommentRepository`] を持つ。

pub mod admin_repository;
pub mod alert_repository;
pub mod applicant_repository;
pub mod code_repository;
pub mod comment_repository;
pub mod group_code_repository;
mod paging;
pub mod sidebar_repository;

pub use admin_repository::{AdminRepository, PostgresAdminRepository};
pub use alert_repository::{AlertRepository, PostgresAlertRepository};
pub use applicant_repository::{ApplicantRepository, PostgresApplicantRepository};
pub use code_repository::{CodeRepository, PostgresCodeRepository};
pub use comment_repository::{CommentRepository, PostgresCommentRepository};
pub use group_code_repository::{GroupCodeRepository, PostgresGroupCodeRepository};
pub use paging::PagedRepository;
pub use sidebar_repository::{PostgresSidebarRepository, SidebarRepository};
