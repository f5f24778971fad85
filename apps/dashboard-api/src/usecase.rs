//! # ユースケース層
//!
//! ハンドラから呼ばれ、リポジトリと外部サービスを組み合わせて処理を行う。
//!
//! - [`pagination`] - 一覧系リソース共通のオフセットページネーション
//! - [`comment`] - コメントスレッドのカーソルページネーションと投稿
//! - [`applicant`] - 求職者の一覧・詳細・登録・更新・削除
//! - [`code`], [`sidebar`] - マスタの一覧・登録・更新・削除
//! - [`alert`] - アラートの一覧・登録・既読化・削除
//! - [`document`] - 書類アップロード用 Presigned URL の発行

pub mod alert;
pub mod applicant;
pub mod code;
pub mod comment;
pub mod document;
mod helpers;
pub mod pagination;
pub mod sidebar;

pub use alert::{AlertUseCaseImpl, CreateAlertInput};
pub use applicant::{ApplicantUseCaseImpl, CreateApplicantInput, UpdateApplicantInput};
pub use code::{CodeInput, CodeUseCaseImpl, GroupCodeInput};
pub use comment::{CommentUseCaseImpl, PostCommentInput};
pub use document::{DocumentUseCaseImpl, RequestUploadUrlInput, UploadUrlOutput};
pub use pagination::paginate;
pub use sidebar::{SidebarInput, SidebarUseCaseImpl};
