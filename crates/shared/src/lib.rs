//! # applydesk-shared
//!
//! API の入出力の形（`{ data }` エンベロープ、ページ情報、RFC 9457 のエラー、
//! ヘルスチェック応答）と、トレーシング初期化をまとめたクレート。
//! ドメインの知識は持たない。

pub mod api_response;
pub mod cursor_page;
pub mod error_response;
pub mod health;
pub mod observability;
pub mod paginated_response;

pub use api_response::ApiResponse;
pub use cursor_page::CursorPage;
pub use error_response::{ErrorResponse, ProblemType};
pub use health::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};
pub use paginated_response::{PaginatedResponse, PaginationMeta};
