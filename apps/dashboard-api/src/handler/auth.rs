//! # 認証ハンドラ
//!
//! - `POST /api/v1/auth/logout` - ログアウト
//!
//! セッションは Cookie `session_id` で識別し、Redis に保存する。
//! ログインは別サービスが発行したセッションを共有する前提で、この API は扱わない。

use std::sync::Arc;

use applydesk_infra::SessionManager;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::{CookieJar, cookie::Cookie};

/// セッション Cookie 名
pub const SESSION_COOKIE_NAME: &str = "session_id";

/// 認証 API の共有状態
pub struct AuthState {
   pub session_manager: Arc<dyn SessionManager>,
}

/// セッション Cookie を削除する Cookie を構築する
fn build_clear_cookie() -> Cookie<'static> {
   Cookie::build((SESSION_COOKIE_NAME, "")).path("/").build()
}

/// POST /api/v1/auth/logout
///
/// セッションを無効化し、Cookie を削除する。
///
/// ## レスポンス
///
/// - `204 No Content`: ログアウト成功
/// - `401 Unauthorized`: 未認証（セッション検証ミドルウェアで拒否）
#[tracing::instrument(skip_all)]
pub async fn logout(State(state): State<Arc<AuthState>>, jar: CookieJar) -> impl IntoResponse {
   if let Some(session_cookie) = jar.get(SESSION_COOKIE_NAME) {
      // セッションを削除（エラーは無視）
      if let Err(e) = state.session_manager.delete(session_cookie.value()).await {
         tracing::warn!("セッション削除に失敗（無視）: {}", e);
      }
   }

   tracing::info!("ログアウト");

   (jar.remove(build_clear_cookie()), StatusCode::NO_CONTENT)
}
