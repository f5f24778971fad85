//! # 認証ミドルウェア
//!
//! Cookie `session_id` のセッションを検証し、`/api/v1` 配下のルートを保護する。
//! 検証に成功したら [`SessionData`] をリクエストの extension に格納する。
//! ハンドラは `Extension<SessionData>` で管理者を取得できる。
//!
//! ```rust,ignore
//! Router::new()
//!    .route("/api/v1/applicants", get(list_applicants))
//!    .layer(from_fn_with_state(authn_state, require_session))
//! ```

use std::sync::Arc;

use applydesk_infra::SessionManager;
use axum::{
   body::Body,
   extract::State,
   http::Request,
   middleware::Next,
   response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;

use crate::{error::CoreError, handler::SESSION_COOKIE_NAME};

/// 認証ミドルウェアの状態
#[derive(Clone)]
pub struct AuthnState {
   pub session_manager: Arc<dyn SessionManager>,
}

/// セッション検証ミドルウェア
///
/// - Cookie がない、またはセッションが存在しない → 401
/// - セッションストアのエラー → 500
pub async fn require_session(
   State(state): State<AuthnState>,
   jar: CookieJar,
   mut request: Request<Body>,
   next: Next,
) -> Response {
   let Some(cookie) = jar.get(SESSION_COOKIE_NAME) else {
      return CoreError::Unauthorized("セッション Cookie がありません".to_string()).into_response();
   };

   let session = match state.session_manager.get(cookie.value()).await {
      Ok(Some(session)) => session,
      Ok(None) => {
         tracing::debug!("セッションが存在しないか期限切れです");
         return CoreError::Unauthorized("セッションが無効です".to_string()).into_response();
      }
      Err(e) => return CoreError::Database(e).into_response(),
   };

   tracing::Span::current().record("admin_id", tracing::field::display(session.admin_id()));
   request.extensions_mut().insert(session);

   next.run(request).await
}

#[cfg(test)]
mod tests {
   use applydesk_domain::admin::{AdminId, AdminRole};
   use applydesk_infra::{InfraError, SessionData, mock::MockSessionManager};
   use async_trait::async_trait;
   use axum::{
      Extension,
      Router,
      http::{StatusCode, header},
      middleware::from_fn_with_state,
      routing::get,
   };
   use chrono::Utc;
   use pretty_assertions::assert_eq;
   use tower::ServiceExt;

   use super::*;

   /// 認証済み管理者の名前を返すダミーハンドラ
   async fn whoami(Extension(session): Extension<SessionData>) -> String {
      session.name().to_string()
   }

   fn app(session_manager: Arc<dyn SessionManager>) -> Router {
      Router::new()
         .route("/protected", get(whoami))
         .layer(from_fn_with_state(
            AuthnState { session_manager },
            require_session,
         ))
   }

   fn request(cookie: Option<&str>) -> Request<Body> {
      let mut builder = Request::builder().uri("/protected");
      if let Some(session_id) = cookie {
         builder = builder.header(header::COOKIE, format!("{SESSION_COOKIE_NAME}={session_id}"));
      }
      builder.body(Body::empty()).unwrap()
   }

   struct FailingSessionManager;

   #[async_trait]
   impl SessionManager for FailingSessionManager {
      async fn create(&self, _data: &SessionData) -> Result<String, InfraError> {
         Err(InfraError::unexpected("redis down"))
      }

      async fn get(&self, _session_id: &str) -> Result<Option<SessionData>, InfraError> {
         Err(InfraError::unexpected("redis down"))
      }

      async fn delete(&self, _session_id: &str) -> Result<(), InfraError> {
         Err(InfraError::unexpected("redis down"))
      }
   }

   #[tokio::test]
   async fn test_有効なセッションでハンドラに管理者が渡る() {
      let sessions = MockSessionManager::new();
      let session_id = sessions
         .create(&SessionData::new(
            AdminId::new(),
            "Sato".to_string(),
            "sato@example.com".to_string(),
            AdminRole::Admin,
            Utc::now(),
         ))
         .await
         .unwrap();

      let response = app(Arc::new(sessions))
         .oneshot(request(Some(&session_id)))
         .await
         .unwrap();

      assert_eq!(response.status(), StatusCode::OK);
      let body = axum::body::to_bytes(response.into_body(), usize::MAX)
         .await
         .unwrap();
      assert_eq!(&body[..], b"Sato");
   }

   #[tokio::test]
   async fn test_cookieなしは401() {
      let response = app(Arc::new(MockSessionManager::new()))
         .oneshot(request(None))
         .await
         .unwrap();

      assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
   }

   #[tokio::test]
   async fn test_存在しないセッションは401() {
      let response = app(Arc::new(MockSessionManager::new()))
         .oneshot(request(Some("unknown-session")))
         .await
         .unwrap();

      assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
   }

   #[tokio::test]
   async fn test_セッションストアのエラーは500() {
      let response = app(Arc::new(FailingSessionManager))
         .oneshot(request(Some("any")))
         .await
         .unwrap();

      assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
   }
}
