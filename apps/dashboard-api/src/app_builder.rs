//! # アプリケーション構築
//!
//! 依存（リポジトリ・セッション・ストレージ）から State を組み立て、ルーターを構築する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。
//! 統合テストは同じ関数にモックを渡してルーター全体を検証する。

use std::sync::Arc;

use applydesk_domain::clock::Clock;
use applydesk_infra::{
   S3Client,
   SessionManager,
   repository::{
      AdminRepository,
      AlertRepository,
      ApplicantRepository,
      CodeRepository,
      CommentRepository,
      GroupCodeRepository,
      SidebarRepository,
   },
};
use applydesk_shared::observability::make_request_span;
use axum::{
   Router,
   middleware::from_fn_with_state,
   routing::{delete, get, post, put},
};
use tower_http::{
   compression::CompressionLayer,
   request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
   trace::TraceLayer,
};

use crate::{
   handler::{
      AdminState,
      AlertState,
      ApplicantState,
      AuthState,
      CodeState,
      CommentState,
      DependencyCheck,
      DocumentState,
      GroupCodeState,
      ReadinessState,
      SidebarState,
      create_alert,
      create_applicant,
      create_code,
      create_group_code,
      create_sidebar,
      delete_alert,
      delete_applicant,
      delete_code,
      delete_group_code,
      delete_sidebar,
      get_applicant,
      health_check,
      list_admins,
      list_alerts,
      list_applicants,
      list_codes,
      list_comments,
      list_group_codes,
      list_sidebars,
      logout,
      mark_alert_read,
      post_comment,
      readiness_check,
      request_upload_url,
      update_applicant,
      update_code,
      update_group_code,
      update_sidebar,
   },
   middleware::{AuthnState, require_session},
   usecase::{
      AlertUseCaseImpl,
      ApplicantUseCaseImpl,
      CodeUseCaseImpl,
      CommentUseCaseImpl,
      DocumentUseCaseImpl,
      SidebarUseCaseImpl,
   },
};

/// ルーターが必要とする依存
pub struct AppDependencies {
   pub admin_repository:      Arc<dyn AdminRepository>,
   pub applicant_repository:  Arc<dyn ApplicantRepository>,
   pub comment_repository:    Arc<dyn CommentRepository>,
   pub alert_repository:      Arc<dyn AlertRepository>,
   pub group_code_repository: Arc<dyn GroupCodeRepository>,
   pub code_repository:       Arc<dyn CodeRepository>,
   pub sidebar_repository:    Arc<dyn SidebarRepository>,
   pub session_manager:       Arc<dyn SessionManager>,
   pub s3_client:             Arc<dyn S3Client>,
   pub clock:                 Arc<dyn Clock>,
   /// `/health/ready` で確認する依存サービス
   pub readiness_checks:      Vec<Arc<dyn DependencyCheck>>,
}

/// State を組み立ててルーターを構築する
///
/// `/api/v1` 配下はすべてセッション検証ミドルウェアを通す。
/// `/health` と `/health/ready` は認証不要。
pub fn build_app(deps: AppDependencies) -> Router {
   let admin_state = Arc::new(AdminState {
      repository: deps.admin_repository,
   });
   let code_usecase = Arc::new(CodeUseCaseImpl::new(
      deps.group_code_repository,
      deps.code_repository,
      deps.clock.clone(),
   ));
   let group_code_state = Arc::new(GroupCodeState {
      usecase: code_usecase.clone(),
   });
   let code_state = Arc::new(CodeState {
      usecase: code_usecase,
   });
   let sidebar_state = Arc::new(SidebarState {
      usecase: SidebarUseCaseImpl::new(deps.sidebar_repository, deps.clock.clone()),
   });
   let applicant_state = Arc::new(ApplicantState {
      usecase: ApplicantUseCaseImpl::new(deps.applicant_repository.clone(), deps.clock.clone()),
   });
   let comment_state = Arc::new(CommentState {
      usecase: CommentUseCaseImpl::new(
         deps.applicant_repository.clone(),
         deps.comment_repository,
         deps.clock.clone(),
      ),
   });
   let alert_state = Arc::new(AlertState {
      usecase: AlertUseCaseImpl::new(
         deps.alert_repository,
         deps.applicant_repository.clone(),
         deps.clock,
      ),
   });
   let document_state = Arc::new(DocumentState {
      usecase: DocumentUseCaseImpl::new(deps.applicant_repository, deps.s3_client),
   });
   let auth_state = Arc::new(AuthState {
      session_manager: deps.session_manager.clone(),
   });
   let authn_state = AuthnState {
      session_manager: deps.session_manager,
   };
   let readiness_state = Arc::new(ReadinessState {
      checks: deps.readiness_checks,
   });

   let api = Router::new()
      .route("/api/v1/auth/logout", post(logout))
      .with_state(auth_state)
      // 管理者・マスタ API
      .route("/api/v1/admins", get(list_admins))
      .with_state(admin_state)
      .route(
         "/api/v1/group-codes",
         get(list_group_codes).post(create_group_code),
      )
      .route(
         "/api/v1/group-codes/{group_code_id}",
         put(update_group_code).delete(delete_group_code),
      )
      .with_state(group_code_state)
      .route("/api/v1/codes", get(list_codes).post(create_code))
      .route("/api/v1/codes/{code_id}", put(update_code).delete(delete_code))
      .with_state(code_state)
      .route("/api/v1/sidebars", get(list_sidebars).post(create_sidebar))
      .route(
         "/api/v1/sidebars/{sidebar_id}",
         put(update_sidebar).delete(delete_sidebar),
      )
      .with_state(sidebar_state)
      // 求職者 API
      .route(
         "/api/v1/applicants",
         get(list_applicants).post(create_applicant),
      )
      .route(
         "/api/v1/applicants/{applicant_id}",
         get(get_applicant)
            .put(update_applicant)
            .delete(delete_applicant),
      )
      .with_state(applicant_state)
      // コメント API
      .route(
         "/api/v1/applicants/{applicant_id}/comments",
         get(list_comments).post(post_comment),
      )
      .with_state(comment_state)
      // 書類 API
      .route(
         "/api/v1/applicants/{applicant_id}/documents/upload-url",
         post(request_upload_url),
      )
      .with_state(document_state)
      // アラート API
      .route("/api/v1/alerts", get(list_alerts).post(create_alert))
      .route("/api/v1/alerts/{alert_id}", delete(delete_alert))
      .route("/api/v1/alerts/{alert_id}/read", post(mark_alert_read))
      .with_state(alert_state)
      .layer(from_fn_with_state(authn_state, require_session));

   // レイヤー順序: 下に書いたものが外側
   // 1. SetRequestIdLayer（最外）: x-request-id がなければ UUID を生成
   // 2. TraceLayer: request_id を含むスパンを作成し、全ログに出力
   // 3. PropagateRequestIdLayer: レスポンスヘッダーに x-request-id をコピー
   Router::new()
      .route("/health", get(health_check))
      .merge(
         Router::new()
            .route("/health/ready", get(readiness_check))
            .with_state(readiness_state),
      )
      .merge(api)
      .layer(CompressionLayer::new())
      .layer(PropagateRequestIdLayer::x_request_id())
      .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
      .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
