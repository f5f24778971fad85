//! 統合テスト共通のヘルパー
//!
//! `build_app` にインメモリのモックを渡し、ミドルウェアを含むルーター全体を
//! `oneshot` で呼び出す。

#![allow(dead_code)]

use std::sync::Arc;

use applydesk_dashboard_api::{
   app_builder::{AppDependencies, build_app},
   handler::SESSION_COOKIE_NAME,
};
use applydesk_domain::{
   admin::{AdminId, AdminRole},
   applicant::{Applicant, ApplicantId, NewApplicant},
   clock::FixedClock,
   value_objects::{Email, Nationality, PersonName},
};
use applydesk_infra::{
   SessionData,
   SessionManager,
   mock::{
      MockAdminRepository,
      MockAlertRepository,
      MockApplicantRepository,
      MockCodeRepository,
      MockCommentRepository,
      MockGroupCodeRepository,
      MockS3Client,
      MockSessionManager,
      MockSidebarRepository,
   },
};
use axum::{
   Router,
   body::Body,
   http::{HeaderMap, Method, Request, StatusCode, header},
};
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use tower::ServiceExt;

pub fn base_time() -> DateTime<Utc> {
   DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

/// テスト用のレスポンス
pub struct TestResponse {
   pub status:  StatusCode,
   pub headers: HeaderMap,
   pub body:    Value,
}

/// モックで組み立てたアプリケーション
pub struct TestApp {
   router:          Router,
   pub applicants:  MockApplicantRepository,
   pub comments:    MockCommentRepository,
   pub admins:      MockAdminRepository,
   pub group_codes: MockGroupCodeRepository,
   pub codes:       MockCodeRepository,
   pub sidebars:    MockSidebarRepository,
   pub alerts:      MockAlertRepository,
   pub sessions:    MockSessionManager,
   pub session_id:  String,
   pub admin_id:    AdminId,
}

impl TestApp {
   /// ログイン済みの管理者 1 名を持つアプリケーションを作る
   pub async fn new() -> Self {
      let applicants = MockApplicantRepository::new();
      let comments = MockCommentRepository::new();
      let admins = MockAdminRepository::new();
      let group_codes = MockGroupCodeRepository::new();
      let codes = MockCodeRepository::new();
      let sidebars = MockSidebarRepository::new();
      let alerts = MockAlertRepository::new();
      let sessions = MockSessionManager::new();

      let admin_id = AdminId::new();
      let session_id = sessions
         .create(&SessionData::new(
            admin_id.clone(),
            "佐藤".to_string(),
            "sato@example.com".to_string(),
            AdminRole::Admin,
            base_time(),
         ))
         .await
         .unwrap();

      let router = build_app(AppDependencies {
         admin_repository:      Arc::new(admins.clone()),
         applicant_repository:  Arc::new(applicants.clone()),
         comment_repository:    Arc::new(comments.clone()),
         alert_repository:      Arc::new(alerts.clone()),
         group_code_repository: Arc::new(group_codes.clone()),
         code_repository:       Arc::new(codes.clone()),
         sidebar_repository:    Arc::new(sidebars.clone()),
         session_manager:       Arc::new(sessions.clone()),
         s3_client:             Arc::new(MockS3Client::new()),
         clock:                 Arc::new(FixedClock::new(base_time())),
         readiness_checks:      Vec::new(),
      });

      Self {
         router,
         applicants,
         comments,
         admins,
         group_codes,
         codes,
         sidebars,
         alerts,
         sessions,
         session_id,
         admin_id,
      }
   }

   /// `n` 人の求職者を登録する（i 人目は `Applicant 01` から始まり i 分後に作成）
   pub fn seed_applicants(&self, n: i64) -> Vec<Applicant> {
      (1..=n)
         .map(|i| {
            let applicant = Applicant::new(NewApplicant {
               id:          ApplicantId::new(),
               name:        PersonName::new(format!("Applicant {i:02}")).unwrap(),
               email:       Email::new(format!("applicant{i}@example.com")).unwrap(),
               phone:       None,
               nationality: Some(Nationality::new("VN").unwrap()),
               visa_type:   None,
               now:         base_time() + Duration::minutes(i),
            });
            self.applicants.add(applicant.clone());
            applicant
         })
         .collect()
   }

   /// ルーターの複製（ヘッダーを細かく指定するテスト用）
   pub fn router(&self) -> Router {
      self.router.clone()
   }

   pub async fn get(&self, uri: &str) -> TestResponse {
      self.send(Method::GET, uri, None, true).await
   }

   pub async fn get_anonymous(&self, uri: &str) -> TestResponse {
      self.send(Method::GET, uri, None, false).await
   }

   pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
      self.send(Method::POST, uri, Some(body), true).await
   }

   pub async fn put(&self, uri: &str, body: Value) -> TestResponse {
      self.send(Method::PUT, uri, Some(body), true).await
   }

   pub async fn delete(&self, uri: &str) -> TestResponse {
      self.send(Method::DELETE, uri, None, true).await
   }

   pub async fn send(
      &self,
      method: Method,
      uri: &str,
      body: Option<Value>,
      authenticated: bool,
   ) -> TestResponse {
      let mut builder = Request::builder().method(method).uri(uri);
      if authenticated {
         builder = builder.header(
            header::COOKIE,
            format!("{SESSION_COOKIE_NAME}={}", self.session_id),
         );
      }
      let request = match body {
         Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
         None => builder.body(Body::empty()).unwrap(),
      };

      let response = self.router.clone().oneshot(request).await.unwrap();
      let status = response.status();
      let headers = response.headers().clone();
      let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
         .await
         .unwrap();
      let body = if bytes.is_empty() {
         Value::Null
      } else {
         serde_json::from_slice(&bytes).unwrap()
      };

      TestResponse {
         status,
         headers,
         body,
      }
   }
}

/// `data.data[*].name` を取り出す
pub fn names(body: &Value) -> Vec<String> {
   body["data"]["data"]
      .as_array()
      .unwrap()
      .iter()
      .map(|item| item["name"].as_str().unwrap().to_string())
      .collect()
}
