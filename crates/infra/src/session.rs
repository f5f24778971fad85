//! # セッション管理
//!
//! Redis に保存された管理者セッションを扱う。
//! ログイン（セッション作成）は認証基盤が行い、このサービスは参照と削除を行う。
//!
//! ## Redis キー設計
//!
//! | キー | 値 | TTL |
//! |-----|-----|-----|
//! | `session:{session_id}` | SessionData (JSON) | 28800秒（8時間） |

use applydesk_domain::admin::{AdminId, AdminRole};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redis::{AsyncCommands, aio::ConnectionManager};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::InfraError;

/// セッションの有効期限（秒）
const SESSION_TTL_SECONDS: u64 = 28800;

/// セッションデータ
///
/// Redis に JSON（camelCase）で保存される。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
   admin_id:   AdminId,
   name:       String,
   email:      String,
   role:       AdminRole,
   created_at: DateTime<Utc>,
}

impl SessionData {
   pub fn new(
      admin_id: AdminId,
      name: String,
      email: String,
      role: AdminRole,
      created_at: DateTime<Utc>,
   ) -> Self {
      Self {
         admin_id,
         name,
         email,
         role,
         created_at,
      }
   }

   pub fn admin_id(&self) -> &AdminId {
      &self.admin_id
   }

   pub fn name(&self) -> &str {
      &self.name
   }

   pub fn email(&self) -> &str {
      &self.email
   }

   pub fn role(&self) -> AdminRole {
      self.role
   }

   pub fn created_at(&self) -> DateTime<Utc> {
      self.created_at
   }
}

/// セッション管理トレイト
#[async_trait]
pub trait SessionManager: Send + Sync {
   /// セッションを作成し、セッション ID（UUID v4）を返す
   async fn create(&self, data: &SessionData) -> Result<String, InfraError>;

   /// セッションが存在すれば `Some(SessionData)`、なければ `None`
   async fn get(&self, session_id: &str) -> Result<Option<SessionData>, InfraError>;

   /// セッションを削除する
   ///
   /// 存在しないセッションを削除しても成功とする。
   async fn delete(&self, session_id: &str) -> Result<(), InfraError>;
}

/// Redis を使用したセッションマネージャ
#[derive(Clone)]
pub struct RedisSessionManager {
   conn: ConnectionManager,
}

impl RedisSessionManager {
   /// 接続マネージャを共有してセッションマネージャを作成する
   pub fn new(conn: ConnectionManager) -> Self {
      Self { conn }
   }

   fn session_key(session_id: &str) -> String {
      format!("session:{session_id}")
   }
}

#[async_trait]
impl SessionManager for RedisSessionManager {
   #[tracing::instrument(skip_all, level = "debug")]
   async fn create(&self, data: &SessionData) -> Result<String, InfraError> {
      let session_id = Uuid::new_v4().to_string();
      let key = Self::session_key(&session_id);
      let json = serde_json::to_string(data)?;

      let mut conn = self.conn.clone();
      let _: () = conn.set_ex(&key, json, SESSION_TTL_SECONDS).await?;

      Ok(session_id)
   }

   #[tracing::instrument(skip_all, level = "debug")]
   async fn get(&self, session_id: &str) -> Result<Option<SessionData>, InfraError> {
      let key = Self::session_key(session_id);
      let mut conn = self.conn.clone();

      let result: Option<String> = conn.get(&key).await?;

      match result {
         Some(json) => Ok(Some(serde_json::from_str(&json)?)),
         None => Ok(None),
      }
   }

   #[tracing::instrument(skip_all, level = "debug")]
   async fn delete(&self, session_id: &str) -> Result<(), InfraError> {
      let key = Self::session_key(session_id);
      let mut conn = self.conn.clone();
      let _: () = conn.del(&key).await?;
      Ok(())
   }
}
