//! # Dashboard API サーバー
//!
//! 求職者管理ダッシュボードのバックエンド。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `API_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `API_PORT` | **Yes** | ポート番号 |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `REDIS_URL` | **Yes** | Redis 接続 URL（セッションストア） |
//! | `S3_BUCKET_NAME` | **Yes** | 書類を保存するバケット |
//! | `S3_REGION` | No | リージョン（デフォルト: `ap-northeast-1`） |
//! | `S3_ENDPOINT_URL` | No | MinIO などを使う場合のエンドポイント |
//! | `LOG_FORMAT` | No | `json` / `pretty`（デフォルト: `pretty`） |
//! | `RUST_LOG` | No | ログレベル（デフォルト: `info,applydesk=debug`） |
//!
//! ## 起動方法
//!
//! ```bash
//! cargo run -p applydesk-dashboard-api
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use applydesk_dashboard_api::{
   app_builder::{AppDependencies, build_app},
   config::DashboardConfig,
   handler::{DatabaseCheck, RedisCheck},
};
use applydesk_domain::clock::SystemClock;
use applydesk_infra::{
   AwsS3Client,
   RedisSessionManager,
   db,
   redis,
   repository::{
      PostgresAdminRepository,
      PostgresAlertRepository,
      PostgresApplicantRepository,
      PostgresCodeRepository,
      PostgresCommentRepository,
      PostgresGroupCodeRepository,
      PostgresSidebarRepository,
   },
   s3,
};
use applydesk_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
   // .env ファイルを読み込む（存在する場合）
   dotenvy::dotenv().ok();

   init_tracing(&TracingConfig::from_env("dashboard-api"));

   let config = DashboardConfig::from_env().context("設定の読み込みに失敗しました")?;
   tracing::info!(
      "Dashboard API サーバーを起動します: {}:{}",
      config.host,
      config.port
   );

   let pool = db::create_pool(&config.database_url)
      .await
      .context("データベース接続に失敗しました")?;
   db::run_migrations(&pool)
      .await
      .context("マイグレーションの適用に失敗しました")?;
   tracing::info!("データベースに接続しました");

   let redis_conn = redis::create_connection_manager(&config.redis_url)
      .await
      .context("Redis 接続に失敗しました")?;
   tracing::info!("Redis に接続しました");

   let s3_client = s3::create_client(config.s3_endpoint_url.as_deref(), &config.s3_region).await;

   let app = build_app(AppDependencies {
      admin_repository:      Arc::new(PostgresAdminRepository::new(pool.clone())),
      applicant_repository:  Arc::new(PostgresApplicantRepository::new(pool.clone())),
      comment_repository:    Arc::new(PostgresCommentRepository::new(pool.clone())),
      alert_repository:      Arc::new(PostgresAlertRepository::new(pool.clone())),
      group_code_repository: Arc::new(PostgresGroupCodeRepository::new(pool.clone())),
      code_repository:       Arc::new(PostgresCodeRepository::new(pool.clone())),
      sidebar_repository:    Arc::new(PostgresSidebarRepository::new(pool.clone())),
      session_manager:       Arc::new(RedisSessionManager::new(redis_conn.clone())),
      s3_client:             Arc::new(AwsS3Client::new(s3_client, config.s3_bucket_name.clone())),
      clock:                 Arc::new(SystemClock),
      readiness_checks:      vec![
         Arc::new(DatabaseCheck::new(pool)),
         Arc::new(RedisCheck::new(redis_conn)),
      ],
   });

   let addr: SocketAddr = format!("{}:{}", config.host, config.port)
      .parse()
      .context("アドレスのパースに失敗しました")?;

   let listener = TcpListener::bind(addr).await?;
   tracing::info!("Dashboard API サーバーが起動しました: {}", addr);

   axum::serve(listener, app).await?;

   Ok(())
}
