//! HTTP APIサーバー
//!
//! axumでルーティング・リスナー・停止シグナルを構成する

use crate::config::Config;
use crate::handlers::{method_not_allowed, status, transcribe};
use crate::transcribe_backend::TranscribeBackend;
use anyhow::{Context, Result};
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;

/// アップロードの上限（Whisper APIの上限に合わせて25 MiB）
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// リクエスト全体のタイムアウト（ホスティング設定に合わせて60秒）
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// アプリケーション状態
///
/// 文字起こしバックエンドは起動時に一度だけ構築し、ここから各ハンドラへ注入する。
pub struct AppState {
    pub backend: Arc<dyn TranscribeBackend>,
}

/// APIルーターを構築する
///
/// `/api/transcribe` はPOST専用で、それ以外のメソッドには
/// JSONボディ付きの405を返す。
pub fn router(state: Arc<AppState>) -> Router {
    // CORS設定: レコーダーSPAが別オリジンから呼べるように全許可
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/api/transcribe",
            post(transcribe).fallback(method_not_allowed),
        )
        .route("/api/status", get(status))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(cors)
        .with_state(state)
}

/// APIサーバーを起動する
///
/// Ctrl+Cを受信するまでリクエストを処理し続ける。
pub async fn serve(config: &Config, backend: Arc<dyn TranscribeBackend>) -> Result<()> {
    let state = Arc::new(AppState { backend });
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("リスナーのバインドに失敗: {}", config.bind_addr))?;

    log::info!("APIサーバーを起動: http://{}", config.bind_addr);
    log::info!("公開URL: {}", config.base_url);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("APIサーバーの実行に失敗")?;

    log::info!("APIサーバーを停止しました");
    Ok(())
}

/// 停止シグナル（Ctrl+C）を待機する
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => log::info!("停止シグナルを受信しました..."),
        Err(e) => log::error!("停止シグナルの待機に失敗: {}", e),
    }
}
