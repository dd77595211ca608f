use anyhow::{Context, Result};
use env_logger::Env;
use koe_transcribe::api_server;
use koe_transcribe::config::Config;
use koe_transcribe::whisper_api::{WhisperBackend, WhisperConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // ロガーを初期化
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    // 設定を環境変数から読み込み
    let config = Config::from_env().context("設定の読み込みに失敗")?;

    log::info!("koe-transcribe を起動します");
    log::info!("モデル: {} / 言語: {}", config.model, config.language);

    // Whisperバックエンドを構築（起動時に一度だけ、以後ハンドラへ注入）
    let backend = WhisperBackend::new(WhisperConfig {
        api_key: config.openai_api_key.clone(),
        model: config.model.clone(),
        language: config.language.clone(),
        timeout_seconds: config.provider_timeout_seconds,
    })
    .context("Whisperバックエンドの初期化に失敗")?;

    api_server::serve(&config, Arc::new(backend)).await
}
