use crate::transcribe_backend::TranscribeBackend;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;
use std::path::Path;

/// OpenAI Whisper API のエンドポイント
const TRANSCRIPTIONS_URL: &str = "https://api.openai.com/v1/audio/transcriptions";

/// OpenAI Whisper API設定
#[derive(Debug, Clone)]
pub struct WhisperConfig {
    pub api_key: String,
    pub model: String,    // "whisper-1"
    pub language: String, // "ja", "en", など
    /// リクエストのタイムアウト（秒）
    pub timeout_seconds: u64,
}

/// OpenAI Whisper API レスポンス
#[derive(Debug, Deserialize)]
struct WhisperResponse {
    text: String,
}

/// OpenAI Whisper API バックエンド
pub struct WhisperBackend {
    config: WhisperConfig,
    client: reqwest::Client,
}

impl WhisperBackend {
    pub fn new(config: WhisperConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Whisper API HTTPクライアント作成失敗")?;

        Ok(Self { config, client })
    }
}

/// ステージングファイルの拡張子からMIMEタイプを推定する
fn mime_for_extension(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("wav") => "audio/wav",
        Some("webm") => "audio/webm",
        Some("mp3") => "audio/mpeg",
        Some("ogg") => "audio/ogg",
        Some("m4a") => "audio/mp4",
        Some("flac") => "audio/flac",
        _ => "application/octet-stream",
    }
}

#[async_trait]
impl TranscribeBackend for WhisperBackend {
    /// Whisper APIを呼び出して文字起こし
    async fn transcribe(&self, audio_path: &Path) -> Result<String> {
        let audio_data = tokio::fs::read(audio_path)
            .await
            .with_context(|| format!("音声ファイルの読み込みに失敗: {:?}", audio_path))?;

        let file_name = audio_path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("audio.webm")
            .to_string();

        let part = multipart::Part::bytes(audio_data)
            .file_name(file_name)
            .mime_str(mime_for_extension(audio_path))?;

        let form = multipart::Form::new()
            .part("file", part)
            .text("model", self.config.model.clone())
            .text("language", self.config.language.clone())
            .text("response_format", "json");

        log::debug!("Whisper API 呼び出し: {:?}", audio_path);

        let response = self
            .client
            .post(TRANSCRIPTIONS_URL)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .multipart(form)
            .send()
            .await
            .context("Whisper API リクエスト失敗")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Whisper API エラー: {} - {}", status, error_text);
        }

        let whisper_response: WhisperResponse = response
            .json::<WhisperResponse>()
            .await
            .context("Whisper API レスポンスパース失敗")?;

        Ok(whisper_response.text)
    }
}
