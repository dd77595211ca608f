use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

/// 文字起こしバックエンドの共通トレイト
///
/// プロバイダクライアントは起動時に一度だけ構築し、
/// `Arc<dyn TranscribeBackend>` としてハンドラに注入する。
/// テストではスタブ実装に差し替えられる。
#[async_trait]
pub trait TranscribeBackend: Send + Sync {
    /// ステージング済みの音声ファイルを文字起こしする
    ///
    /// # Arguments
    ///
    /// * `audio_path` - ステージングされた音声ファイルのパス
    ///
    /// # Returns
    ///
    /// プロバイダが返した文字起こしテキスト
    async fn transcribe(&self, audio_path: &Path) -> Result<String>;
}
