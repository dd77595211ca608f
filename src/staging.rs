use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// 拡張子が取れない場合のデフォルト（MediaRecorderの既定コンテナ）
const DEFAULT_EXTENSION: &str = "webm";

/// 一時ディレクトリにステージングしたアップロード音声
///
/// プロバイダクライアントはファイルパスを受け取るため、アップロードされた
/// バイト列を一時ファイルとして書き出す。ファイル名は
/// `audio_<ナノ秒タイムスタンプ>.<拡張子>` とし、並行リクエスト間の衝突を避ける。
///
/// 削除はリクエストの成功・失敗どちらの経路でも必ず呼ぶこと。
pub struct StagedAudio {
    path: PathBuf,
}

impl StagedAudio {
    /// アップロードをシステムの一時ディレクトリへ書き出す
    ///
    /// # Arguments
    ///
    /// * `data` - アップロードされた音声のバイト列
    /// * `original_filename` - アップロード時のファイル名（拡張子の決定に使う）
    ///
    /// # Errors
    ///
    /// 一時ファイルの書き込みに失敗した場合にエラーを返す。
    pub async fn write(data: &[u8], original_filename: Option<&str>) -> Result<Self> {
        Self::write_in(std::env::temp_dir(), data, original_filename).await
    }

    /// 指定ディレクトリへ書き出す（テストから隔離ディレクトリを使うために分離）
    pub async fn write_in(
        dir: PathBuf,
        data: &[u8],
        original_filename: Option<&str>,
    ) -> Result<Self> {
        let extension = extension_for(original_filename);
        let timestamp_ns = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let path = dir.join(format!("audio_{}.{}", timestamp_ns, extension));

        tokio::fs::write(&path, data)
            .await
            .with_context(|| format!("一時ファイルの書き込みに失敗: {:?}", path))?;

        log::debug!("一時ファイルを作成: {:?} ({} バイト)", path, data.len());

        Ok(Self { path })
    }

    /// ステージング先のパス
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 一時ファイルを削除（ベストエフォート）
    ///
    /// 削除の失敗はログに記録するだけで、レスポンスには影響させない。
    pub async fn remove(self) {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => log::debug!("一時ファイルを削除: {:?}", self.path),
            Err(e) => log::warn!("一時ファイルの削除に失敗: {:?} - {}", self.path, e),
        }
    }
}

/// アップロードされたファイル名から拡張子を決定する
///
/// ファイル名が無い、または拡張子を含まない場合はデフォルトを使う。
fn extension_for(filename: Option<&str>) -> &str {
    filename
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .unwrap_or(DEFAULT_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_extension_from_filename() {
        assert_eq!(extension_for(Some("clip.wav")), "wav");
        assert_eq!(extension_for(Some("recording.ogg")), "ogg");
        assert_eq!(extension_for(Some("a.b.mp3")), "mp3");
    }

    #[test]
    fn test_extension_defaults_to_webm() {
        assert_eq!(extension_for(None), "webm");
        assert_eq!(extension_for(Some("clip")), "webm");
        assert_eq!(extension_for(Some("")), "webm");
    }

    #[tokio::test]
    async fn test_write_creates_file_with_payload() {
        let dir = tempdir().unwrap();
        let staged = StagedAudio::write_in(dir.path().to_path_buf(), b"RIFFdata", Some("clip.wav"))
            .await
            .unwrap();

        let name = staged.path().file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("audio_"));
        assert!(name.ends_with(".wav"));

        let written = std::fs::read(staged.path()).unwrap();
        assert_eq!(written, b"RIFFdata");

        staged.remove().await;
    }

    #[tokio::test]
    async fn test_remove_deletes_file() {
        let dir = tempdir().unwrap();
        let staged = StagedAudio::write_in(dir.path().to_path_buf(), b"bytes", None)
            .await
            .unwrap();
        let path = staged.path().to_path_buf();
        assert!(path.exists());

        staged.remove().await;
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_remove_missing_file_does_not_panic() {
        let dir = tempdir().unwrap();
        let staged = StagedAudio::write_in(dir.path().to_path_buf(), b"bytes", None)
            .await
            .unwrap();

        // 先に消しておいても remove はログを残すだけで落ちない
        std::fs::remove_file(staged.path()).unwrap();
        staged.remove().await;
    }

    #[tokio::test]
    async fn test_concurrent_writes_get_distinct_names() {
        let dir = tempdir().unwrap();
        let a = StagedAudio::write_in(dir.path().to_path_buf(), b"a", Some("x.wav"))
            .await
            .unwrap();
        let b = StagedAudio::write_in(dir.path().to_path_buf(), b"b", Some("y.wav"))
            .await
            .unwrap();

        assert_ne!(a.path(), b.path());

        a.remove().await;
        b.remove().await;
    }
}
