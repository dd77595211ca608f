use anyhow::{Context, Result};

/// サーバー設定
///
/// すべて起動時にプロセス環境変数から読み込む。設定ファイルは持たない。
///
/// # 環境変数
///
/// - `OPENAI_API_KEY`: OpenAI APIキー（必須）
/// - `BASE_URL`: 公開URL（デフォルト: "http://localhost:3000"）
/// - `BIND_ADDR`: リッスンアドレス（デフォルト: "0.0.0.0:3000"）
/// - `WHISPER_MODEL`: Whisperモデル名（デフォルト: "whisper-1"）
/// - `WHISPER_LANGUAGE`: 言語コード（デフォルト: "ja"）
/// - `PROVIDER_TIMEOUT_SECONDS`: プロバイダ呼び出しのタイムアウト秒数（デフォルト: 30）
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenAI API Key
    pub openai_api_key: String,
    /// 公開URL（起動ログ用）
    pub base_url: String,
    /// リッスンアドレス
    pub bind_addr: String,
    /// Whisper モデル名（通常 "whisper-1"）
    pub model: String,
    /// 言語コード（"ja", "en" など）
    pub language: String,
    /// プロバイダ呼び出しのタイムアウト（秒）
    pub provider_timeout_seconds: u64,
}

// Default functions
fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_model() -> String {
    "whisper-1".to_string()
}

fn default_language() -> String {
    "ja".to_string() // 日本語指定
}

fn default_provider_timeout_seconds() -> u64 {
    30
}

impl Config {
    /// プロセス環境変数から設定を読み込み
    ///
    /// # Errors
    ///
    /// `OPENAI_API_KEY` が未設定または空の場合にエラーを返す。
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use koe_transcribe::config::Config;
    /// let config = Config::from_env().unwrap();
    /// ```
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 変数の取得方法を注入して設定を構築
    ///
    /// テストがプロセス環境を書き換えずに済むように分離している。
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let openai_api_key = lookup("OPENAI_API_KEY")
            .filter(|value| !value.is_empty())
            .context("環境変数 OPENAI_API_KEY が設定されていません")?;

        let provider_timeout_seconds = match lookup("PROVIDER_TIMEOUT_SECONDS") {
            Some(value) => value
                .parse()
                .with_context(|| format!("PROVIDER_TIMEOUT_SECONDS のパースに失敗: {}", value))?,
            None => default_provider_timeout_seconds(),
        };

        Ok(Self {
            openai_api_key,
            base_url: lookup("BASE_URL").unwrap_or_else(default_base_url),
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(default_bind_addr),
            model: lookup("WHISPER_MODEL").unwrap_or_else(default_model),
            language: lookup("WHISPER_LANGUAGE").unwrap_or_else(default_language),
            provider_timeout_seconds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_lookup(lookup_from(&[("OPENAI_API_KEY", "sk-test")])).unwrap();

        assert_eq!(config.openai_api_key, "sk-test");
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert_eq!(config.model, "whisper-1");
        assert_eq!(config.language, "ja");
        assert_eq!(config.provider_timeout_seconds, 30);
    }

    #[test]
    fn test_missing_api_key() {
        let result = Config::from_lookup(lookup_from(&[]));
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let result = Config::from_lookup(lookup_from(&[("OPENAI_API_KEY", "")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_custom_values() {
        let config = Config::from_lookup(lookup_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("BASE_URL", "https://voice.example.com"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("WHISPER_MODEL", "whisper-large"),
            ("WHISPER_LANGUAGE", "en"),
            ("PROVIDER_TIMEOUT_SECONDS", "45"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "https://voice.example.com");
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.model, "whisper-large");
        assert_eq!(config.language, "en");
        assert_eq!(config.provider_timeout_seconds, 45);
    }

    #[test]
    fn test_invalid_timeout_rejected() {
        let result = Config::from_lookup(lookup_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("PROVIDER_TIMEOUT_SECONDS", "abc"),
        ]));
        assert!(result.is_err());
    }
}
