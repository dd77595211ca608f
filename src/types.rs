use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// 文字起こし結果
///
/// `/api/transcribe` の成功レスポンスとしてJSON形式でクライアントに返す。
/// リクエストをまたいで保持されることはない。
///
/// # JSON出力例
///
/// ```json
/// {
///   "success": true,
///   "text": "こんにちは",
///   "timestamp": "2025-01-02T14:30:15.234Z"
/// }
/// ```
#[derive(Clone, Debug, Serialize)]
pub struct TranscriptResult {
    /// 成功フラグ（成功レスポンスでは常にtrue）
    pub success: bool,

    /// プロバイダが返した文字起こしテキスト（そのまま）
    pub text: String,

    /// ISO 8601形式のタイムスタンプ（ミリ秒精度）
    pub timestamp: String,
}

impl TranscriptResult {
    /// 新しい文字起こし結果を作成
    ///
    /// タイムスタンプはレスポンス生成時点の現在時刻。
    ///
    /// # Examples
    ///
    /// ```
    /// # use koe_transcribe::types::TranscriptResult;
    /// let result = TranscriptResult::new("こんにちは".to_string());
    /// assert!(result.success);
    /// assert_eq!(result.text, "こんにちは");
    /// ```
    pub fn new(text: String) -> Self {
        Self {
            success: true,
            text,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
