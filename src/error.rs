use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// APIエラーレスポンスのワイヤ形式
///
/// # JSON出力例
///
/// ```json
/// {
///   "statusCode": 400,
///   "statusMessage": "No file uploaded"
/// }
/// ```
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub status_code: u16,
    pub status_message: String,
}

/// リクエスト処理のエラー分類
///
/// バリデーションとプロバイダ呼び出しは例外ではなくこの型で失敗を返し、
/// HTTPステータスへの変換は `IntoResponse` 実装（トランスポート層）だけが行う。
/// プロバイダや内部エラーの詳細はサーバーログにのみ記録し、
/// クライアントには固定メッセージしか返さない。
#[derive(Debug)]
pub enum RequestError {
    /// ボディなし・multipartでない・パートが1つも無い
    NoFileUploaded,
    /// `audio` パートが見つからない、または空
    AudioFileRequired,
    /// POST以外のメソッド
    MethodNotAllowed,
    /// 文字起こしプロバイダの呼び出し失敗
    Provider(anyhow::Error),
    /// その他の予期しない失敗
    Internal(anyhow::Error),
}

impl RequestError {
    /// 対応するHTTPステータスコード
    pub fn status(&self) -> StatusCode {
        match self {
            RequestError::NoFileUploaded | RequestError::AudioFileRequired => {
                StatusCode::BAD_REQUEST
            }
            RequestError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            RequestError::Provider(_) | RequestError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// クライアントに返す固定メッセージ
    pub fn message(&self) -> &'static str {
        match self {
            RequestError::NoFileUploaded => "No file uploaded",
            RequestError::AudioFileRequired => "Audio file is required",
            RequestError::MethodNotAllowed => "Method not allowed",
            RequestError::Provider(_) => "Failed to transcribe audio",
            RequestError::Internal(_) => "Internal server error",
        }
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        // 原因の詳細はここでログに残す（レスポンスには含めない）
        match &self {
            RequestError::Provider(e) => log::error!("文字起こしに失敗: {:#}", e),
            RequestError::Internal(e) => log::error!("リクエスト処理で予期しないエラー: {:#}", e),
            _ => {}
        }

        let status = self.status();
        let body = ApiError {
            status_code: status.as_u16(),
            status_message: self.message().to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(RequestError::NoFileUploaded.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            RequestError::AudioFileRequired.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RequestError::MethodNotAllowed.status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            RequestError::Provider(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            RequestError::Internal(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_provider_detail_not_in_message() {
        let error = RequestError::Provider(anyhow::anyhow!("api key sk-secret rejected"));
        assert_eq!(error.message(), "Failed to transcribe audio");
    }

    #[test]
    fn test_api_error_wire_format() {
        let body = ApiError {
            status_code: 400,
            status_message: "No file uploaded".to_string(),
        };

        let json = serde_json::to_string(&body).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["statusCode"], 400);
        assert_eq!(parsed["statusMessage"], "No file uploaded");
    }
}
