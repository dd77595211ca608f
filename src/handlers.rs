//! APIリクエストハンドラ
//!
//! 文字起こしエンドポイントの本体。バリデーション → ステージング →
//! プロバイダ呼び出し → クリーンアップ → レスポンス、の直線的なパイプライン。

use crate::api_server::AppState;
use crate::error::RequestError;
use crate::staging::StagedAudio;
use crate::types::TranscriptResult;
use axum::body::Bytes;
use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

/// アップロードされた音声パート
struct AudioUpload {
    data: Bytes,
    filename: Option<String>,
}

/// multipartボディから `audio` パートを取り出す
///
/// パートが1つも無い場合は `NoFileUploaded`、
/// パートはあるが `audio` が無い・空の場合は `AudioFileRequired`。
async fn find_audio_part(multipart: &mut Multipart) -> Result<AudioUpload, RequestError> {
    let mut saw_part = false;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                // 壊れたmultipartボディは不正なアップロードとして扱う
                log::warn!("multipartボディの読み取りに失敗: {}", e);
                return Err(RequestError::NoFileUploaded);
            }
        };
        saw_part = true;

        if field.name() == Some("audio") {
            let filename = field.file_name().map(|name| name.to_string());
            let data = field.bytes().await.map_err(|e| {
                log::warn!("audioパートの読み取りに失敗: {}", e);
                RequestError::NoFileUploaded
            })?;

            if data.is_empty() {
                return Err(RequestError::AudioFileRequired);
            }

            return Ok(AudioUpload { data, filename });
        }
        // audio以外のパートは読み飛ばす
    }

    if saw_part {
        Err(RequestError::AudioFileRequired)
    } else {
        Err(RequestError::NoFileUploaded)
    }
}

/// POST /api/transcribe - アップロードされた音声を文字起こしする
///
/// 一時ファイルはプロバイダ呼び出しの成否に関わらず、
/// レスポンスを返す前に必ず削除する。
pub async fn transcribe(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<TranscriptResult>, RequestError> {
    // ボディが無い・multipartでない場合はここで弾く
    let mut multipart = multipart.map_err(|e| {
        log::warn!("multipartボディの抽出に失敗: {}", e);
        RequestError::NoFileUploaded
    })?;

    let upload = find_audio_part(&mut multipart).await?;

    log::debug!(
        "音声アップロードを受信: {:?} ({} バイト)",
        upload.filename,
        upload.data.len()
    );

    let staged = StagedAudio::write(&upload.data, upload.filename.as_deref())
        .await
        .map_err(RequestError::Internal)?;

    let result = state.backend.transcribe(staged.path()).await;

    // 成功・失敗どちらでも先にクリーンアップする
    staged.remove().await;

    match result {
        Ok(text) => {
            log::info!("文字起こし完了: {} 文字", text.chars().count());
            Ok(Json(TranscriptResult::new(text)))
        }
        Err(e) => Err(RequestError::Provider(e)),
    }
}

/// POST以外のメソッドに対する405レスポンス
pub async fn method_not_allowed() -> RequestError {
    RequestError::MethodNotAllowed
}

/// サーバー状態レスポンス
#[derive(Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub version: String,
}

/// GET /api/status - サーバー状態を取得
pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ready".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
