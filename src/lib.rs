//! koe-transcribe - 音声アップロード文字起こしサーバー
//!
//! このクレートは、ブラウザのレコーダーからアップロードされた音声ファイルを
//! 受け取り、OpenAI Whisper APIで文字起こしして結果をJSONで返す
//! ステートレスなWebサービスを提供します。
//!
//! # 主な機能
//!
//! - **multipartアップロード受付**: `POST /api/transcribe` で `audio` パートを受信
//! - **一時ファイルステージング**: 並行リクエストでも衝突しない一意なファイル名で退避
//! - **OpenAI Whisper API連携**: ステージング済みファイルを送信して文字起こし
//! - **確実なクリーンアップ**: 成功・失敗どちらの経路でも一時ファイルを削除
//!
//! # アーキテクチャ
//!
//! ```text
//! [Recorder SPA] → POST /api/transcribe (multipart)
//!                          ↓
//!                     [handlers] → [StagedAudio] (一時ファイル)
//!                          ↓
//!                  [TranscribeBackend] → OpenAI Whisper API
//!                          ↓
//!                 {success, text, timestamp}
//! ```
//!
//! # 使用例
//!
//! ```no_run
//! use koe_transcribe::config::Config;
//!
//! // 環境変数から設定を読み込み
//! let config = Config::from_env().unwrap();
//! ```

pub mod api_server;
pub mod config;
pub mod error;
pub mod handlers;
pub mod staging;
pub mod transcribe_backend;
pub mod types;
pub mod whisper_api;
