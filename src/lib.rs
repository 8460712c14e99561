//! shirabe - JSON閲覧・整形ペイン
//!
//! デバウンス付きJSON検証、整形（展開・最小化）、ファイル読込、
//! 前方検索、行移動を備えたターミナルペイン。
//!
//! # アーキテクチャ
//!
//! - `buffer`: 文書バッファと行インデックス
//! - `json`: JSONコーデック（検証・整形）
//! - `validate`: デバウンスタイマーと検証状態機械
//! - `search`: 前方リテラル検索
//! - `file`: パス展開とファイル読込
//! - `minibuffer`: プロンプト入力とメッセージ表示
//! - `input`: キーバインドとコマンド
//! - `ui`: ratatuiによる描画
//! - `app`: 全体を束ねるメインループ

pub mod app;
pub mod buffer;
pub mod error;
pub mod file;
pub mod input;
pub mod json;
pub mod logging;
pub mod minibuffer;
pub mod search;
pub mod ui;
pub mod validate;

// 公開API
pub use app::App;
pub use buffer::{CursorPosition, LineIndex, TextBuffer};
pub use error::{JsonError, Result, ShirabeError};
pub use json::{JsonCodec, SerdeJsonCodec};
pub use search::{SearchController, SearchMatch};
pub use validate::{DebouncedValidator, ValidatorConfig, ValidityState};
