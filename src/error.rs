//! エラーハンドリングシステム
//!
//! shirabe 全体で使用される統一されたエラー型とユーティリティを定義。
//! 検証・整形・ファイル読込の失敗は全てメッセージパネル表示に変換され、
//! どの失敗経路でもペインは操作可能なまま残る。

use thiserror::Error;

/// アプリケーション全体のエラー型
#[derive(Error, Debug, Clone)]
pub enum ShirabeError {
    /// JSON検証・整形エラー
    #[error(transparent)]
    Json(#[from] JsonError),

    /// ファイル操作エラー
    #[error("File operation failed")]
    File(#[from] FileError),

    /// バッファ操作エラー
    #[error("Buffer operation failed")]
    Buffer(#[from] BufferError),

    /// UI操作エラー
    #[error("UI operation failed")]
    Ui(#[from] UiError),

    /// アプリケーション論理エラー
    #[error("Application error: {0}")]
    Application(String),
}

/// JSON検証・整形固有のエラー
///
/// 元メッセージの抽出規則:
/// * `Parse` は位置情報付きで `"<message> at line <L> col <C>"` と表示
/// * `Syntax` は既知マーカーまでの診断的接頭辞を除去したメッセージを表示
#[derive(Error, Debug, Clone)]
pub enum JsonError {
    #[error("{message} at line {line} col {column}")]
    Parse {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("{message}")]
    Syntax { message: String },
}

/// `Syntax` エラーの接頭辞除去マーカー
///
/// serde_json の詳細メッセージは `"... error: <本文>"` の形を取るため、
/// マーカーまでを削って本文だけを残す。
const SYNTAX_MARKER: &str = "error: ";

impl JsonError {
    /// serde_json のエラーから位置情報付き `Parse` を構築
    ///
    /// serde_json の `Display` は末尾に `" at line L column C"` を含むため、
    /// 重複しないよう位置句を取り除いた本文を保持する。
    pub fn parse(err: &serde_json::Error) -> Self {
        let full = err.to_string();
        let message = match full.rfind(" at line ") {
            Some(idx) => full[..idx].to_string(),
            None => full,
        };
        Self::Parse {
            message,
            line: err.line(),
            column: err.column(),
        }
    }

    /// 整形経路のエラーから `Syntax` を構築（マーカーまでの接頭辞を除去）
    pub fn syntax(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let message = match raw.find(SYNTAX_MARKER) {
            Some(idx) => raw[idx + SYNTAX_MARKER.len()..].to_string(),
            None => raw,
        };
        Self::Syntax { message }
    }
}

/// ファイル操作固有のエラー
#[derive(Error, Debug, Clone)]
pub enum FileError {
    #[error("File not found: {path}")]
    NotFound { path: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid path: {path}")]
    InvalidPath { path: String },

    #[error("IO error: {message}")]
    Io { message: String },
}

/// バッファ操作固有のエラー
#[derive(Error, Debug, Clone)]
pub enum BufferError {
    /// 行番号指定が範囲外（1始まり）
    #[error("Invalid line number: {line}")]
    InvalidLineNumber { line: i64 },

    #[error("Invalid cursor position: {position}")]
    InvalidCursorPosition { position: usize },
}

/// UI操作固有のエラー
#[derive(Error, Debug, Clone)]
pub enum UiError {
    #[error("Terminal initialization failed")]
    TerminalInit,

    #[error("Rendering failed: {component}")]
    RenderingFailed { component: String },
}

/// アプリケーション用 `Result` 型エイリアス
pub type Result<T> = std::result::Result<T, ShirabeError>;

impl From<std::io::Error> for ShirabeError {
    fn from(err: std::io::Error) -> Self {
        ShirabeError::File(FileError::Io {
            message: err.to_string(),
        })
    }
}

/// エラーをメッセージパネル向けの1行テキストに変換
///
/// `Json` は variant ごとの表示規則（位置付き / 接頭辞除去済み）を使い、
/// それ以外は素のメッセージをそのまま使う。
pub fn display_message(error: &ShirabeError) -> String {
    match error {
        ShirabeError::Json(err) => err.to_string(),
        ShirabeError::File(err) => err.to_string(),
        ShirabeError::Buffer(err) => err.to_string(),
        ShirabeError::Ui(err) => err.to_string(),
        ShirabeError::Application(message) => message.clone(),
    }
}

/// パニックハンドラを設定
///
/// raw mode 中のパニックでもスタックトレースを残して即座に終了する。
pub fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        let location = panic_info
            .location()
            .unwrap_or_else(|| std::panic::Location::caller());

        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s
        } else {
            "Unknown panic payload"
        };

        eprintln!("PANIC at {}:{}: {}", location.file(), location.line(), message);
        eprintln!("Stack trace: {}", std::backtrace::Backtrace::capture());

        std::process::exit(1);
    }));
}
