//! ロギングシステム
//!
//! `log` ファサードの stderr バックエンド。検証・整形・ファイル読込の
//! 失敗は warn レベルで記録してからメッセージパネルへ変換される。

use log::{Level, Log, Metadata, Record};

/// stderr 向けロガー
///
/// raw mode 中でも安全なように出力は stderr のみ。ログレベルは
/// `SHIRABE_LOG` 環境変数（`trace` / `debug` / `info` / `warn` / `error`）で制御する。
struct StderrLogger {
    level: Level,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5}] {}: {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

/// 環境変数からログレベルを決定
fn level_from_env() -> Level {
    match std::env::var("SHIRABE_LOG").ok().as_deref() {
        Some("trace") => Level::Trace,
        Some("debug") => Level::Debug,
        Some("info") => Level::Info,
        Some("error") => Level::Error,
        _ => Level::Warn,
    }
}

/// ロガーを初期化
///
/// 2回目以降の呼び出しは無視される（テストから複数回呼ばれても安全）。
pub fn init() {
    let level = level_from_env();
    let logger = Box::new(StderrLogger { level });
    if log::set_boxed_logger(logger).is_ok() {
        log::set_max_level(level.to_level_filter());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_level_is_warn() {
        // 環境変数未設定ならwarn
        if std::env::var("SHIRABE_LOG").is_err() {
            assert_eq!(level_from_env(), Level::Warn);
        }
    }

    #[test]
    fn double_init_is_harmless() {
        init();
        init();
    }
}
