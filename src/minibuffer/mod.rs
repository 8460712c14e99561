//! ミニバッファモジュール
//!
//! ペイン下部の1行プロンプト。ファイル読込・検索・行移動の入力と、
//! 時限つきの情報メッセージ表示を担当する。エラーメッセージは
//! ミニバッファではなく上部のメッセージパネルに出る。

use crate::input::{Key, KeyCode};
use std::time::{Duration, Instant};

/// ミニバッファ設定
#[derive(Debug, Clone)]
pub struct MinibufferConfig {
    /// 情報メッセージの表示時間
    pub info_display_duration: Duration,
}

impl Default for MinibufferConfig {
    fn default() -> Self {
        Self {
            info_display_duration: Duration::from_secs(3),
        }
    }
}

/// ミニバッファの状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MinibufferMode {
    /// 非アクティブ
    Inactive,
    /// ファイルパス入力
    OpenFile,
    /// 検索語入力
    FindText,
    /// 行番号入力
    GotoLine,
    /// 情報メッセージ表示
    InfoDisplay { expires_at: Instant },
}

/// キー処理の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MinibufferResult {
    /// 入力継続
    Continue,
    /// ファイル読込が確定した
    OpenFile(String),
    /// 検索語が確定した
    Find(String),
    /// 行番号入力が確定した（パースは呼び出し側）
    GotoLine(String),
    /// キャンセルされた
    Cancel,
}

/// ミニバッファ
pub struct Minibuffer {
    mode: MinibufferMode,
    prompt: String,
    input: String,
    config: MinibufferConfig,
}

impl Minibuffer {
    /// 新しいミニバッファを作成
    pub fn new() -> Self {
        Self::with_config(MinibufferConfig::default())
    }

    /// 設定付きでミニバッファを作成
    pub fn with_config(config: MinibufferConfig) -> Self {
        Self {
            mode: MinibufferMode::Inactive,
            prompt: String::new(),
            input: String::new(),
            config,
        }
    }

    /// 現在のモードを取得
    pub fn mode(&self) -> &MinibufferMode {
        &self.mode
    }

    /// プロンプト入力中かどうか
    pub fn is_active(&self) -> bool {
        matches!(
            self.mode,
            MinibufferMode::OpenFile | MinibufferMode::FindText | MinibufferMode::GotoLine
        )
    }

    /// 現在のプロンプトを取得
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// 現在の入力内容を取得
    pub fn input(&self) -> &str {
        &self.input
    }

    /// ファイルパス入力を開始
    pub fn start_open_file(&mut self, initial: Option<&str>) {
        self.mode = MinibufferMode::OpenFile;
        self.prompt = "Open file: ".to_string();
        self.input = initial.unwrap_or("").to_string();
    }

    /// 検索語入力を開始（直近の検索語を初期値にできる）
    pub fn start_find(&mut self, initial: Option<&str>) {
        self.mode = MinibufferMode::FindText;
        self.prompt = "Find: ".to_string();
        self.input = initial.unwrap_or("").to_string();
    }

    /// 行番号入力を開始
    ///
    /// 初期値は現在行の次の行番号。
    pub fn start_goto_line(&mut self, line_count: usize, default_line: usize) {
        self.mode = MinibufferMode::GotoLine;
        self.prompt = format!("Go to line (1, {}): ", line_count);
        self.input = default_line.to_string();
    }

    /// 情報メッセージを表示
    pub fn show_info(&mut self, message: impl Into<String>) {
        self.mode = MinibufferMode::InfoDisplay {
            expires_at: Instant::now() + self.config.info_display_duration,
        };
        self.prompt = String::new();
        self.input = message.into();
    }

    /// 非アクティブ化
    pub fn deactivate(&mut self) {
        self.mode = MinibufferMode::Inactive;
        self.prompt.clear();
        self.input.clear();
    }

    /// 時限メッセージの失効処理
    pub fn process_timer(&mut self, now: Instant) {
        if let MinibufferMode::InfoDisplay { expires_at } = self.mode {
            if now >= expires_at {
                self.deactivate();
            }
        }
    }

    /// プロンプト入力中のキーを処理
    pub fn handle_key(&mut self, key: Key) -> MinibufferResult {
        if !self.is_active() {
            return MinibufferResult::Continue;
        }

        match key.code {
            KeyCode::Enter => {
                let value = std::mem::take(&mut self.input);
                let mode = std::mem::replace(&mut self.mode, MinibufferMode::Inactive);
                self.prompt.clear();
                match mode {
                    MinibufferMode::OpenFile => MinibufferResult::OpenFile(value),
                    MinibufferMode::FindText => MinibufferResult::Find(value),
                    MinibufferMode::GotoLine => MinibufferResult::GotoLine(value),
                    _ => MinibufferResult::Continue,
                }
            }
            KeyCode::Esc => {
                self.deactivate();
                MinibufferResult::Cancel
            }
            KeyCode::Char('g') if key.modifiers.ctrl => {
                self.deactivate();
                MinibufferResult::Cancel
            }
            KeyCode::Backspace => {
                self.input.pop();
                MinibufferResult::Continue
            }
            KeyCode::Char(ch) if !key.modifiers.ctrl && !key.modifiers.alt => {
                self.input.push(ch);
                MinibufferResult::Continue
            }
            _ => MinibufferResult::Continue,
        }
    }
}

impl Default for Minibuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;

    fn type_str(minibuffer: &mut Minibuffer, text: &str) {
        for ch in text.chars() {
            minibuffer.handle_key(Key::plain(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn starts_inactive() {
        let minibuffer = Minibuffer::new();
        assert!(!minibuffer.is_active());
        assert_eq!(*minibuffer.mode(), MinibufferMode::Inactive);
    }

    #[test]
    fn goto_line_prompt_prefills_next_line() {
        let mut minibuffer = Minibuffer::new();
        minibuffer.start_goto_line(10, 4);
        assert!(minibuffer.is_active());
        assert_eq!(minibuffer.input(), "4");
        assert_eq!(minibuffer.prompt(), "Go to line (1, 10): ");
    }

    #[test]
    fn enter_submits_goto_line_input() {
        let mut minibuffer = Minibuffer::new();
        minibuffer.start_goto_line(10, 2);
        minibuffer.handle_key(Key::plain(KeyCode::Backspace));
        type_str(&mut minibuffer, "7");

        let result = minibuffer.handle_key(Key::plain(KeyCode::Enter));
        assert_eq!(result, MinibufferResult::GotoLine("7".to_string()));
        assert!(!minibuffer.is_active());
    }

    #[test]
    fn escape_cancels() {
        let mut minibuffer = Minibuffer::new();
        minibuffer.start_find(None);
        type_str(&mut minibuffer, "abc");

        let result = minibuffer.handle_key(Key::plain(KeyCode::Esc));
        assert_eq!(result, MinibufferResult::Cancel);
        assert!(!minibuffer.is_active());
        assert_eq!(minibuffer.input(), "");
    }

    #[test]
    fn ctrl_g_cancels() {
        let mut minibuffer = Minibuffer::new();
        minibuffer.start_open_file(None);
        let result = minibuffer.handle_key(Key::ctrl('g'));
        assert_eq!(result, MinibufferResult::Cancel);
    }

    #[test]
    fn find_prompt_retains_initial_query() {
        let mut minibuffer = Minibuffer::new();
        minibuffer.start_find(Some("needle"));
        assert_eq!(minibuffer.input(), "needle");
    }

    #[test]
    fn info_message_expires() {
        let mut minibuffer = Minibuffer::with_config(MinibufferConfig {
            info_display_duration: Duration::from_millis(10),
        });
        minibuffer.show_info("loaded");
        assert!(matches!(minibuffer.mode(), MinibufferMode::InfoDisplay { .. }));

        minibuffer.process_timer(Instant::now() + Duration::from_millis(20));
        assert_eq!(*minibuffer.mode(), MinibufferMode::Inactive);
    }
}
