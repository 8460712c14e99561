//! メインアプリケーション構造体
//!
//! ペイン全体の状態管理とメインイベントループを実装。文書の変更通知と
//! デバウンス検証、整形・読込・検索・行移動の各操作をここで束ねる。

use crate::buffer::TextBuffer;
use crate::error::{display_message, Result, ShirabeError, UiError};
use crate::file::{expand_path, read_file};
use crate::input::{Command, Key, KeyMap, KeyProcessResult};
use crate::json::{JsonCodec, SerdeJsonCodec};
use crate::minibuffer::{Minibuffer, MinibufferResult};
use crate::search::SearchController;
use crate::ui::{RenderView, Renderer};
use crate::validate::{DebouncedValidator, ValidatorConfig, ValidityState};
use crossterm::event::{self, Event, KeyEvent};
use crossterm::execute;
use crossterm::style::Print;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// メインアプリケーション構造体
///
/// 全てのコンポーネントを統合し、ペインのライフサイクルを管理
pub struct App {
    /// アプリケーション実行状態
    running: bool,
    /// 文書バッファ
    buffer: TextBuffer,
    /// デバウンス付きバリデータ
    validator: DebouncedValidator<SerdeJsonCodec>,
    /// 整形用コーデック
    codec: SerdeJsonCodec,
    /// ミニバッファ
    minibuffer: Minibuffer,
    /// キーマップ
    keymap: KeyMap,
    /// 検索コントローラ
    search: SearchController,
    /// レンダラー
    renderer: Renderer,
    /// メッセージパネルの内容（`None` なら非表示）
    error_panel: Option<String>,
    /// 直前に開いたファイルのディレクトリ
    last_directory: Option<PathBuf>,
    /// フィードバックキュー（ベル）の発火回数
    feedback_cues: u64,
}

impl App {
    /// 新しいアプリケーションインスタンスを作成
    pub fn new() -> Result<Self> {
        Self::with_config(ValidatorConfig::default())
    }

    /// バリデータ設定付きでインスタンスを作成
    pub fn with_config(config: ValidatorConfig) -> Result<Self> {
        Ok(Self {
            running: true,
            buffer: TextBuffer::new(),
            validator: DebouncedValidator::new(SerdeJsonCodec::new(), config),
            codec: SerdeJsonCodec::new(),
            minibuffer: Minibuffer::new(),
            keymap: KeyMap::new(),
            search: SearchController::new(),
            renderer: Renderer::new(),
            error_panel: None,
            last_directory: None,
            feedback_cues: 0,
        })
    }

    /// メインイベントループを実行
    pub fn run(&mut self) -> Result<()> {
        enter_terminal()?;

        let backend = CrosstermBackend::new(stdout());
        let mut terminal = Terminal::new(backend)
            .map_err(|err| terminal_error("terminal init", err))?;

        let loop_result = self.event_loop(&mut terminal);
        drop(terminal);
        let cleanup_result = leave_terminal();

        loop_result.and(cleanup_result)
    }

    /// アプリケーションが実行中かどうかを確認
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// アプリケーションを終了状態にする
    pub fn shutdown(&mut self) {
        self.running = false;
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while self.running {
            let now = Instant::now();
            self.minibuffer.process_timer(now);
            self.poll_validation(now);
            self.render(terminal)?;

            if event::poll(Duration::from_millis(16))
                .map_err(|err| terminal_error("event poll", err))?
            {
                match event::read().map_err(|err| terminal_error("event read", err))? {
                    Event::Key(key_event) => self.handle_key_event(key_event)?,
                    Event::Resize(_, _) => {
                        // 次回描画で自動的に反映されるため処理不要
                    }
                    _ => {}
                }
            }
        }

        Ok(())
    }

    fn render<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let view = RenderView {
            buffer: &self.buffer,
            validity: self.validator.state(),
            error_message: self.error_panel.as_deref(),
            minibuffer: &self.minibuffer,
            current_match: self.search.current_match(),
        };
        self.renderer
            .render(terminal, &view)
            .map_err(|err| terminal_error("render", err))
    }

    /// キーイベントを処理
    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> Result<()> {
        if self.minibuffer.is_active() {
            self.handle_minibuffer_key(key_event);
            return Ok(());
        }

        match self.keymap.process_key_event(key_event) {
            KeyProcessResult::Command(command) => self.execute_command(command),
            KeyProcessResult::NoMatch => Ok(()),
        }
    }

    fn handle_minibuffer_key(&mut self, key_event: KeyEvent) {
        let key = Key::from(key_event);
        match self.minibuffer.handle_key(key) {
            MinibufferResult::OpenFile(path) => self.load_from_file(&path),
            MinibufferResult::Find(query) => self.find_text(&query),
            MinibufferResult::GotoLine(raw) => self.goto_line_input(&raw),
            MinibufferResult::Cancel | MinibufferResult::Continue => {}
        }
    }

    /// コマンドを実行
    pub fn execute_command(&mut self, command: Command) -> Result<()> {
        match command {
            Command::OpenFile => {
                let initial = self
                    .last_directory
                    .as_ref()
                    .map(|dir| format!("{}/", dir.display()));
                self.minibuffer.start_open_file(initial.as_deref());
            }
            Command::FormatPretty => self.format_pretty(),
            Command::FormatCompact => self.format_compact(),
            Command::FindText => {
                let initial = self.search.last_query().to_string();
                let initial = (!initial.is_empty()).then_some(initial);
                self.minibuffer.start_find(initial.as_deref());
            }
            Command::GotoLine => {
                // 初期値は現在行（1始まり）+ 1
                let default_line = self.buffer.cursor().line + 2;
                self.minibuffer
                    .start_goto_line(self.buffer.line_count(), default_line);
            }
            Command::Quit => self.shutdown(),

            Command::InsertChar(ch) => {
                self.buffer.insert_char(ch);
                self.on_document_change();
            }
            Command::InsertNewline => {
                self.buffer.insert_newline();
                self.on_document_change();
            }
            Command::DeleteBackwardChar => {
                if self.buffer.delete_backward() {
                    self.on_document_change();
                }
            }
            Command::DeleteChar => {
                if self.buffer.delete_forward() {
                    self.on_document_change();
                }
            }

            Command::MoveCharForward => {
                self.buffer.move_char_forward();
            }
            Command::MoveCharBackward => {
                self.buffer.move_char_backward();
            }
            Command::MoveLineUp => {
                self.buffer.move_line_up();
            }
            Command::MoveLineDown => {
                self.buffer.move_line_down();
            }
            Command::MoveLineStart => self.buffer.move_line_start(),
            Command::MoveLineEnd => self.buffer.move_line_end(),
        }
        Ok(())
    }

    /// 文書変更の後処理
    ///
    /// デバウンスタイマーを再始動し、古くなった検索オカレンスを破棄する。
    fn on_document_change(&mut self) {
        self.validator.notify_change(Instant::now());
        self.search.clear();
    }

    /// 検証の締め切りを確認し、結果をパネル表示へ反映
    fn poll_validation(&mut self, now: Instant) {
        let text = self.buffer.text().to_string();
        if let Some(state) = self.validator.poll(now, &text) {
            match state {
                ValidityState::Invalid { message } => {
                    self.error_panel = Some(message.clone());
                }
                ValidityState::Valid | ValidityState::Unknown => {
                    self.error_panel = None;
                }
            }
        }
    }

    /// 展開整形（C-q）
    ///
    /// 失敗時は文書を一切変更せず、メッセージパネルに理由を表示する。
    pub fn format_pretty(&mut self) {
        self.format_with(|codec, text| codec.to_pretty(text));
    }

    /// 最小化整形（C-w）
    pub fn format_compact(&mut self) {
        self.format_with(|codec, text| codec.to_compact(text));
    }

    fn format_with<F>(&mut self, format: F)
    where
        F: FnOnce(&SerdeJsonCodec, &str) -> std::result::Result<String, crate::error::JsonError>,
    {
        if self.buffer.is_blank() {
            return;
        }

        match format(&self.codec, self.buffer.text()) {
            Ok(formatted) => {
                self.buffer.replace_all(formatted);
                self.error_panel = None;
                self.on_document_change();
            }
            Err(err) => {
                log::warn!("json format failed: {}", err);
                self.show_error(ShirabeError::Json(err));
            }
        }
    }

    /// ファイルを読み込んで文書全体を置き換える
    pub fn load_from_file(&mut self, path_input: &str) {
        if path_input.trim().is_empty() {
            self.minibuffer.show_info("ファイル名を入力してください");
            return;
        }

        let loaded = expand_path(path_input).and_then(|path| {
            let content = read_file(&path)?;
            Ok((path, content))
        });

        match loaded {
            Ok((path, content)) => {
                self.buffer.replace_all(content);
                self.on_document_change();
                self.last_directory = path.parent().map(|p| p.to_path_buf());
                self.minibuffer
                    .show_info(format!("ファイルを読み込みました: {}", path.display()));
            }
            Err(err) => {
                log::warn!("file load failed: {}", err);
                self.show_error(err);
            }
        }
    }

    /// カーソル位置から前方検索
    ///
    /// 見つからない場合はフィードバックキューを鳴らし、カーソルは動かさない。
    pub fn find_text(&mut self, query: &str) {
        if !self.search.find_forward(&mut self.buffer, query) {
            self.error_feedback_cue();
        }
    }

    /// 行移動プロンプトの入力を処理
    ///
    /// 整数でない入力や範囲外の行番号はフィードバックキューのみで
    /// 通知し、カーソルは動かさない（メッセージパネルには出さない）。
    pub fn goto_line_input(&mut self, raw: &str) {
        let Ok(line) = raw.trim().parse::<i64>() else {
            self.error_feedback_cue();
            return;
        };

        if let Err(err) = self.buffer.set_cursor_at_line(line) {
            log::warn!("goto line rejected: {}", err);
            self.error_feedback_cue();
        }
    }

    /// エラーをメッセージパネルへ表示
    fn show_error(&mut self, error: ShirabeError) {
        self.error_panel = Some(display_message(&error));
    }

    /// プラットフォームのエラーフィードバックキュー（端末ベル）
    fn error_feedback_cue(&mut self) {
        self.feedback_cues += 1;
        let _ = execute!(stdout(), Print("\u{7}"));
    }

    // --- 以下、テスト支援用の公開アクセサ ---

    /// 文書内容を取得（テスト支援用）
    pub fn buffer_text(&self) -> &str {
        self.buffer.text()
    }

    /// 文書バッファへの参照を取得（テスト支援用）
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// 文字列を挿入（テスト支援用）
    pub fn insert_str(&mut self, s: &str) {
        self.buffer.insert_str(s);
        self.on_document_change();
    }

    /// 指定時刻で検証締め切りを確認（テスト支援用）
    pub fn poll_validation_at(&mut self, now: Instant) {
        self.poll_validation(now);
    }

    /// 現在の検証状態を取得（テスト支援用）
    pub fn validity_state(&self) -> &ValidityState {
        self.validator.state()
    }

    /// メッセージパネルの内容を取得（テスト支援用）
    pub fn error_panel_message(&self) -> Option<&str> {
        self.error_panel.as_deref()
    }

    /// フィードバックキューの発火回数を取得（テスト支援用）
    pub fn feedback_cue_count(&self) -> u64 {
        self.feedback_cues
    }
}

fn enter_terminal() -> Result<()> {
    enable_raw_mode().map_err(|err| terminal_error("enable raw mode", err))?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen).map_err(|err| terminal_error("enter alternate screen", err))?;
    Ok(())
}

fn leave_terminal() -> Result<()> {
    let mut out = stdout();
    execute!(out, LeaveAlternateScreen).map_err(|err| terminal_error("leave alternate screen", err))?;
    disable_raw_mode().map_err(|err| terminal_error("disable raw mode", err))?;
    Ok(())
}

fn terminal_error(context: &str, err: impl std::fmt::Display) -> ShirabeError {
    ShirabeError::Ui(UiError::RenderingFailed {
        component: format!("{}: {}", context, err),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode as CKeyCode, KeyEvent, KeyModifiers as CModifiers};

    fn app_with_quiet_ms(ms: u64) -> App {
        App::with_config(ValidatorConfig {
            quiet_interval: Duration::from_millis(ms),
        })
        .unwrap()
    }

    fn settle(app: &mut App) {
        // 静止期間経過後の締め切りを直接発火させる
        app.poll_validation_at(Instant::now() + Duration::from_secs(10));
    }

    #[test]
    fn typing_arms_the_validator() {
        let mut app = app_with_quiet_ms(50);
        app.insert_str("{\"a\":1}");
        assert_eq!(*app.validity_state(), ValidityState::Unknown);

        settle(&mut app);
        assert_eq!(*app.validity_state(), ValidityState::Valid);
        assert!(app.error_panel_message().is_none());
    }

    #[test]
    fn invalid_document_shows_panel_message() {
        let mut app = app_with_quiet_ms(50);
        app.insert_str("{\"a\":1,}");
        settle(&mut app);

        match app.validity_state() {
            ValidityState::Invalid { .. } => {}
            other => panic!("unexpected state: {:?}", other),
        }
        let message = app.error_panel_message().unwrap();
        assert!(message.contains("at line 1 col"), "{}", message);
    }

    #[test]
    fn format_failure_leaves_document_unchanged() {
        let mut app = app_with_quiet_ms(50);
        app.insert_str("{\"a\":1,}");
        let before = app.buffer_text().to_string();

        app.format_pretty();
        assert_eq!(app.buffer_text(), before);
        assert!(app.error_panel_message().is_some());
    }

    #[test]
    fn format_pretty_then_validates_valid() {
        let mut app = app_with_quiet_ms(50);
        app.insert_str("{\"a\":1}");
        app.format_pretty();
        assert!(app.buffer_text().contains('\n'));

        settle(&mut app);
        assert_eq!(*app.validity_state(), ValidityState::Valid);
    }

    #[test]
    fn blank_document_clears_glyph_and_panel() {
        let mut app = app_with_quiet_ms(50);
        app.insert_str("{\"a\":1,}");
        settle(&mut app);
        assert!(app.error_panel_message().is_some());

        // 全削除して空白にする
        let backspace = KeyEvent::new(CKeyCode::Backspace, CModifiers::NONE);
        for _ in 0..8 {
            app.handle_key_event(backspace).unwrap();
        }
        settle(&mut app);

        assert_eq!(*app.validity_state(), ValidityState::Unknown);
        assert!(app.error_panel_message().is_none());
    }

    #[test]
    fn goto_line_bad_input_rings_cue_and_keeps_cursor() {
        let mut app = app_with_quiet_ms(50);
        app.insert_str("{\"a\":1,\n\"b\":2}");
        let before = app.buffer().cursor().char_pos;

        app.goto_line_input("abc");
        app.goto_line_input("0");
        app.goto_line_input("99");

        assert_eq!(app.feedback_cue_count(), 3);
        assert_eq!(app.buffer().cursor().char_pos, before);
    }

    #[test]
    fn goto_line_valid_input_moves_cursor() {
        let mut app = app_with_quiet_ms(50);
        app.insert_str("{\"a\":1,\n\"b\":2}");

        app.goto_line_input("2");
        assert_eq!(app.buffer().cursor().char_pos, 8);
        assert_eq!(app.feedback_cue_count(), 0);
    }

    #[test]
    fn search_miss_rings_cue() {
        let mut app = app_with_quiet_ms(50);
        app.insert_str("{\"a\":1}");
        app.goto_line_input("1");
        let before = app.buffer().cursor().char_pos;

        app.find_text("zzz");
        assert_eq!(app.feedback_cue_count(), 1);
        assert_eq!(app.buffer().cursor().char_pos, before);
    }

    #[test]
    fn quit_shortcut_stops_the_app() {
        let mut app = app_with_quiet_ms(50);
        let ctrl_c = KeyEvent::new(CKeyCode::Char('c'), CModifiers::CONTROL);
        app.handle_key_event(ctrl_c).unwrap();
        assert!(!app.is_running());
    }
}
