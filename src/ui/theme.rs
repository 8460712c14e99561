//! テーマ
//!
//! ペイン各部のスタイル定義

use ratatui::style::{Color, Modifier, Style};

/// ペインのカラーテーマ
#[derive(Debug, Clone)]
pub struct Theme {
    /// ヘッダ行
    pub header: Style,
    /// 有効グリフ
    pub glyph_valid: Style,
    /// 無効グリフ
    pub glyph_invalid: Style,
    /// エラーメッセージパネル
    pub error_panel: Style,
    /// 行番号ガター
    pub line_number: Style,
    /// 本文
    pub text: Style,
    /// 現在の検索オカレンス
    pub search_current: Style,
    /// ミニバッファのプロンプト
    pub minibuffer_prompt: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            header: Style::default().fg(Color::Gray),
            glyph_valid: Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            glyph_invalid: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            error_panel: Style::default().fg(Color::Red),
            line_number: Style::default().fg(Color::DarkGray),
            text: Style::default(),
            search_current: Style::default().bg(Color::Yellow).fg(Color::Black),
            minibuffer_prompt: Style::default().add_modifier(Modifier::BOLD),
        }
    }
}
