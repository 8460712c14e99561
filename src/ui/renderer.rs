//! レンダラー
//!
//! ratatui によるペイン描画。上からヘッダ（検証グリフとキーヒント）、
//! エラーメッセージパネル（表示中のみ）、行番号付きテキスト領域、
//! ミニバッファ行の順に並べる。

use crate::buffer::TextBuffer;
use crate::minibuffer::{Minibuffer, MinibufferMode};
use crate::search::SearchMatch;
use crate::ui::theme::Theme;
use crate::ui::viewport::ViewportState;
use crate::validate::ValidityState;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use unicode_width::UnicodeWidthStr;

/// 1フレーム分の描画入力
pub struct RenderView<'a> {
    /// 文書バッファ
    pub buffer: &'a TextBuffer,
    /// 検証状態（グリフ表示）
    pub validity: &'a ValidityState,
    /// メッセージパネルの内容（`None` ならパネル非表示）
    pub error_message: Option<&'a str>,
    /// ミニバッファ
    pub minibuffer: &'a Minibuffer,
    /// 現在の検索オカレンス
    pub current_match: Option<&'a SearchMatch>,
}

/// ペインレンダラー
pub struct Renderer {
    theme: Theme,
    viewport: ViewportState,
}

impl Renderer {
    /// 既定テーマでレンダラーを作成
    pub fn new() -> Self {
        Self {
            theme: Theme::default(),
            viewport: ViewportState::new(),
        }
    }

    /// 1フレームを描画
    pub fn render<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        view: &RenderView<'_>,
    ) -> std::io::Result<()> {
        terminal.draw(|frame| self.draw(frame, view))?;
        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame<'_>, view: &RenderView<'_>) {
        let show_panel = view.error_message.is_some();
        let mut constraints = vec![Constraint::Length(1)];
        if show_panel {
            constraints.push(Constraint::Length(1));
        }
        constraints.push(Constraint::Min(1));
        constraints.push(Constraint::Length(1));

        let areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(frame.area());

        let mut idx = 0;
        self.draw_header(frame, areas[idx], view);
        idx += 1;

        if let Some(message) = view.error_message {
            let panel = Paragraph::new(message).style(self.theme.error_panel);
            frame.render_widget(panel, areas[idx]);
            idx += 1;
        }

        let text_area = areas[idx];
        let minibuffer_area = areas[idx + 1];

        self.draw_text_area(frame, text_area, view);
        self.draw_minibuffer(frame, minibuffer_area, view);

        self.place_cursor(frame, text_area, minibuffer_area, view);
    }

    fn draw_header(&self, frame: &mut Frame<'_>, area: Rect, view: &RenderView<'_>) {
        let (glyph, glyph_style) = match view.validity {
            ValidityState::Valid => ("✓", self.theme.glyph_valid),
            ValidityState::Invalid { .. } => ("✗", self.theme.glyph_invalid),
            ValidityState::Unknown => (" ", self.theme.header),
        };

        let header = Line::from(vec![
            Span::styled(format!(" {} ", glyph), glyph_style),
            Span::styled(
                "shirabe │ C-o open  C-q format  C-w deformat  C-f find  C-l line  C-c quit",
                self.theme.header,
            ),
        ]);
        frame.render_widget(Paragraph::new(header), area);
    }

    fn draw_text_area(&mut self, frame: &mut Frame<'_>, area: Rect, view: &RenderView<'_>) {
        self.viewport.set_height(area.height as usize);

        let lines: Vec<&str> = view.buffer.text().split('\n').collect();
        self.viewport.clamp(lines.len());
        self.viewport.ensure_visible(view.buffer.cursor().line);

        let gutter_width = Self::gutter_width(lines.len());
        let top = self.viewport.top_line();
        let visible = lines
            .iter()
            .enumerate()
            .skip(top)
            .take(area.height as usize);

        let mut rendered = Vec::with_capacity(area.height as usize);
        for (line_idx, content) in visible {
            let number = Span::styled(
                format!("{:>width$} ", line_idx + 1, width = gutter_width),
                self.theme.line_number,
            );

            let mut spans = vec![number];
            spans.extend(self.content_spans(line_idx, content, view.current_match));
            rendered.push(Line::from(spans));
        }

        frame.render_widget(Paragraph::new(rendered), area);
    }

    /// 行本文のスパン列（検索オカレンスの行は3分割でハイライト）
    fn content_spans(
        &self,
        line_idx: usize,
        content: &str,
        current_match: Option<&SearchMatch>,
    ) -> Vec<Span<'static>> {
        if let Some(found) = current_match {
            if found.line == line_idx {
                let chars: Vec<char> = content.chars().collect();
                let match_len = found.end - found.start;
                let match_end = (found.column + match_len).min(chars.len());

                let before: String = chars[..found.column.min(chars.len())].iter().collect();
                let matched: String = chars[found.column.min(chars.len())..match_end].iter().collect();
                let after: String = chars[match_end..].iter().collect();

                return vec![
                    Span::styled(before, self.theme.text),
                    Span::styled(matched, self.theme.search_current),
                    Span::styled(after, self.theme.text),
                ];
            }
        }
        vec![Span::styled(content.to_string(), self.theme.text)]
    }

    fn draw_minibuffer(&self, frame: &mut Frame<'_>, area: Rect, view: &RenderView<'_>) {
        let minibuffer = view.minibuffer;
        let line = match minibuffer.mode() {
            MinibufferMode::Inactive => Line::default(),
            MinibufferMode::InfoDisplay { .. } => Line::from(minibuffer.input().to_string()),
            _ => Line::from(vec![
                Span::styled(minibuffer.prompt().to_string(), self.theme.minibuffer_prompt),
                Span::raw(minibuffer.input().to_string()),
            ]),
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn place_cursor(
        &self,
        frame: &mut Frame<'_>,
        text_area: Rect,
        minibuffer_area: Rect,
        view: &RenderView<'_>,
    ) {
        if view.minibuffer.is_active() {
            let prefix = format!("{}{}", view.minibuffer.prompt(), view.minibuffer.input());
            let x = minibuffer_area.x + prefix.width() as u16;
            frame.set_cursor_position((x.min(minibuffer_area.right().saturating_sub(1)), minibuffer_area.y));
            return;
        }

        let cursor = view.buffer.cursor();
        let top = self.viewport.top_line();
        if cursor.line < top || cursor.line >= top + self.viewport.height() {
            return;
        }

        let lines: Vec<&str> = view.buffer.text().split('\n').collect();
        let gutter_width = Self::gutter_width(lines.len());
        let prefix: String = lines
            .get(cursor.line)
            .map(|l| l.chars().take(cursor.column).collect())
            .unwrap_or_default();

        let x = text_area.x + (gutter_width + 1 + prefix.width()) as u16;
        let y = text_area.y + (cursor.line - top) as u16;
        frame.set_cursor_position((x.min(text_area.right().saturating_sub(1)), y));
    }

    fn gutter_width(line_count: usize) -> usize {
        line_count.to_string().len().max(2)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
