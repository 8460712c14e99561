//! 編集可能テキストモデル
//!
//! ペインの文書を保持する編集モデル。UIフレームワークには依存せず、
//! カーソル位置と変更通知用のリビジョン番号を併せて管理する。
//! 行インデックスは導出ビューであり編集のたびに再計算される。

use super::cursor::CursorPosition;
use super::line_index::LineIndex;
use crate::error::BufferError;

/// 編集可能テキストバッファ
///
/// 文書の唯一の所有者。全ての変更はここを経由し、リビジョン番号を
/// 進めることで変更通知の代わりとする。
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    /// 文書本体
    text: String,
    /// カーソル位置
    cursor: CursorPosition,
    /// 変更リビジョン（変更のたびに単調増加）
    revision: u64,
}

impl TextBuffer {
    /// 空のバッファを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 初期テキスト付きでバッファを作成
    pub fn from_str(text: &str) -> Self {
        Self {
            text: text.to_string(),
            cursor: CursorPosition::new(),
            revision: 0,
        }
    }

    /// 文書テキストを取得
    pub fn text(&self) -> &str {
        &self.text
    }

    /// 文書の文字数を取得
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// 空白のみ（または空）かどうか
    pub fn is_blank(&self) -> bool {
        self.text.chars().all(char::is_whitespace)
    }

    /// 変更リビジョンを取得
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// 現在のカーソル位置を取得
    pub fn cursor(&self) -> &CursorPosition {
        &self.cursor
    }

    /// 行インデックスを構築（呼び出し時点の文書から導出）
    pub fn line_index(&self) -> LineIndex {
        LineIndex::new(&self.text)
    }

    /// 行数を取得（空文書でも1）
    pub fn line_count(&self) -> usize {
        self.line_index().line_count()
    }

    /// カーソルを指定行（1始まり）の行頭へ移動
    ///
    /// 範囲外の行番号は `BufferError::InvalidLineNumber`。文書は変更しない。
    pub fn set_cursor_at_line(&mut self, line: i64) -> Result<(), BufferError> {
        let index = self.line_index();
        if line < 1 || line > index.line_count() as i64 {
            return Err(BufferError::InvalidLineNumber { line });
        }
        let char_pos = index
            .line_start(line as usize)
            .ok_or(BufferError::InvalidLineNumber { line })?;
        self.cursor = CursorPosition::at(char_pos, line as usize - 1, 0);
        Ok(())
    }

    /// カーソルを指定の文字オフセットへ移動
    pub fn set_cursor_char(&mut self, char_pos: usize) -> Result<(), BufferError> {
        if char_pos > self.char_count() {
            return Err(BufferError::InvalidCursorPosition { position: char_pos });
        }
        self.cursor.char_pos = char_pos;
        self.sync_cursor_coordinates();
        Ok(())
    }

    /// カーソル位置に文字を挿入
    pub fn insert_char(&mut self, ch: char) {
        let byte = self.byte_of_char(self.cursor.char_pos);
        self.text.insert(byte, ch);
        self.cursor.char_pos += 1;
        self.sync_cursor_coordinates();
        self.revision += 1;
    }

    /// カーソル位置に文字列を挿入
    pub fn insert_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        let byte = self.byte_of_char(self.cursor.char_pos);
        self.text.insert_str(byte, s);
        self.cursor.char_pos += s.chars().count();
        self.sync_cursor_coordinates();
        self.revision += 1;
    }

    /// カーソル位置に改行を挿入
    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
    }

    /// カーソル直前の1文字を削除
    ///
    /// 戻り値は削除が行われたかどうか
    pub fn delete_backward(&mut self) -> bool {
        if self.cursor.char_pos == 0 {
            return false;
        }
        let start = self.byte_of_char(self.cursor.char_pos - 1);
        let end = self.byte_of_char(self.cursor.char_pos);
        self.text.replace_range(start..end, "");
        self.cursor.char_pos -= 1;
        self.sync_cursor_coordinates();
        self.revision += 1;
        true
    }

    /// カーソル直後の1文字を削除
    pub fn delete_forward(&mut self) -> bool {
        if self.cursor.char_pos >= self.char_count() {
            return false;
        }
        let start = self.byte_of_char(self.cursor.char_pos);
        let end = self.byte_of_char(self.cursor.char_pos + 1);
        self.text.replace_range(start..end, "");
        self.revision += 1;
        true
    }

    /// 文書全体を置き換える
    ///
    /// 整形やファイル読込の結果を反映する経路。カーソルは先頭に戻る。
    pub fn replace_all(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = CursorPosition::new();
        self.revision += 1;
    }

    /// カーソルを1文字進める
    pub fn move_char_forward(&mut self) -> bool {
        if self.cursor.char_pos >= self.char_count() {
            return false;
        }
        self.cursor.char_pos += 1;
        self.sync_cursor_coordinates();
        true
    }

    /// カーソルを1文字戻す
    pub fn move_char_backward(&mut self) -> bool {
        if self.cursor.char_pos == 0 {
            return false;
        }
        self.cursor.char_pos -= 1;
        self.sync_cursor_coordinates();
        true
    }

    /// カーソルを1行上へ（列は行長でクランプ）
    pub fn move_line_up(&mut self) -> bool {
        if self.cursor.line == 0 {
            return false;
        }
        self.move_to_line_column(self.cursor.line - 1, self.cursor.column);
        true
    }

    /// カーソルを1行下へ（列は行長でクランプ）
    pub fn move_line_down(&mut self) -> bool {
        let index = self.line_index();
        if self.cursor.line + 1 >= index.line_count() {
            return false;
        }
        self.move_to_line_column(self.cursor.line + 1, self.cursor.column);
        true
    }

    /// カーソルを行頭へ
    pub fn move_line_start(&mut self) {
        self.move_to_line_column(self.cursor.line, 0);
    }

    /// カーソルを行末へ
    pub fn move_line_end(&mut self) {
        let target = self.line_char_len(self.cursor.line);
        self.move_to_line_column(self.cursor.line, target);
    }

    /// 指定行の文字数（改行を含まない）
    fn line_char_len(&self, line: usize) -> usize {
        self.text
            .split('\n')
            .nth(line)
            .map(|l| l.chars().count())
            .unwrap_or(0)
    }

    /// 行・列指定の移動（列は行長でクランプ）
    fn move_to_line_column(&mut self, line: usize, column: usize) {
        let index = self.line_index();
        let Some(start) = index.line_start(line + 1) else {
            return;
        };
        let clamped = column.min(self.line_char_len(line));
        self.cursor = CursorPosition::at(start + clamped, line, clamped);
    }

    /// `char_pos` から行・列を再計算
    fn sync_cursor_coordinates(&mut self) {
        let index = self.line_index();
        let line = index.line_of(self.cursor.char_pos);
        let start = index.line_start(line + 1).unwrap_or(0);
        self.cursor.line = line;
        self.cursor.column = self.cursor.char_pos - start;
    }

    /// 文字オフセットからバイトオフセットへの変換
    fn byte_of_char(&self, char_pos: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_pos)
            .map(|(idx, _)| idx)
            .unwrap_or(self.text.len())
    }
}
