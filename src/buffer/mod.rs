//! バッファモジュール
//!
//! 編集可能テキストモデルと行指向ナビゲーション

pub mod cursor;
pub mod line_index;
pub mod text_buffer;

pub use cursor::CursorPosition;
pub use line_index::LineIndex;
pub use text_buffer::TextBuffer;
