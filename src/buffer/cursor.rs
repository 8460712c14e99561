//! カーソル位置管理
//!
//! テキストバッファ内でのカーソル位置を管理

/// バッファ内のカーソル位置
///
/// `char_pos` は文書先頭からの文字オフセット、`line` / `column` は
/// いずれも0始まりの表示用座標。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorPosition {
    /// 文書先頭からの文字オフセット
    pub char_pos: usize,
    /// 行（0始まり）
    pub line: usize,
    /// 列（0始まり、文字単位）
    pub column: usize,
}

impl CursorPosition {
    /// 先頭位置のカーソルを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定位置のカーソルを作成
    pub fn at(char_pos: usize, line: usize, column: usize) -> Self {
        Self { char_pos, line, column }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cursor_is_at_origin() {
        let cursor = CursorPosition::new();
        assert_eq!(cursor.char_pos, 0);
        assert_eq!(cursor.line, 0);
        assert_eq!(cursor.column, 0);
    }
}
