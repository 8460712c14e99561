//! 行インデックス
//!
//! 文書テキストから導出される読み取り専用の行ビュー。行番号（1始まり）から
//! 行頭の文字オフセットへの変換と行数の取得を提供する。編集のたびに
//! 作り直す前提の使い捨て構造で、編集をまたいでキャッシュしてはならない。

/// 行インデックス
///
/// 行は改行区切りのセグメント。空文書でも1行として扱う。
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// 各行の行頭文字オフセット（先頭行は常に0）
    starts: Vec<usize>,
}

impl LineIndex {
    /// テキストから行インデックスを構築
    pub fn new(text: &str) -> Self {
        let mut starts = vec![0];
        for (idx, ch) in text.chars().enumerate() {
            if ch == '\n' {
                starts.push(idx + 1);
            }
        }
        Self { starts }
    }

    /// 行数を取得（空文書でも1）
    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// 1始まりの行番号から行頭の文字オフセットを取得
    ///
    /// 範囲外（0、行数+1以上）は `None`
    pub fn line_start(&self, line: usize) -> Option<usize> {
        if line == 0 {
            return None;
        }
        self.starts.get(line - 1).copied()
    }

    /// 文字オフセットが属する行（0始まり）を取得
    pub fn line_of(&self, char_pos: usize) -> usize {
        match self.starts.binary_search(&char_pos) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        }
    }
}
