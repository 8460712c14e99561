//! 検索モジュール
//!
//! カーソル位置から前方への単純検索。見つかったマッチは「現在の検索
//! オカレンス」として記録され、UIのハイライトに使われる。

use crate::buffer::TextBuffer;

/// 検索マッチ（文字オフセットと表示座標）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMatch {
    /// マッチ開始の文字オフセット
    pub start: usize,
    /// マッチ終了の文字オフセット（排他）
    pub end: usize,
    /// マッチ開始行（0始まり）
    pub line: usize,
    /// マッチ開始列（0始まり）
    pub column: usize,
}

/// 文字列マッチング戦略
pub trait StringMatcher {
    /// `from` 以降で最初のマッチを返す（折り返しなし）
    fn find_from(&self, text: &str, pattern: &str, from: usize) -> Option<SearchMatch>;
}

/// 単純なリテラルマッチャー
#[derive(Debug, Default, Clone)]
pub struct LiteralMatcher;

impl LiteralMatcher {
    /// インスタンスを作成
    pub fn new() -> Self {
        Self
    }
}

impl StringMatcher for LiteralMatcher {
    fn find_from(&self, text: &str, pattern: &str, from: usize) -> Option<SearchMatch> {
        if pattern.is_empty() {
            return None;
        }

        let chars: Vec<char> = text.chars().collect();
        let pattern_chars: Vec<char> = pattern.chars().collect();

        if pattern_chars.len() > chars.len() || from + pattern_chars.len() > chars.len() {
            return None;
        }

        // 文字ごとの位置情報を前計算
        let mut line = 0usize;
        let mut column = 0usize;
        let mut line_map = Vec::with_capacity(chars.len());
        for ch in &chars {
            line_map.push((line, column));
            if *ch == '\n' {
                line += 1;
                column = 0;
            } else {
                column += 1;
            }
        }

        let last_start = chars.len() - pattern_chars.len();
        'outer: for start in from..=last_start {
            for (offset, pat_ch) in pattern_chars.iter().enumerate() {
                if chars[start + offset] != *pat_ch {
                    continue 'outer;
                }
            }
            let (line, column) = line_map[start];
            return Some(SearchMatch {
                start,
                end: start + pattern_chars.len(),
                line,
                column,
            });
        }

        None
    }
}

/// 検索コントローラ
///
/// 直近の問い合わせ文字列と現在のオカレンスを保持する。
#[derive(Debug, Default)]
pub struct SearchController {
    matcher: LiteralMatcher,
    /// 直近の検索語（プロンプトの初期値に再利用される）
    last_query: String,
    /// 現在の検索オカレンス
    current: Option<SearchMatch>,
}

impl SearchController {
    /// 新しいコントローラを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 直近の検索語を取得
    pub fn last_query(&self) -> &str {
        &self.last_query
    }

    /// 現在のオカレンスを取得
    pub fn current_match(&self) -> Option<&SearchMatch> {
        self.current.as_ref()
    }

    /// カーソル位置から前方検索
    ///
    /// 見つかればカーソルをマッチ末尾に移してオカレンスを記録し `true`
    /// （同じ検索語の繰り返しで次のオカレンスへ進める）。見つからなければ
    /// カーソルは動かさず `false`（呼び出し側がフィードバックキューを鳴らす）。
    pub fn find_forward(&mut self, buffer: &mut TextBuffer, query: &str) -> bool {
        self.last_query = query.to_string();

        match self.matcher.find_from(buffer.text(), query, buffer.cursor().char_pos) {
            Some(found) => {
                // カーソル更新は検証済みオフセットなので失敗しない
                let _ = buffer.set_cursor_char(found.end);
                self.current = Some(found);
                true
            }
            None => false,
        }
    }

    /// オカレンスを破棄（文書変更後に呼ばれる）
    pub fn clear(&mut self) {
        self.current = None;
    }
}
