//! ビューポート管理
//!
//! 画面に表示するテキスト領域のスクロール位置を管理する。

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportState {
    /// 表示の開始行
    top_line: usize,
    /// 表示可能な行数
    height: usize,
}

impl ViewportState {
    pub fn new() -> Self {
        Self {
            top_line: 0,
            height: 1,
        }
    }

    /// ビューポートの高さを更新
    pub fn set_height(&mut self, height: usize) {
        self.height = height.max(1);
    }

    /// カーソル行が画面内に収まるようスクロールする
    ///
    /// 戻り値はスクロールが発生したかどうか
    pub fn ensure_visible(&mut self, cursor_line: usize) -> bool {
        if cursor_line < self.top_line {
            self.top_line = cursor_line;
            true
        } else {
            let bottom_line = self.top_line + self.height.saturating_sub(1);
            if cursor_line > bottom_line {
                self.top_line = cursor_line + 1 - self.height;
                true
            } else {
                false
            }
        }
    }

    /// 行数減少後の開始行の補正
    pub fn clamp(&mut self, total_lines: usize) {
        if self.top_line >= total_lines {
            self.top_line = total_lines.saturating_sub(1);
        }
    }

    /// 現在の表示開始行を取得
    pub fn top_line(&self) -> usize {
        self.top_line
    }

    /// 表示領域の高さを取得
    pub fn height(&self) -> usize {
        self.height
    }
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::new()
    }
}
