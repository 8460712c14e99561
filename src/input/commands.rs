//! コマンド定義
//!
//! キーバインドから実行されるペイン操作の列挙

/// ペインのコマンド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// ファイル読込プロンプトを開く（C-o）
    OpenFile,
    /// 展開整形（C-q）
    FormatPretty,
    /// 最小化整形（C-w）
    FormatCompact,
    /// 検索プロンプトを開く（C-f）
    FindText,
    /// 行移動プロンプトを開く（C-l）
    GotoLine,
    /// 終了（C-c）
    Quit,

    /// 文字挿入
    InsertChar(char),
    /// 改行挿入
    InsertNewline,
    /// 直前の文字を削除
    DeleteBackwardChar,
    /// 直後の文字を削除
    DeleteChar,

    /// カーソル移動
    MoveCharForward,
    MoveCharBackward,
    MoveLineUp,
    MoveLineDown,
    MoveLineStart,
    MoveLineEnd,
}
