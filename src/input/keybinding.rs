//! キーバインドシステム
//!
//! crossterm のキーイベントを内部表現に変換し、単一打鍵のバインド表で
//! コマンドへ解決する。プレフィックスキーは扱わない。

use super::commands::Command;
use crossterm::event::{KeyCode as CrosstermKeyCode, KeyEvent, KeyModifiers as CrosstermModifiers};
use std::collections::HashMap;

/// キー入力の内部表現
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    /// 修飾キー
    pub modifiers: KeyModifiers,
    /// 基本キー
    pub code: KeyCode,
}

/// 修飾キーの組み合わせ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyModifiers {
    pub ctrl: bool,
    pub alt: bool,
}

/// 基本キーコード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Esc,
    Unknown,
}

impl Key {
    /// 修飾なしキーを作成
    pub fn plain(code: KeyCode) -> Self {
        Self {
            modifiers: KeyModifiers::default(),
            code,
        }
    }

    /// Ctrl付き文字キーを作成
    pub fn ctrl(ch: char) -> Self {
        Self {
            modifiers: KeyModifiers { ctrl: true, alt: false },
            code: KeyCode::Char(ch),
        }
    }
}

impl From<KeyEvent> for Key {
    fn from(event: KeyEvent) -> Self {
        let code = match event.code {
            CrosstermKeyCode::Char(ch) => KeyCode::Char(ch),
            CrosstermKeyCode::Enter => KeyCode::Enter,
            CrosstermKeyCode::Backspace => KeyCode::Backspace,
            CrosstermKeyCode::Delete => KeyCode::Delete,
            CrosstermKeyCode::Tab => KeyCode::Tab,
            CrosstermKeyCode::Up => KeyCode::Up,
            CrosstermKeyCode::Down => KeyCode::Down,
            CrosstermKeyCode::Left => KeyCode::Left,
            CrosstermKeyCode::Right => KeyCode::Right,
            CrosstermKeyCode::Home => KeyCode::Home,
            CrosstermKeyCode::End => KeyCode::End,
            CrosstermKeyCode::Esc => KeyCode::Esc,
            _ => KeyCode::Unknown,
        };

        Self {
            modifiers: KeyModifiers {
                ctrl: event.modifiers.contains(CrosstermModifiers::CONTROL),
                alt: event.modifiers.contains(CrosstermModifiers::ALT),
            },
            code,
        }
    }
}

/// キー処理の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyProcessResult {
    /// コマンドに解決された
    Command(Command),
    /// バインドなし
    NoMatch,
}

/// 単一打鍵のキーマップ
///
/// ショートカットはボタン相当の操作（開く・整形・最小化・検索・行移動）
/// に1つずつ割り当てる。
pub struct KeyMap {
    bindings: HashMap<Key, Command>,
}

impl KeyMap {
    /// 既定のバインド表を構築
    pub fn new() -> Self {
        let mut bindings = HashMap::new();

        bindings.insert(Key::ctrl('o'), Command::OpenFile);
        bindings.insert(Key::ctrl('q'), Command::FormatPretty);
        bindings.insert(Key::ctrl('w'), Command::FormatCompact);
        bindings.insert(Key::ctrl('f'), Command::FindText);
        bindings.insert(Key::ctrl('l'), Command::GotoLine);
        bindings.insert(Key::ctrl('c'), Command::Quit);

        bindings.insert(Key::plain(KeyCode::Enter), Command::InsertNewline);
        bindings.insert(Key::plain(KeyCode::Backspace), Command::DeleteBackwardChar);
        bindings.insert(Key::plain(KeyCode::Delete), Command::DeleteChar);
        bindings.insert(Key::plain(KeyCode::Right), Command::MoveCharForward);
        bindings.insert(Key::plain(KeyCode::Left), Command::MoveCharBackward);
        bindings.insert(Key::plain(KeyCode::Up), Command::MoveLineUp);
        bindings.insert(Key::plain(KeyCode::Down), Command::MoveLineDown);
        bindings.insert(Key::plain(KeyCode::Home), Command::MoveLineStart);
        bindings.insert(Key::plain(KeyCode::End), Command::MoveLineEnd);

        Self { bindings }
    }

    /// キーイベントをコマンドへ解決
    ///
    /// バインド表にないキーのうち、修飾なしの印字可能文字は自己挿入。
    pub fn process_key_event(&self, event: KeyEvent) -> KeyProcessResult {
        let key = Key::from(event);

        if let Some(command) = self.bindings.get(&key) {
            return KeyProcessResult::Command(*command);
        }

        if let KeyCode::Char(ch) = key.code {
            if !key.modifiers.ctrl && !key.modifiers.alt {
                return KeyProcessResult::Command(Command::InsertChar(ch));
            }
        }

        if key.code == KeyCode::Tab && !key.modifiers.ctrl && !key.modifiers.alt {
            return KeyProcessResult::Command(Command::InsertChar('\t'));
        }

        KeyProcessResult::NoMatch
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::new()
    }
}
