//! 入力モジュール
//!
//! キーバインドとコマンド定義

pub mod commands;
pub mod keybinding;

pub use commands::Command;
pub use keybinding::{Key, KeyCode, KeyMap, KeyModifiers, KeyProcessResult};
