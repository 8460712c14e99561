//! UIモジュール
//!
//! ratatuiベースのターミナルUI機能

pub mod renderer;
pub mod theme;
pub mod viewport;

// 公開API
pub use renderer::{RenderView, Renderer};
pub use theme::Theme;
pub use viewport::ViewportState;
