//! ファイルモジュール
//!
//! UTF-8テキストファイルの読み込みとパス展開。読み込んだ内容で
//! 文書全体を置き換える経路だけを提供し、保存系は持たない。

use crate::error::{FileError, Result, ShirabeError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// `~` と環境変数を展開してパスを正規化
pub fn expand_path(input: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(input)
        .map_err(|err| ShirabeError::Application(format!("パス展開エラー: {}", err)))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// ファイルからテキストを読み込み
///
/// サイズ上限やタイムアウトは設けない（対話的なサイズの文書を想定）。
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ShirabeError::File(FileError::NotFound {
            path: path.display().to_string(),
        }));
    }

    if path.is_dir() {
        return Err(ShirabeError::File(FileError::InvalidPath {
            path: path.display().to_string(),
        }));
    }

    fs::read_to_string(path).map_err(|err| {
        let path = path.display().to_string();
        match err.kind() {
            ErrorKind::PermissionDenied => ShirabeError::File(FileError::PermissionDenied { path }),
            _ => ShirabeError::File(FileError::Io {
                message: format!("{}: {}", path, err),
            }),
        }
    })
}
