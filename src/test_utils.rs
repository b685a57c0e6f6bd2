//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::{
    Path,
    PathBuf,
};

/// ディレクトリ配下にファイルを作成する
///
/// 親ディレクトリがなければ作成する
///
/// # Returns
/// 作成したファイルのパス
pub(crate) fn write_file(dir: &Path, relative_path: &str, content: &str) -> PathBuf {
    let path = dir.join(relative_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

/// 原文と訳文の組からカタログのテキストを作成する
pub(crate) fn catalog_text(name: &str, entries: &[(&str, &str)]) -> String {
    let body = entries
        .iter()
        .map(|(original, translation)| format!("[ #o = \"{original}\", #t = \"{translation}\" ]"))
        .collect::<Vec<_>>()
        .join(",\n");
    format!("#{name} = [\n{body}\n]")
}
