//! 名前の正規化
//!
//! 車両名・フォルダ名・ファイル名を比較用の正規形に変換する。
//! - アクセント記号の除去（`é` → `e`）
//! - 小文字化
//! - `-` / `_` の連続を空白1つに
//! - 括弧 `(` `)` の除去（中身は残す）
//! - 空白の連続を1つにまとめ、前後を除去

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// 比較用の正規形を返す
///
/// 小文字化を分解より先に行う（`İ` のように小文字化で結合文字が
/// 生まれる文字があるため）。結果は冪等。
pub fn normalize_name(s: &str) -> String {
    let folded: String = s
        .to_lowercase()
        .nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .collect();

    let mut out = String::with_capacity(folded.len());
    let mut pending_space = false;

    for ch in folded.chars() {
        match ch {
            '(' | ')' => continue,
            '-' | '_' => pending_space = true,
            c if c.is_whitespace() => pending_space = true,
            c => {
                if pending_space && !out.is_empty() {
                    out.push(' ');
                }
                pending_space = false;
                out.push(c);
            }
        }
    }

    out
}

/// 空白区切りのトークンに分割（空トークンは除外）
pub fn split_tokens(normalized: &str) -> impl Iterator<Item = &str> {
    normalized.split(' ').filter(|t| !t.is_empty())
}
