//! トークン展開
//!
//! `x6m` や `gt500` のような英数字の型式コードを分解し、
//! 連結表記・分割表記のどちらでも一致するようにする。

use crate::normalize::{normalize_name, split_tokens};
use regex::Regex;
use std::collections::HashSet;

/// 文字列を正規化してトークン集合に展開する
///
/// 各トークンが「英字・数字・英字」（いずれも省略可）に完全分解できる場合、
/// 部分と隣接する組み合わせを追加する。
///
/// `x6m` → `{x6m, x, 6, m, x6, 6m, xm}`
pub fn expand_tokens(s: &str) -> HashSet<String> {
    lazy_static::lazy_static! {
        static ref CODE_RE: Regex = Regex::new(r"^([a-z]+)?([0-9]+)?([a-z]+)?$").unwrap();
    }

    let normalized = normalize_name(s);
    let mut tokens = HashSet::new();

    for token in split_tokens(&normalized) {
        tokens.insert(token.to_string());

        let Some(caps) = CODE_RE.captures(token) else {
            continue;
        };
        let part = |i: usize| caps.get(i).map(|m| m.as_str()).unwrap_or("");
        let (a, n, b) = (part(1), part(2), part(3));

        for piece in [a, n, b] {
            if !piece.is_empty() {
                tokens.insert(piece.to_string());
            }
        }
        if !a.is_empty() && !n.is_empty() {
            tokens.insert(format!("{a}{n}"));
        }
        if !n.is_empty() && !b.is_empty() {
            tokens.insert(format!("{n}{b}"));
        }
        if !a.is_empty() && !b.is_empty() {
            tokens.insert(format!("{a}{b}"));
        }
    }

    tokens
}

/// 2つのトークン集合の共通要素数
pub fn shared_token_count(a: &HashSet<String>, b: &HashSet<String>) -> usize {
    a.iter().filter(|t| b.contains(*t)).count()
}
