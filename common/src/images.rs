//! フォルダ内の画像並び順
//!
//! 代表画像（destaque/capa等）を先頭に、続いて先頭の番号順に並べる。

use regex::Regex;
use std::cmp::Ordering;

/// 代表画像を示すファイル名中の語
pub const PRIORITY_TERMS: &[&str] = &["destaque", "highlight", "principal", "capa"];

/// ファイル名が優先マーカーを含むか（大文字小文字無視）
pub fn has_priority_marker(file_name: &str) -> bool {
    let lower = file_name.to_lowercase();
    PRIORITY_TERMS.iter().any(|t| lower.contains(t))
}

/// 先頭1〜3桁の番号（`01-foto.jpg` → 1）
fn leading_number(lower: &str) -> Option<u32> {
    lazy_static::lazy_static! {
        static ref PREFIX_RE: Regex = Regex::new(r"^([0-9]{1,3})").unwrap();
    }

    PREFIX_RE
        .captures(lower)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// 画像ファイル名の比較
///
/// 1. 優先マーカーあり → 先
/// 2. 番号付き → 番号の昇順、番号なしより先
/// 3. それ以外（および同番号）は小文字での辞書順
pub fn compare_image_names(a: &str, b: &str) -> Ordering {
    let al = a.to_lowercase();
    let bl = b.to_lowercase();

    let priority = has_priority_marker(&bl).cmp(&has_priority_marker(&al));
    if priority != Ordering::Equal {
        return priority;
    }

    let by_number = match (leading_number(&al), leading_number(&bl)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };

    by_number.then_with(|| al.cmp(&bl))
}

/// 代表画像が先頭になるよう並べ替える（安定ソート）
pub fn order_images<S: AsRef<str>>(file_names: &[S]) -> Vec<String> {
    let mut sorted: Vec<String> = file_names.iter().map(|s| s.as_ref().to_string()).collect();
    sorted.sort_by(|a, b| compare_image_names(a, b));
    sorted
}
