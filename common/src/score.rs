//! スコア計算
//!
//! 2種類のスコアを提供する:
//! - `overlap_score`: 1対1比較用（包含 → 100、それ以外は共通トークン数）
//! - `MatchSignals::composite`: 1つの車両に対し多数の候補を順位付けする複合スコア

use crate::normalize::normalize_name;
use crate::tokens::{expand_tokens, shared_token_count};
use serde::Serialize;

/// 完全一致の重み
pub const EXACT_WEIGHT: u32 = 1000;
/// 部分一致（包含）の重み
pub const INCLUDES_WEIGHT: u32 = 500;
/// 共通トークン1つあたりの重み
pub const TOKEN_WEIGHT: u32 = 50;
/// 代表画像ありのボーナス
pub const PRIORITY_BONUS: u32 = 10;
/// 単純スコアでの包含一致の値
pub const CONTAINMENT_SCORE: u32 = 100;

/// どちらかが他方を含むか（正規化済み文字列、空は不一致）
pub fn contains_either(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(b) || b.contains(a)
}

/// 単純な重なりスコア
///
/// - どちらかが正規化後に空 → 0
/// - 包含（完全一致を含む） → 100
/// - それ以外 → 展開トークンの共通数
pub fn overlap_score(a: &str, b: &str) -> u32 {
    let an = normalize_name(a);
    let bn = normalize_name(b);
    if an.is_empty() || bn.is_empty() {
        return 0;
    }
    if contains_either(&an, &bn) {
        return CONTAINMENT_SCORE;
    }
    shared_token_count(&expand_tokens(&an), &expand_tokens(&bn)) as u32
}

/// 複合スコアの各シグナル
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSignals {
    pub exact: bool,
    pub includes: bool,
    pub token_hits: u32,
    pub priority: bool,
    pub asset_count: u32,
}

impl MatchSignals {
    /// 名前の一致度だけのスコア（完全一致・包含・トークン）
    pub fn text_score(&self) -> u32 {
        let mut score = self.token_hits * TOKEN_WEIGHT;
        if self.exact {
            score += EXACT_WEIGHT;
        }
        if self.includes {
            score += INCLUDES_WEIGHT;
        }
        score
    }

    /// 複合スコア（名前の一致度 + 代表画像ボーナス + 画像枚数）
    pub fn composite(&self) -> u32 {
        let bonus = if self.priority { PRIORITY_BONUS } else { 0 };
        self.text_score() + bonus + self.asset_count
    }
}
