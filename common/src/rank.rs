//! 候補フォルダの順位付け
//!
//! 1つの車両名に対して画像フォルダ群を複合スコアで並べ、最良候補を選ぶ。
//! フォルダが見つからない場合のファイル名照合（フォールバック）もここで提供する。

use crate::normalize::normalize_name;
use crate::score::{contains_either, overlap_score, MatchSignals};
use crate::tokens::{expand_tokens, shared_token_count};
use crate::types::{AssetGroup, CandidateName, MatchResult, VehicleIdentity};

/// フォールバック照合で必要な共通トークン数
pub const FILE_TOKEN_THRESHOLD: u32 = 2;

/// 車両に対してフォルダ群を順位付けする
pub fn rank(identity: &VehicleIdentity, groups: &[AssetGroup]) -> Vec<MatchResult> {
    rank_by_name(&identity.display_name(), groups)
}

/// 自由入力の名前に対してフォルダ群を順位付けする
///
/// スコアの降順。同点は入力順を保つ（安定ソート）。
/// 名前が一致しない候補も代表画像と枚数の分だけ加点される。
/// スコア0の候補も結果に残る。
pub fn rank_by_name(name: &str, groups: &[AssetGroup]) -> Vec<MatchResult> {
    let name_norm = normalize_name(name);
    let name_tokens = expand_tokens(&name_norm);

    let mut results: Vec<MatchResult> = groups
        .iter()
        .enumerate()
        .map(|(index, group)| {
            let candidate = CandidateName::folder(&group.name);
            let mut signals = MatchSignals {
                priority: group.has_priority_asset(),
                asset_count: group.asset_count() as u32,
                ..Default::default()
            };

            // 名前かフォルダ名が空なら一致なし
            let blank = name_norm.is_empty() || candidate.normalized.is_empty();
            if !blank {
                signals.exact = candidate.normalized == name_norm;
                signals.includes = contains_either(&candidate.normalized, &name_norm);
                signals.token_hits =
                    shared_token_count(&name_tokens, &expand_tokens(&candidate.normalized)) as u32;
            }

            MatchResult {
                candidate,
                index,
                score: if blank { 0 } else { signals.composite() },
                signals,
            }
        })
        .collect();

    // Vec::sort_by は安定ソート
    results.sort_by(|a, b| b.score.cmp(&a.score));
    results
}

/// 最良候補（先頭のスコアが0より大きい場合のみ）
pub fn best_match(ranked: &[MatchResult]) -> Option<&MatchResult> {
    ranked.first().filter(|r| r.is_match())
}

/// ファイル名が名前に一致するか（包含、または共通トークン2つ以上）
pub fn file_matches(name: &str, file_name: &str) -> bool {
    let candidate = CandidateName::file(file_name);
    overlap_score(name, &candidate.normalized) >= FILE_TOKEN_THRESHOLD
}

/// フォールバック: ファイル名で直接照合する
///
/// フォルダの順位付けとは独立した処理。入力順を保って一致したファイル名を返す。
pub fn match_files<S: AsRef<str>>(name: &str, file_names: &[S]) -> Vec<String> {
    if normalize_name(name).is_empty() {
        return Vec::new();
    }

    file_names
        .iter()
        .map(AsRef::as_ref)
        .filter(|f| file_matches(name, f))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::{EXACT_WEIGHT, INCLUDES_WEIGHT, TOKEN_WEIGHT};

    fn groups(names: &[&str]) -> Vec<AssetGroup> {
        names.iter().map(|n| AssetGroup::new(*n, Vec::new())).collect()
    }

    fn names(ranked: &[MatchResult]) -> Vec<&str> {
        ranked.iter().map(|r| r.candidate.raw.as_str()).collect()
    }

    #[test]
    fn test_exact_match_dominates() {
        let identity = VehicleIdentity::new("Porsche", "911 GT3 RS");
        let ranked = rank(
            &identity,
            &groups(&["Porsche 911", "porsche-911-gt3-rs", "Porsche 911 GT3 RS Weissach"]),
        );

        assert_eq!(ranked[0].candidate.raw, "porsche-911-gt3-rs");
        assert!(ranked[0].signals.exact);
        assert!(ranked[0].score >= EXACT_WEIGHT);
    }

    #[test]
    fn test_containment_beats_token_overlap() {
        let identity = VehicleIdentity::new("Ferrari", "296 GTB");
        let ranked = rank(&identity, &groups(&["Ferrari Roma", "ferrari 296"]));

        assert_eq!(names(&ranked), vec!["ferrari 296", "Ferrari Roma"]);
        assert!(ranked[0].signals.includes);
        assert!(!ranked[1].signals.includes);
        assert_eq!(ranked[1].score, TOKEN_WEIGHT);
    }

    #[test]
    fn test_empty_corpus_has_no_match() {
        let identity = VehicleIdentity::new("BMW", "M3");
        let ranked = rank(&identity, &[]);
        assert!(ranked.is_empty());
        assert!(best_match(&ranked).is_none());
    }

    #[test]
    fn test_empty_folders_without_overlap_never_win() {
        let identity = VehicleIdentity::new("Tesla", "Model S");
        let ranked = rank(&identity, &groups(&["Mercedes AMG GT", "Audi RS6"]));

        assert!(ranked.iter().all(|r| r.score == 0));
        assert!(best_match(&ranked).is_none());
    }

    #[test]
    fn test_richer_folder_wins_without_overlap() {
        let identity = VehicleIdentity::new("Tesla", "Model S");
        let corpus = vec![
            AssetGroup::new("Audi RS6", vec!["1.jpg".into()]),
            AssetGroup::new("Mercedes AMG GT", vec!["capa.jpg".into(), "2.jpg".into()]),
        ];
        let ranked = rank(&identity, &corpus);

        assert_eq!(names(&ranked), vec!["Mercedes AMG GT", "Audi RS6"]);
        assert_eq!(ranked[0].score, 10 + 2);
        assert_eq!(ranked[1].score, 1);

        let best = best_match(&ranked).unwrap();
        assert_eq!(best.candidate.raw, "Mercedes AMG GT");
    }

    #[test]
    fn test_blank_name_ignores_assets() {
        let corpus = vec![AssetGroup::new("bmw x6", vec!["destaque.jpg".into()])];
        let ranked = rank_by_name("  ", &corpus);
        assert_eq!(ranked[0].score, 0);
        assert!(best_match(&ranked).is_none());
    }

    #[test]
    fn test_blank_name_scores_zero() {
        let ranked = rank_by_name("  ( ) ", &groups(&["bmw x6", "audi rs6"]));
        assert!(ranked.iter().all(|r| r.score == 0));
        assert!(best_match(&ranked).is_none());
    }

    #[test]
    fn test_stable_order_for_equal_scores() {
        let identity = VehicleIdentity::new("BMW", "X6");
        let forward = rank(&identity, &groups(&["BMW X6 Azul", "BMW X6 Preta"]));
        assert_eq!(forward[0].score, forward[1].score);
        assert_eq!(names(&forward), vec!["BMW X6 Azul", "BMW X6 Preta"]);

        let reversed = rank(&identity, &groups(&["BMW X6 Preta", "BMW X6 Azul"]));
        assert_eq!(names(&reversed), vec!["BMW X6 Preta", "BMW X6 Azul"]);

        // 同じ入力なら同じ結果
        assert_eq!(forward, rank(&identity, &groups(&["BMW X6 Azul", "BMW X6 Preta"])));
    }

    #[test]
    fn test_richer_folder_breaks_ties() {
        let identity = VehicleIdentity::new("BMW", "X6");
        let corpus = vec![
            AssetGroup::new("BMW X6 Azul", vec!["1.jpg".into()]),
            AssetGroup::new("BMW X6 Preta", vec!["1.jpg".into(), "2.jpg".into()]),
            AssetGroup::new("BMW X6 Branca", vec!["capa.jpg".into()]),
        ];
        let ranked = rank(&identity, &corpus);
        assert_eq!(names(&ranked), vec!["BMW X6 Branca", "BMW X6 Preta", "BMW X6 Azul"]);
    }

    #[test]
    fn test_end_to_end_ranking() {
        let identity = VehicleIdentity::new("BMW", "X6 M")
            .with_version("Competition")
            .with_year(2023);
        let ranked = rank(
            &identity,
            &groups(&["BMW X6M", "Mercedes AMG GT", "bmw-x6-m-competition-2024"]),
        );

        assert_eq!(
            names(&ranked),
            vec!["bmw-x6-m-competition-2024", "BMW X6M", "Mercedes AMG GT"]
        );
        assert!(ranked[0].score > ranked[1].score);
        assert_eq!(ranked[2].score, 0);
        assert_eq!(ranked[2].index, 1);

        let best = best_match(&ranked).unwrap();
        assert_eq!(best.candidate.raw, "bmw-x6-m-competition-2024");
    }

    #[test]
    fn test_duplicates_are_ranked_independently() {
        let ranked = rank_by_name("audi rs6", &groups(&["Audi RS6", "Audi RS6"]));
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].score, ranked[1].score);
        assert_eq!(ranked[0].index, 0);
        assert_eq!(ranked[1].index, 1);
        assert!(ranked[0].score >= EXACT_WEIGHT + INCLUDES_WEIGHT);
    }

    #[test]
    fn test_match_files_containment() {
        let files = ["tesla-model-s-plaid.jpg", "porsche-taycan.jpg"];
        let matched = match_files("Tesla Model S Plaid", &files);
        assert_eq!(matched, vec!["tesla-model-s-plaid.jpg"]);
    }

    #[test]
    fn test_match_files_token_threshold() {
        // 共通トークン: bmw, m3 / m, 3 → 2以上
        assert!(file_matches("BMW M3 Competition", "Bmw M3 2024.webp"));
        // 共通トークン1つだけ
        assert!(!file_matches("BMW M3", "bmw-i4.webp"));
    }

    #[test]
    fn test_match_files_blank_name() {
        assert!(match_files("", &["a.jpg"]).is_empty());
    }
}
