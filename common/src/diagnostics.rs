//! メディア診断
//!
//! 車両一覧と画像フォルダ一覧を突き合わせ、以下を検出する:
//! - 画像フォルダのない車両
//! - どの車両にも対応しない孤立フォルダ
//! - 複数フォルダに対応する車両
//! - 複数車両に対応する曖昧なフォルダ

use crate::normalize::normalize_name;
use crate::score::overlap_score;
use crate::types::{FolderInfo, VehicleIdentity};
use serde::{Deserialize, Serialize};

/// 診断で対応とみなす最低スコア（これより大きいこと）
pub const MIN_DIAGNOSTIC_SCORE: u32 = 1;

/// IDつきの車両
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifiedVehicle {
    pub id: String,
    #[serde(flatten)]
    pub identity: VehicleIdentity,
}

/// フォルダ1件の照合結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderMatch {
    pub folder: String,
    pub score: u32,
    pub vehicle_ids: Vec<String>,
}

/// 複数フォルダに対応する車両
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicatedVehicle {
    pub vehicle: IdentifiedVehicle,
    pub folders: Vec<String>,
}

/// 件数サマリ
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub folders: usize,
    pub vehicles: usize,
    pub vehicles_missing: usize,
    pub folders_orphan: usize,
    pub vehicles_duplicated: usize,
    pub folders_ambiguous: usize,
}

/// 診断レポート
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaReport {
    pub summary: ReportSummary,
    pub vehicles_missing: Vec<IdentifiedVehicle>,
    pub folders_orphan: Vec<FolderInfo>,
    pub vehicles_duplicated: Vec<DuplicatedVehicle>,
    pub folders_ambiguous: Vec<FolderMatch>,
    pub folder_matches: Vec<FolderMatch>,
}

/// フォルダごとに最良スコアの車両（同点はすべて）を求める
fn match_folder(folder: &FolderInfo, vehicle_names: &[String]) -> (u32, Vec<usize>) {
    let base = if folder.normalized_name.is_empty() {
        &folder.name
    } else {
        &folder.normalized_name
    };
    let folder_norm = normalize_name(base);

    let mut best = Vec::new();
    let mut best_score = 0;

    for (idx, vehicle_norm) in vehicle_names.iter().enumerate() {
        let score = overlap_score(&folder_norm, vehicle_norm);
        if score <= MIN_DIAGNOSTIC_SCORE || score < best_score {
            continue;
        }
        if score > best_score {
            best.clear();
            best_score = score;
        }
        best.push(idx);
    }

    (best_score, best)
}

/// 車両一覧とフォルダ一覧を突き合わせる
pub fn diagnose(vehicles: &[IdentifiedVehicle], folders: &[FolderInfo]) -> MediaReport {
    let vehicle_names: Vec<String> = vehicles
        .iter()
        .map(|v| v.identity.normalized_name())
        .collect();

    // 車両ごとの対応フォルダ（フォルダ順）
    let mut folders_by_vehicle: Vec<Vec<String>> = vec![Vec::new(); vehicles.len()];
    let mut folder_matches = Vec::with_capacity(folders.len());
    let mut folders_orphan = Vec::new();

    for folder in folders {
        let (score, matched) = match_folder(folder, &vehicle_names);

        if matched.is_empty() {
            folders_orphan.push(folder.clone());
        }
        for &idx in &matched {
            folders_by_vehicle[idx].push(folder.name.clone());
        }

        folder_matches.push(FolderMatch {
            folder: folder.name.clone(),
            score,
            vehicle_ids: matched.iter().map(|&i| vehicles[i].id.clone()).collect(),
        });
    }

    let vehicles_missing: Vec<IdentifiedVehicle> = vehicles
        .iter()
        .zip(&folders_by_vehicle)
        .filter(|(_, f)| f.is_empty())
        .map(|(v, _)| v.clone())
        .collect();

    let vehicles_duplicated: Vec<DuplicatedVehicle> = vehicles
        .iter()
        .zip(&folders_by_vehicle)
        .filter(|(_, f)| f.len() > 1)
        .map(|(v, f)| DuplicatedVehicle {
            vehicle: v.clone(),
            folders: f.clone(),
        })
        .collect();

    let folders_ambiguous: Vec<FolderMatch> = folder_matches
        .iter()
        .filter(|m| m.vehicle_ids.len() > 1)
        .cloned()
        .collect();

    let summary = ReportSummary {
        folders: folders.len(),
        vehicles: vehicles.len(),
        vehicles_missing: vehicles_missing.len(),
        folders_orphan: folders_orphan.len(),
        vehicles_duplicated: vehicles_duplicated.len(),
        folders_ambiguous: folders_ambiguous.len(),
    };

    MediaReport {
        summary,
        vehicles_missing,
        folders_orphan,
        vehicles_duplicated,
        folders_ambiguous,
        folder_matches,
    }
}
