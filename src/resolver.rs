//! 画像の解決
//!
//! ## 処理フロー
//! 1. フォルダ直接指定 → そのフォルダの画像
//! 2. 名前指定 → フォルダを複合スコアで順位付けし、最良候補の画像
//! 3. 一致フォルダなし → ルート直下のファイル名で照合（フォールバック）
//!
//! 走査の失敗は「候補なし」として扱い、照合には伝播させない。

use crate::catalog::{Catalog, Vehicle};
use crate::error::Result;
use crate::scanner;
use serde::{Deserialize, Serialize};
use showroom_media_common::{best_match, diagnose, match_files, rank_by_name, AssetGroup, MediaReport};
use std::path::Path;
use tracing::{debug, info, warn};

/// 画像問い合わせの結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageLookup {
    pub images: Vec<String>,
    /// 一致したフォルダ名（ファイル名照合・不一致時は空）
    pub folder: String,
}

impl ImageLookup {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// 画像ルートとURL接頭辞
#[derive(Debug, Clone)]
pub struct ImageRoot<'a> {
    pub root: &'a Path,
    pub url_prefix: &'a str,
}

impl<'a> ImageRoot<'a> {
    pub fn new(root: &'a Path, url_prefix: &'a str) -> Self {
        Self { root, url_prefix }
    }

    /// フォルダ直接指定
    ///
    /// `..` を含む指定はエラー。存在しないフォルダは空の結果。
    pub fn lookup_folder(&self, folder: &str) -> Result<ImageLookup> {
        let Some(dir) = scanner::resolve_folder(self.root, folder)? else {
            debug!("フォルダなし: {}", folder);
            return Ok(ImageLookup::empty());
        };

        let files = scanner::list_image_files(&dir).unwrap_or_else(|e| {
            warn!("フォルダの読み込みに失敗: {}: {}", dir.display(), e);
            Vec::new()
        });

        Ok(ImageLookup {
            images: scanner::folder_image_urls(self.url_prefix, folder, &files),
            folder: folder.to_string(),
        })
    }

    /// 名前でフォルダを照合し、なければルート直下のファイル名で照合する
    pub fn lookup_by_name(&self, name: &str) -> ImageLookup {
        let groups = self.asset_groups();
        let ranked = rank_by_name(name, &groups);

        if let Some(best) = best_match(&ranked) {
            let group = &groups[best.index];
            info!(
                "「{}」→ フォルダ {} (スコア {})",
                name, group.name, best.score
            );
            return ImageLookup {
                images: scanner::folder_image_urls(self.url_prefix, &group.name, &group.files),
                folder: group.name.clone(),
            };
        }

        let root_files = scanner::list_root_images(self.root).unwrap_or_else(|e| {
            warn!("ルート画像の読み込みに失敗: {}", e);
            Vec::new()
        });
        let matched = match_files(name, &root_files);
        debug!("「{}」→ フォルダ一致なし、ファイル一致 {}件", name, matched.len());

        ImageLookup {
            images: matched
                .iter()
                .map(|f| scanner::image_url(self.url_prefix, None, f))
                .collect(),
            folder: String::new(),
        }
    }

    /// 車両の画像を名前の候補順に探す
    ///
    /// `brand model` → `brand model version` → `brand model (year)` の順で、
    /// 最初に画像が見つかった結果を返す。
    pub fn lookup_vehicle(&self, vehicle: &Vehicle) -> ImageLookup {
        for name in lookup_names(vehicle) {
            let result = self.lookup_by_name(&name);
            if !result.is_empty() {
                return result;
            }
        }
        ImageLookup::empty()
    }

    /// 車両カタログと画像フォルダの診断
    pub fn diagnose(&self, catalog: &Catalog) -> MediaReport {
        let folders = scanner::folder_infos(self.root, self.url_prefix).unwrap_or_else(|e| {
            warn!("フォルダ一覧の取得に失敗: {}", e);
            Vec::new()
        });
        diagnose(&catalog.identified(), &folders)
    }

    fn asset_groups(&self) -> Vec<AssetGroup> {
        scanner::scan_asset_groups(self.root).unwrap_or_else(|e| {
            warn!("画像フォルダの走査に失敗: {}", e);
            Vec::new()
        })
    }
}

/// 車両画像の検索に使う名前の候補
pub fn lookup_names(vehicle: &Vehicle) -> Vec<String> {
    let base = format!("{} {}", vehicle.brand, vehicle.model).trim().to_string();
    let mut names = vec![base.clone()];

    if let Some(version) = vehicle.version.as_deref().filter(|v| !v.trim().is_empty()) {
        names.push(format!("{} {}", base, version));
    }
    if let Some(year) = vehicle.year {
        names.push(format!("{} ({})", base, year));
    }

    names
}
