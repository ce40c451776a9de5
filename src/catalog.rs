//! 車両カタログ
//!
//! JSONファイルから読み込む車両一覧。明示的に生成してハンドル（`Arc`等）で
//! 共有する前提で、プロセス全体の静的状態は持たない。

use crate::error::{MediaError, Result};
use serde::{Deserialize, Serialize};
use showroom_media_common::{IdentifiedVehicle, VehicleIdentity};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

pub const DEFAULT_FEATURED_LIMIT: usize = 3;
pub const DEFAULT_PAGE_LIMIT: usize = 12;

/// 在庫車両
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    pub brand: String,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mileage: Option<u32>,
    #[serde(default)]
    pub featured: bool,
}

impl Vehicle {
    pub fn identity(&self) -> VehicleIdentity {
        VehicleIdentity {
            brand: self.brand.clone(),
            model: self.model.clone(),
            version: self.version.clone(),
            year: self.year,
        }
    }

    pub fn identified(&self) -> IdentifiedVehicle {
        IdentifiedVehicle {
            id: self.id.clone(),
            identity: self.identity(),
        }
    }

    /// `brand model`（空白を1つにまとめる）
    fn base_name(&self) -> String {
        collapse_spaces(&format!("{} {}", self.brand, self.model))
    }

    /// `brand model version`（グレードがなければ `brand model`）
    fn name_with_version(&self) -> String {
        match self.version.as_deref() {
            Some(v) => collapse_spaces(&format!("{} {} {}", self.brand, self.model, v)),
            None => self.base_name(),
        }
    }
}

fn collapse_spaces(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// カタログファイルの形式
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Catalog {
    pub vehicles: Vec<Vehicle>,
    /// 一覧から除外する車両名（`brand model` または `brand model version` の完全一致）
    pub excluded_names: HashSet<String>,
}

/// 一覧の絞り込み条件
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleFilter {
    pub brand: Option<String>,
    pub search: Option<String>,
}

/// ページング情報
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

/// ページング済みの一覧
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

impl Catalog {
    pub fn new(vehicles: Vec<Vehicle>) -> Self {
        Self {
            vehicles,
            excluded_names: HashSet::new(),
        }
    }

    /// JSONファイルから読み込み
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(MediaError::CatalogNotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&content)?;
        info!("カタログ読み込み: {} ({}台)", path.display(), catalog.vehicles.len());
        Ok(catalog)
    }

    /// JSON文字列から読み込み
    ///
    /// `{ "vehicles": [...] }` 形式と車両配列のみの形式の両方を受け付ける。
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;

        let catalog = if value.is_array() {
            Self::new(serde_json::from_value(value)?)
        } else {
            serde_json::from_value(value)?
        };

        catalog.validate()?;
        Ok(catalog)
    }

    /// IDの重複と必須項目を確認
    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for v in &self.vehicles {
            if v.id.trim().is_empty() {
                return Err(MediaError::InvalidCatalog("IDが空の車両があります".into()));
            }
            if v.brand.trim().is_empty() || v.model.trim().is_empty() {
                return Err(MediaError::InvalidCatalog(format!(
                    "ブランドまたはモデルが空です (id: {})",
                    v.id
                )));
            }
            if !seen.insert(v.id.as_str()) {
                return Err(MediaError::InvalidCatalog(format!("IDが重複しています: {}", v.id)));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// 除外リストに該当するか
    pub fn is_excluded(&self, vehicle: &Vehicle) -> bool {
        self.excluded_names.contains(&vehicle.base_name())
            || self.excluded_names.contains(&vehicle.name_with_version())
    }

    /// 除外されていない車両
    pub fn visible(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.iter().filter(|v| !self.is_excluded(v))
    }

    /// 条件で絞り込む（大文字小文字無視の部分一致）
    pub fn list(&self, filter: &VehicleFilter) -> Vec<&Vehicle> {
        let brand = filter.brand.as_deref().map(str::to_lowercase).filter(|s| !s.is_empty());
        let search = filter.search.as_deref().map(str::to_lowercase).filter(|s| !s.is_empty());

        let result: Vec<&Vehicle> = self
            .visible()
            .filter(|v| {
                brand
                    .as_ref()
                    .map_or(true, |b| v.brand.to_lowercase().contains(b.as_str()))
            })
            .filter(|v| {
                search.as_ref().map_or(true, |s| {
                    v.brand.to_lowercase().contains(s.as_str())
                        || v.model.to_lowercase().contains(s.as_str())
                })
            })
            .collect();

        debug!("車両一覧: {}台（全{}台）", result.len(), self.vehicles.len());
        result
    }

    /// ページング付きの一覧
    pub fn page(&self, filter: &VehicleFilter, page: usize, limit: usize) -> Page<Vehicle> {
        let page = page.max(1);
        let limit = limit.max(1);
        let all = self.list(filter);
        let total = all.len();
        let total_pages = total.div_ceil(limit);

        let data = all
            .into_iter()
            .skip((page - 1) * limit)
            .take(limit)
            .cloned()
            .collect();

        Page {
            data,
            pagination: Pagination {
                page,
                limit,
                total,
                total_pages,
                has_next: page < total_pages,
                has_prev: page > 1,
            },
        }
    }

    /// おすすめ車両（featured指定がなければ先頭から）
    pub fn featured(&self, limit: usize) -> Vec<&Vehicle> {
        let any_featured = self.vehicles.iter().any(|v| v.featured);

        self.vehicles
            .iter()
            .filter(|v| !any_featured || v.featured)
            .filter(|v| !self.is_excluded(v))
            .take(limit)
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    /// 診断用（除外車両は含めない）
    pub fn identified(&self) -> Vec<IdentifiedVehicle> {
        self.visible().map(Vehicle::identified).collect()
    }
}
