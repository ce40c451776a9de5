//! 照合の型定義
//!
//! CLIとHTTPサーバで共有される型:
//! - VehicleIdentity: 照合の問い合わせ側（ブランド・モデル・グレード・年式）
//! - CandidateName: 照合対象側（フォルダ名・ファイル名）
//! - AssetGroup: 画像フォルダ1件分（ファイル一覧付き）
//! - MatchResult: 候補1件の複合スコア
//! - FolderInfo: フォルダ一覧APIのレコード

use crate::images::has_priority_marker;
use crate::normalize::normalize_name;
use crate::score::MatchSignals;
use serde::{Deserialize, Serialize};

/// 車両の識別情報
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleIdentity {
    pub brand: String,
    pub model: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub year: Option<u16>,
}

impl VehicleIdentity {
    pub fn new(brand: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            brand: brand.into(),
            model: model.into(),
            ..Default::default()
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_year(mut self, year: u16) -> Self {
        self.year = Some(year);
        self
    }

    /// 表示名（`brand model version year`、空要素は省く）
    pub fn display_name(&self) -> String {
        let year = self.year.map(|y| y.to_string());
        [
            Some(self.brand.as_str()),
            Some(self.model.as_str()),
            self.version.as_deref(),
            year.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }

    /// 正規化済みの表示名
    pub fn normalized_name(&self) -> String {
        normalize_name(&self.display_name())
    }
}

/// 照合対象の名前（フォルダ名またはファイル名）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateName {
    /// ディスク上の元の名前
    pub raw: String,
    /// 正規化済みの名前（ファイル名は拡張子を除いて正規化）
    pub normalized: String,
}

impl CandidateName {
    /// ディレクトリ名から生成
    pub fn folder(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let normalized = normalize_name(&raw);
        Self { raw, normalized }
    }

    /// ファイル名から生成（拡張子を除いて正規化）
    pub fn file(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let normalized = normalize_name(file_stem(&raw));
        Self { raw, normalized }
    }
}

/// 拡張子を除いたファイル名
///
/// 先頭のドットだけの名前（`.hidden`）はそのまま返す。
pub fn file_stem(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    }
}

/// 画像フォルダ1件（照合の入力）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetGroup {
    pub name: String,
    /// フォルダ内の画像ファイル名
    pub files: Vec<String>,
}

impl AssetGroup {
    pub fn new(name: impl Into<String>, files: Vec<String>) -> Self {
        Self {
            name: name.into(),
            files,
        }
    }

    /// 優先マーカー（destaque等）を含むファイルがあるか
    pub fn has_priority_asset(&self) -> bool {
        self.files.iter().any(|f| has_priority_marker(f))
    }

    pub fn asset_count(&self) -> usize {
        self.files.len()
    }
}

/// 候補1件の照合結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub candidate: CandidateName,
    /// 入力時の位置
    pub index: usize,
    /// 複合スコア（0は不一致）
    pub score: u32,
    pub signals: MatchSignals,
}

impl MatchResult {
    pub fn is_match(&self) -> bool {
        self.score > 0
    }
}

/// フォルダ一覧APIのレコード
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderInfo {
    pub name: String,
    pub normalized_name: String,
    pub image_count: usize,
    pub has_destaque: bool,
    /// 画像URL
    pub images: Vec<String>,
}
