use crate::error::{MediaError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, warn};

pub const ENV_IMAGES_ROOT: &str = "SHOWROOM_IMAGES_ROOT";
pub const ENV_CATALOG: &str = "SHOWROOM_CATALOG";
pub const ENV_PORT: &str = "SHOWROOM_PORT";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 画像フォルダのルート
    pub images_root: PathBuf,
    /// 画像URLの接頭辞
    pub url_prefix: String,
    /// 車両カタログJSON
    pub catalog_path: Option<PathBuf>,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            images_root: PathBuf::from("public/images"),
            url_prefix: "/images".into(),
            catalog_path: None,
            port: 3001,
        }
    }
}

impl Config {
    /// 設定ファイルを読み込み、環境変数で上書きする
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            serde_json::from_str(&content)?
        } else {
            debug!("設定ファイルなし、デフォルトを使用: {}", config_path.display());
            Self::default()
        };

        config.apply_env();
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| MediaError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("showroom-media").join("config.json"))
    }

    /// 環境変数による上書き
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(root) = lookup(ENV_IMAGES_ROOT) {
            self.images_root = PathBuf::from(root);
        }

        if let Some(catalog) = lookup(ENV_CATALOG) {
            self.catalog_path = Some(PathBuf::from(catalog));
        }

        if let Some(port) = lookup(ENV_PORT) {
            match port.parse() {
                Ok(p) => self.port = p,
                Err(e) => warn!("{ENV_PORT} が不正です（{port}）: {e}、{} を使用", self.port),
            }
        }
    }

    pub fn set_images_root(&mut self, root: PathBuf) -> Result<()> {
        self.images_root = root;
        self.save()
    }

    pub fn set_catalog_path(&mut self, path: PathBuf) -> Result<()> {
        self.catalog_path = Some(path);
        self.save()
    }
}
