//! 実行設定
//!
//! 各ステージは `&Config` を受け取り、入出力パスはすべてここから解決する。

use crate::cluster::DEFAULT_CLUSTER_THRESHOLD;
use crate::error::{Result, TempleMapError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// プロジェクトルート（相対パスの基準）
    pub project_root: PathBuf,
    /// 画像フォルダ
    pub images_dir: PathBuf,
    /// EXIFから生成する雛形JSON
    pub draft_path: PathBuf,
    /// AI/手作業で作成した注釈JSON
    pub annotations_path: PathBuf,
    /// 最終カタログJSON
    pub catalog_path: PathBuf,
    /// カタログ内の画像パスの接頭辞
    pub image_prefix: String,
    /// 表示側のベースパス
    pub base_path: String,
    /// クラスタリングの距離閾値（度）
    pub cluster_threshold: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            images_dir: PathBuf::from("public/data/images"),
            draft_path: PathBuf::from("public/data/temples-generated.json"),
            annotations_path: PathBuf::from("public/data/temples-from-gemini.json"),
            catalog_path: PathBuf::from("public/data/temples.json"),
            image_prefix: "data/images".into(),
            base_path: "/".into(),
            cluster_threshold: DEFAULT_CLUSTER_THRESHOLD,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
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
            .ok_or_else(|| TempleMapError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("temple-map").join("config.json"))
    }

    /// プロジェクトルートを差し替えた設定を返す
    pub fn with_root(mut self, root: PathBuf) -> Self {
        self.project_root = root;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.cluster_threshold.is_nan() || self.cluster_threshold <= 0.0 {
            return Err(TempleMapError::Config(format!(
                "cluster_threshold は正の値である必要があります: {}",
                self.cluster_threshold
            )));
        }
        Ok(())
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }

    pub fn images_dir(&self) -> PathBuf {
        self.resolve(&self.images_dir)
    }

    pub fn draft_path(&self) -> PathBuf {
        self.resolve(&self.draft_path)
    }

    pub fn annotations_path(&self) -> PathBuf {
        self.resolve(&self.annotations_path)
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.resolve(&self.catalog_path)
    }
}
