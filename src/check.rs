//! カタログの検証
//!
//! 表示側が起動時に読むのと同じ規則でカタログを読み込み、地図に載らない寺社を洗い出す。

use crate::config::Config;
use crate::error::Result;
use crate::store;
use temple_map_common::{parse_catalog, resolve_image_url, Catalog};

/// 検証結果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckReport {
    pub sites: usize,
    pub images: usize,
    /// 緯度経度がなく地図に表示できない寺社
    pub without_coordinates: Vec<String>,
    /// 画像が1枚もない寺社
    pub without_images: Vec<String>,
    /// 表示側が取得する画像URL
    pub image_urls: Vec<String>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.without_coordinates.is_empty() && self.without_images.is_empty()
    }
}

pub fn check_catalog(catalog: &Catalog, base_path: &str) -> CheckReport {
    let mut report = CheckReport {
        sites: catalog.temples.len(),
        ..Default::default()
    };

    for site in &catalog.temples {
        if site.location.coordinates().is_none() {
            report.without_coordinates.push(site.display_name().to_string());
        }
        if site.images.is_empty() {
            report.without_images.push(site.display_name().to_string());
        }
        report.images += site.images.len();
        report
            .image_urls
            .extend(site.images.iter().map(|img| resolve_image_url(base_path, img)));
    }

    report
}

pub fn run_check(config: &Config) -> Result<CheckReport> {
    let content = store::read_required_string(
        &config.catalog_path(),
        "先に `temple-map merge` を実行してください",
    )?;
    let catalog = parse_catalog(&content)?;
    Ok(check_catalog(&catalog, &config.base_path))
}
