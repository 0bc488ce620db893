//! 画像メタデータ抽出
//!
//! 画像フォルダ直下のファイルから位置情報と撮影日を取り出し、
//! `ImageRecord` の列を作る。出力順はフォルダの列挙順。

mod exif;

pub use self::exif::{
    apply_hemisphere, metadata_from_exif, read_metadata, ExifMetadata, MetadataRead,
};

use crate::error::{Result, TempleMapError};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// 対象とする画像拡張子（大文字小文字は区別しない）
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "heic"];

/// 緯度経度（度）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// 緯度経度空間でのユークリッド距離（大圏距離ではない）
    pub fn degree_distance(&self, other: &GeoPoint) -> f64 {
        (self.latitude - other.latitude).hypot(self.longitude - other.longitude)
    }
}

/// 画像1枚分のメタデータ
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRecord {
    /// 後続処理で参照する相対パス（例: data/images/xxx.jpg）
    pub reference: String,
    pub location: Option<GeoPoint>,
    /// YYYY-MM-DD
    pub captured_on: Option<String>,
}

impl ImageRecord {
    pub fn file_name(&self) -> &str {
        temple_map_common::file_name_of(&self.reference)
    }
}

pub fn is_image_extension(ext: &str) -> bool {
    IMAGE_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext))
}

/// フォルダ直下の画像ファイルを列挙順のまま返す
pub fn scan_folder(folder: &Path) -> Result<Vec<PathBuf>> {
    if !folder.is_dir() {
        return Err(TempleMapError::FolderNotFound(folder.display().to_string()));
    }

    let images = WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|path| {
            path.extension()
                .map(|ext| is_image_extension(&ext.to_string_lossy()))
                .unwrap_or(false)
        })
        .collect();

    Ok(images)
}

/// ファイル名に含まれる YYYY-MM-DD を撮影日とみなす
pub fn date_from_filename(file_name: &str) -> Option<String> {
    lazy_static::lazy_static! {
        static ref DATE_RE: Regex = Regex::new(r"(\d{4})-(\d{2})-(\d{2})").unwrap();
    }

    DATE_RE
        .captures(file_name)
        .map(|caps| format!("{}-{}-{}", &caps[1], &caps[2], &caps[3]))
}

/// 1ファイル分のレコードを作る
///
/// EXIFが読めない場合は警告のみで、位置・EXIF日付なしとして続行する。
pub fn build_record(path: &Path, reference_prefix: &str) -> ImageRecord {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let metadata = match read_metadata(path) {
        MetadataRead::Parsed(meta) => meta,
        MetadataRead::Unreadable(reason) => {
            warn!("EXIF読み取りエラー ({}): {}", file_name, reason);
            ExifMetadata::default()
        }
    };

    let captured_on = metadata
        .captured_on
        .or_else(|| date_from_filename(&file_name));

    let reference = if reference_prefix.is_empty() {
        file_name
    } else {
        format!("{}/{}", reference_prefix.trim_end_matches('/'), file_name)
    };

    ImageRecord {
        reference,
        location: metadata.location,
        captured_on,
    }
}

/// フォルダ内の全画像からレコードを作る
///
/// 読み取りは並列に行うが、結果はフォルダの列挙順に並ぶ。
pub fn extract_records(folder: &Path, reference_prefix: &str) -> Result<Vec<ImageRecord>> {
    let paths = scan_folder(folder)?;

    let progress = ProgressBar::new(paths.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("  {bar:40} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let records: Vec<ImageRecord> = paths
        .par_iter()
        .map(|path| {
            let record = build_record(path, reference_prefix);
            progress.inc(1);
            record
        })
        .collect();

    progress.finish_and_clear();
    Ok(records)
}
