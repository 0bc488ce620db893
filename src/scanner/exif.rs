//! EXIF読み取り
//!
//! 1ファイルの読み取り失敗はエラーにせず `MetadataRead::Unreadable` として返す。

use chrono::NaiveDate;
use exif::{Exif, In, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::GeoPoint;

/// 度・分・秒の除数
const DMS_DIVISION: [f64; 3] = [1.0, 60.0, 3600.0];

/// EXIFから取り出した位置と撮影日
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExifMetadata {
    pub location: Option<GeoPoint>,
    pub captured_on: Option<String>,
}

/// 1ファイル分の読み取り結果
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataRead {
    Parsed(ExifMetadata),
    /// EXIFコンテナが壊れている・存在しない
    Unreadable(String),
}

pub fn read_metadata(path: &Path) -> MetadataRead {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => return MetadataRead::Unreadable(e.to_string()),
    };

    let mut bufreader = BufReader::new(file);
    match exif::Reader::new().read_from_container(&mut bufreader) {
        Ok(exif) => MetadataRead::Parsed(metadata_from_exif(&exif)),
        Err(e) => MetadataRead::Unreadable(e.to_string()),
    }
}

pub fn metadata_from_exif(exif: &Exif) -> ExifMetadata {
    ExifMetadata {
        location: location_from_exif(exif),
        captured_on: date_from_exif(exif),
    }
}

/// GPSタグから緯度経度を求める（緯度・経度の両方が必要）
fn location_from_exif(exif: &Exif) -> Option<GeoPoint> {
    let lat = degrees_value(exif, Tag::GPSLatitude)?;
    let lng = degrees_value(exif, Tag::GPSLongitude)?;

    let lat_ref = ascii_value(exif, Tag::GPSLatitudeRef);
    let lng_ref = ascii_value(exif, Tag::GPSLongitudeRef);

    Some(GeoPoint::new(
        apply_hemisphere(lat, lat_ref.as_deref(), "S"),
        apply_hemisphere(lng, lng_ref.as_deref(), "W"),
    ))
}

/// 南緯(S)・西経(W)なら符号を反転
pub fn apply_hemisphere(value: f64, reference: Option<&str>, negative_ref: &str) -> f64 {
    if reference == Some(negative_ref) {
        -value
    } else {
        value
    }
}

/// DateTimeOriginal → DateTime の順に撮影日を探す
///
/// EXIFの日時はタイムゾーンなしのため UTC とみなし、日付部分だけを残す。
fn date_from_exif(exif: &Exif) -> Option<String> {
    [Tag::DateTimeOriginal, Tag::DateTime]
        .iter()
        .find_map(|&tag| {
            let field = exif.get_field(tag, In::PRIMARY)?;
            let Value::Ascii(values) = &field.value else {
                return None;
            };
            let datetime = exif::DateTime::from_ascii(values.first()?).ok()?;
            let date = NaiveDate::from_ymd_opt(
                i32::from(datetime.year),
                u32::from(datetime.month),
                u32::from(datetime.day),
            )?;
            Some(date.format("%Y-%m-%d").to_string())
        })
}

fn degrees_value(exif: &Exif, tag: Tag) -> Option<f64> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    match &field.value {
        Value::Rational(parts) if !parts.is_empty() => {
            let degrees: f64 = parts
                .iter()
                .zip(DMS_DIVISION.iter())
                .map(|(part, div)| part.to_f64() / div)
                .sum();
            degrees.is_finite().then_some(degrees)
        }
        _ => None,
    }
}

fn ascii_value(exif: &Exif, tag: Tag) -> Option<String> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    match &field.value {
        Value::Ascii(values) => values
            .first()
            .map(|v| String::from_utf8_lossy(v).trim().to_string()),
        _ => None,
    }
}
