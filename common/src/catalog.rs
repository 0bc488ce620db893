//! カタログ読み込みと画像URL解決
//!
//! 表示側が起動時に行う検証と同じ規則でカタログを読む。
//! `temples` が欠落または配列でない場合は致命的な読み込みエラー。

use crate::error::{Error, Result};
use crate::types::Catalog;

/// カタログJSONを検証して読み込む
pub fn parse_catalog(json: &str) -> Result<Catalog> {
    let value: serde_json::Value = serde_json::from_str(json)?;

    match value.get("temples") {
        Some(temples) if temples.is_array() => {}
        Some(_) => return Err(Error::InvalidFormat("temples が配列ではありません".into())),
        None => return Err(Error::InvalidFormat("temples がありません".into())),
    }

    Ok(serde_json::from_value(value)?)
}

/// ファイルからカタログを読み込む
pub fn load_catalog(path: &std::path::Path) -> Result<Catalog> {
    let content = std::fs::read_to_string(path)?;
    parse_catalog(&content)
}

/// 画像パスを表示用URLに解決する
///
/// `http` で始まるもの、`/` で始まるものはそのまま。それ以外はベースパスに連結する。
pub fn resolve_image_url(base_path: &str, image_path: &str) -> String {
    if image_path.starts_with("http") || image_path.starts_with('/') {
        return image_path.to_string();
    }

    let base = if base_path.is_empty() { "/" } else { base_path };
    if base.ends_with('/') {
        format!("{}{}", base, image_path)
    } else {
        format!("{}/{}", base, image_path)
    }
}
