//! カタログ内の画像パス修正
//!
//! 画像フォルダに実在するファイル名と大文字小文字だけが異なるパスを実ファイル名に直す。
//! 見つからないパスはそのまま残し、一覧として報告する。

use crate::config::Config;
use crate::error::{Result, TempleMapError};
use crate::store;
use std::collections::HashMap;
use std::path::Path;
use serde_json::Value;
use temple_map_common::{file_name_of, parse_catalog};
use tracing::warn;
use walkdir::WalkDir;

/// 見つからなかった画像
#[derive(Debug, Clone, PartialEq)]
pub struct MissingImage {
    pub site: String,
    pub path: String,
}

/// 修正結果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixReport {
    /// (修正前, 修正後)
    pub fixed: Vec<(String, String)>,
    pub missing: Vec<MissingImage>,
}

impl std::fmt::Display for FixReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "===== Summary =====")?;
        writeln!(f, "Fixed: {} paths", self.fixed.len())?;
        write!(f, "Missing: {} files", self.missing.len())?;

        if !self.missing.is_empty() {
            writeln!(f, "\n\n===== Missing Files =====")?;
            for (i, missing) in self.missing.iter().enumerate() {
                if i > 0 {
                    writeln!(f)?;
                }
                write!(f, "- {}: {}", missing.site, missing.path)?;
            }
        }
        Ok(())
    }
}

/// フォルダ直下のファイル名一覧
pub fn list_file_names(folder: &Path) -> Result<Vec<String>> {
    if !folder.is_dir() {
        return Err(TempleMapError::FolderNotFound(folder.display().to_string()));
    }

    Ok(WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect())
}

fn site_label(site: &Value) -> String {
    ["name", "id"]
        .iter()
        .filter_map(|key| site.get(*key).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// カタログの画像パスを実在するファイル名に合わせる
///
/// `temples[].images` の文字列だけを書き換え、他の項目には触れない。
pub fn fix_image_paths(document: &mut Value, existing_files: &[String]) -> FixReport {
    let file_map: HashMap<String, &str> = existing_files
        .iter()
        .map(|name| (name.to_lowercase(), name.as_str()))
        .collect();

    let mut report = FixReport::default();

    let Some(temples) = document.get_mut("temples").and_then(Value::as_array_mut) else {
        return report;
    };

    for site in temples {
        let site_name = site_label(site);
        let Some(images) = site.get_mut("images").and_then(Value::as_array_mut) else {
            continue;
        };

        for image in images {
            let Some(path) = image.as_str().map(str::to_string) else {
                continue;
            };
            let file_name = file_name_of(&path);

            match file_map.get(&file_name.to_lowercase()) {
                Some(&actual) if actual != file_name => {
                    let dir_part = &path[..path.len() - file_name.len()];
                    let new_path = format!("{}{}", dir_part, actual);
                    println!("Fixed: {} -> {}", path, new_path);
                    *image = Value::String(new_path.clone());
                    report.fixed.push((path, new_path));
                }
                Some(_) => {}
                None => {
                    warn!("Missing file: {} (temple: {})", path, site_name);
                    report.missing.push(MissingImage {
                        site: site_name.clone(),
                        path,
                    });
                }
            }
        }
    }

    report
}

/// カタログを読み込み、画像パスを修正して上書き保存する
///
/// 表示側と同じ検証に通らないカタログは書き換えない。
pub fn run_fix_paths(config: &Config) -> Result<FixReport> {
    let catalog_path = config.catalog_path();
    let content = store::read_required_string(
        &catalog_path,
        "先に `temple-map merge` を実行してください",
    )?;
    parse_catalog(&content)?;
    let mut document: Value = serde_json::from_str(&content)?;

    let existing_files = list_file_names(&config.images_dir())?;
    let report = fix_image_paths(&mut document, &existing_files);

    store::write_json_pretty(&catalog_path, &document)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog_with(images: &[&str]) -> Value {
        json!({
            "temples": [
                { "id": "kinkakuji", "name": "金閣寺", "images": images }
            ]
        })
    }

    fn images_of(document: &Value) -> &Value {
        &document["temples"][0]["images"]
    }

    #[test]
    fn test_fix_case_mismatch() {
        let mut catalog = catalog_with(&["data/images/img_0001.jpg"]);
        let report = fix_image_paths(&mut catalog, &["IMG_0001.JPG".to_string()]);

        assert_eq!(images_of(&catalog), &json!(["data/images/IMG_0001.JPG"]));
        assert_eq!(
            report.fixed,
            vec![("data/images/img_0001.jpg".to_string(), "data/images/IMG_0001.JPG".to_string())]
        );
        assert!(report.missing.is_empty());
    }

    #[test]
    fn test_exact_match_untouched() {
        let mut catalog = catalog_with(&["data/images/a.jpg"]);
        let report = fix_image_paths(&mut catalog, &["a.jpg".to_string()]);

        assert_eq!(images_of(&catalog), &json!(["data/images/a.jpg"]));
        assert_eq!(report, FixReport::default());
    }

    #[test]
    fn test_missing_file_kept_and_reported() {
        let mut catalog = catalog_with(&["data/images/gone.jpg"]);
        let report = fix_image_paths(&mut catalog, &["a.jpg".to_string()]);

        assert_eq!(images_of(&catalog), &json!(["data/images/gone.jpg"]));
        assert_eq!(
            report.missing,
            vec![MissingImage { site: "金閣寺".into(), path: "data/images/gone.jpg".into() }]
        );
        assert!(report.to_string().contains("- 金閣寺: data/images/gone.jpg"));
    }

    #[test]
    fn test_directory_with_same_name_not_replaced() {
        // ディレクトリ部分に同じ文字列があってもファイル名部分だけを置き換える
        let mut catalog = catalog_with(&["a.jpg/a.jpg"]);
        fix_image_paths(&mut catalog, &["A.jpg".to_string()]);
        assert_eq!(images_of(&catalog), &json!(["a.jpg/A.jpg"]));
    }

    #[test]
    fn test_other_fields_untouched() {
        let mut catalog = json!({
            "version": 2,
            "temples": [
                { "name": "", "id": "x", "category": "museum", "hours": "9-17", "images": ["a.JPG"] },
                { "id": "y" }
            ]
        });
        let report = fix_image_paths(&mut catalog, &["a.jpg".to_string()]);

        assert_eq!(report.fixed.len(), 1);
        assert_eq!(
            catalog,
            json!({
                "version": 2,
                "temples": [
                    { "name": "", "id": "x", "category": "museum", "hours": "9-17", "images": ["a.jpg"] },
                    { "id": "y" }
                ]
            })
        );
    }

    #[test]
    fn test_list_file_names_missing_folder() {
        let result = list_file_names(Path::new("/nonexistent/images"));
        assert!(matches!(result, Err(TempleMapError::FolderNotFound(_))));
    }
}
