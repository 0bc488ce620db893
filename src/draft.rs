//! EXIFからの雛形生成
//!
//! 画像フォルダ → レコード抽出 → 位置クラスタリング → 雛形JSON。
//! 名前や説明は空欄（またはプレースホルダ）のまま出力し、人手またはAIで補完する。

use crate::cluster::{cluster_by_location, SiteCandidate};
use crate::config::Config;
use crate::error::Result;
use crate::scanner::{self, ImageRecord};
use crate::store;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use temple_map_common::{Category, Location, Site};

const DRAFT_NOTE: &str =
    "このファイルは自動生成されました。name, nameKana, address, descriptionなどを手動で編集してください。";

/// 雛形ドキュメント（マージの入力Aでもある）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DraftDocument {
    pub temples: Vec<Site>,

    #[serde(rename = "_note", default)]
    pub note: String,
}

/// 雛形生成の結果
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub scanned: usize,
    pub located: usize,
    pub sites: usize,
    pub output: PathBuf,
}

/// 候補をプレースホルダ付きの Site に変換する
pub fn build_draft(candidates: &[SiteCandidate]) -> DraftDocument {
    let temples = candidates
        .iter()
        .enumerate()
        .map(|(index, candidate)| {
            let number = index + 1;
            Site {
                id: format!("temple_{}", number),
                name: format!("寺社 {}", number),
                name_kana: String::new(),
                category: Category::Temple,
                location: Location::new(candidate.anchor.latitude, candidate.anchor.longitude),
                description: String::new(),
                images: candidate.images.clone(),
                visit_date: Some(candidate.date.clone().unwrap_or_default()),
                tags: Some(Vec::new()),
                website: Some(String::new()),
                extra: Default::default(),
            }
        })
        .collect();

    DraftDocument {
        temples,
        note: DRAFT_NOTE.to_string(),
    }
}

fn print_record(record: &ImageRecord) {
    match record.location {
        Some(loc) => println!(
            "✓ {}: ({:.6}, {:.6})",
            record.file_name(),
            loc.latitude,
            loc.longitude
        ),
        None => println!("✗ {}: 位置情報なし", record.file_name()),
    }
}

/// 画像フォルダから雛形JSONを生成して書き出す
pub fn run_generate(config: &Config) -> Result<GenerateReport> {
    let images_dir = config.images_dir();

    let records = scanner::extract_records(&images_dir, &config.image_prefix)?;
    println!("{}枚の画像ファイルを検出しました\n", records.len());

    for record in &records {
        print_record(record);
    }

    let located = records.iter().filter(|r| r.location.is_some()).count();
    println!("\n位置情報を持つ画像: {}枚\n", located);

    let candidates = cluster_by_location(&records, config.cluster_threshold);
    println!("{}箇所の寺社を検出しました\n", candidates.len());

    let draft = build_draft(&candidates);
    let output = config.draft_path();
    store::write_json_pretty(&output, &draft)?;

    Ok(GenerateReport {
        scanned: records.len(),
        located,
        sites: draft.temples.len(),
        output,
    })
}
