//! 雛形（EXIF由来）と注釈（人手/AI由来）のマージ
//!
//! 照合規則: 画像のファイル名（パスを除く）が1つでも共通すれば同じ寺社。
//! 雛形を先頭から走査し、最初に共通画像を持つものを採用する（重なりの大小は見ない）。

mod types;

pub use types::{AnnotationDocument, AnnotationLocation, MergeReport, SiteAnnotation};

use crate::config::Config;
use crate::draft::DraftDocument;
use crate::error::Result;
use crate::store;
use std::collections::HashSet;
use temple_map_common::{file_name_of, Catalog, Category, Location, Site};
use tracing::{info, warn};

/// マージの出力
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub catalog: Catalog,
    pub report: MergeReport,
}

fn file_names<'a>(paths: impl IntoIterator<Item = &'a String>) -> HashSet<&'a str> {
    paths.into_iter().map(|p| file_name_of(p)).collect()
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

/// 注釈と共通の画像を持つ最初の雛形を返す
pub fn find_matching_candidate<'a>(
    candidates: &'a [Site],
    annotation: &SiteAnnotation,
) -> Option<&'a Site> {
    let annotation_images = file_names(annotation.images.iter().flatten());
    if annotation_images.is_empty() {
        return None;
    }

    candidates.iter().find(|candidate| {
        candidate
            .images
            .iter()
            .any(|img| annotation_images.contains(file_name_of(img)))
    })
}

/// ファイル名で重複を除いた和集合（先に現れたパスを残す）
pub fn union_images(first: &[String], second: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut union = Vec::with_capacity(first.len() + second.len());

    for path in first.iter().chain(second.iter()) {
        if seen.insert(file_name_of(path)) {
            union.push(path.clone());
        }
    }

    union
}

fn parse_category(annotation: &SiteAnnotation) -> Option<Category> {
    let raw = non_empty(annotation.category.as_ref())?;
    match raw.parse() {
        Ok(category) => Some(category),
        Err(e) => {
            warn!("{}: {}", annotation.label(), e);
            None
        }
    }
}

/// 照合できた雛形と注釈を1件にまとめる
///
/// 注釈の値を優先し、空なら雛形の値で補う。緯度経度だけは常に雛形（EXIF）を使う。
pub fn merge_site(candidate: &Site, annotation: &SiteAnnotation) -> Site {
    let pick = |primary: Option<&String>, fallback: &str| -> String {
        non_empty(primary).unwrap_or(fallback).to_string()
    };

    let address = annotation
        .location
        .as_ref()
        .and_then(|loc| loc.address.as_ref());

    let mut extra = candidate.extra.clone();
    extra.extend(annotation.extra.clone());

    Site {
        id: pick(annotation.id.as_ref(), &candidate.id),
        name: pick(annotation.name.as_ref(), &candidate.name),
        name_kana: pick(annotation.name_kana.as_ref(), &candidate.name_kana),
        category: parse_category(annotation).unwrap_or_else(|| candidate.category.clone()),
        location: Location {
            lat: candidate.location.lat,
            lng: candidate.location.lng,
            address: pick(address, &candidate.location.address),
        },
        description: pick(annotation.description.as_ref(), &candidate.description),
        images: union_images(
            &candidate.images,
            annotation.images.as_deref().unwrap_or_default(),
        ),
        visit_date: Some(
            non_empty(candidate.visit_date.as_ref())
                .or(non_empty(annotation.visit_date.as_ref()))
                .unwrap_or_default()
                .to_string(),
        ),
        tags: annotation.tags.clone().or_else(|| candidate.tags.clone()),
        website: Some(pick(
            annotation.website.as_ref(),
            candidate.website.as_deref().unwrap_or_default(),
        )),
        extra,
    }
}

/// 照合できなかった注釈をそのまま Site にする（欠落項目は既定値）
///
/// 区分は解釈せず、書かれた文字列のまま出力する。
pub fn annotation_to_site(annotation: &SiteAnnotation) -> Site {
    let location = annotation.location.clone().unwrap_or_default();

    Site {
        id: annotation.id.clone().unwrap_or_default(),
        name: annotation.name.clone().unwrap_or_default(),
        name_kana: annotation.name_kana.clone().unwrap_or_default(),
        category: non_empty(annotation.category.as_ref())
            .map(Category::from_raw)
            .unwrap_or_default(),
        location: Location {
            lat: location.lat,
            lng: location.lng,
            address: location.address.unwrap_or_default(),
        },
        description: annotation.description.clone().unwrap_or_default(),
        images: annotation.images.clone().unwrap_or_default(),
        visit_date: annotation.visit_date.clone(),
        tags: annotation.tags.clone(),
        website: annotation.website.clone(),
        extra: annotation.extra.clone(),
    }
}

/// 雛形と注釈をマージしてカタログを作る
///
/// 注釈はすべて1件ずつ出力に含まれる。どの出力とも画像を共有しない雛形は末尾に追加する。
pub fn merge_catalog(candidates: &[Site], annotations: &[SiteAnnotation]) -> MergeOutcome {
    let mut merged: Vec<Site> = Vec::with_capacity(annotations.len() + candidates.len());
    let mut report = MergeReport {
        draft_count: candidates.len(),
        annotation_count: annotations.len(),
        ..Default::default()
    };

    for annotation in annotations {
        match find_matching_candidate(candidates, annotation) {
            Some(candidate) => {
                merged.push(merge_site(candidate, annotation));
                report.matched += 1;
            }
            None => {
                warn!("警告: {} の位置情報が見つかりません", annotation.label());
                report.unmatched_annotations.push(annotation.label().to_string());
                merged.push(annotation_to_site(annotation));
            }
        }
    }

    for candidate in candidates {
        let candidate_images = candidate.image_file_names();
        let found = merged
            .iter()
            .any(|site| !candidate_images.is_disjoint(&site.image_file_names()));

        if !found {
            info!("追加: {} (注釈で未認識)", candidate.display_name());
            report
                .unrecognized_candidates
                .push(candidate.display_name().to_string());
            merged.push(candidate.clone());
        }
    }

    report.total = merged.len();

    MergeOutcome {
        catalog: Catalog { temples: merged },
        report,
    }
}

/// 雛形JSONと注釈JSONを読み込み、カタログを書き出す
///
/// どちらかの入力が欠落・不正なら何も書き出さずにエラーを返す。
pub fn run_merge(config: &Config) -> Result<MergeReport> {
    let draft_path = config.draft_path();
    let annotations_path = config.annotations_path();

    let draft: DraftDocument = store::read_required_json(
        &draft_path,
        "先に `temple-map generate` を実行してください",
    )?;
    let annotations: AnnotationDocument = store::read_required_json(
        &annotations_path,
        &format!(
            "写真から作成した注釈JSONを {} として保存してください",
            annotations_path.display()
        ),
    )?;
    let annotations = annotations.into_annotations();

    println!("EXIF JSON: {}件", draft.temples.len());
    println!("注釈 JSON: {}件\n", annotations.len());

    let outcome = merge_catalog(&draft.temples, &annotations);

    let output = config.catalog_path();
    store::write_json_pretty(&output, &outcome.catalog)?;
    println!("✓ {} を生成しました", output.display());

    Ok(outcome.report)
}
