use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 注釈の位置情報（座標は概算または欠落）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationLocation {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    #[serde(default)]
    pub address: Option<String>,
}

/// 写真を見て人手/AIが作成した寺社情報
///
/// すべての項目が任意。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteAnnotation {
    pub id: Option<String>,
    pub name: Option<String>,
    pub name_kana: Option<String>,
    pub category: Option<String>,   // temple / shrine
    pub location: Option<AnnotationLocation>,
    pub description: Option<String>,
    pub images: Option<Vec<String>>,
    pub visit_date: Option<String>,
    pub tags: Option<Vec<String>>,
    pub website: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SiteAnnotation {
    /// ログ表示用の名前
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.id.as_deref())
            .unwrap_or("(名称なし)")
    }
}

/// 注釈ドキュメント: `{ "temples": [...] }` または配列そのもの
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnnotationDocument {
    Wrapped { temples: Vec<SiteAnnotation> },
    Bare(Vec<SiteAnnotation>),
}

impl AnnotationDocument {
    pub fn into_annotations(self) -> Vec<SiteAnnotation> {
        match self {
            AnnotationDocument::Wrapped { temples } => temples,
            AnnotationDocument::Bare(temples) => temples,
        }
    }
}

/// マージ結果の集計
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeReport {
    pub draft_count: usize,
    pub annotation_count: usize,
    /// 雛形と照合できた注釈の数
    pub matched: usize,
    /// 位置情報が見つからなかった注釈
    pub unmatched_annotations: Vec<String>,
    /// 注釈で認識されなかった雛形
    pub unrecognized_candidates: Vec<String>,
    pub total: usize,
}

impl std::fmt::Display for MergeReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "===== Summary =====")?;
        writeln!(f, "EXIF JSON: {}件", self.draft_count)?;
        writeln!(f, "注釈 JSON: {}件", self.annotation_count)?;
        writeln!(f, "照合成功: {}件", self.matched)?;
        writeln!(f, "位置情報なし: {}件", self.unmatched_annotations.len())?;
        for name in &self.unmatched_annotations {
            writeln!(f, "  - {}", name)?;
        }
        writeln!(f, "注釈で未認識: {}件", self.unrecognized_candidates.len())?;
        for name in &self.unrecognized_candidates {
            writeln!(f, "  - {}", name)?;
        }
        write!(f, "マージ結果: {}件", self.total)
    }
}
