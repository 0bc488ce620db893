//! 位置情報による寺社候補のグループ化
//!
//! 1パスの貪欲法。各クラスタの基準点（アンカー）は作成時に固定され、
//! 後から加わった画像で動くことはない。判定は作成順に走査して最初に
//! 閾値未満となったクラスタに割り当てるため、結果は入力順に依存する。

use crate::scanner::{GeoPoint, ImageRecord};

/// 約100m（京都の緯度で）
pub const DEFAULT_CLUSTER_THRESHOLD: f64 = 0.001;

/// クラスタリング結果の寺社候補
#[derive(Debug, Clone, PartialEq)]
pub struct SiteCandidate {
    /// 最初に割り当てられた画像の位置（重心ではない）
    pub anchor: GeoPoint,
    /// 割り当て順の画像参照
    pub images: Vec<String>,
    /// アンカー画像の撮影日（後続画像では補完しない）
    pub date: Option<String>,
}

impl SiteCandidate {
    fn open(record: &ImageRecord, anchor: GeoPoint) -> Self {
        Self {
            anchor,
            images: vec![record.reference.clone()],
            date: record.captured_on.clone(),
        }
    }
}

/// 位置情報のある画像を近接度でグループ化する
///
/// 位置情報のないレコードは読み飛ばされ、どの候補にも含まれない。
pub fn cluster_by_location(records: &[ImageRecord], threshold: f64) -> Vec<SiteCandidate> {
    let mut clusters: Vec<SiteCandidate> = Vec::new();

    for record in records {
        let Some(location) = record.location else {
            continue;
        };

        match clusters
            .iter_mut()
            .find(|c| c.anchor.degree_distance(&location) < threshold)
        {
            Some(cluster) => cluster.images.push(record.reference.clone()),
            None => clusters.push(SiteCandidate::open(record, location)),
        }
    }

    clusters
}
