//! 寺社カタログの型定義
//!
//! 生成ツールと表示側（地図・詳細モーダル）で共有される型:
//! - Site: カタログの1エントリ
//! - Location: 緯度経度と住所
//! - Catalog: `{ "temples": [...] }` 形式のカタログ全体

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// 寺社の区分
///
/// `temple` / `shrine` 以外の表記は `Other` として書かれたまま保持する。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Category {
    #[default]
    Temple,
    Shrine,
    Other(String),
}

impl Category {
    /// 文字列を正規化せずに区分にする
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "temple" => Category::Temple,
            "shrine" => Category::Shrine,
            other => Category::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Category::Temple => "temple",
            Category::Shrine => "shrine",
            Category::Other(raw) => raw,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "temple" | "寺" | "寺院" => Ok(Category::Temple),
            "shrine" | "神社" => Ok(Category::Shrine),
            _ => Err(format!("Unknown category: {}. Use temple or shrine", s)),
        }
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// 手編集された雛形でも読めるよう、null は既定値、未知の表記は Other にする
impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map(|s| Category::from_raw(&s)).unwrap_or_default())
    }
}

/// null を既定値として読む
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// 位置情報
///
/// 座標は写真のEXIFから得られた場合のみ存在する。注釈だけの寺社では欠落しうる。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
}

impl Location {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat: Some(lat),
            lng: Some(lng),
            address: String::new(),
        }
    }

    /// 緯度経度の両方が揃っている場合のみ返す
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some((lat, lng)),
            _ => None,
        }
    }
}

/// カタログの1エントリ
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name_kana: String,      // 読み仮名

    #[serde(default)]
    pub category: Category,

    #[serde(default, deserialize_with = "null_as_default")]
    pub location: Location,

    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<String>,    // data/images/xxx.jpg 形式の相対パス

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visit_date: Option<String>, // YYYY-MM-DD

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    /// 上記以外の項目（入力にあったものをそのまま出力する）
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Site {
    /// 画像パスのファイル名部分の集合
    pub fn image_file_names(&self) -> HashSet<&str> {
        self.images.iter().map(|p| file_name_of(p)).collect()
    }

    /// ログ表示用の名前（名前が空ならID）
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

/// カタログ全体
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub temples: Vec<Site>,
}

/// パスからファイル名部分を取り出す（`/` と `\` の両方を区切りとみなす）
pub fn file_name_of(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_of() {
        assert_eq!(file_name_of("data/images/kinkakuji_01.jpg"), "kinkakuji_01.jpg");
        assert_eq!(file_name_of("C:\\photos\\a.JPG"), "a.JPG");
        assert_eq!(file_name_of("plain.png"), "plain.png");
    }

    #[test]
    fn test_site_deserialize_full() {
        let json = r#"{
            "id": "kinkakuji",
            "name": "金閣寺",
            "nameKana": "きんかくじ",
            "category": "temple",
            "location": { "lat": 35.0394, "lng": 135.7292, "address": "京都府京都市北区金閣寺町1" },
            "description": "正式名称は鹿苑寺",
            "images": ["data/images/kinkakuji_01.jpg"],
            "visitDate": "2024-03-15",
            "tags": ["世界遺産"],
            "website": "https://example.com"
        }"#;

        let site: Site = serde_json::from_str(json).unwrap();
        assert_eq!(site.name_kana, "きんかくじ");
        assert_eq!(site.category, Category::Temple);
        assert_eq!(site.location.coordinates(), Some((35.0394, 135.7292)));
        assert_eq!(site.visit_date.as_deref(), Some("2024-03-15"));
        assert_eq!(site.tags, Some(vec!["世界遺産".to_string()]));
    }

    #[test]
    fn test_site_serialize_field_names() {
        let site = Site {
            id: "temple_1".into(),
            name_kana: "てすとじんじゃ".into(),
            category: Category::Shrine,
            location: Location::new(35.0, 135.0),
            visit_date: Some("2024-01-01".into()),
            ..Default::default()
        };

        let json = serde_json::to_string(&site).unwrap();
        assert!(json.contains("\"nameKana\":\"てすとじんじゃ\""));
        assert!(json.contains("\"category\":\"shrine\""));
        assert!(json.contains("\"visitDate\":\"2024-01-01\""));
        assert!(json.contains("\"lat\":35.0"));
        // 未設定の任意項目は出力しない
        assert!(!json.contains("website"));
        assert!(!json.contains("tags"));
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("temple".parse::<Category>(), Ok(Category::Temple));
        assert_eq!("Shrine".parse::<Category>(), Ok(Category::Shrine));
        assert_eq!("神社".parse::<Category>(), Ok(Category::Shrine));
        assert!("museum".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_keeps_unknown_spelling() {
        let site: Site = serde_json::from_str(r#"{ "id": "a", "category": "神社" }"#).unwrap();
        assert_eq!(site.category, Category::Other("神社".into()));

        let json = serde_json::to_value(&site).unwrap();
        assert_eq!(json["category"], "神社");
    }

    #[test]
    fn test_site_null_fields_default() {
        let json = r#"{
            "id": "temple_1",
            "name": null,
            "category": null,
            "location": { "lat": 35.0, "lng": 135.0, "address": null },
            "images": null
        }"#;

        let site: Site = serde_json::from_str(json).unwrap();
        assert_eq!(site.name, "");
        assert_eq!(site.category, Category::Temple);
        assert_eq!(site.location.address, "");
        assert!(site.images.is_empty());
    }

    #[test]
    fn test_site_keeps_extra_fields() {
        let json = r#"{ "id": "a", "hours": "9-17", "fee": { "adult": 500 } }"#;
        let site: Site = serde_json::from_str(json).unwrap();
        assert_eq!(site.extra["hours"], "9-17");

        let out = serde_json::to_value(&site).unwrap();
        assert_eq!(out["hours"], "9-17");
        assert_eq!(out["fee"]["adult"], 500);
    }

    #[test]
    fn test_location_without_coordinates() {
        let location: Location = serde_json::from_str(r#"{ "address": "京都" }"#).unwrap();
        assert_eq!(location.coordinates(), None);
        assert_eq!(location.address, "京都");
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let site = Site {
            id: "temple_3".into(),
            ..Default::default()
        };
        assert_eq!(site.display_name(), "temple_3");
    }
}
