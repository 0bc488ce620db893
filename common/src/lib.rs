//! Kyoto Temple Map Common Library
//!
//! データ生成ツールと表示側で共有されるカタログ型とユーティリティ

pub mod catalog;
pub mod error;
pub mod types;

pub use catalog::{load_catalog, parse_catalog, resolve_image_url};
pub use error::{Error, Result};
pub use types::{file_name_of, Catalog, Category, Location, Site};
