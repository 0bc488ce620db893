use thiserror::Error;

#[derive(Error, Debug)]
pub enum TempleMapError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("入力ファイルが見つかりません: {path}\n{hint}")]
    InputMissing { path: String, hint: String },

    #[error("データ形式が不正です: {0}")]
    InvalidFormat(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] temple_map_common::Error),
}

pub type Result<T> = std::result::Result<T, TempleMapError>;
