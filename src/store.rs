//! JSONファイルの入出力

use crate::error::{Result, TempleMapError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// 必須入力のJSONを読み込む
///
/// ファイルがなければ `hint`（先に実行すべき手順）付きの `InputMissing`。
pub fn read_required_json<T: DeserializeOwned>(path: &Path, hint: &str) -> Result<T> {
    let content = read_required_string(path, hint)?;
    Ok(serde_json::from_str(&content)?)
}

/// 必須入力をそのまま文字列で読み込む
pub fn read_required_string(path: &Path, hint: &str) -> Result<String> {
    if !path.exists() {
        return Err(TempleMapError::InputMissing {
            path: path.display().to_string(),
            hint: hint.to_string(),
        });
    }

    Ok(std::fs::read_to_string(path)?)
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// 2スペースインデントで書き出す
///
/// 同じディレクトリの一時ファイルに書いてから置き換える。途中で失敗しても元のファイルは残る。
pub fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let tmp_path = temp_path_for(path);
    let written = write_to(&tmp_path, value);
    if let Err(e) = written {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e);
    }

    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

fn write_to<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_input_carries_hint() {
        let dir = tempfile::tempdir().unwrap();
        let result: Result<serde_json::Value> =
            read_required_json(&dir.path().join("none.json"), "先に generate を実行してください");

        match result {
            Err(TempleMapError::InputMissing { hint, .. }) => assert!(hint.contains("generate")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_malformed_input_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ \"temples\": [").unwrap();

        let result: Result<serde_json::Value> = read_required_json(&path, "");
        assert!(matches!(result, Err(TempleMapError::JsonParse(_))));
    }

    #[test]
    fn test_write_uses_two_space_indent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.json");
        write_json_pretty(&path, &json!({ "temples": [] })).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "{\n  \"temples\": []\n}");
    }

    #[test]
    fn test_write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("temples.json");
        std::fs::write(&path, "古い内容").unwrap();

        write_json_pretty(&path, &json!({ "temples": [1] })).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "{\n  \"temples\": [\n    1\n  ]\n}");
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn test_failed_write_keeps_original() {
        struct Unserializable;

        impl Serialize for Unserializable {
            fn serialize<S: serde::Serializer>(&self, _: S) -> std::result::Result<S::Ok, S::Error> {
                Err(serde::ser::Error::custom("書き出し不可"))
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("temples.json");
        std::fs::write(&path, "{}").unwrap();

        assert!(write_json_pretty(&path, &Unserializable).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
        assert!(!temp_path_for(&path).exists());
    }
}
