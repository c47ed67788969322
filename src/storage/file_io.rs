//! JSON file helpers with atomic writes
//!
//! A write either replaces the target completely or leaves it untouched.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{FinsightError, FinsightResult};

fn storage_err(action: &str, path: &Path, err: impl std::fmt::Display) -> FinsightError {
    FinsightError::Storage(format!("Failed to {} {}: {}", action, path.display(), err))
}

fn parse_file<T: DeserializeOwned>(path: &Path) -> FinsightResult<T> {
    let file = File::open(path).map_err(|e| storage_err("open", path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| storage_err("parse", path, e))
}

/// Read JSON from a file, falling back to `T::default()` when it is missing
pub fn read_json<T, P>(path: P) -> FinsightResult<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        tracing::debug!(path = %path.display(), "file missing, using defaults");
        return Ok(T::default());
    }
    parse_file(path)
}

/// Read JSON from a file that must exist
pub fn read_json_required<T, P>(path: P) -> FinsightResult<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Err(FinsightError::Storage(format!(
            "File not found: {}",
            path.display()
        )));
    }
    parse_file(path)
}

fn write_temp_file<T: Serialize>(temp_path: &Path, target: &Path, data: &T) -> FinsightResult<()> {
    let file = File::create(temp_path).map_err(|e| storage_err("create", temp_path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| storage_err("serialize", target, e))?;
    writer.flush().map_err(|e| storage_err("flush", temp_path, e))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| storage_err("sync", temp_path, e))
}

/// Write pretty JSON through a sibling temp file and rename it into place
///
/// On any failure the temp file is removed and the target is left as it was.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> FinsightResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| storage_err("create directory", parent, e))?;
    }

    // Same directory as the target so the rename cannot cross filesystems
    let temp_path = path.with_extension("json.tmp");

    let written = write_temp_file(&temp_path, path, data)
        .and_then(|()| fs::rename(&temp_path, path).map_err(|e| storage_err("replace", path, e)));
    if let Err(err) = written {
        if temp_path.exists() {
            if let Err(cleanup) = fs::remove_file(&temp_path) {
                tracing::warn!(
                    path = %temp_path.display(),
                    error = %cleanup,
                    "failed to remove temp file"
                );
            }
        }
        return Err(err);
    }

    tracing::debug!(path = %path.display(), "wrote json");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct Record {
        name: String,
        count: u32,
    }

    fn record() -> Record {
        Record {
            name: "rent".to_string(),
            count: 3,
        }
    }

    #[test]
    fn test_missing_file_gives_default() {
        let temp_dir = TempDir::new().unwrap();
        let loaded: Record = read_json(temp_dir.path().join("absent.json")).unwrap();
        assert_eq!(loaded, Record::default());
    }

    #[test]
    fn test_required_file_missing_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_json_required::<Record, _>(temp_dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("record.json");

        write_json_atomic(&path, &record()).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
        let loaded: Record = read_json_required(&path).unwrap();
        assert_eq!(loaded, record());
    }

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("refusing to serialize"))
        }
    }

    #[test]
    fn test_failed_write_removes_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("record.json");
        write_json_atomic(&path, &record()).unwrap();

        let err = write_json_atomic(&path, &Unserializable).unwrap_err();
        assert!(err.to_string().contains("serialize"));

        assert!(!path.with_extension("json.tmp").exists());
        let loaded: Record = read_json_required(&path).unwrap();
        assert_eq!(loaded, record());
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        // A non-empty directory at the target path makes the rename fail
        let path = temp_dir.path().join("record.json");
        fs::create_dir_all(path.join("occupied")).unwrap();

        let err = write_json_atomic(&path, &record()).unwrap_err();
        assert!(matches!(err, FinsightError::Storage(_)));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_malformed_file_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");
        fs::write(&path, "not json").unwrap();

        let err = read_json::<Record, _>(&path).unwrap_err();
        assert!(matches!(err, FinsightError::Storage(_)));
    }
}
