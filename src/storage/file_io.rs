//! JSON file helpers
//!
//! Writes go to a sibling temp file which is synced and then renamed over the
//! target, so a crash mid-write leaves the previous file intact.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::SubkeepError;

/// Read and parse a JSON file that must exist
pub fn read_json_required<T, P>(path: P) -> Result<T, SubkeepError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SubkeepError::Storage(format!("File not found: {}", path.display()))
        } else {
            SubkeepError::Storage(format!("Failed to open {}: {}", path.display(), e))
        }
    })?;

    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| SubkeepError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Serialize `data` as pretty JSON and atomically replace `path`
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), SubkeepError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            SubkeepError::Storage(format!("Failed to create {}: {}", parent.display(), e))
        })?;
    }

    let temp_path = path.with_extension("json.tmp");
    let write_temp = || -> Result<(), SubkeepError> {
        let file = File::create(&temp_path)
            .map_err(|e| SubkeepError::Storage(format!("Failed to create temp file: {}", e)))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, data)
            .map_err(|e| SubkeepError::Storage(format!("Failed to serialize data: {}", e)))?;
        writer
            .flush()
            .map_err(|e| SubkeepError::Storage(format!("Failed to flush data: {}", e)))?;
        writer
            .get_ref()
            .sync_all()
            .map_err(|e| SubkeepError::Storage(format!("Failed to sync data: {}", e)))
    };

    if let Err(e) = write_temp() {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        SubkeepError::Storage(format!("Failed to replace {}: {}", path.display(), e))
    })
}
