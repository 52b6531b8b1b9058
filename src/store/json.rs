//! JSON file persistence shared by the stores.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{EngineError, EngineResult};

/// Reads a JSON document from `path`.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> EngineResult<T> {
    let file = File::open(path).map_err(|e| data_access(path, e))?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| data_access(path, e))
}

/// Writes `value` as pretty-printed JSON to `path`, creating parent directories.
pub(crate) fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> EngineResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| data_access(parent, e))?;
        }
    }

    let file = File::create(path).map_err(|e| data_access(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).map_err(|e| data_access(path, e))?;
    writer.flush().map_err(|e| data_access(path, e))
}

pub(crate) fn data_access(path: &Path, error: impl std::fmt::Display) -> EngineError {
    EngineError::DataAccess {
        path: path.display().to_string(),
        message: error.to_string(),
    }
}
