use std::io::Write;

use serde::{de::DeserializeOwned, Serialize};

/// Writes `value` to `path` as pretty-printed JSON.
///
/// The buffered writer is flushed explicitly so a failed final write is
/// reported instead of being lost on drop.
pub fn save_json<T: Serialize>(value: &T, path: &str) -> std::io::Result<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    writer.flush()
}

/// Reads a value previously written by `save_json`.
pub fn load_json<T: DeserializeOwned>(path: &str) -> std::io::Result<T> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
}
