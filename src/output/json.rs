//! JSON artifact of matched apps
//!
//! The artifact is a single pretty-printed JSON array of records. Non-ASCII
//! text is written as UTF-8, not escaped.

use crate::record::AppRecord;
use crate::OutputError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes the records to `output_path` as an indented JSON array
///
/// The file is created (or truncated) in place; a failure part-way through
/// can leave a truncated file behind.
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the artifact
/// * `Err(OutputError)` - Failed to create, serialize, or flush the file
pub fn write_records(output_path: &Path, records: &[AppRecord]) -> Result<(), OutputError> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    Ok(())
}

/// Reads an artifact written by [`write_records`]
pub fn read_records(path: &Path) -> Result<Vec<AppRecord>, OutputError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
