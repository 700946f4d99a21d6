// src/json_output.rs

use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::types::LogRecord;

/// Default output path: the log directory's name with a `.json` extension,
/// placed next to the directory.
pub fn default_output_path(log_dir: &Path) -> Result<PathBuf, Box<dyn Error>> {
    if log_dir.file_name().is_none() {
        return Err(format!(
            "cannot derive an output name from '{}'; use --output",
            log_dir.display()
        )
        .into());
    }
    Ok(log_dir.with_extension("json"))
}

/// Writes the records as a pretty-printed (2-space indented) JSON array.
pub fn write_records(path: &Path, records: &[LogRecord]) -> Result<(), Box<dyn Error>> {
    let file = File::create(path)
        .map_err(|e| format!("could not create '{}': {}", path.display(), e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
