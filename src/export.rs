//! CSV export of scraped conference records.

use std::fs::File;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::error::ScrapeError;
use crate::models::ConferenceRecord;

/// File name for an export: `conferences_{category}_{place}_{timestamp}.csv`,
/// with a millisecond UTC timestamp
pub fn csv_file_name(category: &str, place: &str) -> String {
    format!(
        "conferences_{}_{}_{}.csv",
        category,
        place,
        Utc::now().format("%Y%m%d_%H%M%S_%3f")
    )
}

/// Create `dir/name`, or `dir/{stem}_{n}.csv` if that file already exists.
/// Existing exports are never overwritten.
fn create_unique(dir: &Path, name: &str) -> Result<(PathBuf, File), ScrapeError> {
    let stem = name.trim_end_matches(".csv");
    for attempt in 0..100u32 {
        let path = if attempt == 0 {
            dir.join(name)
        } else {
            dir.join(format!("{}_{}.csv", stem, attempt))
        };
        match File::options().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Err(ScrapeError::Export(format!("No free file name for {}", name)))
}

/// Serialize records as CSV (header row first) into any writer
pub fn write_records<W: Write>(writer: W, records: &[ConferenceRecord]) -> Result<(), ScrapeError> {
    let mut writer = csv::Writer::from_writer(writer);
    if records.is_empty() {
        writer.write_record(["date", "title", "venue", "link", "category", "location"])?;
    }
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write records to a new CSV file in `dir`, creating the directory if needed.
///
/// Returns the path of the written file.
pub fn write_csv(
    records: &[ConferenceRecord],
    dir: &Path,
    category: &str,
    place: &str,
) -> Result<PathBuf, ScrapeError> {
    std::fs::create_dir_all(dir)?;
    let (path, file) = create_unique(dir, &csv_file_name(category, place))?;
    write_records(file, records)?;

    tracing::info!("Exported {} conferences to {}", records.len(), path.display());
    Ok(path)
}
