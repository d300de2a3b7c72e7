//! CSV playlist export reading

use std::io::Read;

use clap::ValueEnum;
use serde::Deserialize;
use tracing::{debug, warn};

use super::error::ConvertError;
use crate::xspf::Track;

/// Columns every row must carry: track name, artist, album
pub const EXPECTED_COLUMNS: usize = 3;

/// What to do with rows that have fewer than [`EXPECTED_COLUMNS`] columns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RowPolicy {
    /// Drop the row with a warning
    #[default]
    Skip,
    /// Treat missing columns as empty
    Pad,
    /// Abort the conversion
    Fail,
}

/// One data row of the export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRow {
    /// Line the row starts on, counting the header as line 1
    pub line: u64,
    pub name: String,
    pub artist: String,
    pub album: String,
}

impl CsvRow {
    /// Map the row onto a track
    ///
    /// Album names in exports are the least reliable column, so they are
    /// left out of the playlist.
    pub fn into_track(self) -> Track {
        debug!(
            "Row {}: '{}' by '{}' (album '{}' dropped)",
            self.line, self.name, self.artist, self.album
        );
        Track::new().with_title(self.name).with_creator(self.artist)
    }
}

/// Rows read from an export
#[derive(Debug, Default)]
pub struct CsvRows {
    pub rows: Vec<CsvRow>,
    /// Short rows dropped under [`RowPolicy::Skip`]
    pub skipped: usize,
}

/// Read every data row, discarding the header row
///
/// Cells must be valid UTF-8. The default comma-separated dialect is used.
pub fn read_rows<R: Read>(source: R, policy: RowPolicy) -> Result<CsvRows, ConvertError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);

    let mut out = CsvRows::default();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        if record.len() < EXPECTED_COLUMNS {
            match policy {
                RowPolicy::Skip => {
                    warn!(
                        "Skipping line {}: {} of {} columns",
                        line,
                        record.len(),
                        EXPECTED_COLUMNS
                    );
                    out.skipped += 1;
                    continue;
                }
                RowPolicy::Pad => {
                    debug!("Padding line {} with empty columns", line);
                }
                RowPolicy::Fail => {
                    return Err(ConvertError::MalformedRow {
                        line,
                        columns: record.len(),
                        expected: EXPECTED_COLUMNS,
                    });
                }
            }
        }

        let cell = |i: usize| record.get(i).unwrap_or_default().to_string();
        out.rows.push(CsvRow {
            line,
            name: cell(0),
            artist: cell(1),
            album: cell(2),
        });
    }

    debug!("Read {} rows, skipped {}", out.rows.len(), out.skipped);
    Ok(out)
}
