//! Conversion orchestration

use chrono::{DateTime, FixedOffset};
use std::fs::{self, File};
use std::path::PathBuf;
use tracing::{debug, info};

use super::error::ConvertError;
use super::reader::{self, CsvRow, RowPolicy};
use crate::xspf::{OutputEncoding, Playlist};

/// Title given to playlists that get none from options or a document
pub const DEFAULT_TITLE: &str = "GrooveShark Playlist";

/// Everything one conversion needs
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// CSV export to read
    pub input: PathBuf,
    /// XSPF document to write
    pub output: PathBuf,
    /// JSON playlist document supplying metadata and leading tracks
    pub metadata: Option<PathBuf>,
    pub title: Option<String>,
    pub creator: Option<String>,
    pub annotation: Option<String>,
    pub info: Option<String>,
    pub date: Option<DateTime<FixedOffset>>,
    pub short_rows: RowPolicy,
    pub encoding: OutputEncoding,
}

impl ConvertOptions {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            metadata: None,
            title: None,
            creator: None,
            annotation: None,
            info: None,
            date: None,
            short_rows: RowPolicy::default(),
            encoding: OutputEncoding::default(),
        }
    }
}

/// Result of a conversion
#[derive(Debug)]
pub struct ConvertSummary {
    pub output: PathBuf,
    /// Tracks in the written playlist, including any from the metadata document
    pub tracks_written: usize,
    /// Tracks that came from CSV rows
    pub rows_converted: usize,
    pub rows_skipped: usize,
    pub bytes_written: usize,
}

/// Convert a CSV export into an XSPF document on disk
///
/// Nothing is written unless the whole playlist was built and serialized.
pub fn convert(options: &ConvertOptions) -> Result<ConvertSummary, ConvertError> {
    if !options.input.exists() {
        return Err(ConvertError::MissingInput(options.input.clone()));
    }

    let mut playlist = base_playlist(options)?;

    let file = File::open(&options.input).map_err(csv::Error::from)?;
    let rows = reader::read_rows(file, options.short_rows)?;
    let rows_skipped = rows.skipped;

    let rows_converted = playlist
        .add_tracks(rows.rows.into_iter().map(CsvRow::into_track))
        .map_err(ConvertError::Playlist)?;

    let xml = playlist
        .serialize(options.encoding)
        .map_err(ConvertError::Playlist)?;

    fs::write(&options.output, &xml).map_err(|source| ConvertError::Write {
        path: options.output.clone(),
        source,
    })?;

    info!(
        "Wrote {} tracks to {}",
        playlist.tracks().len(),
        options.output.display()
    );

    Ok(ConvertSummary {
        output: options.output.clone(),
        tracks_written: playlist.tracks().len(),
        rows_converted,
        rows_skipped,
        bytes_written: xml.len(),
    })
}

/// Playlist metadata before any CSV rows are added
///
/// Options override the metadata document; the title falls back to
/// [`DEFAULT_TITLE`].
fn base_playlist(options: &ConvertOptions) -> Result<Playlist, ConvertError> {
    let mut playlist = match &options.metadata {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|source| ConvertError::MetadataRead {
                path: path.clone(),
                source,
            })?;
            debug!("Using playlist document {}", path.display());
            Playlist::from_json(&text).map_err(ConvertError::Metadata)?
        }
        None => Playlist::new(),
    };

    let overrides = [
        ("title", &options.title),
        ("creator", &options.creator),
        ("annotation", &options.annotation),
        ("info", &options.info),
    ];
    for (name, value) in overrides {
        if let Some(value) = value {
            playlist.set(name, value).map_err(ConvertError::Metadata)?;
        }
    }

    if options.date.is_some() {
        playlist.date = options.date;
    }
    if playlist.title.is_none() {
        playlist.title = Some(DEFAULT_TITLE.to_string());
    }

    Ok(playlist)
}
