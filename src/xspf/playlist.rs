//! XSPF playlist model and document serialization

use std::borrow::Cow;

use chrono::{DateTime, FixedOffset};
use quick_xml::events::{BytesStart, Event};
use serde::{Deserialize, Deserializer};
use tracing::debug;

use super::error::{Result, XspfError};
use super::track::{Track, empty_as_none, non_empty};
use super::writer::{self, Fields, OutputEncoding, XSPF_NS, XSPF_VERSION, XspfElement};

/// Anything that can be added to a playlist as tracks
#[derive(Debug, Clone)]
pub enum TrackInput {
    /// An already built track
    Track(Track),
    /// `(field name, value)` pairs describing one track
    Fields(Vec<(String, String)>),
    /// Several inputs, added in order
    Many(Vec<TrackInput>),
}

impl From<Track> for TrackInput {
    fn from(track: Track) -> Self {
        Self::Track(track)
    }
}

impl From<Vec<(String, String)>> for TrackInput {
    fn from(fields: Vec<(String, String)>) -> Self {
        Self::Fields(fields)
    }
}

impl From<Vec<(&str, &str)>> for TrackInput {
    fn from(fields: Vec<(&str, &str)>) -> Self {
        Self::Fields(
            fields
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

impl From<Vec<Track>> for TrackInput {
    fn from(tracks: Vec<Track>) -> Self {
        Self::Many(tracks.into_iter().map(Self::Track).collect())
    }
}

/// An XSPF playlist: optional metadata plus tracks in playback order
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Playlist {
    #[serde(deserialize_with = "empty_as_none")]
    pub title: Option<String>,
    /// Entity that authored the playlist
    #[serde(deserialize_with = "empty_as_none")]
    pub creator: Option<String>,
    /// Human-readable comment, plain text only
    #[serde(deserialize_with = "empty_as_none")]
    pub annotation: Option<String>,
    /// URI of a page with more about this playlist
    #[serde(deserialize_with = "empty_as_none")]
    pub info: Option<String>,
    /// Source URI of this playlist
    #[serde(deserialize_with = "empty_as_none")]
    pub location: Option<String>,
    /// Canonical, location-independent ID
    #[serde(deserialize_with = "empty_as_none")]
    pub identifier: Option<String>,
    /// URI of an image shown when tracks have none
    #[serde(deserialize_with = "empty_as_none")]
    pub image: Option<String>,
    /// Creation date, not last-modified date
    #[serde(deserialize_with = "date_or_none")]
    pub date: Option<DateTime<FixedOffset>>,
    /// URI of the license the playlist is released under
    #[serde(deserialize_with = "empty_as_none")]
    pub license: Option<String>,
    #[serde(rename = "track")]
    tracks: Vec<Track>,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = non_empty(title.into());
        self
    }

    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = non_empty(creator.into());
        self
    }

    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = non_empty(annotation.into());
        self
    }

    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = non_empty(info.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = non_empty(location.into());
        self
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = non_empty(identifier.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = non_empty(image.into());
        self
    }

    pub fn with_date(mut self, date: DateTime<FixedOffset>) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_license(mut self, license: impl Into<String>) -> Self {
        self.license = non_empty(license.into());
        self
    }

    /// Build a playlist from `(field name, value)` pairs, applied in order
    pub fn from_fields<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut playlist = Self::new();
        for (name, value) in pairs {
            playlist.set(name.as_ref(), value.as_ref())?;
        }
        Ok(playlist)
    }

    /// Parse a JSON playlist document
    ///
    /// The playlist object may be the document itself or nested under a
    /// top-level `"playlist"` key. Tracks listed under `"track"` are kept in
    /// document order. Empty strings are read as unset, and a `"version"`
    /// key is checked like [`Playlist::set`] checks it.
    pub fn from_json(text: &str) -> Result<Self> {
        let mut value = match serde_json::from_str::<serde_json::Value>(text)? {
            serde_json::Value::Object(mut map) if map.contains_key("playlist") => {
                map.remove("playlist").unwrap_or_default()
            }
            other => other,
        };
        let version = match &mut value {
            serde_json::Value::Object(map) => map.remove("version"),
            _ => None,
        };

        let mut playlist: Self = serde_json::from_value(value)?;
        if let Some(version) = version {
            let version = match version {
                serde_json::Value::String(text) => text,
                other => other.to_string(),
            };
            playlist.set("version", &version)?;
        }
        debug!("Loaded playlist document with {} tracks", playlist.tracks.len());
        Ok(playlist)
    }

    /// Assign a field by its XSPF element name
    ///
    /// `version` is accepted only with the value this crate writes.
    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        let text = non_empty(value.to_string());
        match name {
            "title" => self.title = text,
            "creator" => self.creator = text,
            "annotation" => self.annotation = text,
            "info" => self.info = text,
            "location" => self.location = text,
            "identifier" => self.identifier = text,
            "image" => self.image = text,
            "license" => self.license = text,
            "date" => {
                self.date = text
                    .map(|v| {
                        DateTime::parse_from_rfc3339(&v).map_err(|e| XspfError::InvalidValue {
                            field: "date",
                            value: v.clone(),
                            reason: e.to_string(),
                        })
                    })
                    .transpose()?
            }
            "version" if value == XSPF_VERSION => {}
            "version" => {
                return Err(XspfError::InvalidValue {
                    field: "version",
                    value: value.to_string(),
                    reason: format!("only version {} is supported", XSPF_VERSION),
                });
            }
            _ => {
                return Err(XspfError::UnknownField {
                    entity: "playlist",
                    name: name.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Add one track, a field mapping, or a sequence of either
    ///
    /// An empty field mapping adds nothing. Returns how many tracks were added.
    pub fn add_track(&mut self, track: impl Into<TrackInput>) -> Result<usize> {
        match track.into() {
            TrackInput::Track(track) => {
                self.tracks.push(track);
                Ok(1)
            }
            TrackInput::Fields(fields) if fields.is_empty() => Ok(0),
            TrackInput::Fields(fields) => {
                self.tracks.push(Track::from_fields(fields)?);
                Ok(1)
            }
            TrackInput::Many(inputs) => self.add_tracks(inputs),
        }
    }

    /// Add each input in order, as repeated [`Playlist::add_track`] calls would
    pub fn add_tracks<I>(&mut self, tracks: I) -> Result<usize>
    where
        I: IntoIterator,
        I::Item: Into<TrackInput>,
    {
        let mut added = 0;
        for track in tracks {
            added += self.add_track(track)?;
        }
        Ok(added)
    }

    /// Serialize to a complete XSPF document in the given encoding
    pub fn serialize(&self, encoding: OutputEncoding) -> Result<Vec<u8>> {
        let mut writer = writer::start_document(encoding)?;

        writer.write_event(Event::Start(
            BytesStart::new(Self::ELEMENT)
                .with_attributes([("xmlns", XSPF_NS), ("version", XSPF_VERSION)]),
        ))?;
        writer::write_fields(&mut writer, self)?;

        if !self.tracks.is_empty() {
            writer::open(&mut writer, "trackList")?;
            let mut parent = &mut writer;
            for track in &self.tracks {
                parent = track.serialize_into(parent)?;
            }
            writer::close(parent, "trackList")?;
        }

        writer::close(&mut writer, Self::ELEMENT)?;
        Ok(writer::finish_document(writer, encoding))
    }

    /// Serialize as a UTF-8 string
    pub fn to_xml(&self) -> Result<String> {
        let bytes = self.serialize(OutputEncoding::Utf8)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Deserialize an optional RFC 3339 date, reading `""` as unset
fn date_or_none<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: Deserializer<'de>,
{
    empty_as_none(deserializer)?
        .map(|v| DateTime::parse_from_rfc3339(&v).map_err(<D::Error as serde::de::Error>::custom))
        .transpose()
}

impl XspfElement for Playlist {
    const ELEMENT: &'static str = "playlist";

    fn fields(&self) -> Fields<'_> {
        vec![
            ("title", self.title.as_deref().map(Cow::Borrowed)),
            ("info", self.info.as_deref().map(Cow::Borrowed)),
            ("creator", self.creator.as_deref().map(Cow::Borrowed)),
            ("annotation", self.annotation.as_deref().map(Cow::Borrowed)),
            ("location", self.location.as_deref().map(Cow::Borrowed)),
            ("identifier", self.identifier.as_deref().map(Cow::Borrowed)),
            ("image", self.image.as_deref().map(Cow::Borrowed)),
            ("date", self.date.map(|d| Cow::Owned(d.to_rfc3339()))),
            ("license", self.license.as_deref().map(Cow::Borrowed)),
        ]
    }
}
