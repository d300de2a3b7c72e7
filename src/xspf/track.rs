//! XSPF track model

use std::borrow::Cow;
use std::io::Write;
use std::num::NonZeroU32;

use quick_xml::Writer;
use serde::{Deserialize, Deserializer};

use super::error::{Result, XspfError};
use super::writer::{self, Fields, XspfElement};

/// One playable entry of a playlist
///
/// Every field is optional. Setting a field to an empty string leaves it unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Track {
    /// URI of the resource to be rendered
    #[serde(deserialize_with = "empty_as_none")]
    pub location: Option<String>,
    /// Location-independent identifier, such as a MusicBrainz URI
    #[serde(deserialize_with = "empty_as_none")]
    pub identifier: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    pub title: Option<String>,
    /// Entity that authored the track
    #[serde(deserialize_with = "empty_as_none")]
    pub creator: Option<String>,
    /// Human-readable comment, plain text only
    #[serde(deserialize_with = "empty_as_none")]
    pub annotation: Option<String>,
    /// URI where more about the track can be found
    #[serde(deserialize_with = "empty_as_none")]
    pub info: Option<String>,
    /// URI of an image to show while the track plays
    #[serde(deserialize_with = "empty_as_none")]
    pub image: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    pub album: Option<String>,
    /// Ordinal position of the track on its album
    #[serde(rename = "trackNum")]
    pub track_num: Option<NonZeroU32>,
    /// Rendering time in milliseconds
    pub duration: Option<u64>,
}

impl Track {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a track from `(field name, value)` pairs, applied in order
    ///
    /// Later pairs override earlier ones, so explicit assignments can be
    /// chained after a base mapping. Unknown names are rejected.
    pub fn from_fields<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut track = Self::new();
        for (name, value) in pairs {
            track.set(name.as_ref(), value.as_ref())?;
        }
        Ok(track)
    }

    /// Assign a field by its XSPF element name
    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        let text = non_empty(value.to_string());
        match name {
            "location" => self.location = text,
            "identifier" => self.identifier = text,
            "title" => self.title = text,
            "creator" => self.creator = text,
            "annotation" => self.annotation = text,
            "info" => self.info = text,
            "image" => self.image = text,
            "album" => self.album = text,
            "trackNum" => {
                self.track_num = text
                    .map(|v| {
                        v.parse::<NonZeroU32>().map_err(|e| XspfError::InvalidValue {
                            field: "trackNum",
                            value: v.clone(),
                            reason: e.to_string(),
                        })
                    })
                    .transpose()?
            }
            "duration" => {
                self.duration = text
                    .map(|v| {
                        v.parse::<u64>().map_err(|e| XspfError::InvalidValue {
                            field: "duration",
                            value: v.clone(),
                            reason: e.to_string(),
                        })
                    })
                    .transpose()?
            }
            _ => {
                return Err(XspfError::UnknownField {
                    entity: "track",
                    name: name.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = non_empty(title.into());
        self
    }

    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = non_empty(creator.into());
        self
    }

    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = non_empty(album.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = non_empty(location.into());
        self
    }

    pub fn with_track_num(mut self, track_num: NonZeroU32) -> Self {
        self.track_num = Some(track_num);
        self
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration = Some(duration_ms);
        self
    }

    /// Append a `<track>` element to the open parent element
    ///
    /// Returns the same writer so several tracks chain into one `trackList`.
    pub fn serialize_into<'w, W: Write>(
        &self,
        writer: &'w mut Writer<W>,
    ) -> Result<&'w mut Writer<W>> {
        writer::open(writer, Self::ELEMENT)?;
        writer::write_fields(writer, self)?;
        writer::close(writer, Self::ELEMENT)?;
        Ok(writer)
    }
}

impl XspfElement for Track {
    const ELEMENT: &'static str = "track";

    fn fields(&self) -> Fields<'_> {
        vec![
            ("location", self.location.as_deref().map(Cow::Borrowed)),
            ("identifier", self.identifier.as_deref().map(Cow::Borrowed)),
            ("title", self.title.as_deref().map(Cow::Borrowed)),
            ("creator", self.creator.as_deref().map(Cow::Borrowed)),
            ("annotation", self.annotation.as_deref().map(Cow::Borrowed)),
            ("info", self.info.as_deref().map(Cow::Borrowed)),
            ("image", self.image.as_deref().map(Cow::Borrowed)),
            ("album", self.album.as_deref().map(Cow::Borrowed)),
            ("trackNum", self.track_num.map(|n| Cow::Owned(n.to_string()))),
            ("duration", self.duration.map(|d| Cow::Owned(d.to_string()))),
        ]
    }
}

pub(crate) fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

/// Deserialize an optional string, reading `""` as unset
pub(crate) fn empty_as_none<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.and_then(non_empty))
}
