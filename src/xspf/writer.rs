//! XML emission shared by playlists and tracks
//!
//! Both entities are "an element with an ordered list of optional named
//! scalar fields". Each field becomes a child element in the XSPF namespace
//! whose local name is the field name, written only when the field is set.

use std::borrow::Cow;
use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use serde::Deserialize;

use super::error::Result;

/// XSPF namespace, declared once as the default namespace of the root element
pub const XSPF_NS: &str = "http://xspf.org/ns/0/";

/// The only XSPF version this crate writes
pub const XSPF_VERSION: &str = "1";

/// Ordered `(element name, value)` pairs of an entity
pub type Fields<'a> = Vec<(&'static str, Option<Cow<'a, str>>)>;

/// An XSPF entity that serializes its scalar metadata as child elements
pub trait XspfElement {
    /// Local name of the entity's own element
    const ELEMENT: &'static str;

    /// Field values in emission order, `None` for unset fields
    fn fields(&self) -> Fields<'_>;
}

/// Character encoding named in the XML declaration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
pub enum OutputEncoding {
    #[default]
    #[serde(rename = "utf-8")]
    #[value(name = "utf-8")]
    Utf8,
    /// Non-ASCII text is written as numeric character references
    #[serde(rename = "us-ascii")]
    #[value(name = "us-ascii")]
    Ascii,
}

impl OutputEncoding {
    /// Encoding label as it appears in the XML declaration
    pub fn label(self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Ascii => "US-ASCII",
        }
    }

    fn encode(self, xml: &str) -> Vec<u8> {
        match self {
            Self::Utf8 => xml.as_bytes().to_vec(),
            Self::Ascii => {
                let mut out = String::with_capacity(xml.len());
                for c in xml.chars() {
                    if c.is_ascii() {
                        out.push(c);
                    } else {
                        out.push_str(&format!("&#{};", c as u32));
                    }
                }
                out.into_bytes()
            }
        }
    }
}

/// Create an indenting writer with the XML declaration already emitted
pub fn start_document(encoding: OutputEncoding) -> Result<Writer<Vec<u8>>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new(
        "1.0",
        Some(encoding.label()),
        None,
    )))?;
    Ok(writer)
}

/// Take the finished document out of the writer, encoded as declared
pub fn finish_document(writer: Writer<Vec<u8>>, encoding: OutputEncoding) -> Vec<u8> {
    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    encoding.encode(&String::from_utf8_lossy(&bytes))
}

/// Write every set field of `element` as `<name>value</name>`
///
/// Empty values are treated as unset.
pub fn write_fields<W: Write, E: XspfElement>(
    writer: &mut Writer<W>,
    element: &E,
) -> Result<()> {
    for (name, value) in element.fields() {
        let Some(value) = value.as_deref().filter(|v| !v.is_empty()) else {
            continue;
        };
        writer.write_event(Event::Start(BytesStart::new(name)))?;
        writer.write_event(Event::Text(BytesText::new(value)))?;
        writer.write_event(Event::End(BytesEnd::new(name)))?;
    }
    Ok(())
}

pub(crate) fn open<W: Write>(writer: &mut Writer<W>, name: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    Ok(())
}

pub(crate) fn close<W: Write>(writer: &mut Writer<W>, name: &str) -> Result<()> {
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
