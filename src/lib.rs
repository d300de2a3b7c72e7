//! csv2xspf - Convert CSV playlist exports into XSPF playlists
//!
//! The [`xspf`] module holds the playlist model and its XML serialization;
//! [`convert`] reads CSV exports into it and writes the result.

pub mod cli;
pub mod convert;
pub mod xspf;
