//! XSPF playlist model and XML serialization

pub mod error;
pub mod playlist;
pub mod track;
pub mod writer;

pub use error::XspfError;
pub use playlist::{Playlist, TrackInput};
pub use track::Track;
pub use writer::{OutputEncoding, XSPF_NS, XspfElement};
