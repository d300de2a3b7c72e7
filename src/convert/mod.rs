//! CSV to XSPF conversion

pub mod config;
pub mod engine;
pub mod error;
pub mod reader;

pub use config::ConverterConfig;
pub use engine::{ConvertOptions, ConvertSummary, convert};
pub use error::ConvertError;
pub use reader::RowPolicy;
