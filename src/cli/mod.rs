//! CLI module for csv2xspf

use clap::Parser;
use std::path::PathBuf;

use crate::convert::RowPolicy;
use crate::xspf::OutputEncoding;

pub mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "csv2xspf",
    about = "Convert a CSV playlist export into an XSPF playlist"
)]
#[command(version)]
pub struct Cli {
    /// CSV export with track name, artist and album columns
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Destination of the XSPF playlist
    #[arg(value_name = "XSPF")]
    pub output: PathBuf,

    /// Playlist title [default: GrooveShark Playlist]
    #[arg(long)]
    pub title: Option<String>,

    /// Playlist creator
    #[arg(long)]
    pub creator: Option<String>,

    /// Plain-text comment on the playlist
    #[arg(long)]
    pub annotation: Option<String>,

    /// URI of a page with more about the playlist
    #[arg(long)]
    pub info: Option<String>,

    /// Record the current time as the playlist's creation date
    #[arg(long)]
    pub stamp_date: bool,

    /// JSON playlist document supplying metadata and leading tracks
    #[arg(long, value_name = "JSON")]
    pub metadata: Option<PathBuf>,

    /// What to do with rows missing the artist or album column
    #[arg(long, value_enum)]
    pub short_rows: Option<RowPolicy>,

    /// Encoding of the written document
    #[arg(long, value_enum)]
    pub encoding: Option<OutputEncoding>,

    /// Config file with conversion defaults
    #[arg(short, long, env = "CSV2XSPF_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_two_positionals_required() {
        assert!(Cli::try_parse_from(["csv2xspf", "in.csv"]).is_err());
        assert!(Cli::try_parse_from(["csv2xspf", "in.csv", "out.xspf", "extra"]).is_err());

        let cli = Cli::try_parse_from(["csv2xspf", "in.csv", "out.xspf"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("in.csv"));
        assert_eq!(cli.output, PathBuf::from("out.xspf"));
        assert_eq!(cli.short_rows, None);
        assert!(!cli.stamp_date);
    }

    #[test]
    fn test_value_enums() {
        let cli = Cli::try_parse_from([
            "csv2xspf",
            "in.csv",
            "out.xspf",
            "--short-rows",
            "pad",
            "--encoding",
            "us-ascii",
        ])
        .unwrap();
        assert_eq!(cli.short_rows, Some(RowPolicy::Pad));
        assert_eq!(cli.encoding, Some(OutputEncoding::Ascii));
    }
}
