//! CLI command handlers

use anyhow::Result;
use chrono::Utc;
use clap::CommandFactory;
use colored::Colorize;
use tracing::debug;

use super::Cli;
use crate::convert::{self, ConvertError, ConvertOptions, ConverterConfig};

/// Merge command-line flags over the config file defaults
pub fn options(cli: Cli, config: ConverterConfig) -> ConvertOptions {
    let date = (cli.stamp_date || config.stamp_date).then(|| Utc::now().fixed_offset());

    ConvertOptions {
        metadata: cli.metadata,
        title: cli.title.or(config.title),
        creator: cli.creator.or(config.creator),
        annotation: cli.annotation,
        info: cli.info,
        date,
        short_rows: cli.short_rows.unwrap_or(config.short_rows),
        encoding: cli.encoding.unwrap_or(config.encoding),
        ..ConvertOptions::new(cli.input, cli.output)
    }
}

/// Handle a conversion run
pub fn convert(cli: Cli) -> Result<()> {
    let config = ConverterConfig::load(cli.config.as_deref())?;
    let options = options(cli, config);

    match convert::convert(&options) {
        Ok(summary) => {
            println!(
                "{} {}",
                "xspf saved at:".green().bold(),
                summary.output.display()
            );
            println!(
                "  Tracks: {} ({} from csv)",
                summary.tracks_written, summary.rows_converted
            );
            println!("  Size: {} bytes", summary.bytes_written);
            if summary.rows_skipped > 0 {
                println!(
                    "  {}",
                    format!("Skipped {} incomplete row(s)", summary.rows_skipped).yellow()
                );
            }
            Ok(())
        }
        Err(ConvertError::MissingInput(path)) => {
            eprintln!("{}", Cli::command().render_usage());
            eprintln!("{}", "csv location doesn't exist".red());
            anyhow::bail!("{} not found", path.display());
        }
        Err(ConvertError::Write { path, source }) => {
            debug!("Writing {} failed: {}", path.display(), source);
            eprintln!("{}", "unable to save xspf".red());
            anyhow::bail!("unable to save xspf");
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::RowPolicy;
    use crate::xspf::OutputEncoding;
    use clap::Parser;
    use std::ffi::OsString;

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "csv2xspf",
            "in.csv",
            "out.xspf",
            "--title",
            "From Flag",
            "--short-rows",
            "fail",
        ]);
        let config = ConverterConfig {
            title: Some("From Config".to_string()),
            creator: Some("Config Creator".to_string()),
            short_rows: RowPolicy::Pad,
            encoding: OutputEncoding::Ascii,
            stamp_date: false,
        };

        let options = options(cli, config);
        assert_eq!(options.title.as_deref(), Some("From Flag"));
        assert_eq!(options.creator.as_deref(), Some("Config Creator"));
        assert_eq!(options.short_rows, RowPolicy::Fail);
        assert_eq!(options.encoding, OutputEncoding::Ascii);
        assert!(options.date.is_none());
    }

    #[test]
    fn test_stamp_date_from_config() {
        let cli = Cli::parse_from(["csv2xspf", "in.csv", "out.xspf"]);
        let config = ConverterConfig {
            stamp_date: true,
            ..ConverterConfig::default()
        };

        assert!(options(cli, config).date.is_some());
    }

    #[test]
    fn test_missing_input_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.json");
        std::fs::write(&config, "{}").unwrap();
        let output = dir.path().join("out.xspf");

        let cli = Cli::parse_from([
            OsString::from("csv2xspf"),
            dir.path().join("missing.csv").into_os_string(),
            output.clone().into_os_string(),
            OsString::from("--config"),
            config.into_os_string(),
        ]);

        assert!(convert(cli).is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_convert_writes_playlist() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.json");
        std::fs::write(&config, r#"{"creator": "Exporter"}"#).unwrap();
        let input = dir.path().join("in.csv");
        std::fs::write(&input, "Name,Artist,Album\nSong A,Artist A,Album A\n").unwrap();
        let output = dir.path().join("out.xspf");

        let cli = Cli::parse_from([
            OsString::from("csv2xspf"),
            input.into_os_string(),
            output.clone().into_os_string(),
            OsString::from("--config"),
            config.into_os_string(),
        ]);

        convert(cli).unwrap();
        let xml = std::fs::read_to_string(&output).unwrap();
        assert!(xml.contains("<creator>Exporter</creator>"));
        assert!(xml.contains("<title>Song A</title>"));
    }
}
