use crate::{cell, kml_sink::KmlMetadata, sink::OutputMode, text::BoundedText};
use clap::{error::ErrorKind, ArgAction, Parser};
use std::ffi::OsString;

/// First line of `--help`.
pub const ABOUT: &str = "Converts indexes to latitude/longitude center coordinates in degrees";

/// Command line of the `h3togeo` filter.
///
/// Indexes are read from standard in, one per line, until EOF unless
/// `--index` is given.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "h3togeo",
    version,
    about = ABOUT,
    long_about = None,
    disable_help_flag = true
)]
pub struct Cli {
    #[arg(short, long, action = ArgAction::Help, help = "Show this help message.")]
    help: Option<bool>,

    #[arg(
        short,
        long,
        value_name = "index",
        value_parser = cell::parse_hex,
        help = "Index, or not specified to read indexes from standard in."
    )]
    pub index: Option<u64>,

    #[arg(short, long, help = "Print output in KML format.")]
    pub kml: bool,

    #[arg(
        long = "kml-name",
        visible_alias = "kn",
        value_name = "name",
        help = "Name of the KML file."
    )]
    pub kml_name: Option<BoundedText>,

    #[arg(
        long = "kml-description",
        visible_alias = "kd",
        value_name = "description",
        help = "Description of the KML file."
    )]
    pub kml_description: Option<BoundedText>,
}

/// Result of parsing the command line.
#[derive(Debug)]
pub enum ParseOutcome {
    /// Help or version text was requested; print it and exit 0.
    Help(clap::Error),

    /// Bad usage; print it and exit nonzero.
    Error(clap::Error),

    /// Arguments are valid; run the filter.
    Run(Cli),
}

impl Cli {
    /// Parses `args`, program name included, without exiting the
    /// process.
    pub fn parse_outcome<I, T>(args: I) -> ParseOutcome
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match Self::try_parse_from(args) {
            Ok(cli) => ParseOutcome::Run(cli),
            Err(err) => match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ParseOutcome::Help(err),
                _ => ParseOutcome::Error(err),
            },
        }
    }

    /// KML metadata flags only matter with `--kml`.
    pub fn output_mode(&self) -> OutputMode {
        if self.kml {
            OutputMode::Kml(KmlMetadata::new(
                self.kml_name.clone(),
                self.kml_description.clone(),
            ))
        } else {
            OutputMode::PlainText
        }
    }
}
