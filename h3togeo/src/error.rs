use thiserror::Error;

/// Why a line of text (or a raw `--index` value) is not a cell.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("not a hexadecimal index, {0:?}")]
    NotHex(String),

    #[error("{0}")]
    Invalid(#[from] h3o::error::InvalidCellIndex),
}

#[derive(Error, Debug)]
pub enum H3ToGeoError {
    #[error("reading H3 index from stdin, {0}")]
    Read(#[source] std::io::Error),

    #[error("{0}")]
    Write(#[from] std::io::Error),

    #[error("{0}")]
    Kml(#[from] kml::Error),

    #[error("writing KML document, {0}")]
    Xml(String),
}
