//! Length-capped text.

use std::{convert::Infallible, fmt, str::FromStr};

/// Size of the line and KML metadata buffers, terminator slot
/// included.
pub const BUFF_SIZE: usize = 256;

/// Most characters a [`BoundedText`] will hold.
pub const MAX_TEXT_LEN: usize = BUFF_SIZE - 1;

/// Text holding at most [`MAX_TEXT_LEN`] characters.
///
/// Longer input is truncated on a character boundary, never
/// rejected.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BoundedText(String);

impl BoundedText {
    pub fn truncated(s: &str) -> Self {
        let end = s
            .char_indices()
            .nth(MAX_TEXT_LEN)
            .map_or(s.len(), |(idx, _)| idx);
        Self(s[..end].to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for BoundedText {
    type Err = Infallible;
    fn from_str(s: &str) -> Result<Self, Infallible> {
        Ok(Self::truncated(s))
    }
}

impl AsRef<str> for BoundedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BoundedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
