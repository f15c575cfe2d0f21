use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use encoding_rs::{Encoding, KOI8_R, UTF_8, WINDOWS_1251};

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Character encoding of request values and replies (`charset`).
pub enum Charset {
    #[default]
    Utf8,
    Windows1251,
    Koi8R,
}

impl Charset {
    /// Query field name used by SMSC.RU (`charset`).
    pub const FIELD: &'static str = "charset";

    /// Name sent to the gateway.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Windows1251 => "windows-1251",
            Self::Koi8R => "koi8-r",
        }
    }

    fn encoding(self) -> &'static Encoding {
        match self {
            Self::Utf8 => UTF_8,
            Self::Windows1251 => WINDOWS_1251,
            Self::Koi8R => KOI8_R,
        }
    }

    /// Encode text into this charset.
    ///
    /// Characters the charset cannot represent become HTML numeric character references.
    pub fn encode(self, text: &str) -> Cow<'_, [u8]> {
        let (bytes, _, _) = self.encoding().encode(text);
        bytes
    }

    /// Decode a reply body, returning `None` if it is not valid in this charset.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        self.encoding()
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(Cow::into_owned)
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Charset {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Self::Utf8),
            "windows-1251" | "cp1251" => Ok(Self::Windows1251),
            "koi8-r" | "koi8r" => Ok(Self::Koi8R),
            other => Err(ValidationError::UnknownCharset {
                name: other.to_owned(),
            }),
        }
    }
}
