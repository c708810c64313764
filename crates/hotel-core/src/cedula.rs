use crate::error::{HotelError, Result};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

static CEDULA_RE: OnceLock<Regex> = OnceLock::new();

// `\d` would also accept non-ASCII decimal digits.
fn cedula_re() -> &'static Regex {
    CEDULA_RE.get_or_init(|| Regex::new(r"^[0-9]{10}$").unwrap())
}

/// A national identity number: exactly ten ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Cedula(String);

impl Cedula {
    /// Validate a raw identifier. No trimming happens here; callers that
    /// accept free-form input trim first.
    pub fn parse(raw: &str) -> Result<Self> {
        if cedula_re().is_match(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(HotelError::InvalidIdentifier(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Cedula {
    type Err = HotelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Cedula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Cedula {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_cedulas() {
        for raw in ["1234567890", "0000000000", "0102030405"] {
            let c = Cedula::parse(raw).unwrap_or_else(|_| panic!("expected valid: {raw}"));
            assert_eq!(c.as_str(), raw);
        }
    }

    #[test]
    fn invalid_cedulas() {
        for raw in [
            "",
            "12345",
            "12345678901",
            "12345abcde",
            " 1234567890",
            "1234567890 ",
            "12345-67890",
            // Arabic-Indic digits are decimal digits but not ASCII
            "١٢٣٤٥٦٧٨٩٠",
        ] {
            match Cedula::parse(raw) {
                Err(HotelError::InvalidIdentifier(got)) => assert_eq!(got, raw),
                other => panic!("expected InvalidIdentifier for {raw:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn from_str_matches_parse() {
        let c: Cedula = "1234567890".parse().unwrap();
        assert_eq!(c.to_string(), "1234567890");
    }
}
