//! Text representation of volume values, for host parameter displays and typed-in values.
//!
//! Values display as decibels with one decimal (`-6.0dB`), or `OFF` at or below the off threshold. Parsing accepts
//! the same forms, case-insensitively, with or without the `dB` suffix.
use crate::volume::VolumeRange;
use std::fmt;
use thiserror::Error;

/// Text length limit to use when the host doesn't provide one.
pub const DEFAULT_MAX_TEXT_LEN: usize = 16;

const OFF_TEXT: &str = "OFF";
const DB_SUFFIX: &str = "dB";

/// Reasons a volume text can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseVolumeError {
    /// Nothing to parse.
    #[error("Empty volume text")]
    Empty,
    /// The text is not a number.
    #[error("Cannot parse {0:?} as a volume")]
    Malformed(String),
    /// The text is a number, but too large or too small to be represented.
    #[error("Volume {0:?} is out of the representable range")]
    OutOfRange(String),
}

impl VolumeRange {
    /// Write the text representation of a normalized value, without any length limit.
    pub fn format_into(&self, f: &mut dyn fmt::Write, normalized: f64) -> fmt::Result {
        let db = self.denormalize_db(normalized);
        if self.is_off(db) {
            return f.write_str(OFF_TEXT);
        }
        // Avoid printing "-0.0dB"
        let db = if (db * 10.0).round() == 0.0 { 0.0 } else { db };
        write!(f, "{db:.1}{DB_SUFFIX}")
    }

    /// Text representation of a normalized value, truncated to at most `max_len` characters.
    pub fn format(&self, normalized: f64, max_len: usize) -> String {
        let mut text = String::new();
        let _ = self.format_into(&mut text, normalized);
        constrain_len(&mut text, max_len);
        text
    }

    /// Parse a volume text into a normalized value.
    ///
    /// `OFF` gives `0.0`. Numbers are read as decibels, with an optional `dB` suffix, and normalized without clamping.
    pub fn try_parse(&self, text: &str) -> Result<f64, ParseVolumeError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ParseVolumeError::Empty);
        }
        if text.eq_ignore_ascii_case(OFF_TEXT) {
            return Ok(0.0);
        }

        let number = strip_suffix_ignore_ascii_case(text, DB_SUFFIX).map_or(text, str::trim_end);
        let db: f64 = number
            .parse()
            .map_err(|_| ParseVolumeError::Malformed(text.to_owned()))?;
        if db.is_nan() {
            return Err(ParseVolumeError::Malformed(text.to_owned()));
        }
        if db.is_infinite() || (db_underflowed(db) && has_nonzero_mantissa(number)) {
            return Err(ParseVolumeError::OutOfRange(text.to_owned()));
        }
        Ok(self.normalize_db(db))
    }

    /// Parse a volume text into a normalized value, or `None` if the text is not a volume.
    pub fn parse(&self, text: &str) -> Option<f64> {
        match self.try_parse(text) {
            Ok(value) => Some(value),
            Err(err) => {
                log::debug!("Rejected volume text: {err}");
                None
            }
        }
    }
}

/// Text representation of a normalized value in the default volume range, truncated to at most `max_len`
/// characters.
///
/// # Example
///
/// ```
/// use gainmap_params::text::format;
/// use gainmap_params::volume::normalize_db;
///
/// assert_eq!("-6.0dB", format(normalize_db(-6.0), 16));
/// assert_eq!("OFF", format(0.0, 16));
/// assert_eq!("-6.", format(normalize_db(-6.0), 3));
/// ```
pub fn format(normalized: f64, max_len: usize) -> String {
    VolumeRange::DEFAULT.format(normalized, max_len)
}

/// Parse a volume text into a normalized value in the default volume range.
///
/// # Example
///
/// ```
/// use gainmap_params::text::parse;
///
/// assert_eq!(Some(0.5), parse("0dB"));
/// assert_eq!(Some(0.0), parse("off"));
/// assert_eq!(None, parse("loud"));
/// ```
pub fn parse(text: &str) -> Option<f64> {
    VolumeRange::DEFAULT.parse(text)
}

/// Parse a volume text into a normalized value in the default volume range, reporting why it was rejected.
pub fn try_parse(text: &str) -> Result<f64, ParseVolumeError> {
    VolumeRange::DEFAULT.try_parse(text)
}

fn constrain_len(text: &mut String, max_len: usize) {
    if let Some((idx, _)) = text.char_indices().nth(max_len) {
        text.truncate(idx);
    }
}

fn db_underflowed(db: f64) -> bool {
    db == 0.0 || db.is_subnormal()
}

fn has_nonzero_mantissa(number: &str) -> bool {
    number
        .split(['e', 'E'])
        .next()
        .is_some_and(|mantissa| mantissa.bytes().any(|b| matches!(b, b'1'..=b'9')))
}

fn strip_suffix_ignore_ascii_case<'a>(text: &'a str, suffix: &str) -> Option<&'a str> {
    let split = text.len().checked_sub(suffix.len())?;
    if !text.is_char_boundary(split) {
        return None;
    }
    let (head, tail) = text.split_at(split);
    tail.eq_ignore_ascii_case(suffix).then_some(head)
}
