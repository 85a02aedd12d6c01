//! Text command parsing.
//!
//! The only recognized command is `RGB:<r>,<g>,<b>[,<brightness>]` where each
//! field is a decimal integer in `0..=255`. Anything else is a generic frame:
//! not an error, just not a color.

use crate::frame::Frame;
use palette::Srgb;

/// Prefix identifying a color command.
pub const COLOR_PREFIX: &str = "RGB:";

/// Brightness reported when a command omits the fourth field.
pub const FULL_BRIGHTNESS: u8 = 255;

/// Reasons a frame was not accepted as a color command.
///
/// The control loop treats every kind the same way: the command is dropped
/// and nothing else changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// The frame does not start with `RGB:`.
    NotColorCommand,
    /// Nothing after the prefix, or fewer than three fields.
    MissingFields,
    /// A field is empty, not decimal, or greater than 255.
    InvalidValue,
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParseError::NotColorCommand => write!(f, "not a color command"),
            ParseError::MissingFields => {
                write!(f, "malformed command: expected RGB:<r>,<g>,<b>[,<brightness>]")
            }
            ParseError::InvalidValue => {
                write!(f, "malformed command: values must be decimal integers in 0..=255")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}

/// A parsed `RGB:` command.
///
/// `brightness` is carried for protocol compatibility only. Output brightness
/// is fixed by [`Config`](crate::Config) and this value never changes it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorCommand {
    pub color: Srgb<u8>,
    pub brightness: u8,
}

impl ColorCommand {
    /// Creates a command.
    pub const fn new(red: u8, green: u8, blue: u8, brightness: u8) -> Self {
        Self {
            color: Srgb::new(red, green, blue),
            brightness,
        }
    }

    /// Parses `RGB:<r>,<g>,<b>` or `RGB:<r>,<g>,<b>,<brightness>`.
    ///
    /// The prefix is case-sensitive. Fields must be plain ASCII digits; signs,
    /// whitespace and values above 255 are rejected rather than wrapped.
    pub fn parse(frame: &str) -> Result<Self, ParseError> {
        let body = frame
            .strip_prefix(COLOR_PREFIX)
            .ok_or(ParseError::NotColorCommand)?;

        if body.is_empty() {
            return Err(ParseError::MissingFields);
        }

        // At most three splits: everything after a third comma is brightness.
        let mut fields = body.splitn(4, ',');
        let (Some(red), Some(green), Some(blue)) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(ParseError::MissingFields);
        };

        let brightness = match fields.next() {
            Some(field) => parse_channel(field)?,
            None => FULL_BRIGHTNESS,
        };

        Ok(Self::new(
            parse_channel(red)?,
            parse_channel(green)?,
            parse_channel(blue)?,
            brightness,
        ))
    }

    /// Returns the `(r, g, b, brightness)` tuple.
    pub fn into_components(self) -> (u8, u8, u8, u8) {
        (self.color.red, self.color.green, self.color.blue, self.brightness)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ColorCommand {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "ColorCommand {{ rgb: ({}, {}, {}), brightness: {} }}",
            self.color.red,
            self.color.green,
            self.color.blue,
            self.brightness
        )
    }
}

/// Parses a frame as a color command.
///
/// Shorthand for [`ColorCommand::parse`].
pub fn parse(frame: &str) -> Result<ColorCommand, ParseError> {
    ColorCommand::parse(frame)
}

fn parse_channel(field: &str) -> Result<u8, ParseError> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidValue);
    }
    field.parse::<u8>().map_err(|_| ParseError::InvalidValue)
}

/// A classified input frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command<'a> {
    /// A valid `RGB:` command.
    Color(ColorCommand),
    /// Any frame without the `RGB:` prefix, for echo or logging.
    Generic(&'a [u8]),
}

impl<'a> Command<'a> {
    /// Classifies raw frame bytes.
    ///
    /// Frames without the `RGB:` prefix are `Generic`. Frames with the prefix
    /// must parse fully; a malformed or non-UTF-8 one is an error.
    pub fn from_bytes(bytes: &'a [u8]) -> Result<Self, ParseError> {
        if !bytes.starts_with(COLOR_PREFIX.as_bytes()) {
            return Ok(Command::Generic(bytes));
        }

        let text = core::str::from_utf8(bytes).map_err(|_| ParseError::InvalidValue)?;
        ColorCommand::parse(text).map(Command::Color)
    }

    /// Classifies a completed frame.
    pub fn from_frame<const CAP: usize>(frame: &'a Frame<CAP>) -> Result<Self, ParseError> {
        Self::from_bytes(frame.as_bytes())
    }
}
