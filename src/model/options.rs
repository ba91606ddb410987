//! Closed option enums controlling checksum handling and symbol appearance.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// How the check character of a message is handled during encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChecksumMode {
    /// Behave as [`ChecksumMode::Add`] for a fresh message; symbologies that
    /// define no check character treat it as [`ChecksumMode::Ignore`].
    #[default]
    Auto,

    /// Always append a freshly computed check character.
    Add,

    /// Validate the trailing character against the computed checksum and
    /// fail on mismatch.
    Check,

    /// Pass the message through unmodified.
    Ignore,
}

impl ChecksumMode {
    /// Parse a configuration value (`auto`, `add`, `check`, `ignore`).
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "auto" => Ok(ChecksumMode::Auto),
            "add" => Ok(ChecksumMode::Add),
            "check" => Ok(ChecksumMode::Check),
            "ignore" => Ok(ChecksumMode::Ignore),
            other => Err(Error::Configuration(format!(
                "invalid checksum mode: {other}"
            ))),
        }
    }
}

/// Where the human-readable text is drawn relative to the bars.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HumanReadablePlacement {
    /// No human-readable text.
    None,

    /// Above the bars.
    Top,

    /// Below the bars.
    #[default]
    Bottom,
}

impl HumanReadablePlacement {
    /// Parse a configuration value (`none`, `top`, `bottom`).
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "none" => Ok(HumanReadablePlacement::None),
            "top" => Ok(HumanReadablePlacement::Top),
            "bottom" => Ok(HumanReadablePlacement::Bottom),
            other => Err(Error::Configuration(format!(
                "invalid human-readable placement: {other}"
            ))),
        }
    }
}

/// Horizontal distribution of human-readable glyphs between two X anchors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlignment {
    /// Flush against the left anchor.
    Start,

    /// Flush against the right anchor.
    End,

    /// Centered between the anchors.
    #[default]
    Center,

    /// Slack distributed evenly as extra inter-glyph spacing.
    Justify,
}

impl TextAlignment {
    /// Parse a configuration value (`start`, `end`, `center`, `justify`).
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "start" => Ok(TextAlignment::Start),
            "end" => Ok(TextAlignment::End),
            "center" => Ok(TextAlignment::Center),
            "justify" => Ok(TextAlignment::Justify),
            other => Err(Error::Configuration(format!(
                "invalid text alignment: {other}"
            ))),
        }
    }
}

/// Vertical alignment of variable-height bars against the symbol frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BaselineAlignment {
    /// Bars hang from the top edge.
    Top,

    /// Bars stand on the bottom edge.
    #[default]
    Bottom,
}

impl BaselineAlignment {
    /// Parse a configuration value (`top`, `bottom`).
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "top" => Ok(BaselineAlignment::Top),
            "bottom" => Ok(BaselineAlignment::Bottom),
            other => Err(Error::Configuration(format!(
                "invalid baseline alignment: {other}"
            ))),
        }
    }
}

/// Height class of a single bar or space element.
///
/// Classic linear codes emit only [`HeightClass::Uniform`]; the postal
/// symbologies pick one of the four structural classes per bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeightClass {
    /// Full symbol height (classic linear bars and spaces).
    #[default]
    Uniform,

    /// Tracker segment only.
    Track,

    /// Tracker plus ascender.
    Ascender,

    /// Tracker plus descender.
    Descender,

    /// Ascender, tracker, and descender.
    Full,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_mode_parse() {
        assert_eq!(ChecksumMode::from_name("add").unwrap(), ChecksumMode::Add);
        assert_eq!(
            ChecksumMode::from_name("CHECK").unwrap(),
            ChecksumMode::Check
        );
        assert!(ChecksumMode::from_name("maybe").is_err());
    }

    #[test]
    fn test_placement_parse() {
        assert_eq!(
            HumanReadablePlacement::from_name("none").unwrap(),
            HumanReadablePlacement::None
        );
        assert!(HumanReadablePlacement::from_name("sideways").is_err());
    }
}
