//! Symbol logic engines, one per supported symbology.
//!
//! Each engine consumes a raw message plus a checksum mode and produces an
//! [`EncodedSymbol`]: the geometry event stream describing the bars and
//! spaces of the symbol, and the human-readable text to display (which may
//! differ from the raw message, e.g. with an appended check character).

mod aztec;
mod codabar;
mod code39;
mod interleaved;
mod postnet;
mod royal_mail;

pub use aztec::{AztecGenerator, BitMatrix, MatrixEncoder};
pub use codabar::Codabar;
pub use code39::Code39;
pub use interleaved::Interleaved2Of5;
pub use postnet::Postnet;
pub use royal_mail::RoyalMailCbc;

use crate::config::Configuration;
use crate::error::{Error, Result};
use crate::model::{
    BaselineAlignment, ChecksumMode, EventStream, HeightClass, HumanReadablePlacement, Orientation,
    TextAlignment,
};

/// Nominal point size of the default human-readable font, in millimeters.
const DEFAULT_FONT_SIZE: f64 = 8.0 * 25.4 / 72.0;

/// The result of encoding a message: the geometry event stream plus the
/// human-readable text.
#[derive(Debug)]
pub struct EncodedSymbol {
    /// Text to display alongside the bars.
    pub human_readable: String,

    /// Geometry events, consumed exactly once by the rendering bridge.
    pub events: EventStream,
}

/// Vertical shape of a symbol: every bar the same height, or per-bar
/// height classes (postal codes).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SymbolShape {
    /// All bars span the full row height.
    Uniform {
        /// Height of one row of elements.
        row_height: f64,
    },

    /// Bar heights are chosen per element from the four height classes.
    Variable {
        /// Height of the tracker segment.
        track: f64,
        /// Ascender extension above the tracker.
        ascender: f64,
        /// Descender extension below the tracker.
        descender: f64,
        /// Which edge short bars align against.
        baseline: BaselineAlignment,
    },
}

impl SymbolShape {
    /// Total bar area height of one row.
    pub fn row_height(&self) -> f64 {
        match *self {
            SymbolShape::Uniform { row_height } => row_height,
            SymbolShape::Variable {
                track,
                ascender,
                descender,
                ..
            } => track + ascender + descender,
        }
    }

    /// Vertical extent of a bar of the given class, as `(offset from the
    /// row top, height)`.
    pub fn bar_extent(&self, class: HeightClass) -> (f64, f64) {
        match *self {
            SymbolShape::Uniform { row_height } => (0.0, row_height),
            SymbolShape::Variable {
                track,
                ascender,
                descender,
                baseline,
            } => {
                let track_top = match baseline {
                    BaselineAlignment::Bottom => ascender,
                    BaselineAlignment::Top => 0.0,
                };
                match class {
                    HeightClass::Uniform | HeightClass::Full => {
                        (0.0, ascender + track + descender)
                    }
                    HeightClass::Track => (track_top, track),
                    HeightClass::Ascender => (0.0, ascender + track),
                    HeightClass::Descender => (ascender, track + descender),
                }
            }
        }
    }
}

/// Appearance options shared by all symbologies.
#[derive(Debug, Clone)]
pub struct SymbolOptions {
    /// Width of the narrowest bar/space unit, in millimeters.
    pub module_width: f64,

    /// Bar height for uniform-height symbologies, in millimeters.
    pub bar_height: f64,

    /// Horizontal quiet zone, in millimeters (0 when disabled).
    pub quiet_zone: f64,

    /// Vertical quiet zone, in millimeters.
    pub quiet_zone_vertical: f64,

    /// Checksum handling mode.
    pub checksum_mode: ChecksumMode,

    /// Placement of the human-readable text.
    pub placement: HumanReadablePlacement,

    /// Font for the human-readable text.
    pub font_name: String,

    /// Font size in millimeters.
    pub font_size: f64,

    /// Horizontal distribution of the human-readable glyphs.
    pub text_alignment: TextAlignment,

    /// Symbol rotation.
    pub orientation: Orientation,
}

impl SymbolOptions {
    /// Defaults for a symbology with the given base metrics.
    pub fn with_defaults(module_width: f64, bar_height: f64, quiet_zone: f64) -> Self {
        Self {
            module_width,
            bar_height,
            quiet_zone,
            quiet_zone_vertical: 0.0,
            checksum_mode: ChecksumMode::Auto,
            placement: HumanReadablePlacement::Bottom,
            font_name: "Helvetica".to_string(),
            font_size: DEFAULT_FONT_SIZE,
            text_alignment: TextAlignment::Center,
            orientation: Orientation::Deg0,
        }
    }

    /// Resolve the shared configuration keys.
    ///
    /// `module-width` is resolved first: the quiet zone default is expressed
    /// in module widths, so the resolution order is significant.
    pub fn from_config(
        cfg: &Configuration,
        default_module_width: f64,
        default_height: f64,
        default_quiet_modules: f64,
    ) -> Result<Self> {
        let module_width = cfg.length_or("module-width", default_module_width)?;
        if module_width <= 0.0 {
            return Err(Error::Configuration(
                "module-width must be positive".to_string(),
            ));
        }

        let quiet_zone = match cfg.attribute_or("quiet-zone", "") {
            "" => default_quiet_modules * module_width,
            "disabled" => 0.0,
            _ => cfg.length("quiet-zone")?,
        };

        let mut options = SymbolOptions::with_defaults(
            module_width,
            cfg.length_or("height", default_height)?,
            quiet_zone,
        );
        options.checksum_mode = ChecksumMode::from_name(cfg.attribute_or("checksum", "auto"))?;
        options.placement =
            HumanReadablePlacement::from_name(cfg.attribute_or("human-readable", "bottom"))?;
        options.font_name = cfg.attribute_or("human-readable-font", "Helvetica").to_string();
        options.font_size = cfg.length_or("human-readable-size", DEFAULT_FONT_SIZE)?;
        options.text_alignment =
            TextAlignment::from_name(cfg.attribute_or("text-alignment", "center"))?;
        // The human-readable settings may also arrive as a nested node.
        // Keys the node leaves out keep the values resolved above.
        if let Some(hr) = cfg.child("human-readable") {
            if let Ok(raw) = hr.attribute("placement") {
                options.placement = HumanReadablePlacement::from_name(raw)?;
            }
            let font_name = hr.attribute_or("font-name", &options.font_name).to_string();
            options.font_name = font_name;
            options.font_size = hr.length_or("font-size", options.font_size)?;
            if let Ok(raw) = hr.attribute("text-alignment") {
                options.text_alignment = TextAlignment::from_name(raw)?;
            }
        }
        options.orientation =
            Orientation::from_degrees(cfg.integer_or("orientation", 0)? as i32);
        Ok(options)
    }

    /// Set the checksum mode.
    pub fn with_checksum_mode(mut self, mode: ChecksumMode) -> Self {
        self.checksum_mode = mode;
        self
    }

    /// Set the human-readable placement.
    pub fn with_placement(mut self, placement: HumanReadablePlacement) -> Self {
        self.placement = placement;
        self
    }

    /// Set the orientation.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }
}

/// A symbol logic engine.
///
/// Implementations are stateless across calls: `encode` may be invoked any
/// number of times, each call producing a fresh event stream.
pub trait Symbology: Send + Sync {
    /// Registry name of the symbology.
    fn name(&self) -> &'static str;

    /// Shared appearance options.
    fn options(&self) -> &SymbolOptions;

    /// Vertical shape of the symbol.
    fn shape(&self) -> SymbolShape;

    /// Encode a message into a geometry event stream.
    fn encode(&self, message: &str) -> Result<EncodedSymbol>;
}

/// Apply a checksum mode to a message using the symbology's check-character
/// function, returning the message to encode (check character included for
/// `Add`).
///
/// `Auto` is mapped by the caller before invoking this helper, since its
/// meaning is symbology-specific.
pub(crate) fn handle_checksum(
    message: &str,
    mode: ChecksumMode,
    compute: impl Fn(&str) -> Result<char>,
) -> Result<String> {
    match mode {
        ChecksumMode::Ignore => Ok(message.to_string()),
        ChecksumMode::Auto | ChecksumMode::Add => {
            let check = compute(message)?;
            let mut out = message.to_string();
            out.push(check);
            Ok(out)
        }
        ChecksumMode::Check => {
            let mut chars = message.chars();
            let found = chars.next_back().ok_or_else(|| {
                Error::Encoding("message too short to carry a check character".to_string())
            })?;
            let payload: String = chars.collect();
            if payload.is_empty() {
                return Err(Error::Encoding(
                    "message too short to carry a check character".to_string(),
                ));
            }
            let expected = compute(&payload)?;
            if expected != found {
                return Err(Error::ChecksumMismatch { expected, found });
            }
            Ok(message.to_string())
        }
    }
}

/// Reject empty messages up front with a uniform error.
pub(crate) fn require_non_empty(message: &str) -> Result<()> {
    if message.is_empty() {
        Err(Error::Encoding("message must not be empty".to_string()))
    } else {
        Ok(())
    }
}
