//! Value types shared across the encoding and rendering pipeline.
//!
//! This module defines the intermediate representation that bridges symbol
//! encoding and output rendering: physical symbol dimensions, orientation,
//! the small closed option enums, and the geometry event stream emitted by
//! the symbol logic engines.

mod dimension;
mod event;
mod options;

pub use dimension::{BarcodeDimension, Orientation};
pub use event::{EventBuffer, EventStream, SymbolEvent};
pub use options::{
    BaselineAlignment, ChecksumMode, HeightClass, HumanReadablePlacement, TextAlignment,
};
