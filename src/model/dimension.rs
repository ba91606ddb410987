//! Physical symbol dimensions and orientation.

use serde::{Deserialize, Serialize};

/// Rotation of a rendered symbol, in 90 degree increments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    /// No rotation.
    #[default]
    Deg0,
    /// Rotated 90 degrees counter-clockwise.
    Deg90,
    /// Rotated 180 degrees.
    Deg180,
    /// Rotated 270 degrees counter-clockwise.
    Deg270,
}

impl Orientation {
    /// Normalize an arbitrary degree value to one of the four supported
    /// orientations.
    ///
    /// The value is wrapped modulo 360 and rounded to the nearest multiple
    /// of 90, so `-90` maps to `Deg270` and `45` rounds up to `Deg90`.
    pub fn from_degrees(degrees: i32) -> Self {
        let wrapped = degrees.rem_euclid(360);
        match ((wrapped + 45) / 90) % 4 {
            0 => Orientation::Deg0,
            1 => Orientation::Deg90,
            2 => Orientation::Deg180,
            _ => Orientation::Deg270,
        }
    }

    /// The orientation as a degree value.
    pub fn degrees(self) -> i32 {
        match self {
            Orientation::Deg0 => 0,
            Orientation::Deg90 => 90,
            Orientation::Deg180 => 180,
            Orientation::Deg270 => 270,
        }
    }

    /// Whether this orientation swaps the width and height of the frame.
    pub fn swaps_axes(self) -> bool {
        matches!(self, Orientation::Deg90 | Orientation::Deg270)
    }
}

/// Physical dimensions of a barcode symbol, in millimeters.
///
/// Content extents exclude the quiet zone; the `*_plus_quiet` extents
/// include it on both sides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarcodeDimension {
    /// Content width.
    pub width: f64,

    /// Content height.
    pub height: f64,

    /// Width including the horizontal quiet zone on both sides.
    pub width_plus_quiet: f64,

    /// Height including the vertical quiet zone on both sides.
    pub height_plus_quiet: f64,

    /// Horizontal quiet zone size (offset of the content from the left edge).
    pub x_offset: f64,

    /// Vertical quiet zone size (offset of the content from the top edge).
    pub y_offset: f64,
}

impl BarcodeDimension {
    /// Create a dimension with no quiet zone.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            width_plus_quiet: width,
            height_plus_quiet: height,
            x_offset: 0.0,
            y_offset: 0.0,
        }
    }

    /// Create a dimension with the given quiet zone sizes.
    pub fn with_quiet_zone(width: f64, height: f64, quiet_h: f64, quiet_v: f64) -> Self {
        Self {
            width,
            height,
            width_plus_quiet: width + 2.0 * quiet_h,
            height_plus_quiet: height + 2.0 * quiet_v,
            x_offset: quiet_h,
            y_offset: quiet_v,
        }
    }

    /// Content width as seen in a frame rotated by `orientation`.
    pub fn width_for(&self, orientation: Orientation) -> f64 {
        if orientation.swaps_axes() {
            self.height
        } else {
            self.width
        }
    }

    /// Content height as seen in a frame rotated by `orientation`.
    pub fn height_for(&self, orientation: Orientation) -> f64 {
        if orientation.swaps_axes() {
            self.width
        } else {
            self.height
        }
    }

    /// Width including quiet zone as seen in a frame rotated by `orientation`.
    pub fn width_plus_quiet_for(&self, orientation: Orientation) -> f64 {
        if orientation.swaps_axes() {
            self.height_plus_quiet
        } else {
            self.width_plus_quiet
        }
    }

    /// Height including quiet zone as seen in a frame rotated by `orientation`.
    pub fn height_plus_quiet_for(&self, orientation: Orientation) -> f64 {
        if orientation.swaps_axes() {
            self.width_plus_quiet
        } else {
            self.height_plus_quiet
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_normalization() {
        assert_eq!(Orientation::from_degrees(0), Orientation::Deg0);
        assert_eq!(Orientation::from_degrees(90), Orientation::Deg90);
        assert_eq!(Orientation::from_degrees(360), Orientation::Deg0);
        assert_eq!(Orientation::from_degrees(450), Orientation::Deg90);
        assert_eq!(Orientation::from_degrees(-90), Orientation::Deg270);
        assert_eq!(Orientation::from_degrees(45), Orientation::Deg90);
        assert_eq!(Orientation::from_degrees(44), Orientation::Deg0);
        assert_eq!(Orientation::from_degrees(359), Orientation::Deg0);
    }

    #[test]
    fn test_quiet_zone_arithmetic() {
        let dim = BarcodeDimension::with_quiet_zone(40.0, 15.0, 2.0, 1.0);
        assert_eq!(dim.width_plus_quiet, 44.0);
        assert_eq!(dim.height_plus_quiet, 17.0);

        let bare = BarcodeDimension::new(40.0, 15.0);
        assert_eq!(bare.width_plus_quiet, bare.width);
        assert_eq!(bare.height_plus_quiet, bare.height);
    }

    #[test]
    fn test_rotated_frame_swaps_axes() {
        let dim = BarcodeDimension::with_quiet_zone(40.0, 15.0, 2.0, 2.0);
        assert_eq!(dim.width_for(Orientation::Deg90), 15.0);
        assert_eq!(dim.height_for(Orientation::Deg90), 40.0);
        assert_eq!(dim.width_for(Orientation::Deg180), 40.0);
        assert_eq!(dim.width_plus_quiet_for(Orientation::Deg270), 19.0);
    }
}
