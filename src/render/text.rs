//! Glyph placement for the human-readable text line.
//!
//! The same algorithm serves every backend: given per-glyph advance widths
//! and the two X anchors, compute the X position of each glyph. The vector
//! and stream backends use a nominal advance (fonts are not parsed); the
//! paint backend supplies measured advances from its surface.

use crate::model::TextAlignment;

/// Fraction of the font size used as the nominal advance of one glyph.
const NOMINAL_ADVANCE_RATIO: f64 = 0.6;

/// Nominal advance width of one glyph at the given font size.
pub fn nominal_advance(font_size: f64) -> f64 {
    font_size * NOMINAL_ADVANCE_RATIO
}

/// Compute per-glyph X positions between the anchors `x1` and `x2`.
///
/// `Justify` distributes the slack evenly as extra inter-glyph spacing: the
/// first glyph is unshifted and each subsequent glyph is shifted by the
/// cumulative slack per gap. A single justified glyph falls back to `Start`.
pub fn glyph_positions(advances: &[f64], x1: f64, x2: f64, align: TextAlignment) -> Vec<f64> {
    let total: f64 = advances.iter().sum();
    let slack = (x2 - x1) - total;

    let mut positions = Vec::with_capacity(advances.len());
    match align {
        TextAlignment::Start => {
            let mut x = x1;
            for advance in advances {
                positions.push(x);
                x += advance;
            }
        }
        TextAlignment::End => {
            let mut x = x2 - total;
            for advance in advances {
                positions.push(x);
                x += advance;
            }
        }
        TextAlignment::Center => {
            let mut x = x1 + slack / 2.0;
            for advance in advances {
                positions.push(x);
                x += advance;
            }
        }
        TextAlignment::Justify => {
            let gaps = advances.len().saturating_sub(1);
            let extra = if gaps > 0 { slack / gaps as f64 } else { 0.0 };
            let mut x = x1;
            for advance in advances {
                positions.push(x);
                x += advance + extra;
            }
        }
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advances(n: usize) -> Vec<f64> {
        vec![2.0; n]
    }

    #[test]
    fn test_start_and_end() {
        let pos = glyph_positions(&advances(3), 10.0, 30.0, TextAlignment::Start);
        assert_eq!(pos, vec![10.0, 12.0, 14.0]);

        let pos = glyph_positions(&advances(3), 10.0, 30.0, TextAlignment::End);
        assert_eq!(pos, vec![24.0, 26.0, 28.0]);
    }

    #[test]
    fn test_center() {
        // Total 6 over a 20-wide band: slack 14, half-slack 7.
        let pos = glyph_positions(&advances(3), 10.0, 30.0, TextAlignment::Center);
        assert_eq!(pos, vec![17.0, 19.0, 21.0]);
    }

    #[test]
    fn test_justify_distributes_slack() {
        // Slack 14 over 2 gaps: each subsequent glyph shifts by 7 extra.
        let pos = glyph_positions(&advances(3), 10.0, 30.0, TextAlignment::Justify);
        assert_eq!(pos, vec![10.0, 19.0, 28.0]);
        // Last glyph ends flush: 28 + 2 = 30.
    }

    #[test]
    fn test_justify_single_glyph_falls_back_to_start() {
        let pos = glyph_positions(&advances(1), 10.0, 30.0, TextAlignment::Justify);
        assert_eq!(pos, vec![10.0]);
    }
}
