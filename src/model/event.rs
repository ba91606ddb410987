//! Geometry event stream emitted by the symbol logic engines.
//!
//! An [`EventStream`] is a finite, non-restartable sequence describing one
//! symbol: a start event carrying the human-readable text, one or more rows
//! of bar/space elements, and an end event. The engine owns production; the
//! rendering bridge consumes the stream exactly once and accumulates the
//! relative element widths into absolute coordinates.

use super::HeightClass;

/// A single structural event in the geometry of a symbol.
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolEvent {
    /// Symbol generation has started.
    SymbolStart {
        /// Human-readable text to display, if any.
        human_readable: Option<String>,
    },

    /// A new row of elements is starting.
    RowStart,

    /// A bar or space element.
    Element {
        /// `true` for a bar (ink), `false` for a space.
        bar: bool,

        /// Element width in millimeters.
        width: f64,

        /// Height class of the element.
        height: HeightClass,
    },

    /// The current row has ended.
    RowEnd,

    /// Symbol generation has completed.
    SymbolEnd,
}

impl SymbolEvent {
    /// Check if this is a drawable bar element.
    pub fn is_bar(&self) -> bool {
        matches!(self, SymbolEvent::Element { bar: true, .. })
    }

    /// Check if this is a symbol boundary event.
    pub fn is_symbol_boundary(&self) -> bool {
        matches!(
            self,
            SymbolEvent::SymbolStart { .. } | SymbolEvent::SymbolEnd
        )
    }

    /// The element width, if this is an element event.
    pub fn width(&self) -> Option<f64> {
        match self {
            SymbolEvent::Element { width, .. } => Some(*width),
            _ => None,
        }
    }
}

/// A finite, consume-once stream of [`SymbolEvent`]s.
#[derive(Debug)]
pub struct EventStream {
    events: std::vec::IntoIter<SymbolEvent>,
}

impl EventStream {
    /// Wrap a fully built event sequence.
    pub fn new(events: Vec<SymbolEvent>) -> Self {
        Self {
            events: events.into_iter(),
        }
    }

    /// Number of events remaining in the stream.
    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl Iterator for EventStream {
    type Item = SymbolEvent;

    fn next(&mut self) -> Option<SymbolEvent> {
        self.events.next()
    }
}

/// Convenience builder used by the logic engines to assemble a stream.
#[derive(Debug, Default)]
pub struct EventBuffer {
    events: Vec<SymbolEvent>,
}

impl EventBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the start of the symbol.
    pub fn symbol_start(&mut self, human_readable: Option<String>) {
        self.events.push(SymbolEvent::SymbolStart { human_readable });
    }

    /// Record the start of a row.
    pub fn row_start(&mut self) {
        self.events.push(SymbolEvent::RowStart);
    }

    /// Record a uniform-height bar or space.
    pub fn element(&mut self, bar: bool, width: f64) {
        self.events.push(SymbolEvent::Element {
            bar,
            width,
            height: HeightClass::Uniform,
        });
    }

    /// Record a bar or space with an explicit height class.
    pub fn element_with_height(&mut self, bar: bool, width: f64, height: HeightClass) {
        self.events.push(SymbolEvent::Element { bar, width, height });
    }

    /// Record the end of a row.
    pub fn row_end(&mut self) {
        self.events.push(SymbolEvent::RowEnd);
    }

    /// Record the end of the symbol and hand the stream over.
    pub fn finish(mut self) -> EventStream {
        self.events.push(SymbolEvent::SymbolEnd);
        EventStream::new(self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_is_consumed_once() {
        let mut buf = EventBuffer::new();
        buf.symbol_start(Some("123".to_string()));
        buf.row_start();
        buf.element(true, 0.33);
        buf.element(false, 0.33);
        buf.row_end();
        let mut stream = buf.finish();

        assert_eq!(stream.remaining(), 6);
        assert!(matches!(
            stream.next(),
            Some(SymbolEvent::SymbolStart { .. })
        ));
        let rest: Vec<_> = stream.collect();
        assert_eq!(rest.len(), 5);
        assert!(matches!(rest.last(), Some(SymbolEvent::SymbolEnd)));
    }

    #[test]
    fn test_event_predicates() {
        let bar = SymbolEvent::Element {
            bar: true,
            width: 0.5,
            height: HeightClass::Uniform,
        };
        assert!(bar.is_bar());
        assert_eq!(bar.width(), Some(0.5));
        assert!(SymbolEvent::SymbolEnd.is_symbol_boundary());
    }
}
