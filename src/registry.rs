//! Symbology registry and the top-level generator facade.
//!
//! Symbologies are registered under well-known names (plus aliases) and
//! instantiated from a [`Configuration`] tree whose root element names the
//! symbology. [`BarcodeGenerator`] ties an instantiated engine to the
//! rendering bridge.

use log::debug;

use crate::config::Configuration;
use crate::error::{Error, Result};
use crate::model::BarcodeDimension;
use crate::render::{measure, Canvas, SymbolRenderer};
use crate::symbology::{
    AztecGenerator, Codabar, Code39, Interleaved2Of5, Postnet, RoyalMailCbc, Symbology,
};

type Constructor = fn(&Configuration) -> Result<Box<dyn Symbology>>;

/// Registered symbology names (aliases included) and their constructors.
const SYMBOLOGIES: &[(&str, Constructor)] = &[
    ("code39", |cfg| Ok(Box::new(Code39::from_config(cfg)?))),
    ("codabar", |cfg| Ok(Box::new(Codabar::from_config(cfg)?))),
    ("intl2of5", |cfg| {
        Ok(Box::new(Interleaved2Of5::from_config(cfg)?))
    }),
    ("interleaved2of5", |cfg| {
        Ok(Box::new(Interleaved2Of5::from_config(cfg)?))
    }),
    ("postnet", |cfg| Ok(Box::new(Postnet::from_config(cfg)?))),
    ("royal-mail-cbc", |cfg| {
        Ok(Box::new(RoyalMailCbc::from_config(cfg)?))
    }),
    ("aztec", |cfg| Ok(Box::new(AztecGenerator::from_config(cfg)?))),
];

/// All registered symbology names, aliases included.
pub fn names() -> Vec<&'static str> {
    SYMBOLOGIES.iter().map(|&(name, _)| name).collect()
}

/// Instantiate a symbology by registry name. Lookup is case-insensitive.
pub fn create(name: &str, cfg: &Configuration) -> Result<Box<dyn Symbology>> {
    let wanted = name.to_ascii_lowercase();
    for (registered, constructor) in SYMBOLOGIES {
        if *registered == wanted {
            debug!("Instantiating symbology '{registered}'");
            return constructor(cfg);
        }
    }
    Err(Error::UnknownSymbology(name.to_string()))
}

/// High-level entry point: one configured symbology instance, ready to
/// measure and generate symbols.
pub struct BarcodeGenerator {
    symbology: Box<dyn Symbology>,
}

impl std::fmt::Debug for BarcodeGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BarcodeGenerator")
            .field("symbology", &self.symbology.name())
            .finish()
    }
}

impl BarcodeGenerator {
    /// Build a generator from a configuration tree. The root element's name
    /// selects the symbology.
    pub fn from_config(cfg: &Configuration) -> Result<Self> {
        create(cfg.name(), cfg).map(Self::new)
    }

    /// Wrap an already-constructed symbology instance.
    pub fn new(symbology: Box<dyn Symbology>) -> Self {
        Self { symbology }
    }

    /// Registry name of the wrapped symbology.
    pub fn name(&self) -> &'static str {
        self.symbology.name()
    }

    /// Access the wrapped symbology.
    pub fn symbology(&self) -> &dyn Symbology {
        self.symbology.as_ref()
    }

    /// Compute the symbol dimensions for a message without drawing.
    pub fn calc_dimensions(&self, message: &str) -> Result<BarcodeDimension> {
        let symbol = self.symbology.encode(message)?;
        measure(
            symbol,
            self.symbology.shape(),
            self.symbology.options(),
        )
    }

    /// Encode a message and draw it onto the canvas.
    pub fn generate<C: Canvas>(&self, canvas: &mut C, message: &str) -> Result<()> {
        let symbol = self.symbology.encode(message)?;
        SymbolRenderer::new(canvas).render(
            symbol,
            self.symbology.shape(),
            self.symbology.options(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_known_names() {
        let cfg = Configuration::new("code39");
        assert_eq!(create("code39", &cfg).unwrap().name(), "code39");
        assert_eq!(create("CODE39", &cfg).unwrap().name(), "code39");
        assert_eq!(
            create("interleaved2of5", &Configuration::new("interleaved2of5"))
                .unwrap()
                .name(),
            "intl2of5"
        );
    }

    #[test]
    fn test_names_lists_all_entries() {
        let names: Vec<&'static str> = names();
        assert_eq!(names.len(), SYMBOLOGIES.len());
        assert!(names.contains(&"code39"));
        assert!(names.contains(&"interleaved2of5"));
        assert!(names.contains(&"aztec"));
    }

    #[test]
    fn test_create_unknown_name() {
        let cfg = Configuration::new("upc-z");
        assert!(matches!(
            create("upc-z", &cfg),
            Err(Error::UnknownSymbology(_))
        ));
    }

    #[test]
    fn test_generator_from_config_root_name() {
        let cfg = Configuration::new("postnet");
        let generator = BarcodeGenerator::from_config(&cfg).unwrap();
        assert_eq!(generator.name(), "postnet");
    }

    #[test]
    fn test_calc_dimensions_positive() {
        let cfg = Configuration::new("code39");
        let generator = BarcodeGenerator::from_config(&cfg).unwrap();
        let dim = generator.calc_dimensions("HELLO").unwrap();
        assert!(dim.width > 0.0);
        assert!(dim.height > 0.0);
        assert!(dim.width_plus_quiet >= dim.width);
    }
}
