//! Integration tests for the registry and the generator facade.

use unibar::{registry, BarcodeGenerator, Configuration, Error, Orientation};

fn generator_for(name: &str, cfg: Configuration) -> BarcodeGenerator {
    registry::create(name, &cfg)
        .map(BarcodeGenerator::new)
        .unwrap()
}

#[test]
fn test_registry_lists_all_symbologies() {
    let names = registry::names();
    for expected in [
        "code39",
        "codabar",
        "intl2of5",
        "interleaved2of5",
        "postnet",
        "royal-mail-cbc",
        "aztec",
    ] {
        assert!(names.contains(&expected), "missing {expected}");
    }
}

#[test]
fn test_registry_rejects_unknown_name() {
    let cfg = Configuration::new("ean-131");
    assert!(matches!(
        registry::create("ean-131", &cfg),
        Err(Error::UnknownSymbology(_))
    ));
}

#[test]
fn test_quiet_zone_is_applied_on_both_sides() {
    // "1236" carries a valid interleaved 2 of 5 check digit, which Auto
    // verifies on even-length messages.
    for (name, message) in [("code39", "1234"), ("codabar", "1234"), ("intl2of5", "1236")] {
        let gen = generator_for(name, Configuration::new(name));
        let quiet = gen.symbology().options().quiet_zone;
        assert!(quiet > 0.0, "{name} has no default quiet zone");

        let dim = gen.calc_dimensions(message).unwrap();
        let slack = dim.width_plus_quiet - dim.width;
        assert!(
            (slack - 2.0 * quiet).abs() < 1e-9,
            "{name}: quiet zone not symmetric"
        );
        assert!((dim.x_offset - quiet).abs() < 1e-9);
    }
}

#[test]
fn test_quiet_zone_can_be_disabled() {
    let cfg = Configuration::new("code39").with_attribute("quiet-zone", "disabled");
    let gen = generator_for("code39", cfg);
    let dim = gen.calc_dimensions("99").unwrap();
    assert_eq!(dim.width, dim.width_plus_quiet);
    assert_eq!(dim.x_offset, 0.0);
}

#[test]
fn test_orientation_swaps_viewport_extents() {
    let upright = generator_for("code39", Configuration::new("code39"))
        .calc_dimensions("ROTATE")
        .unwrap();
    let rotated = generator_for(
        "code39",
        Configuration::new("code39").with_attribute("orientation", "90"),
    )
    .calc_dimensions("ROTATE")
    .unwrap();

    // Stored dimensions describe the unrotated frame; only the viewport
    // accessors swap.
    assert_eq!(upright.width, rotated.width);
    assert_eq!(
        rotated.width_plus_quiet_for(Orientation::Deg90),
        upright.height_plus_quiet
    );
    assert_eq!(
        rotated.height_plus_quiet_for(Orientation::Deg90),
        upright.width_plus_quiet
    );
}

#[test]
fn test_height_attribute_controls_bar_height() {
    let short = generator_for(
        "code39",
        Configuration::new("code39").with_attribute("height", "10mm"),
    );
    let tall = generator_for(
        "code39",
        Configuration::new("code39").with_attribute("height", "20mm"),
    );
    let d1 = short.calc_dimensions("X").unwrap();
    let d2 = tall.calc_dimensions("X").unwrap();
    assert!((d2.height - d1.height - 10.0).abs() < 1e-9);
}

#[test]
fn test_module_width_scales_symbol_width() {
    let narrow = generator_for(
        "code39",
        Configuration::new("code39").with_attribute("module-width", "0.2mm"),
    );
    let wide = generator_for(
        "code39",
        Configuration::new("code39").with_attribute("module-width", "0.4mm"),
    );
    let w1 = narrow.calc_dimensions("SCALE").unwrap().width;
    let w2 = wide.calc_dimensions("SCALE").unwrap().width;
    assert!((w2 - 2.0 * w1).abs() < 1e-6);
}

#[test]
fn test_suppressed_text_reduces_height() {
    let with_text = generator_for("code39", Configuration::new("code39"))
        .calc_dimensions("TEXT")
        .unwrap();
    let without = generator_for(
        "code39",
        Configuration::new("code39").with_attribute("human-readable", "none"),
    )
    .calc_dimensions("TEXT")
    .unwrap();
    assert!(with_text.height > without.height);
    assert_eq!(with_text.width, without.width);
}

#[test]
fn test_empty_message_is_rejected() {
    let gen = generator_for("code39", Configuration::new("code39"));
    assert!(gen.calc_dimensions("").is_err());
}

#[test]
fn test_aztec_without_matrix_encoder_fails() {
    let gen = generator_for("aztec", Configuration::new("aztec"));
    assert!(matches!(
        gen.calc_dimensions("AZTEC"),
        Err(Error::Configuration(_))
    ));
}

#[test]
fn test_bad_length_unit_is_a_configuration_error() {
    let cfg = Configuration::new("code39").with_attribute("module-width", "3 furlongs");
    assert!(registry::create("code39", &cfg).is_err());
}
