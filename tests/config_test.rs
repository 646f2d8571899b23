use nebula_one::{SceneConfig, Variant};

#[test]
fn should_parse_variants() {
    assert_eq!("mascot".parse::<Variant>().unwrap(), Variant::Mascot);
    assert_eq!("core".parse::<Variant>().unwrap(), Variant::Core);
    assert_eq!(" Core ".parse::<Variant>().unwrap(), Variant::Core);
}

#[test]
fn should_reject_unknown_variant() {
    let err = "robot".parse::<Variant>().unwrap_err();
    assert!(err.to_string().contains("robot"));
}

#[test]
fn should_display_like_it_parses() {
    for variant in [Variant::Mascot, Variant::Core] {
        assert_eq!(variant.to_string().parse::<Variant>().unwrap(), variant);
    }
}

#[test]
fn should_default_to_mascot() {
    let config = SceneConfig::default();
    assert_eq!(config.variant, Variant::Mascot);
    assert_eq!(config.particle_count, 240);
    assert_eq!(config.max_pixel_ratio, 2.0);
    assert_eq!(config.canvas_id, "canvas");
    assert!(config.seed.is_none());
}

#[test]
fn should_cap_device_pixel_ratio() {
    let config = SceneConfig::default();
    assert_eq!(config.pixel_ratio(1.0), 1.0);
    assert_eq!(config.pixel_ratio(1.25), 1.25);
    assert_eq!(config.pixel_ratio(2.0), 2.0);
    assert_eq!(config.pixel_ratio(3.5), 2.0);
    assert!(config.pixel_ratio(0.0) > 0.0);
}
