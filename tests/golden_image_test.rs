#[cfg(feature = "integration-tests")]
mod common;

#[cfg(feature = "integration-tests")]
fn config(variant: nebula_one::Variant) -> nebula_one::SceneConfig {
    let mut config = nebula_one::SceneConfig::default()
        .with_variant(variant)
        .with_seed(1);
    config.clear_colour = wgpu::Color::BLACK;
    config
}

#[cfg(feature = "integration-tests")]
fn is_lit(pixel: &image::Rgba<u8>) -> bool {
    pixel.0[..3].iter().any(|&c| c > 8)
}

/// Share of lit pixels in the leftmost columns, where only particles can appear.
#[cfg(feature = "integration-tests")]
fn edge_coverage(texture: &image::RgbaImage, columns: u32) -> f32 {
    let lit = (0..columns)
        .flat_map(|x| (0..texture.height()).map(move |y| (x, y)))
        .filter(|&(x, y)| is_lit(texture.get_pixel(x, y)))
        .count();
    lit as f32 / (columns * texture.height()) as f32
}

#[test]
#[cfg(feature = "integration-tests")]
fn should_draw_mascot_in_the_centre() {
    use crate::common::test_utils::capture;

    let Some(texture) = capture(&config(nebula_one::Variant::Mascot), 0.0, 160, 120) else {
        return;
    };

    // The head sits just above the middle of the frame.
    assert!(is_lit(texture.get_pixel(80, 50)));
    assert!(edge_coverage(&texture, 20) < 0.05);
}

#[test]
#[cfg(feature = "integration-tests")]
fn should_draw_core_in_the_centre() {
    use crate::common::test_utils::capture;

    let Some(texture) = capture(&config(nebula_one::Variant::Core), 0.0, 160, 120) else {
        return;
    };

    let lit = texture.pixels().filter(|p| is_lit(p)).count();
    assert!(lit > 160 * 120 / 50, "only {} pixels lit", lit);
    assert!(edge_coverage(&texture, 20) < 0.05);
}

#[test]
#[cfg(feature = "integration-tests")]
fn should_render_identical_frames_for_identical_input() {
    use crate::common::test_utils::capture;

    let config = config(nebula_one::Variant::Mascot);
    let (Some(a), Some(b)) = (capture(&config, 1.5, 96, 96), capture(&config, 1.5, 96, 96)) else {
        return;
    };
    assert_eq!(a, b);
}

#[test]
#[cfg(feature = "integration-tests")]
fn should_change_frame_over_time() {
    use crate::common::test_utils::capture;

    let config = config(nebula_one::Variant::Mascot);
    let (Some(a), Some(b)) = (capture(&config, 0.0, 96, 96), capture(&config, 2.0, 96, 96)) else {
        return;
    };
    assert_ne!(a, b);
}
