use nebula_one::data_structures::material::{Colour, Material, PointsMaterial, StandardMaterial};

use crate::common::test_utils::assert_close;

mod common;

#[test]
fn should_split_hex_colours() {
    let colour = Colour::from_hex(0xff8000);
    assert_eq!(colour.r, 1.0);
    assert_close(colour.g, 128.0 / 255.0);
    assert_eq!(colour.b, 0.0);
}

#[test]
fn should_convert_to_linear_light() {
    assert_eq!(Colour::from_hex(0xffffff).to_linear(), [1.0, 1.0, 1.0]);
    assert_eq!(Colour::BLACK.to_linear(), [0.0, 0.0, 0.0]);
    let [r, _, _] = Colour::from_hex(0x808080).to_linear();
    assert_close(r, 0.21586);
}

#[test]
fn should_become_transparent_with_opacity() {
    let opaque = StandardMaterial::new(0x9d82ff).roughness(0.4).metalness(0.7);
    assert!(!Material::from(opaque).is_transparent());

    let blended = opaque.opacity(0.6);
    assert!(Material::from(blended).is_transparent());
    assert_eq!(blended.roughness, 0.4);
    assert_eq!(blended.metalness, 0.7);

    assert!(!Material::from(PointsMaterial::new(0x8ae4ff, 0.04)).is_transparent());
    assert!(Material::from(PointsMaterial::new(0x8ae4ff, 0.04).opacity(0.75)).is_transparent());
}
