use nebula_one::{
    SceneConfig, Variant,
    scenes::{self, Rig, Staged},
};
use rand::{SeedableRng, rngs::StdRng};

use crate::common::test_utils::assert_close;

mod common;

fn staged(variant: Variant) -> Staged {
    let config = SceneConfig::default().with_variant(variant);
    scenes::build(&config, &mut StdRng::seed_from_u64(11))
}

#[test]
fn should_rest_at_time_zero() {
    let mut staged = staged(Variant::Mascot);
    staged.animate(0.0);

    let Rig::Mascot(rig) = staged.rig else {
        panic!("expected the mascot rig");
    };
    let scene = &staged.scene;
    assert_close(scene.transform(rig.character).rotation.y, 0.0);
    assert_close(scene.transform(rig.character).position.y, 0.0);
    assert_close(scene.transform(rig.left_arm).rotation.x, 0.0);
    assert_close(scene.transform(rig.right_leg).rotation.x, 0.0);
    assert_close(scene.transform(staged.backdrop.ring).rotation.z, 0.0);
    assert_close(scene.transform(staged.backdrop.particles).rotation.y, 0.0);
    assert_close(staged.camera.position.y, 0.3);
}

#[test]
fn should_turn_mascot_with_time() {
    let mut staged = staged(Variant::Mascot);
    let Rig::Mascot(rig) = staged.rig else {
        panic!("expected the mascot rig");
    };

    for t in [0.5_f32, 1.0, 2.0, 10.0] {
        staged.animate(t);
        let character = staged.scene.transform(rig.character);
        assert_close(character.rotation.y, 0.45 * t);
        assert_close(character.position.y, (t * 1.4).sin() * 0.08);
    }
}

#[test]
fn should_swing_limbs_in_opposite_phase() {
    let mut staged = staged(Variant::Mascot);
    let Rig::Mascot(rig) = staged.rig else {
        panic!("expected the mascot rig");
    };
    let t = 0.7_f32;
    staged.animate(t);

    let stride = (t * 2.0).sin();
    let scene = &staged.scene;
    assert_close(scene.transform(rig.left_arm).rotation.x, stride * 0.35);
    assert_close(scene.transform(rig.right_arm).rotation.x, -stride * 0.35);
    assert_close(scene.transform(rig.left_leg).rotation.x, -stride * 0.25);
    assert_close(scene.transform(rig.right_leg).rotation.x, stride * 0.25);
}

#[test]
fn should_keep_limb_rest_pose_while_swinging() {
    let mut staged = staged(Variant::Mascot);
    let Rig::Mascot(rig) = staged.rig else {
        panic!("expected the mascot rig");
    };
    let before = *staged.scene.transform(rig.left_arm);
    staged.animate(3.0);
    let after = staged.scene.transform(rig.left_arm);

    assert_eq!(before.position, after.position);
    assert_eq!(before.rotation.z, after.rotation.z);
}

#[test]
fn should_animate_backdrop_and_camera() {
    let mut staged = staged(Variant::Mascot);
    let t = 4.2_f32;
    staged.animate(t);

    let scene = &staged.scene;
    assert_close(scene.transform(staged.backdrop.ring).rotation.z, 0.35 * t);
    assert_close(scene.transform(staged.backdrop.particles).rotation.y, 0.15 * t);
    assert_close(staged.camera.position.y, (t * 0.4).sin() * 0.2 + 0.3);
    assert_close(staged.camera.position.x, 0.0);
    assert_close(staged.camera.position.z, 7.0);
}

#[test]
fn should_tumble_core() {
    let mut staged = staged(Variant::Core);
    let Rig::Core(rig) = staged.rig else {
        panic!("expected the core rig");
    };
    let t = 2.5_f32;
    staged.animate(t);

    let core = staged.scene.transform(rig.core);
    assert_close(core.rotation.y, 0.45 * t);
    assert_close(core.rotation.x, 0.2 * t);
    assert_close(core.position.y, (t * 1.4).sin() * 0.08);
    assert_close(staged.scene.transform(staged.backdrop.ring).rotation.z, 0.35 * t);
}

#[test]
fn should_depend_only_on_elapsed_time() {
    let mut a = staged(Variant::Mascot);
    let mut b = staged(Variant::Mascot);

    a.animate(1.0);
    a.animate(9.0);
    a.animate(3.3);
    b.animate(3.3);

    assert_eq!(a, b);
}
