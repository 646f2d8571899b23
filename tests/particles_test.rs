use nebula_one::resources::particles::{self, ParticleField};
use rand::{SeedableRng, rngs::StdRng};

#[test]
fn should_stay_inside_the_shell() {
    let field = ParticleField::seeded(particles::DEFAULT_COUNT, 42);

    assert_eq!(field.len(), 240);
    for [x, y, z] in field.points() {
        let radius = x.hypot(*z);
        assert!(radius >= 2.8 - 1e-4, "radius {} below the shell", radius);
        assert!(radius < 5.3 + 1e-4, "radius {} above the shell", radius);
        assert!(*y >= -1.2 && *y < 1.2, "height {} out of band", y);
    }
}

#[test]
fn should_be_reproducible_for_a_seed() {
    assert_eq!(ParticleField::seeded(64, 9), ParticleField::seeded(64, 9));
    assert_ne!(ParticleField::seeded(64, 9), ParticleField::seeded(64, 10));
}

#[test]
fn should_draw_from_any_rng() {
    let mut rng = StdRng::seed_from_u64(9);
    let field = ParticleField::generate(64, &mut rng);
    assert_eq!(field, ParticleField::seeded(64, 9));
}

#[test]
fn should_surround_the_subject() {
    let field = ParticleField::seeded(2_000, 1);

    // Every quadrant of the XZ plane gets particles.
    let mut quadrants = [0; 4];
    for [x, _, z] in field.points() {
        let index = (*x >= 0.0) as usize + 2 * (*z >= 0.0) as usize;
        quadrants[index] += 1;
    }
    assert!(quadrants.iter().all(|&n| n > 300), "{:?}", quadrants);
}

#[test]
fn should_allow_empty_field() {
    let field = ParticleField::seeded(0, 1);
    assert!(field.is_empty());
    assert!(field.into_points().is_empty());
}
