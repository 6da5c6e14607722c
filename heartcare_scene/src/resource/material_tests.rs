use super::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_color_to_rgb() {
    assert_eq!(Color::WHITE.to_rgb(), [1.0, 1.0, 1.0]);
    assert_eq!(Color(0xff0000).to_rgb(), [1.0, 0.0, 0.0]);
    let [r, g, b] = Color(0x444444).to_rgb();
    assert!((r - 68.0 / 255.0).abs() < 1e-6);
    assert_eq!(r, g);
    assert_eq!(g, b);
}

#[test]
fn test_opaque_material() {
    let m = MaterialSpec::opaque(HEART_PALETTE[0]);
    assert!(!m.transparent);
    assert_eq!(m.opacity, 1.0);
    assert_eq!(m.shininess, 50.0);
    assert_eq!(m.specular_color, Color(0x444444));
}

#[test]
fn test_with_opacity_sets_transparency() {
    let m = MaterialSpec::with_opacity(HEART_PALETTE[1], 0.9);
    assert!(m.transparent);
    assert_eq!(m.opacity, 0.9);

    let full = MaterialSpec::with_opacity(HEART_PALETTE[1], 1.0);
    assert!(!full.transparent);

    let clamped = MaterialSpec::with_opacity(HEART_PALETTE[1], 3.0);
    assert_eq!(clamped.opacity, 1.0);
}

#[test]
fn test_random_palette_color_covers_palette() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut seen = [false; HEART_PALETTE.len()];
    for _ in 0..500 {
        let c = MaterialSpec::random_palette_color(&mut rng);
        let idx = HEART_PALETTE.iter().position(|p| *p == c).unwrap();
        seen[idx] = true;
    }
    assert!(seen.iter().all(|s| *s));
}
