use proptest::prelude::*;
use strata_chunk::DensityVolume;
use strata_edit::{Brush, apply_brush, brush_falloff};

proptest! {
    // Falloff stays in [0, 1] and never grows with distance
    #[test]
    fn falloff_bounded_and_monotone(r in 0.1f32..50.0, start in 0.0f32..0.99, d in 0.0f32..60.0, dd in 0.0f32..10.0) {
        let a = brush_falloff(d, r, start);
        let b = brush_falloff(d + dd, r, start);
        prop_assert!((0.0..=1.0).contains(&a));
        prop_assert!(b <= a + 1e-6);
        prop_assert_eq!(brush_falloff(0.0, r, start), 1.0);
        prop_assert_eq!(brush_falloff(r, r, start), 0.0);
    }

    // Only samples inside the ball change, and each moves toward the brush sign
    #[test]
    fn brush_changes_only_the_ball(
        c in prop::array::uniform3(-3i32..12),
        r in 1i32..5,
        strength in -2.0f32..2.0,
    ) {
        let size = 9usize;
        let mut v = DensityVolume::new(size);
        let brush = Brush { centre: c, radius: r, strength, falloff_start: 0.7 };
        let touched = apply_brush(&mut v, &brush, None);
        let mut inside = 0usize;
        for z in 0..size as i32 {
            for y in 0..size as i32 {
                for x in 0..size as i32 {
                    let (dx, dy, dz) = (x - c[0], y - c[1], z - c[2]);
                    let d = v.get(x as usize, y as usize, z as usize);
                    if dx * dx + dy * dy + dz * dz <= r * r {
                        inside += 1;
                        prop_assert!(d * strength >= 0.0);
                        prop_assert!(d.abs() <= strength.abs() + 1e-6);
                    } else {
                        prop_assert_eq!(d, 0.0);
                    }
                }
            }
        }
        prop_assert_eq!(touched, inside);
    }
}
