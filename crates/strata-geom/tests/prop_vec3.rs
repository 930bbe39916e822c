use proptest::num::f32::NORMAL;
use proptest::prelude::*;
use proptest::strategy::Strategy;
use strata_geom::{Vec3, smoothstep};

fn approx(a: f32, b: f32, eps: f32) -> bool { (a - b).abs() <= eps }
fn vapprox(a: Vec3, b: Vec3, eps: f32) -> bool {
    approx(a.x, b.x, eps) && approx(a.y, b.y, eps) && approx(a.z, b.z, eps)
}

fn approx_abs_rel(a: f32, b: f32, atol: f32, rtol: f32) -> bool {
    let diff = (a - b).abs();
    let scale = a.abs().max(b.abs());
    diff <= atol + rtol * scale
}

fn vapprox_abs_rel(a: Vec3, b: Vec3, atol: f32, rtol: f32) -> bool {
    approx_abs_rel(a.x, b.x, atol, rtol)
        && approx_abs_rel(a.y, b.y, atol, rtol)
        && approx_abs_rel(a.z, b.z, atol, rtol)
}

fn bounded_f32() -> impl Strategy<Value = f32> {
    NORMAL.prop_filter("bounded", |v| v.is_finite() && v.abs() <= 1e4)
}

fn arb_vec3() -> impl Strategy<Value = Vec3> {
    (bounded_f32(), bounded_f32(), bounded_f32())
        .prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn nonzero_vec3() -> impl Strategy<Value = Vec3> {
    arb_vec3().prop_filter("not tiny", |v| v.length() >= 1e-3)
}

proptest! {
    // a + b == b + a
    #[test]
    fn vec3_add_commutative(a in arb_vec3(), b in arb_vec3()) {
        prop_assert!(vapprox(a + b, b + a, 1e-5));
    }

    // |normalize(v)| == 1 for non-zero v
    #[test]
    fn vec3_normalized_unit(v in nonzero_vec3()) {
        prop_assert!(approx(v.normalized().length(), 1.0, 1e-3));
    }

    // min/max bracket both inputs per component
    #[test]
    fn vec3_min_max_bracket(a in arb_vec3(), b in arb_vec3()) {
        let lo = a.min(b);
        let hi = a.max(b);
        prop_assert!(lo.x <= a.x && lo.x <= b.x && hi.x >= a.x && hi.x >= b.x);
        prop_assert!(lo.y <= a.y && lo.y <= b.y && hi.y >= a.y && hi.y >= b.y);
        prop_assert!(lo.z <= a.z && lo.z <= b.z && hi.z >= a.z && hi.z >= b.z);
    }

    // Lerp stays on the segment: |a - lerp| + |lerp - b| ≈ |a - b|
    #[test]
    fn vec3_lerp_on_segment(a in arb_vec3(), b in arb_vec3(), t in 0.0f32..=1.0) {
        let p = a.lerp(b, t);
        let lhs = (p - a).length() + (b - p).length();
        let rhs = (b - a).length();
        prop_assert!(approx_abs_rel(lhs, rhs, 1e-2, 1e-3));
    }

    // Cross result is orthogonal to both inputs (scaled tolerance)
    #[test]
    fn vec3_cross_orthogonal(a in nonzero_vec3(), b in nonzero_vec3()) {
        let c = a.cross(b);
        let scale = a.length() * b.length() * a.length().max(b.length());
        prop_assert!(a.dot(c).abs() <= 1e-3 + 1e-5 * scale);
        prop_assert!(b.dot(c).abs() <= 1e-3 + 1e-5 * scale);
    }

    // (a * k) / k == a
    #[test]
    fn vec3_scalar_roundtrip(a in arb_vec3(), k in 1e-2f32..1e3) {
        prop_assert!(vapprox_abs_rel((a * k) / k, a, 1e-6, 1e-5));
    }

    // smoothstep is bounded and monotone in x
    #[test]
    fn smoothstep_monotone(e0 in -10.0f32..10.0, w in 0.01f32..10.0, x0 in -30.0f32..30.0, dx in 0.0f32..5.0) {
        let e1 = e0 + w;
        let a = smoothstep(e0, e1, x0);
        let b = smoothstep(e0, e1, x0 + dx);
        prop_assert!((0.0..=1.0).contains(&a));
        prop_assert!((0.0..=1.0).contains(&b));
        prop_assert!(b + 1e-6 >= a);
    }
}
