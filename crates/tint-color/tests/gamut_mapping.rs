//! End-to-end gamut mapping tests through the public `Color` API.

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tint_color::{Color, ColorError, DeltaE, FitMethod, FitOptions, DEFAULT_FIT_TOLERANCE};

fn color(space: &str, coords: [f64; 3]) -> Color {
    Color::new(space, coords, 1.0).unwrap()
}

// ============================================================================
// Clipping
// ============================================================================

#[test]
fn clip_hsl_negative_hue_wraps() {
    let c = color("hsl", [-120.0, 0.5, 0.75]);
    let clipped = c.clip("hsl").unwrap();
    assert_relative_eq!(clipped.get(0), 240.0, epsilon = 1e-9);
    assert_relative_eq!(clipped.get(1), 0.5, epsilon = 1e-9);
    assert_relative_eq!(clipped.get(2), 0.75, epsilon = 1e-9);
}

#[test]
fn clip_srgb_over_range() {
    let c = color("srgb", [2.0, 0.5, 0.5]);
    assert!(!c.in_gamut(0.0).unwrap());
    let clipped = c.clip("srgb").unwrap();
    assert!(clipped.in_gamut(0.0).unwrap());
    assert_eq!(clipped.coords(), [1.0, 0.5, 0.5]);
}

#[test]
fn clip_is_idempotent() {
    let c = color("oklch", [0.8, 0.35, 300.0]);
    let once = c.clip("srgb").unwrap();
    let twice = once.clip("srgb").unwrap();
    for i in 0..3 {
        assert_relative_eq!(once.get(i), twice.get(i), epsilon = 1e-9);
    }
}

#[test]
fn clip_keeps_original_space() {
    let c = color("oklch", [0.6, 0.4, 40.0]);
    let clipped = c.clip("srgb").unwrap();
    assert_eq!(clipped.space_name(), "oklch");
    assert!(clipped.in_gamut_of("srgb", 1e-9).unwrap());
}

#[test]
fn verifier_tolerance_edge() {
    let at_edge = color("srgb", [1.0, 0.0, 0.0]);
    let past_edge = color("srgb", [1.0 + 1e-6, 0.0, 0.0]);
    assert!(at_edge.in_gamut(0.0).unwrap());
    assert!(!past_edge.in_gamut(0.0).unwrap());
    assert!(past_edge.in_gamut(DEFAULT_FIT_TOLERANCE).unwrap());
}

// ============================================================================
// Fitting
// ============================================================================

#[test]
fn raytrace_keeps_lightness_and_hue() {
    let c = color("oklch", [0.3, 0.4, 160.0]);
    let fitted = c.fit("srgb", FitMethod::RayTrace, &FitOptions::default()).unwrap();
    assert_eq!(fitted.space_name(), "oklch");
    assert_relative_eq!(fitted.get(0), 0.3, epsilon = 1e-3);
    assert_relative_eq!(fitted.get(2), 160.0, epsilon = 0.5);
    assert!(fitted.get(1) < 0.4);
    assert!(fitted.in_gamut_of("srgb", 1e-9).unwrap());
}

#[test]
fn raytrace_light_blue_in_gamut() {
    let c = color("oklch", [0.9, 0.4, 270.0]);
    let coords = c.fit_coords("srgb", FitMethod::RayTrace, &FitOptions::default()).unwrap();
    assert!(coords.iter().all(|v| (0.0..=1.0).contains(v)));
}

#[test]
fn every_method_lands_in_gamut() {
    let mut rng = StdRng::seed_from_u64(42);
    let opts = FitOptions::default();
    for _ in 0..40 {
        let c = color(
            "oklch",
            [rng.gen_range(0.0..1.0), rng.gen_range(0.0..0.45), rng.gen_range(0.0..360.0)],
        );
        for method in FitMethod::ALL {
            for target in ["srgb", "display-p3", "rec2020"] {
                let coords = c.fit_coords(target, method, &opts).unwrap();
                let fitted = Color::new(target, coords, 1.0).unwrap();
                assert!(
                    fitted.in_gamut(0.0).unwrap(),
                    "{method} into {target}: {coords:?}"
                );
            }
        }
    }
}

#[test]
fn in_gamut_color_is_untouched() {
    let c = color("srgb", [0.2, 0.4, 0.6]);
    for method in FitMethod::ALL {
        let fitted = c.fit("srgb", method, &FitOptions::default()).unwrap();
        assert_eq!(fitted.coords(), c.coords(), "{method}");
    }
}

#[test]
fn bisection_never_adds_chroma() {
    let c = color("lch-d65", [50.0, 130.0, 300.0]);
    for method in [FitMethod::ChromaBisect, FitMethod::OklchChroma] {
        let fitted = c.fit("srgb", method, &FitOptions::default()).unwrap();
        assert!(fitted.get(1) <= 130.0 + 1e-6, "{method}");
        assert!(fitted.in_gamut_of("srgb", 1e-9).unwrap());
    }
}

#[test]
fn lch_raytrace_by_name() {
    let method: FitMethod = "lch-raytrace".parse().unwrap();
    let c = color("lch-d65", [50.0, 130.0, 300.0]);
    let fitted = c.fit("srgb", method, &FitOptions::default()).unwrap();
    assert!(fitted.in_gamut_of("srgb", 1e-9).unwrap());
    assert!(fitted.get(1) < 130.0);
}

#[test]
fn bisection_jnd_option() {
    let c = color("oklch", [0.7, 0.35, 150.0]);
    let tight = c.fit("srgb", FitMethod::OklchChroma, &FitOptions::default().jnd(0.0)).unwrap();
    assert!(tight.in_gamut_of("srgb", 1e-9).unwrap());
    let loose = c.fit("srgb", FitMethod::OklchChroma, &FitOptions::default().jnd(0.05)).unwrap();
    assert!(loose.in_gamut_of("srgb", 1e-9).unwrap());
}

#[test]
fn raytrace_into_hsl_uses_rgb_cube() {
    let c = color("hsl", [200.0, 1.6, 0.5]);
    assert!(!c.in_gamut(0.0).unwrap());
    let fitted = c.fit("hsl", FitMethod::RayTrace, &FitOptions::default()).unwrap();
    assert!(fitted.in_gamut(DEFAULT_FIT_TOLERANCE).unwrap());
}

#[test]
fn raytrace_into_hdr() {
    // negative green and blue in rec2020 linear
    let c = color("oklch", [0.7, 0.5, 30.0]);
    let pq = c.convert("rec2100-pq").unwrap();
    assert!(pq.get(1) < 0.0 && pq.get(2) < 0.0);
    assert!(!c.in_gamut_of("rec2100-pq", 0.0).unwrap());

    let coords = c.fit_coords("rec2100-pq", FitMethod::RayTrace, &FitOptions::default()).unwrap();
    assert!(coords.iter().all(|v| (0.0..=1.0).contains(v)), "{coords:?}");
    let fitted = Color::new("rec2100-pq", coords, 1.0).unwrap();
    assert!(fitted.in_gamut(0.0).unwrap());

    let clipped = pq.clip("rec2100-pq").unwrap().coords();
    let diff = coords.iter().zip(clipped).map(|(a, b)| (a - b).abs()).fold(0.0, f64::max);
    assert!(diff > 0.01, "raytrace {coords:?} vs clip {clipped:?}");
}

#[test]
fn hdr_negative_channels_survive_round_trip() {
    let lin = color("rec2100-linear", [1.3767, -0.1497, -0.0985]);
    let back = lin.convert("rec2100-pq").unwrap().convert("rec2100-linear").unwrap();
    for i in 0..3 {
        assert_relative_eq!(back.get(i), lin.get(i), epsilon = 1e-9);
    }
}

#[test]
fn raytrace_with_lab_pspace() {
    let c = color("oklch", [0.5, 0.4, 100.0]);
    let opts = FitOptions::default().pspace("lch-d65").max_iterations(6);
    let coords = c.fit_coords("srgb", FitMethod::RayTrace, &opts).unwrap();
    assert!(coords.iter().all(|v| (0.0..=1.0).contains(v)));
}

#[test]
fn fit_keeps_alpha() {
    let c = Color::new("oklch", [0.6, 0.4, 250.0], 0.25).unwrap();
    let fitted = c.fit("srgb", FitMethod::Scale, &FitOptions::default()).unwrap();
    assert_eq!(fitted.alpha(), 0.25);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn unknown_method_name() {
    let err = "nope".parse::<FitMethod>().unwrap_err();
    assert!(matches!(err, ColorError::UnknownMethod { .. }));
}

#[test]
fn unknown_target_space() {
    let c = color("srgb", [2.0, 0.0, 0.0]);
    let err = c.fit("cmyk", FitMethod::RayTrace, &FitOptions::default()).unwrap_err();
    assert!(matches!(err, ColorError::Space(_)));
}

#[test]
fn raytrace_into_lab_is_rejected() {
    let c = color("oklab", [0.5, 0.9, 0.9]);
    // Lab spaces are unbounded, so force the strategy through the trait
    let err = FitMethod::RayTrace
        .strategy()
        .fit(&c, &FitOptions::default())
        .unwrap_err();
    assert!(err.to_string().contains("not an RGB-like space"));
}

// ============================================================================
// Delta E
// ============================================================================

#[test]
fn delta_e_symmetric() {
    let a = color("srgb", [0.9, 0.2, 0.1]);
    let b = color("display-p3", [0.3, 0.6, 0.2]);
    for de in [DeltaE::Cie76, DeltaE::Ok, DeltaE::Ciede2000] {
        let ab = a.delta_e(&b, de).unwrap();
        let ba = b.delta_e(&a, de).unwrap();
        assert_relative_eq!(ab, ba, epsilon = 1e-9);
        assert!(ab > 0.0);
    }
}
