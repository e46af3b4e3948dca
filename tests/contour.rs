use nozzle_visualizer::contour::{
    ContourError, ContourOptions, ConvergentArc, GeometryWarning, LengthKind, Profile,
    ScreenTransform, Segment, Viewport, generate, generate_with, inspect, newly_raised,
};
use nozzle_visualizer::engine::{EngineConfiguration, Parameter};
use nozzle_visualizer::vector::Point2;

const VIEWPORT: Viewport = Viewport::new(1600.0, 900.0, 40.0);

fn smooth_convergent() -> EngineConfiguration {
    // Arc radius large enough that the sweep stays upstream of the throat plane.
    let mut config = EngineConfiguration::optimal_rao();
    config.nozzle.entrance_radius = 2.5;
    config
}

fn approx(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

#[test]
fn optimal_rao_profile_matches_reference_points() {
    let config = EngineConfiguration::optimal_rao();
    let frame = generate(&config, VIEWPORT).expect("preset contour");
    let profile = &frame.profile;

    assert_eq!(profile.len(), 2 + 21 + 50);
    assert_eq!(frame.upper.len(), profile.len());
    assert_eq!(frame.lower.len(), profile.len());

    let first = profile.points()[0];
    assert_eq!(first, Point2::new(-2.0, 0.75));

    let throat = profile.points()[profile.throat_index()];
    assert_eq!(throat, Point2::new(0.0, 0.25));

    let arc = &profile.arc;
    assert!(approx(arc.half_length_m, 0.125f64.sqrt(), 1e-12));
    assert!(approx(arc.radius_m, 0.375, 1e-12));
    assert!(approx(arc.center.y, 0.375, 1e-12));

    let exit_slope = profile.parabola.slope_at(config.nozzle_length_m);
    assert!(approx(exit_slope, 15f64.to_radians().tan(), 1e-12));
    assert!(approx(profile.parabola.slope_at(0.0), 1.0, 1e-12));

    let last = *profile.points().last().expect("exit point");
    assert_eq!(last.x, config.nozzle_length_m);
    assert!(approx(last.y, profile.parabola.exit_radius_m(), 1e-12));
}

#[test]
fn optimal_rao_reports_overshoot_and_exit_mismatch() {
    let frame = generate(&EngineConfiguration::optimal_rao(), VIEWPORT).expect("preset contour");

    let overshoot = frame
        .warnings
        .iter()
        .find_map(|w| match w {
            GeometryWarning::ConvergentOvershoot { overshoot_m } => Some(*overshoot_m),
            _ => None,
        })
        .expect("overshoot warning");
    assert!(overshoot > 0.02 && overshoot < 0.025, "overshoot {overshoot}");

    let max_x = frame
        .local_upper()
        .iter()
        .take(frame.profile.throat_index())
        .map(|p| p.x)
        .fold(f64::NEG_INFINITY, f64::max);
    assert!(max_x > 0.0 && max_x <= overshoot + 1e-12);

    assert!(frame.warnings.iter().any(|w| matches!(
        w,
        GeometryWarning::ExitRadiusMismatch { requested_m, achieved_m }
            if approx(*requested_m, 0.5, 1e-12) && *achieved_m > 0.85
    )));
}

#[test]
fn lower_wall_mirrors_upper_wall() {
    let frame = generate(&EngineConfiguration::optimal_rao(), VIEWPORT).expect("contour");
    for (upper, lower) in frame.local_upper().iter().zip(&frame.local_lower) {
        assert_eq!(lower.x, upper.x);
        assert_eq!(lower.y, -upper.y);
    }
    let center_y = VIEWPORT.height_px / 2.0;
    for (upper, lower) in frame.upper.iter().zip(&frame.lower) {
        assert_eq!(upper.x, lower.x);
        assert!(approx(upper.y + lower.y, 2.0 * center_y, 1e-9));
    }
}

#[test]
fn axial_positions_increase_when_arc_does_not_overshoot() {
    let config = smooth_convergent();
    let frame = generate(&config, VIEWPORT).expect("contour");
    assert!(
        !frame
            .warnings
            .iter()
            .any(|w| matches!(w, GeometryWarning::ConvergentOvershoot { .. }))
    );

    let points = frame.local_upper();
    for pair in points.windows(2) {
        assert!(pair[1].x > pair[0].x, "{:?} then {:?}", pair[0], pair[1]);
    }
    for pair in frame.upper.windows(2) {
        assert!(pair[1].x > pair[0].x);
    }
}

#[test]
fn throat_joins_arc_and_bell_continuously() {
    let config = smooth_convergent();
    let profile = Profile::build(&config, &ContourOptions::default()).expect("profile");
    let throat = profile.throat_index();
    let points = profile.points();

    assert_eq!(points[throat], Point2::new(0.0, config.throat_radius_m()));
    assert_eq!(profile.segment_of(throat), Segment::Convergent);
    assert_eq!(profile.segment_of(throat + 1), Segment::Divergent);

    let before = points[throat - 1];
    let after = points[throat + 1];
    assert!(before.y > points[throat].y);
    assert!(after.y > points[throat].y);
    assert!(approx(after.y, profile.parabola.y_at(after.x), 1e-12));
}

#[test]
fn chamber_wall_is_flat_up_to_the_arc() {
    let config = smooth_convergent();
    let profile = Profile::build(&config, &ContourOptions::default()).expect("profile");
    let points = profile.points();

    assert_eq!(profile.segment_of(0), Segment::Chamber);
    assert_eq!(profile.segment_of(1), Segment::Chamber);
    assert_eq!(profile.segment_of(2), Segment::Convergent);
    assert_eq!(points[0].y, config.chamber_radius_m());
    assert_eq!(points[1].y, config.chamber_radius_m());
    assert!(approx(points[1].x, -profile.arc.half_length_m, 1e-12));
}

#[test]
fn sampling_options_control_point_count() {
    let options = ContourOptions {
        arc_interior_samples: 5,
        parabola_samples: 10,
    };
    let frame = generate_with(&smooth_convergent(), VIEWPORT, &options).expect("contour");
    assert_eq!(frame.upper.len(), 2 + 6 + 10);
    assert_eq!(frame.profile.throat_index(), 7);
}

#[test]
fn fit_uses_smaller_axis_scale_and_centres_throat() {
    let config = EngineConfiguration::optimal_rao();
    let (scale_x, scale_y) = ScreenTransform::axis_scales(&config, &VIEWPORT).expect("scales");
    assert!(approx(scale_x, 1520.0 / 3.0, 1e-9));
    assert!(approx(scale_y, 410.0 / 0.75, 1e-9));

    let transform = ScreenTransform::fit(&config, &VIEWPORT).expect("fit");
    assert_eq!(transform.scale, scale_x.min(scale_y));

    let origin = transform.apply(Point2::new(0.0, 0.0));
    assert_eq!(origin, Point2::new(800.0, 450.0));

    let frame = generate(&config, VIEWPORT).expect("contour");
    let [start, end] = frame.centerline;
    assert_eq!(start.y, 450.0);
    assert_eq!(end.y, 450.0);
    assert!(approx(start.x, 800.0 - 2.0 * transform.scale, 1e-9));
    assert!(approx(end.x, 800.0 + transform.scale, 1e-9));
    assert!(frame.upper.iter().all(|p| p.y < 450.0));
}

#[test]
fn tall_viewport_is_limited_by_length() {
    let config = EngineConfiguration::optimal_rao();
    let viewport = Viewport::new(400.0, 2000.0, 0.0);
    let transform = ScreenTransform::fit(&config, &viewport).expect("fit");
    assert!(approx(transform.scale, 400.0 / 3.0, 1e-9));
}

#[test]
fn generation_is_repeatable() {
    let config = EngineConfiguration::optimal_rao();
    let a = generate(&config, VIEWPORT).expect("first");
    let b = generate(&config, VIEWPORT).expect("second");
    let bits = |points: &[Point2]| -> Vec<(u64, u64)> {
        points
            .iter()
            .map(|p| (p.x.to_bits(), p.y.to_bits()))
            .collect()
    };
    assert_eq!(bits(&a.upper), bits(&b.upper));
    assert_eq!(bits(&a.lower), bits(&b.lower));
    assert_eq!(a, b);
}

#[test]
fn zero_nozzle_length_is_rejected() {
    let mut config = EngineConfiguration::optimal_rao();
    config.nozzle_length_m = 0.0;
    let err = generate(&config, VIEWPORT).expect_err("zero length");
    assert_eq!(err, ContourError::DegenerateLength(LengthKind::NozzleLength));
}

#[test]
fn zero_chamber_diameter_is_rejected() {
    let mut config = EngineConfiguration::optimal_rao();
    config.chamber_diameter_m = 0.0;
    config.throat_diameter_m = 0.0;
    let err = ScreenTransform::fit(&config, &VIEWPORT).expect_err("zero radius");
    assert_eq!(err, ContourError::DegenerateLength(LengthKind::ChamberRadius));
    // The collapsed arc is still constructible, so the fit is what rejects it.
    let err = generate(&config, VIEWPORT).expect_err("zero radius");
    assert_eq!(err, ContourError::DegenerateLength(LengthKind::ChamberRadius));
}

#[test]
fn zero_overall_length_is_rejected() {
    let mut config = EngineConfiguration::optimal_rao();
    config.chamber_length_m = 1.0;
    config.nozzle_length_m = -1.0;
    let err = generate(&config, VIEWPORT).expect_err("zero overall length");
    assert_eq!(err, ContourError::DegenerateLength(LengthKind::OverallLength));
}

#[test]
fn negative_overall_length_gives_non_positive_scale() {
    let mut config = EngineConfiguration::optimal_rao();
    config.chamber_length_m = -3.0;
    let err = generate(&config, VIEWPORT).expect_err("negative scale");
    assert_eq!(err, ContourError::NonPositiveScale(-760.0));
}

#[test]
fn overflowing_bell_reports_non_finite_sample() {
    let mut config = EngineConfiguration::optimal_rao();
    config.nozzle_length_m = 1e300;
    config.nozzle.inflection_angle_rad = std::f64::consts::FRAC_PI_2;
    let err = generate(&config, VIEWPORT).expect_err("overflow");
    match err {
        ContourError::NonFiniteSample(index) => assert!(index >= 23, "index {index}"),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn huge_entrance_radius_does_not_overflow_the_arc() {
    let mut config = EngineConfiguration::optimal_rao();
    config.nozzle.entrance_radius = 1e200;
    let arc = ConvergentArc::from_configuration(&config).expect("feasible arc");
    assert!(arc.half_length_m.is_finite());
    assert!(arc.half_length_m >= 0.0);
    let frame = generate(&config, VIEWPORT).expect("contour");
    assert!(frame.local_upper().iter().all(|p| p.is_finite()));
}

#[test]
fn short_chamber_warns_about_convergent_length() {
    let mut config = smooth_convergent();
    config.chamber_length_m = 0.2;
    let frame = generate(&config, VIEWPORT).expect("contour");
    assert!(frame.warnings.iter().any(|w| matches!(
        w,
        GeometryWarning::ChamberShorterThanConvergent { chamber_length_m, convergent_length_m }
            if *chamber_length_m == 0.2 && approx(*convergent_length_m, 0.375f64.sqrt(), 1e-12)
    )));
}

#[test]
fn non_positive_shape_multiple_still_draws_with_warning() {
    let mut config = smooth_convergent();
    config.nozzle.divergent_radius = 0.0;
    let frame = generate(&config, VIEWPORT).expect("contour");
    assert!(frame.warnings.contains(&GeometryWarning::NonPositiveDimension {
        parameter: Parameter::DivergentRadius,
        value: 0.0,
    }));
}

#[test]
fn throat_wider_than_chamber_is_flagged() {
    let mut config = EngineConfiguration::optimal_rao();
    config.throat_diameter_m = 2.0;
    let warnings = inspect(&config);
    assert!(warnings.contains(&GeometryWarning::ChamberNarrowerThanThroat {
        chamber_diameter_m: 1.5,
        throat_diameter_m: 2.0,
    }));
    assert!(
        warnings
            .iter()
            .any(|w| matches!(w, GeometryWarning::NozzleNarrowerThanThroat { .. }))
    );
}

#[test]
fn drifting_warning_values_are_raised_once() {
    let previous = [GeometryWarning::ConvergentOvershoot { overshoot_m: 0.021 }];
    let current = [
        GeometryWarning::ConvergentOvershoot { overshoot_m: 0.023 },
        GeometryWarning::ExitRadiusMismatch {
            requested_m: 0.5,
            achieved_m: 0.88,
        },
    ];
    let raised: Vec<_> = newly_raised(&previous, &current).collect();
    assert_eq!(raised, [&current[1]]);
    assert_eq!(newly_raised(&[], &current).count(), 2);
}

#[test]
fn small_entrance_radius_cannot_reach_throat() {
    let mut config = EngineConfiguration::optimal_rao();
    config.nozzle.entrance_radius = 0.5;
    let err = generate(&config, VIEWPORT).expect_err("infeasible arc");
    match &err {
        ContourError::GeometryInfeasible {
            chamber_radius_m,
            throat_radius_m,
            curvature_radius_m,
        } => {
            assert_eq!(*chamber_radius_m, 0.75);
            assert_eq!(*throat_radius_m, 0.25);
            assert!(approx(*curvature_radius_m, 0.125, 1e-12));
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert!(err.to_string().contains("cannot bridge"));
}

#[test]
fn viewport_without_room_is_rejected() {
    let err = generate(&EngineConfiguration::optimal_rao(), Viewport::new(60.0, 900.0, 40.0))
        .expect_err("no drawable width");
    assert!(matches!(err, ContourError::InvalidViewport { .. }));
}

#[test]
fn non_finite_parameter_is_rejected() {
    let mut config = EngineConfiguration::optimal_rao();
    config.set(Parameter::ExitAngle, f64::NAN);
    let err = generate(&config, VIEWPORT).expect_err("nan angle");
    assert!(matches!(
        err,
        ContourError::NonFiniteParameter {
            parameter: Parameter::ExitAngle,
            ..
        }
    ));
}

#[test]
fn narrow_nozzle_still_draws_with_warning() {
    let mut config = smooth_convergent();
    config.nozzle_diameter_m = 0.3;
    let frame = generate(&config, VIEWPORT).expect("contour");
    assert!(
        frame
            .warnings
            .iter()
            .any(|w| matches!(w, GeometryWarning::NozzleNarrowerThanThroat { .. }))
    );
}

#[test]
fn flat_bell_warns_about_angles() {
    let mut config = smooth_convergent();
    config.nozzle.inflection_angle_rad = config.nozzle.exit_angle_rad;
    let frame = generate(&config, VIEWPORT).expect("contour");
    assert!(
        frame
            .warnings
            .iter()
            .any(|w| matches!(w, GeometryWarning::InflectionNotSteeperThanExit { .. }))
    );
    // Constant slope: the bell is a straight cone.
    let profile = &frame.profile;
    assert!(approx(profile.parabola.curvature, 0.0, 1e-15));
}
