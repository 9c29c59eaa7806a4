use approx::assert_relative_eq;

use super::*;

fn assert_non_decreasing(heights: &[f64]) {
    assert!(heights.windows(2).all(|w| w[1] >= w[0]), "{heights:?}");
}

#[test]
fn constant_stories() {
    let heights = get_heights(&HeightGenerator::absolute(4, 100.0, ProcessingMethod::None));
    assert_eq!(heights, vec![0.0, 100.0, 200.0, 300.0, 400.0]);
}

#[test]
fn zero_stories() {
    let heights = get_heights(&HeightGenerator::absolute(0, 100.0, ProcessingMethod::None));
    assert_eq!(heights, vec![0.0]);
}

#[test]
fn incremental_grows() {
    let method = ProcessingMethod::Incremental {
        angle: 0.5,
        total: None,
    };
    let heights = get_heights(&HeightGenerator::absolute(3, 10.0, method));
    // multipliers 1, 1.5, 2
    assert_eq!(heights, vec![0.0, 10.0, 25.0, 45.0]);
}

#[test]
fn incremental_total_scales_each_step() {
    let method = ProcessingMethod::Incremental {
        angle: 2.0,
        total: Some(0.5),
    };
    assert_relative_eq!(method.angle_at(3), 3.0);
    assert_relative_eq!(method.height_multiplier(3), 4.0);
}

#[test]
fn negative_multipliers_are_clamped() {
    let method = ProcessingMethod::Incremental {
        angle: -0.6,
        total: None,
    };
    let heights = get_heights(&HeightGenerator::absolute(4, 10.0, method));
    assert_non_decreasing(&heights);
    assert_relative_eq!(heights[4], 10.0 + 4.0 + 0.0 + 0.0);
}

#[test]
fn sin_stays_between_bounds() {
    let method = ProcessingMethod::Sin {
        min: 0.5,
        max: 1.5,
        period: 0.7,
        phase_shift: 0.3,
    };
    for i in 0..20 {
        let m = method.height_multiplier(i);
        assert!((0.5..=1.5).contains(&m));
    }
    let heights = get_heights(&HeightGenerator::absolute(10, 20.0, method));
    assert_eq!(heights.len(), 11);
    assert_non_decreasing(&heights);
}

#[test]
fn sin_at_phase() {
    let method = ProcessingMethod::Sin {
        min: 0.0,
        max: 2.0,
        period: 1.0,
        phase_shift: std::f64::consts::FRAC_PI_2,
    };
    assert_relative_eq!(method.angle_at(0), 2.0);
}

#[test]
fn relative_reaches_total() {
    let method = ProcessingMethod::Incremental {
        angle: 1.0,
        total: None,
    };
    let heights = get_heights(&HeightGenerator::relative(3, 120.0, method));
    // multipliers 1, 2, 3 → 20, 40, 60
    assert_relative_eq!(heights[1], 20.0);
    assert_relative_eq!(heights[2], 60.0);
    assert_relative_eq!(heights[3], 120.0);
}

#[test]
fn relative_with_zero_multipliers_spaces_evenly() {
    let method = ProcessingMethod::Sin {
        min: 0.0,
        max: 0.0,
        period: 1.0,
        phase_shift: 0.0,
    };
    let heights = get_heights(&HeightGenerator::relative(4, 100.0, method));
    assert_eq!(heights, vec![0.0, 25.0, 50.0, 75.0, 100.0]);
}

#[test]
fn no_method_has_no_angle() {
    assert_eq!(ProcessingMethod::None.angle_at(7), 0.0);
    assert_eq!(ProcessingMethod::None.height_multiplier(7), 1.0);
}
