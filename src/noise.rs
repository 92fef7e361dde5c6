// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Colony Simulation Suite ("The Petri Dish") - Smooth Noise

use std::f64::consts::{PI, TAU};

/// (frequency, phase, weight). Frequencies are incommensurate and the
/// weights sum to 1, so the blend stays within [-1, 1].
const WAVES: [(f64, f64, f64); 3] = [
    (1.0, 0.0, 0.5),
    (2.173, 1.7, 0.3),
    (3.917, 4.1, 0.2),
];

/// Cheap continuous pseudo-noise in [-1, 1]: a blend of sine waves whose
/// frequencies share no common period.
pub fn smooth_scalar(x: f64) -> f64 {
    WAVES
        .iter()
        .map(|&(freq, phase, weight)| (x * freq + phase).sin() * weight)
        .sum()
}

/// Layered `smooth_scalar` with falling amplitude, bounded by [-1, 1].
/// Drives the slow territory drift.
pub fn fbm(x: f64) -> f64 {
    let mut value = 0.0;
    let mut amp = 0.55;
    let mut freq = 1.0;
    let mut total = 0.0;
    for _ in 0..3 {
        value += smooth_scalar(x * freq) * amp;
        total += amp;
        freq *= 2.05;
        amp *= 0.55;
    }
    value / total
}

/// Wrap an angle into [-PI, PI].
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped < -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smooth_scalar_bounded() {
        for i in 0..20_000 {
            let x = i as f64 * 0.137 - 900.0;
            let v = smooth_scalar(x);
            assert!((-1.0..=1.0).contains(&v), "smooth_scalar({}) = {}", x, v);
        }
    }

    #[test]
    fn test_smooth_scalar_continuous() {
        let step = 1e-4;
        for i in 0..5_000 {
            let x = i as f64 * 0.01;
            let jump = (smooth_scalar(x + step) - smooth_scalar(x)).abs();
            // Max slope is sum(freq * weight) < 2.
            assert!(jump < 2.0 * step, "discontinuity at {}", x);
        }
    }

    #[test]
    fn test_smooth_scalar_deterministic() {
        assert_eq!(smooth_scalar(12.5), smooth_scalar(12.5));
    }

    #[test]
    fn test_fbm_bounded() {
        for i in 0..10_000 {
            let v = fbm(i as f64 * 0.31);
            assert!((-1.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn test_wrap_angle() {
        assert!((wrap_angle(3.0 * PI).abs() - PI).abs() < 1e-9);
        assert!((wrap_angle(0.5) - 0.5).abs() < 1e-12);
        assert!((wrap_angle(-0.5 - TAU) + 0.5).abs() < 1e-9);
        for i in -100..100 {
            let a = wrap_angle(i as f64 * 0.77);
            assert!((-PI..=PI).contains(&a));
        }
    }
}
