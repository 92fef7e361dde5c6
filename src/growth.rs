// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Colony Simulation Suite ("The Petri Dish") - Limb/Blob Growth Model

//! Market-cap driven limb growth and the irregular boundary silhouette.
//!
//! Everything here is a pure function of its inputs. The same boundary
//! multiplier shapes the rendered outline and the orbit the worms follow.

use std::f64::consts::TAU;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::ColonyParams;
use crate::noise::{smooth_scalar, wrap_angle};
use crate::types::Vec2;

pub const MAX_LIMBS: usize = 6;
const MAX_WARP: f64 = 2.2;
const MIN_MULTIPLIER: f64 = 0.58;
const MAX_MULTIPLIER: f64 = 1.8;

/// (angular frequency, time rate, weight) for the three shape layers.
const SHAPE_LAYERS: [(f64, f64, f64); 3] = [(1.7, 0.35, 0.55), (2.9, -0.52, 0.30), (4.3, 0.8, 0.15)];

// ─── Limb ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Limb {
    /// Anchor angle in radians.
    pub angle: f64,
    /// Standard deviation of the Gaussian bump, in radians.
    pub width: f64,
    pub height: f64,
}

// ─── Silhouette ──────────────────────────────────────────────────────────────

/// Per-colony shape state. Seeds and limb anchors are fixed at founding;
/// `limb_count` and `limb_strength` are recomputed from market cap every frame.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Silhouette {
    pub seeds: [f64; 3],
    pub limbs: [Limb; MAX_LIMBS],
    /// Growth-rate multiplier in [0.85, 1.10].
    pub bias: f64,
    pub limb_count: u8,
    pub limb_strength: f64,
}

impl Silhouette {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let offset = rng.gen_range(0.0..TAU);
        let limbs = std::array::from_fn(|i| Limb {
            angle: wrap_angle(offset + i as f64 * TAU / MAX_LIMBS as f64 + rng.gen_range(-0.35..0.35)),
            width: rng.gen_range(0.22..0.42),
            height: rng.gen_range(0.18..0.38),
        });
        Self {
            seeds: [
                rng.gen_range(0.0..1000.0),
                rng.gen_range(0.0..1000.0),
                rng.gen_range(0.0..1000.0),
            ],
            limbs,
            bias: rng.gen_range(0.85..=1.10),
            limb_count: 0,
            limb_strength: 0.0,
        }
    }

    /// Recompute cached limb growth from the current market cap.
    pub fn grow(&mut self, market_cap: f64, params: &ColonyParams) {
        self.limb_count = colony_limb_count(market_cap, self.bias, params);
        self.limb_strength = colony_limb_strength(market_cap, self.bias, params);
    }
}

// ─── Growth laws ─────────────────────────────────────────────────────────────

/// Limbs unlocked network-wide: 0 below onset, 6 once the span is covered.
pub fn global_limb_count(market_cap: f64, params: &ColonyParams) -> u8 {
    let progress = ((market_cap - params.limb_onset) / params.limb_count_span).clamp(0.0, 1.0);
    (MAX_LIMBS as f64 * progress).floor() as u8
}

pub fn global_limb_strength(market_cap: f64, params: &ColonyParams) -> f64 {
    ((market_cap - params.limb_onset) / params.limb_strength_span).clamp(0.0, 1.0)
}

pub fn colony_limb_count(market_cap: f64, bias: f64, params: &ColonyParams) -> u8 {
    let scaled = (global_limb_count(market_cap, params) as f64 * bias).floor();
    (scaled as u8).min(MAX_LIMBS as u8)
}

pub fn colony_limb_strength(market_cap: f64, bias: f64, params: &ColonyParams) -> f64 {
    (global_limb_strength(market_cap, params) * bias).clamp(0.0, params.limb_strength_cap)
}

// ─── Boundary ────────────────────────────────────────────────────────────────

/// Boundary radius multiplier at angle `theta` and time `t`, where `warp` is
/// the colony's summed excitement. Always within [0.58, 1.8].
pub fn boundary_multiplier(shape: &Silhouette, warp: f64, theta: f64, t: f64) -> f64 {
    let warp = warp.clamp(0.0, MAX_WARP);

    // cos(theta - seed) keeps every layer periodic in theta.
    let base: f64 = SHAPE_LAYERS
        .iter()
        .zip(shape.seeds.iter())
        .map(|(&(freq, rate, weight), &seed)| {
            smooth_scalar(seed + t * rate + freq * (theta - seed).cos()) * weight
        })
        .sum();

    let mut mul = 1.0 + base * (0.26 + warp * 0.24);

    let swell = 1.0 + warp * 0.45;
    for limb in shape.limbs.iter().take(shape.limb_count as usize) {
        let d = wrap_angle(theta - limb.angle);
        let bulge = (-(d * d) / (2.0 * limb.width * limb.width)).exp();
        mul += bulge * shape.limb_strength * limb.height * swell;
    }

    mul.clamp(MIN_MULTIPLIER, MAX_MULTIPLIER)
}

/// Sample `samples` points around the outline of a colony.
pub fn outline(
    center: Vec2,
    radius: f64,
    shape: &Silhouette,
    warp: f64,
    spin: f64,
    t: f64,
    samples: usize,
) -> Vec<Vec2> {
    let samples = samples.max(3);
    (0..samples)
        .map(|i| {
            let theta = i as f64 / samples as f64 * TAU;
            let r = radius * boundary_multiplier(shape, warp, theta - spin, t);
            center + Vec2::from_angle(theta) * r
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn shape(seed: u64) -> Silhouette {
        Silhouette::random(&mut ChaCha8Rng::seed_from_u64(seed))
    }

    #[test]
    fn test_global_limb_count_boundaries() {
        let p = ColonyParams::default();
        assert_eq!(global_limb_count(49_999.0, &p), 0);
        assert_eq!(global_limb_count(50_000.0, &p), 0);
        assert_eq!(global_limb_count(350_000.0, &p), 6);
        assert_eq!(global_limb_count(10_000_000.0, &p), 6);
    }

    #[test]
    fn test_global_limb_count_monotonic() {
        let p = ColonyParams::default();
        let mut last = 0;
        for i in 0..800 {
            let count = global_limb_count(i as f64 * 1_000.0, &p);
            assert!(count >= last, "count fell at mcap {}", i * 1_000);
            last = count;
        }
    }

    #[test]
    fn test_global_limb_strength_saturates() {
        let p = ColonyParams::default();
        assert_eq!(global_limb_strength(50_000.0, &p), 0.0);
        assert!((global_limb_strength(175_000.0, &p) - 0.5).abs() < 1e-12);
        assert_eq!(global_limb_strength(300_000.0, &p), 1.0);
    }

    #[test]
    fn test_colony_limbs_respect_bias_and_caps() {
        let p = ColonyParams::default();
        assert_eq!(colony_limb_count(350_000.0, 1.10, &p), 6);
        assert_eq!(colony_limb_count(350_000.0, 0.85, &p), 5);
        assert!(colony_limb_strength(1e9, 1.10, &p) <= 1.2);
    }

    #[test]
    fn test_multiplier_bounded() {
        let mut s = shape(11);
        s.grow(5_000_000.0, &ColonyParams::default());
        for warp in [0.0, 1.0, 5.0] {
            for i in 0..360 {
                let theta = (i as f64).to_radians();
                let m = boundary_multiplier(&s, warp, theta, i as f64 * 0.1);
                assert!((MIN_MULTIPLIER..=MAX_MULTIPLIER).contains(&m));
            }
        }
    }

    #[test]
    fn test_multiplier_periodic_in_theta() {
        let s = shape(5);
        let a = boundary_multiplier(&s, 0.4, 0.3, 2.0);
        let b = boundary_multiplier(&s, 0.4, 0.3 + TAU, 2.0);
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn test_limbs_bulge_at_anchor() {
        let p = ColonyParams::default();
        let mut grown = shape(9);
        let flat = grown.clone();
        grown.grow(400_000.0, &p);
        let anchor = grown.limbs[0].angle;
        assert!(grown.limb_count >= 1);
        let with_limb = boundary_multiplier(&grown, 0.0, anchor, 1.0);
        let without = boundary_multiplier(&flat, 0.0, anchor, 1.0);
        assert!(with_limb > without);
    }

    #[test]
    fn test_siblings_have_distinct_silhouettes() {
        let a = shape(1);
        let b = shape(2);
        let diff: f64 = (0..64)
            .map(|i| {
                let theta = i as f64 / 64.0 * TAU;
                (boundary_multiplier(&a, 0.0, theta, 0.0) - boundary_multiplier(&b, 0.0, theta, 0.0)).abs()
            })
            .sum();
        assert!(diff > 0.1);
    }

    #[test]
    fn test_outline_sample_count() {
        let s = shape(3);
        let pts = outline(Vec2::new(10.0, -5.0), 80.0, &s, 0.0, 0.0, 0.0, 48);
        assert_eq!(pts.len(), 48);
        for p in pts {
            let d = (p - Vec2::new(10.0, -5.0)).length();
            assert!(d >= 80.0 * MIN_MULTIPLIER - 1e-9 && d <= 80.0 * MAX_MULTIPLIER + 1e-9);
        }
    }
}
