// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Colony Simulation Suite ("The Petri Dish") - Colony DNA

use std::f64::consts::TAU;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::types::Vec2;

// ─── BehaviorStyle ───────────────────────────────────────────────────────────

/// Movement personality shared by all worms of a colony. Each style adds its
/// own deterministic perturbation on top of the orbit/steer blend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BehaviorStyle {
    /// Radius breathes in and out, so the path coils around the edge.
    Spiral { pitch: f64 },
    /// A rotating push that traces small loops.
    Arc { sweep: f64 },
    /// Forward sprints along the orbit separated by short drags.
    Dash { period: f64, duty: f64 },
    /// Hard inward/outward switches.
    Zigzag { frequency: f64, amplitude: f64 },
}

impl BehaviorStyle {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        match rng.gen_range(0..4) {
            0 => Self::Spiral {
                pitch: rng.gen_range(1.2..2.6),
            },
            1 => Self::Arc {
                sweep: rng.gen_range(1.5..3.2),
            },
            2 => Self::Dash {
                period: rng.gen_range(0.9..1.8),
                duty: rng.gen_range(0.35..0.6),
            },
            _ => Self::Zigzag {
                frequency: rng.gen_range(2.5..4.5),
                amplitude: rng.gen_range(0.6..1.0),
            },
        }
    }

    /// Extra velocity term at time `t` for a worm with the given `phase`.
    /// `radial` points outward from the colony center, `tangent` along the
    /// worm's own orbit direction; both are unit vectors.
    pub fn perturbation(&self, t: f64, phase: f64, radial: Vec2, tangent: Vec2) -> Vec2 {
        match *self {
            Self::Spiral { pitch } => radial * ((t * pitch + phase).sin() * 0.8),
            Self::Arc { sweep } => Vec2::from_angle(t * sweep + phase) * 0.6,
            Self::Dash { period, duty } => {
                let cycle = (t / period + phase / TAU).rem_euclid(1.0);
                if cycle < duty {
                    tangent
                } else {
                    tangent * -0.25
                }
            }
            Self::Zigzag {
                frequency,
                amplitude,
            } => {
                let side = if (t * frequency + phase).sin() >= 0.0 { 1.0 } else { -1.0 };
                radial * (side * amplitude)
            }
        }
    }
}

// ─── DnaLabel ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DnaLabel {
    Stable,
    Aggressive,
    Chaotic,
}

impl DnaLabel {
    pub fn from_temper(temper: f64) -> Self {
        if temper > 0.78 {
            Self::Chaotic
        } else if temper > 0.55 {
            Self::Aggressive
        } else {
            Self::Stable
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stable => "STABLE",
            Self::Aggressive => "AGGRESSIVE",
            Self::Chaotic => "CHAOTIC",
        }
    }
}

// ─── Dna ─────────────────────────────────────────────────────────────────────

/// Immutable traits assigned when a colony is founded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dna {
    /// Shortens the steering re-roll interval and widens steering.
    pub chaos: f64,
    pub speed: f64,
    pub temper: f64,
    /// Amplitude of body kinks.
    pub wiggle: f64,
    pub hue_a: f64,
    pub hue_b: f64,
    pub style: BehaviorStyle,
    pub label: DnaLabel,
}

impl Dna {
    /// Hues drift around the wheel with the colony id so siblings are
    /// distinguishable.
    pub fn random<R: Rng>(id: u32, rng: &mut R) -> Self {
        let base = 145.0 + id as f64 * 11.0 + rng.gen_range(-6.0..6.0);
        let span = 55.0 + rng.gen_range(-10.0..10.0);
        let temper = rng.gen_range(0.25..1.0);
        Self {
            chaos: rng.gen_range(0.25..1.0),
            speed: rng.gen_range(0.75..1.3),
            temper,
            wiggle: rng.gen_range(0.25..1.0),
            hue_a: base.rem_euclid(360.0),
            hue_b: (base + span).rem_euclid(360.0),
            style: BehaviorStyle::random(rng),
            label: DnaLabel::from_temper(temper),
        }
    }
}
