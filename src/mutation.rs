// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Colony Simulation Suite ("The Petri Dish") - Mutation System

//! Bounded random perturbation of worm traits.
//!
//! Mutations come from four sources: the ambient roll every frame, buys,
//! colony milestones and the host's explicit force. All of them funnel
//! through [`mutate_worm`], which keeps every trait inside its bounds.

use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::colony::Colony;
use crate::config::MutationParams;
use crate::timer::Cooldown;
use crate::worm::Worm;

pub const SATURATION_BOUNDS: (f64, f64) = (55.0, 100.0);
pub const LUMINANCE_BOUNDS: (f64, f64) = (45.0, 80.0);
pub const ENERGY_BOUNDS: (f64, f64) = (0.2, 1.0);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MutationCause {
    Ambient,
    Buy,
    Milestone,
    Forced,
}

/// Signed magnitude in `[-1, -0.2] ∪ [0.2, 1]`, so every mutation is visible.
fn signed_kick<R: Rng>(rng: &mut R) -> f64 {
    let magnitude = rng.gen_range(0.2..=1.0);
    if rng.gen_bool(0.5) {
        magnitude
    } else {
        -magnitude
    }
}

/// Perturb one worm's traits in place.
pub fn mutate_worm<R: Rng>(worm: &mut Worm, params: &MutationParams, rng: &mut R) {
    worm.hue = (worm.hue + signed_kick(rng) * params.hue_shift).rem_euclid(360.0);
    worm.saturation = (worm.saturation + signed_kick(rng) * params.saturation_shift)
        .clamp(SATURATION_BOUNDS.0, SATURATION_BOUNDS.1);
    worm.luminance = (worm.luminance + signed_kick(rng) * params.luminance_shift)
        .clamp(LUMINANCE_BOUNDS.0, LUMINANCE_BOUNDS.1);

    worm.head_radius *= 1.0 + signed_kick(rng) * params.size_scale;
    worm.segment_spacing *= 1.0 + signed_kick(rng) * params.size_scale;
    worm.energy = (worm.energy + signed_kick(rng) * params.energy_shift).clamp(ENERGY_BOUNDS.0, ENERGY_BOUNDS.1);

    if rng.gen_bool(params.flip_chance) {
        worm.orbit = worm.orbit.flipped();
    }

    worm.mutation_level = worm.mutation_level.max(rng.gen_range(0.35..1.0));
    worm.mutation_count += 1;
}

/// Mutate one uniformly chosen worm. `None` when the colony is empty.
pub fn mutate_random_worm<R: Rng>(
    colony: &mut Colony,
    params: &MutationParams,
    rng: &mut R,
) -> Option<usize> {
    if colony.worms.is_empty() {
        return None;
    }
    let index = rng.gen_range(0..colony.worms.len());
    mutate_worm(&mut colony.worms[index], params, rng);
    colony.warp.pulse_storm(params.storm_pulse);
    colony.mutation_count += 1;
    Some(index)
}

/// Mutate up to `forced_count` distinct worms. Returns their indices.
pub fn force_mutation<R: Rng>(colony: &mut Colony, params: &MutationParams, rng: &mut R) -> Vec<usize> {
    let amount = params.forced_count.min(colony.worms.len());
    if amount == 0 {
        return Vec::new();
    }
    let picked = index::sample(rng, colony.worms.len(), amount).into_vec();
    for &i in &picked {
        mutate_worm(&mut colony.worms[i], params, rng);
    }
    colony.warp.pulse_storm(params.storm_pulse);
    colony.mutation_count += picked.len() as u32;
    picked
}

/// Chance of a mutation from a buy of the given intensity.
pub fn buy_chance(intensity: f64, params: &MutationParams) -> f64 {
    let bonus = (intensity * params.buy_chance_per_intensity).clamp(0.0, params.buy_chance_cap);
    (params.buy_chance + bonus).clamp(0.0, 1.0)
}

// ─── AmbientMutator ──────────────────────────────────────────────────────────

/// Per-frame background mutation roll, rate-limited by a cooldown.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct AmbientMutator {
    cooldown: Cooldown,
}

impl AmbientMutator {
    /// Probability for this frame. Rates are per 60 Hz frame, scaled by `dt`.
    pub fn chance(dt: f64, nutrient_factor: f64, params: &MutationParams) -> f64 {
        ((params.base_chance + nutrient_factor * params.scale_chance) * dt * 60.0).clamp(0.0, 1.0)
    }

    /// Whether an ambient mutation fires this frame.
    pub fn roll<R: Rng>(&mut self, dt: f64, nutrient_factor: f64, params: &MutationParams, rng: &mut R) -> bool {
        self.cooldown.advance(dt);
        if !self.cooldown.is_ready() {
            return false;
        }
        if rng.gen_bool(Self::chance(dt, nutrient_factor, params)) {
            self.cooldown.rearm(params.ambient_cooldown);
            true
        } else {
            false
        }
    }
}
