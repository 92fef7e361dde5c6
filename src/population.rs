// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Colony Simulation Suite ("The Petri Dish") - Population Manager

//! Worm spawning against the shared nutrient pool.
//!
//! Every colony draws from the same pool. A regular spawn needs the pool
//! above the threshold, a successful rate roll, and room under the soft cap.
//! Boss spawns skip the soft cap but respect the hard cap.

use rand::Rng;

use crate::colony::Colony;
use crate::config::WormParams;
use crate::economy::Economy;
use crate::worm::Worm;

/// Worm slots available per colony at the given nutrient level.
pub fn soft_cap(nutrients: f64, params: &WormParams) -> usize {
    let extra = (nutrients.max(0.0) / params.nutrients_per_slot).floor() as usize;
    (params.soft_cap_base + extra).clamp(params.soft_cap_min, params.soft_cap_max)
}

fn spawn_into<R: Rng>(colony: &mut Colony, is_boss: bool, params: &WormParams, rng: &mut R) {
    let worm = Worm::spawn(colony.center, colony.radius, &colony.dna, is_boss, params, rng);
    colony.worms.push(worm);
}

/// Seed a freshly founded colony. Free of nutrient cost.
pub fn seed_initial<R: Rng>(colony: &mut Colony, params: &WormParams, rng: &mut R) -> usize {
    let (lo, hi) = params.initial_worms;
    let count = rng.gen_range(lo..=hi);
    for _ in 0..count {
        spawn_into(colony, false, params, rng);
    }
    count
}

/// Spawn as many worms as the pool, the rate roll and the soft cap allow this
/// frame. Returns how many were added.
pub fn try_spawn_worms<R: Rng>(
    colony: &mut Colony,
    economy: &mut Economy,
    params: &WormParams,
    dt: f64,
    rng: &mut R,
) -> usize {
    let chance = (params.spawn_rate * dt).clamp(0.0, 1.0);
    let mut spawned = 0;
    while colony.worms.len() < soft_cap(economy.nutrients, params)
        && economy.nutrients > params.spawn_threshold
        && rng.gen_bool(chance)
    {
        if !economy.try_spend(params.spawn_cost) {
            break;
        }
        spawn_into(colony, false, params, rng);
        spawned += 1;
    }
    spawned
}

/// Add a boss worm unless the colony is at the hard cap.
pub fn spawn_boss<R: Rng>(colony: &mut Colony, params: &WormParams, rng: &mut R) -> bool {
    if colony.worms.len() >= params.hard_cap {
        log::debug!("colony {} at hard cap, boss skipped", colony.id);
        return false;
    }
    spawn_into(colony, true, params, rng);
    true
}
