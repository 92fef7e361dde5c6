// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Colony Simulation Suite ("The Petri Dish") - Colonies

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{ColonyParams, MotionParams};
use crate::dna::Dna;
use crate::economy::Economy;
use crate::growth::{self, Silhouette};
use crate::noise::fbm;
use crate::types::{Biome, ColonySnapshot, Vec2, WarpLevels};
use crate::worm::{MotionFrame, Worm};

/// Nutrients at which the radius bonus saturates.
const RADIUS_NUTRIENT_SATURATION: f64 = 1_400.0;

// ─── Warp ────────────────────────────────────────────────────────────────────

/// Transient excitement accumulators, each in [0, 1] and decaying
/// exponentially with its own time constant.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Warp {
    pub feed: f64,
    pub volume: f64,
    pub storm: f64,
}

impl Warp {
    pub fn pulse_feed(&mut self, amount: f64) {
        self.feed = (self.feed + amount.max(0.0)).min(1.0);
    }

    pub fn pulse_volume(&mut self, amount: f64) {
        self.volume = (self.volume + amount.max(0.0)).min(1.0);
    }

    pub fn pulse_storm(&mut self, amount: f64) {
        self.storm = (self.storm + amount.max(0.0)).min(1.0);
    }

    pub fn decay(&mut self, dt: f64, params: &ColonyParams) {
        self.feed *= (-dt / params.warp_feed_tau).exp();
        self.volume *= (-dt / params.warp_volume_tau).exp();
        self.storm *= (-dt / params.warp_storm_tau).exp();
    }

    pub fn total(&self) -> f64 {
        self.feed + self.volume + self.storm
    }

    pub fn levels(&self) -> WarpLevels {
        WarpLevels {
            feed: self.feed,
            volume: self.volume,
            storm: self.storm,
        }
    }
}

// ─── Colony ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Colony {
    pub id: u32,
    pub center: Vec2,
    /// Point the drifting center is tethered to.
    pub home: Vec2,
    pub radius: f64,
    pub dna: Dna,
    pub biome: Biome,
    pub shape: Silhouette,
    pub warp: Warp,
    pub worms: Vec<Worm>,
    pub mutation_count: u32,
}

impl Colony {
    /// Found a colony with fresh DNA, biome and limb layout. The worm list
    /// starts empty; the population manager seeds it.
    pub fn found<R: Rng>(id: u32, center: Vec2, params: &ColonyParams, rng: &mut R) -> Self {
        let radius = if id == 1 {
            params.base_radius
        } else {
            params.secondary_base_radius
        };
        Self {
            id,
            center,
            home: center,
            radius,
            dna: Dna::random(id, rng),
            biome: Biome::ALL[rng.gen_range(0..Biome::ALL.len())],
            shape: Silhouette::random(rng),
            warp: Warp::default(),
            worms: Vec::new(),
            mutation_count: 0,
        }
    }

    pub fn is_primary(&self) -> bool {
        self.id == 1
    }

    /// Radius the colony is easing toward: logarithmic in market cap plus a
    /// nutrient bonus. Secondary colonies grow slower and cap lower.
    pub fn target_radius(&self, economy: &Economy, params: &ColonyParams) -> f64 {
        let log_cap = economy.market_cap.max(10.0).log10() - 3.7;
        let bonus = economy.nutrient_factor(RADIUS_NUTRIENT_SATURATION) * params.nutrient_radius_bonus;
        if self.is_primary() {
            let (lo, hi) = params.radius_clamp;
            (params.base_radius + log_cap * params.radius_per_log + bonus).clamp(lo, hi)
        } else {
            let (lo, hi) = params.secondary_radius_clamp;
            (params.secondary_base_radius + log_cap * params.radius_per_log * 0.45 + bonus * 0.6)
                .clamp(lo, hi)
        }
    }

    /// Limb recompute, radius smoothing, territory drift and warp decay.
    pub fn update_territory(&mut self, dt: f64, t: f64, economy: &Economy, params: &ColonyParams) {
        self.shape.grow(economy.market_cap, params);

        let target = self.target_radius(economy, params);
        self.radius += (target - self.radius) * (1.0 - (-dt * params.radius_smoothing).exp());

        // Drift speed in units per 60 Hz frame.
        let drift = 0.06 + self.dna.temper * 0.08;
        let id = self.id as f64;
        let wander = Vec2::new(fbm(t * 0.12 + id * 10.0), fbm(t * 0.11 + id * 20.0));
        self.center += wander * (drift * 60.0 * dt);
        self.center = self.center.lerp(self.home, 1.0 - (-dt * params.home_pull).exp());

        self.warp.decay(dt, params);
    }

    /// Run the motion solver over every worm.
    pub fn advance_worms<R: Rng>(
        &mut self,
        dt: f64,
        t: f64,
        params: &ColonyParams,
        motion: &MotionParams,
        rng: &mut R,
    ) {
        let frame = MotionFrame {
            center: self.center,
            radius: self.radius,
            t,
            spin: t * params.spin_rate,
            warp: self.warp.total(),
            shape: &self.shape,
            dna: &self.dna,
        };
        for worm in self.worms.iter_mut() {
            worm.step(&frame, motion, dt, rng);
        }
    }

    pub fn outline(&self, t: f64, samples: usize, params: &ColonyParams) -> Vec<Vec2> {
        growth::outline(
            self.center,
            self.radius,
            &self.shape,
            self.warp.total(),
            t * params.spin_rate,
            t,
            samples,
        )
    }

    pub fn mutated_worms(&self) -> usize {
        self.worms.iter().filter(|w| w.mutation_count > 0).count()
    }

    pub fn snapshot(&self, selected: bool) -> ColonySnapshot {
        ColonySnapshot {
            id: self.id,
            center: self.center,
            radius: self.radius,
            dna: self.dna.clone(),
            biome: self.biome,
            limb_count: self.shape.limb_count,
            limb_strength: self.shape.limb_strength,
            warp: self.warp.levels(),
            worm_count: self.worms.len(),
            mutated_worms: self.mutated_worms(),
            mutation_count: self.mutation_count,
            selected,
        }
    }
}
