// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Colony Simulation Suite ("The Petri Dish") - Simulation Core

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use wasm_bindgen::prelude::*;

use crate::colony::Colony;
use crate::config::SimConfig;
use crate::economy::{BuyReceipt, Economy};
use crate::error::{ConfigError, SimError};
use crate::events::{EventKind, EventLog, SimEvent};
use crate::mutation::{self, AmbientMutator, MutationCause};
use crate::population;
use crate::types::*;

/// Largest frame delta the simulation will integrate, in seconds.
pub const MAX_DT: f64 = 0.033;

// ─── ColonySimulation struct ─────────────────────────────────────────────────

#[wasm_bindgen]
pub struct ColonySimulation {
    pub(crate) config: SimConfig,
    pub(crate) rng: ChaCha8Rng,
    pub(crate) economy: Economy,

    // Index i holds the colony with id i + 1.
    pub(crate) colonies: Vec<Colony>,

    pub(crate) sim_time: f64,
    pub(crate) frame: u64,
    pub(crate) next_split_threshold: f64,
    pub(crate) selected_colony_id: u32,
    pub(crate) view_center: Vec2,

    pub(crate) ambient: AmbientMutator,
    pub(crate) events: EventLog,
    /// Set once a milestone has been crossed with no room for a colony.
    pub(crate) cap_announced: bool,
}

// ─── Internal Logic (Testable, pure Rust) ────────────────────────────────────

impl ColonySimulation {
    /// Build a simulation from a config, rejecting invalid values.
    pub fn with_config(config: SimConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, ChaCha8Rng::seed_from_u64(seed), Vec2::ZERO))
    }

    pub(crate) fn build(config: SimConfig, rng: ChaCha8Rng, view_center: Vec2) -> Self {
        let mut sim = Self {
            economy: Economy::new(&config.economy),
            next_split_threshold: config.colony.split_step,
            config,
            rng,
            colonies: Vec::new(),
            sim_time: 0.0,
            frame: 0,
            selected_colony_id: 1,
            view_center,
            ambient: AmbientMutator::default(),
            events: EventLog::new(),
            cap_announced: false,
        };
        sim.found_colony(view_center);
        sim
    }

    fn found_colony(&mut self, center: Vec2) -> u32 {
        let id = self.colonies.len() as u32 + 1;
        let mut colony = Colony::found(id, center, &self.config.colony, &mut self.rng);
        let seeded = population::seed_initial(&mut colony, &self.config.worm, &mut self.rng);
        log::debug!("colony {} seeded with {} worms", id, seeded);
        self.colonies.push(colony);
        id
    }

    pub fn colony(&self, id: u32) -> Option<&Colony> {
        (id as usize).checked_sub(1).and_then(|i| self.colonies.get(i))
    }

    /// Advance the whole simulation by one frame.
    pub fn tick_core(&mut self, dt: f64) -> TickResult {
        let dt = if dt.is_finite() { dt.clamp(0.0, MAX_DT) } else { 0.0 };
        self.frame += 1;

        if dt > 0.0 {
            self.sim_time += dt;
            let t = self.sim_time;

            self.economy.tick(dt, &self.config.economy);
            self.spawn_milestone_colonies();
            self.roll_ambient_mutation(dt);

            for colony in self.colonies.iter_mut() {
                colony.update_territory(dt, t, &self.economy, &self.config.colony);
                colony.advance_worms(dt, t, &self.config.colony, &self.config.motion, &mut self.rng);
            }

            for colony in self.colonies.iter_mut() {
                let spawned = population::try_spawn_worms(
                    colony,
                    &mut self.economy,
                    &self.config.worm,
                    dt,
                    &mut self.rng,
                );
                if spawned > 0 {
                    log::debug!("colony {} grew by {} worms", colony.id, spawned);
                }
            }
        }

        TickResult {
            stats: self.stats(),
            events: self.events.take_pending(),
        }
    }

    /// Found every colony whose milestone the market cap has crossed.
    /// Drains all crossed thresholds at once, up to the colony limit.
    fn spawn_milestone_colonies(&mut self) {
        while self.colonies.len() < self.config.colony.max_colonies
            && self.economy.market_cap >= self.next_split_threshold
        {
            let threshold = self.next_split_threshold;
            let (lo, hi) = self.config.colony.spawn_distance;
            let angle = self.rng.gen_range(0.0..std::f64::consts::TAU);
            let distance = if hi > lo { self.rng.gen_range(lo..=hi) } else { lo };
            let center = self.view_center + Vec2::from_angle(angle) * distance;

            let id = self.found_colony(center);
            self.next_split_threshold += self.config.colony.split_step;

            let label = self.colonies[id as usize - 1].dna.label;
            self.events.push(self.sim_time, EventKind::Milestone { threshold });
            self.events.push(
                self.sim_time,
                EventKind::ColonyFounded {
                    colony_id: id,
                    label,
                    market_cap: self.economy.market_cap,
                },
            );

            if self.rng.gen_bool(self.config.mutation.milestone_chance) {
                self.mutate_in(self.selected_colony_id, MutationCause::Milestone);
            }
        }

        if !self.cap_announced
            && self.colonies.len() >= self.config.colony.max_colonies
            && self.economy.market_cap >= self.next_split_threshold
        {
            self.cap_announced = true;
            let message = format!(
                "Colony cap reached ({}). No more milestone splits.",
                self.config.colony.max_colonies
            );
            self.events.info(self.sim_time, message);
        }
    }

    fn roll_ambient_mutation(&mut self, dt: f64) {
        if self.colonies.is_empty() {
            return;
        }
        let params = &self.config.mutation;
        let factor = self.economy.nutrient_factor(params.nutrient_saturation);
        if self.ambient.roll(dt, factor, params, &mut self.rng) {
            let id = self.rng.gen_range(0..self.colonies.len()) as u32 + 1;
            self.mutate_in(id, MutationCause::Ambient);
        }
    }

    /// Mutate one random worm of colony `id` and record it.
    fn mutate_in(&mut self, id: u32, cause: MutationCause) -> bool {
        let time = self.sim_time;
        let Some(colony) = colony_by_id(&mut self.colonies, id) else {
            return false;
        };
        match mutation::mutate_random_worm(colony, &self.config.mutation, &mut self.rng) {
            Some(worm_index) => {
                self.events.push(
                    time,
                    EventKind::Mutation {
                        colony_id: id,
                        worm_index,
                        cause,
                    },
                );
                true
            }
            None => false,
        }
    }

    // ─── Stimulus ────────────────────────────────────────────────────────────

    /// Apply a buy of the given intensity to the economy and the selected
    /// colony. May spawn a boss worm, mutate a worm, or cross milestones.
    pub fn apply_buy(&mut self, intensity: f64) -> Result<BuyReceipt, SimError> {
        if !intensity.is_finite() || intensity <= 0.0 {
            log::warn!("rejected buy with intensity {}", intensity);
            return Err(SimError::InvalidIntensity(intensity));
        }

        let receipt = self.economy.apply_buy(intensity, &self.config.economy, &mut self.rng);

        let selected = self.selected_colony_id;
        let boss_chance = (self.config.worm.boss_chance_per_buy * intensity).min(1.0);
        let roll_boss = self.rng.gen_bool(boss_chance);
        let mut boss_spawned = false;
        if let Some(colony) = colony_by_id(&mut self.colonies, selected) {
            let params = &self.config.colony;
            colony.warp.pulse_feed(params.warp_feed_pulse * intensity.min(2.0));
            colony.warp.pulse_volume(receipt.volume * params.warp_volume_per_unit);
            if roll_boss {
                boss_spawned = population::spawn_boss(colony, &self.config.worm, &mut self.rng);
            }
        }
        if boss_spawned {
            self.events.push(self.sim_time, EventKind::BossSpawned { colony_id: selected });
        }

        if self.rng.gen_bool(mutation::buy_chance(intensity, &self.config.mutation)) {
            self.mutate_in(selected, MutationCause::Buy);
        }

        self.spawn_milestone_colonies();
        Ok(receipt)
    }

    /// Mutate up to `forced_count` worms of the selected colony and grant the
    /// nutrient bonus. Returns how many worms changed.
    pub fn force_mutation(&mut self) -> usize {
        let time = self.sim_time;
        let selected = self.selected_colony_id;

        let picked = match colony_by_id(&mut self.colonies, selected) {
            Some(colony) => mutation::force_mutation(colony, &self.config.mutation, &mut self.rng),
            None => Vec::new(),
        };
        for &worm_index in &picked {
            self.events.push(
                time,
                EventKind::Mutation {
                    colony_id: selected,
                    worm_index,
                    cause: MutationCause::Forced,
                },
            );
        }
        self.economy.add_nutrients(self.config.mutation.forced_bonus);
        picked.len()
    }

    pub fn select_colony(&mut self, id: u32) -> Result<(), SimError> {
        if self.colony(id).is_none() {
            log::warn!("select of unknown colony {}", id);
            return Err(SimError::UnknownColony(id));
        }
        if id != self.selected_colony_id {
            self.selected_colony_id = id;
            self.events.push(self.sim_time, EventKind::ColonySelected { colony_id: id });
        }
        Ok(())
    }

    /// Move the point new colonies spawn around. Existing colonies stay put.
    pub fn set_view_center(&mut self, x: f64, y: f64) {
        let center = Vec2::new(x, y);
        if center.is_finite() {
            self.view_center = center;
        }
    }

    /// Return to the initial state: one fresh colony, a fresh economy and an
    /// empty log. The config, the random stream and the view center carry over.
    pub fn reset(&mut self) {
        let config = self.config.clone();
        let rng = self.rng.clone();
        *self = Self::build(config, rng, self.view_center);
        self.events.push(0.0, EventKind::Reset);
    }

    // ─── Snapshots ───────────────────────────────────────────────────────────

    pub fn stats(&self) -> SimStats {
        SimStats {
            buyers: self.economy.buyers,
            volume: self.economy.volume,
            market_cap: self.economy.market_cap,
            nutrients: self.economy.nutrients,
            sim_time: self.sim_time,
            frame: self.frame,
            next_split_threshold: self.next_split_threshold,
            selected_colony_id: self.selected_colony_id,
            colony_count: self.colonies.len(),
            worm_count: self.total_worms(),
            mutation_count: self.colonies.iter().map(|c| c.mutation_count).sum(),
        }
    }

    pub fn colony_snapshots(&self) -> Vec<ColonySnapshot> {
        self.colonies
            .iter()
            .map(|c| c.snapshot(c.id == self.selected_colony_id))
            .collect()
    }

    pub fn worm_snapshots(&self) -> Vec<WormSnapshot> {
        self.colonies
            .iter()
            .flat_map(|c| c.worms.iter().map(move |w| w.snapshot(c.id)))
            .collect()
    }

    pub fn colony_outline(&self, id: u32, samples: usize) -> Result<Vec<Vec2>, SimError> {
        self.colony(id)
            .map(|c| c.outline(self.sim_time, samples, &self.config.colony))
            .ok_or(SimError::UnknownColony(id))
    }

    /// Recent events, newest first.
    pub fn events(&self) -> Vec<SimEvent> {
        self.events.recent().cloned().collect()
    }

    pub fn total_worms(&self) -> usize {
        self.colonies.iter().map(|c| c.worms.len()).sum()
    }

    pub fn colonies(&self) -> &[Colony] {
        &self.colonies
    }

    pub fn economy(&self) -> &Economy {
        &self.economy
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn selected_colony_id(&self) -> u32 {
        self.selected_colony_id
    }

    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }
}

fn colony_by_id(colonies: &mut [Colony], id: u32) -> Option<&mut Colony> {
    (id as usize).checked_sub(1).and_then(|i| colonies.get_mut(i))
}
