// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Colony Simulation Suite ("The Petri Dish") - Configuration

//! Tunable constants for every subsystem.
//!
//! The defaults form one internally consistent set. Every section is
//! `#[serde(default)]`, so a host may pass a partial object and only override
//! the fields it cares about.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ─── SimConfig ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    pub economy: EconomyParams,
    pub colony: ColonyParams,
    pub worm: WormParams,
    pub motion: MotionParams,
    pub mutation: MutationParams,
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.economy.validate()?;
        self.colony.validate()?;
        self.worm.validate()?;
        self.motion.validate()?;
        self.mutation.validate()
    }
}

// ─── Economy ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EconomyParams {
    pub start_market_cap: f64,
    pub min_market_cap: f64,
    /// Volume added by a buy of intensity 1, drawn uniformly from this range.
    pub buy_volume: (f64, f64),
    /// Market-cap impact as a multiple of the buy's volume.
    pub buy_impact: (f64, f64),
    /// Probability that a buy brings two buyers instead of one.
    pub double_buyer_chance: f64,
    pub nutrients_per_buyer: f64,
    pub nutrients_per_volume: f64,
    pub nutrients_per_market_cap: f64,
    /// Continuous nutrient loss per second.
    pub decay_rate: f64,
    pub drip_per_buyer: f64,
    pub drip_per_volume: f64,
    pub drip_per_market_cap: f64,
}

impl Default for EconomyParams {
    fn default() -> Self {
        Self {
            start_market_cap: 25_000.0,
            min_market_cap: 1_000.0,
            buy_volume: (180.0, 420.0),
            buy_impact: (1.9, 2.8),
            double_buyer_chance: 0.2,
            nutrients_per_buyer: 6.0,
            nutrients_per_volume: 0.10,
            nutrients_per_market_cap: 0.004,
            decay_rate: 4.0,
            drip_per_buyer: 0.9,
            drip_per_volume: 0.000_02,
            drip_per_market_cap: 0.000_004,
        }
    }
}

impl EconomyParams {
    fn validate(&self) -> Result<(), ConfigError> {
        positive("economy.start_market_cap", self.start_market_cap)?;
        positive("economy.min_market_cap", self.min_market_cap)?;
        range("economy.buy_volume", self.buy_volume)?;
        range("economy.buy_impact", self.buy_impact)?;
        within("economy.double_buyer_chance", self.double_buyer_chance, 0.0, 1.0)?;
        non_negative("economy.nutrients_per_buyer", self.nutrients_per_buyer)?;
        non_negative("economy.nutrients_per_volume", self.nutrients_per_volume)?;
        non_negative("economy.nutrients_per_market_cap", self.nutrients_per_market_cap)?;
        non_negative("economy.drip_per_buyer", self.drip_per_buyer)?;
        non_negative("economy.drip_per_volume", self.drip_per_volume)?;
        non_negative("economy.drip_per_market_cap", self.drip_per_market_cap)?;
        non_negative("economy.decay_rate", self.decay_rate)
    }
}

// ─── Colony ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColonyParams {
    pub max_colonies: usize,
    /// Market-cap increment between colony milestones.
    pub split_step: f64,
    /// Spawn distance of a new colony from the view center.
    pub spawn_distance: (f64, f64),
    pub base_radius: f64,
    pub secondary_base_radius: f64,
    pub radius_per_log: f64,
    pub radius_clamp: (f64, f64),
    pub secondary_radius_clamp: (f64, f64),
    /// Extra radius at full nutrient saturation.
    pub nutrient_radius_bonus: f64,
    /// Rate of the exponential radius smoothing, per second.
    pub radius_smoothing: f64,
    /// Rate at which a drifting colony is pulled back toward its home point.
    pub home_pull: f64,
    /// Limb growth starts at this market cap.
    pub limb_onset: f64,
    pub limb_count_span: f64,
    pub limb_strength_span: f64,
    pub limb_strength_cap: f64,
    /// Rotation of the silhouette, radians per second.
    pub spin_rate: f64,
    pub warp_feed_tau: f64,
    pub warp_volume_tau: f64,
    pub warp_storm_tau: f64,
    /// Feed excitement added by a buy of intensity 1.
    pub warp_feed_pulse: f64,
    /// Volume excitement added per unit of traded volume.
    pub warp_volume_per_unit: f64,
}

impl Default for ColonyParams {
    fn default() -> Self {
        Self {
            max_colonies: 8,
            split_step: 50_000.0,
            spawn_distance: (300.0, 620.0),
            base_radius: 70.0,
            secondary_base_radius: 52.0,
            radius_per_log: 22.0,
            radius_clamp: (55.0, 245.0),
            secondary_radius_clamp: (45.0, 160.0),
            nutrient_radius_bonus: 14.0,
            radius_smoothing: 3.0,
            home_pull: 0.35,
            limb_onset: 50_000.0,
            limb_count_span: 300_000.0,
            limb_strength_span: 250_000.0,
            limb_strength_cap: 1.2,
            spin_rate: 0.05,
            warp_feed_tau: 6.5,
            warp_volume_tau: 10.0,
            warp_storm_tau: 8.0,
            warp_feed_pulse: 0.35,
            warp_volume_per_unit: 1.0 / 1_200.0,
        }
    }
}

impl ColonyParams {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_colonies == 0 {
            return Err(ConfigError::NoColonies);
        }
        positive("colony.split_step", self.split_step)?;
        range("colony.spawn_distance", self.spawn_distance)?;
        positive("colony.base_radius", self.base_radius)?;
        positive("colony.secondary_base_radius", self.secondary_base_radius)?;
        range("colony.radius_clamp", self.radius_clamp)?;
        range("colony.secondary_radius_clamp", self.secondary_radius_clamp)?;
        non_negative("colony.nutrient_radius_bonus", self.nutrient_radius_bonus)?;
        non_negative("colony.radius_smoothing", self.radius_smoothing)?;
        non_negative("colony.home_pull", self.home_pull)?;
        positive("colony.limb_count_span", self.limb_count_span)?;
        positive("colony.limb_strength_span", self.limb_strength_span)?;
        positive("colony.limb_strength_cap", self.limb_strength_cap)?;
        positive("colony.warp_feed_tau", self.warp_feed_tau)?;
        positive("colony.warp_volume_tau", self.warp_volume_tau)?;
        positive("colony.warp_storm_tau", self.warp_storm_tau)
    }
}

// ─── Worm population ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WormParams {
    /// Worms seeded into every new colony (inclusive range).
    pub initial_worms: (usize, usize),
    pub segments: (usize, usize),
    pub boss_segments: (usize, usize),
    pub soft_cap_base: usize,
    pub soft_cap_min: usize,
    pub soft_cap_max: usize,
    /// Nutrients per extra worm slot above the base soft cap.
    pub nutrients_per_slot: f64,
    /// Boss spawns ignore the soft cap but never exceed this.
    pub hard_cap: usize,
    /// Nutrients must exceed this before any worm spawns.
    pub spawn_threshold: f64,
    pub spawn_cost: f64,
    /// Expected spawn attempts per second while affordable.
    pub spawn_rate: f64,
    pub boss_chance_per_buy: f64,
    pub trail_length: usize,
}

impl Default for WormParams {
    fn default() -> Self {
        Self {
            initial_worms: (10, 15),
            segments: (26, 48),
            boss_segments: (54, 66),
            soft_cap_base: 20,
            soft_cap_min: 18,
            soft_cap_max: 48,
            nutrients_per_slot: 450.0,
            hard_cap: 52,
            spawn_threshold: 70.0,
            spawn_cost: 55.0,
            spawn_rate: 9.0,
            boss_chance_per_buy: 0.04,
            trail_length: 48,
        }
    }
}

impl WormParams {
    fn validate(&self) -> Result<(), ConfigError> {
        range_usize("worm.initial_worms", self.initial_worms)?;
        range_usize("worm.segments", self.segments)?;
        range_usize("worm.boss_segments", self.boss_segments)?;
        if self.segments.0 < 2 {
            return Err(ConfigError::OutOfRange {
                field: "worm.segments",
                value: self.segments.0 as f64,
                min: 2.0,
                max: f64::INFINITY,
            });
        }
        if self.soft_cap_min > self.soft_cap_max {
            return Err(ConfigError::InvertedRange {
                field: "worm.soft_cap",
                min: self.soft_cap_min as f64,
                max: self.soft_cap_max as f64,
            });
        }
        positive("worm.nutrients_per_slot", self.nutrients_per_slot)?;
        positive("worm.spawn_cost", self.spawn_cost)?;
        within("worm.boss_chance_per_buy", self.boss_chance_per_buy, 0.0, 1.0)
    }
}

// ─── Motion ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MotionParams {
    /// Head speed in world units per second before energy/DNA scaling.
    pub base_speed: f64,
    pub boss_speed: f64,
    /// Orbit radius as a fraction of the boundary radius.
    pub orbit_fraction: f64,
    pub lane_spread: f64,
    pub pull_weight: f64,
    pub slide_weight: f64,
    pub base_tangent_speed: f64,
    pub steer_weight: f64,
    pub style_weight: f64,
    pub steer_interval: (f64, f64),
    /// Heads beyond `radius * soft_leash` are eased back.
    pub soft_leash: f64,
    /// Heads never sit beyond `radius * hard_leash`.
    pub hard_leash: f64,
    pub leash_return: f64,
    /// Spring relaxation factor range for body segments.
    pub elasticity: (f64, f64),
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            base_speed: 42.0,
            boss_speed: 1.6,
            orbit_fraction: 0.78,
            lane_spread: 0.12,
            pull_weight: 1.1,
            slide_weight: 1.0,
            base_tangent_speed: 1.0,
            steer_weight: 0.35,
            style_weight: 0.4,
            steer_interval: (0.6, 2.2),
            soft_leash: 1.2,
            hard_leash: 1.3,
            leash_return: 6.0,
            elasticity: (0.4, 0.6),
        }
    }
}

impl MotionParams {
    fn validate(&self) -> Result<(), ConfigError> {
        positive("motion.base_speed", self.base_speed)?;
        range("motion.steer_interval", self.steer_interval)?;
        positive("motion.soft_leash", self.soft_leash)?;
        if self.soft_leash > self.hard_leash {
            return Err(ConfigError::InvertedRange {
                field: "motion.leash",
                min: self.soft_leash,
                max: self.hard_leash,
            });
        }
        range("motion.elasticity", self.elasticity)?;
        within("motion.elasticity.min", self.elasticity.0, f64::MIN_POSITIVE, 1.0)?;
        within("motion.elasticity.max", self.elasticity.1, f64::MIN_POSITIVE, 1.0)
    }
}

// ─── Mutation ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MutationParams {
    /// Ambient chance per 60 Hz frame with no nutrients.
    pub base_chance: f64,
    /// Extra ambient chance per frame at full nutrient saturation.
    pub scale_chance: f64,
    /// Nutrients at which the ambient chance saturates.
    pub nutrient_saturation: f64,
    pub ambient_cooldown: f64,
    pub forced_count: usize,
    pub forced_bonus: f64,
    pub buy_chance: f64,
    pub buy_chance_per_intensity: f64,
    pub buy_chance_cap: f64,
    pub milestone_chance: f64,
    /// Maximum hue shift in degrees.
    pub hue_shift: f64,
    pub saturation_shift: f64,
    pub luminance_shift: f64,
    /// Maximum multiplicative change of head radius and spacing.
    pub size_scale: f64,
    pub energy_shift: f64,
    pub flip_chance: f64,
    pub storm_pulse: f64,
}

impl Default for MutationParams {
    fn default() -> Self {
        Self {
            base_chance: 0.004,
            scale_chance: 0.02,
            nutrient_saturation: 1_400.0,
            ambient_cooldown: 0.85,
            forced_count: 3,
            forced_bonus: 120.0,
            buy_chance: 0.11,
            buy_chance_per_intensity: 0.05,
            buy_chance_cap: 0.12,
            milestone_chance: 0.65,
            hue_shift: 20.0,
            saturation_shift: 6.0,
            luminance_shift: 5.0,
            size_scale: 0.10,
            energy_shift: 0.15,
            flip_chance: 0.25,
            storm_pulse: 0.45,
        }
    }
}

impl MutationParams {
    fn validate(&self) -> Result<(), ConfigError> {
        within("mutation.base_chance", self.base_chance, 0.0, 1.0)?;
        within("mutation.scale_chance", self.scale_chance, 0.0, 1.0)?;
        positive("mutation.nutrient_saturation", self.nutrient_saturation)?;
        non_negative("mutation.ambient_cooldown", self.ambient_cooldown)?;
        non_negative("mutation.forced_bonus", self.forced_bonus)?;
        within("mutation.size_scale", self.size_scale, 0.0, 0.5)?;
        within("mutation.flip_chance", self.flip_chance, 0.0, 1.0)?;
        within("mutation.milestone_chance", self.milestone_chance, 0.0, 1.0)
    }
}

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    within(field, value, 0.0, f64::MAX)
}

fn within(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value, min, max })
    }
}

fn range(field: &'static str, (min, max): (f64, f64)) -> Result<(), ConfigError> {
    if !min.is_finite() || !max.is_finite() {
        return Err(ConfigError::OutOfRange {
            field,
            value: if min.is_finite() { max } else { min },
            min: f64::MIN,
            max: f64::MAX,
        });
    }
    if min > max {
        return Err(ConfigError::InvertedRange { field, min, max });
    }
    Ok(())
}

fn range_usize(field: &'static str, (min, max): (usize, usize)) -> Result<(), ConfigError> {
    if min > max {
        return Err(ConfigError::InvertedRange {
            field,
            min: min as f64,
            max: max as f64,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(SimConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_zero_split_step_rejected() {
        let mut config = SimConfig::default();
        config.colony.split_step = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive { field: "colony.split_step", .. })
        ));
    }

    #[test]
    fn test_no_colonies_rejected() {
        let mut config = SimConfig::default();
        config.colony.max_colonies = 0;
        assert_eq!(config.validate(), Err(ConfigError::NoColonies));
    }

    #[test]
    fn test_inverted_segments_rejected() {
        let mut config = SimConfig::default();
        config.worm.segments = (40, 30);
        assert!(matches!(config.validate(), Err(ConfigError::InvertedRange { .. })));
    }

    #[test]
    fn test_elasticity_above_one_rejected() {
        let mut config = SimConfig::default();
        config.motion.elasticity = (0.5, 1.5);
        assert!(matches!(config.validate(), Err(ConfigError::OutOfRange { .. })));
    }

    #[test]
    fn test_negative_nutrient_yields_rejected() {
        let cases: [(&str, fn(&mut EconomyParams)); 3] = [
            ("economy.nutrients_per_buyer", |e| e.nutrients_per_buyer = -500.0),
            ("economy.nutrients_per_volume", |e| e.nutrients_per_volume = -0.1),
            ("economy.nutrients_per_market_cap", |e| e.nutrients_per_market_cap = -0.01),
        ];
        for (name, tweak) in cases {
            let mut config = SimConfig::default();
            tweak(&mut config.economy);
            assert!(
                matches!(config.validate(), Err(ConfigError::OutOfRange { field, .. }) if field == name),
                "{} accepted",
                name
            );
        }
    }

    #[test]
    fn test_negative_drip_rejected() {
        let mut config = SimConfig::default();
        config.economy.drip_per_buyer = -1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange { field: "economy.drip_per_buyer", .. })
        ));
    }

    #[test]
    fn test_negative_smoothing_rates_rejected() {
        let mut config = SimConfig::default();
        config.colony.radius_smoothing = -40.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange { field: "colony.radius_smoothing", .. })
        ));

        let mut config = SimConfig::default();
        config.colony.home_pull = -0.35;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange { field: "colony.home_pull", .. })
        ));
    }

    #[test]
    fn test_non_positive_limb_strength_cap_rejected() {
        for cap in [-0.5, 0.0] {
            let mut config = SimConfig::default();
            config.colony.limb_strength_cap = cap;
            assert!(matches!(
                config.validate(),
                Err(ConfigError::NotPositive { field: "colony.limb_strength_cap", .. })
            ));
        }
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let json = r#"{ "worm": { "initial_worms": [5, 5] } }"#;
        let config: SimConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.worm.initial_worms, (5, 5));
        assert_eq!(config.worm.spawn_cost, WormParams::default().spawn_cost);
        assert_eq!(config.colony, ColonyParams::default());
    }
}
