// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Colony Simulation Suite ("The Petri Dish") - Type Definitions

use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use crate::dna::Dna;
use crate::events::SimEvent;

/// Length below which a vector is treated as degenerate when normalizing.
pub const EPSILON: f64 = 1e-3;

// ─── Vec2 ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn from_angle(angle: f64) -> Self {
        Self::new(angle.cos(), angle.sin())
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Unit vector, with the length clamped to `EPSILON` so a zero vector
    /// stays finite instead of producing NaN.
    pub fn normalize_or_zero(self) -> Self {
        self * (1.0 / self.length().max(EPSILON))
    }

    /// Counter-clockwise perpendicular.
    pub fn perp(self) -> Self {
        Self::new(-self.y, self.x)
    }

    pub fn lerp(self, other: Vec2, t: f64) -> Self {
        self + (other - self) * t
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

// ─── Biome ───────────────────────────────────────────────────────────────────

/// Backdrop theme for a colony. Cosmetic only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Biome {
    Tidepool = 0,
    Ember = 1,
    Moss = 2,
    Abyss = 3,
    Crystal = 4,
}

impl Biome {
    pub const ALL: [Biome; 5] = [
        Biome::Tidepool,
        Biome::Ember,
        Biome::Moss,
        Biome::Abyss,
        Biome::Crystal,
    ];
}

// ─── Warp levels ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct WarpLevels {
    pub feed: f64,
    pub volume: f64,
    pub storm: f64,
}

// ─── SimStats ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimStats {
    pub buyers: u64,
    pub volume: f64,
    pub market_cap: f64,
    pub nutrients: f64,
    pub sim_time: f64,
    pub frame: u64,
    pub next_split_threshold: f64,
    pub selected_colony_id: u32,
    pub colony_count: usize,
    pub worm_count: usize,
    pub mutation_count: u32,
}

// ─── TickResult ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct TickResult {
    pub stats: SimStats,
    /// Events emitted during this tick, oldest first.
    pub events: Vec<SimEvent>,
}

// ─── ColonySnapshot ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColonySnapshot {
    pub id: u32,
    pub center: Vec2,
    pub radius: f64,
    pub dna: Dna,
    pub biome: Biome,
    pub limb_count: u8,
    pub limb_strength: f64,
    pub warp: WarpLevels,
    pub worm_count: usize,
    /// Worms that have been mutated at least once.
    pub mutated_worms: usize,
    /// Mutation events applied to this colony's worms.
    pub mutation_count: u32,
    pub selected: bool,
}

// ─── WormSnapshot ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WormSnapshot {
    pub colony_id: u32,
    pub segments: Vec<Vec2>,
    pub head_radius: f64,
    pub hue: f64,
    pub saturation: f64,
    pub luminance: f64,
    pub is_boss: bool,
    pub mutation_level: f64,
    pub trail: Vec<Vec2>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_zero_is_finite() {
        let v = Vec2::ZERO.normalize_or_zero();
        assert!(v.is_finite());
        assert_eq!(v, Vec2::ZERO);
    }

    #[test]
    fn test_normalize_unit_length() {
        let v = Vec2::new(3.0, 4.0).normalize_or_zero();
        assert!((v.length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_perp_is_counter_clockwise() {
        let p = Vec2::new(1.0, 0.0).perp();
        assert_eq!(p, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_stats_serialize() {
        let stats = SimStats {
            buyers: 3,
            volume: 12.5,
            market_cap: 25_000.0,
            nutrients: 0.0,
            sim_time: 1.0,
            frame: 60,
            next_split_threshold: 50_000.0,
            selected_colony_id: 1,
            colony_count: 1,
            worm_count: 12,
            mutation_count: 0,
        };
        let json = serde_json::to_string(&stats).unwrap();
        let back: SimStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stats);
    }
}
