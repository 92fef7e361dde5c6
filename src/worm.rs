// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Colony Simulation Suite ("The Petri Dish") - Worms & Motion Solver

//! Segmented worms and the two-stage per-frame motion solver.
//!
//! Stage A steers the head: pull toward the colony's boundary orbit, slide
//! along its tangent, plus a periodically re-rolled steering bias and the
//! colony's DNA style term. Stage B drags the body behind the head with a
//! single-pass spring relaxation toward the target segment spacing.

use std::collections::VecDeque;
use std::f64::consts::{PI, TAU};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{MotionParams, WormParams};
use crate::dna::Dna;
use crate::growth::{self, Silhouette};
use crate::timer::Cooldown;
use crate::types::{Vec2, WormSnapshot, EPSILON};

// ─── OrbitDirection ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OrbitDirection {
    /// Angle increases over time.
    CounterClockwise,
    Clockwise,
}

impl OrbitDirection {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            Self::CounterClockwise
        } else {
            Self::Clockwise
        }
    }

    pub fn sign(self) -> f64 {
        match self {
            Self::CounterClockwise => 1.0,
            Self::Clockwise => -1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Self::CounterClockwise => Self::Clockwise,
            Self::Clockwise => Self::CounterClockwise,
        }
    }
}

// ─── MotionFrame ─────────────────────────────────────────────────────────────

/// Read-only view of the owning colony for one solver pass.
pub struct MotionFrame<'a> {
    pub center: Vec2,
    pub radius: f64,
    pub t: f64,
    /// Slow rotation of the silhouette, radians.
    pub spin: f64,
    /// Summed warp accumulators.
    pub warp: f64,
    pub shape: &'a Silhouette,
    pub dna: &'a Dna,
}

// ─── Worm ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Worm {
    /// Head first. The length never changes after spawn.
    pub segments: Vec<Vec2>,
    pub segment_spacing: f64,
    pub head_radius: f64,
    pub hue: f64,
    pub saturation: f64,
    pub luminance: f64,
    pub orbit: OrbitDirection,
    /// Bias toward the inner (negative) or outer (positive) orbit lane.
    pub lane_offset: f64,
    pub steer_vector: Vec2,
    pub steer_timer: Cooldown,
    pub is_boss: bool,
    /// Speed scale in [0.2, 1].
    pub energy: f64,
    /// Per-worm phase for style and kink waves.
    pub phase: f64,
    /// Temporary body wave amplitude, decays toward 0.
    pub kink: f64,
    pub kink_timer: Cooldown,
    /// Temporary speed boost, decays toward 0.
    pub burst: f64,
    pub burst_timer: Cooldown,
    pub mutation_level: f64,
    pub mutation_count: u32,
    /// Past head positions, newest first. Only bosses keep one.
    pub trail: VecDeque<Vec2>,
    pub trail_capacity: usize,
}

impl Worm {
    /// Spawn a worm near the colony center with its body coiled behind it.
    pub fn spawn<R: Rng>(
        center: Vec2,
        radius: f64,
        dna: &Dna,
        is_boss: bool,
        params: &WormParams,
        rng: &mut R,
    ) -> Self {
        let (lo, hi) = if is_boss { params.boss_segments } else { params.segments };
        let count = rng.gen_range(lo..=hi).max(2);

        let thickness = rng.gen_range(0.85..1.35) * if is_boss { 1.6 } else { 1.0 };
        let segment_spacing = (5.7 + thickness * 1.85) * rng.gen_range(0.85..1.15);
        let orbit = OrbitDirection::random(rng);

        let angle = rng.gen_range(0.0..TAU);
        let radial = Vec2::from_angle(angle);
        let head = center + radial * (radius * rng.gen_range(0.15..0.45));
        // Trail backwards along the orbit, curling slightly inward.
        let back = radial.perp() * -orbit.sign();
        let segments = (0..count)
            .map(|i| {
                let u = i as f64;
                head + back * (u * segment_spacing * 0.5) - radial * (u * 0.15)
            })
            .collect();

        let hue = (dna.hue_a + rng.gen_range(-12.0..12.0)).rem_euclid(360.0);
        Self {
            segments,
            segment_spacing,
            head_radius: 6.0 * thickness,
            hue,
            saturation: 95.0 - rng.gen_range(0.0..5.0),
            luminance: 66.0 + rng.gen_range(-4.0..4.0),
            orbit,
            lane_offset: rng.gen_range(-1.25..=1.25),
            steer_vector: Vec2::ZERO,
            steer_timer: Cooldown::default(),
            is_boss,
            energy: if is_boss { 1.0 } else { rng.gen_range(0.55..1.0) },
            phase: rng.gen_range(0.0..TAU),
            kink: 0.0,
            kink_timer: Cooldown::new(rng.gen_range(0.8..2.4)),
            burst: if is_boss { 0.6 } else { 0.0 },
            burst_timer: Cooldown::new(rng.gen_range(0.7..2.6)),
            mutation_level: 0.0,
            mutation_count: 0,
            trail: VecDeque::new(),
            trail_capacity: if is_boss { params.trail_length } else { 0 },
        }
    }

    pub fn head(&self) -> Vec2 {
        self.segments[0]
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Advance one frame: transients, head steering, body relaxation, trail.
    pub fn step<R: Rng>(&mut self, frame: &MotionFrame<'_>, params: &MotionParams, dt: f64, rng: &mut R) {
        self.update_transients(frame.dna, params, dt, rng);
        self.steer_head(frame, params, dt);
        self.relax_body(frame, params);

        if self.trail_capacity > 0 {
            self.trail.push_front(self.head());
            self.trail.truncate(self.trail_capacity);
        }
    }

    fn update_transients<R: Rng>(&mut self, dna: &Dna, params: &MotionParams, dt: f64, rng: &mut R) {
        let (lo, hi) = params.steer_interval;
        // Chaotic colonies re-roll steering more often.
        let chaos_scale = 0.6 + dna.chaos;
        if self.steer_timer.cycle(dt, || rng.gen_range(lo..=hi) / chaos_scale) {
            self.steer_vector = Vec2::from_angle(rng.gen_range(0.0..TAU)) * rng.gen_range(0.2..1.0);
        }

        if self.kink_timer.cycle(dt, || rng.gen_range(0.7..2.2))
            && rng.gen_bool(0.16 + dna.temper * 0.12)
        {
            self.kink = rng.gen_range(0.25..1.0);
        }
        self.kink = (self.kink - dt * 0.55).max(0.0);

        if self.burst_timer.cycle(dt, || rng.gen_range(0.6..2.4))
            && rng.gen_bool(0.17 + dna.temper * 0.08)
        {
            self.burst = rng.gen_range(0.25..1.05);
        }
        self.burst = (self.burst - dt * 0.75).max(0.0);
    }

    /// Stage A: head steering plus the leash.
    fn steer_head(&mut self, frame: &MotionFrame<'_>, params: &MotionParams, dt: f64) {
        let dna = frame.dna;
        let head = self.segments[0];
        let rel = head - frame.center;
        let dist = rel.length();
        let radial = if dist > EPSILON {
            rel * (1.0 / dist)
        } else {
            Vec2::from_angle(self.phase)
        };
        let theta = radial.angle();

        let mul = growth::boundary_multiplier(frame.shape, frame.warp, theta - frame.spin, frame.t);
        let orbit_radius = (frame.radius
            * params.orbit_fraction
            * mul
            * (1.0 + self.lane_offset * params.lane_spread))
            .min(frame.radius * params.soft_leash * 0.95);
        let boundary_point = frame.center + radial * orbit_radius;

        let to_boundary = boundary_point - head;
        let pull = to_boundary.normalize_or_zero()
            * (to_boundary.length() / (frame.radius * 0.25).max(EPSILON)).min(1.0);
        let tangent = radial.perp() * self.orbit.sign();
        let style = dna.style.perturbation(frame.t, self.phase, radial, tangent);

        let velocity = pull * params.pull_weight
            + tangent * (params.slide_weight * params.base_tangent_speed)
            + self.steer_vector * (params.steer_weight * (0.5 + dna.chaos))
            + style * params.style_weight;

        let boss = if self.is_boss { params.boss_speed } else { 1.0 };
        let speed = params.base_speed
            * self.energy
            * dna.speed
            * boss
            * (1.0 + self.burst * 1.2)
            * (1.0 + frame.warp.min(2.2) * 0.35);

        let mut head = head + velocity.normalize_or_zero() * (speed * dt);

        let soft = frame.radius * params.soft_leash;
        let hard = frame.radius * params.hard_leash;
        let rel = head - frame.center;
        let dist = rel.length();
        if dist > soft {
            let anchor = frame.center + rel * (soft / dist);
            head = head.lerp(anchor, 1.0 - (-params.leash_return * dt).exp());
        }
        let rel = head - frame.center;
        let dist = rel.length();
        if dist > hard {
            head = frame.center + rel * (hard / dist);
        }

        self.segments[0] = head;
    }

    /// Stage B: one tail-ward pass of distance relaxation.
    fn relax_body(&mut self, frame: &MotionFrame<'_>, params: &MotionParams) {
        let n = self.segments.len();
        if n < 2 {
            return;
        }
        let dna = frame.dna;
        let (lo, hi) = params.elasticity;
        let elasticity = (lo + dna.temper * 0.08 + self.mutation_level * 0.10).clamp(lo, hi);
        let kink_amp = (0.22 + dna.wiggle * 0.35) * self.kink;

        for i in 1..n {
            let prev = self.segments[i - 1];
            let delta = self.segments[i] - prev;
            let dist = delta.length().max(EPSILON);

            let u = i as f64 / (n - 1) as f64;
            let belly = (u * PI).sin() * 0.35;
            let kink = (frame.t * 2.6 + i as f64 * 0.35 + self.phase).sin() * kink_amp;
            let target = self.segment_spacing + belly + kink;

            let correction = (dist - target) * elasticity;
            self.segments[i] -= delta * (correction / dist);
        }
    }

    pub fn snapshot(&self, colony_id: u32) -> WormSnapshot {
        WormSnapshot {
            colony_id,
            segments: self.segments.clone(),
            head_radius: self.head_radius,
            hue: self.hue,
            saturation: self.saturation,
            luminance: self.luminance,
            is_boss: self.is_boss,
            mutation_level: self.mutation_level,
            trail: self.trail.iter().copied().collect(),
        }
    }
}
