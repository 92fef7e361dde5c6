// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Colony Simulation Suite ("The Petri Dish") - Cooldowns

use serde::{Deserialize, Serialize};

/// Countdown gate shared by every periodic or rate-limited trigger
/// (steering re-rolls, kinks, bursts, ambient mutations).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Cooldown {
    remaining: f64,
}

impl Cooldown {
    /// A cooldown that expires after `secs`.
    pub fn new(secs: f64) -> Self {
        Self {
            remaining: secs.max(0.0),
        }
    }

    pub fn advance(&mut self, dt: f64) {
        self.remaining = (self.remaining - dt.max(0.0)).max(0.0);
    }

    pub fn is_ready(&self) -> bool {
        self.remaining <= 0.0
    }

    pub fn rearm(&mut self, secs: f64) {
        self.remaining = secs.max(0.0);
    }

    pub fn remaining(&self) -> f64 {
        self.remaining
    }

    /// Advance by `dt`; if that expires the cooldown, rearm it with
    /// `next()` and report the firing.
    pub fn cycle(&mut self, dt: f64, next: impl FnOnce() -> f64) -> bool {
        self.advance(dt);
        if self.is_ready() {
            self.rearm(next());
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_ready() {
        assert!(Cooldown::default().is_ready());
    }

    #[test]
    fn test_advance_to_expiry() {
        let mut cd = Cooldown::new(0.5);
        cd.advance(0.3);
        assert!(!cd.is_ready());
        cd.advance(0.3);
        assert!(cd.is_ready());
        assert_eq!(cd.remaining(), 0.0);
    }

    #[test]
    fn test_negative_dt_ignored() {
        let mut cd = Cooldown::new(1.0);
        cd.advance(-5.0);
        assert_eq!(cd.remaining(), 1.0);
    }

    #[test]
    fn test_cycle_rearms_once() {
        let mut cd = Cooldown::new(0.25);
        let mut fired = 0;
        for _ in 0..10 {
            if cd.cycle(0.125, || 2.0) {
                fired += 1;
            }
        }
        // Fires at t=0.25, then the remaining 1s of frames cannot cover the 2s rearm.
        assert_eq!(fired, 1);
        assert!((cd.remaining() - 1.0).abs() < 1e-9);
    }
}
