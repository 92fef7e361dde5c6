// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Colony Simulation Suite ("The Petri Dish") - Economic Driver

//! Simulated buyers, trade volume and market cap, converted into the
//! depletable nutrients pool that feeds colony growth.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::EconomyParams;

/// What a single buy changed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BuyReceipt {
    pub buyers: u64,
    pub volume: f64,
    pub market_cap: f64,
    pub nutrients: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Economy {
    pub buyers: u64,
    pub volume: f64,
    pub market_cap: f64,
    pub nutrients: f64,
}

impl Economy {
    pub fn new(params: &EconomyParams) -> Self {
        Self {
            buyers: 0,
            volume: 0.0,
            market_cap: params.start_market_cap.max(params.min_market_cap),
            nutrients: 0.0,
        }
    }

    /// Record a buy. `intensity` scales volume and market-cap impact; the
    /// caller has already checked it is positive and finite.
    pub fn apply_buy<R: Rng>(
        &mut self,
        intensity: f64,
        params: &EconomyParams,
        rng: &mut R,
    ) -> BuyReceipt {
        let buyers = if rng.gen_bool(params.double_buyer_chance) { 2 } else { 1 };
        let volume = sample(rng, params.buy_volume) * intensity;
        let market_cap = volume * sample(rng, params.buy_impact);
        let nutrients = buyers as f64 * params.nutrients_per_buyer
            + volume * params.nutrients_per_volume
            + market_cap * params.nutrients_per_market_cap;

        self.buyers += buyers;
        self.volume += volume;
        self.market_cap = (self.market_cap + market_cap).max(params.min_market_cap);
        self.nutrients = (self.nutrients + nutrients).max(0.0);

        BuyReceipt {
            buyers,
            volume,
            market_cap,
            nutrients,
        }
    }

    /// Continuous drip from current activity, then decay. Never negative.
    pub fn tick(&mut self, dt: f64, params: &EconomyParams) {
        let drip = self.buyers as f64 * params.drip_per_buyer
            + self.volume * params.drip_per_volume
            + self.market_cap * params.drip_per_market_cap;
        self.nutrients += drip * dt;
        self.nutrients = (self.nutrients - params.decay_rate * dt).max(0.0);
    }

    pub fn add_nutrients(&mut self, amount: f64) {
        self.nutrients = (self.nutrients + amount).max(0.0);
    }

    /// Spend nutrients if the pool covers `cost`; refuses rather than overdraws.
    pub fn try_spend(&mut self, cost: f64) -> bool {
        if self.nutrients >= cost {
            self.nutrients -= cost;
            true
        } else {
            false
        }
    }

    /// Nutrients as a fraction of `saturation`, clamped to [0, 1].
    pub fn nutrient_factor(&self, saturation: f64) -> f64 {
        (self.nutrients / saturation).clamp(0.0, 1.0)
    }
}

fn sample<R: Rng>(rng: &mut R, (min, max): (f64, f64)) -> f64 {
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_new_starts_at_configured_cap() {
        let econ = Economy::new(&EconomyParams::default());
        assert_eq!(econ.market_cap, 25_000.0);
        assert_eq!(econ.buyers, 0);
        assert_eq!(econ.nutrients, 0.0);
    }

    #[test]
    fn test_buy_increments_everything() {
        let params = EconomyParams::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut econ = Economy::new(&params);
        let receipt = econ.apply_buy(1.0, &params, &mut rng);
        assert!(receipt.buyers == 1 || receipt.buyers == 2);
        assert_eq!(econ.buyers, receipt.buyers);
        assert!(receipt.volume >= 180.0 && receipt.volume < 420.0);
        assert!(receipt.market_cap >= receipt.volume * 1.9);
        assert!((econ.market_cap - 25_000.0 - receipt.market_cap).abs() < 1e-9);
        assert!((econ.nutrients - receipt.nutrients).abs() < 1e-9);
    }

    #[test]
    fn test_intensity_scales_volume() {
        let params = EconomyParams {
            buy_volume: (100.0, 100.0),
            buy_impact: (2.0, 2.0),
            ..EconomyParams::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut econ = Economy::new(&params);
        let receipt = econ.apply_buy(3.0, &params, &mut rng);
        assert_eq!(receipt.volume, 300.0);
        assert_eq!(receipt.market_cap, 600.0);
    }

    #[test]
    fn test_buy_never_drives_nutrients_negative() {
        let params = EconomyParams {
            nutrients_per_buyer: -500.0,
            ..EconomyParams::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut econ = Economy::new(&params);
        econ.apply_buy(1.0, &params, &mut rng);
        assert_eq!(econ.nutrients, 0.0);
    }

    #[test]
    fn test_decay_floors_at_zero() {
        let params = EconomyParams::default();
        let mut econ = Economy::new(&params);
        econ.nutrients = 1.0;
        for _ in 0..100 {
            econ.tick(0.033, &params);
            assert!(econ.nutrients >= 0.0);
        }
        assert_eq!(econ.nutrients, 0.0);
    }

    #[test]
    fn test_drip_outpaces_decay_with_activity() {
        let params = EconomyParams::default();
        let mut econ = Economy::new(&params);
        econ.buyers = 20;
        econ.nutrients = 100.0;
        econ.tick(1.0, &params);
        // 20 * 0.9 + 25000 * 0.000004 - 4.0 > 0
        assert!(econ.nutrients > 100.0);
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let params = EconomyParams::default();
        let mut econ = Economy::new(&params);
        econ.buyers = 5;
        econ.nutrients = 42.0;
        let before = econ.clone();
        econ.tick(0.0, &params);
        assert_eq!(econ, before);
    }

    #[test]
    fn test_try_spend_refuses_overdraw() {
        let mut econ = Economy::new(&EconomyParams::default());
        econ.nutrients = 50.0;
        assert!(!econ.try_spend(55.0));
        assert_eq!(econ.nutrients, 50.0);
        assert!(econ.try_spend(50.0));
        assert_eq!(econ.nutrients, 0.0);
    }
}
