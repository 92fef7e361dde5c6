// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Colony Simulation Suite ("The Petri Dish")

pub mod types;
pub mod config;
pub mod error;
pub mod simulation;

pub mod noise;
pub mod timer;
pub mod economy;
pub mod dna;
pub mod growth;
pub mod colony;
pub mod worm;
pub mod population;
pub mod mutation;
pub mod events;

pub use types::*;
pub use config::SimConfig;
pub use economy::{BuyReceipt, Economy};
pub use error::{ConfigError, SimError};
pub use events::{EventKind, SimEvent};
pub use simulation::ColonySimulation;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use wasm_bindgen::prelude::*;

// ─── WASM Interface ──────────────────────────────────────────────────────────

#[wasm_bindgen]
impl ColonySimulation {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> Self {
        #[cfg(target_arch = "wasm32")]
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));

        Self::build(SimConfig::default(), ChaCha8Rng::seed_from_u64(seed), Vec2::ZERO)
    }

    /// Construct from a partial config object; omitted fields keep defaults.
    #[wasm_bindgen(js_name = newWithConfig)]
    pub fn new_with_config(config: JsValue, seed: u64) -> Result<ColonySimulation, JsError> {
        #[cfg(target_arch = "wasm32")]
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));

        let config: SimConfig = if config.is_undefined() || config.is_null() {
            SimConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        Ok(Self::with_config(config, seed)?)
    }

    pub fn tick(&mut self, dt: f64) -> JsValue {
        let result = self.tick_core(dt);
        serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
    }

    #[wasm_bindgen(js_name = applyBuy)]
    pub fn js_apply_buy(&mut self, intensity: f64) -> Result<JsValue, JsError> {
        let receipt = self.apply_buy(intensity)?;
        Ok(serde_wasm_bindgen::to_value(&receipt).unwrap_or(JsValue::NULL))
    }

    #[wasm_bindgen(js_name = forceMutation)]
    pub fn js_force_mutation(&mut self) -> u32 {
        self.force_mutation() as u32
    }

    #[wasm_bindgen(js_name = selectColony)]
    pub fn js_select_colony(&mut self, id: u32) -> Result<(), JsError> {
        Ok(self.select_colony(id)?)
    }

    #[wasm_bindgen(js_name = setViewCenter)]
    pub fn js_set_view_center(&mut self, x: f64, y: f64) {
        self.set_view_center(x, y);
    }

    #[wasm_bindgen(js_name = reset)]
    pub fn js_reset(&mut self) {
        self.reset();
    }

    /// Run N frames of `dt` without returning results.
    #[wasm_bindgen(js_name = runBatch)]
    pub fn run_batch(&mut self, frames: u32, dt: f64) {
        for _ in 0..frames {
            self.tick_core(dt);
        }
    }

    #[wasm_bindgen(js_name = totalWorms)]
    pub fn js_total_worms(&self) -> u32 {
        self.total_worms() as u32
    }

    pub fn get_stats(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.stats()).unwrap_or(JsValue::NULL)
    }

    pub fn get_colonies(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.colony_snapshots()).unwrap_or(JsValue::NULL)
    }

    pub fn get_worms(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.worm_snapshots()).unwrap_or(JsValue::NULL)
    }

    /// Boundary points of colony `id`, or null if it does not exist.
    pub fn get_outline(&self, id: u32, samples: u32) -> JsValue {
        match self.colony_outline(id, samples as usize) {
            Ok(points) => serde_wasm_bindgen::to_value(&points).unwrap_or(JsValue::NULL),
            Err(_) => JsValue::NULL,
        }
    }

    pub fn get_events(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.events()).unwrap_or(JsValue::NULL)
    }

    pub fn get_config(&self) -> JsValue {
        serde_wasm_bindgen::to_value(self.config()).unwrap_or(JsValue::NULL)
    }
}
