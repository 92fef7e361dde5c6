// Soak run results and the per-frame invariant checks.

use colony_engine::*;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub seed: u64,
    pub pass: bool,
    pub frames: u64,
    pub sim_seconds: f64,
    pub buys: u32,
    pub forced_mutations: u32,
    pub final_market_cap: f64,
    pub final_nutrients: f64,
    pub colonies: usize,
    pub worms: usize,
    pub mutations: u32,
    pub violations: Vec<String>,
    pub elapsed_ms: u128,
}

#[derive(Debug, Clone, Serialize)]
pub struct SoakSummary {
    pub runs: usize,
    pub passed: usize,
    pub failed: usize,
    pub seconds_per_run: f64,
    pub reports: Vec<RunReport>,
}

/// Tracks values that must only move one way between frames.
pub struct InvariantChecker {
    last: Option<SimStats>,
    /// Segment counts per worm, per colony.
    worm_segments: Vec<Vec<usize>>,
    pub violations: Vec<String>,
}

/// Stop collecting after this many so a broken run stays readable.
const MAX_VIOLATIONS: usize = 20;

impl InvariantChecker {
    pub fn new() -> Self {
        Self {
            last: None,
            worm_segments: Vec::new(),
            violations: Vec::new(),
        }
    }

    fn fail(&mut self, frame: u64, msg: String) {
        if self.violations.len() < MAX_VIOLATIONS {
            self.violations.push(format!("frame {}: {}", frame, msg));
        }
    }

    pub fn check(&mut self, sim: &ColonySimulation) {
        let stats = sim.stats();
        let frame = stats.frame;
        let config = sim.config();

        if stats.nutrients < 0.0 {
            self.fail(frame, format!("nutrients negative ({})", stats.nutrients));
        }
        if stats.market_cap < config.economy.min_market_cap {
            self.fail(frame, format!("market cap below floor ({})", stats.market_cap));
        }
        if stats.colony_count > config.colony.max_colonies {
            self.fail(frame, format!("{} colonies over limit", stats.colony_count));
        }

        for (i, colony) in sim.colonies().iter().enumerate() {
            if colony.id as usize != i + 1 {
                self.fail(frame, format!("colony at index {} has id {}", i, colony.id));
            }
            let leash = colony.radius * config.motion.hard_leash + 1e-6;
            for worm in &colony.worms {
                if !worm.segments.iter().all(|s| s.is_finite()) {
                    self.fail(frame, format!("non-finite segment in colony {}", colony.id));
                }
                let reach = (worm.head() - colony.center).length();
                if reach > leash {
                    self.fail(frame, format!("head {:.1} beyond leash {:.1}", reach, leash));
                }
            }
        }

        let segments: Vec<Vec<usize>> = sim
            .colonies()
            .iter()
            .map(|c| c.worms.iter().map(|w| w.segment_count()).collect())
            .collect();
        // Worms are only appended, so each old list must be a prefix of the new one.
        let broken: Vec<usize> = self
            .worm_segments
            .iter()
            .zip(segments.iter())
            .enumerate()
            .filter(|(_, (old, new))| !new.starts_with(old))
            .map(|(i, _)| i + 1)
            .collect();
        for id in broken {
            self.fail(frame, format!("worms of colony {} changed shape or vanished", id));
        }
        self.worm_segments = segments;

        if let Some(last) = self.last.take() {
            if stats.volume < last.volume {
                self.fail(frame, "volume decreased".to_string());
            }
            if stats.market_cap < last.market_cap {
                self.fail(frame, "market cap decreased".to_string());
            }
            if stats.sim_time < last.sim_time {
                self.fail(frame, "time went backwards".to_string());
            }
            if stats.colony_count < last.colony_count {
                self.fail(frame, "colony removed".to_string());
            }
        }
        self.last = Some(stats);
    }
}
