// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Colony Simulation Suite ("The Petri Dish") - Event Log

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::dna::DnaLabel;
use crate::mutation::MutationCause;

/// Entries kept for the host's activity feed.
pub const EVENT_LOG_CAPACITY: usize = 18;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    Info { message: String },
    Milestone { threshold: f64 },
    ColonyFounded { colony_id: u32, label: DnaLabel, market_cap: f64 },
    Mutation { colony_id: u32, worm_index: usize, cause: MutationCause },
    BossSpawned { colony_id: u32 },
    ColonySelected { colony_id: u32 },
    Reset,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimEvent {
    /// Simulation time in seconds.
    pub time: f64,
    #[serde(flatten)]
    pub kind: EventKind,
}

/// Bounded feed of recent events plus the batch produced since the last
/// drain. Every entry is also forwarded to the `log` facade.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    recent: VecDeque<SimEvent>,
    pending: Vec<SimEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, time: f64, kind: EventKind) {
        match &kind {
            EventKind::Mutation { colony_id, worm_index, cause } => {
                log::debug!("t={:.2} mutation ({:?}) colony {} worm {}", time, cause, colony_id, worm_index);
            }
            EventKind::Milestone { threshold } => {
                log::info!("t={:.2} market cap milestone {:.0}", time, threshold);
            }
            EventKind::ColonyFounded { colony_id, label, market_cap } => {
                log::info!(
                    "t={:.2} colony {} founded [{}] at mcap {:.0}",
                    time,
                    colony_id,
                    label.as_str(),
                    market_cap
                );
            }
            other => log::info!("t={:.2} {:?}", time, other),
        }

        let event = SimEvent { time, kind };
        self.recent.push_front(event.clone());
        self.recent.truncate(EVENT_LOG_CAPACITY);
        self.pending.push(event);
    }

    pub fn info(&mut self, time: f64, message: impl Into<String>) {
        self.push(time, EventKind::Info { message: message.into() });
    }

    /// Events since the last call, oldest first.
    pub fn take_pending(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Newest first.
    pub fn recent(&self) -> impl Iterator<Item = &SimEvent> {
        self.recent.iter()
    }
}
