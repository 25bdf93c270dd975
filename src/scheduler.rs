//! Tick scheduling
//!
//! The table is tuned in per-frame units, so by default the host's frame
//! callback drives exactly one tick. A fixed-timestep mode decouples the
//! simulation rate from the display rate for deterministic runs.

use serde::{Deserialize, Serialize};

use crate::input::InputTracker;
use crate::sim::{GameState, StepReport, Table, tick};

/// Longest frame gap fed into the accumulator, in seconds
pub const MAX_FRAME_DT: f32 = 0.1;
/// Default cap on ticks per host frame in fixed mode
pub const DEFAULT_MAX_SUBSTEPS: u32 = 8;

/// How host frames turn into simulation ticks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum TimingMode {
    /// One tick per host frame, whatever the frame time
    #[default]
    HostFrame,
    /// Tick at a fixed rate, catching up with at most `max_substeps` ticks
    Fixed { hz: f32 },
}

impl TimingMode {
    /// Tick length in seconds, if fixed
    pub fn tick_dt(&self) -> Option<f32> {
        match self {
            TimingMode::HostFrame => None,
            TimingMode::Fixed { hz } => {
                let dt = 1.0 / *hz;
                (dt.is_finite() && dt > 0.0).then_some(dt)
            }
        }
    }
}

/// Drives `tick` from host frame callbacks
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    mode: TimingMode,
    max_substeps: u32,
    accumulator: f32,
}

impl FrameScheduler {
    pub fn new(mode: TimingMode, max_substeps: u32) -> Self {
        if matches!(mode, TimingMode::Fixed { .. }) && mode.tick_dt().is_none() {
            log::warn!("Fixed timing needs a positive finite rate, falling back to host frames");
        }
        Self {
            mode,
            max_substeps: max_substeps.max(1),
            accumulator: 0.0,
        }
    }

    pub fn mode(&self) -> TimingMode {
        self.mode
    }

    /// Run the ticks owed for a host frame that took `elapsed` seconds.
    ///
    /// Input is sampled once per tick; one-shot requests go to the first tick
    /// that runs and stay queued in the tracker if none does.
    pub fn advance(
        &mut self,
        state: &mut GameState,
        table: &Table,
        input: &mut InputTracker,
        elapsed: f32,
    ) -> StepReport {
        let Some(tick_dt) = self.mode.tick_dt() else {
            return tick(state, table, &input.sample());
        };

        self.accumulator += elapsed.clamp(0.0, MAX_FRAME_DT);

        let mut report = StepReport::default();
        let mut substeps = 0;
        while self.accumulator >= tick_dt && substeps < self.max_substeps {
            report.merge(tick(state, table, &input.sample()));
            self.accumulator -= tick_dt;
            substeps += 1;
        }

        if substeps == self.max_substeps && self.accumulator >= tick_dt {
            log::debug!(
                "Dropping {:.1} ticks of backlog",
                self.accumulator / tick_dt
            );
            self.accumulator %= tick_dt;
        }

        report
    }
}
