//! Generation callback that logs run progress.
//!
//! Stands in for a presentation layer: every tick counts as one draw, so
//! it consumes score flashes and reports tick progress at debug level.
//! Generation results, elapsed wall-clock time, and the ancestor table
//! are logged at info level.

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, info};
use wormfarm_core::{
    BreedingReport, GenerationCallback, GenerationState, GenerationStats, TickSummary,
};

/// Ticks between progress lines.
const PROGRESS_INTERVAL: u64 = 500;

/// Callback that logs progress and timing.
pub struct ProgressCallback {
    started_at: DateTime<Utc>,
    apples_eaten: u32,
}

impl ProgressCallback {
    /// Start timing from `started_at`.
    pub const fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            apples_eaten: 0,
        }
    }

    /// Elapsed wall-clock time since the run started, as `HH:MM:SS`.
    pub fn elapsed(&self) -> String {
        format_elapsed(Utc::now().signed_duration_since(self.started_at))
    }
}

impl GenerationCallback for ProgressCallback {
    fn on_tick(&mut self, summary: &TickSummary, state: &mut GenerationState) {
        if summary.apples_eaten_total > self.apples_eaten {
            self.apples_eaten = summary.apples_eaten_total;
        }
        // Each tick is one draw in headless mode.
        let scoring = state.consume_score_flashes();
        if summary.tick % PROGRESS_INTERVAL == 0 {
            debug!(
                generation = state.index(),
                tick = summary.tick,
                apples_eaten = self.apples_eaten,
                moved = summary.moved,
                turned = summary.turned,
                blocked = summary.blocked,
                scoring,
                "Tick progress"
            );
        }
    }

    fn on_generation_end(&mut self, stats: &GenerationStats) {
        self.apples_eaten = 0;
        info!(
            generation = stats.generation,
            elapsed = %self.elapsed(),
            percent_eaten = format!("{:.2}", stats.percent_eaten),
            food_per_worm = format!("{:.2}", stats.food_per_worm),
            "Generation summary"
        );
        for worm in &stats.top_worms {
            info!(name = %worm.full_name, apples = worm.belly, brain = %worm.brain, "Top worm");
        }
    }

    fn on_breed(&mut self, report: &BreedingReport) {
        info!(
            generation = report.generation,
            offspring = report.offspring,
            founders = report.founders,
            "Breeding complete"
        );
        for ancestor in &report.top_ancestors {
            let origin = if ancestor.ancestor_generation == 0 {
                "Pioneer".to_owned()
            } else {
                ancestor.ancestor_generation.to_string()
            };
            info!(
                family = %ancestor.last_name,
                descendants = ancestor.count,
                origin = %origin,
                "Top ancestor"
            );
        }
    }
}

/// Format a duration as `HH:MM:SS`. Negative durations read as zero.
pub fn format_elapsed(elapsed: TimeDelta) -> String {
    let total = u64::try_from(elapsed.num_seconds()).unwrap_or(0);
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}
