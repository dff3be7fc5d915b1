//! Generation statistics and the run history.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use wormfarm_agents::Worm;
use wormfarm_types::WormId;

use crate::generation::{GenerationEndReason, GenerationState};

/// Entries shown in the top-worm and top-ancestor tables.
pub const DEFAULT_TOP_N: usize = 5;

/// One row of the top-worm table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WormStanding {
    /// Worm identifier.
    pub id: WormId,
    /// Display name with generation numeral.
    pub full_name: String,
    /// Apples eaten.
    pub belly: u32,
    /// Generation number of the worm.
    pub generation: u32,
    /// Brain algorithm label.
    pub brain: String,
}

/// One row of the ancestor table: a family name and how many worms carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AncestorCount {
    /// Family name.
    pub last_name: String,
    /// Number of worms carrying it.
    pub count: u32,
    /// Generation in which the first listed carrier's founder appeared;
    /// zero means a pioneer of the first generation.
    pub ancestor_generation: u32,
}

/// Summary of an ended generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Generation index.
    pub generation: u32,
    /// Ticks run.
    pub ticks: u64,
    /// Why the generation ended, if it did.
    pub end_reason: Option<GenerationEndReason>,
    /// Apples in the batch.
    pub apples_total: u32,
    /// Apples eaten.
    pub apples_eaten: u32,
    /// Percentage of apples eaten, `0` for an empty batch.
    pub percent_eaten: f64,
    /// Apples eaten per worm, `0` for an empty population.
    pub food_per_worm: f64,
    /// Best foragers, highest belly first.
    pub top_worms: Vec<WormStanding>,
}

impl GenerationStats {
    /// Collect statistics from a generation, keeping `top_n` worms.
    pub fn collect(state: &GenerationState, top_n: usize) -> Self {
        let apples_total = u32::try_from(state.apples().len()).unwrap_or(u32::MAX);
        let apples_eaten = state.apples_eaten();
        let worm_count = u32::try_from(state.worms().len()).unwrap_or(u32::MAX);

        Self {
            generation: state.index(),
            ticks: state.tick(),
            end_reason: state.end_reason(),
            apples_total,
            apples_eaten,
            percent_eaten: ratio(apples_eaten, apples_total) * 100.0,
            food_per_worm: ratio(apples_eaten, worm_count),
            top_worms: top_worms(state.worms(), top_n),
        }
    }
}

fn ratio(numerator: u32, denominator: u32) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        f64::from(numerator) / f64::from(denominator)
    }
}

/// The `n` worms with the largest belly. Ties keep population order.
pub fn top_worms(worms: &[Worm], n: usize) -> Vec<WormStanding> {
    let mut ranked: Vec<&Worm> = worms.iter().collect();
    ranked.sort_by(|a, b| b.belly.cmp(&a.belly));
    ranked
        .into_iter()
        .take(n)
        .map(|w| WormStanding {
            id: w.id,
            full_name: w.full_name(),
            belly: w.belly,
            generation: w.identity.generation,
            brain: w.brain.label().to_owned(),
        })
        .collect()
}

/// The `n` most common family names in `worms`, most common first.
///
/// Applied to a freshly bred population this ranks lineages by how many
/// descendants they produced. Ties keep first-appearance order.
pub fn top_ancestors(worms: &[Worm], n: usize) -> Vec<AncestorCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<AncestorCount> = Vec::new();

    for worm in worms {
        let name = worm.identity.last_name.as_str();
        if let Some(entry) = index.get(name).and_then(|&i| counts.get_mut(i)) {
            entry.count = entry.count.saturating_add(1);
        } else {
            index.insert(name, counts.len());
            counts.push(AncestorCount {
                last_name: name.to_owned(),
                count: 1,
                ancestor_generation: worm.identity.ancestor_generation,
            });
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(n);
    counts
}

/// Per-generation series kept across a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunHistory {
    /// Percentage of apples eaten, one entry per generation.
    pub percent_eaten: Vec<f64>,
    /// Apples eaten per worm, one entry per generation.
    pub food_per_worm: Vec<f64>,
}

impl RunHistory {
    /// Append one generation's figures.
    pub fn record(&mut self, stats: &GenerationStats) {
        self.percent_eaten.push(stats.percent_eaten);
        self.food_per_worm.push(stats.food_per_worm);
    }

    /// Number of generations recorded.
    pub fn len(&self) -> usize {
        self.percent_eaten.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.percent_eaten.is_empty()
    }

    /// Highest food-per-worm value so far.
    pub fn best_food_per_worm(&self) -> Option<f64> {
        self.food_per_worm.iter().copied().reduce(f64::max)
    }
}
