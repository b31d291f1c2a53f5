//! Spinner display of search progress

use crate::algorithm::search::{SearchMonitor, SearchStatistics};
use crate::io::configuration::{PROGRESS_REFRESH_NODES, PROGRESS_TICK_MS};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use std::time::Duration;

static SEARCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("{spinner:.cyan} [{elapsed_precise}] {prefix}: {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
});

/// Shows nodes explored and covers found while a search runs
///
/// The message is refreshed every `PROGRESS_REFRESH_NODES` nodes and on
/// every cover, so the search loop does not pay for formatting on each node.
pub struct ProgressManager {
    bar: ProgressBar,
    last_refresh: u64,
}

impl ProgressManager {
    /// Create a visible spinner labelled with the puzzle name
    pub fn new(label: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(SEARCH_STYLE.clone());
        bar.set_prefix(label.to_string());
        bar.enable_steady_tick(Duration::from_millis(PROGRESS_TICK_MS));
        Self {
            bar,
            last_refresh: 0,
        }
    }

    /// Create a manager that draws nothing
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            last_refresh: 0,
        }
    }

    /// Current status line
    pub fn message(&self) -> String {
        self.bar.message()
    }

    /// Remove the spinner from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    fn refresh(&mut self, statistics: &SearchStatistics) {
        self.last_refresh = statistics.nodes;
        self.bar.set_message(format!(
            "{} nodes, {} covers",
            statistics.nodes, statistics.covers
        ));
    }
}

impl SearchMonitor for ProgressManager {
    fn node_visited(&mut self, statistics: &SearchStatistics) {
        if statistics.nodes.saturating_sub(self.last_refresh) >= PROGRESS_REFRESH_NODES {
            self.refresh(statistics);
        }
    }

    fn solution_found(&mut self, statistics: &SearchStatistics) {
        self.refresh(statistics);
    }
}
