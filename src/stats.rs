// Search statistics
//
// Counters one agent accumulates across its lifetime: decisions made, depth
// iterations completed, and node totals for the averages reported at the end
// of a run. The averages are derived on demand and guard against empty
// counters, so a report before the first decision prints zeros.

use std::fmt;

use serde::Serialize;

/// Node and depth counters owned by one agent
#[derive(Debug, Default, Clone, Copy)]
pub struct SearchStats {
    decisions: u64,
    depths_completed: u64,
    nodes: u64,
    children: u64,
    parents: u64,
}

impl SearchStats {
    /// Marks the start of one decision
    pub fn record_decision(&mut self) {
        self.decisions += 1;
    }

    /// Marks one fully completed depth iteration
    pub fn record_completed_depth(&mut self) {
        self.depths_completed += 1;
    }

    /// Marks the root of a depth iteration: entered and expanded in one step
    pub fn record_root(&mut self) {
        self.nodes += 1;
        self.parents += 1;
    }

    /// Marks entry into a searched child node
    pub fn record_node(&mut self) {
        self.nodes += 1;
        self.children += 1;
    }

    /// Marks a node whose children were expanded
    pub fn record_parent(&mut self) {
        self.parents += 1;
    }

    pub fn decisions(&self) -> u64 {
        self.decisions
    }

    pub fn depths_completed(&self) -> u64 {
        self.depths_completed
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Mean number of completed depth iterations per decision. With the
    /// deepening loop starting at depth 1 this is the mean depth reached.
    pub fn average_depth(&self) -> f64 {
        if self.decisions > 0 {
            self.depths_completed as f64 / self.decisions as f64
        } else {
            0.0
        }
    }

    /// Mean number of children generated per expanded node
    pub fn branching_factor(&self) -> f64 {
        if self.parents > 0 {
            self.children as f64 / self.parents as f64
        } else {
            0.0
        }
    }

    pub fn summary(&self) -> StatsSummary {
        StatsSummary {
            decisions: self.decisions,
            nodes: self.nodes,
            average_depth: self.average_depth(),
            branching_factor: self.branching_factor(),
        }
    }
}

/// Derived figures for end-of-run reporting
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StatsSummary {
    pub decisions: u64,
    pub nodes: u64,
    pub average_depth: f64,
    pub branching_factor: f64,
}

impl fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} decisions, {} nodes, average depth {:.2}, branching factor {:.2}",
            self.decisions, self.nodes, self.average_depth, self.branching_factor
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_stats_report_zeros() {
        let stats = SearchStats::default();
        assert_eq!(stats.average_depth(), 0.0);
        assert_eq!(stats.branching_factor(), 0.0);
        assert_eq!(stats.nodes(), 0);
    }

    #[test]
    fn averages_follow_the_counters() {
        let mut stats = SearchStats::default();
        stats.record_decision();
        stats.record_decision();
        for _ in 0..3 {
            stats.record_completed_depth();
        }
        // one root expanding four children
        stats.record_root();
        for _ in 0..4 {
            stats.record_node();
        }
        assert_eq!(stats.average_depth(), 1.5);
        assert_eq!(stats.branching_factor(), 4.0);
        assert_eq!(stats.nodes(), 5);
    }

    #[test]
    fn summary_carries_the_derived_figures() {
        let mut stats = SearchStats::default();
        stats.record_decision();
        stats.record_completed_depth();
        stats.record_completed_depth();
        let summary = stats.summary();
        assert_eq!(summary.decisions, 1);
        assert_eq!(summary.average_depth, 2.0);
        let line = summary.to_string();
        assert!(line.contains("average depth 2.00"));
    }
}
