//! Expansion metrics.
//!
//! Every expansion records, per pass, how many configurations survive each
//! operation layer. The numbers are cheap to collect and make it obvious
//! which token of a rule is responsible for a blow-up:
//!
//! ```text
//! rule:    string_leet + number + symbol
//! layers:  [  96,          960,     8640 ]
//! ```
//!
//! - `expand` / `expand_rule` drop the metrics.
//! - `expand_rule_with_metrics` returns them alongside the passwords.

use std::time::Duration;

// --- Metrics -----------------------------------------------------------------

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExpansionMetrics {
    /// Total elapsed time for the expansion.
    pub total: Duration,
    /// One entry per fold run: a single global pass, or one per date record.
    pub passes: Vec<PassMetrics>,
}

/// Timing and fan-out for a single fold over the operations.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PassMetrics {
    /// Raw date string for per-date passes, `None` for the global pass.
    pub date: Option<String>,
    /// Elapsed time for the pass.
    pub duration: Duration,
    /// Configuration count after each operation, in rule order.
    pub layers: Vec<usize>,
    /// Distinct non-empty passwords the pass rendered.
    pub produced: usize,
}

impl ExpansionMetrics {
    /// Largest configuration count seen in any layer of any pass.
    pub fn peak_width(&self) -> usize {
        self.passes.iter().flat_map(|p| p.layers.iter().copied()).max().unwrap_or(0)
    }

    /// Sum of passwords produced across passes, before cross-pass dedup.
    pub fn produced(&self) -> usize {
        self.passes.iter().map(|p| p.produced).sum()
    }
}
