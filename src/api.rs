use crate::engine::{self, DateRecord, ExpansionMetrics};
use crate::pools::{DEFAULT_COMMON_NUMBERS, DEFAULT_SYMBOLS};
use crate::{Operation, Rule};
use std::collections::HashSet;

/// Deduplicated passwords produced by one expansion. Unordered.
pub type PasswordSet = HashSet<String>;

/// Input pools an expansion draws from.
///
/// Every field is borrowed: the caller parses dates once and shares the
/// same pools across all rules.
#[derive(Debug, Clone, Copy)]
pub struct Pools<'a> {
    /// Personal strings (names, pets, places). Empty entries are ignored.
    pub strings: &'a [String],
    pub numbers: &'a [String],
    pub dates: &'a [DateRecord],
    pub symbols: &'a [String],
    pub common_numbers: &'a [String],
}

impl<'a> Pools<'a> {
    /// Pools with the default symbol alphabet and common-number list.
    pub fn new(strings: &'a [String], numbers: &'a [String], dates: &'a [DateRecord]) -> Self {
        Pools { strings, numbers, dates, symbols: &DEFAULT_SYMBOLS, common_numbers: &DEFAULT_COMMON_NUMBERS }
    }

    /// Pools with nothing in them; `symbol` and `common_number` included.
    pub fn empty() -> Self {
        Pools { strings: &[], numbers: &[], dates: &[], symbols: &[], common_numbers: &[] }
    }

    pub fn with_symbols(self, symbols: &'a [String]) -> Self {
        Pools { symbols, ..self }
    }

    pub fn with_common_numbers(self, common_numbers: &'a [String]) -> Self {
        Pools { common_numbers, ..self }
    }
}

/// Result of [`expand_rule_with_metrics`].
#[derive(Debug, Clone)]
pub struct ExpansionRun {
    pub passwords: PasswordSet,
    pub metrics: ExpansionMetrics,
}

/// Parse `rule_text` into operations.
///
/// Never fails: unknown tokens become literals.
///
/// # Example
/// ```
/// use wordforge::{Operation, parse_rule};
///
/// let ops = parse_rule("literal:x + number");
/// assert_eq!(ops, [Operation::Literal { value: "x".into() }, Operation::Number]);
/// ```
pub fn parse_rule(rule_text: &str) -> Vec<Operation> {
    engine::parse_operations(rule_text)
}

/// Expand `operations` over `pools`, joining slots with a space when
/// `join_with_space` is set.
pub fn expand(operations: &[Operation], pools: &Pools<'_>, join_with_space: bool) -> PasswordSet {
    engine::expand_operations(operations, pools, join_with_space).0
}

/// Expand a parsed [`Rule`], honouring its own join setting.
pub fn expand_rule(rule: &Rule, pools: &Pools<'_>) -> PasswordSet {
    expand(&rule.operations, pools, rule.join_with_space)
}

/// Like [`expand_rule`], and also return per-pass metrics.
pub fn expand_rule_with_metrics(rule: &Rule, pools: &Pools<'_>) -> ExpansionRun {
    let (passwords, metrics) = engine::expand_operations(&rule.operations, pools, rule.join_with_space);
    ExpansionRun { passwords, metrics }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn default_pools_feed_symbols_and_common_numbers() {
        let strings = owned(&["x"]);
        let pools = Pools::new(&strings, &[], &[]);

        let out = expand_rule(&Rule::parse("symbol"), &pools);
        assert_eq!(out.len(), crate::SYMBOLS.len());

        let out = expand_rule(&Rule::parse("common_number"), &pools);
        assert!(out.contains("1234554321"));
    }

    #[test]
    fn custom_pools_override_defaults() {
        let symbols = owned(&["~"]);
        let pools = Pools::empty().with_symbols(&symbols);
        let out = expand_rule(&Rule::parse("literal:a + symbol"), &pools);
        assert_eq!(out, HashSet::from(["a~".to_string()]));
    }

    #[test]
    fn metrics_report_one_pass_per_date() {
        let strings = owned(&["ann"]);
        let dates = vec![DateRecord::parse("1/2/2020"), DateRecord::parse("3/4/2021")];
        let pools = Pools::new(&strings, &[], &dates);

        let run = expand_rule_with_metrics(&Rule::parse("string: + day"), &pools);

        assert_eq!(run.metrics.passes.len(), 2);
        assert_eq!(run.metrics.passes[0].date.as_deref(), Some("1/2/2020"));
        assert_eq!(run.metrics.passes[0].layers, [1, 1]);
        assert_eq!(run.metrics.produced(), 2);
        assert_eq!(run.passwords, HashSet::from(["ann1".to_string(), "ann3".to_string()]));
    }

    #[test]
    fn global_pass_metrics() {
        let strings = owned(&["a", "b"]);
        let numbers = owned(&["1", "2", "3"]);
        let pools = Pools::new(&strings, &numbers, &[]);

        let run = expand_rule_with_metrics(&Rule::parse("string: + number"), &pools);

        assert_eq!(run.metrics.passes.len(), 1);
        assert_eq!(run.metrics.passes[0].date, None);
        assert_eq!(run.metrics.passes[0].layers, [2, 6]);
        assert_eq!(run.metrics.peak_width(), 6);
        assert_eq!(run.passwords.len(), 6);
    }
}
