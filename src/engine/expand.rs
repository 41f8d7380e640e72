//! Combinatorial expansion.
//!
//! Expansion is a left-to-right fold over the operations. Each operation
//! replaces the current set of configurations with every way of resolving
//! that operation in each of them:
//!
//! ```text
//! rule:  string + literal:_ + number          strings=[ann, bob]  numbers=[1, 2]
//!
//! seed         [_ _ _]                         1 configuration
//! string       [ann _ _] [bob _ _]             2
//! literal:_    (pass through)                  2
//! number       [ann _ 1] [ann _ 2]
//!              [bob _ 1] [bob _ 2]             4  -> ann_1 ann_2 bob_1 bob_2
//! ```
//!
//! ## Per-date mode
//!
//! A rule with any date component is folded once per date record and the
//! results are unioned, so `day + month` never pairs the day of one date with
//! the month of another. With no date records such a rule produces nothing.
//!
//! ## Branching policy
//!
//! - Personal strings already consumed in a lineage are skipped; when that
//!   leaves nothing, the first personal string is reused.
//! - A missing date component contributes no branch; the slot stays empty.
//! - An operation that yields no branch carries the configuration forward
//!   unchanged, so an empty pool never wipes out a lineage.

use super::config::Configuration;
use super::date::DateRecord;
use super::leet::leet_variants;
use super::metrics::{ExpansionMetrics, PassMetrics};
use crate::{Operation, OperationKinds, PasswordSet, Pools};
use std::time::Instant;
use tracing::{debug, trace};

/// What one pass resolves against.
struct PassContext<'p, 'a> {
    /// Non-empty personal strings, in pool order.
    strings: &'p [&'a str],
    pools: &'p Pools<'a>,
    /// Current record in per-date mode.
    date: Option<&'a DateRecord>,
}

/// Expand `operations` against `pools`.
pub(crate) fn expand_operations(
    operations: &[Operation],
    pools: &Pools<'_>,
    join_with_space: bool,
) -> (PasswordSet, ExpansionMetrics) {
    let start = Instant::now();
    let strings: Vec<&str> = pools.strings.iter().map(String::as_str).filter(|s| !s.is_empty()).collect();
    let per_date = OperationKinds::of(operations).intersects(OperationKinds::DATE);

    debug!(operations = operations.len(), strings = strings.len(), per_date, "expanding rule");

    let mut passwords = PasswordSet::new();
    let mut metrics = ExpansionMetrics::default();

    if per_date {
        for date in pools.dates {
            let ctx = PassContext { strings: &strings, pools, date: Some(date) };
            let (produced, pass) = run_pass(operations, &ctx, join_with_space);
            debug!(date = %date.raw, produced = pass.produced, "date pass finished");
            passwords.extend(produced);
            metrics.passes.push(pass);
        }
    } else {
        let ctx = PassContext { strings: &strings, pools, date: None };
        let (produced, pass) = run_pass(operations, &ctx, join_with_space);
        passwords.extend(produced);
        metrics.passes.push(pass);
    }

    metrics.total = start.elapsed();
    debug!(passwords = passwords.len(), elapsed = ?metrics.total, "rule expanded");
    (passwords, metrics)
}

/// One fold over `operations`, seeded with a single configuration.
fn run_pass(operations: &[Operation], ctx: &PassContext<'_, '_>, join_with_space: bool) -> (PasswordSet, PassMetrics) {
    let start = Instant::now();
    let mut pass = PassMetrics { date: ctx.date.map(|d| d.raw.clone()), ..PassMetrics::default() };
    let mut configs = vec![Configuration::seed(operations)];

    for (index, op) in operations.iter().enumerate() {
        let mut next = Vec::with_capacity(configs.len());
        for config in configs {
            let branches = branch(op, index, &config, ctx);
            if branches.is_empty() {
                next.push(config);
            } else {
                next.extend(branches);
            }
        }
        configs = next;
        trace!(index, op = op.name(), width = configs.len(), "layer folded");
        pass.layers.push(configs.len());
    }

    let produced: PasswordSet = configs.iter().filter_map(|c| c.render(join_with_space)).collect();
    pass.produced = produced.len();
    pass.duration = start.elapsed();
    (produced, pass)
}

/// Every resolution of `op` in `config`. Empty means "carry forward".
fn branch(op: &Operation, index: usize, config: &Configuration, ctx: &PassContext<'_, '_>) -> Vec<Configuration> {
    match op {
        Operation::Literal { .. } => Vec::new(),

        Operation::PersonalString { case, .. } => candidates(config, ctx.strings)
            .into_iter()
            .map(|s| config.fill_consuming(index, case.apply(s), s))
            .collect(),

        Operation::PersonalStringLeet { case, .. } => candidates(config, ctx.strings)
            .into_iter()
            .flat_map(|s| {
                leet_variants(&case.apply(s)).into_iter().map(move |variant| config.fill_consuming(index, variant, s))
            })
            .collect(),

        Operation::FirstCharacter { case, .. } => candidates(config, ctx.strings)
            .into_iter()
            .filter_map(|s| {
                let first = s.chars().next()?;
                Some(config.fill_consuming(index, case.apply(first.encode_utf8(&mut [0; 4])), s))
            })
            .collect(),

        Operation::DateDay => component(config, index, ctx.date.and_then(|d| d.parts.day.as_deref())),
        Operation::DateMonth => component(config, index, ctx.date.and_then(|d| d.parts.month.as_deref())),
        Operation::DateYear => component(config, index, ctx.date.and_then(|d| d.parts.year.as_deref())),
        Operation::DateShortYear => component(config, index, ctx.date.and_then(|d| d.parts.short_year.as_deref())),
        Operation::DateFullNumber => {
            let numbers = ctx.date.map(|d| d.numbers.as_slice()).unwrap_or_default();
            each(config, index, numbers)
        }

        Operation::Symbol => each(config, index, ctx.pools.symbols),
        Operation::CommonNumber => each(config, index, ctx.pools.common_numbers),
        Operation::Number => each(config, index, ctx.pools.numbers),
    }
}

/// Personal strings this lineage has not consumed yet, or the first string
/// when all of them are taken.
fn candidates<'a>(config: &Configuration, strings: &[&'a str]) -> Vec<&'a str> {
    let fresh: Vec<&'a str> = strings.iter().copied().filter(|s| !config.has_used(s)).collect();
    if fresh.is_empty() { strings.first().copied().into_iter().collect() } else { fresh }
}

fn component(config: &Configuration, index: usize, value: Option<&str>) -> Vec<Configuration> {
    value.map(|v| config.fill(index, v.to_string())).into_iter().collect()
}

fn each(config: &Configuration, index: usize, values: &[String]) -> Vec<Configuration> {
    values.iter().map(|v| config.fill(index, v.clone())).collect()
}
