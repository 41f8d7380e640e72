//! Rule parsing and combinatorial expansion engine.
//!
//! Turning a rule into passwords is a short pipeline:
//!
//! ```text
//! rule text ── parse_operations (parser.rs)
//!                 │   split on " + ", classify each token
//!                 v
//!          Vec<Operation>
//!                 │
//!  pools ─────────┼─ expand_operations (expand.rs)
//!  (strings,      │    - global pass, or one pass per DateRecord (date.rs)
//!   numbers,      │    - left-to-right fold, each operation branches the
//!   dates, ...)   │      set of Configurations (config.rs)
//!                 │    - case patterns (case.rs), leet variants (leet.rs)
//!                 v
//!          PasswordSet  (+ ExpansionMetrics, metrics.rs)
//! ```
//!
//! Everything here is a pure function of its inputs: no I/O, no shared
//! state, no failure path. Malformed tokens degrade to literals and malformed
//! dates contribute no branches.
//!
//! ## Responsibilities by module
//!
//! - `parser.rs`: token classification into `Operation`s.
//! - `case.rs`: `u:` case-spec parsing and application.
//! - `leet.rs`: leet-speak substitution table and variant product.
//! - `date.rs`: `day/month/year` decomposition and the twelve derived numbers.
//! - `config.rs`: the in-progress password threaded through the fold.
//! - `expand.rs`: the fold itself, including per-date mode.
//! - `metrics.rs`: per-pass layer widths and timings.
//!
//! ## Debugging
//!
//! Run with `RUST_LOG=wordforge=debug` (or `trace` for per-layer widths) to
//! see expansion traces.

#[path = "engine/case.rs"]
mod case;
#[path = "engine/config.rs"]
mod config;
#[path = "engine/date.rs"]
mod date;
#[path = "engine/expand.rs"]
mod expand;
#[path = "engine/leet.rs"]
mod leet;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/parser.rs"]
mod parser;


pub use case::apply_case_pattern;
pub use date::{DateParts, DateRecord, derive_date_numbers, parse_date};
pub(crate) use expand::expand_operations;
pub use leet::leet_variants;
pub use metrics::{ExpansionMetrics, PassMetrics};
pub(crate) use parser::{TOKEN_DELIMITER, parse_operations};
