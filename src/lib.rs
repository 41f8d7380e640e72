//! Rule-driven password wordlist expansion.
//!
//! A *rule* is a `" + "`-separated token sequence such as
//! `string:u:1 + literal:_ + day + month`. Parsing turns it into typed
//! [`Operation`]s; expansion substitutes every operation with every valid
//! choice from the caller's pools and returns the deduplicated set of
//! candidate passwords.
//!
//! ```
//! use wordforge::{DateRecord, Pools, Rule, expand_rule};
//!
//! let strings = vec!["alice".to_string()];
//! let dates = vec![DateRecord::parse("19/7/2003")];
//! let pools = Pools::new(&strings, &[], &dates);
//!
//! let rule = Rule::parse("string:u:1 + day + month");
//! let out = expand_rule(&rule, &pools);
//! assert!(out.contains("Alice197"));
//! ```

#[macro_use]
mod macros;
mod api;
mod engine;
mod generate;
mod pools;

pub use api::{ExpansionRun, PasswordSet, Pools, expand, expand_rule, expand_rule_with_metrics, parse_rule};
pub use engine::{
    DateParts, DateRecord, ExpansionMetrics, PassMetrics, apply_case_pattern, derive_date_numbers, leet_variants,
    parse_date,
};
pub use generate::{
    DEFAULT_PASSWORD_LIMIT, GenerateError, GenerateReport, GenerateRequest, PREVIEW_LIMIT, generate, generate_to_file,
    load_rules,
};
pub use pools::{COMMON_NUMBERS, DEFAULT_COMMON_NUMBERS, DEFAULT_SYMBOLS, SYMBOLS};

// --- Operations ---------------------------------------------------------------

/// One character position referenced by a positional [`CasePattern`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    /// 1-based character index.
    Index(usize),
    /// The last character, whatever the length.
    Last,
}

/// How a substituted value is cased before it lands in a password.
///
/// Parsed from the `u:` case-spec grammar: `u:A`, `u:N` or `u:1,3,L`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CasePattern {
    /// `u:A`
    Upper,
    /// `u:N`
    Lower,
    /// Lowercase everything, then uppercase the listed positions.
    Positions(Vec<Position>),
    /// Spec without the `u:` prefix; the text is left as-is.
    Verbatim,
}

/// One parsed unit of a rule.
///
/// Personal-string operations carry a 1-based `pool_index` taken from
/// numbered tokens (`string2:`, `character3:`). Expansion draws from the
/// whole uniqueness-filtered pool regardless; the index is kept so rule
/// authors can round-trip what they wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Literal { value: String },
    PersonalString { case: CasePattern, pool_index: usize },
    PersonalStringLeet { case: CasePattern, pool_index: usize },
    FirstCharacter { case: CasePattern, pool_index: usize },
    DateDay,
    DateMonth,
    DateYear,
    DateShortYear,
    DateFullNumber,
    Symbol,
    CommonNumber,
    Number,
}

bitflags::bitflags! {
    /// Which operation kinds occur in a rule.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct OperationKinds: u32 {
        const LITERAL         = 1 << 0;
        const STRING          = 1 << 1;
        const STRING_LEET     = 1 << 2;
        const CHARACTER       = 1 << 3;
        const DAY             = 1 << 4;
        const MONTH           = 1 << 5;
        const YEAR            = 1 << 6;
        const SHORT_YEAR      = 1 << 7;
        const FULL_DATE       = 1 << 8;
        const SYMBOL          = 1 << 9;
        const COMMON_NUMBER   = 1 << 10;
        const NUMBER          = 1 << 11;

        /// Any date component; a rule containing one expands per date record.
        const DATE = Self::DAY.bits()
            | Self::MONTH.bits()
            | Self::YEAR.bits()
            | Self::SHORT_YEAR.bits()
            | Self::FULL_DATE.bits();

        /// Operations that draw from (and consume) personal strings.
        const PERSONAL = Self::STRING.bits() | Self::STRING_LEET.bits() | Self::CHARACTER.bits();
    }
}

impl OperationKinds {
    /// Union of the kinds of every operation in `operations`.
    pub fn of(operations: &[Operation]) -> Self {
        operations.iter().fold(OperationKinds::empty(), |acc, op| acc | op.kind())
    }
}

impl Operation {
    /// The single [`OperationKinds`] flag for this operation.
    pub fn kind(&self) -> OperationKinds {
        match self {
            Operation::Literal { .. } => OperationKinds::LITERAL,
            Operation::PersonalString { .. } => OperationKinds::STRING,
            Operation::PersonalStringLeet { .. } => OperationKinds::STRING_LEET,
            Operation::FirstCharacter { .. } => OperationKinds::CHARACTER,
            Operation::DateDay => OperationKinds::DAY,
            Operation::DateMonth => OperationKinds::MONTH,
            Operation::DateYear => OperationKinds::YEAR,
            Operation::DateShortYear => OperationKinds::SHORT_YEAR,
            Operation::DateFullNumber => OperationKinds::FULL_DATE,
            Operation::Symbol => OperationKinds::SYMBOL,
            Operation::CommonNumber => OperationKinds::COMMON_NUMBER,
            Operation::Number => OperationKinds::NUMBER,
        }
    }

    /// Token keyword this operation was parsed from (used in reports).
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Literal { .. } => "literal",
            Operation::PersonalString { .. } => "string",
            Operation::PersonalStringLeet { .. } => "string_leet",
            Operation::FirstCharacter { .. } => "character",
            Operation::DateDay => "day",
            Operation::DateMonth => "month",
            Operation::DateYear => "year",
            Operation::DateShortYear => "short_year",
            Operation::DateFullNumber => "full_date",
            Operation::Symbol => "symbol",
            Operation::CommonNumber => "common_number",
            Operation::Number => "number",
        }
    }

    pub fn is_date(&self) -> bool {
        OperationKinds::DATE.contains(self.kind())
    }
}

// --- Rules --------------------------------------------------------------------

/// A parsed rule: source text, operations and the facts expansion needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Rule text as written (one line of a rule file).
    pub source: String,
    pub operations: Vec<Operation>,
    pub kinds: OperationKinds,
    /// Join slots with a single space instead of concatenating.
    ///
    /// Set when the source contains both the token delimiter and a
    /// `literal: ` token (a literal starting with a space).
    pub join_with_space: bool,
}

impl Rule {
    /// Parse `text` once. Never fails; unknown tokens become literals.
    pub fn parse(text: &str) -> Self {
        let operations = engine::parse_operations(text);
        let kinds = OperationKinds::of(&operations);
        let join_with_space = text.contains(engine::TOKEN_DELIMITER) && text.contains("literal: ");
        Rule { source: text.to_string(), operations, kinds, join_with_space }
    }

    /// True when the rule references a date component and therefore
    /// expands once per date record.
    pub fn uses_dates(&self) -> bool {
        self.kinds.intersects(OperationKinds::DATE)
    }
}
