//! Rule text to operations.
//!
//! A rule is a list of tokens joined by [`TOKEN_DELIMITER`]. Each token is
//! classified by prefix/shape, first match wins:
//!
//! ```text
//! literal:<value>                 -> Literal { value }
//! string:[u:<spec>]               -> PersonalString      (spec defaults to u:N)
//! string_leet:[u:<spec>]          -> PersonalStringLeet  (spec defaults to u:N)
//! string<N>:u:<spec>              -> PersonalString      (N defaults to 1)
//! character<N>:u:<spec>           -> FirstCharacter      (N defaults to 1)
//! day | month | year | short_year | full_date
//! symbol | common_number | number -> fixed operations
//! anything else                   -> Literal { value: token }
//! ```
//!
//! Parsing is total. A rule file is hand-written, so a token nobody
//! recognises is kept verbatim as a literal instead of failing the run.

use crate::{CasePattern, Operation};
use regex::Regex;

/// Separator between tokens of a rule.
pub(crate) const TOKEN_DELIMITER: &str = " + ";

/// Case spec used by `string:` / `string_leet:` tokens without a `u:` part.
const DEFAULT_CASE_SPEC: &str = "u:N";

/// Split `rule_text` and classify every token.
pub(crate) fn parse_operations(rule_text: &str) -> Vec<Operation> {
    rule_text.split(TOKEN_DELIMITER).map(parse_token).collect()
}

fn parse_token(token: &str) -> Operation {
    if let Some(value) = token.strip_prefix("literal:") {
        return Operation::Literal { value: value.to_string() };
    }

    if let Some(op) = parse_plain_string(token) {
        return op;
    }

    if token.starts_with("string") && token.contains(":u:") {
        let (pool_index, case) = parse_numbered(token, regex!(r"^string(\d*):u:"));
        return Operation::PersonalString { case, pool_index };
    }

    if token.starts_with("character") && token.contains(":u:") {
        let (pool_index, case) = parse_numbered(token, regex!(r"^character(\d*):u:"));
        return Operation::FirstCharacter { case, pool_index };
    }

    match token {
        "day" => Operation::DateDay,
        "month" => Operation::DateMonth,
        "year" => Operation::DateYear,
        "short_year" => Operation::DateShortYear,
        "full_date" => Operation::DateFullNumber,
        "symbol" => Operation::Symbol,
        "common_number" => Operation::CommonNumber,
        "number" => Operation::Number,
        _ => Operation::Literal { value: token.to_string() },
    }
}

/// `string:` and `string_leet:`, with an optional `u:` spec after the colon.
fn parse_plain_string(token: &str) -> Option<Operation> {
    let (head, rest) = token.split_once(':')?;
    let spec = if rest.starts_with("u:") { rest } else { DEFAULT_CASE_SPEC };
    let case = CasePattern::parse(spec);

    match head {
        "string" => Some(Operation::PersonalString { case, pool_index: 1 }),
        "string_leet" => Some(Operation::PersonalStringLeet { case, pool_index: 1 }),
        _ => None,
    }
}

/// Pool index and case pattern of a numbered `string<N>:u:` / `character<N>:u:` token.
///
/// When the numbered shape does not match (e.g. `stringX:u:1`), everything
/// after the second colon is taken as the spec body and the index is 1.
fn parse_numbered(token: &str, shape: &Regex) -> (usize, CasePattern) {
    match shape.captures(token) {
        Some(caps) => {
            let pool_index = caps
                .get(1)
                .map(|m| m.as_str())
                .filter(|digits| !digits.is_empty())
                .and_then(|digits| digits.parse().ok())
                .unwrap_or(1);
            let body = token.split(":u:").nth(1).unwrap_or_default();
            (pool_index, CasePattern::parse(&format!("u:{body}")))
        }
        None => {
            let body = token.splitn(3, ':').nth(2).unwrap_or_default();
            (1, CasePattern::parse(&format!("u:{body}")))
        }
    }
}
