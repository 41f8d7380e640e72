//! Case patterns (`u:A`, `u:N`, `u:1,4,L`).

use crate::{CasePattern, Position};
use tracing::debug;

impl Position {
    /// Parse one element of a positional case spec.
    ///
    /// `L` is the last character; anything else must be a positive 1-based
    /// integer. Unparseable or non-positive elements yield `None`.
    pub fn parse(element: &str) -> Option<Self> {
        if element == "L" {
            return Some(Position::Last);
        }
        let n: i64 = element.trim().parse().ok()?;
        usize::try_from(n).ok().filter(|&n| n >= 1).map(Position::Index)
    }
}

impl CasePattern {
    /// Parse a `u:` case spec. Malformed positions are dropped, never fatal.
    pub fn parse(spec: &str) -> Self {
        let Some(body) = spec.strip_prefix("u:") else {
            return CasePattern::Verbatim;
        };

        match body {
            "A" => CasePattern::Upper,
            "N" => CasePattern::Lower,
            _ => {
                let positions = body
                    .split(',')
                    .filter_map(|element| {
                        let pos = Position::parse(element);
                        if pos.is_none() {
                            debug!(spec, element, "ignoring malformed case position");
                        }
                        pos
                    })
                    .collect();
                CasePattern::Positions(positions)
            }
        }
    }

    /// Apply the pattern to `text`.
    ///
    /// Positional patterns start from the lowercased text; positions past the
    /// end are ignored.
    pub fn apply(&self, text: &str) -> String {
        match self {
            CasePattern::Verbatim => text.to_string(),
            CasePattern::Upper => text.to_uppercase(),
            CasePattern::Lower => text.to_lowercase(),
            CasePattern::Positions(positions) => {
                let chars: Vec<char> = text.to_lowercase().chars().collect();
                let mut raise = vec![false; chars.len()];

                for pos in positions {
                    let slot = match *pos {
                        Position::Last => raise.last_mut(),
                        Position::Index(n) => n.checked_sub(1).and_then(|i| raise.get_mut(i)),
                    };
                    if let Some(flag) = slot {
                        *flag = true;
                    }
                }

                let mut out = String::with_capacity(text.len());
                for (ch, up) in chars.into_iter().zip(raise) {
                    if up {
                        out.extend(ch.to_uppercase());
                    } else {
                        out.push(ch);
                    }
                }
                out
            }
        }
    }
}

/// Parse `spec` and apply it to `text` in one go.
///
/// ```
/// assert_eq!(wordforge::apply_case_pattern("u:1,L", "hello"), "HellO");
/// ```
pub fn apply_case_pattern(spec: &str, text: &str) -> String {
    CasePattern::parse(spec).apply(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[yare::parameterized(
        first_and_last = { "u:1,L", "hello", "HellO" },
        all_upper      = { "u:A", "hello", "HELLO" },
        all_lower      = { "u:N", "HeLLo", "hello" },
        out_of_range   = { "u:99", "HeLLo", "hello" },
        mixed_garbage  = { "u:x,2,,-1,0", "hello", "hEllo" },
        repeated       = { "u:2,2,L,L", "abc", "aBC" },
        empty_body     = { "u:", "ABC", "abc" },
        no_prefix      = { "1,L", "MiXeD", "MiXeD" },
        single_char    = { "u:L", "q", "Q" },
        empty_text     = { "u:1,L", "", "" },
    )]
    fn applies(spec: &str, text: &str, expected: &str) {
        assert_eq!(apply_case_pattern(spec, text), expected);
    }

    #[test]
    fn parse_positions() {
        assert_eq!(
            CasePattern::parse("u:1,4,L"),
            CasePattern::Positions(vec![Position::Index(1), Position::Index(4), Position::Last])
        );
        assert_eq!(CasePattern::parse("u: 3"), CasePattern::Positions(vec![Position::Index(3)]));
        assert_eq!(CasePattern::parse("u:a,b"), CasePattern::Positions(Vec::new()));
        assert_eq!(CasePattern::parse("x:A"), CasePattern::Verbatim);
    }

    #[test]
    fn positions_count_characters_not_bytes() {
        assert_eq!(apply_case_pattern("u:2", "éclair"), "éClair");
    }
}
