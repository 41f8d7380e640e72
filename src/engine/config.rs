//! In-progress passwords.
//!
//! A `Configuration` is one lineage of the expansion fold: a slot per
//! operation (`None` until resolved) plus the lowercased personal strings
//! this password has already consumed. Branching never mutates a
//! configuration; every choice gets its own copy.
//!
//! ```text
//! ops:    [string,        literal:_, number]
//! seed:   [None,          Some("_"), None  ]  used: {}
//! branch: [Some("Alice"), Some("_"), None  ]  used: {"alice"}
//! ```

use crate::Operation;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Configuration {
    slots: Vec<Option<String>>,
    used: HashSet<String>,
}

impl Configuration {
    /// Starting point for a pass: literals pre-filled, nothing consumed.
    pub(crate) fn seed(operations: &[Operation]) -> Self {
        let slots = operations
            .iter()
            .map(|op| match op {
                Operation::Literal { value } => Some(value.clone()),
                _ => None,
            })
            .collect();
        Configuration { slots, used: HashSet::new() }
    }

    /// Copy of `self` with slot `index` set to `value`.
    pub(crate) fn fill(&self, index: usize, value: String) -> Self {
        let mut next = self.clone();
        next.slots[index] = Some(value);
        next
    }

    /// Like [`fill`](Self::fill), and records `source` as consumed.
    pub(crate) fn fill_consuming(&self, index: usize, value: String, source: &str) -> Self {
        let mut next = self.fill(index, value);
        next.used.insert(source.to_lowercase());
        next
    }

    /// Whether `candidate` (compared lowercased) was already consumed.
    pub(crate) fn has_used(&self, candidate: &str) -> bool {
        self.used.contains(&candidate.to_lowercase())
    }

    /// Final password text, or `None` when every slot rendered empty.
    ///
    /// Unresolved slots render as the empty string, including in the
    /// space-joined form.
    pub(crate) fn render(&self, join_with_space: bool) -> Option<String> {
        let separator = if join_with_space { " " } else { "" };
        let text = self.slots.iter().map(|slot| slot.as_deref().unwrap_or("")).collect::<Vec<_>>().join(separator);
        (!text.is_empty()).then_some(text)
    }
}
