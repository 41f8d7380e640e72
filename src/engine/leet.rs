//! Leet-speak variants.
//!
//! ```text
//! a -> a @      e -> e 3      i -> i 1
//! o -> o 0      s -> s $ 5    t -> t 7
//! ```
//!
//! Lookup is case-insensitive; an uppercase source keeps its case on the
//! letter substitute (`A` -> `A`, `@`). The variant count is the product of
//! the per-character choice counts and is not capped here.

fn substitutes(lower: char) -> Option<&'static [char]> {
    match lower {
        'a' => Some(&['a', '@']),
        'e' => Some(&['e', '3']),
        'i' => Some(&['i', '1']),
        'o' => Some(&['o', '0']),
        's' => Some(&['s', '$', '5']),
        't' => Some(&['t', '7']),
        _ => None,
    }
}

/// Every leet variant of `text`, the unmodified text included.
///
/// Variants are distinct and come out in odometer order (the last character
/// varies fastest), which keeps tests and reports stable.
///
/// ```
/// let v = wordforge::leet_variants("cat");
/// assert_eq!(v, ["cat", "ca7", "c@t", "c@7"]);
/// ```
pub fn leet_variants(text: &str) -> Vec<String> {
    let choices: Vec<Vec<char>> = text
        .chars()
        .map(|ch| match substitutes(ch.to_ascii_lowercase()) {
            Some(subs) if ch.is_ascii_uppercase() => subs.iter().map(char::to_ascii_uppercase).collect(),
            Some(subs) => subs.to_vec(),
            None => vec![ch],
        })
        .collect();

    choices.iter().fold(vec![String::with_capacity(text.len())], |prefixes, options| {
        prefixes
            .iter()
            .flat_map(|prefix| {
                options.iter().map(move |&ch| {
                    let mut next = prefix.clone();
                    next.push(ch);
                    next
                })
            })
            .collect()
    })
}
