//! Fixed pools the caller supplies for `symbol` and `common_number` tokens.

use once_cell::sync::Lazy;

/// Symbol alphabet for `symbol` tokens.
pub const SYMBOLS: &[&str] = &["@", "#", "$", "%", "!", "&", "*", "-", "_"];

/// Number sequences people commonly append to passwords.
pub const COMMON_NUMBERS: &[&str] = &[
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "0", "123", "1234", "12345", "123456", "321", "4321", "54321",
    "123321", "12344321", "1234554321", "2020", "2021", "2022", "2023", "2024", "2025",
];

/// [`SYMBOLS`] as owned strings, in the shape [`Pools`](crate::Pools) expects.
pub static DEFAULT_SYMBOLS: Lazy<Vec<String>> = Lazy::new(|| SYMBOLS.iter().map(|s| s.to_string()).collect());

/// [`COMMON_NUMBERS`] as owned strings.
pub static DEFAULT_COMMON_NUMBERS: Lazy<Vec<String>> =
    Lazy::new(|| COMMON_NUMBERS.iter().map(|s| s.to_string()).collect());
