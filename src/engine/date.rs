//! Date records.
//!
//! Input dates are `day/month/year` strings. Each one is decomposed once,
//! before expansion, into its components and twelve derived numeric strings:
//!
//! ```text
//! "19/7/2003"
//!   components: day=19 month=7 year=2003 short_year=03
//!   numbers:    Y    y   DM   DMY      DMy    MD   MDY      MDy
//!               2003 03  197  1972003  19703  719  7192003  71903
//!               YMD      yMD    YDM      yDM
//!               2003719  03719  2003197  03197
//! ```
//!
//! Both helpers are tolerant: a malformed string yields absent components
//! and no derived numbers, which later makes date operations contribute no
//! branches for that record.

use chrono::NaiveDate;

/// Components of a `day/month/year` string, as written.
///
/// Empty components are reported as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateParts {
    pub day: Option<String>,
    pub month: Option<String>,
    pub year: Option<String>,
    /// Last two characters of the year.
    pub short_year: Option<String>,
}

/// Split `date_str` into its components.
pub fn parse_date(date_str: &str) -> DateParts {
    let parts: Vec<&str> = date_str.split('/').collect();
    let [day, month, year] = parts.as_slice() else {
        return DateParts::default();
    };

    DateParts {
        day: present(day),
        month: present(month),
        year: present(year),
        short_year: present(&last_chars(year, 2)),
    }
}

/// The twelve numbers derived from `date_str`, in fixed order.
///
/// Day and month are normalised as integers (`07` -> `7`); the year is only
/// trimmed. Returns an empty list when the shape is wrong or day/month are
/// not integers.
pub fn derive_date_numbers(date_str: &str) -> Vec<String> {
    let parts: Vec<&str> = date_str.split('/').collect();
    let [day, month, year] = parts.as_slice() else {
        return Vec::new();
    };
    let (Some(d), Some(m)) = (normalize_integer(day), normalize_integer(month)) else {
        return Vec::new();
    };
    let y = year.trim();
    let yy = last_chars(y, 2);

    vec![
        y.to_string(),
        yy.clone(),
        format!("{d}{m}"),
        format!("{d}{m}{y}"),
        format!("{d}{m}{yy}"),
        format!("{m}{d}"),
        format!("{m}{d}{y}"),
        format!("{m}{d}{yy}"),
        format!("{y}{m}{d}"),
        format!("{yy}{m}{d}"),
        format!("{y}{d}{m}"),
        format!("{yy}{d}{m}"),
    ]
}

/// A parsed input date, computed once and shared read-only by every rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRecord {
    /// The string the record was built from.
    pub raw: String,
    pub parts: DateParts,
    /// Output of [`derive_date_numbers`]; feeds `full_date` operations.
    pub numbers: Vec<String>,
}

impl DateRecord {
    pub fn parse(raw: &str) -> Self {
        DateRecord { raw: raw.to_string(), parts: parse_date(raw), numbers: derive_date_numbers(raw) }
    }

    /// The calendar date this record names, if it names a real one.
    ///
    /// Expansion never consults this; callers use it to warn about inputs
    /// like `31/2/2020`, which still expand from their raw components.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        let day: u32 = self.parts.day.as_deref()?.trim().parse().ok()?;
        let month: u32 = self.parts.month.as_deref()?.trim().parse().ok()?;
        let year: i32 = self.parts.year.as_deref()?.trim().parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    }
}

fn present(component: &str) -> Option<String> {
    (!component.is_empty()).then(|| component.to_string())
}

fn last_chars(s: &str, n: usize) -> String {
    let count = s.chars().count();
    s.chars().skip(count.saturating_sub(n)).collect()
}

/// Canonical decimal text of an integer component: sign kept, leading zeros
/// and digit-group underscores dropped. Works on the digits directly, so
/// components of any length are accepted.
fn normalize_integer(s: &str) -> Option<String> {
    let s = s.trim();
    let (negative, body) = match s.as_bytes().first()? {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };
    if body.is_empty()
        || body.starts_with('_')
        || body.ends_with('_')
        || body.contains("__")
        || !body.bytes().all(|b| b.is_ascii_digit() || b == b'_')
    {
        return None;
    }

    let digits: String = body.chars().filter(|c| *c != '_').collect();
    let digits = match digits.trim_start_matches('0') {
        "" => return Some("0".to_string()),
        trimmed => trimmed,
    };
    Some(if negative { format!("-{digits}") } else { digits.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_all_twelve_numbers_in_order() {
        assert_eq!(
            derive_date_numbers("19/7/2003"),
            [
                "2003", "03", "197", "1972003", "19703", "719", "7192003", "71903", "2003719", "03719", "2003197",
                "03197",
            ]
        );
    }

    #[yare::parameterized(
        plain          = { "7", Some("7") },
        leading_zeros  = { "007", Some("7") },
        all_zeros      = { "000", Some("0") },
        signed         = { "+05", Some("5") },
        negative       = { "-05", Some("-5") },
        negative_zero  = { "-0", Some("0") },
        padded         = { " 12 ", Some("12") },
        grouped        = { "1_0", Some("10") },
        wider_than_i64 = { "0099999999999999999999999", Some("99999999999999999999999") },
        empty          = { "", None },
        sign_only      = { "-", None },
        letters        = { "7a", None },
        double_group   = { "1__0", None },
        trailing_group = { "10_", None },
    )]
    fn integer_components(raw: &str, expected: Option<&str>) {
        assert_eq!(normalize_integer(raw).as_deref(), expected);
    }

    #[test]
    fn oversized_components_still_derive_numbers() {
        let numbers = derive_date_numbers("99999999999999999999/1/2000");
        assert_eq!(numbers.len(), 12);
        assert_eq!(numbers[2], "999999999999999999991");
    }

    #[test]
    fn leading_zeros_are_normalised_in_numbers_only() {
        let record = DateRecord::parse("07/03/1999");
        assert_eq!(record.parts.day.as_deref(), Some("07"));
        assert_eq!(record.numbers[2], "73");
        assert_eq!(record.numbers[1], "99");
    }

    #[yare::parameterized(
        empty        = { "" },
        two_parts    = { "1/2" },
        four_parts   = { "1/2/3/4" },
        dashes       = { "2020-01-02" },
    )]
    fn malformed_shape_has_no_components(raw: &str) {
        assert_eq!(parse_date(raw), DateParts::default());
        assert!(derive_date_numbers(raw).is_empty());
    }

    #[test]
    fn non_numeric_day_keeps_components_but_derives_nothing() {
        let record = DateRecord::parse("xx/7/2003");
        assert_eq!(record.parts.day.as_deref(), Some("xx"));
        assert_eq!(record.parts.short_year.as_deref(), Some("03"));
        assert!(record.numbers.is_empty());
    }

    #[test]
    fn empty_components_are_absent() {
        let parts = parse_date("/7/");
        assert_eq!(parts.day, None);
        assert_eq!(parts.month.as_deref(), Some("7"));
        assert_eq!(parts.year, None);
        assert_eq!(parts.short_year, None);
    }

    #[test]
    fn short_year_of_a_short_year() {
        assert_eq!(parse_date("1/1/5").short_year.as_deref(), Some("5"));
    }

    #[test]
    fn calendar_validation() {
        assert_eq!(DateRecord::parse("19/7/2003").calendar_date(), NaiveDate::from_ymd_opt(2003, 7, 19));
        assert_eq!(DateRecord::parse("31/2/2020").calendar_date(), None);
        assert_eq!(DateRecord::parse("garbage").calendar_date(), None);
    }
}
