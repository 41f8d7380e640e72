//! Wordlist generation across a rule file.
//!
//! This is the caller side of the engine: it loads rules, prepares date
//! records once, expands rule after rule, filters by length and stops at a
//! global cap.
//!
//! ```text
//! rules.txt ── load_rules ──┐
//!                           v
//! request ── DateRecord::parse (once) ── for each rule:
//!                                          Rule::parse -> expand_rule
//!                                          sort, length filter, cap
//!                                          write line, fill preview
//!                                             │
//!                                             v
//!                               GenerateReport { count, preview }
//! ```

use crate::{DateRecord, Pools, Rule, expand_rule};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Cap applied when a request does not name one.
pub const DEFAULT_PASSWORD_LIMIT: usize = 1_000_000;

/// How many accepted passwords a report previews.
pub const PREVIEW_LIMIT: usize = 100;

/// Errors raised while preparing or running a generation.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Missing or invalid 'strings'. You must provide at least one.")]
    MissingStrings,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("failed to write passwords: {0}")]
    Write(#[source] io::Error),
}

/// Inputs for one generation run.
///
/// Mirrors the JSON body accepted by the tool:
///
/// ```json
/// {"strings": ["alice", "rex"], "numbers": ["7"], "dates": ["19/7/2003"],
///  "min_length": 6, "max_length": 16, "password_limit": 50000}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenerateRequest {
    /// Personal strings; `null` entries are accepted and ignored.
    #[serde(default)]
    pub strings: Vec<Option<String>>,
    #[serde(default)]
    pub numbers: Vec<String>,
    /// Raw `day/month/year` strings.
    #[serde(default)]
    pub dates: Vec<String>,
    /// Shortest accepted password, in characters. 0 disables the bound.
    #[serde(default = "default_min_length", deserialize_with = "null_as_zero")]
    pub min_length: usize,
    /// Longest accepted password, in characters. `None` or 0 disables it.
    #[serde(default)]
    pub max_length: Option<usize>,
    /// Maximum passwords accepted across all rules.
    #[serde(default = "default_password_limit")]
    pub password_limit: usize,
}

fn default_min_length() -> usize {
    1
}

/// An explicit `null` bound reads as 0, which disables it.
fn null_as_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    Ok(Option::<usize>::deserialize(deserializer)?.unwrap_or(0))
}

fn default_password_limit() -> usize {
    DEFAULT_PASSWORD_LIMIT
}

impl Default for GenerateRequest {
    fn default() -> Self {
        GenerateRequest {
            strings: Vec::new(),
            numbers: Vec::new(),
            dates: Vec::new(),
            min_length: default_min_length(),
            max_length: None,
            password_limit: DEFAULT_PASSWORD_LIMIT,
        }
    }
}

impl GenerateRequest {
    /// Parse and validate a JSON request body.
    pub fn from_json(text: &str) -> Result<Self, GenerateError> {
        let request: GenerateRequest = serde_json::from_str(text)?;
        request.validate()?;
        Ok(request)
    }

    /// A request must carry at least one personal string entry.
    pub fn validate(&self) -> Result<(), GenerateError> {
        if self.strings.is_empty() {
            return Err(GenerateError::MissingStrings);
        }
        Ok(())
    }

    /// Personal strings with `null` entries removed.
    pub fn personal_strings(&self) -> Vec<String> {
        self.strings.iter().flatten().cloned().collect()
    }

    fn accepts_length(&self, password: &str) -> bool {
        let len = password.chars().count();
        if self.min_length > 0 && len < self.min_length {
            return false;
        }
        !matches!(self.max_length, Some(max) if max > 0 && len > max)
    }
}

/// Outcome of a generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerateReport {
    /// Passwords written.
    pub count: usize,
    /// The first [`PREVIEW_LIMIT`] passwords written.
    pub preview: Vec<String>,
}

/// Read a rule file: one rule per line, blank lines skipped.
pub fn load_rules(path: impl AsRef<Path>) -> Result<Vec<String>, GenerateError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| GenerateError::Io { path: path.to_path_buf(), source })?;
    let rules: Vec<String> =
        text.lines().map(str::trim).filter(|line| !line.is_empty()).map(str::to_string).collect();
    debug!(path = %path.display(), rules = rules.len(), "loaded rules");
    Ok(rules)
}

/// Expand every rule in order and write accepted passwords to `sink`, one
/// per line, until the request's cap is reached.
///
/// Each rule's passwords are visited in sorted order so the output is
/// reproducible.
pub fn generate<W: Write>(
    request: &GenerateRequest,
    rules: &[String],
    sink: &mut W,
) -> Result<GenerateReport, GenerateError> {
    request.validate()?;

    let strings = request.personal_strings();
    let dates: Vec<DateRecord> = request.dates.iter().map(|raw| DateRecord::parse(raw)).collect();
    for record in dates.iter().filter(|r| r.calendar_date().is_none()) {
        warn!(date = %record.raw, "date is not a valid day/month/year calendar date; expanding it as written");
    }
    let pools = Pools::new(&strings, &request.numbers, &dates);

    let mut report = GenerateReport::default();

    'rules: for source in rules {
        if report.count >= request.password_limit {
            debug!(limit = request.password_limit, "password limit reached");
            break;
        }

        let rule = Rule::parse(source);
        let mut passwords: Vec<String> = expand_rule(&rule, &pools).into_iter().collect();
        passwords.sort_unstable();
        debug!(rule = %rule.source, expanded = passwords.len(), "rule expanded");

        for password in passwords {
            if report.count >= request.password_limit {
                debug!(limit = request.password_limit, "password limit reached");
                break 'rules;
            }
            if !request.accepts_length(&password) {
                continue;
            }

            writeln!(sink, "{password}").map_err(GenerateError::Write)?;
            if report.preview.len() < PREVIEW_LIMIT {
                report.preview.push(password);
            }
            report.count += 1;
        }
    }

    sink.flush().map_err(GenerateError::Write)?;
    info!(count = report.count, rules = rules.len(), "generation finished");
    Ok(report)
}

/// Load rules from `rules_path`, generate, and write to `output_path`
/// (parent directories are created).
pub fn generate_to_file(
    request: &GenerateRequest,
    rules_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
) -> Result<GenerateReport, GenerateError> {
    let rules = load_rules(rules_path)?;
    let output_path = output_path.as_ref();
    let io_error = |source: io::Error| GenerateError::Io { path: output_path.to_path_buf(), source };

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    let file = File::create(output_path).map_err(io_error)?;
    let mut sink = BufWriter::new(file);

    generate(request, &rules, &mut sink)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(strings: &[&str]) -> GenerateRequest {
        GenerateRequest { strings: strings.iter().map(|s| Some(s.to_string())).collect(), ..Default::default() }
    }

    fn owned(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn lines(buf: &[u8]) -> Vec<String> {
        String::from_utf8_lossy(buf).lines().map(str::to_string).collect()
    }

    #[test]
    fn request_defaults_from_json() {
        let req = GenerateRequest::from_json(r#"{"strings": ["ann", null]}"#).unwrap();
        assert_eq!(req.min_length, 1);
        assert_eq!(req.max_length, None);
        assert_eq!(req.password_limit, DEFAULT_PASSWORD_LIMIT);
        assert_eq!(req.personal_strings(), ["ann"]);
    }

    #[test]
    fn null_min_length_disables_the_bound() {
        let req = GenerateRequest::from_json(r#"{"strings": ["a"], "min_length": null, "max_length": null}"#).unwrap();
        assert_eq!(req.min_length, 0);
        assert_eq!(req.max_length, None);

        let mut out = Vec::new();
        generate(&req, &owned(&["string: + number"]), &mut out).unwrap();
        assert_eq!(lines(&out), ["a"]);
    }

    #[yare::parameterized(
        strings_not_list = { r#"{"strings": "ann"}"# },
        numbers_not_list = { r#"{"strings": ["ann"], "numbers": "1"}"# },
        dates_not_list  = { r#"{"strings": ["ann"], "dates": {"d": 1}}"# },
        not_json        = { "strings=ann" },
    )]
    fn malformed_requests(body: &str) {
        assert!(matches!(GenerateRequest::from_json(body), Err(GenerateError::Json(_))));
    }

    #[yare::parameterized(
        empty   = { r#"{"strings": []}"# },
        missing = { r#"{"numbers": ["1"]}"# },
    )]
    fn requests_without_strings_are_rejected(body: &str) {
        let err = GenerateRequest::from_json(body).unwrap_err();
        assert!(matches!(err, GenerateError::MissingStrings));
        assert_eq!(err.to_string(), "Missing or invalid 'strings'. You must provide at least one.");
    }

    #[test]
    fn writes_sorted_passwords_per_rule() {
        let mut out = Vec::new();
        let report = generate(&request(&["bob", "ann"]), &owned(&["string: + literal:!", "literal:zz"]), &mut out)
            .unwrap();

        assert_eq!(lines(&out), ["ann!", "bob!", "zz"]);
        assert_eq!(report.count, 3);
        assert_eq!(report.preview, ["ann!", "bob!", "zz"]);
    }

    #[test]
    fn length_bounds_filter_output() {
        let mut req = request(&["al", "alexander"]);
        req.min_length = 3;
        req.max_length = Some(6);

        let mut out = Vec::new();
        let report = generate(&req, &owned(&["string:", "string: + literal:1"]), &mut out).unwrap();

        assert_eq!(lines(&out), ["al1"]);
        assert_eq!(report.count, 1);
    }

    #[test]
    fn zero_bounds_disable_filtering() {
        let mut req = request(&["a"]);
        req.min_length = 0;
        req.max_length = Some(0);

        let mut out = Vec::new();
        generate(&req, &owned(&["string:"]), &mut out).unwrap();
        assert_eq!(lines(&out), ["a"]);
    }

    #[test]
    fn limit_caps_across_rules() {
        let mut req = request(&["x"]);
        req.numbers = owned(&["1", "2", "3"]);
        req.password_limit = 4;

        let mut out = Vec::new();
        let report = generate(&req, &owned(&["string: + number", "number + string:", "literal:never"]), &mut out)
            .unwrap();

        assert_eq!(report.count, 4);
        assert_eq!(lines(&out), ["x1", "x2", "x3", "1x"]);
    }

    #[test]
    fn preview_is_bounded() {
        let mut req = request(&["x"]);
        req.numbers = (0..150).map(|n| n.to_string()).collect();

        let mut out = Vec::new();
        let report = generate(&req, &owned(&["number"]), &mut out).unwrap();

        assert_eq!(report.count, 150);
        assert_eq!(report.preview.len(), PREVIEW_LIMIT);
    }

    #[test]
    fn per_date_rules_use_request_dates() {
        let mut req = request(&["ann"]);
        req.dates = owned(&["1/2/2020", "31/2/2021"]);

        let mut out = Vec::new();
        generate(&req, &owned(&["string: + day + month"]), &mut out).unwrap();
        assert_eq!(lines(&out), ["ann12", "ann312"]);
    }

    #[test]
    fn report_serializes_like_the_api_response() {
        let report = GenerateReport { count: 1, preview: vec!["a".to_string()] };
        assert_eq!(serde_json::to_string(&report).unwrap(), r#"{"count":1,"preview":["a"]}"#);
    }

    #[test]
    fn load_rules_skips_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.txt");
        fs::write(&path, "string: + number\n\n   \n  literal:x  \n").unwrap();

        assert_eq!(load_rules(&path).unwrap(), ["string: + number", "literal:x"]);
    }

    #[test]
    fn shipped_rules_have_no_stray_literals() {
        let rules = load_rules(concat!(env!("CARGO_MANIFEST_DIR"), "/rules/rules.txt")).unwrap();
        assert!(!rules.is_empty());

        for source in &rules {
            let rule = Rule::parse(source);
            for op in &rule.operations {
                if let crate::Operation::Literal { value } = op {
                    assert!(
                        !value.starts_with("string") && !value.starts_with("character"),
                        "{source:?} keeps {value:?} as a literal"
                    );
                }
            }
        }
    }

    #[test]
    fn shipped_rules_expand_personal_strings() {
        let mut req = request(&["alice"]);
        req.numbers = owned(&["7"]);
        req.dates = owned(&["19/7/2003"]);
        let rules = load_rules(concat!(env!("CARGO_MANIFEST_DIR"), "/rules/rules.txt")).unwrap();

        let mut out = Vec::new();
        generate(&req, &rules, &mut out).unwrap();
        let out = lines(&out);

        for expected in ["alice", "Alice", "ALICE", "alice7", "@l1c3", "alice2003", "Alice_2003"] {
            assert!(out.iter().any(|p| p == expected), "missing {expected:?}");
        }
        assert!(out.iter().all(|p| !p.contains("string")));
    }

    #[test]
    fn load_rules_reports_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_rules(dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, GenerateError::Io { .. }));
        assert!(err.to_string().contains("missing.txt"));
    }

    #[test]
    fn generate_to_file_creates_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let rules_path = dir.path().join("rules.txt");
        let output_path = dir.path().join("output").join("passwords.txt");
        fs::write(&rules_path, "string:u:A\n").unwrap();

        let report = generate_to_file(&request(&["ann"]), &rules_path, &output_path).unwrap();

        assert_eq!(report.count, 1);
        assert_eq!(fs::read_to_string(&output_path).unwrap(), "ANN\n");
    }
}
