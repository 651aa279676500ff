//! Test case input parsing.

use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::LoadError;
use crate::model::TestCase;

/// A whole document wrapped in one Markdown code fence.
static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^\s*```[A-Za-z0-9_-]*[ \t]*\r?\n(.*?)\s*```\s*$")
        .expect("code fence pattern is valid")
});

/// Parse a JSON array (or single object) of test cases.
///
/// Tolerates a surrounding Markdown code fence. Ids must be unique.
pub fn parse_test_cases(text: &str) -> Result<Vec<TestCase>, LoadError> {
    let json = CODE_FENCE
        .captures(text)
        .and_then(|c| c.get(1))
        .map_or(text, |m| m.as_str());

    let cases = if json.trim_start().starts_with('{') {
        vec![serde_json::from_str::<TestCase>(json)?]
    } else {
        serde_json::from_str::<Vec<TestCase>>(json)?
    };

    let mut seen = HashSet::new();
    for case in &cases {
        if !seen.insert(case.id.as_str()) {
            return Err(LoadError::DuplicateId(case.id.clone()));
        }
    }

    debug!("Parsed {} test cases", cases.len());
    Ok(cases)
}

/// Read and parse a test case file.
pub fn load_test_cases(path: &Path) -> Result<Vec<TestCase>, LoadError> {
    let text = std::fs::read_to_string(path)?;
    parse_test_cases(&text)
}
