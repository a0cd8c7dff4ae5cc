// src/analysis/parser.rs
// Line scanner for prose replies: level readings and the summary/detail split

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Fixed delimiter separating the summary from the mechanism detail
pub const DETAIL_DELIMITER: &str = "---detail---";

#[allow(clippy::expect_used)]
fn level_line_pattern() -> Regex {
    // `Name: current, target` with both numbers as bare integers
    Regex::new(r"^\s*([A-Za-z][A-Za-z0-9 '\-]*?)\s*:\s*(\d{1,3})\s*,\s*(\d{1,3})\s*$")
        .expect("level line pattern is valid")
}

static LEVEL_LINE: Lazy<Regex> = Lazy::new(level_line_pattern);

/// One extracted `name: current, target` triple
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelReading {
    pub name: String,
    pub current: u32,
    pub target: u32,
}

/// Interpreted prose reply. The raw text is always preserved for display,
/// whatever the scanner finds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseDigest {
    pub summary: String,
    pub detail: String,
    pub readings: Vec<LevelReading>,
    pub raw: String,
}

/// Scan every line for the fixed `name: current, target` pattern.
///
/// Zero matches is not an error: the collection is simply empty.
fn parse_levels(text: &str) -> Vec<LevelReading> {
    text.lines()
        .filter_map(|line| {
            let caps = LEVEL_LINE.captures(line)?;
            let current: u32 = caps[2].parse().ok()?;
            let target: u32 = caps[3].parse().ok()?;
            Some(LevelReading {
                name: caps[1].trim().to_string(),
                current,
                target,
            })
        })
        .collect()
}

/// Split on the fixed delimiter into summary and detail sections.
///
/// When the delimiter is absent the whole text is the summary and the
/// detail is explicitly empty.
fn split_sections(text: &str) -> (String, String) {
    match text.split_once(DETAIL_DELIMITER) {
        Some((summary, detail)) => (summary.trim().to_string(), detail.trim().to_string()),
        None => (text.trim().to_string(), String::new()),
    }
}

/// Interpret a prose reply into its display-ready parts
pub fn digest_prose(text: &str) -> ResponseDigest {
    let (summary, detail) = split_sections(text);

    ResponseDigest {
        summary,
        detail,
        readings: parse_levels(text),
        raw: text.to_string(),
    }
}
