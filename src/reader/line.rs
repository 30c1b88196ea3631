//! Line classifier
//!
//! Each raw line is reduced in this order:
//! 1. everything from the first `#` is dropped
//! 2. all whitespace is removed (not collapsed)
//! 3. an empty remainder is a blank line
//! 4. otherwise it must be `KEY=VALUE` with `KEY` in `[A-Za-z0-9_]+`
//!
//! Since whitespace removal is total, values can never contain spaces.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

const COMMENT_MARKER: char = '#';

fn assignment_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([A-Za-z0-9_]+)=(.+)$").expect("assignment pattern is a valid regex")
    })
}

/// Why a non-empty line was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    /// Not of the form `KEY=VALUE`
    NoMatch,
    /// Matched but did not yield exactly a key and a value
    CaptureCount,
}

impl MalformedReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            MalformedReason::NoMatch => "did not match any expressions",
            MalformedReason::CaptureCount => {
                "line matched pattern but an invalid number of captures were found"
            }
        }
    }
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classification of one raw line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    /// Blank or comment-only
    Blank,
    /// A `KEY=VALUE` assignment, key not yet normalized
    Assignment { key: String, value: String },
    /// Non-empty text that is not an assignment
    Malformed { text: String, reason: MalformedReason },
}

/// Removes the comment and every whitespace character from `line`.
pub fn strip_line(line: &str) -> String {
    let content = match line.find(COMMENT_MARKER) {
        Some(pos) => &line[..pos],
        None => line,
    };
    content.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Classifies one raw line.
pub fn classify(line: &str) -> LineClass {
    let text = strip_line(line);
    if text.is_empty() {
        return LineClass::Blank;
    }

    let Some(captures) = assignment_pattern().captures(&text) else {
        return LineClass::Malformed {
            text,
            reason: MalformedReason::NoMatch,
        };
    };

    // Group 0 is the whole match
    match (captures.len(), captures.get(1), captures.get(2)) {
        (3, Some(key), Some(value)) => LineClass::Assignment {
            key: key.as_str().to_string(),
            value: value.as_str().to_string(),
        },
        _ => LineClass::Malformed {
            text,
            reason: MalformedReason::CaptureCount,
        },
    }
}
