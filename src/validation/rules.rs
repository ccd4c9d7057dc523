//! Label and identifier rules
//!
//! Pure checks applied by the statement parser to otherwise well-formed
//! tokens.

use std::sync::LazyLock;

use regex::Regex;

/// Largest statement label
pub const MAX_LABEL: u32 = 99_999;

static LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-9][0-9]{0,4}$").expect("label pattern compiles"));

static IDENTIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z][A-Z0-9]{0,5}$").expect("identifier pattern compiles")
});

/// One to five digits, no leading zero, value in `1..=99999`
pub fn is_valid_label(label: &str) -> bool {
    LABEL_RE.is_match(label)
        && label
            .parse::<u32>()
            .is_ok_and(|value| (1..=MAX_LABEL).contains(&value))
}

/// A letter followed by at most five letters or digits
pub fn is_valid_identifier(identifier: &str) -> bool {
    IDENTIFIER_RE.is_match(identifier)
}
