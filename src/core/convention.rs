//! Naming convention matcher.
//!
//! Splits a file name such as `Something-12.jpg` into a base token
//! (`something`) and an embedded number (`12`). The accepted shape is:
//! letters, digits or `_`, an optional single separator (space, `-` or `_`),
//! a digit run, then the extension. A name without trailing digits carries
//! number 0, which is how tools usually name the first file of a set.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static CONVENTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9_]+?)[ _-]?([0-9]*)\.([A-Za-z0-9]+)$")
        .expect("convention pattern is valid")
});

/// Result of matching a file name against the naming convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamingConvention {
    /// Case-folded base token, used only for comparison.
    pub base_token: String,
    /// Base as it appears in the file name.
    pub display_base: String,
    /// Embedded number (0 when absent).
    pub number: u64,
}

impl NamingConvention {
    /// Whether two names follow the same convention.
    pub fn same_convention(&self, other: &NamingConvention) -> bool {
        self.base_token == other.base_token
    }
}

/// Match a file name. Returns `None` for names that do not fit the pattern.
pub fn match_convention(filename: &str) -> Option<NamingConvention> {
    let caps = CONVENTION_RE.captures(filename)?;
    let base = caps.get(1)?.as_str();
    let digits = caps.get(2).map(|m| m.as_str()).unwrap_or("");

    let number = if digits.is_empty() {
        0
    } else {
        digits.parse::<u64>().ok()?
    };

    Some(NamingConvention {
        base_token: base.to_lowercase(),
        display_base: base.to_string(),
        number,
    })
}

/// Whether every name matches and shares one base token.
pub fn is_consistent<'a, I>(names: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    let mut reference: Option<String> = None;
    for name in names {
        let Some(conv) = match_convention(name) else {
            return false;
        };
        match &reference {
            Some(base) if *base != conv.base_token => return false,
            Some(_) => {}
            None => reference = Some(conv.base_token),
        }
    }
    true
}
