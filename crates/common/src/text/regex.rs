//! Regular-expression conveniences on `str`
//!
//! Patterns are compiled on every call. Callers matching the same pattern in
//! a loop should compile a [`regex::Regex`] once instead.

use ::regex::Regex;

use crate::error::KitResult;

/// Regex helpers on `str`
pub trait RegexExt {
    /// Replace every match of `pattern` with `substitution`
    ///
    /// `substitution` may reference capture groups (`$1`, `${name}`).
    ///
    /// # Errors
    /// Returns a parse error when `pattern` is not a valid expression.
    fn applying_regex(&self, pattern: &str, substitution: &str) -> KitResult<String>;

    /// Whether `pattern` matches anywhere in the string
    ///
    /// # Errors
    /// Returns a parse error when `pattern` is not a valid expression.
    fn matches_regex(&self, pattern: &str) -> KitResult<bool>;

    /// Every match of `pattern`, in order
    ///
    /// # Errors
    /// Returns a parse error when `pattern` is not a valid expression.
    fn regex_matches(&self, pattern: &str) -> KitResult<Vec<String>>;
}

impl RegexExt for str {
    fn applying_regex(&self, pattern: &str, substitution: &str) -> KitResult<String> {
        let regex = Regex::new(pattern)?;
        Ok(regex.replace_all(self, substitution).into_owned())
    }

    fn matches_regex(&self, pattern: &str) -> KitResult<bool> {
        Ok(Regex::new(pattern)?.is_match(self))
    }

    fn regex_matches(&self, pattern: &str) -> KitResult<Vec<String>> {
        let regex = Regex::new(pattern)?;
        Ok(regex.find_iter(self).map(|m| m.as_str().to_string()).collect())
    }
}
