//! Exclusion patterns for the tree walker.

use crate::bundler::{Error, Result};
use glob::{MatchOptions, Pattern};

/// `*` is allowed to cross `/`, so `*.scss` also excludes `css/site.scss`.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Compiled list of shell-glob exclusion patterns.
///
/// Patterns are matched against the `/`-joined relative id of each file.
/// Compilation happens up front, so a malformed pattern aborts the build
/// before any file is touched.
#[derive(Clone, Debug, Default)]
pub struct ExcludeMatcher {
    patterns: Vec<Pattern>,
    /// Leading part of every `<prefix>/*` pattern; a directory whose id plus
    /// `/` matches one of these has every descendant excluded.
    subtrees: Vec<Pattern>,
}

impl ExcludeMatcher {
    /// Compiles `patterns`, skipping empty entries.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] for the first pattern that does not parse.
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .filter(|p| !p.as_ref().trim().is_empty())
            .map(|p| {
                let p = p.as_ref().trim();
                Pattern::new(p).map_err(|error| Error::InvalidPattern {
                    pattern: p.to_string(),
                    error,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let subtrees = patterns.iter().filter_map(subtree_prefix).collect();
        Ok(Self { patterns, subtrees })
    }

    /// True when `relative_id` matches any pattern.
    pub fn should_exclude(&self, relative_id: &str) -> bool {
        self.patterns
            .iter()
            .any(|p| p.matches_with(relative_id, MATCH_OPTIONS))
    }

    /// True when every file below the directory `dir_id` would be excluded,
    /// so the walker need not descend into it.
    pub fn excludes_subtree(&self, dir_id: &str) -> bool {
        let dir = format!("{dir_id}/");
        self.subtrees
            .iter()
            .any(|p| p.matches_with(&dir, MATCH_OPTIONS))
    }

    /// Number of active patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// True when nothing is excluded.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// `templates/*` → `templates/`. Only patterns ending in `/` followed by
/// `*` qualify, since `*` then matches any remainder of the id.
fn subtree_prefix(pattern: &Pattern) -> Option<Pattern> {
    let prefix = pattern.as_str().trim_end_matches('*');
    if prefix.len() == pattern.as_str().len() || !prefix.ends_with('/') {
        return None;
    }
    Pattern::new(prefix).ok()
}

/// Glob match used by the runtime accessors; same rules as the exclusion list.
pub(crate) fn matches(pattern: &Pattern, name: &str) -> bool {
    pattern.matches_with(name, MATCH_OPTIONS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excludes_matching_ids_only() {
        let matcher = ExcludeMatcher::new(["*.scss", "templates/*"]).unwrap();
        assert!(matcher.should_exclude("templates/foo.html"));
        assert!(matcher.should_exclude("assets/foo.scss"));
        assert!(!matcher.should_exclude("assets/foo.css"));
        assert!(!matcher.should_exclude("templates.html"));
    }

    #[test]
    fn subtrees_are_pruned_only_when_fully_excluded() {
        let matcher = ExcludeMatcher::new(["node_modules/*", "*/cache/*", "*.scss", "docs/?"]).unwrap();
        assert!(matcher.excludes_subtree("node_modules"));
        assert!(matcher.excludes_subtree("img/cache"));
        assert!(!matcher.excludes_subtree("node_modules_extra"));
        assert!(!matcher.excludes_subtree("css"));
        assert!(!matcher.excludes_subtree("docs"));
        assert!(!ExcludeMatcher::default().excludes_subtree("anything"));
    }

    #[test]
    fn empty_entries_are_ignored() {
        let matcher = ExcludeMatcher::new(["", " ", "*.map"]).unwrap();
        assert_eq!(matcher.len(), 1);
        assert!(!matcher.should_exclude(""));
        assert!(matcher.should_exclude("app.js.map"));
    }

    #[test]
    fn no_patterns_excludes_nothing() {
        let matcher = ExcludeMatcher::default();
        assert!(matcher.is_empty());
        assert!(!matcher.should_exclude("index.html"));
    }

    #[test]
    fn malformed_pattern_is_an_error() {
        let err = ExcludeMatcher::new(["ok/*", "[unclosed"]).unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { ref pattern, .. } if pattern == "[unclosed"));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let matcher = ExcludeMatcher::new(["*.PNG"]).unwrap();
        assert!(matcher.should_exclude("img/logo.PNG"));
        assert!(!matcher.should_exclude("img/logo.png"));
    }
}
