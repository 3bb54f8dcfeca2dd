//! Source path rewriting.
//!
//! Maps a repository-relative markdown path to the path it is published
//! under. Rules are tried in declaration order and the first match wins;
//! a path no rule matches is published unchanged.
//!
//! Two pattern shapes are understood:
//! - a literal path (`index.md`), matching only that exact path
//! - a single named capture followed by a fixed suffix
//!   (`:path(.*).md`), where the capture spans any number of directories
//!
//! # Example
//!
//! ```
//! use ppdocs_site::RewriteRuleSet;
//!
//! let rules = RewriteRuleSet::defaults();
//! assert_eq!(rules.rewrite("index.md"), "index.md");
//! assert_eq!(
//!     rules.rewrite("configuration/config-file.md"),
//!     "configuration/config-file/index.md"
//! );
//! ```

use std::borrow::Cow;
use std::fmt;

use ppdocs_config::RewriteSettings;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// The only capture group form accepted after a placeholder name.
const CAPTURE_ALL: &str = "(.*)";

/// Error returned when a rewrite rule cannot be parsed.
#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
    /// Pattern uses syntax outside the supported shapes.
    #[error("Invalid rewrite pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// Pattern as written.
        pattern: String,
        /// What is wrong with it.
        reason: String,
    },
    /// Template does not fit its pattern.
    #[error("Invalid rewrite template '{template}': {reason}")]
    InvalidTemplate {
        /// Template as written.
        template: String,
        /// What is wrong with it.
        reason: String,
    },
    /// Two rules share the same pattern.
    #[error("Duplicate rewrite pattern '{0}'")]
    DuplicatePattern(String),
}

/// Output path with one placeholder for the captured prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathTemplate {
    name: String,
    before: String,
    after: String,
}

impl PathTemplate {
    /// Parse a template that must reference `:name` exactly once.
    fn parse(template: &str, name: &str) -> Result<Self, RewriteError> {
        let placeholder = format!(":{name}");
        let invalid = |reason: String| RewriteError::InvalidTemplate {
            template: template.to_owned(),
            reason,
        };

        let mut parts = template.splitn(2, &placeholder);
        let before = parts.next().unwrap_or_default();
        let Some(after) = parts.next() else {
            return Err(invalid(format!("missing placeholder {placeholder}")));
        };
        if before.contains(':') || after.contains(':') {
            return Err(invalid(format!(
                "only the {placeholder} placeholder may appear, exactly once"
            )));
        }
        // `:pathname` must not be read as `:path` followed by `name`.
        if after.starts_with(is_name_char) {
            return Err(invalid(format!("missing placeholder {placeholder}")));
        }

        Ok(Self {
            name: name.to_owned(),
            before: before.to_owned(),
            after: after.to_owned(),
        })
    }

    /// Substitute the captured prefix into the template.
    #[must_use]
    pub fn render(&self, captured: &str) -> String {
        format!("{}{captured}{}", self.before, self.after)
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}{}", self.before, self.name, self.after)
    }
}

/// A single rewrite rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RewriteRule {
    /// Matches one literal path.
    Exact {
        /// Path to match.
        literal: String,
        /// Path to publish it under.
        target: String,
    },
    /// Matches `<captured prefix><suffix>` for any non-empty prefix that
    /// does not end in a path separator.
    Capture {
        /// Placeholder name (`path` in `:path(.*).md`).
        name: String,
        /// Fixed suffix following the capture.
        suffix: String,
        /// Output template referencing the capture.
        template: PathTemplate,
    },
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

impl RewriteRule {
    /// Parse a rule from its pattern and template.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError`] when the pattern is neither a literal path
    /// nor a single `:name(.*)` capture followed by a literal suffix, or
    /// when the template does not reference the capture exactly once.
    pub fn parse(pattern: &str, template: &str) -> Result<Self, RewriteError> {
        let invalid = |reason: &str| RewriteError::InvalidPattern {
            pattern: pattern.to_owned(),
            reason: reason.to_owned(),
        };

        if pattern.is_empty() {
            return Err(invalid("pattern cannot be empty"));
        }

        if !pattern.contains([':', '(', ')', '*']) {
            if template.contains(':') {
                return Err(RewriteError::InvalidTemplate {
                    template: template.to_owned(),
                    reason: "literal patterns have no capture to substitute".to_owned(),
                });
            }
            return Ok(Self::Exact {
                literal: pattern.to_owned(),
                target: template.to_owned(),
            });
        }

        let Some(rest) = pattern.strip_prefix(':') else {
            return Err(invalid("capture must start the pattern"));
        };
        let name_len = rest.find(|c: char| !is_name_char(c)).unwrap_or(rest.len());
        let (name, rest) = rest.split_at(name_len);
        if name.is_empty() {
            return Err(invalid("capture needs a name"));
        }
        let Some(suffix) = rest.strip_prefix(CAPTURE_ALL) else {
            return Err(invalid("only the (.*) capture group is supported"));
        };
        if suffix.is_empty() {
            return Err(invalid("capture must be followed by a fixed suffix"));
        }
        if suffix.contains([':', '(', ')', '*']) {
            return Err(invalid("only a single capture is supported"));
        }

        Ok(Self::Capture {
            name: name.to_owned(),
            suffix: suffix.to_owned(),
            template: PathTemplate::parse(template, name)?,
        })
    }

    /// Pattern text, as it would be written in configuration.
    #[must_use]
    pub fn pattern(&self) -> String {
        match self {
            Self::Exact { literal, .. } => literal.clone(),
            Self::Capture { name, suffix, .. } => format!(":{name}{CAPTURE_ALL}{suffix}"),
        }
    }

    /// Template text, as it would be written in configuration.
    #[must_use]
    pub fn template(&self) -> String {
        match self {
            Self::Exact { target, .. } => target.clone(),
            Self::Capture { template, .. } => template.to_string(),
        }
    }

    /// Check whether the rule matches `path`.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        self.apply(path).is_some()
    }

    /// Rewrite `path` if the rule matches it.
    #[must_use]
    pub fn apply(&self, path: &str) -> Option<String> {
        match self {
            Self::Exact { literal, target } => (path == literal).then(|| target.clone()),
            Self::Capture {
                suffix, template, ..
            } => path
                .strip_suffix(suffix.as_str())
                .filter(|captured| !captured.is_empty() && !captured.ends_with('/'))
                .map(|captured| template.render(captured)),
        }
    }
}

/// Ordered set of rewrite rules with first-match-wins semantics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RewriteRuleSet {
    rules: Vec<RewriteRule>,
}

impl RewriteRuleSet {
    /// Create an empty rule set (every path passes through unchanged).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in rules for the documentation site.
    ///
    /// 1. `index.md` stays at the site root.
    /// 2. `:path(.*)/index.md` is already canonical and stays put.
    /// 3. `:path(.*).md` becomes `:path/index.md`.
    #[must_use]
    pub fn defaults() -> Self {
        let capture = |suffix: &str| RewriteRule::Capture {
            name: "path".to_owned(),
            suffix: suffix.to_owned(),
            template: PathTemplate {
                name: "path".to_owned(),
                before: String::new(),
                after: "/index.md".to_owned(),
            },
        };

        Self {
            rules: vec![
                RewriteRule::Exact {
                    literal: "index.md".to_owned(),
                    target: "index.md".to_owned(),
                },
                capture("/index.md"),
                capture(".md"),
            ],
        }
    }

    /// Built-in rules followed by rules from the settings file.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError`] if a configured rule cannot be parsed or
    /// repeats an existing pattern.
    pub fn with_settings(settings: &[RewriteSettings]) -> Result<Self, RewriteError> {
        let mut rules = Self::defaults();
        for rule in settings {
            rules.push(RewriteRule::parse(&rule.pattern, &rule.template)?)?;
        }
        Ok(rules)
    }

    /// Append a rule after the existing ones.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::DuplicatePattern`] if a rule with the same
    /// pattern is already present.
    pub fn push(&mut self, rule: RewriteRule) -> Result<(), RewriteError> {
        let pattern = rule.pattern();
        if self.rules.iter().any(|r| r.pattern() == pattern) {
            return Err(RewriteError::DuplicatePattern(pattern));
        }
        self.rules.push(rule);
        Ok(())
    }

    /// Rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[RewriteRule] {
        &self.rules
    }

    /// First rule matching `path`, if any.
    #[must_use]
    pub fn matching_rule(&self, path: &str) -> Option<&RewriteRule> {
        self.rules.iter().find(|rule| rule.matches(path))
    }

    /// Rewrite `path` with the first matching rule.
    ///
    /// Returns `path` unchanged when no rule matches.
    #[must_use]
    pub fn rewrite<'a>(&self, path: &'a str) -> Cow<'a, str> {
        self.rules
            .iter()
            .find_map(|rule| rule.apply(path))
            .map_or(Cow::Borrowed(path), Cow::Owned)
    }
}

impl Serialize for RewriteRuleSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rules.len()))?;
        for rule in &self.rules {
            map.serialize_entry(&rule.pattern(), &rule.template())?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_root_document_keeps_exact_rule() {
        let rules = RewriteRuleSet::defaults();

        assert_eq!(rules.rewrite("index.md"), "index.md");
        assert!(matches!(
            rules.matching_rule("index.md"),
            Some(RewriteRule::Exact { .. })
        ));
    }

    #[test]
    fn test_page_moves_into_directory() {
        let rules = RewriteRuleSet::defaults();

        assert_eq!(
            rules.rewrite("configuration/config-file.md"),
            "configuration/config-file/index.md"
        );
    }

    #[test]
    fn test_capture_spans_multiple_directories() {
        let rules = RewriteRuleSet::defaults();

        assert_eq!(rules.rewrite("a/b/c/d.md"), "a/b/c/d/index.md");
        assert_eq!(rules.rewrite("top.md"), "top/index.md");
    }

    #[test]
    fn test_canonical_path_is_unchanged() {
        let rules = RewriteRuleSet::defaults();

        assert_eq!(
            rules.rewrite("getting-started/introduction/index.md"),
            "getting-started/introduction/index.md"
        );
    }

    #[test]
    fn test_rewrite_is_idempotent() {
        let rules = RewriteRuleSet::defaults();

        for path in [
            "index.md",
            "configuration/config-file.md",
            "getting-started/introduction/index.md",
            "assets/logo.svg",
        ] {
            let once = rules.rewrite(path).into_owned();
            assert_eq!(rules.rewrite(&once), once, "not idempotent for {path}");
        }
    }

    #[test]
    fn test_unmatched_path_passes_through() {
        let rules = RewriteRuleSet::defaults();

        let result = rules.rewrite("public/logo.svg");

        assert!(matches!(result, Cow::Borrowed("public/logo.svg")));
        assert!(rules.matching_rule("public/logo.svg").is_none());
    }

    #[test]
    fn test_empty_rule_set_is_identity() {
        let rules = RewriteRuleSet::new();

        assert_eq!(rules.rewrite("configuration/server.md"), "configuration/server.md");
    }

    #[test]
    fn test_first_match_wins() {
        let mut rules = RewriteRuleSet::new();
        rules
            .push(RewriteRule::parse("guide/setup.md", "setup.md").unwrap())
            .unwrap();
        rules
            .push(RewriteRule::parse(":page(.*).md", ":page/index.md").unwrap())
            .unwrap();

        assert_eq!(rules.rewrite("guide/setup.md"), "setup.md");
        assert_eq!(rules.rewrite("guide/other.md"), "guide/other/index.md");
    }

    #[test]
    fn test_result_equals_first_matching_rule_alone() {
        let rules = RewriteRuleSet::defaults();

        for path in ["index.md", "a/index.md", "a/b.md"] {
            let first = rules.matching_rule(path).unwrap();
            assert_eq!(rules.rewrite(path), first.apply(path).unwrap());
        }
    }

    #[test]
    fn test_capture_requires_non_empty_prefix() {
        let rule = RewriteRule::parse(":path(.*).md", ":path/index.md").unwrap();

        assert!(!rule.matches(".md"));
        assert!(rule.matches("a.md"));
    }

    #[test]
    fn test_capture_rejects_trailing_separator() {
        let rule = RewriteRule::parse(":path(.*).md", ":path/index.md").unwrap();
        let rules = RewriteRuleSet::defaults();

        assert!(!rule.matches("drafts/.md"));
        assert_eq!(rules.rewrite("drafts/.md"), "drafts/.md");
        assert_eq!(rules.rewrite("drafts/a.md"), "drafts/a/index.md");
    }

    #[test]
    fn test_parse_literal() {
        let rule = RewriteRule::parse("old/page.md", "new/page.md").unwrap();

        assert_eq!(
            rule,
            RewriteRule::Exact {
                literal: "old/page.md".to_owned(),
                target: "new/page.md".to_owned(),
            }
        );
    }

    #[test]
    fn test_parse_capture_round_trips_text() {
        let rule = RewriteRule::parse(":path(.*)/README.md", "docs/:path/index.md").unwrap();

        assert_eq!(rule.pattern(), ":path(.*)/README.md");
        assert_eq!(rule.template(), "docs/:path/index.md");
        assert_eq!(
            rule.apply("guide/README.md").as_deref(),
            Some("docs/guide/index.md")
        );
    }

    #[test]
    fn test_parse_rejects_unsupported_patterns() {
        for pattern in [
            "",
            "docs/:path(.*).md",
            ":(.*).md",
            ":path([a-z]+).md",
            ":path(.*)",
            ":path(.*)/:file(.*).md",
        ] {
            let err = RewriteRule::parse(pattern, ":path/index.md").unwrap_err();
            assert!(
                matches!(err, RewriteError::InvalidPattern { .. }),
                "expected pattern error for {pattern:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_parse_rejects_bad_templates() {
        for template in ["index.md", ":other/index.md", ":path/:path.md", ":pathname.md"] {
            let err = RewriteRule::parse(":path(.*).md", template).unwrap_err();
            assert!(
                matches!(err, RewriteError::InvalidTemplate { .. }),
                "expected template error for {template:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_literal_pattern_rejects_placeholder_template() {
        let err = RewriteRule::parse("index.md", ":path/index.md").unwrap_err();

        assert!(matches!(err, RewriteError::InvalidTemplate { .. }));
    }

    #[test]
    fn test_with_settings_appends_after_defaults() {
        let settings = vec![RewriteSettings {
            pattern: ":path(.*).markdown".to_owned(),
            template: ":path/index.md".to_owned(),
        }];

        let rules = RewriteRuleSet::with_settings(&settings).unwrap();

        assert_eq!(rules.rules().len(), 4);
        assert_eq!(rules.rewrite("guide/setup.markdown"), "guide/setup/index.md");
        assert_eq!(rules.rewrite("index.md"), "index.md");
    }

    #[test]
    fn test_with_settings_rejects_duplicate_pattern() {
        let settings = vec![RewriteSettings {
            pattern: "index.md".to_owned(),
            template: "home.md".to_owned(),
        }];

        let err = RewriteRuleSet::with_settings(&settings).unwrap_err();

        assert!(matches!(err, RewriteError::DuplicatePattern(ref p) if p == "index.md"));
    }

    #[test]
    fn test_serializes_as_ordered_map() {
        let rules = RewriteRuleSet::defaults();

        let json = serde_json::to_string(&rules).unwrap();

        assert_eq!(
            json,
            r#"{"index.md":"index.md",":path(.*)/index.md":":path/index.md",":path(.*).md":":path/index.md"}"#
        );
    }
}
