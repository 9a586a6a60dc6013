//! Validated pattern types for package paths and member names.
//!
//! Package patterns use the dotted notation common to JVM-style
//! architecture tooling: `*` matches exactly one package segment and
//! `..` matches any run of segments, including an empty one. Examples:
//! `java..`, `..domain.model..`, `com.acme.*.adapter`.

use std::fmt;

/// Errors in pattern construction.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PatternError {
    /// Package pattern is empty.
    #[error("package pattern must not be empty")]
    EmptyPackagePattern,

    /// Package pattern contains an invalid segment.
    #[error("invalid package pattern `{pattern}`: segment `{segment}` must be [A-Za-z0-9_] or `*`")]
    InvalidSegment {
        /// The full pattern.
        pattern: String,
        /// The offending segment.
        segment: String,
    },

    /// Name pattern is empty.
    #[error("name pattern must not be empty")]
    EmptyNamePattern,

    /// Name pattern has invalid regex syntax.
    #[error("invalid name pattern `{pattern}`: {reason}")]
    InvalidNamePattern {
        /// The invalid pattern.
        pattern: String,
        /// Why it's invalid.
        reason: String,
    },
}

/// One token of a compiled package pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    /// A literal package segment.
    Literal(String),
    /// `*` — exactly one segment.
    AnyOne,
    /// `..` — zero or more segments.
    AnyRun,
}

/// A validated package pattern over dot-separated package paths.
///
/// The pattern is tokenized once at construction and reused for all
/// match calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagePattern {
    raw: String,
    tokens: Vec<Token>,
}

impl PackagePattern {
    /// Creates a new package pattern.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if the pattern is empty or contains a
    /// segment with characters outside `[A-Za-z0-9_]` / `*`.
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        if pattern.is_empty() {
            return Err(PatternError::EmptyPackagePattern);
        }

        let mut tokens = Vec::new();
        // Leading/trailing `..` produce empty segments when splitting on
        // '.', as does every interior `..`. A run of empty segments
        // collapses into a single AnyRun token.
        let mut pending_run = false;
        for segment in pattern.split('.') {
            if segment.is_empty() {
                if !pending_run {
                    tokens.push(Token::AnyRun);
                    pending_run = true;
                }
                continue;
            }
            pending_run = false;
            if segment == "*" {
                tokens.push(Token::AnyOne);
            } else if segment
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
            {
                tokens.push(Token::Literal(segment.to_string()));
            } else {
                return Err(PatternError::InvalidSegment {
                    pattern: pattern.to_string(),
                    segment: segment.to_string(),
                });
            }
        }

        Ok(Self {
            raw: pattern.to_string(),
            tokens,
        })
    }

    /// Tests whether a dot-separated package path matches this pattern.
    #[must_use]
    pub fn matches(&self, package: &str) -> bool {
        if package.is_empty() {
            return self.tokens.iter().all(|t| matches!(t, Token::AnyRun));
        }
        let segments: Vec<&str> = package.split('.').collect();
        match_tokens(&segments, &self.tokens)
    }

    /// Tests whether the package of a qualified class name matches.
    ///
    /// The package path is everything before the last `.` of the
    /// qualified name; a bare name has an empty package.
    #[must_use]
    pub fn matches_class(&self, qualified_name: &str) -> bool {
        let package = qualified_name
            .rsplit_once('.')
            .map_or("", |(pkg, _)| pkg);
        self.matches(package)
    }

    /// Returns the pattern as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for PackagePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

fn match_tokens(segments: &[&str], tokens: &[Token]) -> bool {
    let Some((first, rest)) = tokens.split_first() else {
        return segments.is_empty();
    };

    match first {
        Token::AnyRun => {
            // Try consuming zero or more segments.
            (0..=segments.len()).any(|i| match_tokens(&segments[i..], rest))
        }
        Token::AnyOne => !segments.is_empty() && match_tokens(&segments[1..], rest),
        Token::Literal(lit) => {
            segments.first().is_some_and(|s| *s == lit.as_str())
                && match_tokens(&segments[1..], rest)
        }
    }
}

/// A validated, implicitly anchored regex over simple member names.
///
/// `set.*` matches `setName` but a name merely containing `set` in the
/// middle does not match — the regex must cover the whole name.
#[derive(Debug, Clone)]
pub struct NamePattern {
    raw: String,
    regex: regex::Regex,
}

impl NamePattern {
    /// Creates a new name pattern.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if the pattern is empty or is not a
    /// valid regex.
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        if pattern.is_empty() {
            return Err(PatternError::EmptyNamePattern);
        }
        let anchored = format!("^(?:{pattern})$");
        let regex = regex::Regex::new(&anchored).map_err(|e| PatternError::InvalidNamePattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            raw: pattern.to_string(),
            regex,
        })
    }

    /// Tests whether a name matches the full pattern.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    /// Returns the pattern as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for NamePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl PartialEq for NamePattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for NamePattern {}

#[cfg(test)]
mod tests {
    use super::*;

    // -- PackagePattern --

    #[test]
    fn package_pattern_empty_rejected() {
        assert!(matches!(
            PackagePattern::new(""),
            Err(PatternError::EmptyPackagePattern)
        ));
    }

    #[test]
    fn package_pattern_invalid_segment_rejected() {
        assert!(matches!(
            PackagePattern::new("com.acme.dom ain"),
            Err(PatternError::InvalidSegment { .. })
        ));
    }

    #[test]
    fn literal_pattern_matches_exact() {
        let pat = PackagePattern::new("com.acme.domain").unwrap();
        assert!(pat.matches("com.acme.domain"));
        assert!(!pat.matches("com.acme.domain.model"));
        assert!(!pat.matches("com.acme"));
    }

    #[test]
    fn trailing_dotdot_matches_subpackages() {
        let pat = PackagePattern::new("com.acme.domain..").unwrap();
        assert!(pat.matches("com.acme.domain"));
        assert!(pat.matches("com.acme.domain.model"));
        assert!(pat.matches("com.acme.domain.model.order"));
        assert!(!pat.matches("com.acme.domains"));
        assert!(!pat.matches("com.acme.application"));
    }

    #[test]
    fn leading_dotdot_matches_any_prefix() {
        let pat = PackagePattern::new("..domain.model..").unwrap();
        assert!(pat.matches("com.acme.domain.model"));
        assert!(pat.matches("domain.model"));
        assert!(pat.matches("com.acme.domain.model.order"));
        assert!(!pat.matches("com.acme.domain.service"));
    }

    #[test]
    fn star_matches_exactly_one_segment() {
        let pat = PackagePattern::new("com.*.domain").unwrap();
        assert!(pat.matches("com.acme.domain"));
        assert!(!pat.matches("com.domain"));
        assert!(!pat.matches("com.a.b.domain"));
    }

    #[test]
    fn external_prefix_pattern() {
        let pat = PackagePattern::new("java..").unwrap();
        assert!(pat.matches("java.util"));
        assert!(pat.matches("java.time.format"));
        assert!(!pat.matches("javax.validation"));
    }

    #[test]
    fn matches_class_uses_package_of_qualified_name() {
        let pat = PackagePattern::new("..domain.model..").unwrap();
        assert!(pat.matches_class("com.acme.domain.model.Order"));
        assert!(!pat.matches_class("com.acme.domain.service.OrderService"));
    }

    #[test]
    fn matches_class_with_bare_name() {
        let pat = PackagePattern::new("..").unwrap();
        assert!(pat.matches_class("Order"));
        let specific = PackagePattern::new("domain..").unwrap();
        assert!(!specific.matches_class("Order"));
    }

    // -- NamePattern --

    #[test]
    fn name_pattern_empty_rejected() {
        assert!(matches!(
            NamePattern::new(""),
            Err(PatternError::EmptyNamePattern)
        ));
    }

    #[test]
    fn name_pattern_invalid_regex_rejected() {
        assert!(matches!(
            NamePattern::new("set[("),
            Err(PatternError::InvalidNamePattern { .. })
        ));
    }

    #[test]
    fn name_pattern_is_anchored() {
        let pat = NamePattern::new("set.*").unwrap();
        assert!(pat.matches("setName"));
        assert!(pat.matches("set"));
        assert!(!pat.matches("offsetOf"));
        assert!(!pat.matches("reset"));
    }
}
