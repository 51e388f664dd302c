//! Wildcard version matchers used as maximum-version bounds.
//!
//! A matcher pins a prefix of `major.minor.patch` and leaves the rest as
//! `x`: `1.2.x`, `1.x.x` or `x.x.x`. Everywhere a matcher is ordered, an
//! absent component sorts as +infinity, so a pinned component is always a
//! tighter upper bound than a wildcard.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ConstraintError;
use crate::version::{OrderableVersion, SlsVersion};

static MATCHER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:x\.x\.x|(0|[1-9][0-9]*)\.x\.x|(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)\.x)$")
        .expect("matcher pattern is valid")
});

/// An upper-bound version matcher.
///
/// Invariant: once a component is absent every more specific component is
/// absent too. The fields are private so that only the parsers can build one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VersionMatcher {
    major: Option<u32>,
    minor: Option<u32>,
    patch: Option<u32>,
}

impl VersionMatcher {
    /// The fully open matcher `x.x.x`.
    pub const ANY: Self = Self {
        major: None,
        minor: None,
        patch: None,
    };

    /// Parse one of the wildcard shapes `X.Y.x`, `X.x.x` or `x.x.x`.
    pub fn parse(s: &str) -> Result<Self, ConstraintError> {
        let invalid = || ConstraintError::InvalidMatcher(s.to_string());
        let caps = MATCHER.captures(s).ok_or_else(invalid)?;
        let num = |i: usize| -> Result<Option<u32>, ConstraintError> {
            caps.get(i)
                .map(|m| m.as_str().parse::<u32>().map_err(|_| invalid()))
                .transpose()
        };

        if let Some(major) = num(1)? {
            return Ok(Self::major_only(major));
        }
        match (num(2)?, num(3)?) {
            (Some(major), Some(minor)) => Ok(Self::major_minor(major, minor)),
            _ => Ok(Self::ANY),
        }
    }

    /// Parse a maximum-version bound: a wildcard matcher, or a concrete
    /// release `X.Y.Z` which pins every component.
    pub fn parse_bound(s: &str) -> Result<Self, ConstraintError> {
        if let Ok(matcher) = Self::parse(s) {
            return Ok(matcher);
        }
        match SlsVersion::parse(s) {
            Ok(SlsVersion::Orderable(v)) if v.is_release() => Ok(Self::exact(&v)),
            _ => Err(ConstraintError::InvalidMatcher(s.to_string())),
        }
    }

    /// The matcher `<major>.x.x`.
    pub fn major_only(major: u32) -> Self {
        Self {
            major: Some(major),
            minor: None,
            patch: None,
        }
    }

    /// The matcher `<major>.<minor>.x`.
    pub fn major_minor(major: u32, minor: u32) -> Self {
        Self {
            major: Some(major),
            minor: Some(minor),
            patch: None,
        }
    }

    /// A matcher pinning all three components of `version`.
    pub fn exact(version: &OrderableVersion) -> Self {
        Self {
            major: Some(version.major),
            minor: Some(version.minor),
            patch: Some(version.patch),
        }
    }

    pub fn major(&self) -> Option<u32> {
        self.major
    }

    pub fn minor(&self) -> Option<u32> {
        self.minor
    }

    pub fn patch(&self) -> Option<u32> {
        self.patch
    }

    fn components(&self) -> [Option<u32>; 3] {
        [self.major, self.minor, self.patch]
    }

    /// True iff every pinned component equals the version's component.
    pub fn accepts(&self, version: &OrderableVersion) -> bool {
        let actual = [version.major, version.minor, version.patch];
        self.components()
            .iter()
            .zip(actual)
            .all(|(pinned, v)| pinned.map_or(true, |p| p == v))
    }

    /// Position of this bound relative to `version`.
    ///
    /// `Greater` means the version lies below the bound, `Equal` that every
    /// pinned component matches exactly with nothing left open, and `Less`
    /// that the version is above the bound.
    pub fn compare(&self, version: &OrderableVersion) -> Ordering {
        let actual = [version.major, version.minor, version.patch];
        for (pinned, v) in self.components().iter().zip(actual) {
            match pinned {
                None => return Ordering::Greater,
                Some(p) => match p.cmp(&v) {
                    Ordering::Equal => {}
                    other => return other,
                },
            }
        }
        Ordering::Equal
    }

    /// True when `version` does not exceed this bound.
    pub fn admits(&self, version: &OrderableVersion) -> bool {
        self.compare(version) != Ordering::Less
    }

    /// Order two matchers by how tight an upper bound they are: the smaller
    /// one is the more restrictive.
    pub fn compare_restrictiveness(&self, other: &Self) -> Ordering {
        for (a, b) in self.components().iter().zip(other.components()) {
            let ord = match (a, b) {
                (None, None) => return Ordering::Equal,
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (Some(a), Some(b)) => a.cmp(&b),
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }

    /// The tighter of two bounds. Equal bounds are identical values, so
    /// which side is returned on a tie does not matter.
    pub fn most_restrictive(self, other: Self) -> Self {
        std::cmp::min(self, other)
    }
}

impl Ord for VersionMatcher {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_restrictiveness(other)
    }
}

impl PartialOrd for VersionMatcher {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for VersionMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .components()
            .iter()
            .map(|c| c.map_or_else(|| "x".to_string(), |n| n.to_string()))
            .collect();
        f.write_str(&parts.join("."))
    }
}

impl FromStr for VersionMatcher {
    type Err = ConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(s: &str) -> VersionMatcher {
        VersionMatcher::parse_bound(s).unwrap()
    }

    fn v(s: &str) -> OrderableVersion {
        SlsVersion::parse(s).unwrap().as_orderable().cloned().unwrap()
    }

    #[test]
    fn parses_wildcard_shapes() {
        assert_eq!(m("1.2.x").to_string(), "1.2.x");
        assert_eq!(m("1.x.x").to_string(), "1.x.x");
        assert_eq!(m("x.x.x"), VersionMatcher::ANY);
    }

    #[test]
    fn rejects_other_shapes() {
        for s in ["1.2.3", "x.2.x", "1.x.3", "x.x.3", "1.2", "1.2.x.x", "01.x.x", ""] {
            assert_eq!(
                VersionMatcher::parse(s),
                Err(ConstraintError::InvalidMatcher(s.to_string())),
                "{s}"
            );
        }
    }

    #[test]
    fn parse_bound_accepts_release_only() {
        assert_eq!(m("1.2.3").to_string(), "1.2.3");
        assert!(VersionMatcher::parse_bound("1.2.3-rc1").is_err());
        assert!(VersionMatcher::parse_bound("1.2.3-foo.dirty").is_err());
    }

    #[test]
    fn accepts_checks_pinned_components_only() {
        assert!(m("1.2.x").accepts(&v("1.2.0")));
        assert!(m("1.2.x").accepts(&v("1.2.99-rc1")));
        assert!(!m("1.2.x").accepts(&v("1.3.0")));
        assert!(!m("1.2.x").accepts(&v("1.1.9")));
        assert!(m("x.x.x").accepts(&v("42.0.0")));
    }

    #[test]
    fn compare_as_upper_bound() {
        assert_eq!(m("1.2.x").compare(&v("1.1.0")), Ordering::Greater);
        assert_eq!(m("1.2.x").compare(&v("1.2.7")), Ordering::Greater);
        assert_eq!(m("1.2.x").compare(&v("1.3.0")), Ordering::Less);
        assert_eq!(m("1.2.3").compare(&v("1.2.3")), Ordering::Equal);
        assert_eq!(m("1.2.3").compare(&v("1.2.4")), Ordering::Less);
        assert_eq!(m("x.x.x").compare(&v("9.9.9")), Ordering::Greater);
    }

    #[test]
    fn restrictiveness_treats_wildcards_as_infinite() {
        assert_eq!(m("1.2.x").compare_restrictiveness(&m("1.x.x")), Ordering::Less);
        assert_eq!(m("1.x.x").compare_restrictiveness(&m("2.x.x")), Ordering::Less);
        assert_eq!(m("2.0.x").compare_restrictiveness(&m("1.x.x")), Ordering::Greater);
        assert_eq!(m("1.2.3").compare_restrictiveness(&m("1.2.x")), Ordering::Less);
        assert_eq!(m("x.x.x").compare_restrictiveness(&m("x.x.x")), Ordering::Equal);
        assert_eq!(m("1.x.x").most_restrictive(m("1.3.x")), m("1.3.x"));
    }
}
