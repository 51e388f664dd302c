//! SLS version parsing, classification, and comparison.
//!
//! An SLS version is either *orderable* or *non-orderable*:
//! - Orderable versions follow one of four shapes: `1.2.3`, `1.2.3-rc4`,
//!   `1.2.3-5-gabc123` (commits past a tag) and `1.2.3-rc4-5-gabc123`.
//! - Non-orderable versions are `1.2.3` followed by a free-form suffix of
//!   dot or dash separated segments, e.g. `1.2.3-foo.dirty`. They carry no
//!   ordering and are only ever equal to themselves.
//!
//! At equal `major.minor.patch`, a release sorts above a release candidate,
//! which sorts above a commit-suffixed build.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ConstraintError;

static ORDERABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)(?:-rc(0|[1-9][0-9]*))?(?:-(0|[1-9][0-9]*)-g([0-9a-f]+))?$",
    )
    .expect("orderable version pattern is valid")
});

static NON_ORDERABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+)\.([0-9]+)\.([0-9]+)(?:[.-][A-Za-z0-9]+)*$")
        .expect("non-orderable version pattern is valid")
});

/// Which grammar a version string matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionKind {
    Orderable,
    NonOrderable,
}

/// A parsed SLS version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SlsVersion {
    Orderable(OrderableVersion),
    NonOrderable(NonOrderableVersion),
}

/// A strictly comparable version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderableVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub suffix: Suffix,
}

/// The part of an orderable version after `major.minor.patch`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Suffix {
    Release,
    ReleaseCandidate { rc: u32, commit: Option<CommitSuffix> },
    Commit(CommitSuffix),
}

/// `-<commits>-g<hash>`: a build some commits past a tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommitSuffix {
    pub commits: u32,
    pub hash: String,
}

/// A version that parses but has no defined order, e.g. `1.2.3-foo.dirty`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonOrderableVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    raw: String,
}

impl SlsVersion {
    /// Parse a version string, trying the orderable grammar first.
    pub fn parse(s: &str) -> Result<Self, ConstraintError> {
        if let Some(v) = OrderableVersion::parse(s) {
            return Ok(Self::Orderable(v));
        }
        NonOrderableVersion::parse(s)
            .map(Self::NonOrderable)
            .ok_or_else(|| ConstraintError::InvalidVersion(s.to_string()))
    }

    pub fn kind(&self) -> VersionKind {
        match self {
            Self::Orderable(_) => VersionKind::Orderable,
            Self::NonOrderable(_) => VersionKind::NonOrderable,
        }
    }

    pub fn is_orderable(&self) -> bool {
        matches!(self, Self::Orderable(_))
    }

    pub fn as_orderable(&self) -> Option<&OrderableVersion> {
        match self {
            Self::Orderable(v) => Some(v),
            Self::NonOrderable(_) => None,
        }
    }

    pub fn major(&self) -> u32 {
        match self {
            Self::Orderable(v) => v.major,
            Self::NonOrderable(v) => v.major,
        }
    }

    /// The plain release `major.minor.patch` this version builds on.
    pub fn base_release(&self) -> OrderableVersion {
        match self {
            Self::Orderable(v) => OrderableVersion::release(v.major, v.minor, v.patch),
            Self::NonOrderable(v) => OrderableVersion::release(v.major, v.minor, v.patch),
        }
    }

    /// Order two versions, or `None` if either one is non-orderable.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        Some(self.as_orderable()?.cmp(other.as_orderable()?))
    }
}

impl OrderableVersion {
    pub fn release(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            suffix: Suffix::Release,
        }
    }

    fn parse(s: &str) -> Option<Self> {
        let caps = ORDERABLE.captures(s)?;
        let num = |i: usize| caps.get(i).map(|m| m.as_str().parse::<u32>());

        let major = num(1)?.ok()?;
        let minor = num(2)?.ok()?;
        let patch = num(3)?.ok()?;
        let rc = num(4).transpose().ok()?;
        let commit = match (num(5).transpose().ok()?, caps.get(6)) {
            (Some(commits), Some(hash)) => Some(CommitSuffix {
                commits,
                hash: hash.as_str().to_string(),
            }),
            _ => None,
        };

        let suffix = match (rc, commit) {
            (None, None) => Suffix::Release,
            (Some(rc), commit) => Suffix::ReleaseCandidate { rc, commit },
            (None, Some(commit)) => Suffix::Commit(commit),
        };
        Some(Self {
            major,
            minor,
            patch,
            suffix,
        })
    }

    pub fn is_release(&self) -> bool {
        self.suffix == Suffix::Release
    }
}

impl NonOrderableVersion {
    fn parse(s: &str) -> Option<Self> {
        let caps = NON_ORDERABLE.captures(s)?;
        Some(Self {
            major: caps[1].parse().ok()?,
            minor: caps[2].parse().ok()?,
            patch: caps[3].parse().ok()?,
            raw: s.to_string(),
        })
    }
}

impl Suffix {
    fn rank(&self) -> u8 {
        match self {
            Suffix::Commit(_) => 0,
            Suffix::ReleaseCandidate { .. } => 1,
            Suffix::Release => 2,
        }
    }
}

impl Ord for Suffix {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (
                Suffix::ReleaseCandidate { rc: a, commit: ca },
                Suffix::ReleaseCandidate { rc: b, commit: cb },
            ) => a.cmp(b).then_with(|| match (ca, cb) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(ca), Some(cb)) => ca.cmp(cb),
            }),
            (Suffix::Commit(a), Suffix::Commit(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Suffix {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderableVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
            .then_with(|| self.suffix.cmp(&other.suffix))
    }
}

impl PartialOrd for OrderableVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for OrderableVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        match &self.suffix {
            Suffix::Release => Ok(()),
            Suffix::ReleaseCandidate { rc, commit } => {
                write!(f, "-rc{rc}")?;
                match commit {
                    Some(c) => write!(f, "-{}-g{}", c.commits, c.hash),
                    None => Ok(()),
                }
            }
            Suffix::Commit(c) => write!(f, "-{}-g{}", c.commits, c.hash),
        }
    }
}

impl fmt::Display for NonOrderableVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl fmt::Display for SlsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Orderable(v) => v.fmt(f),
            Self::NonOrderable(v) => v.fmt(f),
        }
    }
}

impl FromStr for SlsVersion {
    type Err = ConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<OrderableVersion> for SlsVersion {
    fn from(v: OrderableVersion) -> Self {
        Self::Orderable(v)
    }
}
