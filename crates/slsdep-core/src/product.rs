//! Product ids and validated product dependencies.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::ConstraintError;
use crate::matcher::VersionMatcher;
use crate::version::SlsVersion;

/// The `(group, name)` key products are merged and looked up by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductId {
    pub group: String,
    pub name: String,
}

impl ProductId {
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
        }
    }

    /// Parse `"group:name"`.
    pub fn parse(s: &str) -> Result<Self, ConstraintError> {
        match s.split_once(':') {
            Some((group, name))
                if !group.is_empty() && !name.is_empty() && !name.contains(':') =>
            {
                Ok(Self::new(group, name))
            }
            _ => Err(ConstraintError::InvalidProductId(s.to_string())),
        }
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.name)
    }
}

impl FromStr for ProductId {
    type Err = ConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A dependency on another product, constrained to a version range.
///
/// Instances can only be obtained through the validating constructors, so
/// every value in hand satisfies:
/// - group and name are non-empty and free of `:` and whitespace;
/// - the minimum and maximum render differently;
/// - the maximum admits the minimum;
/// - a recommended version lies within `[minimum, maximum]`.
///
/// A non-orderable version is checked against the maximum by its
/// `major.minor.patch` only, and comparisons against it are skipped with a
/// warning.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductDependency {
    id: ProductId,
    minimum: SlsVersion,
    maximum: VersionMatcher,
    recommended: Option<SlsVersion>,
    optional: bool,
}

impl ProductDependency {
    pub fn new(
        id: ProductId,
        minimum: SlsVersion,
        maximum: VersionMatcher,
        recommended: Option<SlsVersion>,
        optional: bool,
    ) -> Result<Self, ConstraintError> {
        let dep = Self {
            id,
            minimum,
            maximum,
            recommended,
            optional,
        };
        dep.validate()?;
        Ok(dep)
    }

    /// Build a dependency from raw strings, parsing each version.
    pub fn from_strings(
        group: &str,
        name: &str,
        minimum: &str,
        maximum: &str,
        recommended: Option<&str>,
    ) -> Result<Self, ConstraintError> {
        Self::new(
            ProductId::new(group, name),
            SlsVersion::parse(minimum)?,
            VersionMatcher::parse_bound(maximum)?,
            recommended.map(SlsVersion::parse).transpose()?,
            false,
        )
    }

    /// Build a developer-declared dependency. An absent maximum becomes
    /// `<major of minimum>.x.x`.
    pub fn declared(
        group: &str,
        name: &str,
        minimum: &str,
        maximum: Option<&str>,
        recommended: Option<&str>,
    ) -> Result<Self, ConstraintError> {
        let min = SlsVersion::parse(minimum)?;
        let max = match maximum {
            Some(m) => VersionMatcher::parse_bound(m)?,
            None => VersionMatcher::major_only(min.major()),
        };
        Self::new(
            ProductId::new(group, name),
            min,
            max,
            recommended.map(SlsVersion::parse).transpose()?,
            false,
        )
    }

    pub fn id(&self) -> &ProductId {
        &self.id
    }

    pub fn minimum(&self) -> &SlsVersion {
        &self.minimum
    }

    pub fn maximum(&self) -> VersionMatcher {
        self.maximum
    }

    pub fn recommended(&self) -> Option<&SlsVersion> {
        self.recommended.as_ref()
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Optionality does not take part in validation.
    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Drop the recommended version, keeping everything else.
    pub fn without_recommended(mut self) -> Self {
        self.recommended = None;
        self
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    fn invalid(&self, reason: String) -> ConstraintError {
        ConstraintError::InvalidDependency {
            product_id: self.id.to_string(),
            reason,
        }
    }

    fn validate(&self) -> Result<(), ConstraintError> {
        for (field, value) in [("group", &self.id.group), ("name", &self.id.name)] {
            if value.is_empty() {
                return Err(self.invalid(format!("{field} must not be empty")));
            }
            if value.contains(char::is_whitespace) {
                return Err(self.invalid(format!("{field} must not contain whitespace")));
            }
        }
        if self.id.group.contains(':') {
            return Err(self.invalid("group must not contain ':'".to_string()));
        }

        let min = self.minimum.to_string();
        if min == self.maximum.to_string() {
            return Err(self.invalid(format!(
                "minimum and maximum versions must differ (both {min}); \
                 lockstep dependencies are not supported"
            )));
        }

        if !self.maximum.admits(&self.minimum.base_release()) {
            return Err(self.invalid(format!(
                "minimum version {min} is greater than maximum version {}",
                self.maximum
            )));
        }
        if !self.minimum.is_orderable() {
            tracing::warn!(
                "{}: minimum version {min} is not orderable, checking major.minor.patch only",
                self.id
            );
        }

        if let Some(rec) = &self.recommended {
            match rec.compare(&self.minimum) {
                Some(Ordering::Less) => {
                    return Err(self.invalid(format!(
                        "recommended version {rec} is lower than minimum version {min}"
                    )));
                }
                Some(_) => {}
                None => tracing::warn!(
                    "{}: cannot order recommended version {rec} against minimum version {min}",
                    self.id
                ),
            }
            if !self.maximum.admits(&rec.base_release()) {
                return Err(self.invalid(format!(
                    "recommended version {rec} is greater than maximum version {}",
                    self.maximum
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for ProductDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.id, self.minimum, self.maximum)?;
        if let Some(rec) = &self.recommended {
            write!(f, " recommended {rec}")?;
        }
        if self.optional {
            f.write_str(" optional")?;
        }
        Ok(())
    }
}
