//! Orderable STAC version identifiers.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// A STAC version string that can be ordered, e.g. `1.0.0-beta.2 < 1.0.0`.
///
/// The parse is purely syntactic: everything before the first `-` is the
/// version core, everything after it is the prerelease suffix.  Any string is
/// accepted — malformed versions are compared exactly like well-formed ones.
///
/// # Examples
///
/// ```
/// use stac_identify::VersionId;
///
/// let version = VersionId::new("1.0.0-beta.2");
/// assert_eq!(version.core(), "1.0.0");
/// assert_eq!(version.prerelease(), Some("beta.2"));
/// assert!(version < VersionId::new("1.0.0"));
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct VersionId {
    version_string: String,
}

impl VersionId {
    /// Creates a new version identifier from a raw version string.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_identify::VersionId;
    ///
    /// let version = VersionId::new("0.8.1");
    /// assert_eq!(version.as_str(), "0.8.1");
    /// ```
    pub fn new(version_string: impl Into<String>) -> VersionId {
        VersionId {
            version_string: version_string.into(),
        }
    }

    /// Returns the raw version string.
    pub fn as_str(&self) -> &str {
        &self.version_string
    }

    /// Returns the portion of the version string before the first `-`.
    pub fn core(&self) -> &str {
        self.version_string
            .split_once('-')
            .map_or(self.version_string.as_str(), |(core, _)| core)
    }

    /// Returns the prerelease suffix, i.e. everything after the first `-`.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_identify::VersionId;
    ///
    /// assert_eq!(VersionId::new("1.0.0-rc.1").prerelease(), Some("rc.1"));
    /// assert_eq!(VersionId::new("1.0.0").prerelease(), None);
    /// ```
    pub fn prerelease(&self) -> Option<&str> {
        self.version_string
            .split_once('-')
            .map(|(_, prerelease)| prerelease)
    }
}

/// Compares two optional prerelease suffixes.
///
/// A version with a prerelease suffix sorts before one without.  When both
/// versions carry a suffix the comparison is inverted relative to plain
/// string order: the lexicographically greater suffix belongs to the smaller
/// version.
fn cmp_prerelease(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (Some(a), Some(b)) => b.cmp(a),
    }
}

impl Ord for VersionId {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.core().cmp(other.core()) {
            Ordering::Equal => cmp_prerelease(self.prerelease(), other.prerelease()),
            ordering => ordering,
        }
    }
}

impl PartialOrd for VersionId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for VersionId {
    fn eq(&self, other: &Self) -> bool {
        self.version_string == other.version_string
    }
}

impl Eq for VersionId {}

impl Display for VersionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.version_string)
    }
}

impl From<&str> for VersionId {
    fn from(version_string: &str) -> VersionId {
        VersionId::new(version_string)
    }
}

impl From<String> for VersionId {
    fn from(version_string: String) -> VersionId {
        VersionId::new(version_string)
    }
}

impl From<&VersionId> for VersionId {
    fn from(version: &VersionId) -> VersionId {
        version.clone()
    }
}

impl From<VersionId> for String {
    fn from(version: VersionId) -> String {
        version.version_string
    }
}

#[cfg(test)]
mod tests {
    use super::{VersionId, cmp_prerelease};
    use std::cmp::Ordering;

    #[test]
    fn split() {
        let version = VersionId::new("1.0.0-beta.2");
        assert_eq!(version.core(), "1.0.0");
        assert_eq!(version.prerelease(), Some("beta.2"));

        let version = VersionId::new("0.9.0");
        assert_eq!(version.core(), "0.9.0");
        assert_eq!(version.prerelease(), None);
    }

    #[test]
    fn split_is_on_first_hyphen() {
        let version = VersionId::new("1.0.0-beta-2");
        assert_eq!(version.core(), "1.0.0");
        assert_eq!(version.prerelease(), Some("beta-2"));
    }

    #[test]
    fn core_ordering_is_lexicographic() {
        assert!(VersionId::new("0.10.0") < VersionId::new("0.9.0"));
        assert!(VersionId::new("0.8.0") < VersionId::new("0.9.0"));
        assert!(VersionId::new("0.9.0") < VersionId::new("1.0.0"));
    }

    #[test]
    fn prerelease_sorts_before_release() {
        assert!(VersionId::new("1.0.0-beta.2") < VersionId::new("1.0.0"));
        assert!(VersionId::new("1.0.0-rc.1") < VersionId::new("1.0.0"));
        assert!(VersionId::new("1.0.0") > VersionId::new("1.0.0-rc.1"));
    }

    #[test]
    fn prerelease_comparison_is_inverted() {
        assert_eq!(cmp_prerelease(None, None), Ordering::Equal);
        assert_eq!(cmp_prerelease(Some("rc.1"), None), Ordering::Less);
        assert_eq!(cmp_prerelease(None, Some("rc.1")), Ordering::Greater);
        assert_eq!(cmp_prerelease(Some("beta.2"), Some("beta.1")), Ordering::Less);
        assert_eq!(
            cmp_prerelease(Some("beta.1"), Some("beta.2")),
            Ordering::Greater
        );
        assert_eq!(cmp_prerelease(Some("rc.1"), Some("rc.1")), Ordering::Equal);
    }

    #[test]
    fn prerelease_ordering_follows_the_comparator() {
        assert!(VersionId::new("1.0.0-beta.2") < VersionId::new("1.0.0-beta.1"));
        assert!(VersionId::new("1.0.0-rc.1") < VersionId::new("1.0.0-beta.1"));
    }

    #[test]
    fn equality_requires_the_full_string() {
        assert_eq!(VersionId::new("0.9.0"), VersionId::new("0.9.0"));
        assert_ne!(VersionId::new("0.9.0"), VersionId::new("0.9.0-rc.1"));
        assert_ne!(VersionId::new("1.0.0-rc.1"), VersionId::new("1.0.0-rc.2"));
    }

    #[test]
    fn total_order_spot_checks() {
        let mut versions = vec![
            VersionId::new("1.0.0"),
            VersionId::new("0.6.2"),
            VersionId::new("1.0.0-rc.1"),
            VersionId::new("0.9.0"),
            VersionId::new("1.0.0-rc.2"),
        ];
        versions.sort();
        let sorted: Vec<_> = versions.iter().map(|v| v.as_str()).collect();
        assert_eq!(sorted, vec!["0.6.2", "0.9.0", "1.0.0-rc.2", "1.0.0-rc.1", "1.0.0"]);
    }

    #[test]
    fn coercion_from_strings() {
        let version: VersionId = "0.8.0".into();
        assert_eq!(version.as_str(), "0.8.0");
        let version: VersionId = String::from("0.8.1").into();
        assert_eq!(version.as_str(), "0.8.1");
    }

    #[test]
    fn display() {
        assert_eq!(VersionId::new("1.0.0-beta.2").to_string(), "1.0.0-beta.2");
    }

    #[test]
    fn serde_round_trip() {
        let version = VersionId::new("1.0.0-beta.2");
        let json = serde_json::to_string(&version).unwrap();
        assert_eq!(json, "\"1.0.0-beta.2\"");
        let deserialized: VersionId = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, version);
    }
}
