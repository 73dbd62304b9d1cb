//! Inclusive ranges of plausible STAC versions.

use crate::{OLDEST_STAC_VERSION, STAC_VERSION, VersionId};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// An inclusive interval of plausible STAC versions.
///
/// A range only ever shrinks: [`set_min`](VersionRange::set_min),
/// [`set_max`](VersionRange::set_max), and
/// [`set_to_single`](VersionRange::set_to_single) clamp at the opposite bound
/// rather than widen the interval, so structural heuristics can be applied in
/// any order and accumulate to the same result.
///
/// # Examples
///
/// ```
/// use stac_identify::VersionRange;
///
/// let mut range = VersionRange::default();
/// range.set_min("0.6.0");
/// range.set_max("0.7.0");
/// assert!(range.contains("0.6.2"));
/// assert!(!range.contains("0.8.0"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRange {
    min_version: VersionId,
    max_version: VersionId,
}

impl VersionRange {
    /// Creates a new version range with explicit bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_identify::VersionRange;
    ///
    /// let range = VersionRange::new("0.8.0", "0.9.0");
    /// assert_eq!(range.min_version().as_str(), "0.8.0");
    /// assert_eq!(range.max_version().as_str(), "0.9.0");
    /// ```
    pub fn new(
        min_version: impl Into<VersionId>,
        max_version: impl Into<VersionId>,
    ) -> VersionRange {
        VersionRange {
            min_version: min_version.into(),
            max_version: max_version.into(),
        }
    }

    /// Returns the lower bound of this range.
    pub fn min_version(&self) -> &VersionId {
        &self.min_version
    }

    /// Returns the upper bound of this range.
    pub fn max_version(&self) -> &VersionId {
        &self.max_version
    }

    /// Raises the lower bound, clamped at the current upper bound.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_identify::VersionRange;
    ///
    /// let mut range = VersionRange::new("0.4.0", "0.9.0");
    /// range.set_min("0.6.0");
    /// assert_eq!(range.min_version().as_str(), "0.6.0");
    /// range.set_min("0.5.0"); // never widens
    /// assert_eq!(range.min_version().as_str(), "0.6.0");
    /// ```
    pub fn set_min(&mut self, version: impl Into<VersionId>) {
        let version = version.into();
        if self.min_version < version {
            if version < self.max_version {
                self.min_version = version;
            } else {
                self.min_version = self.max_version.clone();
            }
        }
        debug_assert!(self.min_version <= self.max_version);
    }

    /// Lowers the upper bound, clamped at the current lower bound.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_identify::VersionRange;
    ///
    /// let mut range = VersionRange::new("0.4.0", "0.9.0");
    /// range.set_max("0.7.0");
    /// assert_eq!(range.max_version().as_str(), "0.7.0");
    /// range.set_max("0.8.0"); // never widens
    /// assert_eq!(range.max_version().as_str(), "0.7.0");
    /// ```
    pub fn set_max(&mut self, version: impl Into<VersionId>) {
        let version = version.into();
        if version < self.max_version {
            if self.min_version < version {
                self.max_version = version;
            } else {
                self.max_version = self.min_version.clone();
            }
        }
        debug_assert!(self.min_version <= self.max_version);
    }

    /// Pins both bounds to the given version, subject to the same clamps as
    /// [`set_min`](VersionRange::set_min) and
    /// [`set_max`](VersionRange::set_max) (minimum first, then maximum).
    pub fn set_to_single(&mut self, version: impl Into<VersionId>) {
        let version = version.into();
        self.set_min(version.clone());
        self.set_max(version);
    }

    /// Returns true if this range contains the given version.
    pub fn contains(&self, version: impl Into<VersionId>) -> bool {
        let version = version.into();
        self.min_version <= version && version <= self.max_version
    }

    /// Returns true if this range has been narrowed to a single version.
    pub fn is_single_version(&self) -> bool {
        self.min_version >= self.max_version
    }

    /// Returns true if every version in this range is earlier than the given
    /// version.
    pub fn is_earlier_than(&self, version: impl Into<VersionId>) -> bool {
        self.max_version < version.into()
    }

    /// Returns true if every version in this range is later than the given
    /// version.
    pub fn is_later_than(&self, version: impl Into<VersionId>) -> bool {
        version.into() < self.min_version
    }

    /// Returns the latest version that is still a valid candidate.
    pub fn latest_valid_version(&self) -> &VersionId {
        &self.max_version
    }
}

impl Default for VersionRange {
    /// The widest plausible range, from the oldest tracked STAC version to
    /// the current one.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_identify::VersionRange;
    ///
    /// let range = VersionRange::default();
    /// assert_eq!(range.min_version().as_str(), stac_identify::OLDEST_STAC_VERSION);
    /// assert_eq!(range.max_version().as_str(), stac_identify::STAC_VERSION);
    /// ```
    fn default() -> VersionRange {
        VersionRange::new(OLDEST_STAC_VERSION, STAC_VERSION)
    }
}

impl Display for VersionRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}..={}", self.min_version, self.max_version)
    }
}
