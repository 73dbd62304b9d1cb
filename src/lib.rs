//! Identify the version and extensions of STAC JSON documents.
//!
//! The [SpatioTemporal Asset Catalog (STAC)](https://stacspec.org/)
//! specification went through many pre-1.0 revisions that changed field
//! names, nesting shapes, and requiredness.  Documents in the wild may carry
//! a `stac_version` that is wrong, absent, or only partially informative, so
//! this crate never asserts conformance against a single version.  Instead it
//! narrows a *range* of plausible versions from structural evidence, decides
//! which kind of STAC object the document is, and lists the extensions the
//! document appears to use.
//!
//! # Examples
//!
//! An old item without a declared version still gives itself away through its
//! structure:
//!
//! ```
//! use serde_json::json;
//! use stac_identify::ObjectType;
//!
//! let identification = stac_identify::identify(&json!({
//!     "assets": {},
//!     "properties": {"eo:crs": "EPSG:32618"},
//! }))
//! .unwrap();
//! assert_eq!(identification.object_type, ObjectType::Item);
//! assert_eq!(identification.common_extensions, vec!["eo"]);
//! assert!(identification.version_range.is_earlier_than("0.5.0"));
//! ```
//!
//! A declared version pins the range and declared extensions are taken at
//! face value:
//!
//! ```
//! use serde_json::json;
//!
//! let identification = stac_identify::identify(&json!({
//!     "stac_version": "0.9.0",
//!     "extent": {},
//!     "stac_extensions": ["scientific"],
//! }))
//! .unwrap();
//! assert!(identification.version_range.is_single_version());
//! assert_eq!(identification.common_extensions, vec!["scientific"]);
//! ```
//!
//! Identification is a pure function of the document: no I/O, no caching, no
//! shared state, so it is safe to run concurrently over independent
//! documents.

#![warn(missing_docs, unused_qualifications)]

mod error;
mod identify;
mod range;
mod version;

pub use {
    error::Error,
    identify::{
        Identification, ObjectType, extension_ids, identify, identify_object, identify_object_type,
    },
    range::VersionRange,
    version::VersionId,
};

/// The current version of the STAC specification.
pub const STAC_VERSION: &str = "1.1.0";

/// The oldest STAC version this crate tries to distinguish.
pub const OLDEST_STAC_VERSION: &str = "0.4.0";

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, Error>;
