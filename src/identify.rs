//! Best-effort identification of unversioned or ambiguous STAC JSON.

use crate::{Error, Result, VersionRange};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter, Result as FmtResult};
use tracing::{debug, trace};

/// Identifiers of well-known extensions from before `stac_extensions` was a
/// schema URI list.
///
/// This is a closed set: the identification heuristics branch on these
/// identifiers but never extend the set.
pub mod extension_ids {
    /// The checksum extension.
    pub const CHECKSUM: &str = "checksum";
    /// The collection assets extension.
    pub const COLLECTION_ASSETS: &str = "collection-assets";
    /// The datacube extension.
    pub const DATACUBE: &str = "datacube";
    /// The pre-0.7 datetime range extension.
    pub const DATETIME_RANGE: &str = "datetime-range";
    /// The electro-optical extension.
    pub const EO: &str = "eo";
    /// The file info extension.
    pub const FILE: &str = "file";
    /// The item assets extension.
    pub const ITEM_ASSETS: &str = "item-assets";
    /// The label extension.
    pub const LABEL: &str = "label";
    /// The pointcloud extension.
    pub const POINTCLOUD: &str = "pointcloud";
    /// The projection extension.
    pub const PROJECTION: &str = "projection";
    /// The synthetic aperture radar extension.
    pub const SAR: &str = "sar";
    /// The satellite extension.
    pub const SAT: &str = "sat";
    /// The scientific citation extension.
    pub const SCIENTIFIC: &str = "scientific";
    /// The single file STAC extension.
    pub const SINGLE_FILE_STAC: &str = "single-file-stac";
    /// The tiled assets extension.
    pub const TILED_ASSETS: &str = "tiled-assets";
    /// The timestamps extension.
    pub const TIMESTAMPS: &str = "timestamps";
    /// The versioning indicators extension.
    pub const VERSION: &str = "version";
    /// The view geometry extension.
    pub const VIEW: &str = "view";

    /// All well-known short extension identifiers.
    pub const ALL: &[&str] = &[
        CHECKSUM,
        COLLECTION_ASSETS,
        DATACUBE,
        DATETIME_RANGE,
        EO,
        FILE,
        ITEM_ASSETS,
        LABEL,
        POINTCLOUD,
        PROJECTION,
        SAR,
        SAT,
        SCIENTIFIC,
        SINGLE_FILE_STAC,
        TILED_ASSETS,
        TIMESTAMPS,
        VERSION,
        VIEW,
    ];
}

/// SAR properties that were sequence-valued through 0.6.2.
const SAR_0_6_PROPERTIES: &[&str] = &[
    "sar:absolute_orbit",
    "sar:resolution",
    "sar:pixel_spacing",
    "sar:looks",
];

/// SAR properties introduced by the 0.7.0 renames.
const SAR_0_7_PROPERTIES: &[&str] = &[
    "sar:incidence_angle",
    "sar:relative_orbit",
    "sar:observation_direction",
    "sar:resolution_range",
    "sar:resolution_azimuth",
    "sar:pixel_spacing_range",
    "sar:pixel_spacing_azimuth",
    "sar:looks_range",
    "sar:looks_azimuth",
    "sar:looks_equivalent_number",
];

/// The kind of STAC object a JSON document represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectType {
    /// A STAC catalog.
    Catalog,
    /// A STAC collection.
    Collection,
    /// A STAC item.
    #[serde(rename = "Feature")]
    Item,
    /// A deprecated pre-1.0 STAC item collection.
    #[serde(rename = "FeatureCollection")]
    ItemCollection,
}

impl Display for ObjectType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ObjectType::Catalog => f.write_str("Catalog"),
            ObjectType::Collection => f.write_str("Collection"),
            ObjectType::Item => f.write_str("Feature"),
            ObjectType::ItemCollection => f.write_str("FeatureCollection"),
        }
    }
}

/// What could be determined about a STAC JSON document: its object type, the
/// range of spec versions it could have been written against, and the
/// extensions it appears to use.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use stac_identify::ObjectType;
///
/// let identification = stac_identify::identify(&json!({
///     "stac_version": "0.9.0",
///     "extent": {},
/// }))
/// .unwrap();
/// assert_eq!(identification.object_type, ObjectType::Collection);
/// assert!(identification.version_range.is_single_version());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identification {
    /// The kind of STAC object.
    pub object_type: ObjectType,

    /// The plausible range of STAC versions.
    pub version_range: VersionRange,

    /// Extensions identified by a short identifier, e.g. `eo`.
    pub common_extensions: Vec<String>,

    /// Extensions identified by a URI or a `.json` schema reference.
    pub custom_extensions: Vec<String>,
}

/// A structural heuristic over a document.
///
/// Each heuristic independently looks for a marker, narrows the version range
/// when it finds one, and returns the extension identifier the marker implies
/// (or `None` when nothing matched).  Heuristics never widen the range, so the
/// table can be applied in any order.
type Heuristic = fn(ObjectType, &Map<String, Value>, &mut VersionRange) -> Option<&'static str>;

const HEURISTICS: &[Heuristic] = &[
    collection_assets,
    checksum,
    datacube,
    datetime_range,
    eo,
    eo_bands,
    pointcloud,
    sar,
    scientific,
    single_file_stac,
];

/// Identifies a STAC JSON document.
///
/// Returns [Error::NotAnObject] if the value is not a JSON object;
/// identification is otherwise total, and missing fields are treated as
/// absent features rather than errors.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use stac_identify::ObjectType;
///
/// let identification = stac_identify::identify(&json!({
///     "assets": {},
///     "properties": {"eo:bands": []},
///     "eo:bands": [],
/// }))
/// .unwrap();
/// assert_eq!(identification.object_type, ObjectType::Item);
/// assert_eq!(identification.common_extensions, vec!["eo"]);
/// assert!(!identification.version_range.contains("0.6.0"));
/// ```
pub fn identify(value: &Value) -> Result<Identification> {
    let object = value
        .as_object()
        .ok_or_else(|| Error::NotAnObject(value.clone()))?;
    Ok(identify_object(object))
}

/// Identifies a STAC JSON object.
///
/// This is [identify] without the not-an-object error path, for callers that
/// already hold a [Map].
pub fn identify_object(object: &Map<String, Value>) -> Identification {
    let object_type = identify_object_type(object);
    let mut version_range = VersionRange::default();

    let stac_version = object.get("stac_version").and_then(Value::as_str);
    let stac_extensions = object.get("stac_extensions");

    if let Some(stac_version) = stac_version {
        version_range.set_to_single(stac_version);
    } else {
        match object_type {
            ObjectType::Catalog | ObjectType::Collection => version_range.set_max("0.5.2"),
            ObjectType::Item => version_range.set_max("0.7.0"),
            ObjectType::ItemCollection => version_range.set_min("0.8.0"),
        }
    }

    if stac_extensions.is_some() {
        // The stac_extensions field did not exist before 0.8.0.
        version_range.set_min("0.8.0");
    }

    let extensions: BTreeSet<String> = if let Some(stac_extensions) = stac_extensions {
        stac_extensions
            .as_array()
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
            .map(String::from)
            .collect()
    } else if version_range.is_earlier_than("0.8.0")
        || (object_type == ObjectType::ItemCollection && !version_range.is_later_than("0.8.1"))
    {
        identify_extensions(object_type, object, &mut version_range)
    } else {
        BTreeSet::new()
    };

    if !version_range.is_single_version() {
        if object.get("links").is_some_and(Value::is_object) {
            // Links were a mapping keyed by rel in 0.5.2 and nowhere else.
            version_range.set_to_single("0.5.2");
        } else if object.contains_key("links")
            && !version_range.is_earlier_than("0.7.0")
            && !has_self_link(object)
        {
            // Self links stopped being required in 0.7.0.  A document
            // without any links field carries no evidence either way.
            version_range.set_min("0.7.0");
        }
    }

    let (common_extensions, custom_extensions) = partition_extensions(extensions);
    debug!(
        %object_type,
        %version_range,
        common = common_extensions.len(),
        custom = custom_extensions.len(),
        "identified STAC object"
    );
    Identification {
        object_type,
        version_range,
        common_extensions,
        custom_extensions,
    }
}

/// Determines the kind of STAC object a JSON object represents.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use stac_identify::ObjectType;
///
/// let value = json!({"extent": {}});
/// assert_eq!(
///     stac_identify::identify_object_type(value.as_object().unwrap()),
///     ObjectType::Collection
/// );
/// ```
pub fn identify_object_type(object: &Map<String, Value>) -> ObjectType {
    let mut object_type = ObjectType::Catalog;

    // Pre-1.0 item collections served themselves as GeoJSON feature
    // collections.
    if object.contains_key("type")
        && !object.contains_key("assets")
        && object
            .get("stac_version")
            .and_then(Value::as_str)
            .is_some_and(|version| version.starts_with('0'))
        && object.get("type").and_then(Value::as_str) == Some("FeatureCollection")
    {
        object_type = ObjectType::ItemCollection;
    }
    trace!(initial_guess = %object_type, "typing STAC object");

    // The structural checks have the last word, so the item collection guess
    // above never survives them.
    if object.contains_key("extent") {
        object_type = ObjectType::Collection;
    } else if object.contains_key("assets") {
        object_type = ObjectType::Item;
    } else {
        object_type = ObjectType::Catalog;
    }

    object_type
}

fn identify_extensions(
    object_type: ObjectType,
    object: &Map<String, Value>,
    version_range: &mut VersionRange,
) -> BTreeSet<String> {
    let mut extensions = BTreeSet::new();
    for heuristic in HEURISTICS {
        if let Some(extension) = heuristic(object_type, object, version_range) {
            trace!(extension, %version_range, "structural heuristic matched");
            let _ = extensions.insert(extension.to_string());
        }
    }
    extensions
}

fn partition_extensions(extensions: BTreeSet<String>) -> (Vec<String>, Vec<String>) {
    extensions
        .into_iter()
        .partition(|extension| !extension.ends_with(".json") && !extension.contains('/'))
}

fn properties(object: &Map<String, Value>) -> Option<&Map<String, Value>> {
    object.get("properties").and_then(Value::as_object)
}

fn has_prefixed_key(object: &Map<String, Value>, prefix: &str) -> bool {
    object.keys().any(|key| key.starts_with(prefix))
}

fn has_self_link(object: &Map<String, Value>) -> bool {
    object
        .get("links")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
        .any(|link| link.get("rel").and_then(Value::as_str) == Some("self"))
}

fn collection_assets(
    object_type: ObjectType,
    object: &Map<String, Value>,
    version_range: &mut VersionRange,
) -> Option<&'static str> {
    if object_type == ObjectType::ItemCollection && object.contains_key("assets") {
        version_range.set_min("0.8.0");
        Some("assets")
    } else {
        None
    }
}

fn checksum(
    _: ObjectType,
    object: &Map<String, Value>,
    version_range: &mut VersionRange,
) -> Option<&'static str> {
    // Links were a mapping in 0.5.2, a sequence everywhere else.
    let mut found = match object.get("links") {
        Some(Value::Array(links)) => links
            .iter()
            .filter_map(Value::as_object)
            .any(|link| has_prefixed_key(link, "checksum:")),
        Some(Value::Object(links)) => links
            .values()
            .filter_map(Value::as_object)
            .any(|link| has_prefixed_key(link, "checksum:")),
        _ => false,
    };
    if !found {
        found = object
            .get("assets")
            .and_then(Value::as_object)
            .is_some_and(|assets| {
                assets
                    .values()
                    .filter_map(Value::as_object)
                    .any(|asset| has_prefixed_key(asset, "checksum:"))
            });
    }
    if found {
        version_range.set_min("0.6.2");
        Some(extension_ids::CHECKSUM)
    } else {
        None
    }
}

fn datacube(
    object_type: ObjectType,
    object: &Map<String, Value>,
    version_range: &mut VersionRange,
) -> Option<&'static str> {
    if object_type == ObjectType::Item
        && properties(object).is_some_and(|properties| has_prefixed_key(properties, "cube:"))
    {
        version_range.set_min("0.6.1");
        Some(extension_ids::DATACUBE)
    } else {
        None
    }
}

fn datetime_range(
    object_type: ObjectType,
    object: &Map<String, Value>,
    version_range: &mut VersionRange,
) -> Option<&'static str> {
    if object_type == ObjectType::Item
        && properties(object).is_some_and(|properties| properties.contains_key("dtr:start_datetime"))
    {
        version_range.set_min("0.6.0");
        Some(extension_ids::DATETIME_RANGE)
    } else {
        None
    }
}

fn eo(
    object_type: ObjectType,
    object: &Map<String, Value>,
    version_range: &mut VersionRange,
) -> Option<&'static str> {
    if object_type != ObjectType::Item {
        return None;
    }
    let properties = properties(object)?;
    if !has_prefixed_key(properties, "eo:") {
        return None;
    }
    if properties.get("eo:epsg").is_some_and(Value::is_null) {
        version_range.set_min("0.6.1");
    }
    if properties.contains_key("eo:crs") {
        version_range.set_max("0.4.1");
    }
    if properties.contains_key("eo:constellation") {
        version_range.set_min("0.6.0");
    }
    Some(extension_ids::EO)
}

fn eo_bands(
    object_type: ObjectType,
    object: &Map<String, Value>,
    version_range: &mut VersionRange,
) -> Option<&'static str> {
    // Through 0.5.2 the band definitions lived at the top level of the item.
    if object_type == ObjectType::Item && object.contains_key("eo:bands") {
        version_range.set_max("0.5.2");
        Some(extension_ids::EO)
    } else {
        None
    }
}

fn pointcloud(
    object_type: ObjectType,
    object: &Map<String, Value>,
    version_range: &mut VersionRange,
) -> Option<&'static str> {
    if object_type == ObjectType::Item
        && properties(object).is_some_and(|properties| has_prefixed_key(properties, "pc:"))
    {
        version_range.set_min("0.6.2");
        Some(extension_ids::POINTCLOUD)
    } else {
        None
    }
}

fn sar(
    object_type: ObjectType,
    object: &Map<String, Value>,
    version_range: &mut VersionRange,
) -> Option<&'static str> {
    if object_type != ObjectType::Item {
        return None;
    }
    let properties = properties(object)?;
    if !has_prefixed_key(properties, "sar:") {
        return None;
    }
    version_range.set_min("0.6.2");
    if version_range.contains("0.6.2")
        && SAR_0_6_PROPERTIES
            .iter()
            .any(|property| properties.get(*property).is_some_and(Value::is_array))
    {
        version_range.set_max("0.6.2");
    }
    if version_range.contains("0.7.0") {
        if SAR_0_7_PROPERTIES
            .iter()
            .any(|property| properties.contains_key(*property))
        {
            version_range.set_min("0.7.0");
        }
        if properties
            .get("sar:absolute_orbit")
            .is_some_and(|value| !value.is_array())
        {
            version_range.set_min("0.7.0");
        }
    }
    if properties.contains_key("sar:off_nadir") {
        version_range.set_max("0.6.2");
    }
    Some(extension_ids::SAR)
}

fn scientific(
    object_type: ObjectType,
    object: &Map<String, Value>,
    version_range: &mut VersionRange,
) -> Option<&'static str> {
    if matches!(object_type, ObjectType::Item | ObjectType::Collection)
        && properties(object).is_some_and(|properties| has_prefixed_key(properties, "sci:"))
    {
        version_range.set_min("0.6.0");
        Some(extension_ids::SCIENTIFIC)
    } else {
        None
    }
}

fn single_file_stac(
    object_type: ObjectType,
    object: &Map<String, Value>,
    version_range: &mut VersionRange,
) -> Option<&'static str> {
    if object_type == ObjectType::ItemCollection && object.contains_key("collections") {
        version_range.set_min("0.8.0");
        if !object.contains_key("stac_extensions") {
            version_range.set_max("0.8.1");
        }
        Some(extension_ids::SINGLE_FILE_STAC)
    } else {
        None
    }
}
