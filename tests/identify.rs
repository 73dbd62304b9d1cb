use assert_json_diff::assert_json_eq;
use rstest::rstest;
use serde_json::{Value, json};
use stac_identify::{Identification, ObjectType};

fn identify(value: &Value) -> Identification {
    stac_identify::identify(value).unwrap()
}

#[rstest]
#[case(json!({"extent": {}}), ObjectType::Collection)]
#[case(json!({"assets": {}}), ObjectType::Item)]
#[case(json!({"id": "a-catalog", "links": []}), ObjectType::Catalog)]
#[case(
    json!({"type": "FeatureCollection", "stac_version": "0.8.0", "features": []}),
    ObjectType::Catalog
)]
fn object_types(#[case] value: Value, #[case] expected: ObjectType) {
    assert_eq!(identify(&value).object_type, expected);
}

#[test]
fn undeclared_collection() {
    let identification = identify(&json!({"extent": {}}));
    assert_eq!(identification.object_type, ObjectType::Collection);
    assert_eq!(identification.version_range.max_version().as_str(), "0.5.2");
    assert!(identification.common_extensions.is_empty());
    assert!(identification.custom_extensions.is_empty());
}

#[test]
fn undeclared_item_with_top_level_eo_bands() {
    let identification = identify(&json!({
        "assets": {},
        "properties": {"eo:bands": [{"name": "B01"}]},
        "eo:bands": [{"name": "B01"}],
    }));
    assert_eq!(identification.object_type, ObjectType::Item);
    assert_eq!(identification.common_extensions, vec!["eo"]);
    assert_eq!(identification.version_range.max_version().as_str(), "0.5.2");
}

#[test]
fn declared_version_and_extensions() {
    let identification = identify(&json!({
        "stac_version": "0.9.0",
        "assets": {},
        "stac_extensions": ["eo", "checksum"],
    }));
    assert!(identification.version_range.is_single_version());
    assert_eq!(identification.version_range.min_version().as_str(), "0.9.0");
    assert_eq!(identification.version_range.max_version().as_str(), "0.9.0");
    assert_eq!(identification.common_extensions, vec!["checksum", "eo"]);
    assert!(identification.custom_extensions.is_empty());
}

#[test]
fn links_mapping_is_0_5_2() {
    let identification = identify(&json!({
        "id": "a-catalog",
        "links": {"self": {"href": "./catalog.json"}},
    }));
    assert_eq!(identification.object_type, ObjectType::Catalog);
    assert!(identification.version_range.is_single_version());
    assert_eq!(identification.version_range.max_version().as_str(), "0.5.2");
}

#[test]
fn identification_is_idempotent() {
    let value = json!({
        "assets": {},
        "properties": {
            "sar:instrument_mode": "IW",
            "sar:looks": [4, 1],
            "sci:doi": "10.5061/dryad.s2v81.2",
        },
        "links": [{"rel": "root", "href": "./catalog.json"}],
    });
    let first = identify(&value);
    let second = identify(&value);
    assert_eq!(first, second);
}

#[test]
fn serialized_identification() {
    let identification = identify(&json!({
        "stac_version": "0.9.0",
        "extent": {},
        "stac_extensions": [
            "scientific",
            "https://example.com/my-extension/v1.0.0/schema.json",
        ],
    }));
    assert_json_eq!(
        serde_json::to_value(&identification).unwrap(),
        json!({
            "object_type": "Collection",
            "version_range": {
                "min_version": "0.9.0",
                "max_version": "0.9.0",
            },
            "common_extensions": ["scientific"],
            "custom_extensions": ["https://example.com/my-extension/v1.0.0/schema.json"],
        })
    );
}

#[test]
fn not_an_object() {
    assert!(stac_identify::identify(&json!(["not", "an", "object"])).is_err());
}
