//! # Schema Engine Tests

use super::*;
use crate::range::DataRange;

fn path(p: &str) -> FieldPath {
    FieldPath::from(p)
}

fn names(tree: &DataTree) -> Vec<String> {
    tree.flatten().iter().map(|(p, _)| p.to_string()).collect()
}

fn all_v1_selectors() -> Vec<Selectors> {
    let mut out = Vec::new();
    for extrusion in ExtrusionCategory::available(1) {
        for footprint in FootprintCategory::available(1) {
            for heights in MethodCategory::available(1) {
                for twist in MethodCategory::available(1) {
                    out.push(Selectors {
                        extrusion: *extrusion,
                        footprint: *footprint,
                        heights: *heights,
                        twist: *twist,
                        skew: MethodCategory::Sin,
                    });
                }
            }
        }
    }
    out
}

// =============================================================================
// RESOLUTION
// =============================================================================

#[test]
fn test_top_level_v1_fields() {
    let tree = resolve_top_level(1).unwrap();
    assert_eq!(
        names(&tree),
        vec![
            "version",
            "extrusion.type",
            "footprint.type",
            "heights.method",
            "twist.method",
            "skew.method"
        ]
    );
}

#[test]
fn test_top_level_v0_fields() {
    let tree = resolve_top_level(0).unwrap();
    assert_eq!(
        names(&tree),
        vec!["version", "extrusion.type", "footprint.type", "heights.method"]
    );
}

#[test]
fn test_unknown_version() {
    assert_eq!(
        resolve_top_level(2).unwrap_err(),
        CodecError::VersionNotFound(2)
    );
    assert_eq!(
        resolve_full(200, &Selectors::default()).unwrap_err(),
        CodecError::VersionNotFound(200)
    );
}

#[test]
fn test_top_level_is_prefix_of_full() {
    for selectors in all_v1_selectors() {
        let top = resolve_top_level(1).unwrap();
        let full = resolve_full(1, &selectors).unwrap();
        let top_pattern = top.pattern();
        let full_pattern = full.pattern();
        assert_eq!(
            &full_pattern.fields()[..top_pattern.len()].iter().map(|f| &f.name).collect::<Vec<_>>(),
            &top_pattern.fields().iter().map(|f| &f.name).collect::<Vec<_>>()
        );
        assert_eq!(
            &full_pattern.offsets()[..top_pattern.len()],
            top_pattern.offsets()
        );
    }
}

#[test]
fn test_indices_are_dense() {
    for selectors in all_v1_selectors() {
        let tree = resolve_full(1, &selectors).unwrap();
        let indices: Vec<u32> = tree.flatten().iter().map(|(_, e)| e.descriptor.index).collect();
        let expected: Vec<u32> = (0..indices.len() as u32).collect();
        assert_eq!(indices, expected);
    }
}

#[test]
fn test_resolution_is_deterministic() {
    for selectors in all_v1_selectors() {
        assert_eq!(
            resolve_full(1, &selectors).unwrap(),
            resolve_full(1, &selectors).unwrap()
        );
    }
}

#[test]
fn test_footprint_field_sets() {
    let mut selectors = Selectors::default();
    let cylinder = resolve_full(1, &selectors).unwrap();
    let cylinder_fields: Vec<String> = names(&cylinder)
        .into_iter()
        .filter(|n| n.starts_with("footprint.") && n != "footprint.type")
        .collect();
    assert_eq!(cylinder_fields.len(), 6);

    selectors.footprint = FootprintCategory::MalculmiusOne;
    let lobed = resolve_full(1, &selectors).unwrap();
    let lobed_fields: Vec<String> = names(&lobed)
        .into_iter()
        .filter(|n| n.starts_with("footprint.") && n != "footprint.type")
        .collect();
    assert_eq!(lobed_fields.len(), 6);
    assert!(lobed_fields.iter().all(|f| !cylinder_fields.contains(f)));
}

#[test]
fn test_extrusion_fields_follow_profile() {
    let mut selectors = Selectors {
        extrusion: ExtrusionCategory::Square,
        ..Selectors::default()
    };
    let tree = resolve_full(1, &selectors).unwrap();
    assert!(tree.leaf(&path("extrusion.radiusTop")).is_none());

    selectors.extrusion = ExtrusionCategory::Gothic;
    let tree = resolve_full(1, &selectors).unwrap();
    assert!(tree.leaf(&path("extrusion.pointedness")).is_some());

    selectors.extrusion = ExtrusionCategory::Nested;
    let tree = resolve_full(1, &selectors).unwrap();
    assert!(tree.leaf(&path("extrusion.divisionCount")).is_some());
    assert!(tree.leaf(&path("extrusion.divisionPointedness")).is_some());
}

#[test]
fn test_v0_rejects_newer_selectors() {
    let selectors = Selectors {
        extrusion: ExtrusionCategory::Gothic,
        ..Selectors::default()
    };
    assert!(matches!(
        resolve_full(0, &selectors),
        Err(CodecError::UnknownSelector {
            selector: "extrusion.type",
            version: 0,
            ..
        })
    ));

    let selectors = Selectors {
        twist: MethodCategory::Incremental,
        ..Selectors::default()
    };
    assert!(matches!(
        resolve_full(0, &selectors),
        Err(CodecError::UnknownSelector { selector: "twist.method", .. })
    ));
}

#[test]
fn test_v0_codes_differ_from_v1() {
    assert_eq!(FootprintCategory::Cylinder.code(0), Some(2));
    assert_eq!(FootprintCategory::Cylinder.code(1), Some(4));
    assert_eq!(FootprintCategory::from_code(2, 0), Some(FootprintCategory::Cylinder));
    assert_eq!(FootprintCategory::from_code(2, 1), Some(FootprintCategory::TriangleGrid));
    assert_eq!(FootprintCategory::from_code(9, 1), None);
}

#[test]
fn test_selector_ranges_cover_categories() {
    let tree = resolve_top_level(1).unwrap();
    let entry = tree.leaf(&path("footprint.type")).unwrap();
    assert_eq!(
        entry.descriptor.range,
        DataRange::Int {
            min: 0,
            max: 5,
            bits: 3
        }
    );
}

// =============================================================================
// DEFAULTS
// =============================================================================

#[test]
fn test_default_object_selectors() {
    for version in SUPPORTED_VERSIONS {
        let tree = get_default_object(*version).unwrap();
        assert_eq!(tree_version(&tree).unwrap(), *version);
        let selectors = Selectors::from_tree(&tree, *version).unwrap();
        assert_eq!(selectors, Selectors::default());
    }
}

#[test]
fn test_default_values_inside_ranges() {
    for selectors in all_v1_selectors() {
        let tree = resolve_full(1, &selectors).unwrap();
        for (p, entry) in tree.flatten() {
            match (&entry.descriptor.range, &entry.value) {
                (DataRange::Int { min, max, .. }, DataValue::Int(v)) => {
                    assert!(min <= v && v <= max, "{p} default {v} outside range");
                }
                (DataRange::Float(range), DataValue::Float(v)) => {
                    assert!(range.min <= *v && *v <= range.max, "{p} default {v} outside range");
                }
                (range, value) => assert!(range.accepts(value), "{p} has mismatched default"),
            }
        }
    }
}

// =============================================================================
// DECODE
// =============================================================================

#[test]
fn test_decode_empty_url() {
    assert!(matches!(decode(""), Err(CodecError::UrlTooShort { needed: 8, .. })));
}

#[test]
fn test_decode_unknown_version() {
    // Version byte 0b00000101
    let bits: crate::bits::Bits = "000001010000".parse().unwrap();
    let url = crate::bits::parse_bits_to_base64(&bits);
    assert_eq!(decode(&url).unwrap_err(), CodecError::VersionNotFound(5));
}

#[test]
fn test_decode_truncated_url() {
    let tree = get_default_object(1).unwrap();
    let url = encode(&tree).unwrap();
    let truncated = &url[..url.len() - 2];
    assert!(matches!(decode(truncated), Err(CodecError::UrlTooShort { .. })));
}

#[test]
fn test_decode_extra_symbol() {
    let tree = get_default_object(1).unwrap();
    let url = format!("{}A", encode(&tree).unwrap());
    assert!(matches!(
        decode(&url),
        Err(CodecError::UrlLengthMismatch { .. })
    ));
}

#[test]
fn test_decode_invalid_character() {
    assert_eq!(decode("AB*").unwrap_err(), CodecError::InvalidCharacter('*'));
}

// =============================================================================
// UPDATE
// =============================================================================

#[test]
fn test_update_keeps_unrelated_values() {
    let tree = get_default_object(1).unwrap();
    let tree = update_data_entry(&tree, &path("heights.storyCount"), DataValue::Int(9)).unwrap();
    let tree = update_data_entry(&tree, &path("extrusion.type"), DataValue::Int(3)).unwrap();

    assert_eq!(tree.value(&path("heights.storyCount")), Some(&DataValue::Int(9)));
    assert!(tree.leaf(&path("extrusion.pointedness")).is_some());
    assert_eq!(
        Selectors::from_tree(&tree, 1).unwrap().extrusion,
        ExtrusionCategory::Gothic
    );
}

#[test]
fn test_update_drops_stale_branches() {
    let tree = get_default_object(1).unwrap();
    let tree = update_data_entry(&tree, &path("twist.method"), DataValue::Int(1)).unwrap();
    assert!(tree.leaf(&path("twist.angle")).is_some());

    let tree = update_data_entry(&tree, &path("twist.method"), DataValue::Int(0)).unwrap();
    assert!(tree.leaf(&path("twist.angle")).is_none());
}

#[test]
fn test_update_rejects_bad_input() {
    let tree = get_default_object(1).unwrap();
    assert!(matches!(
        update_data_entry(&tree, &path("footprint.nothing"), DataValue::Int(1)),
        Err(CodecError::PathNotFound(_))
    ));
    assert!(matches!(
        update_data_entry(&tree, &path("footprint.segments"), DataValue::Float(3.0)),
        Err(CodecError::ValueMismatch { .. })
    ));
    assert!(matches!(
        update_data_entry(&tree, &path("footprint.type"), DataValue::Int(17)),
        Err(CodecError::UnknownSelector { code: 17, .. })
    ));
}

#[test]
fn test_update_leaves_input_untouched() {
    let tree = get_default_object(1).unwrap();
    let before = tree.clone();
    let _ = update_data_entry(&tree, &path("heights.storyCount"), DataValue::Int(2)).unwrap();
    assert_eq!(tree, before);
}
