//! Integration tests for URL round trips through the public API.

use approx::assert_abs_diff_eq;
use lamp_codec::bits::{parse_base64_to_bits, parse_bits_to_base64, Bits};
use lamp_codec::schema::Category;
use lamp_codec::{
    create_url, deconstruct_url, decode, encode, get_default_object, resolve_full,
    update_data_entry, DataPattern, DataRange, DataTree, DataValue, ExtrusionCategory,
    FieldDescriptor, FieldPath, FootprintCategory, MethodCategory, Selectors,
};

fn assert_trees_close(a: &DataTree, b: &DataTree) {
    let left = a.flatten();
    let right = b.flatten();
    assert_eq!(left.len(), right.len());
    for ((lp, le), (rp, re)) in left.iter().zip(right.iter()) {
        assert_eq!(lp, rp);
        assert_eq!(le.descriptor, re.descriptor);
        match (&le.value, &re.value, &le.descriptor.range) {
            (DataValue::Float(x), DataValue::Float(y), DataRange::Float(range)) => {
                let tolerance = 0.5 * 10f64.powi(-(range.precision as i32)) + 1e-9;
                assert_abs_diff_eq!(x, y, epsilon = tolerance);
            }
            (x, y, _) => assert_eq!(x, y, "{lp}"),
        }
    }
}

#[test]
fn mixed_pattern_round_trip() {
    let pattern = DataPattern::new(vec![
        FieldDescriptor::new("version", 0, DataRange::version(8).unwrap()),
        FieldDescriptor::new("count", 1, DataRange::int(0.0, 10.0).unwrap()),
        FieldDescriptor::new("flag", 2, DataRange::Boolean),
        FieldDescriptor::new("ratio", 3, DataRange::float(-1.0, 1.0, 1).unwrap()),
    ]);
    let values = vec![
        DataValue::Version(0),
        DataValue::Int(7),
        DataValue::Boolean(true),
        DataValue::Float(-0.1),
    ];
    let decoded = deconstruct_url(&create_url(&values, &pattern).unwrap(), &pattern).unwrap();
    assert_eq!(&decoded[..3], &values[..3]);
    assert_abs_diff_eq!(decoded[3].as_float().unwrap(), -0.1, epsilon = 0.05);
}

#[test]
fn base64_closure_pads_with_zeros() {
    let alphabet = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";
    for len in 0..20usize {
        let bits: Bits = (0..len).map(|i| (i * 7 + 3) % 5 < 2).collect();
        let url = parse_bits_to_base64(&bits);
        assert!(url.chars().all(|c| alphabet.contains(c)));

        let back = parse_base64_to_bits(&url).unwrap();
        assert_eq!(back.len() % 6, 0);
        assert_eq!(back.len(), len.div_ceil(6) * 6);
        for i in 0..back.len() {
            assert_eq!(back.get(i), Some(if i < len { bits.get(i).unwrap() } else { false }));
        }
    }
}

#[test]
fn every_v1_schema_round_trips_defaults() {
    for extrusion in ExtrusionCategory::available(1) {
        for footprint in FootprintCategory::available(1) {
            for method in MethodCategory::available(1) {
                let selectors = Selectors {
                    extrusion: *extrusion,
                    footprint: *footprint,
                    heights: *method,
                    twist: *method,
                    skew: *method,
                };
                let tree = resolve_full(1, &selectors).unwrap();
                let decoded = decode(&encode(&tree).unwrap()).unwrap();
                assert_trees_close(&tree, &decoded);
            }
        }
    }
}

#[test]
fn every_v0_schema_round_trips_defaults() {
    for extrusion in ExtrusionCategory::available(0) {
        for footprint in FootprintCategory::available(0) {
            for method in MethodCategory::available(0) {
                let selectors = Selectors {
                    extrusion: *extrusion,
                    footprint: *footprint,
                    heights: *method,
                    ..Selectors::default()
                };
                let tree = resolve_full(0, &selectors).unwrap();
                let url = encode(&tree).unwrap();
                let decoded = decode(&url).unwrap();
                assert_trees_close(&tree, &decoded);
            }
        }
    }
}

#[test]
fn edited_tree_round_trips() {
    let edits = [
        ("footprint.type", DataValue::Int(3)),
        ("footprint.xCount", DataValue::Int(5)),
        ("footprint.shell", DataValue::Boolean(true)),
        ("footprint.size", DataValue::Float(37.0)),
        ("extrusion.insetSides", DataValue::Float(0.23)),
        ("heights.method", DataValue::Int(2)),
        ("heights.period", DataValue::Float(2.5)),
        ("twist.method", DataValue::Int(1)),
        ("twist.angle", DataValue::Float(-12.5)),
    ];
    let mut tree = get_default_object(1).unwrap();
    for (path, value) in edits {
        tree = update_data_entry(&tree, &FieldPath::from(path), value).unwrap();
    }

    let decoded = decode(&encode(&tree).unwrap()).unwrap();
    assert_trees_close(&tree, &decoded);
    assert_eq!(
        decoded.value(&FieldPath::from("footprint.xCount")),
        Some(&DataValue::Int(5))
    );
    assert_abs_diff_eq!(
        decoded
            .value(&FieldPath::from("twist.angle"))
            .and_then(DataValue::as_float)
            .unwrap(),
        -12.5,
        epsilon = 1e-9
    );
}

#[test]
fn url_starts_with_version_byte() {
    let v1 = encode(&get_default_object(1).unwrap()).unwrap();
    let bits = parse_base64_to_bits(&v1).unwrap();
    assert_eq!(bits.read_uint(0, 8), Some(1));

    let v0 = encode(&get_default_object(0).unwrap()).unwrap();
    assert!(v0.starts_with('A'));
}

#[test]
fn tree_serializes_to_json() {
    let tree = get_default_object(1).unwrap();
    let json = serde_json::to_value(&tree).unwrap();
    assert_eq!(json["footprint"]["segments"]["range"]["type"], "int");
    assert_eq!(json["version"]["value"]["version"], 1);
}
