//! Wire round trips and the shape-tolerant decode paths.

use std::collections::{BTreeMap, HashMap};

use replica_parcel::error::{DecodeError, ParcelError};
use replica_parcel::{Parcel, decode, encode};
use replica_reflect::derive::Reflect;
use replica_reflect::info::TypePath;
use replica_reflect::registry::TypeRegistry;
use replica_reflect::{Absent, Reflect};

#[derive(Reflect, Debug, Default, PartialEq)]
#[reflect(default)]
struct Profile {
    name: String,
    count: i32,
    tags: Vec<String>,
}

#[derive(Reflect, Debug, Default, PartialEq)]
#[reflect(default)]
struct Wide {
    shared: i32,
    extra: String,
}

#[derive(Reflect, Debug, Default, PartialEq)]
#[reflect(default)]
struct Everything {
    flag: bool,
    letter: char,
    small: i16,
    wide: u64,
    ratio: f64,
    text: String,
    fixed: [i32; 3],
    lookup: BTreeMap<String, u8>,
    maybe: Option<i32>,
    nothing: Option<String>,
}

fn registry_for<T: replica_reflect::registry::GetTypeRecord>() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry.register::<T>();
    registry
}

fn round_trip<T>(value: &T, registry: &TypeRegistry) -> T
where
    T: Reflect + PartialEq + std::fmt::Debug,
{
    let bytes = encode(value).unwrap();
    decode(&bytes, registry).unwrap().take::<T>().unwrap()
}

#[test]
fn scalars_round_trip() {
    let registry = TypeRegistry::new();

    assert_eq!(round_trip(&true, &registry), true);
    assert_eq!(round_trip(&'é', &registry), 'é');
    assert_eq!(round_trip(&(-7_i8), &registry), -7);
    assert_eq!(round_trip(&40_000_u16, &registry), 40_000);
    assert_eq!(round_trip(&u32::MAX, &registry), u32::MAX);
    assert_eq!(round_trip(&(-5_000_000_000_i64), &registry), -5_000_000_000);
    assert_eq!(round_trip(&u64::MAX, &registry), u64::MAX);
    assert_eq!(round_trip(&1.5_f32, &registry), 1.5);
    assert_eq!(round_trip(&-2.25_f64, &registry), -2.25);
    assert_eq!(round_trip(&String::from("héllo"), &registry), "héllo");
}

#[test]
fn aggregates_round_trip() {
    let registry = registry_for::<Profile>();
    let original = Profile {
        name: "a".into(),
        count: 3,
        tags: vec!["x".into(), "y".into()],
    };

    assert_eq!(round_trip(&original, &registry), original);
}

#[test]
fn containers_round_trip() {
    let mut registry = TypeRegistry::new();
    registry.register::<Vec<Vec<i32>>>();
    registry.register::<HashMap<String, i64>>();

    let nested = vec![vec![1_i32, 2], vec![], vec![3]];
    assert_eq!(round_trip(&nested, &registry), nested);

    let lookup = HashMap::from([("a".to_owned(), 1_i64), ("b".to_owned(), 2)]);
    assert_eq!(round_trip(&lookup, &registry), lookup);
}

#[test]
fn every_payload_shape_round_trips() {
    let registry = registry_for::<Everything>();
    let original = Everything {
        flag: true,
        letter: 'q',
        small: -3,
        wide: 1 << 50,
        ratio: 0.5,
        text: "body".into(),
        fixed: [7, 8, 9],
        lookup: BTreeMap::from([("k".to_owned(), 250_u8)]),
        maybe: Some(12),
        nothing: None,
    };

    assert_eq!(round_trip(&original, &registry), original);
}

#[test]
fn top_level_none_decodes_to_absent() {
    let registry = TypeRegistry::new();
    let bytes = encode(&None::<i32>).unwrap();

    let value = decode(&bytes, &registry).unwrap();
    assert!(value.is::<Absent>());
}

#[test]
fn unknown_tags_abort_the_decode() {
    let registry = TypeRegistry::new();

    let mut parcel = Parcel::new();
    parcel.write_string("nowhere::Ghost").unwrap();
    parcel.write_i32(1);
    let bytes = parcel.marshall();

    let err = decode(&bytes, &registry).unwrap_err();
    assert!(matches!(err, DecodeError::TypeResolution { .. }));
}

#[test]
fn absent_values_skip_tag_resolution() {
    // A null is readable even when its tag resolves to nothing.
    let registry = TypeRegistry::new();

    let mut parcel = Parcel::new();
    parcel.write_string("nowhere::Ghost").unwrap();
    parcel.write_i32(0);
    let bytes = parcel.marshall();

    let value = decode(&bytes, &registry).unwrap();
    assert!(value.is::<Absent>());
}

#[test]
fn unknown_wire_fields_are_skipped() {
    let registry = registry_for::<Wide>();

    // A payload written by some wider shape: one field the target knows,
    // one it does not.
    let mut parcel = Parcel::new();
    parcel.write_string(Wide::type_path()).unwrap();
    parcel.write_i32(1);
    parcel.write_i32(2);
    parcel.write_string("shared").unwrap();
    parcel.write_string("i32").unwrap();
    parcel.write_i32(1);
    parcel.write_i32(41);
    parcel.write_string("ghost").unwrap();
    parcel.write_string("i32").unwrap();
    parcel.write_i32(1);
    parcel.write_i32(99);
    let bytes = parcel.marshall();

    let value = decode(&bytes, &registry).unwrap().take::<Wide>().unwrap();
    assert_eq!(
        value,
        Wide {
            shared: 41,
            extra: String::new(),
        }
    );
}

#[test]
fn missing_wire_fields_keep_their_defaults() {
    let registry = registry_for::<Wide>();

    let mut parcel = Parcel::new();
    parcel.write_string(Wide::type_path()).unwrap();
    parcel.write_i32(1);
    parcel.write_i32(1);
    parcel.write_string("extra").unwrap();
    parcel.write_string("alloc::string::String").unwrap();
    parcel.write_i32(1);
    parcel.write_string("kept").unwrap();
    let bytes = parcel.marshall();

    let value = decode(&bytes, &registry).unwrap().take::<Wide>().unwrap();
    assert_eq!(
        value,
        Wide {
            shared: 0,
            extra: "kept".into(),
        }
    );
}

#[test]
fn mismatched_field_payloads_fail_the_decode() {
    let registry = registry_for::<Wide>();

    let mut parcel = Parcel::new();
    parcel.write_string(Wide::type_path()).unwrap();
    parcel.write_i32(1);
    parcel.write_i32(1);
    parcel.write_string("shared").unwrap();
    parcel.write_string("alloc::string::String").unwrap();
    parcel.write_i32(1);
    parcel.write_string("not a number").unwrap();
    let bytes = parcel.marshall();

    let err = decode(&bytes, &registry).unwrap_err();
    assert!(matches!(err, DecodeError::FieldAccess(_)));
}

#[test]
fn truncated_buffers_are_read_errors() {
    let registry = registry_for::<Profile>();
    let bytes = encode(&Profile::default()).unwrap();

    let err = decode(&bytes[..bytes.len() - 2], &registry).unwrap_err();
    assert!(matches!(err, DecodeError::Parcel(ParcelError::Truncated { .. })));
}

#[test]
fn null_fields_decode_into_absent_options() {
    let registry = registry_for::<Everything>();
    let original = Everything::default();

    // `nothing: None` goes out as the reserved sentinel and comes back
    // as an untouched default.
    let restored = round_trip(&original, &registry);
    assert_eq!(restored.nothing, None);
    assert_eq!(restored.maybe, None);
}
