//! The full surface through the coordinator: copy, wire round trips,
//! registration policy and the self-copy guard.

use std::sync::Arc;

use replica_core::Replicator;
use replica_reflect::derive::Reflect;
use replica_reflect::error::CopyError;

#[derive(Reflect, Debug, Default, Clone, PartialEq)]
#[reflect(default, clone)]
struct Profile {
    name: String,
    count: i32,
    tags: Vec<String>,
}

#[derive(Reflect, Debug, Default, Clone, PartialEq)]
#[reflect(default, clone)]
struct Session {
    token: Arc<Vec<u8>>,
    attempts: i32,
}

fn sample_profile() -> Profile {
    Profile {
        name: "a".into(),
        count: 3,
        tags: vec!["x".into(), "y".into()],
    }
}

#[test]
fn copy_produces_an_independent_equal_value() {
    let kit = Replicator::new();
    kit.register::<Profile>();
    let original = sample_profile();

    let copy = kit.copy(&original).unwrap().take::<Profile>().unwrap();

    assert_eq!(copy.name, "a");
    assert_eq!(copy.count, 3);
    assert_eq!(copy.tags, ["x", "y"]);
    assert!(!std::ptr::eq(original.tags.as_ptr(), copy.tags.as_ptr()));
}

#[test]
fn serialize_then_deserialize_reproduces_the_value() {
    let kit = Replicator::new();
    kit.register::<Profile>();
    let original = sample_profile();

    let bytes = kit.serialize(&original).unwrap();
    let restored = kit.deserialize(&bytes).unwrap().take::<Profile>().unwrap();

    assert_eq!(restored, original);
}

#[test]
fn primitive_arrays_copy_to_fresh_buffers() {
    let kit = Replicator::new();
    let source = [1_i32, 2, 3];

    let copy = kit.copy(&source).unwrap().take::<[i32; 3]>().unwrap();

    assert_eq!(copy, [1, 2, 3]);
    assert!(!std::ptr::eq(source.as_ptr(), copy.as_ptr()));
}

#[test]
fn registering_ignored_excludes_a_plain_aggregate() {
    let kit = Replicator::new();
    kit.register_ignored::<Session>();

    let original = Session {
        token: Arc::new(vec![1, 2, 3]),
        attempts: 5,
    };

    let copy = kit.copy(&original).unwrap().take::<Session>().unwrap();

    // plain by shape, but excluded: the copy shares the original's handle
    assert!(Arc::ptr_eq(&original.token, &copy.token));
    assert_eq!(copy.attempts, 5);
}

#[test]
fn copying_the_coordinator_is_refused() {
    let kit = Replicator::new();
    let other = Replicator::new();

    let err = kit.copy(&other).unwrap_err();
    assert!(matches!(err, CopyError::SelfCopy { .. }));
}

#[cfg(feature = "auto_register")]
#[test]
fn derived_types_register_automatically() {
    // No explicit `register` call: the derive submitted Profile when this
    // binary was linked.
    let kit = Replicator::new();
    let original = sample_profile();

    let bytes = kit.serialize(&original).unwrap();
    let restored = kit.deserialize(&bytes).unwrap().take::<Profile>().unwrap();
    assert_eq!(restored, original);

    kit.with_registry(|registry| {
        assert!(registry.contains(std::any::TypeId::of::<Profile>()));
    });
}

#[test]
fn scalars_pass_through_the_whole_surface() {
    let kit = Replicator::new();

    let copy = kit.copy(&42_i64).unwrap().take::<i64>().unwrap();
    assert_eq!(copy, 42);

    let bytes = kit.serialize(&String::from("wire")).unwrap();
    let restored = kit.deserialize(&bytes).unwrap().take::<String>().unwrap();
    assert_eq!(restored, "wire");
}
