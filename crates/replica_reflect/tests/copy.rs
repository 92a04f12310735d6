//! Deep-copy semantics over the full type universe.

use std::collections::HashMap;
use std::sync::Arc;

use replica_reflect::copy::deep_copy;
use replica_reflect::derive::Reflect;
use replica_reflect::error::{ConstructionError, CopyError};
use replica_reflect::registry::TypeRegistry;

#[derive(Reflect, Debug, Default, Clone, PartialEq)]
#[reflect(default, clone)]
struct Profile {
    name: String,
    count: i32,
    tags: Vec<String>,
}

#[derive(Reflect, Debug, Default, PartialEq)]
#[reflect(default)]
struct Nested {
    profile: Profile,
    lookup: HashMap<String, i64>,
    maybe: Option<Profile>,
}

#[derive(Reflect, Debug, Default, Clone)]
#[reflect(default, clone)]
struct SharedHandle {
    payload: Arc<Vec<u8>>,
}

#[derive(Reflect, Debug, Default, PartialEq)]
#[reflect(default)]
struct NoConstruct {
    value: i32,
}

#[derive(Reflect, Debug, PartialEq)]
struct Unbuildable {
    value: i32,
}

fn registry_with<F: FnOnce(&mut TypeRegistry)>(extend: F) -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    extend(&mut registry);
    registry
}

#[test]
fn plain_aggregates_copy_without_aliasing() {
    let registry = registry_with(|registry| registry.register::<Profile>());
    let original = Profile {
        name: "a".into(),
        count: 3,
        tags: vec!["x".into(), "y".into()],
    };

    let copy = deep_copy(&original, &registry).unwrap();
    let mut copy = copy.take::<Profile>().unwrap();

    assert_eq!(copy, original);
    assert!(!std::ptr::eq(original.tags.as_ptr(), copy.tags.as_ptr()));

    // mutating the copy leaves the original untouched
    copy.tags.push("z".into());
    copy.count = 9;
    assert_eq!(original.count, 3);
    assert_eq!(original.tags.len(), 2);
}

#[test]
fn nested_structures_copy_deeply() {
    let registry = registry_with(|registry| registry.register::<Nested>());
    let original = Nested {
        profile: Profile {
            name: "inner".into(),
            count: 7,
            tags: vec!["t".into()],
        },
        lookup: HashMap::from([("k".to_owned(), 5_i64)]),
        maybe: Some(Profile {
            name: "opt".into(),
            count: 1,
            tags: vec![],
        }),
    };

    let copy = deep_copy(&original, &registry).unwrap();
    let copy = copy.take::<Nested>().unwrap();

    assert_eq!(copy, original);
    assert!(!std::ptr::eq(
        original.profile.tags.as_ptr(),
        copy.profile.tags.as_ptr()
    ));
}

#[test]
fn absent_options_copy_to_absent() {
    let registry = registry_with(|registry| registry.register::<Nested>());
    let original = Nested::default();

    let copy = deep_copy(&original, &registry).unwrap();
    assert_eq!(copy.take::<Nested>().unwrap().maybe, None);
}

#[test]
fn ignored_types_come_back_shallow() {
    let registry = registry_with(|registry| registry.register_ignored::<SharedHandle>());
    let original = SharedHandle {
        payload: Arc::new(vec![1, 2, 3]),
    };

    let copy = deep_copy(&original, &registry).unwrap();
    let copy = copy.take::<SharedHandle>().unwrap();

    // excluded from traversal: the handle inside is the same allocation
    assert!(Arc::ptr_eq(&original.payload, &copy.payload));
}

#[test]
fn immutable_registration_preserves_handles_in_graphs() {
    let registry = registry_with(|registry| {
        registry.register::<Profile>();
        registry.register_immutable::<SharedHandle>();
    });

    let handle = SharedHandle {
        payload: Arc::new(vec![9]),
    };
    let copy = deep_copy(&handle, &registry).unwrap();
    let copy = copy.take::<SharedHandle>().unwrap();
    assert!(Arc::ptr_eq(&handle.payload, &copy.payload));
}

#[test]
fn arc_fields_share_their_allocation() {
    let registry = registry_with(|registry| registry.register::<SharedHandle>());
    let original = SharedHandle {
        payload: Arc::new(vec![4, 5]),
    };

    // not ignored this time: the aggregate is traversed, but the handle
    // field is scalar-shaped and clones by reference
    let copy = deep_copy(&original, &registry).unwrap();
    let copy = copy.take::<SharedHandle>().unwrap();
    assert!(Arc::ptr_eq(&original.payload, &copy.payload));
}

#[test]
fn unregistered_aggregates_fail_construction() {
    let registry = TypeRegistry::new();
    let original = NoConstruct { value: 1 };

    let err = deep_copy(&original, &registry).unwrap_err();
    assert!(matches!(
        err,
        CopyError::Construction(ConstructionError::NotRegistered { .. })
    ));
}

#[test]
fn missing_constructor_is_an_error_not_a_null() {
    let registry = registry_with(|registry| registry.register::<Unbuildable>());
    let original = Unbuildable { value: 1 };

    let err = deep_copy(&original, &registry).unwrap_err();
    assert!(matches!(
        err,
        CopyError::Construction(ConstructionError::NoConstructor { .. })
    ));
}

#[test]
fn containers_of_aggregates_copy_elementwise() {
    let registry = registry_with(|registry| registry.register::<Profile>());
    let original = vec![
        Profile {
            name: "one".into(),
            count: 1,
            tags: vec!["a".into()],
        },
        Profile {
            name: "two".into(),
            count: 2,
            tags: vec![],
        },
    ];

    let copy = deep_copy(&original, &registry).unwrap();
    let copy = copy.take::<Vec<Profile>>().unwrap();

    assert_eq!(copy, original);
    assert!(!std::ptr::eq(
        original[0].tags.as_ptr(),
        copy[0].tags.as_ptr()
    ));
}
