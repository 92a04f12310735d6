//! The derived reflection surface: field tables, attribute hooks and
//! registration.

use replica_reflect::Reflect;
use replica_reflect::derive::Reflect;
use replica_reflect::error::{ConstructionError, FieldAccessError};
use replica_reflect::info::{Kind, TypePath, Typed};
use replica_reflect::ops::{ValueMut, ValueRef};
use replica_reflect::registry::{GetTypeRecord, TypeRegistry};
use std::any::TypeId;

#[derive(Reflect, Debug, Default, Clone, PartialEq)]
#[reflect(default, clone)]
struct Sample {
    label: String,
    count: i32,
    #[reflect(skip)]
    scratch: Vec<u8>,
}

#[derive(Reflect, Debug, PartialEq)]
struct Bare {
    value: i32,
}

#[derive(Reflect, Debug, Default, PartialEq)]
#[reflect(default)]
struct Wrapper<T> {
    value: T,
}

#[derive(Reflect, Debug, Default, PartialEq)]
#[reflect(default)]
struct Unit;

#[test]
fn kind_is_plain() {
    let sample = Sample::default();
    assert_eq!(sample.kind(), Kind::Plain);
}

#[test]
fn field_table_follows_declaration_order() {
    let sample = Sample {
        label: "a".into(),
        count: 3,
        scratch: vec![1],
    };
    let ValueRef::Plain(fields) = sample.view() else {
        panic!("expected a plain view");
    };

    assert_eq!(fields.field_len(), 2);
    assert_eq!(fields.name_at(0), Some("label"));
    assert_eq!(fields.name_at(1), Some("count"));
    assert_eq!(fields.name_at(2), None);

    assert_eq!(fields.field("count").unwrap().downcast_ref::<i32>(), Some(&3));
    assert_eq!(
        fields.field_at(0).unwrap().downcast_ref::<String>().unwrap(),
        "a"
    );
}

#[test]
fn skipped_fields_are_not_introspected() {
    let sample = Sample::default();
    let ValueRef::Plain(fields) = sample.view() else {
        panic!("expected a plain view");
    };
    assert!(fields.field("scratch").is_none());

    let info = Sample::type_info().as_plain().unwrap();
    assert!(info.field("scratch").is_none());
    assert_eq!(info.field_len(), 2);
}

#[test]
fn set_field_converts_and_rejects() {
    let mut sample = Sample::default();
    {
        let ValueMut::Plain(fields) = sample.view_mut() else {
            panic!("expected a plain view");
        };

        fields.set_field("count", Box::new(9_i32)).unwrap();

        let mismatch = fields.set_field("count", Box::new(String::from("nope")));
        assert!(matches!(
            mismatch,
            Err(FieldAccessError::TypeMismatch { .. })
        ));

        let missing = fields.set_field("ghost", Box::new(1_i32));
        assert!(matches!(missing, Err(FieldAccessError::NoSuchField { .. })));
    }
    assert_eq!(sample.count, 9);
}

#[test]
fn default_attribute_controls_construction() {
    let mut registry = TypeRegistry::new();
    registry.register::<Sample>();
    registry.register::<Bare>();

    let constructed = registry
        .record(TypeId::of::<Sample>())
        .unwrap()
        .construct()
        .unwrap();
    assert_eq!(constructed.take::<Sample>().unwrap(), Sample::default());

    let refused = registry.record(TypeId::of::<Bare>()).unwrap().construct();
    assert!(matches!(
        refused,
        Err(ConstructionError::NoConstructor { .. })
    ));
}

#[test]
fn clone_attribute_controls_direct_clone() {
    let sample = Sample {
        label: "x".into(),
        count: 1,
        scratch: vec![],
    };
    let cloned = sample.clone_boxed().unwrap();
    assert_eq!(cloned.take::<Sample>().unwrap(), sample);

    let bare = Bare { value: 2 };
    assert!(matches!(
        bare.clone_boxed(),
        Err(ConstructionError::CloneUnsupported { .. })
    ));
}

#[test]
fn registration_pulls_field_dependencies() {
    let mut registry = TypeRegistry::empty();
    registry.register::<Sample>();

    assert!(registry.contains(TypeId::of::<String>()));
    assert!(registry.contains(TypeId::of::<i32>()));
    // the skipped field's type is not part of the traversal
    assert!(!registry.contains(TypeId::of::<Vec<u8>>()));
}

#[test]
fn type_path_includes_module() {
    assert_eq!(Sample::type_path(), concat!(module_path!(), "::Sample"));
    assert_eq!(Sample::type_name(), "Sample");
}

#[test]
fn generic_paths_render_arguments() {
    assert_eq!(
        <Wrapper<i32>>::type_path(),
        format!("{}::Wrapper<i32>", module_path!())
    );
    assert_eq!(<Wrapper<i32>>::type_name(), "Wrapper<i32>");

    // one cell entry per instantiation
    assert_eq!(
        <Wrapper<String>>::type_path(),
        format!("{}::Wrapper<alloc::string::String>", module_path!())
    );
}

#[test]
fn generic_records_construct() {
    let record = <Wrapper<i32> as GetTypeRecord>::get_type_record();
    let fresh = record.construct().unwrap();
    assert_eq!(fresh.take::<Wrapper<i32>>().unwrap(), Wrapper { value: 0 });
}

#[test]
fn unit_structs_have_empty_tables() {
    let unit = Unit;
    let ValueRef::Plain(fields) = unit.view() else {
        panic!("expected a plain view");
    };
    assert_eq!(fields.field_len(), 0);
    assert_eq!(fields.name_at(0), None);
}
