//! The recursive deep-copy engine.
//!
//! [`deep_copy`] walks a value by its classification and returns a new
//! value of the same runtime type with no mutable substructure shared with
//! the original. Immutable and ignored types short-circuit to their direct
//! clone; containers rebuild into a vacant instance of the same type; plain
//! aggregates construct through the registry and copy field by field.
//!
//! Depth is bounded only by the object graph's actual nesting. There is no
//! cycle detection: a self-referential graph would recurse without bound.

use crate::Reflect;
use crate::error::CopyError;
use crate::info::TypeRef;
use crate::ops::{Aggregate, Array, List, Map, Nullable, ValueMut, ValueRef};
use crate::registry::{Classification, TypeRegistry};

// -----------------------------------------------------------------------------
// deep_copy

/// Deep-copies `value`, resolving policy and construction through
/// `registry`.
///
/// The result is of the same runtime type as `value` and structurally equal
/// to it under the traversal this engine performs. Mutable substructure is
/// never shared; immutable and ignored values are duplicated through their
/// direct clone, which for handle-shaped types means the copy aliases the
/// original on purpose.
///
/// # Errors
///
/// - [`CopyError::SelfCopy`] when `value` is the coordinator itself, at
///   any depth.
/// - [`CopyError::Construction`] when a destination instance cannot be
///   created.
/// - [`CopyError::FieldAccess`] when a copied field or element cannot be
///   written back.
///
/// # Example
///
/// ```
/// use replica_reflect::copy::deep_copy;
/// use replica_reflect::registry::TypeRegistry;
///
/// let registry = TypeRegistry::new();
/// let original = vec![String::from("x"), String::from("y")];
///
/// let copy = deep_copy(&original, &registry).unwrap();
/// assert_eq!(copy.take::<Vec<String>>().unwrap(), original);
/// ```
pub fn deep_copy(
    value: &dyn Reflect,
    registry: &TypeRegistry,
) -> Result<Box<dyn Reflect>, CopyError> {
    if registry.is_coordinator(value.ty_id()) {
        return Err(CopyError::SelfCopy {
            type_path: value.reflect_type_path().into(),
        });
    }

    match registry.classify(value) {
        Classification::Immutable | Classification::Ignored => {
            value.clone_boxed().map_err(CopyError::Construction)
        }
        Classification::Shape(_) => match value.view() {
            ValueRef::Scalar(scalar) => scalar.clone_boxed().map_err(CopyError::Construction),
            ValueRef::Nullable(nullable) => copy_nullable(nullable, registry),
            ValueRef::Array(array) => copy_array(array, registry),
            ValueRef::List(list) => copy_list(list, registry),
            ValueRef::Map(map) => copy_map(map, registry),
            ValueRef::Plain(aggregate) => copy_aggregate(aggregate, registry),
        },
    }
}

// -----------------------------------------------------------------------------
// Per-kind traversal

fn copy_nullable(
    nullable: &dyn Nullable,
    registry: &TypeRegistry,
) -> Result<Box<dyn Reflect>, CopyError> {
    let Some(inner) = nullable.inner() else {
        let vacant: Box<dyn Reflect> = nullable.new_vacant();
        return Ok(vacant);
    };

    let copied = deep_copy(inner, registry)?;
    let mut target = nullable.new_vacant();
    target.set_inner(copied).map_err(CopyError::FieldAccess)?;
    Ok(target)
}

fn copy_array(array: &dyn Array, registry: &TypeRegistry) -> Result<Box<dyn Reflect>, CopyError> {
    // An array of immutable items duplicates in one pass over the item
    // clones, with no engine recursion per element.
    if items_short_circuit(array.reflect_type_info().as_array().map(|info| info.item()), registry) {
        return array.clone_boxed().map_err(CopyError::Construction);
    }

    let mut items = Vec::with_capacity(array.len());
    for item in array.iter_items() {
        items.push(deep_copy(item, registry)?);
    }
    array.from_items(items).map_err(CopyError::Construction)
}

fn copy_list(list: &dyn List, registry: &TypeRegistry) -> Result<Box<dyn Reflect>, CopyError> {
    if items_short_circuit(list.reflect_type_info().as_list().map(|info| info.item()), registry) {
        return list.clone_boxed().map_err(CopyError::Construction);
    }

    let mut target = list.new_vacant();
    for item in list.iter_items() {
        let copied = deep_copy(item, registry)?;
        target.push_boxed(copied).map_err(CopyError::FieldAccess)?;
    }
    Ok(target)
}

fn copy_map(map: &dyn Map, registry: &TypeRegistry) -> Result<Box<dyn Reflect>, CopyError> {
    let mut target = map.new_vacant();
    for (key, value) in map.iter_entries() {
        let key = deep_copy(key, registry)?;
        let value = deep_copy(value, registry)?;
        target.insert_boxed(key, value).map_err(CopyError::FieldAccess)?;
    }
    Ok(target)
}

fn copy_aggregate(
    aggregate: &dyn Aggregate,
    registry: &TypeRegistry,
) -> Result<Box<dyn Reflect>, CopyError> {
    let mut target =
        registry.create_instance(aggregate.ty_id(), aggregate.reflect_type_path())?;

    let ValueMut::Plain(fields) = target.view_mut() else {
        unreachable!("a type record constructs its own type");
    };

    for (name, field) in aggregate.iter_fields() {
        let copied = deep_copy(field, registry)?;
        fields.set_field(name, copied).map_err(CopyError::FieldAccess)?;
    }

    Ok(target)
}

// Whether every item of a container classifies as untraversed, making the
// container's direct clone equivalent to an element-wise deep copy.
fn items_short_circuit(item: Option<TypeRef>, registry: &TypeRegistry) -> bool {
    let Some(item) = item else { return false };
    matches!(
        registry.classify_parts(item.id(), item.kind()),
        Classification::Immutable | Classification::Ignored
    )
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::deep_copy;
    use crate::registry::TypeRegistry;

    #[test]
    fn scalars_copy_by_value() {
        let registry = TypeRegistry::new();
        let copy = deep_copy(&42_i32, &registry).unwrap();
        assert_eq!(copy.take::<i32>().unwrap(), 42);
    }

    #[test]
    fn primitive_arrays_copy_to_independent_buffers() {
        let registry = TypeRegistry::new();
        let source = [1_i32, 2, 3];

        let copy = deep_copy(&source, &registry).unwrap();
        let copy = copy.take::<[i32; 3]>().unwrap();

        assert_eq!(copy, [1, 2, 3]);
        assert!(!std::ptr::eq(source.as_ptr(), copy.as_ptr()));
    }

    #[test]
    fn nested_lists_copy_deeply() {
        let registry = TypeRegistry::new();
        let source = vec![vec![1_u8, 2], vec![3]];

        let copy = deep_copy(&source, &registry).unwrap();
        let copy = copy.take::<Vec<Vec<u8>>>().unwrap();

        assert_eq!(copy, source);
        assert!(!std::ptr::eq(source[0].as_ptr(), copy[0].as_ptr()));
    }

    #[test]
    fn absent_options_stay_absent() {
        let registry = TypeRegistry::new();
        let source: Option<String> = None;

        let copy = deep_copy(&source, &registry).unwrap();
        assert_eq!(copy.take::<Option<String>>().unwrap(), None);
    }
}
