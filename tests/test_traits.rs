extern crate protoclass;

use std::cell::Cell;
use std::rc::Rc;

use protoclass::{
    Function, ObjectId, OopError, PropertyBlock, PropertyFlags, Realm, RealmConfig, Value,
};

fn noop(name: &str) -> Function {
    Function::new(name, |_, _, _| Ok(Value::Undefined))
}

/// Plain-object trait: `boo` on a parent, `foo` and `init` on the trait.
fn plain_trait(realm: &mut Realm) -> (ObjectId, Function) {
    let parent = realm.new_object();
    realm
        .define_value(parent, "boo", Value::from("hello"), PropertyFlags::PUBLIC_CONSTANT)
        .unwrap();
    let trait_object = realm.object_create(Some(parent)).unwrap();
    let foo = noop("foo");
    realm
        .define_block(
            trait_object,
            &PropertyBlock::new()
                .function("foo", foo.clone())
                .function("init", noop("init")),
            PropertyFlags::PUBLIC_CONSTANT,
        )
        .unwrap();
    (trait_object, foo)
}

// ============================================================================
// Plain traits
// ============================================================================

#[test]
fn test_add_trait_copies_chain_except_init() {
    let mut realm = Realm::new(RealmConfig::default());
    let (trait_object, foo) = plain_trait(&mut realm);
    let host = realm.new_object();

    realm.add_trait(host, trait_object).unwrap();

    assert_eq!(realm.get(host, "foo").unwrap(), Value::Function(foo));
    assert_eq!(realm.get(host, "boo").unwrap(), Value::from("hello"));
    assert!(!realm.has_own_property(host, "init").unwrap());
    let flags = realm.get_own_property(host, "boo").unwrap().unwrap().flags();
    assert_eq!(flags, PropertyFlags::PUBLIC_CONSTANT);
}

#[test]
fn test_add_trait_routes_methods_to_target() {
    let mut realm = Realm::new(RealmConfig::testing());
    let (trait_object, _) = plain_trait(&mut realm);
    let base = realm.base();
    let host = realm.extend(base).unwrap();
    let target = realm.get_target(host).unwrap();

    realm.add_trait(host, trait_object).unwrap();

    assert!(realm.has_own_property(target, "foo").unwrap());
    assert!(!realm.has_own_property(host, "foo").unwrap());
    assert!(realm.has_own_property(host, "boo").unwrap());
}

#[test]
fn test_adding_trait_twice_conflicts() {
    let mut realm = Realm::new(RealmConfig::default());
    let (trait_object, _) = plain_trait(&mut realm);
    let host = realm.new_object();
    realm.add_trait(host, trait_object).unwrap();
    assert!(matches!(
        realm.add_trait(host, trait_object),
        Err(OopError::PropertyConflict(_))
    ));
}

#[test]
fn test_trait_conflict_copies_nothing() {
    let mut realm = Realm::new(RealmConfig::default());
    let (trait_object, _) = plain_trait(&mut realm);
    let host = realm.new_object();
    realm.set(host, "boo", Value::from("taken")).unwrap();
    assert!(matches!(
        realm.add_trait(host, trait_object),
        Err(OopError::PropertyConflict(_))
    ));
    assert!(!realm.has_own_property(host, "foo").unwrap());
    assert_eq!(realm.get(host, "boo").unwrap(), Value::from("taken"));
}

// ============================================================================
// Class traits
// ============================================================================

#[test]
fn test_class_trait_stops_at_base() {
    let mut realm = Realm::new(RealmConfig::default());
    let base = realm.base();
    realm
        .add_methods(base, PropertyBlock::new().function("shared", noop("shared")))
        .unwrap();
    let trait_class = realm.extend(base).unwrap();
    realm
        .add_methods(
            trait_class,
            PropertyBlock::new()
                .function("init", noop("init"))
                .function("traitMethod", noop("traitMethod")),
        )
        .unwrap();
    let host = realm.extend(base).unwrap();

    realm.add_trait(host, trait_class).unwrap();

    assert!(realm.has_own_property(host, "traitMethod").unwrap());
    assert!(!realm.has_own_property(host, "shared").unwrap());
    assert!(!realm.has_own_property(host, "init").unwrap());
}

#[test]
fn test_class_trait_needs_class_host() {
    let mut realm = Realm::new(RealmConfig::default());
    let base = realm.base();
    let trait_class = realm.extend(base).unwrap();
    realm
        .add_methods(trait_class, PropertyBlock::new().function("foo", noop("foo")))
        .unwrap();
    let host = realm.new_object();
    assert!(matches!(
        realm.add_trait(host, trait_class),
        Err(OopError::InvalidTrait(_))
    ));
}

#[test]
fn test_trait_resolves_postponed_values() {
    let mut realm = Realm::new(RealmConfig::default());
    let trait_object = realm.new_object();
    let generator = Function::new("gen", |_, _, _| Ok(Value::from(42)));
    realm.postpone(trait_object, "answer", generator, vec![]).unwrap();
    let host = realm.new_object();

    realm.add_trait(host, trait_object).unwrap();

    let copied = realm.get_own_property(host, "answer").unwrap().unwrap();
    assert!(copied.is_data_descriptor());
    assert_eq!(realm.get(host, "answer").unwrap(), Value::from(42));
}

#[test]
fn test_trait_conflict_leaves_postponed_values_pending() {
    let mut realm = Realm::new(RealmConfig::default());
    let trait_object = realm.new_object();
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    let generator = Function::new("gen", move |_, _, _| {
        counter.set(counter.get() + 1);
        Ok(Value::from(42))
    });
    realm.postpone(trait_object, "lazy", generator, vec![]).unwrap();
    realm
        .define_value(trait_object, "bar", Value::Function(noop("bar")), PropertyFlags::PUBLIC_CONSTANT)
        .unwrap();
    let host = realm.new_object();
    realm.set(host, "bar", Value::from("taken")).unwrap();

    assert!(matches!(
        realm.add_trait(host, trait_object),
        Err(OopError::PropertyConflict(_))
    ));
    assert_eq!(calls.get(), 0);
    assert!(!realm.has_own_property(host, "lazy").unwrap());
    let pending = realm.get_own_property(trait_object, "lazy").unwrap().unwrap();
    assert!(pending.is_deferred());
}

#[test]
fn test_add_trait_and_extend_allows_overrides() {
    let mut realm = Realm::new(RealmConfig::default());
    let base = realm.base();
    let trait_class = realm.extend(base).unwrap();
    realm
        .add_methods(trait_class, PropertyBlock::new().function("foo", noop("traitFoo")))
        .unwrap();
    let host = realm.extend(base).unwrap();

    let derived = realm.add_trait_and_extend(host, trait_class).unwrap();
    assert_ne!(derived, host);
    assert!(realm.instance_of(derived, host).unwrap());

    let own_foo = noop("ownFoo");
    realm
        .add_methods(derived, PropertyBlock::new().function("foo", own_foo.clone()))
        .unwrap();
    assert_eq!(realm.get(derived, "foo").unwrap(), Value::Function(own_foo));
}
