extern crate protoclass;

use protoclass::{Function, OopError, PropertyBlock, Realm, RealmConfig, Value};

fn returns(value: &'static str) -> Function {
    Function::new(value, move |_, _, _| Ok(Value::from(value)))
}

fn class_with_foo(realm: &mut Realm) -> protoclass::ObjectId {
    let base = realm.base();
    let class = realm.extend(base).unwrap();
    realm
        .add_methods(class, PropertyBlock::new().function("foo", returns("original")))
        .unwrap();
    class
}

fn call(realm: &mut Realm, id: protoclass::ObjectId, name: &str) -> Value {
    match realm.get(id, name).unwrap() {
        Value::Function(f) => f.call(realm, &Value::Object(id), &[]).unwrap(),
        other => panic!("{} is not a method: {}", name, other),
    }
}

#[test]
fn test_mocks_require_shadow_layer() {
    let mut realm = Realm::new(RealmConfig::default());
    let class = class_with_foo(&mut realm);
    assert!(matches!(
        realm.add_mocks(class, PropertyBlock::new().function("foo", returns("mock"))),
        Err(OopError::DiagnosticModeRequired(_))
    ));
}

#[test]
fn test_mocks_reject_non_functions() {
    let mut realm = Realm::new(RealmConfig::testing());
    let class = class_with_foo(&mut realm);
    assert!(matches!(
        realm.add_mocks(class, PropertyBlock::new().value("foo", "mock")),
        Err(OopError::InvalidArgument(_))
    ));
}

#[test]
fn test_mock_shadows_and_removal_restores() {
    let mut realm = Realm::new(RealmConfig::testing());
    let class = class_with_foo(&mut realm);
    let instance = realm.create(class, &[]).unwrap();

    realm
        .add_mocks(class, PropertyBlock::new().function("foo", returns("mock")))
        .unwrap();
    assert!(realm.mocks().is_mocked(class, "foo"));
    assert_eq!(call(&mut realm, class, "foo"), Value::from("mock"));
    assert_eq!(call(&mut realm, instance, "foo"), Value::from("mock"));
    let target = realm.get_target(class).unwrap();
    assert!(realm.has_own_property(target, "foo").unwrap());

    realm.remove_mocks(class).unwrap();
    assert!(!realm.mocks().is_mocked(class, "foo"));
    assert_eq!(call(&mut realm, class, "foo"), Value::from("original"));
}

#[test]
fn test_mocks_are_per_object() {
    let mut realm = Realm::new(RealmConfig::testing());
    let class = class_with_foo(&mut realm);
    let other = class_with_foo(&mut realm);
    realm
        .add_mocks(class, PropertyBlock::new().function("foo", returns("mock")))
        .unwrap();
    assert_eq!(call(&mut realm, other, "foo"), Value::from("original"));
    assert_eq!(realm.mocks().mocked_names(class), vec!["foo".to_string()]);

    realm.clear_mocks();
    assert!(realm.mocks().is_empty());
    assert_eq!(call(&mut realm, class, "foo"), Value::from("original"));
}
