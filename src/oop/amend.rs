//! Amendment queue helpers for postponed properties.

use crate::ds::error::OopResult;
use crate::ds::function_object::Function;
use crate::ds::object_property::{Amendment, PropertyDescriptor};
use crate::ds::realm::Realm;
use crate::ds::value::Value;

/// Amendments queued on `descriptor`. Anything but an unresolved postponed
/// property has none.
pub fn get_amendments(descriptor: Option<&PropertyDescriptor>) -> Vec<Amendment> {
    match descriptor {
        Some(PropertyDescriptor::Deferred(postponed)) => postponed.amendments.clone(),
        _ => Vec::new(),
    }
}

/// Replaces the queue of a postponed property. No-op on resolved ones.
pub fn set_amendments(descriptor: &mut PropertyDescriptor, amendments: Vec<Amendment>) {
    if let PropertyDescriptor::Deferred(postponed) = descriptor {
        postponed.amendments = amendments;
    }
}

pub fn add_amendment(descriptor: &mut PropertyDescriptor, modifier: Function, args: Vec<Value>) {
    if let PropertyDescriptor::Deferred(postponed) = descriptor {
        postponed.amendments.push(Amendment { modifier, args });
    }
}

/// Runs `amendments` in order. Return values are discarded; the first
/// failing modifier stops the rest.
pub fn apply_amendments(realm: &mut Realm, amendments: &[Amendment]) -> OopResult<()> {
    for amendment in amendments {
        amendment.modifier.call(realm, &Value::Undefined, &amendment.args)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ds::object_property::{PostponedProperty, PropertyFlags};
    use crate::ds::realm::RealmConfig;

    fn noop() -> Function {
        Function::new("noop", |_, _, _| Ok(Value::Undefined))
    }

    #[test]
    fn test_only_postponed_descriptors_carry_amendments() {
        let mut value = PropertyDescriptor::data(Value::from(1), PropertyFlags::PUBLIC_CONSTANT);
        add_amendment(&mut value, noop(), vec![]);
        assert!(get_amendments(Some(&value)).is_empty());
        assert!(get_amendments(None).is_empty());

        let mut deferred = PropertyDescriptor::Deferred(PostponedProperty::new(noop(), vec![]));
        add_amendment(&mut deferred, noop(), vec![Value::from("a")]);
        add_amendment(&mut deferred, noop(), vec![Value::from("b")]);
        let amendments = get_amendments(Some(&deferred));
        assert_eq!(amendments.len(), 2);
        assert_eq!(amendments[1].args, vec![Value::from("b")]);

        set_amendments(&mut deferred, Vec::new());
        assert!(get_amendments(Some(&deferred)).is_empty());
    }

    #[test]
    fn test_apply_runs_in_order() {
        let mut realm = Realm::new(RealmConfig::default());
        let log = realm.new_object();
        let record = Function::new("record", move |realm, _, args| {
            let seen = match realm.get(log, "seen")? {
                Value::String(s) => s,
                _ => String::new(),
            };
            realm.set(log, "seen", Value::from(format!("{}{}", seen, args[0].as_str().unwrap_or(""))))?;
            Ok(Value::Undefined)
        });
        let amendments = vec![
            Amendment {
                modifier: record.clone(),
                args: vec![Value::from("a")],
            },
            Amendment {
                modifier: record,
                args: vec![Value::from("b")],
            },
        ];
        apply_amendments(&mut realm, &amendments).unwrap();
        assert_eq!(realm.get(log, "seen").unwrap(), Value::from("ab"));
    }
}
