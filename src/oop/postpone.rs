//! Postponed properties: values computed on first read.
//!
//! A postponed property is a `Deferred` descriptor on its host. The first
//! read runs the generator and replaces the descriptor with the resolved
//! value; the first write replaces it with the written value instead. In
//! both cases the amendments queued on the descriptor run once, right
//! after the value is in place.

use crate::ds::error::OopResult;
use crate::ds::function_object::Function;
use crate::ds::object::ObjectId;
use crate::ds::object_property::{PostponedProperty, PropertyDescriptor, PropertyFlags};
use crate::ds::realm::Realm;
use crate::ds::value::Value;
use crate::oop::amend;

/// Attributes of a resolved postponed property.
const RESOLVED_FLAGS: PropertyFlags = PropertyFlags::PUBLIC_CONSTANT;

fn callback_args(host: ObjectId, name: &str, extra: &[Value]) -> Vec<Value> {
    let mut args = Vec::with_capacity(extra.len() + 2);
    args.push(Value::Object(host));
    args.push(Value::from(name));
    args.extend_from_slice(extra);
    args
}

impl Realm {
    /// Defers `host[name]` until it is first read, when
    /// `generator(host, name, ...extra)` computes it. Amendments queued on
    /// an earlier postponed descriptor at `name` carry over.
    pub fn postpone(&mut self, host: ObjectId, name: &str, generator: Function, extra: Vec<Value>) -> OopResult<()> {
        let before = self.get_own_property(host, name)?;
        let amendments = amend::get_amendments(before);
        let mut after = PropertyDescriptor::Deferred(PostponedProperty::new(generator, extra));
        amend::set_amendments(&mut after, amendments);
        self.define_own_property(host, name, after)?;
        trace!("postponed '{}' on {}", name, host);
        Ok(())
    }

    /// Patches `host[name]` with `modifier(host, name, ...extra)` once the
    /// property resolves, or right away if it already has. Amending a name
    /// that was never postponed postpones it with a generator that leaves it
    /// unset, so amendments may be declared before the property is.
    pub fn amend_postponed(
        &mut self,
        host: ObjectId,
        name: &str,
        modifier: Function,
        extra: Vec<Value>,
    ) -> OopResult<()> {
        if !self.has_own_property(host, name)? {
            let placeholder = Function::new("placeholder", |_, _, _| Ok(Value::Undefined));
            self.postpone(host, name, placeholder, Vec::new())?;
        }
        let args = callback_args(host, name, &extra);
        let unresolved = self
            .get_own_property(host, name)?
            .map_or(false, PropertyDescriptor::is_deferred);
        if !unresolved {
            return modifier.call(self, &Value::Undefined, &args).map(|_| ());
        }
        if let Some(descriptor) = self.object_mut(host)?.get_own_property_mut(name) {
            amend::add_amendment(descriptor, modifier, args);
        }
        Ok(())
    }

    /// First read of a postponed property owned by `owner`.
    pub(crate) fn resolve_postponed(&mut self, owner: ObjectId, name: &str) -> OopResult<Value> {
        let postponed = match self.object_mut(owner)?.remove_property(name) {
            Some(PropertyDescriptor::Deferred(postponed)) => postponed,
            Some(other) => {
                self.object_mut(owner)?.insert_property(name.to_string(), other);
                return self.get(owner, name);
            }
            None => return Ok(Value::Undefined),
        };
        if let Some(failure) = postponed.failure.clone() {
            self.object_mut(owner)?
                .insert_property(name.to_string(), PropertyDescriptor::Deferred(postponed));
            return Err(failure);
        }

        trace!("resolving postponed '{}' on {}", name, owner);
        let args = callback_args(owner, name, &postponed.extra);
        let mut value = match postponed.generator.call(self, &Value::Object(owner), &args) {
            Ok(value) => value,
            Err(e) => {
                warn!("generator of '{}' on {} failed: {}", name, owner, e);
                let mut failed = postponed;
                failed.failure = Some(e.clone());
                self.object_mut(owner)?
                    .insert_property(name.to_string(), PropertyDescriptor::Deferred(failed));
                return Err(e);
            }
        };

        if value.is_undefined() {
            // the generator may have assigned the property itself
            let accessor_like = self
                .get_own_property(owner, name)?
                .map_or(false, PropertyDescriptor::is_accessor_descriptor);
            if !accessor_like {
                value = self.get(owner, name)?;
            }
        } else {
            self.define_own_property(owner, name, PropertyDescriptor::data(value.clone(), RESOLVED_FLAGS))?;
        }

        amend::apply_amendments(self, &postponed.amendments)?;
        Ok(value)
    }

    /// Write to a postponed property before its first read.
    pub(crate) fn finalize_postponed(&mut self, owner: ObjectId, name: &str, value: Value) -> OopResult<()> {
        let amendments = amend::get_amendments(self.get_own_property(owner, name)?);
        self.object_mut(owner)?.remove_property(name);
        self.define_own_property(owner, name, PropertyDescriptor::data(value, RESOLVED_FLAGS))?;
        amend::apply_amendments(self, &amendments)
    }
}
