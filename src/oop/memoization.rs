//! Per-class instance caches.
//!
//! A class becomes memoized by owning an instance mapper. The mapper turns
//! constructor arguments into a key; `create` hands out the cached instance
//! for a key it has seen before. Descendants without their own mapper share
//! the nearest ancestor's mapper and registry.

use indexmap::IndexMap;

use crate::ds::error::{OopError, OopResult};
use crate::ds::function_object::Function;
use crate::ds::object::{ObjectData, ObjectId};
use crate::ds::operations::type_conversion::to_string;
use crate::ds::realm::Realm;
use crate::ds::value::Value;

pub type InstanceKey = String;

/// Key to instance mapping owned by one class.
pub type InstanceRegistry = IndexMap<InstanceKey, ObjectId>;

impl Realm {
    /// Makes `class` memoized. A class owns at most one mapper; descendants
    /// may install their own, which gives them an independent registry.
    pub fn set_instance_mapper(&mut self, class: ObjectId, mapper: Function) -> OopResult<ObjectId> {
        let data = self.object_mut(class)?;
        if data.owns_instance_mapper() {
            return Err(OopError::PropertyConflict(format!(
                "instance mapper already set on {}",
                class
            )));
        }
        data.instance_mapper = Some(mapper);
        data.instance_registry = Some(InstanceRegistry::new());
        debug!("class {} is now memoized", class);
        Ok(class)
    }

    /// Nearest node on the chain of `class` for which `owns` holds.
    fn nearest_owner<F>(&self, class: ObjectId, owns: F) -> OopResult<Option<ObjectId>>
    where
        F: Fn(&ObjectData) -> bool,
    {
        let mut current = Some(class);
        while let Some(node) = current {
            let data = self.object(node)?;
            if owns(data) {
                return Ok(Some(node));
            }
            current = data.get_prototype_of();
        }
        Ok(None)
    }

    /// True if `class` or any of its ancestors owns an instance mapper.
    pub fn is_memoized(&self, class: ObjectId) -> OopResult<bool> {
        Ok(self.instance_mapper(class)?.is_some())
    }

    /// The mapper `create` uses for `class`.
    pub fn instance_mapper(&self, class: ObjectId) -> OopResult<Option<Function>> {
        Ok(match self.nearest_owner(class, |data| data.owns_instance_mapper())? {
            Some(owner) => self.object(owner)?.instance_mapper.clone(),
            None => None,
        })
    }

    fn registry_owner(&self, class: ObjectId) -> OopResult<ObjectId> {
        self.nearest_owner(class, |data| data.owns_instance_registry())?
            .ok_or_else(|| OopError::NotOwner(format!("{} has no instance registry", class)))
    }

    /// Applies the mapper to `args` with `class` as receiver. `None` means
    /// the call opts out of caching.
    pub fn map_instance(&mut self, class: ObjectId, args: &[Value]) -> OopResult<Option<InstanceKey>> {
        let mapper = self.instance_mapper(class)?.ok_or_else(|| {
            OopError::InvalidArgument(format!("{} is not memoized", class))
        })?;
        match mapper.call(self, &Value::Object(class), args)? {
            Value::Undefined => Ok(None),
            key => to_string(&key).map(Some),
        }
    }

    /// Stores `instance` in the registry `class` reads from.
    pub fn add_instance(&mut self, class: ObjectId, key: InstanceKey, instance: ObjectId) -> OopResult<ObjectId> {
        self.check(instance)?;
        let owner = self.registry_owner(class)?;
        if let Some(registry) = self.object_mut(owner)?.instance_registry.as_mut() {
            registry.insert(key, instance);
        }
        Ok(class)
    }

    pub fn get_instance(&self, class: ObjectId, key: &str) -> OopResult<Option<ObjectId>> {
        match self.nearest_owner(class, |data| data.owns_instance_registry())? {
            Some(owner) => Ok(self
                .object(owner)?
                .instance_registry
                .as_ref()
                .and_then(|registry| registry.get(key).copied())),
            None => Ok(None),
        }
    }

    /// Empties the registry owned by `class`. Inherited registries cannot
    /// be cleared from a descendant.
    pub fn clear_instance_registry(&mut self, class: ObjectId) -> OopResult<ObjectId> {
        let data = self.object_mut(class)?;
        match data.instance_registry.as_mut() {
            Some(registry) => {
                let dropped = registry.len();
                *registry = InstanceRegistry::new();
                debug!("cleared {} instance(s) from the registry of {}", dropped, class);
                Ok(class)
            }
            None => Err(OopError::NotOwner(format!(
                "{} doesn't own an instance registry",
                class
            ))),
        }
    }

    /// Registry `class` reads from, own or inherited.
    pub fn instance_registry(&self, class: ObjectId) -> OopResult<Option<&InstanceRegistry>> {
        match self.nearest_owner(class, |data| data.owns_instance_registry())? {
            Some(owner) => Ok(self.object(owner)?.instance_registry.as_ref()),
            None => Ok(None),
        }
    }
}
