use std::fmt;
use std::fmt::{Display, Formatter};

use indexmap::IndexMap;
use uuid::Uuid;

use crate::ds::function_object::Function;
use crate::ds::object_property::PropertyDescriptor;
use crate::oop::memoization::InstanceRegistry;
use crate::oop::surrogate::SurrogateInfo;

/// Handle to an object stored in a [`Realm`](crate::ds::realm::Realm).
///
/// Handles carry the id of the realm that allocated them, so handing one
/// realm's object to another realm is reported instead of silently reading
/// an unrelated slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId {
    realm: Uuid,
    index: usize,
}

impl ObjectId {
    pub(crate) fn new(realm: Uuid, index: usize) -> Self {
        ObjectId { realm, index }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn realm(&self) -> Uuid {
        self.realm
    }
}

impl Display for ObjectId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

/// A node of the derivation graph: one parent link plus own properties.
///
/// Classes, instances, namespaces and traits are all plain objects. The
/// class-level slots (instance mapper, instance registry, surrogate info)
/// stay empty on objects that never opt into memoization or surrogates.
pub struct ObjectData {
    prototype: Option<ObjectId>,
    properties: IndexMap<String, PropertyDescriptor>,
    pub(crate) instance_mapper: Option<Function>,
    pub(crate) instance_registry: Option<InstanceRegistry>,
    pub(crate) surrogate_info: Option<SurrogateInfo>,
}

impl ObjectData {
    pub fn new(prototype: Option<ObjectId>) -> Self {
        ObjectData {
            prototype,
            properties: IndexMap::new(),
            instance_mapper: None,
            instance_registry: None,
            surrogate_info: None,
        }
    }

    /// Parent link. `None` is the bottom of every chain.
    pub fn get_prototype_of(&self) -> Option<ObjectId> {
        self.prototype
    }

    pub fn get_own_property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.get(name)
    }

    pub(crate) fn get_own_property_mut(&mut self, name: &str) -> Option<&mut PropertyDescriptor> {
        self.properties.get_mut(name)
    }

    pub fn has_own_property(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// Own property names in definition order, enumerable or not.
    pub fn own_property_keys(&self) -> Vec<String> {
        self.properties.keys().cloned().collect()
    }

    pub fn own_properties(&self) -> impl Iterator<Item = (&str, &PropertyDescriptor)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub(crate) fn insert_property(&mut self, name: String, descriptor: PropertyDescriptor) {
        self.properties.insert(name, descriptor);
    }

    pub(crate) fn remove_property(&mut self, name: &str) -> Option<PropertyDescriptor> {
        self.properties.shift_remove(name)
    }

    pub fn owns_instance_mapper(&self) -> bool {
        self.instance_mapper.is_some()
    }

    pub fn owns_instance_registry(&self) -> bool {
        self.instance_registry.is_some()
    }

    pub fn owns_surrogate_info(&self) -> bool {
        self.surrogate_info.is_some()
    }
}
