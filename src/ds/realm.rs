//! The realm: an arena owning every object of one class runtime.
//!
//! Objects live in a `Vec` and are addressed by [`ObjectId`] handles.
//! Derivation is a parent index; nothing is ever freed, so handles stay
//! valid for the lifetime of the realm.
//!
//! The realm also carries the ambient switches that the class engine reads
//! on every call (layering policy, messy mode, private prefix). They are
//! injected through [`RealmConfig`] and scoped to the realm, so two realms
//! configured differently never affect each other.

use uuid::Uuid;

use crate::ds::error::{OopError, OopResult};
use crate::ds::object::{ObjectData, ObjectId};
use crate::ds::object_property::{PropertyDescriptor, PropertyFlags};
use crate::ds::value::Value;
use crate::oop::mock::MockTable;

/// How `extend` lays out new classes and instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayeringPolicy {
    /// One node per `extend` call.
    SingleLayer,
    /// Diagnostic mode: every `extend` inserts an extra anonymous node, so
    /// durable methods land one level below the node tests may shadow.
    ShadowLayer,
}

impl LayeringPolicy {
    pub fn is_shadowed(&self) -> bool {
        *self == LayeringPolicy::ShadowLayer
    }
}

impl Default for LayeringPolicy {
    fn default() -> Self {
        LayeringPolicy::SingleLayer
    }
}

/// Configuration for a realm.
#[derive(Debug, Clone, PartialEq)]
pub struct RealmConfig {
    /// Layering used by `extend`, `get_target` and `get_base`.
    pub layering: LayeringPolicy,
    /// When true, every value property defined by the property store is
    /// writable regardless of what the caller asked for.
    pub messy: bool,
    /// Prefix that private property names must carry.
    pub private_prefix: String,
}

impl RealmConfig {
    pub fn new() -> Self {
        RealmConfig {
            layering: LayeringPolicy::SingleLayer,
            messy: false,
            private_prefix: "_".to_string(),
        }
    }

    /// Configuration for diagnostic use: shadow layering on.
    pub fn testing() -> Self {
        Self::new().with_layering(LayeringPolicy::ShadowLayer)
    }

    pub fn with_layering(mut self, layering: LayeringPolicy) -> Self {
        self.layering = layering;
        self
    }

    pub fn with_messy(mut self, messy: bool) -> Self {
        self.messy = messy;
        self
    }

    pub fn with_private_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.private_prefix = prefix.into();
        self
    }
}

impl Default for RealmConfig {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Realm {
    id: Uuid,
    objects: Vec<ObjectData>,
    config: RealmConfig,
    base: ObjectId,
    global: ObjectId,
    pub(crate) mocks: MockTable,
}

impl Realm {
    /// Creates a realm holding the root `Base` class and an empty global
    /// namespace object.
    pub fn new(config: RealmConfig) -> Self {
        let id = Uuid::new_v4();
        let mut realm = Realm {
            id,
            objects: Vec::new(),
            config,
            base: ObjectId::new(id, 0),
            global: ObjectId::new(id, 0),
            mocks: MockTable::new(),
        };
        realm.base = realm.allocate(None);
        realm.global = realm.allocate(None);
        debug!("realm {} created with {:?}", realm.id, realm.config.layering);
        realm
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &RealmConfig {
        &self.config
    }

    /// Switches are read on every call; changing them mid-way through a
    /// multi-step class construction makes that class's layout depend on
    /// call order.
    pub fn config_mut(&mut self) -> &mut RealmConfig {
        &mut self.config
    }

    pub fn layering(&self) -> LayeringPolicy {
        self.config.layering
    }

    /// The root class every class derives from.
    pub fn base(&self) -> ObjectId {
        self.base
    }

    /// The realm-wide namespace written by the global helpers.
    pub fn global(&self) -> ObjectId {
        self.global
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    fn allocate(&mut self, prototype: Option<ObjectId>) -> ObjectId {
        let id = ObjectId::new(self.id, self.objects.len());
        self.objects.push(ObjectData::new(prototype));
        id
    }

    pub(crate) fn check(&self, id: ObjectId) -> OopResult<()> {
        if id.realm() != self.id {
            return Err(OopError::InvalidArgument(format!(
                "object {} belongs to another realm",
                id
            )));
        }
        if id.index() >= self.objects.len() {
            return Err(OopError::InvalidArgument(format!("unknown object {}", id)));
        }
        Ok(())
    }

    pub fn object(&self, id: ObjectId) -> OopResult<&ObjectData> {
        self.check(id)?;
        Ok(&self.objects[id.index()])
    }

    pub(crate) fn object_mut(&mut self, id: ObjectId) -> OopResult<&mut ObjectData> {
        self.check(id)?;
        Ok(&mut self.objects[id.index()])
    }

    /// A fresh plain object outside the class lineage.
    pub fn new_object(&mut self) -> ObjectId {
        self.allocate(None)
    }

    /// A fresh object whose parent is `prototype`.
    pub fn object_create(&mut self, prototype: Option<ObjectId>) -> OopResult<ObjectId> {
        if let Some(p) = prototype {
            self.check(p)?;
        }
        Ok(self.allocate(prototype))
    }

    pub fn prototype_of(&self, id: ObjectId) -> OopResult<Option<ObjectId>> {
        Ok(self.object(id)?.get_prototype_of())
    }

    /// True if `ancestor` appears strictly above `id` on its chain.
    pub fn is_prototype_of(&self, ancestor: ObjectId, id: ObjectId) -> OopResult<bool> {
        self.check(ancestor)?;
        let mut current = self.prototype_of(id)?;
        while let Some(node) = current {
            if node == ancestor {
                return Ok(true);
            }
            current = self.objects[node.index()].get_prototype_of();
        }
        Ok(false)
    }

    pub fn has_own_property(&self, id: ObjectId, name: &str) -> OopResult<bool> {
        Ok(self.object(id)?.has_own_property(name))
    }

    pub fn get_own_property(&self, id: ObjectId, name: &str) -> OopResult<Option<&PropertyDescriptor>> {
        Ok(self.object(id)?.get_own_property(name))
    }

    pub fn has_property(&self, id: ObjectId, name: &str) -> OopResult<bool> {
        Ok(self.lookup(id, name)?.is_some())
    }

    /// Finds the node that answers a read of `name` on `id`, together with
    /// the descriptor found there. Mocks shadow a node's own properties.
    pub fn lookup(&self, id: ObjectId, name: &str) -> OopResult<Option<(ObjectId, PropertyDescriptor)>> {
        self.check(id)?;
        let mut current = Some(id);
        while let Some(node) = current {
            if let Some(desc) = self.mocks.get(node, name) {
                return Ok(Some((node, desc.clone())));
            }
            let data = &self.objects[node.index()];
            if let Some(desc) = data.get_own_property(name) {
                return Ok(Some((node, desc.clone())));
            }
            current = data.get_prototype_of();
        }
        Ok(None)
    }

    /// Property read with getter invocation and lazy resolution.
    pub fn get(&mut self, id: ObjectId, name: &str) -> OopResult<Value> {
        match self.lookup(id, name)? {
            None => Ok(Value::Undefined),
            Some((owner, desc)) => match desc {
                PropertyDescriptor::Data { value, .. } => Ok(value),
                PropertyDescriptor::Accessor { get, .. } => match get {
                    None => Ok(Value::Undefined),
                    Some(getter) => getter.call(self, &Value::Object(id), &[]),
                },
                PropertyDescriptor::Deferred(_) => self.resolve_postponed(owner, name),
            },
        }
    }

    /// Strict-mode assignment.
    pub fn set(&mut self, id: ObjectId, name: &str, value: Value) -> OopResult<()> {
        match self.lookup(id, name)? {
            None => {
                self.object_mut(id)?
                    .insert_property(name.to_string(), PropertyDescriptor::data(value, PropertyFlags::ASSIGNED));
                Ok(())
            }
            Some((owner, desc)) => match desc {
                PropertyDescriptor::Data { writable, .. } => {
                    if !writable {
                        return Err(OopError::ReadOnly(format!(
                            "cannot assign to read only property '{}' of object {}",
                            name, id
                        )));
                    }
                    let data = self.object_mut(id)?;
                    match data.get_own_property_mut(name) {
                        Some(PropertyDescriptor::Data { value: current, .. }) if owner == id => {
                            *current = value;
                        }
                        _ => data.insert_property(
                            name.to_string(),
                            PropertyDescriptor::data(value, PropertyFlags::ASSIGNED),
                        ),
                    }
                    Ok(())
                }
                PropertyDescriptor::Accessor { set, .. } => match set {
                    None => Err(OopError::ReadOnly(format!(
                        "cannot set property '{}' of object {} which has only a getter",
                        name, id
                    ))),
                    Some(setter) => setter.call(self, &Value::Object(id), &[value]).map(|_| ()),
                },
                PropertyDescriptor::Deferred(_) => self.finalize_postponed(owner, name, value),
            },
        }
    }

    /// Installs `descriptor` as an own property, replacing a configurable
    /// one. Non-configurable properties cannot be redefined.
    pub fn define_own_property(
        &mut self,
        id: ObjectId,
        name: &str,
        descriptor: PropertyDescriptor,
    ) -> OopResult<()> {
        let data = self.object_mut(id)?;
        if let Some(current) = data.get_own_property(name) {
            if !current.is_configurable() {
                return Err(OopError::PropertyConflict(format!(
                    "cannot redefine property '{}' of object {}",
                    name, id
                )));
            }
        }
        data.insert_property(name.to_string(), descriptor);
        Ok(())
    }

    /// Removes a configurable own property. Returns false, leaving the
    /// object untouched, when the property is non-configurable.
    pub fn delete_property(&mut self, id: ObjectId, name: &str) -> OopResult<bool> {
        let data = self.object_mut(id)?;
        match data.get_own_property(name) {
            None => Ok(true),
            Some(desc) if desc.is_configurable() => {
                data.remove_property(name);
                Ok(true)
            }
            Some(_) => Ok(false),
        }
    }

    /// Own property names of `id` whose descriptors are enumerable.
    pub fn keys(&self, id: ObjectId) -> OopResult<Vec<String>> {
        Ok(self
            .object(id)?
            .own_properties()
            .filter(|(_, desc)| desc.is_enumerable())
            .map(|(name, _)| name.to_string())
            .collect())
    }
}
