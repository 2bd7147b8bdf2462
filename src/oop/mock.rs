//! Test-harness overrides.
//!
//! Mocks never touch the objects they cover. They live in a table owned by
//! the realm, keyed by object and property name, and property lookup
//! consults the table before a node's own properties. Dropping the table
//! entries restores the original behaviour exactly.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::ds::error::{OopError, OopResult};
use crate::ds::object::ObjectId;
use crate::ds::object_property::{PropertyBlock, PropertyDef, PropertyDescriptor, PropertyFlags};
use crate::ds::realm::Realm;

/// Mock flags: read-only, enumerable, removable.
const MOCK_FLAGS: PropertyFlags = PropertyFlags::new(false, true, true);

#[derive(Default)]
pub struct MockTable {
    entries: HashMap<ObjectId, IndexMap<String, PropertyDescriptor>>,
}

impl MockTable {
    pub fn new() -> Self {
        MockTable {
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, id: ObjectId, name: &str) -> Option<&PropertyDescriptor> {
        self.entries.get(&id).and_then(|mocks| mocks.get(name))
    }

    pub fn is_mocked(&self, id: ObjectId, name: &str) -> bool {
        self.get(id, name).is_some()
    }

    pub fn mocked_names(&self, id: ObjectId) -> Vec<String> {
        self.entries
            .get(&id)
            .map(|mocks| mocks.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn insert(&mut self, id: ObjectId, name: String, descriptor: PropertyDescriptor) {
        self.entries.entry(id).or_default().insert(name, descriptor);
    }

    fn remove(&mut self, id: ObjectId) -> usize {
        self.entries.remove(&id).map(|mocks| mocks.len()).unwrap_or(0)
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Realm {
    /// Covers methods of `id` with the functions or accessors in `methods`.
    /// Only allowed while the realm is shadow-layered.
    pub fn add_mocks(&mut self, id: ObjectId, methods: PropertyBlock) -> OopResult<ObjectId> {
        if !self.layering().is_shadowed() {
            return Err(OopError::DiagnosticModeRequired(
                "mocks need the shadow layering policy".to_string(),
            ));
        }
        self.check(id)?;
        if !methods.all_method_like() {
            return Err(OopError::InvalidArgument(
                "some mock methods are not functions".to_string(),
            ));
        }
        for (name, def) in methods.iter() {
            let descriptor = match def {
                PropertyDef::Value(value) => PropertyDescriptor::data(value.clone(), MOCK_FLAGS),
                PropertyDef::Accessor { get, set } => PropertyDescriptor::Accessor {
                    get: get.clone(),
                    set: set.clone(),
                    enumerable: MOCK_FLAGS.enumerable,
                    configurable: MOCK_FLAGS.configurable,
                },
            };
            self.mocks.insert(id, name.to_string(), descriptor);
        }
        debug!("mocked {} method(s) on {}", methods.len(), id);
        Ok(id)
    }

    /// Drops every mock installed on `id`.
    pub fn remove_mocks(&mut self, id: ObjectId) -> OopResult<ObjectId> {
        self.check(id)?;
        let removed = self.mocks.remove(id);
        debug!("removed {} mock(s) from {}", removed, id);
        Ok(id)
    }

    /// Drops every mock in the realm.
    pub fn clear_mocks(&mut self) {
        self.mocks.clear();
    }

    pub fn mocks(&self) -> &MockTable {
        &self.mocks
    }
}
