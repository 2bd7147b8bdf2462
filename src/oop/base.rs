//! Class graph: derivation and ancestry queries.
//!
//! `extend` is the only way nodes enter the graph, always below an existing
//! node, so chains are finite and acyclic by construction. Under the
//! shadow layering policy each `extend` allocates two nodes:
//!
//! ```text
//! outer (returned, mocks go here)
//!   └─ inner (anonymous, durable methods go here; see get_target)
//!        └─ parent
//! ```

use crate::ds::error::OopResult;
use crate::ds::object::ObjectId;
use crate::ds::realm::Realm;

impl Realm {
    /// Derives a new class (or bare instance) from `parent`.
    pub fn extend(&mut self, parent: ObjectId) -> OopResult<ObjectId> {
        let mut result = self.object_create(Some(parent))?;
        if self.layering().is_shadowed() {
            result = self.object_create(Some(result))?;
        }
        debug!("extended {} into {}", parent, result);
        Ok(result)
    }

    /// Node that methods added to `id` should be written to: `id` itself, or
    /// its inner layer when shadow layering is active.
    pub fn get_target(&self, id: ObjectId) -> OopResult<ObjectId> {
        if self.layering().is_shadowed() {
            Ok(self.prototype_of(id)?.unwrap_or(id))
        } else {
            self.check(id)?;
            Ok(id)
        }
    }

    /// Logical parent of `id`, skipping the shadow layer when present.
    pub fn get_base(&self, id: ObjectId) -> OopResult<Option<ObjectId>> {
        let parent = self.prototype_of(id)?;
        if self.layering().is_shadowed() {
            match parent {
                Some(inner) => self.prototype_of(inner),
                None => Ok(None),
            }
        } else {
            Ok(parent)
        }
    }

    /// True if `base` is a direct or indirect ancestor of `id`. Never true
    /// for `id` itself.
    pub fn is_a(&self, id: ObjectId, base: ObjectId) -> OopResult<bool> {
        self.is_prototype_of(base, id)
    }

    /// Inverse of [`Realm::is_a`].
    pub fn is_base_of(&self, base: ObjectId, id: ObjectId) -> OopResult<bool> {
        self.is_prototype_of(base, id)
    }

    /// True only when `base` is the immediate logical parent of `id`.
    pub fn instance_of(&self, id: ObjectId, base: ObjectId) -> OopResult<bool> {
        self.check(base)?;
        Ok(self.get_base(id)? == Some(base))
    }

    /// True for anything derived from the realm's `Base`.
    pub fn is_class(&self, id: ObjectId) -> OopResult<bool> {
        self.is_prototype_of(self.base(), id)
    }
}
