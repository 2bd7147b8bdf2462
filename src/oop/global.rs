//! Helpers writing to the realm's global namespace and to prototypes that
//! live outside the class lineage.

use crate::ds::error::{OopError, OopResult};
use crate::ds::object::ObjectId;
use crate::ds::object_property::{PropertyBlock, PropertyFlags};
use crate::ds::realm::Realm;

/// Required name prefix of conversion methods added by `extend_built_in`.
const BUILT_IN_PREFIX: &str = "to";

fn ensure_all_functions(block: &PropertyBlock, what: &str) -> OopResult<()> {
    if block.iter().all(|(_, def)| def.is_function()) {
        Ok(())
    } else {
        Err(OopError::InvalidArgument(format!("invalid {}: not all functions", what)))
    }
}

impl Realm {
    /// Read-only, enumerable functions on the global namespace.
    pub fn add_global_functions(&mut self, functions: PropertyBlock) -> OopResult<ObjectId> {
        ensure_all_functions(&functions, "global functions")?;
        let global = self.global();
        self.define_block(global, &functions, PropertyFlags::PUBLIC_CONSTANT)?;
        Ok(global)
    }

    /// Read-only, enumerable values on the global namespace.
    pub fn add_global_constants(&mut self, constants: PropertyBlock) -> OopResult<ObjectId> {
        let global = self.global();
        self.define_block(global, &constants, PropertyFlags::PUBLIC_CONSTANT)?;
        Ok(global)
    }

    /// Adds hidden, read-only conversion methods to `prototype`. Every name
    /// must start with `to`.
    pub fn extend_built_in(&mut self, prototype: ObjectId, methods: PropertyBlock) -> OopResult<()> {
        ensure_all_functions(&methods, "methods")?;
        if !methods.all_prefixed(BUILT_IN_PREFIX) {
            return Err(OopError::PrefixViolation(format!(
                "built-in method names must start with '{}'",
                BUILT_IN_PREFIX
            )));
        }
        self.define_block(prototype, &methods, PropertyFlags::PRIVATE_CONSTANT)?;
        debug!("extended built-in {} with {} method(s)", prototype, methods.len());
        Ok(())
    }
}
