//! Property store and the addition family built on it.
//!
//! Every addition validates its whole block before writing anything, so a
//! call either defines all of its properties or none.

use indexmap::IndexSet;

use crate::ds::error::{OopError, OopResult};
use crate::ds::function_object::Function;
use crate::ds::object::ObjectId;
use crate::ds::object_property::{PropertyBlock, PropertyDef, PropertyDescriptor, PropertyFlags};
use crate::ds::operations::type_conversion::get_type;
use crate::ds::realm::Realm;
use crate::ds::value::Value;

impl Realm {
    /// Installs a value property with exactly the given attributes, except
    /// that messy mode forces it writable.
    pub fn define_value(
        &mut self,
        target: ObjectId,
        name: &str,
        value: Value,
        flags: PropertyFlags,
    ) -> OopResult<()> {
        let flags = PropertyFlags {
            writable: flags.writable || self.config().messy,
            ..flags
        };
        self.define_own_property(target, name, PropertyDescriptor::data(value, flags))
    }

    pub fn define_accessor(
        &mut self,
        target: ObjectId,
        name: &str,
        get: Option<Function>,
        set: Option<Function>,
        enumerable: bool,
        configurable: bool,
    ) -> OopResult<()> {
        self.define_own_property(
            target,
            name,
            PropertyDescriptor::Accessor {
                get,
                set,
                enumerable,
                configurable,
            },
        )
    }

    /// Defines every entry of `block` on `target`. Fails without writing
    /// anything if one of the names is already an own property of `target`.
    pub fn define_block(
        &mut self,
        target: ObjectId,
        block: &PropertyBlock,
        flags: PropertyFlags,
    ) -> OopResult<()> {
        let data = self.object(target)?;
        if let Some(taken) = block.names().find(|name| data.has_own_property(name)) {
            return Err(OopError::PropertyConflict(format!(
                "direct property conflict: '{}' already defined on {}",
                taken, target
            )));
        }
        for (name, def) in block.iter() {
            match def {
                PropertyDef::Value(value) => self.define_value(target, name, value.clone(), flags)?,
                PropertyDef::Accessor { get, set } => self.define_accessor(
                    target,
                    name,
                    get.clone(),
                    set.clone(),
                    flags.enumerable,
                    flags.configurable,
                )?,
            }
        }
        Ok(())
    }

    /// Node on the chain of `host` (including `host`) that owns `name`.
    pub fn get_owner_of(&self, host: ObjectId, name: &str) -> OopResult<Option<ObjectId>> {
        let mut current = Some(host);
        while let Some(node) = current {
            let data = self.object(node)?;
            if data.has_own_property(name) {
                return Ok(Some(node));
            }
            current = data.get_prototype_of();
        }
        Ok(None)
    }

    /// Every property name, enumerable or not, found from `host` up to but
    /// excluding `stop`. Walks to the bottom of the chain when `stop` is
    /// `None` or not on the chain.
    pub fn get_property_names(&self, host: ObjectId, stop: Option<ObjectId>) -> OopResult<Vec<String>> {
        let mut names = IndexSet::new();
        let mut current = Some(host);
        while let Some(node) = current {
            if Some(node) == stop {
                break;
            }
            let data = self.object(node)?;
            names.extend(data.own_property_keys());
            current = data.get_prototype_of();
        }
        Ok(names.into_iter().collect())
    }

    /// Descriptor of `name` wherever it sits on the chain of `host`.
    pub fn get_property_descriptor(
        &self,
        host: ObjectId,
        name: &str,
    ) -> OopResult<Option<PropertyDescriptor>> {
        match self.get_owner_of(host, name)? {
            Some(owner) => Ok(self.object(owner)?.get_own_property(name).cloned()),
            None => Ok(None),
        }
    }

    fn ensure_none_prefixed(&self, block: &PropertyBlock, what: &str) -> OopResult<()> {
        let prefix = &self.config().private_prefix;
        if prefix.is_empty() || block.none_prefixed(prefix) {
            Ok(())
        } else {
            Err(OopError::PrefixViolation(format!(
                "some {} names carry the private prefix '{}'",
                what, prefix
            )))
        }
    }

    fn ensure_all_prefixed(&self, block: &PropertyBlock, what: &str) -> OopResult<()> {
        let prefix = &self.config().private_prefix;
        if block.all_prefixed(prefix) {
            Ok(())
        } else {
            Err(OopError::PrefixViolation(format!(
                "some {} names do not match the required prefix '{}'",
                what, prefix
            )))
        }
    }

    fn ensure_methods(block: &PropertyBlock, what: &str) -> OopResult<()> {
        if block.all_method_like() {
            Ok(())
        } else {
            Err(OopError::InvalidArgument(format!("some {} are not functions", what)))
        }
    }

    fn ensure_no_functions(block: &PropertyBlock, what: &str) -> OopResult<()> {
        if block.has_functions() {
            Err(OopError::InvalidArgument(format!("{} must not hold functions", what)))
        } else {
            Ok(())
        }
    }

    /// Public read-only methods, written to the method target.
    pub fn add_methods(&mut self, id: ObjectId, methods: PropertyBlock) -> OopResult<ObjectId> {
        Self::ensure_methods(&methods, "methods")?;
        self.ensure_none_prefixed(&methods, "public method")?;
        let target = self.get_target(id)?;
        self.define_block(target, &methods, PropertyFlags::PUBLIC_CONSTANT)?;
        Ok(id)
    }

    /// Private (hidden) read-only methods, written to the method target.
    pub fn add_private_methods(&mut self, id: ObjectId, methods: PropertyBlock) -> OopResult<ObjectId> {
        Self::ensure_methods(&methods, "private methods")?;
        self.ensure_all_prefixed(&methods, "private method")?;
        let target = self.get_target(id)?;
        self.define_block(target, &methods, PropertyFlags::PRIVATE_CONSTANT)?;
        Ok(id)
    }

    /// Public writable properties.
    pub fn add_public(&mut self, id: ObjectId, properties: PropertyBlock) -> OopResult<ObjectId> {
        self.ensure_none_prefixed(&properties, "public property")?;
        self.define_block(id, &properties, PropertyFlags::PUBLIC_VARIABLE)?;
        Ok(id)
    }

    /// Private writable properties. Functions belong in `add_private_methods`.
    pub fn add_private(&mut self, id: ObjectId, properties: PropertyBlock) -> OopResult<ObjectId> {
        Self::ensure_no_functions(&properties, "private properties")?;
        self.ensure_all_prefixed(&properties, "private property")?;
        self.define_block(id, &properties, PropertyFlags::PRIVATE_VARIABLE)?;
        Ok(id)
    }

    /// Public read-only properties.
    pub fn add_constants(&mut self, id: ObjectId, properties: PropertyBlock) -> OopResult<ObjectId> {
        self.ensure_none_prefixed(&properties, "constant")?;
        self.define_block(id, &properties, PropertyFlags::PUBLIC_CONSTANT)?;
        Ok(id)
    }

    /// Private read-only properties.
    pub fn add_private_constants(&mut self, id: ObjectId, properties: PropertyBlock) -> OopResult<ObjectId> {
        Self::ensure_no_functions(&properties, "private constants")?;
        self.ensure_all_prefixed(&properties, "private constant")?;
        self.define_block(id, &properties, PropertyFlags::PRIVATE_CONSTANT)?;
        Ok(id)
    }

    fn base_method(&mut self, id: ObjectId, base: ObjectId, name: &str) -> OopResult<Function> {
        match self.get(base, name)? {
            Value::Function(f) => Ok(f.bind(Value::Object(id))),
            other => Err(OopError::invalid_argument(format!(
                "attempted to elevate non-method '{}' of type {}",
                name,
                get_type(&other)
            ))),
        }
    }

    /// Copies the base class's `name` method onto `id` with its receiver
    /// fixed to `id`, so it can be handed around as a plain callback.
    pub fn elevate_method(&mut self, id: ObjectId, name: &str) -> OopResult<ObjectId> {
        self.elevate_methods(id, &[name])
    }

    pub fn elevate_methods(&mut self, id: ObjectId, names: &[&str]) -> OopResult<ObjectId> {
        let base = self.get_base(id)?.ok_or_else(|| {
            OopError::InvalidArgument(format!("{} has no base to elevate methods from", id))
        })?;
        let mut elevated = PropertyBlock::new();
        for name in names {
            let method = self.base_method(id, base, name)?;
            elevated = elevated.function(*name, method);
        }
        let target = self.get_target(id)?;
        self.define_block(target, &elevated, PropertyFlags::PUBLIC_CONSTANT)?;
        Ok(id)
    }
}
