//! Trait composition: copying another lineage's properties into a host.
//!
//! The host keeps its single parent; the trait's properties are copied onto
//! it with their original attributes. Copying is structural only. The
//! trait's initializer is skipped and stays the host's responsibility.

use crate::ds::error::{OopError, OopResult};
use crate::ds::object::ObjectId;
use crate::ds::object_property::{PropertyDescriptor, INIT_PROP};
use crate::ds::realm::Realm;

impl Realm {
    /// A trait derived from `Base` may only be composed into a host that is
    /// itself a class; plain-object traits fit anywhere.
    fn check_trait_compatibility(&self, host: ObjectId, trait_object: ObjectId) -> OopResult<()> {
        let base = self.base();
        let host_base = self.get_base(host)?;
        let compatible = match host_base {
            Some(host_base) => host_base == base || self.is_prototype_of(base, host_base)?,
            None => false,
        };
        if compatible {
            Ok(())
        } else {
            Err(OopError::InvalidTrait(format!(
                "trait {} is a class but host {} does not derive from its base",
                trait_object, host
            )))
        }
    }

    /// Descriptor to copy for a planned name. A postponed value is resolved
    /// on the trait first so the copy carries the real value.
    fn resolved_trait_descriptor(
        &mut self,
        trait_object: ObjectId,
        name: &str,
        descriptor: PropertyDescriptor,
    ) -> OopResult<Option<PropertyDescriptor>> {
        if descriptor.is_deferred() {
            self.get(trait_object, name)?;
            self.get_property_descriptor(trait_object, name)
        } else {
            Ok(Some(descriptor))
        }
    }

    /// Copies every property of `trait_object`'s chain (up to `Base` for
    /// class traits, to the bottom otherwise) except the initializer.
    /// Methods go to the host's method target, everything else onto the
    /// host. Postponed values land on the host. Any name already present at
    /// its destination aborts the whole composition before any generator
    /// runs or anything is copied.
    pub fn add_trait(&mut self, host: ObjectId, trait_object: ObjectId) -> OopResult<ObjectId> {
        self.check(host)?;
        let base = self.base();
        let stop = if self.is_base_of(base, trait_object)? {
            self.check_trait_compatibility(host, trait_object)?;
            Some(base)
        } else {
            None
        };

        let host_target = self.get_target(host)?;
        let mut plan: Vec<(ObjectId, String, PropertyDescriptor)> = Vec::new();
        for name in self.get_property_names(trait_object, stop)? {
            if name == *INIT_PROP {
                continue;
            }
            let descriptor = match self.get_property_descriptor(trait_object, &name)? {
                Some(descriptor) => descriptor,
                None => continue,
            };
            let destination = if descriptor.is_method() { host_target } else { host };
            let planned = plan.iter().any(|(dest, planned, _)| *dest == destination && *planned == name);
            if planned || self.has_own_property(destination, &name)? {
                return Err(OopError::PropertyConflict(format!(
                    "direct property conflict: trait property '{}' already defined on {}",
                    name, destination
                )));
            }
            plan.push((destination, name, descriptor));
        }

        let mut resolved = Vec::with_capacity(plan.len());
        for (destination, name, descriptor) in plan {
            if let Some(descriptor) = self.resolved_trait_descriptor(trait_object, &name, descriptor)? {
                resolved.push((destination, name, descriptor));
            }
        }

        let copied = resolved.len();
        for (destination, name, descriptor) in resolved {
            self.define_own_property(destination, &name, descriptor)?;
        }
        debug!("copied {} trait propert(ies) from {} to {}", copied, trait_object, host);
        Ok(host)
    }

    /// `add_trait`, then `extend`, so methods added afterwards override the
    /// copied ones. Returns the new class.
    pub fn add_trait_and_extend(&mut self, host: ObjectId, trait_object: ObjectId) -> OopResult<ObjectId> {
        self.add_trait(host, trait_object)?;
        self.extend(host)
    }
}
