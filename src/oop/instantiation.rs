use crate::ds::error::OopResult;
use crate::ds::object::ObjectId;
use crate::ds::object_property::INIT_PROP;
use crate::ds::realm::Realm;
use crate::ds::value::Value;

impl Realm {
    /// Instantiates `class` with `args`.
    ///
    /// The class's surrogates pick the class actually instantiated. A
    /// memoized class returns its cached instance for the key the mapper
    /// derives from `args`, without running the initializer again. Anything
    /// else gets a fresh instance, initialized by the class's `init` method
    /// and cached when the key is defined.
    pub fn create(&mut self, class: ObjectId, args: &[Value]) -> OopResult<ObjectId> {
        let effective = if self.object(class)?.owns_surrogate_info() {
            self.get_surrogate(class, args)?
        } else {
            class
        };

        let mut key = None;
        if self.is_memoized(effective)? {
            key = self.map_instance(effective, args)?;
            if let Some(ref key) = key {
                if let Some(cached) = self.get_instance(effective, key)? {
                    trace!("memoized instance '{}' of {} reused", key, effective);
                    return Ok(cached);
                }
            }
        }

        let instance = self.extend(effective)?;
        if let Value::Function(init) = self.get(effective, &INIT_PROP)? {
            init.call(self, &Value::Object(instance), args)?;
        }

        if let Some(key) = key {
            self.add_instance(effective, key, instance)?;
        }
        debug!("created instance {} of {}", instance, effective);
        Ok(instance)
    }
}
