//! Surrogate resolution: redirecting instantiation to a subclass chosen by
//! the constructor arguments.
//!
//! Surrogates are looked up by namespace and name when `create` runs, so a
//! surrogate may be registered before the class it names exists.

use std::fmt;
use std::rc::Rc;

use crate::ds::error::{OopError, OopResult};
use crate::ds::function_object::Function;
use crate::ds::object::ObjectId;
use crate::ds::operations::type_conversion::to_boolean;
use crate::ds::realm::Realm;
use crate::ds::value::Value;

/// Rewrites constructor arguments into the list surrogate filters see.
/// Receives the class being instantiated.
#[derive(Clone)]
pub struct PreparationHandler(Rc<dyn Fn(&mut Realm, ObjectId, &[Value]) -> OopResult<Vec<Value>>>);

impl PreparationHandler {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&mut Realm, ObjectId, &[Value]) -> OopResult<Vec<Value>> + 'static,
    {
        PreparationHandler(Rc::new(handler))
    }

    pub fn call(&self, realm: &mut Realm, class: ObjectId, args: &[Value]) -> OopResult<Vec<Value>> {
        (self.0)(realm, class, args)
    }
}

impl fmt::Debug for PreparationHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PreparationHandler")
    }
}

#[derive(Clone, Debug)]
pub struct SurrogateDescriptor {
    pub namespace: ObjectId,
    pub class_name: String,
    pub filter: Function,
    pub priority: f64,
}

/// Surrogate state owned by one class. Descriptors are kept sorted by
/// descending priority; equal priorities keep insertion order.
#[derive(Clone, Debug, Default)]
pub struct SurrogateInfo {
    pub preparation_handler: Option<PreparationHandler>,
    pub descriptors: Vec<SurrogateDescriptor>,
}

impl SurrogateInfo {
    fn push(&mut self, descriptor: SurrogateDescriptor) {
        self.descriptors.push(descriptor);
        // sort_by is stable
        self.descriptors.sort_by(|a, b| {
            b.priority
                .partial_cmp(&a.priority)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }
}

impl Realm {
    /// Installs the argument preparation handler of `class`, replacing the
    /// previous one.
    pub fn prepare_surrogates(&mut self, class: ObjectId, handler: PreparationHandler) -> OopResult<ObjectId> {
        let data = self.object_mut(class)?;
        data.surrogate_info
            .get_or_insert_with(SurrogateInfo::default)
            .preparation_handler = Some(handler);
        Ok(class)
    }

    /// Registers `namespace[class_name]` as a surrogate of `class`, picked
    /// when `filter` accepts the prepared arguments. Instances `class` has
    /// already cached are dropped so they cannot bypass the new surrogate.
    pub fn add_surrogate(
        &mut self,
        class: ObjectId,
        namespace: ObjectId,
        class_name: &str,
        filter: Function,
        priority: f64,
    ) -> OopResult<ObjectId> {
        self.check(namespace)?;
        if class_name.is_empty() {
            return Err(OopError::invalid_argument("invalid class name"));
        }
        if priority.is_nan() {
            return Err(OopError::invalid_argument("invalid surrogate priority"));
        }
        if self.object(class)?.owns_instance_registry() {
            self.clear_instance_registry(class)?;
        }
        self.object_mut(class)?
            .surrogate_info
            .get_or_insert_with(SurrogateInfo::default)
            .push(SurrogateDescriptor {
                namespace,
                class_name: class_name.to_string(),
                filter,
                priority,
            });
        debug!(
            "added surrogate '{}' to {} with priority {}",
            class_name, class, priority
        );
        Ok(class)
    }

    /// Class that instantiating `class` with `args` should produce. Only
    /// a class that owns surrogate info takes part; descendants do not.
    pub fn get_surrogate(&mut self, class: ObjectId, args: &[Value]) -> OopResult<ObjectId> {
        let info = match self.object(class)?.surrogate_info.clone() {
            Some(info) => info,
            None => return Ok(class),
        };
        let prepared;
        let filter_args = match info.preparation_handler {
            Some(ref handler) => {
                prepared = handler.call(self, class, args)?;
                &prepared[..]
            }
            None => args,
        };
        let receiver = Value::Object(class);
        for descriptor in &info.descriptors {
            if !to_boolean(&descriptor.filter.call(self, &receiver, filter_args)?) {
                continue;
            }
            return match self.get(descriptor.namespace, &descriptor.class_name)? {
                Value::Object(surrogate) => {
                    trace!("{} resolved to surrogate {}", class, surrogate);
                    Ok(surrogate)
                }
                other => {
                    warn!(
                        "surrogate '{}' of {} is not a class ({}), instantiating {} instead",
                        descriptor.class_name, class, other, class
                    );
                    Ok(class)
                }
            };
        }
        Ok(class)
    }

    /// Surrogate descriptors owned by `class`, in evaluation order.
    pub fn surrogate_descriptors(&self, class: ObjectId) -> OopResult<&[SurrogateDescriptor]> {
        Ok(self
            .object(class)?
            .surrogate_info
            .as_ref()
            .map(|info| &info.descriptors[..])
            .unwrap_or(&[]))
    }
}
