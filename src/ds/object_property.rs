use indexmap::IndexMap;

use crate::ds::error::{OopError, OopResult};
use crate::ds::function_object::Function;
use crate::ds::realm::Realm;
use crate::ds::value::Value;

lazy_static! {
    /// Name of the instance initializer invoked by `create`.
    pub static ref INIT_PROP: String = "init".to_string();
}

/// Attribute triple applied when a property is defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PropertyFlags {
    pub writable: bool,
    pub enumerable: bool,
    pub configurable: bool,
}

impl PropertyFlags {
    pub const fn new(writable: bool, enumerable: bool, configurable: bool) -> Self {
        PropertyFlags {
            writable,
            enumerable,
            configurable,
        }
    }

    /// Read-only, enumerable, permanent. Public methods and constants.
    pub const PUBLIC_CONSTANT: PropertyFlags = PropertyFlags::new(false, true, false);
    /// Read-only, hidden, permanent. Private methods and constants.
    pub const PRIVATE_CONSTANT: PropertyFlags = PropertyFlags::new(false, false, false);
    /// Writable, enumerable, permanent.
    pub const PUBLIC_VARIABLE: PropertyFlags = PropertyFlags::new(true, true, false);
    /// Writable, hidden, permanent.
    pub const PRIVATE_VARIABLE: PropertyFlags = PropertyFlags::new(true, false, false);
    /// What plain assignment creates.
    pub const ASSIGNED: PropertyFlags = PropertyFlags::new(true, true, true);
}

/// A queued patch applied once a postponed property resolves.
#[derive(Clone, Debug, PartialEq)]
pub struct Amendment {
    pub modifier: Function,
    /// Full argument list handed to the modifier: host, property name, extras.
    pub args: Vec<Value>,
}

/// State of a property whose value is computed on first read.
#[derive(Clone, Debug, PartialEq)]
pub struct PostponedProperty {
    pub(crate) generator: Function,
    pub(crate) extra: Vec<Value>,
    pub(crate) amendments: Vec<Amendment>,
    pub(crate) failure: Option<OopError>,
}

impl PostponedProperty {
    pub fn new(generator: Function, extra: Vec<Value>) -> Self {
        PostponedProperty {
            generator,
            extra,
            amendments: Vec::new(),
            failure: None,
        }
    }

    pub fn generator(&self) -> &Function {
        &self.generator
    }

    pub fn amendments(&self) -> &[Amendment] {
        &self.amendments
    }

    /// Error cached by a failed resolution attempt, if any.
    pub fn failure(&self) -> Option<&OopError> {
        self.failure.as_ref()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PropertyDescriptor {
    Data {
        value: Value,
        writable: bool,
        enumerable: bool,
        configurable: bool,
    },
    Accessor {
        get: Option<Function>,
        set: Option<Function>,
        enumerable: bool,
        configurable: bool,
    },
    /// Getter/setter placeholder installed by postpone. Always enumerable
    /// and configurable so it can be replaced by the resolved value.
    Deferred(PostponedProperty),
}

impl PropertyDescriptor {
    pub fn data(value: Value, flags: PropertyFlags) -> Self {
        PropertyDescriptor::Data {
            value,
            writable: flags.writable,
            enumerable: flags.enumerable,
            configurable: flags.configurable,
        }
    }

    pub fn is_enumerable(&self) -> bool {
        match self {
            PropertyDescriptor::Data { enumerable, .. } => *enumerable,
            PropertyDescriptor::Accessor { enumerable, .. } => *enumerable,
            PropertyDescriptor::Deferred(_) => true,
        }
    }

    pub fn is_configurable(&self) -> bool {
        match self {
            PropertyDescriptor::Data { configurable, .. } => *configurable,
            PropertyDescriptor::Accessor { configurable, .. } => *configurable,
            PropertyDescriptor::Deferred(_) => true,
        }
    }

    pub fn is_writable(&self) -> bool {
        match self {
            PropertyDescriptor::Data { writable, .. } => *writable,
            PropertyDescriptor::Accessor { set, .. } => set.is_some(),
            PropertyDescriptor::Deferred(_) => true,
        }
    }

    pub fn is_data_descriptor(&self) -> bool {
        matches!(self, PropertyDescriptor::Data { .. })
    }

    /// True for getter/setter pairs, including unresolved postponed ones.
    pub fn is_accessor_descriptor(&self) -> bool {
        !self.is_data_descriptor()
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, PropertyDescriptor::Deferred(_))
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            PropertyDescriptor::Data { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Data property holding a function.
    pub fn is_method(&self) -> bool {
        matches!(
            self,
            PropertyDescriptor::Data {
                value: Value::Function(_),
                ..
            }
        )
    }

    pub fn flags(&self) -> PropertyFlags {
        PropertyFlags::new(self.is_writable(), self.is_enumerable(), self.is_configurable())
    }
}

/// One entry of a property block. Accessors are tagged by the caller rather
/// than recognised by shape.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyDef {
    Value(Value),
    Accessor {
        get: Option<Function>,
        set: Option<Function>,
    },
}

impl PropertyDef {
    pub fn is_function(&self) -> bool {
        matches!(self, PropertyDef::Value(Value::Function(_)))
    }

    /// Functions and accessors are both acceptable as methods.
    pub fn is_method_like(&self) -> bool {
        match self {
            PropertyDef::Value(v) => v.is_function(),
            PropertyDef::Accessor { .. } => true,
        }
    }
}

/// Name/definition pairs applied in one call. Keeps insertion order; adding
/// a name twice keeps the later definition in the earlier position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyBlock {
    entries: IndexMap<String, PropertyDef>,
}

impl PropertyBlock {
    pub fn new() -> Self {
        PropertyBlock {
            entries: IndexMap::new(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, def: PropertyDef) {
        self.entries.insert(name.into(), def);
    }

    pub fn value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, PropertyDef::Value(value.into()));
        self
    }

    pub fn function(self, name: impl Into<String>, func: Function) -> Self {
        self.value(name, Value::Function(func))
    }

    /// Adds a closure as a function valued entry named after its key.
    pub fn method<F>(self, name: &str, body: F) -> Self
    where
        F: Fn(&mut Realm, &Value, &[Value]) -> OopResult<Value> + 'static,
    {
        let func = Function::new(name, body);
        self.function(name, func)
    }

    pub fn accessor(
        mut self,
        name: impl Into<String>,
        get: Option<Function>,
        set: Option<Function>,
    ) -> Self {
        self.insert(name, PropertyDef::Accessor { get, set });
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&PropertyDef> {
        self.entries.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyDef)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn all_method_like(&self) -> bool {
        self.entries.values().all(PropertyDef::is_method_like)
    }

    pub fn has_functions(&self) -> bool {
        self.entries.values().any(PropertyDef::is_function)
    }

    pub fn all_prefixed(&self, prefix: &str) -> bool {
        self.names().all(|name| name.starts_with(prefix))
    }

    pub fn none_prefixed(&self, prefix: &str) -> bool {
        !self.names().any(|name| name.starts_with(prefix))
    }
}

impl<K: Into<String>> std::iter::FromIterator<(K, Value)> for PropertyBlock {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut block = PropertyBlock::new();
        for (name, value) in iter {
            block.insert(name, PropertyDef::Value(value));
        }
        block
    }
}
