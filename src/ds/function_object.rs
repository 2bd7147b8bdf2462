use std::fmt;
use std::rc::Rc;

use crate::ds::error::OopResult;
use crate::ds::realm::Realm;
use crate::ds::value::Value;

/// Signature of every callable stored in a realm: methods, accessors,
/// initializers, instance mappers, surrogate filters, generators and
/// amendments. Native functions receive the realm, the `this` value and the
/// arguments.
pub type NativeFn = dyn Fn(&mut Realm, &Value, &[Value]) -> OopResult<Value>;

/// A reference counted native closure. Cloning shares the closure, so two
/// clones compare equal.
#[derive(Clone)]
pub struct Function {
    name: Rc<str>,
    body: Rc<NativeFn>,
    bound_this: Option<Rc<Value>>,
}

impl Function {
    pub fn new<F>(name: &str, body: F) -> Self
    where
        F: Fn(&mut Realm, &Value, &[Value]) -> OopResult<Value> + 'static,
    {
        Function {
            name: Rc::from(name),
            body: Rc::new(body),
            bound_this: None,
        }
    }

    pub fn anonymous<F>(body: F) -> Self
    where
        F: Fn(&mut Realm, &Value, &[Value]) -> OopResult<Value> + 'static,
    {
        Function::new("", body)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a copy whose receiver is fixed to `this`, whatever the caller
    /// passes later.
    pub fn bind(&self, this: Value) -> Function {
        Function {
            name: self.name.clone(),
            body: self.body.clone(),
            bound_this: Some(Rc::new(this)),
        }
    }

    pub fn bound_this(&self) -> Option<&Value> {
        self.bound_this.as_deref()
    }

    pub fn call(&self, realm: &mut Realm, this: &Value, args: &[Value]) -> OopResult<Value> {
        let this = self.bound_this.as_deref().unwrap_or(this);
        (self.body)(realm, this, args)
    }

    fn same_body(&self, other: &Function) -> bool {
        Rc::as_ptr(&self.body) as *const u8 == Rc::as_ptr(&other.body) as *const u8
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.same_body(other) && self.bound_this == other.bound_this
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.bound_this.is_some() {
            write!(f, "Function(bound {})", self.name)
        } else {
            write!(f, "Function({})", self.name)
        }
    }
}
