//! # protoclass - prototype-based classes in Rust
//!
//! A class runtime built on prototype chains, featuring:
//! - Single-parent derivation with ancestry queries
//! - Property additions with explicit write/enumerate/configure attributes
//! - Trait composition by copying
//! - Memoized instantiation through per-class instance registries
//! - Surrogates: subclasses chosen from constructor arguments
//! - Lazily computed properties with queued amendments
//!
//! ## Quick Start
//!
//! ```
//! use protoclass::{PropertyBlock, Realm, RealmConfig, Value};
//!
//! let mut realm = Realm::new(RealmConfig::default());
//! let base = realm.base();
//! let point = realm.extend(base).unwrap();
//! realm
//!     .add_methods(
//!         point,
//!         PropertyBlock::new().method("init", |realm, this, args| {
//!             let this = this.expect_object("point")?;
//!             realm.set(this, "x", args.get(0).cloned().unwrap_or_default())?;
//!             Ok(Value::Undefined)
//!         }),
//!     )
//!     .unwrap();
//!
//! let p = realm.create(point, &[Value::from(3)]).unwrap();
//! assert_eq!(realm.get(p, "x").unwrap(), Value::from(3));
//! assert!(realm.is_a(p, point).unwrap());
//! ```
//!
//! ## Realms
//!
//! All objects live in a [`Realm`], an arena addressed through
//! [`ObjectId`] handles. The realm carries its own configuration (layering
//! policy, messy mode, private prefix), so differently configured realms can
//! coexist in one process.
//!
//! ### Memoization
//!
//! ```
//! use protoclass::{Function, Realm, RealmConfig, Value};
//!
//! let mut realm = Realm::new(RealmConfig::default());
//! let base = realm.base();
//! let class = realm.extend(base).unwrap();
//! let by_first = Function::new("mapper", |_, _, args| Ok(args.get(0).cloned().unwrap_or_default()));
//! realm.set_instance_mapper(class, by_first).unwrap();
//!
//! let a = realm.create(class, &[Value::from("a")]).unwrap();
//! let b = realm.create(class, &[Value::from("a")]).unwrap();
//! assert_eq!(a, b);
//! ```
//!
//! ## Architecture
//!
//! - **[`ds`]** - Data structures (values, functions, objects, descriptors, realm)
//! - **[`oop`]** - Class and instance lifecycle engine

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

pub mod ds;
pub mod oop;

pub use crate::ds::error::{OopError, OopResult};
pub use crate::ds::function_object::Function;
pub use crate::ds::object::ObjectId;
pub use crate::ds::object_property::{PropertyBlock, PropertyDef, PropertyDescriptor, PropertyFlags};
pub use crate::ds::realm::{LayeringPolicy, Realm, RealmConfig};
pub use crate::ds::value::Value;
pub use crate::oop::{PreparationHandler, SurrogateDescriptor};
