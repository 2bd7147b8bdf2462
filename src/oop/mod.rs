//! Class and instance lifecycle engine.
//!
//! Everything here is an `impl Realm` block over the object model in
//! [`ds`](crate::ds), grouped by concern:
//!
//! - **[`base`]**: `extend` and ancestry queries, layering aware
//! - **[`properties`]**: the property store and the addition family
//! - **[`trait_composer`]**: copying trait properties into hosts
//! - **[`memoization`]**: instance mappers and per-class registries
//! - **[`surrogate`]**: argument-driven subclass substitution
//! - **[`instantiation`]**: `create`, tying the above together
//! - **[`postpone`]** and **[`amend`]**: lazily computed properties
//! - **[`mock`]**: test-harness overrides for shadow-layered realms
//! - **[`global`]**: the global namespace and built-in extension helpers
//!
//! ## Instantiation Flow
//!
//! ```text
//! create(class, args)
//!   1. class owns surrogates?  -> effective = get_surrogate(class, args)
//!   2. effective memoized?     -> key = map_instance(effective, args)
//!                                 cached instance under key? return it
//!   3. instance = extend(effective)
//!   4. effective.init(args) with this = instance, if init is a function
//!   5. key defined?            -> add_instance(effective, key, instance)
//! ```

pub mod amend;
pub mod base;
pub mod global;
pub mod instantiation;
pub mod memoization;
pub mod mock;
pub mod postpone;
pub mod properties;
pub mod surrogate;
pub mod trait_composer;

pub use memoization::{InstanceKey, InstanceRegistry};
pub use mock::MockTable;
pub use surrogate::{PreparationHandler, SurrogateDescriptor, SurrogateInfo};
