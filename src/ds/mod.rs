//! Data structures of the object model: values, native functions, objects,
//! property descriptors and the realm arena that owns them.

pub mod error;
pub mod function_object;
pub mod object;
pub mod object_property;
pub mod operations;
pub mod realm;
pub mod value;
